//! Flat triangle mesh

use crate::grid::geometry::ElementGeometry;
use crate::types::{Error, RealScalar, Result};

/// A flat triangle mesh
///
/// The mesh stores the vertex set, the connectivity table (one vertex triple per cell) and a
/// table of per-cell normal signs. The sign of each cell is applied to the normal computed from
/// the cross product of the cell's tangents, which allows the caller to make the orientation of
/// a mesh globally consistent without reordering the connectivity.
#[derive(Debug, Clone)]
pub struct TriangleMesh<T: RealScalar> {
    vertices: Vec<[T; 3]>,
    cells: Vec<[usize; 3]>,
    normal_signs: Vec<T>,
}

impl<T: RealScalar> TriangleMesh<T> {
    /// Create a mesh with all normal signs set to +1
    pub fn new(vertices: Vec<[T; 3]>, cells: Vec<[usize; 3]>) -> Result<Self> {
        for (index, v) in vertices.iter().enumerate() {
            if v.iter().any(|x| !x.is_finite()) {
                return Err(Error::InvalidMesh(format!(
                    "vertex {index} has non-finite coordinates"
                )));
            }
        }
        for (index, cell) in cells.iter().enumerate() {
            for v in cell {
                if *v >= vertices.len() {
                    return Err(Error::InvalidMesh(format!(
                        "cell {index} references vertex {v}, but the mesh has {} vertices",
                        vertices.len()
                    )));
                }
            }
            if cell[0] == cell[1] || cell[1] == cell[2] || cell[0] == cell[2] {
                return Err(Error::InvalidMesh(format!(
                    "cell {index} has a repeated vertex: {cell:?}"
                )));
            }
            let corners = [vertices[cell[0]], vertices[cell[1]], vertices[cell[2]]];
            let integration_element =
                ElementGeometry::from_corners(corners, T::one()).integration_element;
            if integration_element <= T::zero() {
                return Err(Error::InvalidMesh(format!("cell {index} has zero area: {cell:?}")));
            }
        }
        let normal_signs = vec![T::one(); cells.len()];
        Ok(Self {
            vertices,
            cells,
            normal_signs,
        })
    }

    /// Replace the normal sign table
    pub fn with_normal_signs(mut self, normal_signs: Vec<T>) -> Result<Self> {
        if normal_signs.len() != self.cells.len() {
            return Err(Error::InvalidMesh(format!(
                "{} normal signs given for {} cells",
                normal_signs.len(),
                self.cells.len()
            )));
        }
        if normal_signs.iter().any(|s| *s != T::one() && *s != -T::one()) {
            return Err(Error::InvalidMesh(String::from("normal signs must be +1 or -1")));
        }
        self.normal_signs = normal_signs;
        Ok(self)
    }

    /// Create a new mesh by applying a map to every vertex
    ///
    /// The connectivity and normal signs are unchanged.
    pub fn map_vertices(&self, map: impl Fn(&[T; 3]) -> [T; 3]) -> Self {
        Self {
            vertices: self.vertices.iter().map(map).collect(),
            cells: self.cells.clone(),
            normal_signs: self.normal_signs.clone(),
        }
    }

    /// Number of vertices
    pub fn number_of_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of cells
    pub fn number_of_cells(&self) -> usize {
        self.cells.len()
    }

    /// The vertex set
    pub fn vertices(&self) -> &[[T; 3]] {
        &self.vertices
    }

    /// The connectivity table
    pub fn cells(&self) -> &[[usize; 3]] {
        &self.cells
    }

    /// The normal sign table
    pub fn normal_signs(&self) -> &[T] {
        &self.normal_signs
    }

    /// The vertex indices of a cell
    pub fn cell(&self, index: usize) -> &[usize; 3] {
        &self.cells[index]
    }

    /// The normal sign of a cell
    pub fn normal_sign(&self, index: usize) -> T {
        self.normal_signs[index]
    }

    /// The coordinates of the three corners of a cell
    pub fn cell_corners(&self, index: usize) -> [[T; 3]; 3] {
        let cell = &self.cells[index];
        [
            self.vertices[cell[0]],
            self.vertices[cell[1]],
            self.vertices[cell[2]],
        ]
    }
}
