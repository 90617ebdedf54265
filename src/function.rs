//! Function spaces

use crate::grid::mesh::TriangleMesh;
use crate::types::{Error, RealScalar, Result};

/// The type of a function space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpaceType {
    /// Continuous piecewise linear functions, one DOF per vertex
    P1,
    /// Discontinuous piecewise linear functions, three DOFs per cell
    DP1,
    /// Piecewise constant functions, one DOF per cell
    DP0,
}

impl SpaceType {
    /// The number of local shape functions on each cell
    pub fn shape_count(&self) -> usize {
        match self {
            SpaceType::P1 | SpaceType::DP1 => 3,
            SpaceType::DP0 => 1,
        }
    }

    /// Whether the basis functions have a tangential curl
    pub fn has_curl(&self) -> bool {
        match self {
            SpaceType::P1 | SpaceType::DP1 => true,
            SpaceType::DP0 => false,
        }
    }
}

/// Global DOF indices and multipliers of the local shape functions of one cell
#[derive(Debug, Clone, Copy)]
pub struct CellDofs<'a, T: RealScalar> {
    /// Global DOF index of each local shape function
    pub indices: &'a [usize],
    /// Multiplier of each local shape function
    pub multipliers: &'a [T],
}

impl<'a, T: RealScalar> CellDofs<'a, T> {
    /// Read the DOFs of a cell from tables storing `shape_count` entries per cell
    pub fn from_tables(
        local2global: &'a [usize],
        multipliers: &'a [T],
        shape_count: usize,
        cell: usize,
    ) -> Self {
        let range = shape_count * cell..shape_count * (cell + 1);
        Self {
            indices: &local2global[range.clone()],
            multipliers: &multipliers[range],
        }
    }
}

/// A function space on a triangle mesh
#[derive(Debug, Clone)]
pub struct FunctionSpace<'a, T: RealScalar> {
    mesh: &'a TriangleMesh<T>,
    space_type: SpaceType,
    local2global: Vec<usize>,
    multipliers: Vec<T>,
    global_size: usize,
}

impl<'a, T: RealScalar> FunctionSpace<'a, T> {
    /// Create a function space, assigning DOFs in the order in which they are first found
    pub fn new(mesh: &'a TriangleMesh<T>, space_type: SpaceType) -> Self {
        let ncells = mesh.number_of_cells();
        let (local2global, global_size) = match space_type {
            SpaceType::P1 => {
                let mut vertex_dofs = vec![None; mesh.number_of_vertices()];
                let mut local2global = Vec::with_capacity(3 * ncells);
                let mut size = 0;
                for cell in mesh.cells() {
                    for v in cell {
                        let dof = *vertex_dofs[*v].get_or_insert_with(|| {
                            size += 1;
                            size - 1
                        });
                        local2global.push(dof);
                    }
                }
                (local2global, size)
            }
            SpaceType::DP1 => ((0..3 * ncells).collect(), 3 * ncells),
            SpaceType::DP0 => ((0..ncells).collect(), ncells),
        };
        let multipliers = vec![T::one(); local2global.len()];
        Self {
            mesh,
            space_type,
            local2global,
            multipliers,
            global_size,
        }
    }

    /// Create a function space from caller-provided DOF maps
    ///
    /// `local2global` and `multipliers` store `space_type.shape_count()` entries per cell, cell
    /// after cell.
    pub fn from_raw(
        mesh: &'a TriangleMesh<T>,
        space_type: SpaceType,
        local2global: Vec<usize>,
        multipliers: Vec<T>,
        global_size: usize,
    ) -> Result<Self> {
        let expected = space_type.shape_count() * mesh.number_of_cells();
        if local2global.len() != expected {
            return Err(Error::InvalidSpace(format!(
                "local to global map has length {}, expected {expected}",
                local2global.len()
            )));
        }
        if multipliers.len() != expected {
            return Err(Error::InvalidSpace(format!(
                "multiplier table has length {}, expected {expected}",
                multipliers.len()
            )));
        }
        if let Some(dof) = local2global.iter().find(|dof| **dof >= global_size) {
            return Err(Error::InvalidSpace(format!(
                "DOF {dof} is out of range for a space of size {global_size}"
            )));
        }
        if multipliers.iter().any(|m| !m.is_finite()) {
            return Err(Error::InvalidSpace(String::from("multipliers must be finite")));
        }
        Ok(Self {
            mesh,
            space_type,
            local2global,
            multipliers,
            global_size,
        })
    }

    /// The mesh that the space is defined on
    pub fn mesh(&self) -> &'a TriangleMesh<T> {
        self.mesh
    }

    /// The type of the space
    pub fn space_type(&self) -> SpaceType {
        self.space_type
    }

    /// Number of local shape functions on each cell
    pub fn shape_count(&self) -> usize {
        self.space_type.shape_count()
    }

    /// Number of DOFs
    pub fn global_size(&self) -> usize {
        self.global_size
    }

    /// Global DOF indices and multipliers associated with a cell
    pub fn cell_dofs(&self, cell: usize) -> CellDofs<'_, T> {
        CellDofs::from_tables(
            &self.local2global,
            &self.multipliers,
            self.shape_count(),
            cell,
        )
    }

    /// The local to global map, `shape_count()` entries per cell
    pub fn local2global(&self) -> &[usize] {
        &self.local2global
    }

    /// The multiplier table, `shape_count()` entries per cell
    pub fn multipliers(&self) -> &[T] {
        &self.multipliers
    }

}

/// Greedily colour cells so that no two cells with the same colour share a DOF
///
/// `local2global` stores `shape_count` DOFs per cell. A cell that appears twice in `cells` is
/// given two different colours.
pub fn colour_cells(
    local2global: &[usize],
    shape_count: usize,
    global_size: usize,
    cells: &[usize],
) -> Vec<Vec<usize>> {
    let mut colouring: Vec<Vec<usize>> = vec![];
    let mut dof_colours = vec![vec![]; global_size];

    for cell in cells {
        let dofs = &local2global[shape_count * cell..shape_count * (cell + 1)];
        let c = {
            let mut c = 0;
            while c < colouring.len() {
                if !dofs.iter().any(|d| dof_colours[*d].contains(&c)) {
                    break;
                }
                c += 1;
            }
            c
        };
        if c == colouring.len() {
            colouring.push(vec![*cell]);
        } else {
            colouring[c].push(*cell);
        }
        for d in dofs {
            dof_colours[*d].push(c);
        }
    }
    colouring
}
