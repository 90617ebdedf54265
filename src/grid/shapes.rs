//! Meshes of simple shapes

use crate::grid::mesh::TriangleMesh;
use crate::types::RealScalar;
use num::cast;
use std::collections::{hash_map::Entry::Vacant, HashMap};

/// Create a regular sphere
///
/// A regular sphere is created by starting with a regular octahedron. The shape is then refined `refinement_level` times.
/// Each time the mesh is refined, each triangle is split into four triangles (by adding lines connecting the midpoints of
/// each edge). The new points are then scaled so that they are a distance of 1 from the origin. All normals point outwards.
pub fn regular_sphere<T: RealScalar>(refinement_level: u32) -> TriangleMesh<T> {
    let zero = T::zero();
    let one = T::one();
    let half = cast::<f64, T>(0.5).unwrap();
    let mut points = Vec::with_capacity(2 + usize::pow(4, refinement_level + 1));
    points.push([zero, zero, one]);
    points.push([one, zero, zero]);
    points.push([zero, one, zero]);
    points.push([-one, zero, zero]);
    points.push([zero, -one, zero]);
    points.push([zero, zero, -one]);

    let mut cells = vec![
        [0, 1, 2],
        [0, 2, 3],
        [0, 3, 4],
        [0, 4, 1],
        [5, 2, 1],
        [5, 3, 2],
        [5, 4, 3],
        [5, 1, 4],
    ];

    for level in 0..refinement_level {
        let mut edge_points = HashMap::new();
        let mut new_cells = Vec::with_capacity(8 * usize::pow(4, level + 1));
        for c in &cells {
            let edges = [[1, 2], [0, 2], [0, 1]]
                .iter()
                .map(|[i, j]| {
                    let mut pt_i = c[*i];
                    let mut pt_j = c[*j];
                    if pt_i > pt_j {
                        std::mem::swap(&mut pt_i, &mut pt_j);
                    }
                    if let Vacant(e) = edge_points.entry((pt_i, pt_j)) {
                        let v_i: [T; 3] = points[pt_i];
                        let v_j: [T; 3] = points[pt_j];
                        let mut new_pt = [
                            half * (v_i[0] + v_j[0]),
                            half * (v_i[1] + v_j[1]),
                            half * (v_i[2] + v_j[2]),
                        ];
                        let size = new_pt.iter().map(|x| x.powi(2)).sum::<T>().sqrt();
                        for i in new_pt.iter_mut() {
                            *i = *i / size;
                        }
                        e.insert(points.len());
                        points.push(new_pt);
                    }
                    edge_points[&(pt_i, pt_j)]
                })
                .collect::<Vec<_>>();
            new_cells.push([c[0], edges[2], edges[1]]);
            new_cells.push([c[1], edges[0], edges[2]]);
            new_cells.push([c[2], edges[1], edges[0]]);
            new_cells.push([edges[0], edges[1], edges[2]]);
        }
        cells = new_cells;
    }

    TriangleMesh::new(points, cells).unwrap()
}

/// Create a mesh of the unit square screen in the plane z = 0
///
/// The square is split into `n * n` squares, each of which is split into two triangles. All
/// normals point in the positive z direction.
pub fn screen<T: RealScalar>(n: usize) -> TriangleMesh<T> {
    assert!(n > 0, "a screen must be split into at least one square");
    let h = T::one() / cast::<usize, T>(n).unwrap();
    let mut points = Vec::with_capacity((n + 1) * (n + 1));
    for j in 0..=n {
        for i in 0..=n {
            points.push([
                cast::<usize, T>(i).unwrap() * h,
                cast::<usize, T>(j).unwrap() * h,
                T::zero(),
            ]);
        }
    }
    let mut cells = Vec::with_capacity(2 * n * n);
    for j in 0..n {
        for i in 0..n {
            let v = j * (n + 1) + i;
            cells.push([v, v + 1, v + n + 2]);
            cells.push([v, v + n + 2, v + n + 1]);
        }
    }
    TriangleMesh::new(points, cells).unwrap()
}

/// Create a mesh of two unit right triangles
///
/// The first triangle has vertices (0, 0, 0), (1, 0, 0) and (0, 1, 0). The second triangle is the
/// first one translated by `offset`.
pub fn two_triangles<T: RealScalar>(offset: [T; 3]) -> TriangleMesh<T> {
    let zero = T::zero();
    let one = T::one();
    let first = [[zero, zero, zero], [one, zero, zero], [zero, one, zero]];
    let mut points = first.to_vec();
    for p in &first {
        points.push([p[0] + offset[0], p[1] + offset[1], p[2] + offset[2]]);
    }
    TriangleMesh::new(points, vec![[0, 1, 2], [3, 4, 5]]).unwrap()
}
