//! Adjacency test for pairs of cells
//!
//! Pairs of cells that share a vertex have a singular or near-singular integrand and are
//! integrated elsewhere. The regular assembler skips them.

/// Check if two cells share at least one vertex
///
/// When the test and trial cells live on different meshes their vertex indices are unrelated,
/// so no pair of cells is adjacent.
pub fn elements_are_adjacent(
    test_vertices: &[usize; 3],
    trial_vertices: &[usize; 3],
    grids_disjoint: bool,
) -> bool {
    if grids_disjoint {
        false
    } else {
        test_vertices.iter().any(|v| trial_vertices.contains(v))
    }
}
