//! Surface curls of linear basis functions
//!
//! For a flat cell with Jacobian `J` and metric `G = J^T J`, the surface gradient of a basis
//! function is `J G^{-1} grad_ref phi` and its surface curl is `n x (J G^{-1} grad_ref phi)`.
//! The functions in this module use the adjugate `adj(G) = det(G) G^{-1}` instead of the
//! inverse. As `det(G)` is the square of the integration element, the curls computed here are
//! the true curls scaled by the squared integration element. The integrator removes this
//! factor with a single division per cell pair.
use crate::grid::geometry::{cross, dot};
use crate::grid::ElementGeometry;
use crate::types::RealScalar;

/// Gradients of the three linear basis functions on the reference triangle
///
/// The basis functions are `1 - s - t`, `s` and `t`.
pub const REFERENCE_GRADIENTS: [[f64; 2]; 3] = [[-1.0, -1.0], [1.0, 0.0], [0.0, 1.0]];

/// The adjugate of the metric tensor `J^T J`
pub fn metric_adjugate<T: RealScalar>(jacobian: &[[T; 3]; 2]) -> [[T; 2]; 2] {
    let g00 = dot(&jacobian[0], &jacobian[0]);
    let g01 = dot(&jacobian[0], &jacobian[1]);
    let g11 = dot(&jacobian[1], &jacobian[1]);
    [[g11, -g01], [-g01, g00]]
}

/// Surface gradients of the linear basis functions, scaled by the squared integration element
pub fn scaled_surface_gradients<T: RealScalar>(geometry: &ElementGeometry<T>) -> [[T; 3]; 3] {
    let adj = metric_adjugate(&geometry.jacobian);
    let mut gradients = [[T::zero(); 3]; 3];
    for (gradient, reference) in gradients.iter_mut().zip(REFERENCE_GRADIENTS.iter()) {
        let r0 = num::cast::<f64, T>(reference[0]).unwrap();
        let r1 = num::cast::<f64, T>(reference[1]).unwrap();
        let a = adj[0][0] * r0 + adj[0][1] * r1;
        let b = adj[1][0] * r0 + adj[1][1] * r1;
        for (i, g) in gradient.iter_mut().enumerate() {
            *g = a * geometry.jacobian[0][i] + b * geometry.jacobian[1][i];
        }
    }
    gradients
}

/// Surface curls of the linear basis functions, scaled by the squared integration element
///
/// The curls are taken with respect to the signed unit normal of the cell, so flipping the
/// normal sign flips the curls.
pub fn linear_curls<T: RealScalar>(geometry: &ElementGeometry<T>) -> [[T; 3]; 3] {
    let normal = geometry.unit_normal();
    let gradients = scaled_surface_gradients(geometry);
    [
        cross(&normal, &gradients[0]),
        cross(&normal, &gradients[1]),
        cross(&normal, &gradients[2]),
    ]
}
