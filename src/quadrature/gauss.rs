//! Collapsed Gauss rules of arbitrary order
use crate::quadrature::types::{NumericalQuadratureDefinition, QuadratureError};

/// Evaluate the Legendre polynomial of degree `m` and its derivative at `x`.
fn legendre(m: usize, x: f64) -> (f64, f64) {
    let mut p0 = 1.0;
    let mut p1 = x;
    for k in 2..=m {
        let k = k as f64;
        (p0, p1) = (p1, ((2.0 * k - 1.0) * x * p1 - (k - 1.0) * p0) / k);
    }
    let dp = m as f64 * (x * p1 - p0) / (x * x - 1.0);
    (p1, dp)
}

/// Gauss-Legendre points and weights on the interval [0, 1].
pub fn gauss_legendre(m: usize) -> Result<(Vec<f64>, Vec<f64>), QuadratureError> {
    if m == 0 {
        return Err(QuadratureError::RuleNotFound(0));
    }
    let mut points = Vec::with_capacity(m);
    let mut weights = Vec::with_capacity(m);
    for i in 1..=m {
        let mut x = (std::f64::consts::PI * (i as f64 - 0.25) / (m as f64 + 0.5)).cos();
        for _ in 0..100 {
            let (p, dp) = legendre(m, x);
            let dx = p / dp;
            x -= dx;
            if dx.abs() < 1e-16 {
                break;
            }
        }
        let (_, dp) = legendre(m, x);
        points.push(0.5 * (1.0 - x));
        weights.push(1.0 / ((1.0 - x * x) * dp * dp));
    }
    Ok((points, weights))
}

/// Create an `m * m` point rule on the reference triangle.
///
/// A tensor Gauss-Legendre rule on the unit square is collapsed onto the triangle with the
/// Duffy map (u, v) -> (u, v (1 - u)). The rule integrates polynomials of total degree up to
/// `2m - 2` exactly.
pub fn collapsed_gauss_rule(m: usize) -> Result<NumericalQuadratureDefinition, QuadratureError> {
    let (gauss_points, gauss_weights) = gauss_legendre(m)?;
    let npoints = m * m;
    let mut points = Vec::with_capacity(2 * npoints);
    let mut weights = Vec::with_capacity(npoints);
    for (u, wu) in gauss_points.iter().zip(&gauss_weights) {
        for (v, wv) in gauss_points.iter().zip(&gauss_weights) {
            points.push(*u);
            points.push(*v * (1.0 - *u));
            weights.push(*wu * *wv * (1.0 - *u));
        }
    }
    Ok(NumericalQuadratureDefinition {
        dim: 2,
        order: 2 * m - 2,
        npoints,
        weights,
        points,
    })
}
