//! Interface to quadrature rules used by the regular assembler

use crate::quadrature::simplex_rules::triangle_rule;
use crate::quadrature::types::QuadratureError;
use crate::types::RealScalar;
use num::cast;

/// Stores a regular quadrature rule.
///
/// The rule is shared read-only by all work items of an assembly.
#[derive(Debug, Clone)]
pub struct RegularQuadratureRule<T: RealScalar> {
    /// Quadrature points on the reference triangle.
    pub points: Vec<[T; 2]>,
    /// Quadrature weights.
    pub weights: Vec<T>,
}

impl<T: RealScalar> RegularQuadratureRule<T> {
    /// Create a rule with a given number of points.
    pub fn new(npoints: usize) -> Result<Self, QuadratureError> {
        let rule = triangle_rule(npoints)?;
        let points = rule
            .points
            .chunks_exact(2)
            .map(|p| [cast::<f64, T>(p[0]).unwrap(), cast::<f64, T>(p[1]).unwrap()])
            .collect();
        let weights = rule
            .weights
            .iter()
            .map(|w| cast::<f64, T>(*w).unwrap())
            .collect();
        Ok(Self { points, weights })
    }

    /// Return the number of quadrature points.
    pub fn number_of_points(&self) -> usize {
        self.weights.len()
    }
}
