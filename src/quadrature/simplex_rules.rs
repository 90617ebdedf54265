//! Get rules on the reference triangle.

use crate::quadrature::gauss::collapsed_gauss_rule;
use crate::quadrature::simplex_rule_definitions::SIMPLEX_RULE_DEFINITIONS;
use crate::quadrature::types::{NumericalQuadratureDefinition, QuadratureError};

/// Return a tabulated symmetric rule with a given number of points.
///
/// If the rule does not exist `Err(QuadratureError::RuleNotFound)` is returned.
pub fn simplex_rule(npoints: usize) -> Result<NumericalQuadratureDefinition, QuadratureError> {
    if let Some((order, points, weights)) = SIMPLEX_RULE_DEFINITIONS.get(&npoints) {
        Ok(NumericalQuadratureDefinition {
            dim: 2,
            order: *order,
            npoints,
            weights: weights.to_vec(),
            points: points.to_vec(),
        })
    } else {
        Err(QuadratureError::RuleNotFound(npoints))
    }
}

/// Return the numbers of points for which tabulated symmetric rules are available.
pub fn available_rules() -> Vec<usize> {
    let mut rules = SIMPLEX_RULE_DEFINITIONS
        .keys()
        .copied()
        .collect::<Vec<_>>();
    rules.sort_unstable();
    rules
}

/// Return a triangle rule with a given number of points.
///
/// Tabulated symmetric rules are preferred. Otherwise, if `npoints` is a perfect square `m * m`,
/// a collapsed Gauss rule is returned.
pub fn triangle_rule(npoints: usize) -> Result<NumericalQuadratureDefinition, QuadratureError> {
    if let Ok(rule) = simplex_rule(npoints) {
        return Ok(rule);
    }
    let m = (npoints as f64).sqrt().round() as usize;
    if m > 0 && m * m == npoints {
        collapsed_gauss_rule(m)
    } else {
        Err(QuadratureError::RuleNotFound(npoints))
    }
}
