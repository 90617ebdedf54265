//! Quadrature rules on the reference triangle
pub mod gauss;
pub mod regular;
mod simplex_rule_definitions;
pub mod simplex_rules;
pub mod types;

pub use gauss::collapsed_gauss_rule;
pub use regular::RegularQuadratureRule;
pub use simplex_rules::{available_rules, simplex_rule, triangle_rule};
