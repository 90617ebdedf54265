//! Regular-pair assembly of the Laplace hypersingular boundary operator
//!
//! The hypersingular operator is assembled through its curl-curl weak form: the tangential
//! curls of the basis functions are contracted against a single layer type kernel. This crate
//! assembles the contributions of all pairs of cells that do not share a vertex; pairs of
//! adjacent cells are left to a singular quadrature kernel.
#![cfg_attr(feature = "strict", deny(warnings))]
#![warn(missing_docs)]

#[macro_use]
extern crate lazy_static;

pub mod assembly;
pub mod function;
pub mod grid;
pub mod kernel;
pub mod laplace;
pub mod modified_helmholtz;
pub mod quadrature;
pub mod types;

pub use types::{Error, RealScalar, Result};
