//! Assembly of boundary operators
//!
//! The regular assembler computes, for every pair of a test cell and a trial cell that do not
//! share a vertex, the 3x3 curl-curl element matrix
//! `A_ij = int_t int_s K(x, y) (curl phi_i(x) . curl psi_j(y)) dy dx`
//! and adds it into a dense row-major matrix indexed by global DOFs.
pub mod adjacency;
pub mod batched;
pub(crate) mod common;
pub mod curl;
pub mod integrator;
pub mod options;
pub mod output;
pub mod validation;

pub use batched::{assemble_regular_into, BATCH_WIDTH};
pub use options::{RegularAssemblerOptions, ScatterMode};
pub use output::DenseMatrix;
