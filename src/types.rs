//! Types specific to bempp-hypersingular

use crate::quadrature::types::QuadratureError;
use num::traits::FloatConst;
use std::fmt::Debug;
use std::iter::Sum;
use std::ops::{AddAssign, MulAssign};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

/// Real scalar type used for coordinates and matrix entries
///
/// Besides the usual float operations, a real scalar must provide an atomic storage type that
/// supports lock-free addition, as the output matrix is accumulated concurrently.
pub trait RealScalar:
    num::Float + FloatConst + AddAssign + MulAssign + Sum + Default + Debug + Send + Sync + 'static
{
    /// Atomic storage for a value of this type
    type Atomic: Send + Sync;

    /// Create atomic storage holding `value`
    fn new_atomic(value: Self) -> Self::Atomic;

    /// Add `value` to the atomic storage
    fn atomic_add(cell: &Self::Atomic, value: Self);

    /// Read the value held by the atomic storage
    fn atomic_load(cell: &Self::Atomic) -> Self;
}

impl RealScalar for f64 {
    type Atomic = AtomicU64;

    fn new_atomic(value: Self) -> Self::Atomic {
        AtomicU64::new(value.to_bits())
    }

    fn atomic_add(cell: &Self::Atomic, value: Self) {
        // The closure never returns `None`, so the update cannot fail.
        let _ = cell.fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
            Some((f64::from_bits(bits) + value).to_bits())
        });
    }

    fn atomic_load(cell: &Self::Atomic) -> Self {
        f64::from_bits(cell.load(Ordering::Acquire))
    }
}

impl RealScalar for f32 {
    type Atomic = AtomicU32;

    fn new_atomic(value: Self) -> Self::Atomic {
        AtomicU32::new(value.to_bits())
    }

    fn atomic_add(cell: &Self::Atomic, value: Self) {
        let _ = cell.fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
            Some((f32::from_bits(bits) + value).to_bits())
        });
    }

    fn atomic_load(cell: &Self::Atomic) -> Self {
        f32::from_bits(cell.load(Ordering::Acquire))
    }
}

/// Error type
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A mesh could not be created from the given data
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),
    /// A function space could not be created from the given data
    #[error("Invalid function space: {0}")]
    InvalidSpace(String),
    /// The requested space type cannot be used with this assembler
    #[error("Unsupported space: {0}")]
    UnsupportedSpace(String),
    /// A quadrature rule could not be created
    #[error("Quadrature error: {0}")]
    Quadrature(#[from] QuadratureError),
    /// The inputs of an assembly call do not satisfy its preconditions
    #[error("Invalid assembly input: {0}")]
    InvalidInput(String),
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
