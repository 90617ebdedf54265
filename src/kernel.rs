//! Green's function kernels
//!
//! The kernel is the only place where the physics of the operator enters the regular assembler.
//! Replacing the kernel retargets the curl-curl assembly to the corresponding term of another
//! operator.
pub mod laplace_3d;
pub mod modified_helmholtz_3d;

pub use laplace_3d::Laplace3dKernel;
pub use modified_helmholtz_3d::ModifiedHelmholtz3dKernel;

use crate::types::RealScalar;

/// This enum defines the type of the kernel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KernelType<T: RealScalar> {
    /// The Laplace kernel defined as g(x, y) = 1 / (4 pi | x - y| )
    Laplace,
    /// The modified Helmholtz kernel defined as g(x, y) = exp( -omega * | x - y| ) / (4 * pi * | x - y |)
    ModifiedHelmholtz(T),
}

/// A scalar kernel evaluated at pairs of points
///
/// Implementations must be pure: the value may only depend on the two points and the two normals.
pub trait Kernel: Sync {
    /// Scalar type
    type T: RealScalar;

    /// The type of the kernel
    fn kernel_type(&self) -> KernelType<Self::T>;

    /// Evaluate the kernel at a test point and a trial point with their (unit) normals
    fn evaluate(
        &self,
        test_point: &[Self::T; 3],
        trial_point: &[Self::T; 3],
        test_normal: &[Self::T; 3],
        trial_normal: &[Self::T; 3],
    ) -> Self::T;

    /// Evaluate the kernel for all test and trial point pairs
    ///
    /// The result is stored row-major: the value for test point `i` and trial point `j` is at
    /// position `i * trial_points.len() + j`.
    fn assemble_st(
        &self,
        test_points: &[[Self::T; 3]],
        trial_points: &[[Self::T; 3]],
        test_normal: &[Self::T; 3],
        trial_normal: &[Self::T; 3],
        result: &mut [Self::T],
    ) {
        assert_eq!(
            result.len(),
            test_points.len() * trial_points.len(),
            "Wrong dimension for `result`. {} != {} ",
            result.len(),
            test_points.len() * trial_points.len(),
        );
        for (test_point, row) in test_points
            .iter()
            .zip(result.chunks_exact_mut(trial_points.len()))
        {
            for (trial_point, value) in trial_points.iter().zip(row.iter_mut()) {
                *value = self.evaluate(test_point, trial_point, test_normal, trial_normal);
            }
        }
    }
}

/// The distance between two points
pub(crate) fn distance<T: RealScalar>(x: &[T; 3], y: &[T; 3]) -> T {
    ((x[0] - y[0]).powi(2) + (x[1] - y[1]).powi(2) + (x[2] - y[2]).powi(2)).sqrt()
}
