//! Implementation of the Laplace kernel
use crate::kernel::{distance, Kernel, KernelType};
use crate::types::RealScalar;
use num::cast;
use std::marker::PhantomData;

/// The Laplace single layer kernel 1 / (4 pi |x - y|)
///
/// The kernel is set to zero for coincident points.
#[derive(Debug, Clone, Copy, Default)]
pub struct Laplace3dKernel<T: RealScalar> {
    _phantom_t: PhantomData<T>,
}

impl<T: RealScalar> Laplace3dKernel<T> {
    /// Create a new Laplace kernel
    pub fn new() -> Self {
        Self {
            _phantom_t: PhantomData,
        }
    }
}

impl<T: RealScalar> Kernel for Laplace3dKernel<T> {
    type T = T;

    fn kernel_type(&self) -> KernelType<T> {
        KernelType::Laplace
    }

    fn evaluate(
        &self,
        test_point: &[T; 3],
        trial_point: &[T; 3],
        _test_normal: &[T; 3],
        _trial_normal: &[T; 3],
    ) -> T {
        let diff_norm = distance(test_point, trial_point);
        if diff_norm == T::zero() {
            T::zero()
        } else {
            T::FRAC_1_PI() / (cast::<f64, T>(4.0).unwrap() * diff_norm)
        }
    }
}
