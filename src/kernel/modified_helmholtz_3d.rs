//! Implementation of the modified Helmholtz kernel
use crate::kernel::{distance, Kernel, KernelType};
use crate::types::RealScalar;
use num::cast;

/// The modified Helmholtz (Yukawa) kernel exp(-omega |x - y|) / (4 pi |x - y|)
///
/// Used with the regular assembler this gives the curl-curl term of the modified Helmholtz
/// hypersingular operator. The kernel is set to zero for coincident points.
#[derive(Debug, Clone, Copy)]
pub struct ModifiedHelmholtz3dKernel<T: RealScalar> {
    omega: T,
}

impl<T: RealScalar> ModifiedHelmholtz3dKernel<T> {
    /// Create a new modified Helmholtz kernel
    pub fn new(omega: T) -> Self {
        Self { omega }
    }

    /// The decay parameter of the kernel
    pub fn omega(&self) -> T {
        self.omega
    }
}

impl<T: RealScalar> Kernel for ModifiedHelmholtz3dKernel<T> {
    type T = T;

    fn kernel_type(&self) -> KernelType<T> {
        KernelType::ModifiedHelmholtz(self.omega)
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
            (-self.omega * diff_norm).exp() * T::FRAC_1_PI()
                / (cast::<f64, T>(4.0).unwrap() * diff_norm)
        }
    }
}
