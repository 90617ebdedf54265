//! Laplace operators

/// Assemblers for Laplace problems.
pub mod assembler {
    use crate::assembly::{assemble_regular_into, DenseMatrix, RegularAssemblerOptions};
    use crate::function::FunctionSpace;
    use crate::kernel::Laplace3dKernel;
    use crate::types::{RealScalar, Result};

    /// Assemble the contributions of all non-adjacent cell pairs to the Laplace hypersingular operator.
    ///
    /// Rows of the result are indexed by the DOFs of `test_space` and columns by the DOFs of
    /// `trial_space`. Entries coupling cells that share a vertex are left at zero.
    pub fn hypersingular_regular<T: RealScalar>(
        test_space: &FunctionSpace<'_, T>,
        trial_space: &FunctionSpace<'_, T>,
        options: &RegularAssemblerOptions,
    ) -> Result<DenseMatrix<T>> {
        let mut output =
            DenseMatrix::new_zeros([test_space.global_size(), trial_space.global_size()]);
        assemble_regular_into(
            &mut output,
            &Laplace3dKernel::<T>::new(),
            test_space,
            trial_space,
            options,
        )?;
        Ok(output)
    }
}
