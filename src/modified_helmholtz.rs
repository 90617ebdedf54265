//! Modified Helmholtz operators

/// Assemblers for modified Helmholtz problems.
pub mod assembler {
    use crate::assembly::{assemble_regular_into, DenseMatrix, RegularAssemblerOptions};
    use crate::function::FunctionSpace;
    use crate::kernel::ModifiedHelmholtz3dKernel;
    use crate::types::{RealScalar, Result};

    /// Assemble the curl-curl term of the modified Helmholtz hypersingular operator for all non-adjacent cell pairs.
    ///
    /// The term involving the product of the normals is not included.
    pub fn hypersingular_curl_curl_regular<T: RealScalar>(
        omega: T,
        test_space: &FunctionSpace<'_, T>,
        trial_space: &FunctionSpace<'_, T>,
        options: &RegularAssemblerOptions,
    ) -> Result<DenseMatrix<T>> {
        let mut output =
            DenseMatrix::new_zeros([test_space.global_size(), trial_space.global_size()]);
        assemble_regular_into(
            &mut output,
            &ModifiedHelmholtz3dKernel::new(omega),
            test_space,
            trial_space,
            options,
        )?;
        Ok(output)
    }
}
