//! Output matrices
use crate::types::{Error, RealScalar, Result};
use nalgebra::DMatrix;

/// A destination that element contributions are added into
///
/// Implementations must tolerate concurrent calls to [`ScatterTarget::add`] from the tasks that
/// they are shared with.
pub trait ScatterTarget<T: RealScalar>: Sync {
    /// Shape of the target as (rows, columns)
    fn shape(&self) -> [usize; 2];

    /// Add a value to the entry at (`row`, `col`)
    fn add(&self, row: usize, col: usize, value: T);
}

/// A dense row-major matrix
///
/// Rows are indexed by test DOFs and columns by trial DOFs. Entry (i, j) is stored at position
/// `i * ncols + j`. The values are held in a column-major [`DMatrix`] of the transposed shape,
/// whose buffer is exactly this row-major layout.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<T: RealScalar> {
    values: DMatrix<T>,
}

impl<T: RealScalar> DenseMatrix<T> {
    /// Create a matrix filled with zeros
    pub fn new_zeros(shape: [usize; 2]) -> Self {
        Self {
            values: DMatrix::zeros(shape[1], shape[0]),
        }
    }

    /// Create a matrix from row-major data
    pub fn from_data(shape: [usize; 2], data: Vec<T>) -> Result<Self> {
        if data.len() != shape[0] * shape[1] {
            return Err(Error::InvalidInput(format!(
                "{} values given for a {}x{} matrix",
                data.len(),
                shape[0],
                shape[1]
            )));
        }
        Ok(Self {
            values: DMatrix::from_vec(shape[1], shape[0], data),
        })
    }

    /// Create a matrix from a [`DMatrix`] with rows indexed by test DOFs
    pub fn from_matrix(matrix: &DMatrix<T>) -> Self {
        Self {
            values: matrix.transpose(),
        }
    }

    /// Copy the values into a [`DMatrix`] with rows indexed by test DOFs
    pub fn to_matrix(&self) -> DMatrix<T> {
        self.values.transpose()
    }

    /// Shape of the matrix as (rows, columns)
    pub fn shape(&self) -> [usize; 2] {
        [self.values.ncols(), self.values.nrows()]
    }

    /// Get an entry
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.values.get((col, row))
    }

    /// Get a mutable reference to an entry
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        self.values.get_mut((col, row))
    }

    /// The row-major data
    pub fn data(&self) -> &[T] {
        self.values.as_slice()
    }

    /// The row-major data
    pub fn data_mut(&mut self) -> &mut [T] {
        self.values.as_mut_slice()
    }

    /// Compute the transpose
    pub fn transpose(&self) -> Self {
        Self {
            values: self.values.transpose(),
        }
    }

    /// The largest absolute value of an entry
    pub fn max_abs(&self) -> T {
        self.data().iter().fold(T::zero(), |m, v| m.max(v.abs()))
    }
}

/// A dense row-major matrix with atomic entries
///
/// Used as the scatter target when work items are run concurrently without a colouring.
pub struct AtomicDenseMatrix<T: RealScalar> {
    data: Vec<T::Atomic>,
    shape: [usize; 2],
}

impl<T: RealScalar> AtomicDenseMatrix<T> {
    /// Create an atomic copy of a matrix
    pub fn from_dense(matrix: &DenseMatrix<T>) -> Self {
        Self {
            data: matrix.data().iter().map(|v| T::new_atomic(*v)).collect(),
            shape: matrix.shape(),
        }
    }

    /// Copy the values back into a matrix of the same shape
    pub fn write_into(&self, matrix: &mut DenseMatrix<T>) {
        assert_eq!(matrix.shape(), self.shape);
        for (value, cell) in matrix.data_mut().iter_mut().zip(self.data.iter()) {
            *value = T::atomic_load(cell);
        }
    }
}

impl<T: RealScalar> ScatterTarget<T> for AtomicDenseMatrix<T> {
    fn shape(&self) -> [usize; 2] {
        self.shape
    }

    fn add(&self, row: usize, col: usize, value: T) {
        T::atomic_add(&self.data[row * self.shape[1] + col], value);
    }
}
