//! Common utility functions
use crate::assembly::output::ScatterTarget;
use crate::grid::TriangleMesh;
use crate::types::RealScalar;
use std::marker::PhantomData;

/// Check if two meshes are the same object
pub(crate) fn equal_grids<T: RealScalar>(
    test_grid: &TriangleMesh<T>,
    trial_grid: &TriangleMesh<T>,
) -> bool {
    std::ptr::eq(test_grid, trial_grid)
}

/// Raw 2D data
///
/// Writes through this type are not synchronised. It must only be shared between tasks that
/// write to disjoint sets of entries.
pub(crate) struct RawData2D<'a, T: RealScalar> {
    /// Array containing data
    data: *mut T,
    /// Shape of data
    shape: [usize; 2],
    _marker: PhantomData<&'a mut [T]>,
}

impl<'a, T: RealScalar> RawData2D<'a, T> {
    /// Wrap a row-major buffer of the given shape
    pub(crate) fn new(data: &'a mut [T], shape: [usize; 2]) -> Self {
        debug_assert_eq!(data.len(), shape[0] * shape[1]);
        Self {
            data: data.as_mut_ptr(),
            shape,
            _marker: PhantomData,
        }
    }
}

unsafe impl<T: RealScalar> Sync for RawData2D<'_, T> {}

impl<T: RealScalar> ScatterTarget<T> for RawData2D<'_, T> {
    fn shape(&self) -> [usize; 2] {
        self.shape
    }

    fn add(&self, row: usize, col: usize, value: T) {
        assert!(row < self.shape[0] && col < self.shape[1]);
        // SAFETY: the index is in bounds, and the coloured dispatch guarantees that no two
        // concurrent tasks touch the same row and column.
        unsafe {
            *self.data.add(row * self.shape[1] + col) += value;
        }
    }
}
