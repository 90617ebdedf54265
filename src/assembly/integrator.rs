//! Quadrature of the curl-curl integrand over a pair of cells
use crate::assembly::curl::linear_curls;
use crate::grid::geometry::dot;
use crate::grid::ElementGeometry;
use crate::kernel::Kernel;
use crate::quadrature::RegularQuadratureRule;
use crate::types::RealScalar;
use num::Zero;

/// A cell prepared for regular quadrature
#[derive(Debug, Clone)]
pub struct MappedCell<T: RealScalar> {
    /// Geometry of the cell
    pub geometry: ElementGeometry<T>,
    /// Quadrature points mapped to the physical cell
    pub points: Vec<[T; 3]>,
    /// Curls of the basis functions, scaled by the squared integration element
    pub curls: [[T; 3]; 3],
}

/// Integrator for pairs of cells that do not share a vertex
///
/// The same rule is used on the test and the trial cell. The integrator borrows the kernel and
/// the rule, so one integrator can be created per work item at no cost.
pub struct RegularIntegrator<'a, K: Kernel> {
    kernel: &'a K,
    rule: &'a RegularQuadratureRule<K::T>,
}

impl<'a, K: Kernel> RegularIntegrator<'a, K> {
    /// Create a new integrator
    pub fn new(kernel: &'a K, rule: &'a RegularQuadratureRule<K::T>) -> Self {
        Self { kernel, rule }
    }

    /// Size of the scratch buffer needed by [`RegularIntegrator::element_matrix`]
    pub fn scratch_size(&self) -> usize {
        self.rule.number_of_points() * self.rule.number_of_points()
    }

    /// Map the quadrature points to a cell and compute its curls
    pub fn map_cell(&self, geometry: ElementGeometry<K::T>) -> MappedCell<K::T> {
        let points = self
            .rule
            .points
            .iter()
            .map(|p| geometry.global_point(p))
            .collect();
        let curls = linear_curls(&geometry);
        MappedCell {
            geometry,
            points,
            curls,
        }
    }

    /// Weighted sum of kernel values over all pairs of quadrature points
    ///
    /// The weights are the reference weights; no integration elements are applied.
    pub fn kernel_sum(
        &self,
        test_cell: &MappedCell<K::T>,
        trial_cell: &MappedCell<K::T>,
        k: &mut [K::T],
    ) -> K::T {
        let npts = self.rule.number_of_points();
        let k = &mut k[..npts * npts];
        self.kernel.assemble_st(
            &test_cell.points,
            &trial_cell.points,
            &test_cell.geometry.unit_normal(),
            &trial_cell.geometry.unit_normal(),
            k,
        );
        let mut sum = K::T::zero();
        for (test_weight, row) in self.rule.weights.iter().zip(k.chunks_exact(npts)) {
            let mut inner = K::T::zero();
            for (trial_weight, value) in self.rule.weights.iter().zip(row) {
                inner += *trial_weight * *value;
            }
            sum += *test_weight * inner;
        }
        sum
    }

    /// Compute the 3x3 element matrix of a pair of cells
    ///
    /// Entry `[i][j]` couples local test function `i` with local trial function `j`. The
    /// integration elements of both cells enter as `int_t^2 int_s^2` through the scaled curls,
    /// and the result is divided once by `int_t int_s`.
    pub fn element_matrix(
        &self,
        test_cell: &MappedCell<K::T>,
        trial_cell: &MappedCell<K::T>,
        k: &mut [K::T],
    ) -> [[K::T; 3]; 3] {
        let factor = self.kernel_sum(test_cell, trial_cell, k)
            / (test_cell.geometry.integration_element * trial_cell.geometry.integration_element);
        let mut result = [[K::T::zero(); 3]; 3];
        for (row, test_curl) in result.iter_mut().zip(test_cell.curls.iter()) {
            for (entry, trial_curl) in row.iter_mut().zip(trial_cell.curls.iter()) {
                *entry = factor * dot(test_curl, trial_curl);
            }
        }
        result
    }
}
