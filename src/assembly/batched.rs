//! Batched assembly of regular cell pairs
//!
//! The work is a two-dimensional grid: one axis runs over the test cells of a block, the other
//! over batches of `BATCH_WIDTH` trial cells. Each work item evaluates one test cell against up
//! to `BATCH_WIDTH` trial cells held in lanes, and adds the resulting element matrices into the
//! output.
use crate::assembly::adjacency::elements_are_adjacent;
use crate::assembly::common::{equal_grids, RawData2D};
use crate::assembly::integrator::{MappedCell, RegularIntegrator};
use crate::assembly::options::{RegularAssemblerOptions, ScatterMode};
use crate::assembly::output::{AtomicDenseMatrix, DenseMatrix, ScatterTarget};
use crate::assembly::validation::validate;
use crate::function::{colour_cells, CellDofs, FunctionSpace};
use crate::grid::ElementGeometry;
use crate::kernel::Kernel;
use crate::quadrature::RegularQuadratureRule;
use crate::types::{Error, RealScalar, Result};
use itertools::izip;
use log::{debug, trace, warn};
use num::Zero;
use rayon::prelude::*;

/// Number of trial cells processed together by one work item
pub const BATCH_WIDTH: usize = 8;

/// A strided selection of cells
///
/// Element `k` of the block (for `0 <= k < len`) is the cell `indices[start + k * stride]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementBlock {
    indices: Vec<usize>,
    start: usize,
    len: usize,
    stride: usize,
}

impl ElementBlock {
    /// Create a block
    pub fn new(indices: Vec<usize>, start: usize, len: usize, stride: usize) -> Self {
        Self {
            indices,
            start,
            len,
            stride,
        }
    }

    /// A block containing every entry of `indices` in order
    pub fn contiguous(indices: Vec<usize>) -> Self {
        let len = indices.len();
        Self::new(indices, 0, len, 1)
    }

    /// A block containing all cells of a mesh with `ncells` cells
    pub fn all_cells(ncells: usize) -> Self {
        Self::contiguous((0..ncells).collect())
    }

    /// The element index array
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Position in `indices` of the first element
    pub fn start(&self) -> usize {
        self.start
    }

    /// Distance in `indices` between consecutive elements
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of elements in the block
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the block has no elements
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The cell of element `k` of the block
    pub fn cell(&self, k: usize) -> usize {
        self.indices[self.start + k * self.stride]
    }

    /// All cells of the block, in block order
    pub fn cells(&self) -> Vec<usize> {
        (0..self.len).map(|k| self.cell(k)).collect()
    }

    /// Number of batches of `BATCH_WIDTH` elements needed to cover the block
    pub fn number_of_batches(&self) -> usize {
        self.len.div_ceil(BATCH_WIDTH)
    }

    /// Position in `indices` of the last element, or `None` if it cannot be represented
    pub(crate) fn last_position(&self) -> Option<usize> {
        match self.len {
            0 => Some(self.start),
            n => (n - 1)
                .checked_mul(self.stride)
                .and_then(|offset| offset.checked_add(self.start)),
        }
    }
}

/// The arrays describing one side (test or trial) of an assembly
#[derive(Debug, Clone, Copy)]
pub struct SpaceData<'a, T: RealScalar> {
    /// Vertex coordinates
    pub vertices: &'a [[T; 3]],
    /// Vertex triple of each cell
    pub cells: &'a [[usize; 3]],
    /// Normal sign of each cell
    pub normal_signs: &'a [T],
    /// Global DOF of each local shape function, `shape_count` entries per cell
    pub local2global: &'a [usize],
    /// Multiplier of each local shape function, `shape_count` entries per cell
    pub multipliers: &'a [T],
    /// Number of shape functions per cell
    pub shape_count: usize,
    /// Number of global DOFs
    pub global_size: usize,
    /// The cells to assemble
    pub block: &'a ElementBlock,
}

impl<'a, T: RealScalar> SpaceData<'a, T> {
    /// Collect the arrays of a function space
    pub fn new(space: &'a FunctionSpace<'_, T>, block: &'a ElementBlock) -> Self {
        let mesh = space.mesh();
        Self {
            vertices: mesh.vertices(),
            cells: mesh.cells(),
            normal_signs: mesh.normal_signs(),
            local2global: space.local2global(),
            multipliers: space.multipliers(),
            shape_count: space.shape_count(),
            global_size: space.global_size(),
            block,
        }
    }

    pub(crate) fn geometry(&self, cell: usize) -> ElementGeometry<T> {
        let vertices = &self.cells[cell];
        ElementGeometry::from_corners(
            [
                self.vertices[vertices[0]],
                self.vertices[vertices[1]],
                self.vertices[vertices[2]],
            ],
            self.normal_signs[cell],
        )
    }

    fn dofs(&self, cell: usize) -> CellDofs<'a, T> {
        CellDofs::from_tables(self.local2global, self.multipliers, self.shape_count, cell)
    }

    fn colouring(&self) -> Vec<Vec<usize>> {
        colour_cells(
            self.local2global,
            self.shape_count,
            self.global_size,
            &self.block.cells(),
        )
    }
}

/// All inputs of a regular assembly
#[derive(Debug, Clone, Copy)]
pub struct RegularKernelInput<'a, T: RealScalar> {
    /// Test side
    pub test: SpaceData<'a, T>,
    /// Trial side
    pub trial: SpaceData<'a, T>,
    /// Quadrature rule used on both cells of each pair
    pub rule: &'a RegularQuadratureRule<T>,
    /// If true, the test and trial vertex indices refer to different meshes and no pair of
    /// cells is adjacent
    pub grids_disjoint: bool,
}

impl<T: RealScalar> RegularKernelInput<'_, T> {
    /// Shape of the output matrix
    pub fn output_shape(&self) -> [usize; 2] {
        [self.test.global_size, self.trial.global_size]
    }

    /// Dimensions of the work grid as (test elements, trial batches)
    pub fn work_grid(&self) -> [usize; 2] {
        [self.test.block.len(), self.trial.block.number_of_batches()]
    }
}

/// A work item: one test element of the block against one batch of trial elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkItem {
    /// Position of the test element in the test block
    pub test: usize,
    /// Index of the batch of trial elements
    pub trial_batch: usize,
}

/// Assemble a single work item
///
/// Lanes past the end of the trial block are inactive. Lanes holding a trial cell that shares
/// a vertex with the test cell are masked and write nothing.
pub fn assemble_regular_work_item<K: Kernel>(
    kernel: &K,
    input: &RegularKernelInput<K::T>,
    item: WorkItem,
    output: &impl ScatterTarget<K::T>,
) {
    let first = item.trial_batch * BATCH_WIDTH;
    let trial_cells: [Option<usize>; BATCH_WIDTH] = std::array::from_fn(|lane| {
        let k = first + lane;
        (k < input.trial.block.len()).then(|| input.trial.block.cell(k))
    });
    assemble_lanes(
        kernel,
        input,
        input.test.block.cell(item.test),
        &trial_cells,
        output,
    );
}

fn assemble_lanes<K: Kernel>(
    kernel: &K,
    input: &RegularKernelInput<K::T>,
    test_cell: usize,
    trial_cells: &[Option<usize>; BATCH_WIDTH],
    output: &impl ScatterTarget<K::T>,
) {
    let integrator = RegularIntegrator::new(kernel, input.rule);
    let test_vertices = &input.test.cells[test_cell];

    let lanes: [Option<(usize, MappedCell<K::T>)>; BATCH_WIDTH] = std::array::from_fn(|lane| {
        trial_cells[lane]
            .filter(|cell| {
                !elements_are_adjacent(
                    test_vertices,
                    &input.trial.cells[*cell],
                    input.grids_disjoint,
                )
            })
            .map(|cell| (cell, integrator.map_cell(input.trial.geometry(cell))))
    });
    if lanes.iter().all(Option::is_none) {
        return;
    }

    let test = integrator.map_cell(input.test.geometry(test_cell));
    let test_dofs = input.test.dofs(test_cell);
    let mut k = vec![K::T::zero(); integrator.scratch_size()];

    for (trial_cell, trial) in lanes.iter().flatten() {
        let local_mat = integrator.element_matrix(&test, trial, &mut k);
        let trial_dofs = input.trial.dofs(*trial_cell);
        for (test_dof, test_multiplier, row) in
            izip!(test_dofs.indices, test_dofs.multipliers, &local_mat)
        {
            for (trial_dof, trial_multiplier, entry) in
                izip!(trial_dofs.indices, trial_dofs.multipliers, row)
            {
                output.add(
                    *test_dof,
                    *trial_dof,
                    *entry * *test_multiplier * *trial_multiplier,
                );
            }
        }
    }
}

/// Run the whole work grid of `input` and add the result into `output`
///
/// The inputs are validated before any work is dispatched.
pub fn dispatch_regular_into<K: Kernel>(
    output: &mut DenseMatrix<K::T>,
    kernel: &K,
    input: &RegularKernelInput<K::T>,
    scatter_mode: ScatterMode,
) -> Result<()> {
    validate(input, output.shape())?;

    let [ntest, nbatches] = input.work_grid();
    debug!(
        "Regular assembly of {:?} kernel: {ntest} test elements x {nbatches} trial batches, lane width {BATCH_WIDTH}, {} quadrature points, {scatter_mode:?} scatter",
        kernel.kernel_type(),
        input.rule.number_of_points()
    );
    if ntest == 0 || nbatches == 0 {
        return Ok(());
    }

    match scatter_mode {
        ScatterMode::Atomic => {
            let atomic_output = AtomicDenseMatrix::from_dense(output);
            (0..ntest * nbatches).into_par_iter().for_each(|index| {
                let item = WorkItem {
                    test: index / nbatches,
                    trial_batch: index % nbatches,
                };
                assemble_regular_work_item(kernel, input, item, &atomic_output);
            });
            atomic_output.write_into(output);
        }
        ScatterMode::Coloured => {
            let test_colouring = input.test.colouring();
            let trial_colouring = input.trial.colouring();
            let shape = output.shape();
            let output_raw = RawData2D::new(output.data_mut(), shape);

            for (test_index, test_c) in test_colouring.iter().enumerate() {
                for (trial_index, trial_c) in trial_colouring.iter().enumerate() {
                    trace!(
                        "Colour pair ({test_index}, {trial_index}): {} test cells, {} trial cells",
                        test_c.len(),
                        trial_c.len()
                    );
                    let trial_batches = trial_c.chunks(BATCH_WIDTH).collect::<Vec<_>>();
                    let numtasks = test_c.len() * trial_batches.len();
                    (0..numtasks).into_par_iter().for_each(|index| {
                        let test_cell = test_c[index / trial_batches.len()];
                        let batch = trial_batches[index % trial_batches.len()];
                        let trial_cells: [Option<usize>; BATCH_WIDTH] =
                            std::array::from_fn(|lane| batch.get(lane).copied());
                        assemble_lanes(kernel, input, test_cell, &trial_cells, &output_raw);
                    });
                }
            }
        }
    }
    Ok(())
}

/// Assemble the regular part of the curl-curl operator of `kernel` and add it into `output`
///
/// `output` must have shape (test space size, trial space size). Its existing values are kept
/// and the contributions of all non-adjacent cell pairs are added to them.
pub fn assemble_regular_into<K: Kernel>(
    output: &mut DenseMatrix<K::T>,
    kernel: &K,
    test_space: &FunctionSpace<'_, K::T>,
    trial_space: &FunctionSpace<'_, K::T>,
    options: &RegularAssemblerOptions,
) -> Result<()> {
    for (name, space) in [("test", test_space), ("trial", trial_space)] {
        if !space.space_type().has_curl() {
            return Err(Error::UnsupportedSpace(format!(
                "the {name} space has type {:?}, whose basis functions have no surface curl",
                space.space_type()
            )));
        }
    }

    let rule = RegularQuadratureRule::new(options.quadrature_points())?;
    let test_block = options
        .test_block()
        .cloned()
        .unwrap_or_else(|| ElementBlock::all_cells(test_space.mesh().number_of_cells()));
    let trial_block = options
        .trial_block()
        .cloned()
        .unwrap_or_else(|| ElementBlock::all_cells(trial_space.mesh().number_of_cells()));

    let same_mesh = equal_grids(test_space.mesh(), trial_space.mesh());
    let grids_disjoint = match options.grids_disjoint() {
        Some(disjoint) => {
            if disjoint && same_mesh {
                warn!(
                    "Grids declared disjoint, but the test and trial spaces share a mesh. Adjacent cell pairs will be assembled."
                );
            }
            disjoint
        }
        None => !same_mesh,
    };

    let input = RegularKernelInput {
        test: SpaceData::new(test_space, &test_block),
        trial: SpaceData::new(trial_space, &trial_block),
        rule: &rule,
        grids_disjoint,
    };
    dispatch_regular_into(output, kernel, &input, options.scatter_mode())
}
