//! Options for the regular assembler
use crate::assembly::batched::ElementBlock;

/// How concurrent work items add their contributions to the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScatterMode {
    /// All work items run concurrently and add into the output with atomic adds
    #[default]
    Atomic,
    /// Cells are coloured so that concurrent work items never write to the same entry, and the
    /// output is written with plain adds
    Coloured,
}

/// Options for a regular assembler
#[derive(Debug, Clone)]
pub struct RegularAssemblerOptions {
    /// Number of points of the quadrature rule used on each cell
    pub(crate) quadrature_points: usize,
    /// Scatter strategy
    pub(crate) scatter_mode: ScatterMode,
    /// Override for the check whether the test and trial meshes are different
    pub(crate) grids_disjoint: Option<bool>,
    /// Test cells to assemble, or all cells if `None`
    pub(crate) test_block: Option<ElementBlock>,
    /// Trial cells to assemble, or all cells if `None`
    pub(crate) trial_block: Option<ElementBlock>,
}

impl Default for RegularAssemblerOptions {
    fn default() -> Self {
        Self {
            quadrature_points: 6,
            scatter_mode: ScatterMode::default(),
            grids_disjoint: None,
            test_block: None,
            trial_block: None,
        }
    }
}

impl RegularAssemblerOptions {
    /// Set the number of quadrature points used on each cell
    pub fn set_quadrature_points(&mut self, npoints: usize) {
        self.quadrature_points = npoints;
    }

    /// Number of quadrature points used on each cell
    pub fn quadrature_points(&self) -> usize {
        self.quadrature_points
    }

    /// Set the scatter strategy
    pub fn set_scatter_mode(&mut self, mode: ScatterMode) {
        self.scatter_mode = mode;
    }

    /// The scatter strategy
    pub fn scatter_mode(&self) -> ScatterMode {
        self.scatter_mode
    }

    /// Declare whether the test and trial meshes are different
    ///
    /// If this is not set, the meshes are taken to be different unless they are the same object.
    pub fn set_grids_disjoint(&mut self, disjoint: Option<bool>) {
        self.grids_disjoint = disjoint;
    }

    /// The declared relation between the test and trial meshes
    pub fn grids_disjoint(&self) -> Option<bool> {
        self.grids_disjoint
    }

    /// Restrict the assembly to a block of test cells
    pub fn set_test_block(&mut self, block: Option<ElementBlock>) {
        self.test_block = block;
    }

    /// The block of test cells, if set
    pub fn test_block(&self) -> Option<&ElementBlock> {
        self.test_block.as_ref()
    }

    /// Restrict the assembly to a block of trial cells
    pub fn set_trial_block(&mut self, block: Option<ElementBlock>) {
        self.trial_block = block;
    }

    /// The block of trial cells, if set
    pub fn trial_block(&self) -> Option<&ElementBlock> {
        self.trial_block.as_ref()
    }
}
