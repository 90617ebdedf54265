//! Validation of assembly inputs
//!
//! Work items index the input arrays without further checks, so every entry point validates
//! its input before any work is dispatched.
use crate::assembly::batched::{RegularKernelInput, SpaceData};
use crate::types::{Error, RealScalar, Result};
use log::warn;

fn validate_side<T: RealScalar>(name: &str, side: &SpaceData<'_, T>) -> Result<()> {
    let ncells = side.cells.len();
    if side.shape_count != 3 {
        return Err(Error::UnsupportedSpace(format!(
            "the {name} space has {} shape functions per cell, but the curl is only available for linear spaces",
            side.shape_count
        )));
    }
    if side.normal_signs.len() != ncells {
        return Err(Error::InvalidInput(format!(
            "{} {name} normal signs given for {ncells} cells",
            side.normal_signs.len()
        )));
    }
    if side.local2global.len() != side.shape_count * ncells {
        return Err(Error::InvalidInput(format!(
            "the {name} local to global map has length {}, expected {}",
            side.local2global.len(),
            side.shape_count * ncells
        )));
    }
    if side.multipliers.len() != side.shape_count * ncells {
        return Err(Error::InvalidInput(format!(
            "the {name} multiplier table has length {}, expected {}",
            side.multipliers.len(),
            side.shape_count * ncells
        )));
    }
    if let Some(dof) = side.local2global.iter().find(|d| **d >= side.global_size) {
        return Err(Error::InvalidInput(format!(
            "{name} DOF {dof} is out of range for a space of size {}",
            side.global_size
        )));
    }
    for (index, cell) in side.cells.iter().enumerate() {
        if let Some(v) = cell.iter().find(|v| **v >= side.vertices.len()) {
            return Err(Error::InvalidInput(format!(
                "{name} cell {index} references vertex {v}, but there are {} vertices",
                side.vertices.len()
            )));
        }
    }

    let block = side.block;
    if block.stride() == 0 {
        return Err(Error::InvalidInput(format!("the {name} block has stride 0")));
    }
    if !block.is_empty() {
        match block.last_position() {
            Some(last) if last < block.indices().len() => {}
            _ => {
                return Err(Error::InvalidInput(format!(
                    "the {name} block of {} elements starting at {} with stride {} reaches past the end of an index array of length {}",
                    block.len(),
                    block.start(),
                    block.stride(),
                    block.indices().len()
                )));
            }
        }
        if let Some(cell) = block.cells().into_iter().find(|c| *c >= ncells) {
            return Err(Error::InvalidInput(format!(
                "the {name} block contains cell {cell}, but there are {ncells} cells"
            )));
        }
        for cell in block.cells() {
            let integration_element = side.geometry(cell).integration_element;
            if !integration_element.is_finite() || integration_element <= T::zero() {
                return Err(Error::InvalidInput(format!(
                    "{name} cell {cell} is degenerate, its integration element is {integration_element:?}"
                )));
            }
        }
    }
    Ok(())
}

/// Check that an assembly input is consistent and matches an output of shape `output_shape`
pub fn validate<T: RealScalar>(
    input: &RegularKernelInput<'_, T>,
    output_shape: [usize; 2],
) -> Result<()> {
    validate_side("test", &input.test)?;
    validate_side("trial", &input.trial)?;

    if output_shape != input.output_shape() {
        return Err(Error::InvalidInput(format!(
            "output has shape {output_shape:?}, expected {:?}",
            input.output_shape()
        )));
    }
    if input.rule.number_of_points() == 0 || input.rule.points.len() != input.rule.weights.len() {
        return Err(Error::InvalidInput(format!(
            "quadrature rule has {} points and {} weights",
            input.rule.points.len(),
            input.rule.weights.len()
        )));
    }
    if input.rule.number_of_points() < 3 {
        warn!(
            "Regular assembly with a {}-point rule. Results will be inaccurate.",
            input.rule.number_of_points()
        );
    }
    Ok(())
}
