use crate::autograd::{apply_op_single, single_grad_output, BackwardContext, Operation};
use crate::error::FerrogradError;
use crate::ops::unary_input;
use crate::ops::view::{broadcast_to_op, reshape_op};
use crate::tensor::utils::normalize_axes;
use crate::tensor::Tensor;
use crate::variable::Variable;

/// Sum over a set of axes (already validated, sorted and deduplicated).
#[derive(Debug)]
pub struct SumOp {
    axes: Vec<usize>,
    keep_dims: bool,
}

impl Operation for SumOp {
    fn name(&self) -> &'static str {
        "sum"
    }

    fn forward(&self, inputs: &[Tensor]) -> Result<Vec<Tensor>, FerrogradError> {
        let x = unary_input(inputs, self.name())?;
        Ok(vec![x.sum_axes(&self.axes, self.keep_dims)?])
    }

    fn backward(
        &self,
        ctx: &BackwardContext<'_>,
        grad_outputs: &[Option<Variable>],
    ) -> Result<Vec<Option<Variable>>, FerrogradError> {
        let Some(gy) = single_grad_output(grad_outputs) else {
            return Ok(vec![None]);
        };
        // Restore the reduced axes as size-1 dims, then broadcast back.
        let input_shape = ctx.input(0)?.shape();
        let kept_shape: Vec<usize> = input_shape
            .iter()
            .enumerate()
            .map(|(d, &s)| if self.axes.contains(&d) { 1 } else { s })
            .collect();
        let gy = if self.keep_dims {
            gy.clone()
        } else {
            reshape_op(gy, &kept_shape)?
        };
        Ok(vec![Some(broadcast_to_op(&gy, &input_shape)?)])
    }
}

/// Sums `x` over `axes` (all axes when `None`).
///
/// # Errors
/// `InvalidAxis` if an axis is out of range; nothing is recorded in that case.
pub fn sum_op(x: &Variable, axes: Option<&[usize]>, keep_dims: bool) -> Result<Variable, FerrogradError> {
    let rank = x.ndim();
    let axes = match axes {
        Some(axes) => normalize_axes(axes, rank)?,
        None => (0..rank).collect(),
    };
    apply_op_single(SumOp { axes, keep_dims }, &[x])
}

#[cfg(test)]
#[path = "sum_test.rs"]
mod tests;
