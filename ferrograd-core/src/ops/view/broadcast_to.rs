use crate::autograd::{apply_op_single, single_grad_output, BackwardContext, Operation};
use crate::error::FerrogradError;
use crate::ops::unary_input;
use crate::ops::view::sum_to_op;
use crate::tensor::Tensor;
use crate::variable::Variable;

#[derive(Debug)]
pub struct BroadcastToOp {
    shape: Vec<usize>,
}

impl Operation for BroadcastToOp {
    fn name(&self) -> &'static str {
        "broadcast_to"
    }

    fn forward(&self, inputs: &[Tensor]) -> Result<Vec<Tensor>, FerrogradError> {
        let x = unary_input(inputs, self.name())?;
        Ok(vec![x.broadcast_to(&self.shape)?])
    }

    fn backward(
        &self,
        ctx: &BackwardContext<'_>,
        grad_outputs: &[Option<Variable>],
    ) -> Result<Vec<Option<Variable>>, FerrogradError> {
        match single_grad_output(grad_outputs) {
            Some(gy) => Ok(vec![Some(sum_to_op(gy, &ctx.input(0)?.shape())?)]),
            None => Ok(vec![None]),
        }
    }
}

/// Expands `x` to `shape` following broadcasting rules.
pub fn broadcast_to_op(x: &Variable, shape: &[usize]) -> Result<Variable, FerrogradError> {
    if x.shape() == shape {
        return Ok(x.clone());
    }
    apply_op_single(
        BroadcastToOp {
            shape: shape.to_vec(),
        },
        &[x],
    )
}

#[cfg(test)]
#[path = "broadcast_to_test.rs"]
mod tests;
