use crate::autograd::{apply_op_single, single_grad_output, BackwardContext, Operation};
use crate::error::FerrogradError;
use crate::ops::unary_input;
use crate::tensor::Tensor;
use crate::variable::Variable;

#[derive(Debug)]
pub struct ReshapeOp {
    shape: Vec<usize>,
}

impl Operation for ReshapeOp {
    fn name(&self) -> &'static str {
        "reshape"
    }

    fn forward(&self, inputs: &[Tensor]) -> Result<Vec<Tensor>, FerrogradError> {
        let x = unary_input(inputs, self.name())?;
        Ok(vec![x.reshape(&self.shape)?])
    }

    fn backward(
        &self,
        ctx: &BackwardContext<'_>,
        grad_outputs: &[Option<Variable>],
    ) -> Result<Vec<Option<Variable>>, FerrogradError> {
        match single_grad_output(grad_outputs) {
            Some(gy) => Ok(vec![Some(reshape_op(gy, &ctx.input(0)?.shape())?)]),
            None => Ok(vec![None]),
        }
    }
}

/// Reshapes `x`; the element count must not change.
pub fn reshape_op(x: &Variable, shape: &[usize]) -> Result<Variable, FerrogradError> {
    if x.shape() == shape {
        return Ok(x.clone());
    }
    apply_op_single(
        ReshapeOp {
            shape: shape.to_vec(),
        },
        &[x],
    )
}

#[cfg(test)]
#[path = "reshape_test.rs"]
mod tests;
