use crate::autograd::{apply_op_single, single_grad_output, BackwardContext, Operation};
use crate::error::FerrogradError;
use crate::ops::unary_input;
use crate::ops::view::broadcast_to_op;
use crate::tensor::Tensor;
use crate::variable::Variable;

/// Sums a broadcast value back to `shape`; the adjoint of `broadcast_to`.
#[derive(Debug)]
pub struct SumToOp {
    shape: Vec<usize>,
}

impl Operation for SumToOp {
    fn name(&self) -> &'static str {
        "sum_to"
    }

    fn forward(&self, inputs: &[Tensor]) -> Result<Vec<Tensor>, FerrogradError> {
        let x = unary_input(inputs, self.name())?;
        Ok(vec![x.sum_to(&self.shape)?])
    }

    fn backward(
        &self,
        ctx: &BackwardContext<'_>,
        grad_outputs: &[Option<Variable>],
    ) -> Result<Vec<Option<Variable>>, FerrogradError> {
        match single_grad_output(grad_outputs) {
            Some(gy) => Ok(vec![Some(broadcast_to_op(gy, &ctx.input(0)?.shape())?)]),
            None => Ok(vec![None]),
        }
    }
}

pub fn sum_to_op(x: &Variable, shape: &[usize]) -> Result<Variable, FerrogradError> {
    if x.shape() == shape {
        return Ok(x.clone());
    }
    apply_op_single(
        SumToOp {
            shape: shape.to_vec(),
        },
        &[x],
    )
}

#[cfg(test)]
#[path = "sum_to_test.rs"]
mod tests;
