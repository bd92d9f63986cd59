use crate::autograd::{apply_op_single, single_grad_output, BackwardContext, Operation};
use crate::error::FerrogradError;
use crate::ops::arithmetic::mul_op;
use crate::ops::unary_input;
use crate::tensor::Tensor;
use crate::variable::Variable;

/// `max(x, 0)`. The gradient at 0 is taken as 0.
#[derive(Debug)]
pub struct ReluOp;

impl Operation for ReluOp {
    fn name(&self) -> &'static str {
        "relu"
    }

    fn forward(&self, inputs: &[Tensor]) -> Result<Vec<Tensor>, FerrogradError> {
        let x = unary_input(inputs, self.name())?;
        Ok(vec![x.map(|v| v.max(0.0), |v| v.max(0.0))])
    }

    fn backward(
        &self,
        ctx: &BackwardContext<'_>,
        grad_outputs: &[Option<Variable>],
    ) -> Result<Vec<Option<Variable>>, FerrogradError> {
        let Some(gy) = single_grad_output(grad_outputs) else {
            return Ok(vec![None]);
        };
        // The mask is a constant, so the second derivative is zero.
        let x = ctx.input(0)?.value()?;
        let mask = Variable::new(x.map(
            |v| if v > 0.0 { 1.0 } else { 0.0 },
            |v| if v > 0.0 { 1.0 } else { 0.0 },
        ));
        Ok(vec![Some(mul_op(gy, &mask)?)])
    }
}

pub fn relu_op(x: &Variable) -> Result<Variable, FerrogradError> {
    apply_op_single(ReluOp, &[x])
}

#[cfg(test)]
#[path = "relu_test.rs"]
mod tests;
