use crate::autograd::{apply_op_single, single_grad_output, BackwardContext, Operation};
use crate::error::FerrogradError;
use crate::ops::arithmetic::{mul_op, rsub_scalar};
use crate::ops::unary_input;
use crate::tensor::Tensor;
use crate::variable::Variable;

/// Logistic function `1 / (1 + exp(-x))`.
#[derive(Debug)]
pub struct SigmoidOp;

impl Operation for SigmoidOp {
    fn name(&self) -> &'static str {
        "sigmoid"
    }

    fn forward(&self, inputs: &[Tensor]) -> Result<Vec<Tensor>, FerrogradError> {
        let x = unary_input(inputs, self.name())?;
        Ok(vec![x.map(
            |v| 1.0 / (1.0 + (-v).exp()),
            |v| 1.0 / (1.0 + (-v).exp()),
        )])
    }

    fn backward(
        &self,
        ctx: &BackwardContext<'_>,
        grad_outputs: &[Option<Variable>],
    ) -> Result<Vec<Option<Variable>>, FerrogradError> {
        let Some(gy) = single_grad_output(grad_outputs) else {
            return Ok(vec![None]);
        };
        let y = match ctx.output(0) {
            Some(y) => y,
            None => sigmoid_op(ctx.input(0)?)?,
        };
        let slope = mul_op(&y, &rsub_scalar(1.0, &y)?)?;
        Ok(vec![Some(mul_op(gy, &slope)?)])
    }
}

pub fn sigmoid_op(x: &Variable) -> Result<Variable, FerrogradError> {
    apply_op_single(SigmoidOp, &[x])
}

#[cfg(test)]
#[path = "sigmoid_test.rs"]
mod tests;
