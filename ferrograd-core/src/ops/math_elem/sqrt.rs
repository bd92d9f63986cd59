use crate::autograd::{apply_op_single, single_grad_output, BackwardContext, Operation};
use crate::error::FerrogradError;
use crate::ops::arithmetic::{div_op, mul_scalar};
use crate::ops::unary_input;
use crate::tensor::Tensor;
use crate::variable::Variable;

#[derive(Debug)]
pub struct SqrtOp;

impl Operation for SqrtOp {
    fn name(&self) -> &'static str {
        "sqrt"
    }

    fn forward(&self, inputs: &[Tensor]) -> Result<Vec<Tensor>, FerrogradError> {
        let x = unary_input(inputs, self.name())?;
        Ok(vec![x.map(f32::sqrt, f64::sqrt)])
    }

    fn backward(
        &self,
        ctx: &BackwardContext<'_>,
        grad_outputs: &[Option<Variable>],
    ) -> Result<Vec<Option<Variable>>, FerrogradError> {
        let Some(gy) = single_grad_output(grad_outputs) else {
            return Ok(vec![None]);
        };
        // grad_x = gy / (2 * sqrt(x))
        let y = match ctx.output(0) {
            Some(y) => y,
            None => sqrt_op(ctx.input(0)?)?,
        };
        Ok(vec![Some(div_op(gy, &mul_scalar(&y, 2.0)?)?)])
    }
}

pub fn sqrt_op(x: &Variable) -> Result<Variable, FerrogradError> {
    apply_op_single(SqrtOp, &[x])
}

#[cfg(test)]
#[path = "sqrt_test.rs"]
mod tests;
