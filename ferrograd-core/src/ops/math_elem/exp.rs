use crate::autograd::{apply_op_single, single_grad_output, BackwardContext, Operation};
use crate::error::FerrogradError;
use crate::ops::arithmetic::mul_op;
use crate::ops::unary_input;
use crate::tensor::Tensor;
use crate::variable::Variable;

#[derive(Debug)]
pub struct ExpOp;

impl Operation for ExpOp {
    fn name(&self) -> &'static str {
        "exp"
    }

    fn forward(&self, inputs: &[Tensor]) -> Result<Vec<Tensor>, FerrogradError> {
        let x = unary_input(inputs, self.name())?;
        Ok(vec![x.map(f32::exp, f64::exp)])
    }

    fn backward(
        &self,
        ctx: &BackwardContext<'_>,
        grad_outputs: &[Option<Variable>],
    ) -> Result<Vec<Option<Variable>>, FerrogradError> {
        let Some(gy) = single_grad_output(grad_outputs) else {
            return Ok(vec![None]);
        };
        // d/dx exp(x) = exp(x)
        let y = match ctx.output(0) {
            Some(y) => y,
            None => exp_op(ctx.input(0)?)?,
        };
        Ok(vec![Some(mul_op(gy, &y)?)])
    }
}

/// Elementwise natural exponential.
pub fn exp_op(x: &Variable) -> Result<Variable, FerrogradError> {
    apply_op_single(ExpOp, &[x])
}

#[cfg(test)]
#[path = "exp_test.rs"]
mod tests;
