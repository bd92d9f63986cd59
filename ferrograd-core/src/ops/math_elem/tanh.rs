use crate::autograd::{apply_op_single, single_grad_output, BackwardContext, Operation};
use crate::error::FerrogradError;
use crate::ops::arithmetic::{mul_op, rsub_scalar};
use crate::ops::unary_input;
use crate::tensor::Tensor;
use crate::variable::Variable;

#[derive(Debug)]
pub struct TanhOp;

impl Operation for TanhOp {
    fn name(&self) -> &'static str {
        "tanh"
    }

    fn forward(&self, inputs: &[Tensor]) -> Result<Vec<Tensor>, FerrogradError> {
        let x = unary_input(inputs, self.name())?;
        Ok(vec![x.map(f32::tanh, f64::tanh)])
    }

    fn backward(
        &self,
        ctx: &BackwardContext<'_>,
        grad_outputs: &[Option<Variable>],
    ) -> Result<Vec<Option<Variable>>, FerrogradError> {
        let Some(gy) = single_grad_output(grad_outputs) else {
            return Ok(vec![None]);
        };
        // grad_x = gy * (1 - y^2)
        let y = match ctx.output(0) {
            Some(y) => y,
            None => tanh_op(ctx.input(0)?)?,
        };
        let slope = rsub_scalar(1.0, &mul_op(&y, &y)?)?;
        Ok(vec![Some(mul_op(gy, &slope)?)])
    }
}

pub fn tanh_op(x: &Variable) -> Result<Variable, FerrogradError> {
    apply_op_single(TanhOp, &[x])
}

#[cfg(test)]
#[path = "tanh_test.rs"]
mod tests;
