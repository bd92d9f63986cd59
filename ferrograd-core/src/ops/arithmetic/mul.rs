use crate::autograd::{apply_op_single, single_grad_output, BackwardContext, Operation};
use crate::error::FerrogradError;
use crate::ops::binary_inputs;
use crate::tensor::Tensor;
use crate::variable::Variable;

/// Elementwise `a * b` with broadcasting.
#[derive(Debug)]
pub struct MulOp;

impl Operation for MulOp {
    fn name(&self) -> &'static str {
        "mul"
    }

    fn forward(&self, inputs: &[Tensor]) -> Result<Vec<Tensor>, FerrogradError> {
        let (a, b) = binary_inputs(inputs, self.name())?;
        Ok(vec![a.zip_with(b, |x, y| x * y, |x, y| x * y, self.name())?])
    }

    fn backward(
        &self,
        ctx: &BackwardContext<'_>,
        grad_outputs: &[Option<Variable>],
    ) -> Result<Vec<Option<Variable>>, FerrogradError> {
        let Some(gy) = single_grad_output(grad_outputs) else {
            return Ok(vec![None, None]);
        };
        let a = ctx.input(0)?;
        let b = ctx.input(1)?;
        // grad_a = gy * b, grad_b = gy * a
        let grad_a = if a.requires_grad() { Some(mul_op(gy, b)?) } else { None };
        let grad_b = if b.requires_grad() { Some(mul_op(gy, a)?) } else { None };
        Ok(vec![grad_a, grad_b])
    }
}

/// Multiplies two variables elementwise, broadcasting their shapes.
pub fn mul_op(a: &Variable, b: &Variable) -> Result<Variable, FerrogradError> {
    apply_op_single(MulOp, &[a, b])
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
