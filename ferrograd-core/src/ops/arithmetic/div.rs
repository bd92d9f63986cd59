use crate::autograd::{apply_op_single, single_grad_output, BackwardContext, Operation};
use crate::error::FerrogradError;
use crate::ops::arithmetic::{mul_op, neg_op};
use crate::ops::binary_inputs;
use crate::tensor::Tensor;
use crate::variable::Variable;

/// Elementwise `a / b` with broadcasting. Division by zero follows IEEE 754.
#[derive(Debug)]
pub struct DivOp;

impl Operation for DivOp {
    fn name(&self) -> &'static str {
        "div"
    }

    fn forward(&self, inputs: &[Tensor]) -> Result<Vec<Tensor>, FerrogradError> {
        let (a, b) = binary_inputs(inputs, self.name())?;
        Ok(vec![a.zip_with(b, |x, y| x / y, |x, y| x / y, self.name())?])
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
        // grad_a = gy / b, grad_b = -(gy / b) * (a / b)
        let gy_over_b = div_op(gy, b)?;
        let grad_b = if b.requires_grad() {
            Some(neg_op(&mul_op(&gy_over_b, &div_op(a, b)?)?)?)
        } else {
            None
        };
        let grad_a = if a.requires_grad() { Some(gy_over_b) } else { None };
        Ok(vec![grad_a, grad_b])
    }
}

pub fn div_op(a: &Variable, b: &Variable) -> Result<Variable, FerrogradError> {
    apply_op_single(DivOp, &[a, b])
}

#[cfg(test)]
#[path = "div_test.rs"]
mod tests;
