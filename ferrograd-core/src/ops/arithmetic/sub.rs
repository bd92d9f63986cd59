use crate::autograd::{apply_op_single, single_grad_output, BackwardContext, Operation};
use crate::error::FerrogradError;
use crate::ops::arithmetic::neg::neg_op;
use crate::ops::binary_inputs;
use crate::tensor::Tensor;
use crate::variable::Variable;

/// Elementwise `a - b` with broadcasting.
#[derive(Debug)]
pub struct SubOp;

impl Operation for SubOp {
    fn name(&self) -> &'static str {
        "sub"
    }

    fn forward(&self, inputs: &[Tensor]) -> Result<Vec<Tensor>, FerrogradError> {
        let (a, b) = binary_inputs(inputs, self.name())?;
        Ok(vec![a.zip_with(b, |x, y| x - y, |x, y| x - y, self.name())?])
    }

    fn backward(
        &self,
        ctx: &BackwardContext<'_>,
        grad_outputs: &[Option<Variable>],
    ) -> Result<Vec<Option<Variable>>, FerrogradError> {
        let Some(gy) = single_grad_output(grad_outputs) else {
            return Ok(vec![None, None]);
        };
        let grad_b = if ctx.input(1)?.requires_grad() {
            Some(neg_op(gy)?)
        } else {
            None
        };
        Ok(vec![Some(gy.clone()), grad_b])
    }
}

pub fn sub_op(a: &Variable, b: &Variable) -> Result<Variable, FerrogradError> {
    apply_op_single(SubOp, &[a, b])
}

#[cfg(test)]
#[path = "sub_test.rs"]
mod tests;
