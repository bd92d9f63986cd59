use crate::autograd::{apply_op_single, single_grad_output, BackwardContext, Operation};
use crate::error::FerrogradError;
use crate::ops::arithmetic::div_op;
use crate::ops::unary_input;
use crate::tensor::Tensor;
use crate::variable::Variable;

/// Natural logarithm. Non-positive inputs follow IEEE 754 (`-inf`, NaN).
#[derive(Debug)]
pub struct LnOp;

impl Operation for LnOp {
    fn name(&self) -> &'static str {
        "ln"
    }

    fn forward(&self, inputs: &[Tensor]) -> Result<Vec<Tensor>, FerrogradError> {
        let x = unary_input(inputs, self.name())?;
        Ok(vec![x.map(f32::ln, f64::ln)])
    }

    fn backward(
        &self,
        ctx: &BackwardContext<'_>,
        grad_outputs: &[Option<Variable>],
    ) -> Result<Vec<Option<Variable>>, FerrogradError> {
        match single_grad_output(grad_outputs) {
            Some(gy) => Ok(vec![Some(div_op(gy, ctx.input(0)?)?)]),
            None => Ok(vec![None]),
        }
    }
}

pub fn ln_op(x: &Variable) -> Result<Variable, FerrogradError> {
    apply_op_single(LnOp, &[x])
}

#[cfg(test)]
#[path = "ln_test.rs"]
mod tests;
