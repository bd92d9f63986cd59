use crate::autograd::{apply_op_single, single_grad_output, BackwardContext, Operation};
use crate::error::FerrogradError;
use crate::ops::arithmetic::{mul_op, mul_scalar};
use crate::ops::unary_input;
use crate::tensor::Tensor;
use crate::variable::Variable;

/// `x ^ exponent` for a constant exponent.
#[derive(Debug)]
pub struct PowScalarOp {
    exponent: f64,
}

impl Operation for PowScalarOp {
    fn name(&self) -> &'static str {
        "pow_scalar"
    }

    fn forward(&self, inputs: &[Tensor]) -> Result<Vec<Tensor>, FerrogradError> {
        let x = unary_input(inputs, self.name())?;
        let e = self.exponent;
        Ok(vec![x.map(|v| v.powf(e as f32), |v| v.powf(e))])
    }

    fn backward(
        &self,
        ctx: &BackwardContext<'_>,
        grad_outputs: &[Option<Variable>],
    ) -> Result<Vec<Option<Variable>>, FerrogradError> {
        let Some(gy) = single_grad_output(grad_outputs) else {
            return Ok(vec![None]);
        };
        if self.exponent == 0.0 {
            return Ok(vec![None]);
        }
        // grad_x = gy * e * x^(e - 1)
        let x = ctx.input(0)?;
        let slope = mul_scalar(&pow_scalar_op(x, self.exponent - 1.0)?, self.exponent)?;
        Ok(vec![Some(mul_op(gy, &slope)?)])
    }
}

/// Raises every element to a constant power.
pub fn pow_scalar_op(x: &Variable, exponent: f64) -> Result<Variable, FerrogradError> {
    apply_op_single(PowScalarOp { exponent }, &[x])
}

#[cfg(test)]
#[path = "pow_test.rs"]
mod tests;
