//! `lgamma`, `digamma` and `polygamma`. Each derivative is the next member
//! of the family, so the chain can be differentiated to any order.

use crate::autograd::{apply_op_single, single_grad_output, BackwardContext, Operation};
use crate::error::FerrogradError;
use crate::ops::arithmetic::{add_scalar, mul_op};
use crate::ops::math_elem::special;
use crate::ops::{binary_inputs, unary_input};
use crate::tensor::Tensor;
use crate::variable::Variable;

/// `ln |Γ(x)|`.
#[derive(Debug)]
pub struct LgammaOp;

impl Operation for LgammaOp {
    fn name(&self) -> &'static str {
        "lgamma"
    }

    fn forward(&self, inputs: &[Tensor]) -> Result<Vec<Tensor>, FerrogradError> {
        let x = unary_input(inputs, self.name())?;
        Ok(vec![x.map(|v| special::ln_gamma(v as f64) as f32, special::ln_gamma)])
    }

    fn backward(
        &self,
        ctx: &BackwardContext<'_>,
        grad_outputs: &[Option<Variable>],
    ) -> Result<Vec<Option<Variable>>, FerrogradError> {
        match single_grad_output(grad_outputs) {
            Some(gy) => Ok(vec![Some(mul_op(gy, &digamma_op(ctx.input(0)?)?)?)]),
            None => Ok(vec![None]),
        }
    }
}

#[derive(Debug)]
pub struct DigammaOp;

impl Operation for DigammaOp {
    fn name(&self) -> &'static str {
        "digamma"
    }

    fn forward(&self, inputs: &[Tensor]) -> Result<Vec<Tensor>, FerrogradError> {
        let x = unary_input(inputs, self.name())?;
        Ok(vec![x.map(|v| special::digamma(v as f64) as f32, special::digamma)])
    }

    fn backward(
        &self,
        ctx: &BackwardContext<'_>,
        grad_outputs: &[Option<Variable>],
    ) -> Result<Vec<Option<Variable>>, FerrogradError> {
        match single_grad_output(grad_outputs) {
            Some(gy) => Ok(vec![Some(mul_op(gy, &polygamma_n_op(1, ctx.input(0)?)?)?)]),
            None => Ok(vec![None]),
        }
    }
}

/// `ψ⁽ⁿ⁾(x)` with the order `n` carried as a (broadcastable) float input.
///
/// `n` must hold non-negative integers; it has no gradient.
#[derive(Debug)]
pub struct PolygammaOp;

fn order_of(n: f64) -> Option<u32> {
    if n >= 0.0 && n.fract() == 0.0 && n <= u32::MAX as f64 {
        Some(n as u32)
    } else {
        None
    }
}

impl Operation for PolygammaOp {
    fn name(&self) -> &'static str {
        "polygamma"
    }

    fn forward(&self, inputs: &[Tensor]) -> Result<Vec<Tensor>, FerrogradError> {
        let (n, x) = binary_inputs(inputs, self.name())?;
        if let Some(bad) = n.to_f64_vec().into_iter().find(|&v| order_of(v).is_none()) {
            return Err(FerrogradError::InvalidArgument(format!(
                "polygamma order must be a non-negative integer, got {}",
                bad
            )));
        }
        let n = n.cast(x.dtype());
        let out = n.zip_with(
            x,
            |n, v| order_of(n as f64).map_or(f32::NAN, |n| special::polygamma(n, v as f64) as f32),
            |n, v| order_of(n).map_or(f64::NAN, |n| special::polygamma(n, v)),
            self.name(),
        )?;
        Ok(vec![out])
    }

    fn backward(
        &self,
        ctx: &BackwardContext<'_>,
        grad_outputs: &[Option<Variable>],
    ) -> Result<Vec<Option<Variable>>, FerrogradError> {
        let Some(gy) = single_grad_output(grad_outputs) else {
            return Ok(vec![None, None]);
        };
        let n = ctx.input(0)?;
        let x = ctx.input(1)?;
        let next = polygamma_op(&add_scalar(n, 1.0)?.detach()?, x)?;
        Ok(vec![None, Some(mul_op(gy, &next)?)])
    }
}

pub fn lgamma_op(x: &Variable) -> Result<Variable, FerrogradError> {
    apply_op_single(LgammaOp, &[x])
}

pub fn digamma_op(x: &Variable) -> Result<Variable, FerrogradError> {
    apply_op_single(DigammaOp, &[x])
}

/// Polygamma with a per-element order variable.
pub fn polygamma_op(n: &Variable, x: &Variable) -> Result<Variable, FerrogradError> {
    apply_op_single(PolygammaOp, &[n, x])
}

/// Polygamma of a fixed order.
pub fn polygamma_n_op(n: u32, x: &Variable) -> Result<Variable, FerrogradError> {
    let order = Variable::new(crate::tensor::scalar(n as f64, x.dtype()));
    polygamma_op(&order, x)
}

#[cfg(test)]
#[path = "gamma_test.rs"]
mod tests;
