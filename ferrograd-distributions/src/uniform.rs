use ferrograd_core::ops::comparison::where_op;
use ferrograd_core::tensor;
use ferrograd_core::{FerrogradError, Variable};

use crate::distribution::{check_parameters, sample_shape, Distribution};

/// Continuous uniform distribution on `[low, high]`.
#[derive(Debug, Clone)]
pub struct Uniform {
    low: Variable,
    high: Variable,
}

impl Uniform {
    /// `low` and `high` must have the same shape and dtype.
    pub fn new(low: Variable, high: Variable) -> Result<Self, FerrogradError> {
        check_parameters(&[&low, &high], "Uniform::new")?;
        let (lo, hi) = (low.value()?.to_f64_vec(), high.value()?.to_f64_vec());
        if lo.iter().zip(&hi).any(|(l, h)| l >= h) {
            log::warn!("Uniform created with low >= high");
        }
        Ok(Uniform { low, high })
    }

    pub fn low(&self) -> &Variable {
        &self.low
    }

    pub fn high(&self) -> &Variable {
        &self.high
    }

    fn width(&self) -> Result<Variable, FerrogradError> {
        self.high.sub(&self.low)
    }
}

impl Distribution for Uniform {
    fn batch_shape(&self) -> Vec<usize> {
        self.low.shape()
    }

    /// `-ln(high - low)` inside the support, `-inf` outside.
    fn log_prob(&self, x: &Variable) -> Result<Variable, FerrogradError> {
        let xv = x.value()?;
        let above = xv.zip_with(
            &self.low.value()?,
            |x, l| if x >= l { 1.0 } else { 0.0 },
            |x, l| if x >= l { 1.0 } else { 0.0 },
            "uniform_log_prob",
        )?;
        let below = xv.zip_with(
            &self.high.value()?,
            |x, h| if x <= h { 1.0 } else { 0.0 },
            |x, h| if x <= h { 1.0 } else { 0.0 },
            "uniform_log_prob",
        )?;
        let inside = above.zip_with(&below, |a, b| a * b, |a, b| a * b, "uniform_log_prob")?;
        let density = self.width()?.ln()?.neg()?;
        let outside = Variable::new(tensor::scalar(f64::NEG_INFINITY, xv.dtype()));
        where_op(&inside, &density, &outside)
    }

    fn mean(&self) -> Result<Variable, FerrogradError> {
        self.low.add(&self.high)?.mul_scalar(0.5)
    }

    /// `(high - low)^2 / 12`.
    fn variance(&self) -> Result<Variable, FerrogradError> {
        self.width()?.pow_scalar(2.0)?.div_scalar(12.0)
    }

    fn entropy(&self) -> Result<Variable, FerrogradError> {
        self.width()?.ln()
    }

    /// `low + u (high - low)` with `u ~ U[0, 1)`, differentiable in both bounds.
    fn sample_n(&self, n: usize) -> Result<Variable, FerrogradError> {
        let shape = sample_shape(&[n], &self.batch_shape());
        let u = Variable::new(tensor::rand(&shape, self.low.dtype()));
        self.low.add(&u.mul(&self.width()?)?)
    }

    fn support(&self) -> &'static str {
        "[low, high]"
    }
}

#[cfg(test)]
#[path = "uniform_test.rs"]
mod tests;
