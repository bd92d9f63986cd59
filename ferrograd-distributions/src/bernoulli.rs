use ferrograd_core::ops::arithmetic::rsub_scalar;
use ferrograd_core::tensor;
use ferrograd_core::{FerrogradError, Variable};

use crate::distribution::{sample_shape, Distribution};

/// Bernoulli distribution with success probability `p`.
#[derive(Debug, Clone)]
pub struct Bernoulli {
    p: Variable,
}

impl Bernoulli {
    /// Values of `p` outside `[0, 1]` are accepted but logged.
    pub fn new(p: Variable) -> Result<Self, FerrogradError> {
        let values = p.value()?.to_f64_vec();
        if values.iter().any(|v| !(0.0..=1.0).contains(v)) {
            log::warn!("Bernoulli created with probabilities outside [0, 1]");
        }
        Ok(Bernoulli { p })
    }

    pub fn p(&self) -> &Variable {
        &self.p
    }

    /// `1 - p`.
    fn q(&self) -> Result<Variable, FerrogradError> {
        rsub_scalar(1.0, &self.p)
    }
}

impl Distribution for Bernoulli {
    fn batch_shape(&self) -> Vec<usize> {
        self.p.shape()
    }

    /// `x ln p + (1 - x) ln(1 - p)`.
    fn log_prob(&self, x: &Variable) -> Result<Variable, FerrogradError> {
        let hit = x.mul(&self.p.ln()?)?;
        let miss = rsub_scalar(1.0, x)?.mul(&self.q()?.ln()?)?;
        hit.add(&miss)
    }

    /// `x p + (1 - x)(1 - p)`, exact at `p = 0` and `p = 1`.
    fn prob(&self, x: &Variable) -> Result<Variable, FerrogradError> {
        let hit = x.mul(&self.p)?;
        let miss = rsub_scalar(1.0, x)?.mul(&self.q()?)?;
        hit.add(&miss)
    }

    fn mean(&self) -> Result<Variable, FerrogradError> {
        Ok(self.p.clone())
    }

    fn variance(&self) -> Result<Variable, FerrogradError> {
        self.p.mul(&self.q()?)
    }

    fn stddev(&self) -> Result<Variable, FerrogradError> {
        self.variance()?.pow_scalar(0.5)
    }

    fn entropy(&self) -> Result<Variable, FerrogradError> {
        let q = self.q()?;
        let p_term = self.p.mul(&self.p.ln()?)?;
        let q_term = q.mul(&q.ln()?)?;
        p_term.add(&q_term)?.neg()
    }

    /// Draws `u ~ U[0, 1)` and returns `1` where `u < p`. Samples are constants.
    fn sample_n(&self, n: usize) -> Result<Variable, FerrogradError> {
        let p = self.p.value()?;
        let shape = sample_shape(&[n], p.shape_ref());
        let u = tensor::rand(&shape, p.dtype());
        let draws = u.zip_with(
            &p,
            |u, p| if u < p { 1.0 } else { 0.0 },
            |u, p| if u < p { 1.0 } else { 0.0 },
            "bernoulli_sample",
        )?;
        Ok(Variable::new(draws))
    }

    fn support(&self) -> &'static str {
        "{0, 1}"
    }
}

#[cfg(test)]
#[path = "bernoulli_test.rs"]
mod tests;
