use std::f64::consts::PI;

use rand_distr::Distribution as _;

use ferrograd_core::ops::comparison::where_op;
use ferrograd_core::tensor::Tensor;
use ferrograd_core::{FerrogradError, Variable};

use crate::distribution::{check_parameters, sample_shape, Distribution};

/// Student's t distribution with `nu` degrees of freedom, location `loc`
/// and scale `scale`.
#[derive(Debug, Clone)]
pub struct StudentT {
    nu: Variable,
    loc: Variable,
    scale: Variable,
}

impl StudentT {
    /// All three parameters must have the same shape and dtype.
    pub fn new(nu: Variable, loc: Variable, scale: Variable) -> Result<Self, FerrogradError> {
        check_parameters(&[&nu, &loc, &scale], "StudentT::new")?;
        let positive = |v: &Variable| -> Result<bool, FerrogradError> {
            Ok(v.value()?.to_f64_vec().iter().all(|&x| x > 0.0))
        };
        if !positive(&nu)? || !positive(&scale)? {
            log::warn!("StudentT created with non-positive nu or scale");
        }
        Ok(StudentT { nu, loc, scale })
    }

    pub fn nu(&self) -> &Variable {
        &self.nu
    }

    pub fn loc(&self) -> &Variable {
        &self.loc
    }

    pub fn scale(&self) -> &Variable {
        &self.scale
    }

    /// Constant mask of `nu > threshold`.
    fn nu_above(&self, threshold: f64) -> Result<Tensor, FerrogradError> {
        Ok(self.nu.value()?.map(
            |v| if v as f64 > threshold { 1.0 } else { 0.0 },
            |v| if v > threshold { 1.0 } else { 0.0 },
        ))
    }

    fn constant(&self, fill: impl Fn(f64) -> f64) -> Result<Variable, FerrogradError> {
        let nu = self.nu.value()?;
        Ok(Variable::new(nu.map(|v| fill(v as f64) as f32, &fill)))
    }
}

impl Distribution for StudentT {
    fn batch_shape(&self) -> Vec<usize> {
        self.nu.shape()
    }

    /// `lnΓ((ν+1)/2) - lnΓ(ν/2) - ½ ln(νπ) - ln σ - (ν+1)/2 · ln(1 + y²/ν)`
    /// with `y = (x - loc) / scale`.
    fn log_prob(&self, x: &Variable) -> Result<Variable, FerrogradError> {
        let half_nu = self.nu.mul_scalar(0.5)?;
        let half_nu_plus = self.nu.add_scalar(1.0)?.mul_scalar(0.5)?;
        let y = x.sub(&self.loc)?.div(&self.scale)?;
        let kernel = y.pow_scalar(2.0)?.div(&self.nu)?.add_scalar(1.0)?.ln()?;
        let norm = half_nu_plus
            .lgamma()?
            .sub(&half_nu.lgamma()?)?
            .sub(&self.nu.ln()?.add_scalar(PI.ln())?.mul_scalar(0.5)?)?
            .sub(&self.scale.ln()?)?;
        norm.sub(&half_nu_plus.mul(&kernel)?)
    }

    /// `loc` for `nu > 1`, NaN otherwise.
    fn mean(&self) -> Result<Variable, FerrogradError> {
        let undefined = self.constant(|_| f64::NAN)?;
        where_op(&self.nu_above(1.0)?, &self.loc, &undefined)
    }

    /// `scale² ν / (ν - 2)` for `nu > 2`, `inf` for `1 < nu <= 2`, NaN otherwise.
    fn variance(&self) -> Result<Variable, FerrogradError> {
        let finite = self
            .scale
            .pow_scalar(2.0)?
            .mul(&self.nu)?
            .div(&self.nu.add_scalar(-2.0)?)?;
        let fallback = self.constant(|nu| if nu > 1.0 { f64::INFINITY } else { f64::NAN })?;
        where_op(&self.nu_above(2.0)?, &finite, &fallback)
    }

    /// `(ν+1)/2 (ψ((ν+1)/2) - ψ(ν/2)) + ln(√ν B(ν/2, ½)) + ln σ`.
    fn entropy(&self) -> Result<Variable, FerrogradError> {
        let half_nu = self.nu.mul_scalar(0.5)?;
        let half_nu_plus = self.nu.add_scalar(1.0)?.mul_scalar(0.5)?;
        let spread = half_nu_plus.mul(&half_nu_plus.digamma()?.sub(&half_nu.digamma()?)?)?;
        // ln B(ν/2, ½) = lnΓ(ν/2) + ½ ln π - lnΓ((ν+1)/2)
        let ln_beta = half_nu
            .lgamma()?
            .add_scalar(0.5 * PI.ln())?
            .sub(&half_nu_plus.lgamma()?)?;
        spread
            .add(&self.nu.ln()?.mul_scalar(0.5)?)?
            .add(&ln_beta)?
            .add(&self.scale.ln()?)
    }

    /// `loc + scale · t` with `t` drawn from the standard t distribution.
    fn sample_n(&self, n: usize) -> Result<Variable, FerrogradError> {
        let nu = self.nu.value()?;
        let nus = nu.to_f64_vec();
        let shape = sample_shape(&[n], nu.shape_ref());
        let samplers = nus
            .iter()
            .map(|&v| {
                rand_distr::StudentT::new(v).map_err(|e| {
                    FerrogradError::InvalidArgument(format!("StudentT sampling with nu = {}: {}", v, e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let mut rng = rand::thread_rng();
        let draws: Vec<f64> = (0..n * samplers.len())
            .map(|i| samplers[i % samplers.len()].sample(&mut rng))
            .collect();
        let t = Variable::new(Tensor::new_f64(draws, shape)?.cast(nu.dtype()));
        self.loc.add(&t.mul(&self.scale)?)
    }

    fn support(&self) -> &'static str {
        "real"
    }
}

#[cfg(test)]
#[path = "student_t_test.rs"]
mod tests;
