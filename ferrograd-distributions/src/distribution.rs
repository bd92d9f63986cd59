use std::fmt::Debug;

use ferrograd_core::{FerrogradError, Variable};

/// A batch of independent scalar distributions.
///
/// Every method returns a [`Variable`], so results that depend on the
/// parameters carry a graph back to them.
pub trait Distribution: Debug {
    /// Shape of one draw (one value per distribution in the batch).
    fn batch_shape(&self) -> Vec<usize>;

    /// Shape of a single event; scalar distributions use `[]`.
    fn event_shape(&self) -> Vec<usize> {
        Vec::new()
    }

    /// Log density (or log mass) of `x`, broadcast against the batch.
    fn log_prob(&self, x: &Variable) -> Result<Variable, FerrogradError>;

    fn prob(&self, x: &Variable) -> Result<Variable, FerrogradError> {
        self.log_prob(x)?.exp()
    }

    fn mean(&self) -> Result<Variable, FerrogradError>;

    fn variance(&self) -> Result<Variable, FerrogradError>;

    fn stddev(&self) -> Result<Variable, FerrogradError> {
        self.variance()?.sqrt()
    }

    fn entropy(&self) -> Result<Variable, FerrogradError>;

    /// Draws `n` samples, returned with shape `[n, batch_shape..]`.
    fn sample_n(&self, n: usize) -> Result<Variable, FerrogradError>;

    /// Draws samples with shape `[shape.., batch_shape..]`.
    fn sample(&self, shape: &[usize]) -> Result<Variable, FerrogradError> {
        let n = shape.iter().product();
        let draws = self.sample_n(n)?;
        draws.reshape(&sample_shape(shape, &self.batch_shape()))
    }

    /// Human-readable description of the set the distribution lives on.
    fn support(&self) -> &'static str;
}

/// `leading ++ batch`.
pub(crate) fn sample_shape(leading: &[usize], batch: &[usize]) -> Vec<usize> {
    leading.iter().chain(batch).copied().collect()
}

/// Checks that all parameters of a distribution share shape and dtype.
pub(crate) fn check_parameters(params: &[&Variable], operation: &str) -> Result<(), FerrogradError> {
    let Some((first, rest)) = params.split_first() else {
        return Ok(());
    };
    for param in rest {
        if param.shape() != first.shape() {
            return Err(FerrogradError::ShapeMismatch {
                expected: first.shape(),
                actual: param.shape(),
                operation: operation.to_string(),
            });
        }
        if param.dtype() != first.dtype() {
            return Err(FerrogradError::DTypeMismatch {
                expected: first.dtype(),
                actual: param.dtype(),
                operation: operation.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "distribution_test.rs"]
mod tests;
