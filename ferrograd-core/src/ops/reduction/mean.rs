use crate::error::FerrogradError;
use crate::ops::arithmetic::mul_scalar;
use crate::ops::reduction::sum_op;
use crate::tensor::utils::normalize_axes;
use crate::variable::Variable;

/// Mean over `axes` (all axes when `None`), built as `sum * (1 / count)`.
pub fn mean_op(x: &Variable, axes: Option<&[usize]>, keep_dims: bool) -> Result<Variable, FerrogradError> {
    let shape = x.shape();
    let count: usize = match axes {
        Some(axes) => normalize_axes(axes, shape.len())?
            .iter()
            .map(|&a| shape[a])
            .product(),
        None => shape.iter().product(),
    };
    if count == 0 {
        return Err(FerrogradError::InvalidArgument(
            "mean over an empty set of elements".to_string(),
        ));
    }
    let sum = sum_op(x, axes, keep_dims)?;
    mul_scalar(&sum, 1.0 / count as f64)
}

#[cfg(test)]
#[path = "mean_test.rs"]
mod tests;
