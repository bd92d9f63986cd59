//! # Operation catalog (`ops`)
//!
//! Every differentiable step lives here as a struct implementing
//! [`Operation`](crate::autograd::Operation) plus an `xxx_op` function that
//! applies it to `Variable`s.
//!
//! ## Structure:
//!
//! - **`_op` functions** run the forward eagerly and record the node (see
//!   [`apply_op`](crate::autograd::apply_op)). `Variable` methods delegate to them.
//! - **Backward formulas** are written with the same `_op` functions, so
//!   every entry can be differentiated twice.
//! - [`catalog`] maps operation names to constructors.
//!
//! ## Key Submodules:
//!
//! - [`arithmetic`]: add, sub, mul, div, neg, scalar power and scalar helpers.
//! - [`math_elem`]: exp, ln, sqrt, tanh, sigmoid and the gamma family.
//! - [`activation`]: relu.
//! - [`comparison`]: where.
//! - [`reduction`]: sum and mean.
//! - [`view`]: broadcast_to, sum_to, reshape, transpose.
//! - [`linalg`]: 2-D matmul.

use crate::error::FerrogradError;
use crate::tensor::Tensor;

pub mod activation;
pub mod arithmetic;
pub mod catalog;
pub mod comparison;
pub mod linalg;
pub mod math_elem;
pub mod reduction;
pub mod view;

/// Checks the arity of a unary forward.
pub(crate) fn unary_input<'a>(inputs: &'a [Tensor], operation: &str) -> Result<&'a Tensor, FerrogradError> {
    match inputs {
        [x] => Ok(x),
        _ => Err(arity_error(operation, 1, inputs.len())),
    }
}

/// Checks the arity of a binary forward.
pub(crate) fn binary_inputs<'a>(
    inputs: &'a [Tensor],
    operation: &str,
) -> Result<(&'a Tensor, &'a Tensor), FerrogradError> {
    match inputs {
        [a, b] => Ok((a, b)),
        _ => Err(arity_error(operation, 2, inputs.len())),
    }
}

fn arity_error(operation: &str, expected: usize, actual: usize) -> FerrogradError {
    FerrogradError::InvalidArgument(format!(
        "'{}' expects {} input(s), got {}",
        operation, expected, actual
    ))
}
