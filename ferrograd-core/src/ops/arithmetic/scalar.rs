//! Arithmetic with a constant operand. The constant is a shape-`[]` leaf of
//! the variable's dtype, so it broadcasts and never requires grad.

use crate::error::FerrogradError;
use crate::ops::arithmetic::{add_op, div_op, mul_op, sub_op};
use crate::tensor::scalar;
use crate::variable::Variable;

pub(crate) fn constant_like(x: &Variable, value: f64) -> Variable {
    Variable::new(scalar(value, x.dtype()))
}

/// `x + c`
pub fn add_scalar(x: &Variable, c: f64) -> Result<Variable, FerrogradError> {
    add_op(x, &constant_like(x, c))
}

/// `x * c`
pub fn mul_scalar(x: &Variable, c: f64) -> Result<Variable, FerrogradError> {
    mul_op(x, &constant_like(x, c))
}

/// `c - x`
pub fn rsub_scalar(c: f64, x: &Variable) -> Result<Variable, FerrogradError> {
    sub_op(&constant_like(x, c), x)
}

/// `x / c`
pub fn div_scalar(x: &Variable, c: f64) -> Result<Variable, FerrogradError> {
    div_op(x, &constant_like(x, c))
}
