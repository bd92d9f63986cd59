//! Method forms of the catalog operations.

use crate::error::FerrogradError;
use crate::ops::activation::relu_op;
use crate::ops::arithmetic::{
    add_op, add_scalar, div_op, div_scalar, mul_op, mul_scalar, neg_op, pow_scalar_op, sub_op,
};
use crate::ops::linalg::matmul_op;
use crate::ops::math_elem::{
    digamma_op, exp_op, lgamma_op, ln_op, polygamma_n_op, sigmoid_op, sqrt_op, tanh_op,
};
use crate::ops::reduction::{mean_op, sum_op};
use crate::ops::view::{broadcast_to_op, reshape_op, sum_to_op, transpose_op};
use crate::variable::Variable;

impl Variable {
    pub fn add(&self, other: &Variable) -> Result<Variable, FerrogradError> {
        add_op(self, other)
    }

    pub fn sub(&self, other: &Variable) -> Result<Variable, FerrogradError> {
        sub_op(self, other)
    }

    pub fn mul(&self, other: &Variable) -> Result<Variable, FerrogradError> {
        mul_op(self, other)
    }

    pub fn div(&self, other: &Variable) -> Result<Variable, FerrogradError> {
        div_op(self, other)
    }

    pub fn neg(&self) -> Result<Variable, FerrogradError> {
        neg_op(self)
    }

    pub fn add_scalar(&self, c: f64) -> Result<Variable, FerrogradError> {
        add_scalar(self, c)
    }

    pub fn mul_scalar(&self, c: f64) -> Result<Variable, FerrogradError> {
        mul_scalar(self, c)
    }

    pub fn div_scalar(&self, c: f64) -> Result<Variable, FerrogradError> {
        div_scalar(self, c)
    }

    pub fn pow_scalar(&self, exponent: f64) -> Result<Variable, FerrogradError> {
        pow_scalar_op(self, exponent)
    }

    pub fn exp(&self) -> Result<Variable, FerrogradError> {
        exp_op(self)
    }

    pub fn ln(&self) -> Result<Variable, FerrogradError> {
        ln_op(self)
    }

    pub fn sqrt(&self) -> Result<Variable, FerrogradError> {
        sqrt_op(self)
    }

    pub fn tanh(&self) -> Result<Variable, FerrogradError> {
        tanh_op(self)
    }

    pub fn sigmoid(&self) -> Result<Variable, FerrogradError> {
        sigmoid_op(self)
    }

    pub fn relu(&self) -> Result<Variable, FerrogradError> {
        relu_op(self)
    }

    pub fn lgamma(&self) -> Result<Variable, FerrogradError> {
        lgamma_op(self)
    }

    pub fn digamma(&self) -> Result<Variable, FerrogradError> {
        digamma_op(self)
    }

    pub fn polygamma(&self, n: u32) -> Result<Variable, FerrogradError> {
        polygamma_n_op(n, self)
    }

    /// Sums over `axes`, or over everything when `None`.
    pub fn sum(&self, axes: Option<&[usize]>, keep_dims: bool) -> Result<Variable, FerrogradError> {
        sum_op(self, axes, keep_dims)
    }

    /// Sum of all elements as a shape-`[]` variable.
    pub fn sum_all(&self) -> Result<Variable, FerrogradError> {
        sum_op(self, None, false)
    }

    pub fn mean(&self, axes: Option<&[usize]>, keep_dims: bool) -> Result<Variable, FerrogradError> {
        mean_op(self, axes, keep_dims)
    }

    pub fn broadcast_to(&self, shape: &[usize]) -> Result<Variable, FerrogradError> {
        broadcast_to_op(self, shape)
    }

    pub fn sum_to(&self, shape: &[usize]) -> Result<Variable, FerrogradError> {
        sum_to_op(self, shape)
    }

    pub fn reshape(&self, shape: &[usize]) -> Result<Variable, FerrogradError> {
        reshape_op(self, shape)
    }

    pub fn transpose(&self, perm: Option<&[usize]>) -> Result<Variable, FerrogradError> {
        transpose_op(self, perm)
    }

    pub fn matmul(&self, other: &Variable) -> Result<Variable, FerrogradError> {
        matmul_op(self, other)
    }
}
