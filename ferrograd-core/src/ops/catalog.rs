//! Name-based construction of catalog operations.

use crate::autograd::{apply_boxed_op, Operation};
use crate::error::FerrogradError;
use crate::ops::activation::relu::ReluOp;
use crate::ops::arithmetic::{add::AddOp, div::DivOp, mul::MulOp, neg::NegOp, sub::SubOp};
use crate::ops::linalg::matmul::MatmulOp;
use crate::ops::math_elem::{
    exp::ExpOp,
    gamma::{DigammaOp, LgammaOp, PolygammaOp},
    ln::LnOp,
    sigmoid::SigmoidOp,
    sqrt::SqrtOp,
    tanh::TanhOp,
};
use crate::variable::Variable;

/// Names accepted by [`create`] and [`apply_by_name`].
pub const NAMES: &[&str] = &[
    "add", "sub", "mul", "div", "neg", "exp", "ln", "sqrt", "tanh", "sigmoid", "lgamma",
    "digamma", "polygamma", "relu", "matmul",
];

/// Creates the parameterless operation called `name`.
pub fn create(name: &str) -> Option<Box<dyn Operation>> {
    let op: Box<dyn Operation> = match name {
        "add" => Box::new(AddOp),
        "sub" => Box::new(SubOp),
        "mul" => Box::new(MulOp),
        "div" => Box::new(DivOp),
        "neg" => Box::new(NegOp),
        "exp" => Box::new(ExpOp),
        "ln" => Box::new(LnOp),
        "sqrt" => Box::new(SqrtOp),
        "tanh" => Box::new(TanhOp),
        "sigmoid" => Box::new(SigmoidOp),
        "lgamma" => Box::new(LgammaOp),
        "digamma" => Box::new(DigammaOp),
        "polygamma" => Box::new(PolygammaOp),
        "relu" => Box::new(ReluOp),
        "matmul" => Box::new(MatmulOp),
        _ => return None,
    };
    Some(op)
}

/// Applies the operation called `name` to `inputs`.
///
/// # Errors
/// `UnsupportedOperation` for unknown names; otherwise whatever the
/// operation's forward reports (including arity errors).
pub fn apply_by_name(name: &str, inputs: &[&Variable]) -> Result<Vec<Variable>, FerrogradError> {
    let op = create(name)
        .ok_or_else(|| FerrogradError::UnsupportedOperation(format!("unknown operation '{}'", name)))?;
    apply_boxed_op(op, inputs)
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
