//! Finite-difference verification of backward formulas.

use approx::relative_eq;
use thiserror::Error;

use crate::autograd::engine::grad;
use crate::error::FerrogradError;
use crate::ops::arithmetic::{add_op, mul_op};
use crate::ops::reduction::sum_op;
use crate::tensor::{scalar, Tensor};
use crate::variable::Variable;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}, element {element_index}: analytical {analytical_grad:?} != numerical {numerical_grad:?}")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
    },
    #[error("Numerical gradient is NaN or infinite for input {input_index}, element {element_index} (loss+ {loss_plus:?}, loss- {loss_minus:?})")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
    #[error("Output gradient has shape {actual:?}, function output has shape {expected:?}")]
    OutputGradShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
    #[error("{expected} grad-grad inputs expected, got {actual}")]
    GradGradArity { expected: usize, actual: usize },
    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(FerrogradError),
    #[error("Backward pass execution failed during gradient check: {0}")]
    BackwardPassError(FerrogradError),
    #[error("Tensor error during intermediate calculation: {0}")]
    TensorError(FerrogradError),
}

impl From<FerrogradError> for GradCheckError {
    fn from(err: FerrogradError) -> Self {
        GradCheckError::TensorError(err)
    }
}

/// Compares the gradients computed by the engine with central finite
/// differences of `sum(func(inputs) * output_grad)`.
///
/// Every input is wrapped in a leaf that requires grad. Inputs the output
/// does not depend on must get a numerical gradient of zero. Each element is
/// accepted when `|analytical - numerical| <= atol` or the relative
/// difference is within `rtol`. Use F64 inputs: F32 rounding swamps the
/// difference quotient for small `epsilon`.
pub fn check_grad<F>(
    func: F,
    inputs: &[Tensor],
    output_grad: &Tensor,
    epsilon: f64,
    atol: f64,
    rtol: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Variable]) -> Result<Variable, FerrogradError>,
{
    let vars: Vec<Variable> = inputs.iter().cloned().map(Variable::new_requires_grad).collect();
    let output = func(&vars).map_err(GradCheckError::ForwardPassError)?;
    if output.shape() != output_grad.shape() {
        return Err(GradCheckError::OutputGradShapeMismatch {
            expected: output.shape(),
            actual: output_grad.shape(),
        });
    }

    let analytical: Vec<Option<Tensor>> = if output.requires_grad() {
        let seed = Variable::new(output_grad.clone());
        grad(&[output], &vars, &[Some(seed)], false)
            .map_err(GradCheckError::BackwardPassError)?
            .into_iter()
            .map(|g| g.map(|g| g.value()).transpose())
            .collect::<Result<_, _>>()?
    } else {
        vec![None; inputs.len()]
    };

    let weights = output_grad.to_f64_vec();
    for (i, input) in inputs.iter().enumerate() {
        let analytical_data = match &analytical[i] {
            Some(g) => g.to_f64_vec(),
            None => vec![0.0; input.numel()],
        };
        let base = input.to_f64_vec();
        for elem_idx in 0..input.numel() {
            let loss_plus = perturbed_loss(&func, inputs, i, &base, elem_idx, epsilon, &weights)?;
            let loss_minus = perturbed_loss(&func, inputs, i, &base, elem_idx, -epsilon, &weights)?;
            let numerical_grad = (loss_plus - loss_minus) / (2.0 * epsilon);
            if !numerical_grad.is_finite() {
                return Err(GradCheckError::NumericalGradNaNOrInfinite {
                    input_index: i,
                    element_index: elem_idx,
                    loss_plus,
                    loss_minus,
                });
            }
            let analytical_grad = analytical_data[elem_idx];
            if !relative_eq!(analytical_grad, numerical_grad, epsilon = atol, max_relative = rtol) {
                return Err(GradCheckError::GradientMismatch {
                    input_index: i,
                    element_index: elem_idx,
                    analytical_grad,
                    numerical_grad,
                });
            }
        }
    }
    log::debug!("gradient check passed for {} input(s)", inputs.len());
    Ok(())
}

fn perturbed_loss<F>(
    func: &F,
    inputs: &[Tensor],
    index: usize,
    base: &[f64],
    elem_idx: usize,
    delta: f64,
    weights: &[f64],
) -> Result<f64, GradCheckError>
where
    F: Fn(&[Variable]) -> Result<Variable, FerrogradError>,
{
    let mut data = base.to_vec();
    data[elem_idx] += delta;
    let perturbed = Tensor::new_f64(data, inputs[index].shape())?.cast(inputs[index].dtype());
    let vars: Vec<Variable> = inputs
        .iter()
        .enumerate()
        .map(|(j, t)| {
            let value = if j == index { perturbed.clone() } else { t.clone() };
            Variable::new_requires_grad(value)
        })
        .collect();
    let output = func(&vars)
        .map_err(GradCheckError::ForwardPassError)?
        .value()?;
    Ok(output
        .to_f64_vec()
        .iter()
        .zip(weights)
        .map(|(y, w)| y * w)
        .sum())
}

/// Checks second derivatives by running [`check_grad`] on
/// `sum_i sum(grad_i * grad_grad_inputs[i])`, where `grad_i` are the
/// first-order gradients computed with double backprop.
///
/// The output gradient is appended to the checked inputs, so the
/// dependency of the first-order gradients on it is verified too.
pub fn check_double_grad<F>(
    func: F,
    inputs: &[Tensor],
    output_grad: &Tensor,
    grad_grad_inputs: &[Tensor],
    epsilon: f64,
    atol: f64,
    rtol: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Variable]) -> Result<Variable, FerrogradError>,
{
    if grad_grad_inputs.len() != inputs.len() {
        return Err(GradCheckError::GradGradArity {
            expected: inputs.len(),
            actual: grad_grad_inputs.len(),
        });
    }
    let n = inputs.len();
    let first_order = |xs: &[Variable]| -> Result<Variable, FerrogradError> {
        let (xs, gy) = xs.split_at(n);
        let y = func(xs)?;
        let grads = grad(&[y], xs, &[Some(gy[0].clone())], true)?;
        let mut total = Variable::new(scalar(0.0, gy[0].dtype()));
        for (gx, ggx) in grads.iter().zip(grad_grad_inputs) {
            if let Some(gx) = gx {
                let term = sum_op(&mul_op(gx, &Variable::new(ggx.clone()))?, None, false)?;
                total = add_op(&total, &term)?;
            }
        }
        Ok(total)
    };
    let mut all_inputs = inputs.to_vec();
    all_inputs.push(output_grad.clone());
    check_grad(
        first_order,
        &all_inputs,
        &scalar(1.0, output_grad.dtype()),
        epsilon,
        atol,
        rtol,
    )
}

#[cfg(test)]
#[path = "grad_check_test.rs"]
mod tests;
