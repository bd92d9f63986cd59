use super::*;
use crate::autograd::grad_check::{check_double_grad, check_grad, GradCheckError};
use crate::utils::testing::{check_grad_near, check_tensor_near, f64_param, f64_tensor};

#[test]
fn test_sigmoid_forward() -> Result<(), FerrogradError> {
    let x = Variable::from_vec_f64(vec![0.0, 2.0, -3.0], vec![3])?;
    check_tensor_near(
        &sigmoid_op(&x)?.value()?,
        &[3],
        &[0.5, 0.8807970779778823, 0.04742587317756678],
        1e-12,
    );
    Ok(())
}

#[test]
fn test_sigmoid_extreme_inputs_are_finite() -> Result<(), FerrogradError> {
    let x = Variable::from_vec_f64(vec![-800.0, 800.0], vec![2])?;
    check_tensor_near(&sigmoid_op(&x)?.value()?, &[2], &[0.0, 1.0], 1e-12);
    Ok(())
}

#[test]
fn test_sigmoid_backward_at_zero() -> Result<(), FerrogradError> {
    let x = f64_param(vec![0.0], vec![1]);
    sigmoid_op(&x)?.backward()?;
    check_grad_near(&x, &[0.25], 1e-12);
    Ok(())
}

#[test]
fn test_sigmoid_check_grad() -> Result<(), GradCheckError> {
    let x = f64_tensor(vec![-2.0, -0.5, 0.0, 3.0], vec![2, 2]);
    let gy = f64_tensor(vec![1.0, 2.0, -1.0, 0.5], vec![2, 2]);
    check_grad(|xs| sigmoid_op(&xs[0]), &[x], &gy, 1e-6, 1e-7, 1e-5)
}

#[test]
fn test_sigmoid_check_double_grad() -> Result<(), GradCheckError> {
    let x = f64_tensor(vec![-1.0, 0.8], vec![2]);
    let gy = f64_tensor(vec![1.0, -0.5], vec![2]);
    let ggx = f64_tensor(vec![0.2, 1.0], vec![2]);
    check_double_grad(|xs| sigmoid_op(&xs[0]), &[x], &gy, &[ggx], 1e-6, 1e-6, 1e-5)
}
