use super::*;
use crate::autograd::grad_check::{check_double_grad, check_grad, GradCheckError};
use crate::utils::testing::{check_grad_near, check_tensor_near, f64_param, f64_tensor};

#[test]
fn test_relu_forward() -> Result<(), FerrogradError> {
    let x = Variable::from_vec_f32(vec![-1.0, 0.0, 2.5], vec![3])?;
    check_tensor_near(&relu_op(&x)?.value()?, &[3], &[0.0, 0.0, 2.5], 0.0);
    Ok(())
}

#[test]
fn test_relu_gradient_at_zero_is_zero() -> Result<(), FerrogradError> {
    let x = f64_param(vec![-1.0, 0.0, 2.0], vec![3]);
    relu_op(&x)?.sum_all()?.backward()?;
    check_grad_near(&x, &[0.0, 0.0, 1.0], 0.0);
    Ok(())
}

#[test]
fn test_relu_check_grad() -> Result<(), GradCheckError> {
    let x = f64_tensor(vec![-1.5, -0.2, 0.3, 2.0], vec![2, 2]);
    let gy = f64_tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    check_grad(|xs| relu_op(&xs[0]), &[x], &gy, 1e-6, 1e-7, 1e-5)
}

#[test]
fn test_relu_check_double_grad() -> Result<(), GradCheckError> {
    let x = f64_tensor(vec![-1.5, 0.3], vec![2]);
    let gy = f64_tensor(vec![1.0, 2.0], vec![2]);
    let ggx = f64_tensor(vec![0.5, -0.5], vec![2]);
    check_double_grad(|xs| relu_op(&xs[0]), &[x], &gy, &[ggx], 1e-6, 1e-7, 1e-5)
}
