use super::*;
use crate::autograd::grad_check::{check_double_grad, check_grad, GradCheckError};
use crate::utils::testing::{check_grad_near, check_tensor_near, f64_const, f64_param, f64_tensor};

#[test]
fn test_mul_forward_broadcast() -> Result<(), FerrogradError> {
    let matrix = Variable::from_vec_f32(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2])?;
    let row = Variable::from_vec_f32(vec![10.0, 20.0], vec![1, 2])?;
    let c = mul_op(&matrix, &row)?;
    check_tensor_near(&c.value()?, &[2, 2], &[10.0, 40.0, 30.0, 80.0], 1e-6);
    Ok(())
}

#[test]
fn test_mul_skips_constant_input() -> Result<(), FerrogradError> {
    let a = f64_param(vec![1.0, 2.0], vec![2]);
    let b = f64_const(vec![3.0, 4.0], vec![2]);
    let y = mul_op(&a, &b)?.sum_all()?;
    y.backward()?;
    check_grad_near(&a, &[3.0, 4.0], 1e-12);
    assert!(b.grad().is_none());
    Ok(())
}

#[test]
fn test_mul_check_grad_broadcast() -> Result<(), GradCheckError> {
    let a = f64_tensor(vec![1.0, 2.0], vec![1, 2]);
    let b = f64_tensor(vec![3.0, 4.0], vec![2, 1]);
    let gy = f64_tensor(vec![0.1, 0.2, 0.3, 0.4], vec![2, 2]);
    check_grad(|xs| mul_op(&xs[0], &xs[1]), &[a, b], &gy, 1e-6, 1e-7, 1e-5)
}

#[test]
fn test_mul_check_double_grad() -> Result<(), GradCheckError> {
    let a = f64_tensor(vec![1.0, -2.0, 0.5], vec![3]);
    let b = f64_tensor(vec![3.0], vec![1]);
    let gy = f64_tensor(vec![0.1, 0.2, -0.3], vec![3]);
    let gga = f64_tensor(vec![1.0, 0.5, -0.5], vec![3]);
    let ggb = f64_tensor(vec![2.0], vec![1]);
    check_double_grad(|xs| mul_op(&xs[0], &xs[1]), &[a, b], &gy, &[gga, ggb], 1e-6, 1e-7, 1e-5)
}
