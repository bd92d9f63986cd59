use super::*;
use crate::autograd::grad_check::{check_double_grad, check_grad, GradCheckError};
use crate::utils::testing::{check_grad_near, check_tensor_near, f64_param, f64_tensor};

fn matrix() -> Variable {
    Variable::new(f64_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]))
}

#[test]
fn test_sum_all() -> Result<(), FerrogradError> {
    let y = sum_op(&matrix(), None, false)?;
    check_tensor_near(&y.value()?, &[], &[21.0], 0.0);
    let kept = sum_op(&matrix(), None, true)?;
    check_tensor_near(&kept.value()?, &[1, 1], &[21.0], 0.0);
    Ok(())
}

#[test]
fn test_sum_axes() -> Result<(), FerrogradError> {
    check_tensor_near(&sum_op(&matrix(), Some(&[0]), false)?.value()?, &[3], &[5.0, 7.0, 9.0], 0.0);
    check_tensor_near(&sum_op(&matrix(), Some(&[1]), true)?.value()?, &[2, 1], &[6.0, 15.0], 0.0);
    check_tensor_near(&sum_op(&matrix(), Some(&[1, 0]), false)?.value()?, &[], &[21.0], 0.0);
    Ok(())
}

#[test]
fn test_sum_empty_axes_is_identity() -> Result<(), FerrogradError> {
    let y = sum_op(&matrix(), Some(&[]), false)?;
    check_tensor_near(&y.value()?, &[2, 3], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 0.0);
    Ok(())
}

#[test]
fn test_sum_invalid_axis() {
    let result = sum_op(&matrix(), Some(&[2]), false);
    assert_eq!(result.err(), Some(FerrogradError::InvalidAxis { axis: 2, rank: 2 }));
}

#[test]
fn test_sum_backward_broadcasts_gradient() -> Result<(), FerrogradError> {
    let x = f64_param(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
    let y = sum_op(&x, Some(&[1]), false)?;
    y.backward_with(Some(f64_tensor(vec![1.0, 10.0], vec![2])), Default::default())?;
    check_grad_near(&x, &[1.0, 1.0, 1.0, 10.0, 10.0, 10.0], 0.0);
    Ok(())
}

#[test]
fn test_sum_check_grad() -> Result<(), GradCheckError> {
    let x = f64_tensor(vec![1.0, -2.0, 3.0, 0.5, 4.0, -1.0], vec![2, 3]);
    let gy = f64_tensor(vec![0.5, -1.0], vec![2, 1]);
    check_grad(|xs| sum_op(&xs[0], Some(&[1]), true), &[x], &gy, 1e-6, 1e-7, 1e-5)
}

#[test]
fn test_sum_check_double_grad() -> Result<(), GradCheckError> {
    let x = f64_tensor(vec![1.0, -2.0, 3.0, 0.5], vec![2, 2]);
    let gy = f64_tensor(vec![0.5, -1.0], vec![2]);
    let ggx = f64_tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    check_double_grad(|xs| sum_op(&xs[0], Some(&[0]), false), &[x], &gy, &[ggx], 1e-6, 1e-7, 1e-5)
}
