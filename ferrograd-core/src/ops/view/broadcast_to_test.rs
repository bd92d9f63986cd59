use super::*;
use crate::autograd::grad_check::{check_double_grad, check_grad, GradCheckError};
use crate::utils::testing::{check_grad_near, check_tensor_near, f64_param, f64_tensor};

#[test]
fn test_broadcast_to_forward() -> Result<(), FerrogradError> {
    let x = Variable::new(f64_tensor(vec![1.0, 2.0], vec![2, 1]));
    let y = broadcast_to_op(&x, &[2, 3])?;
    check_tensor_near(&y.value()?, &[2, 3], &[1.0, 1.0, 1.0, 2.0, 2.0, 2.0], 0.0);
    Ok(())
}

#[test]
fn test_broadcast_to_same_shape_is_identity() -> Result<(), FerrogradError> {
    let x = f64_param(vec![1.0, 2.0], vec![2]);
    let y = broadcast_to_op(&x, &[2])?;
    assert_eq!(y.id(), x.id());
    Ok(())
}

#[test]
fn test_broadcast_to_incompatible() {
    let x = Variable::new(f64_tensor(vec![1.0, 2.0], vec![2]));
    assert!(matches!(
        broadcast_to_op(&x, &[3]),
        Err(FerrogradError::BroadcastError { .. })
    ));
}

#[test]
fn test_broadcast_to_backward_sums() -> Result<(), FerrogradError> {
    let x = f64_param(vec![1.0, 2.0], vec![2]);
    broadcast_to_op(&x, &[3, 2])?.sum_all()?.backward()?;
    check_grad_near(&x, &[3.0, 3.0], 0.0);
    Ok(())
}

#[test]
fn test_broadcast_to_check_grad() -> Result<(), GradCheckError> {
    let x = f64_tensor(vec![1.0, -2.0, 3.0], vec![1, 3]);
    let gy = f64_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
    check_grad(|xs| broadcast_to_op(&xs[0], &[2, 3]), &[x], &gy, 1e-6, 1e-7, 1e-5)
}

#[test]
fn test_broadcast_to_check_double_grad() -> Result<(), GradCheckError> {
    let x = f64_tensor(vec![1.0, -2.0], vec![2]);
    let gy = f64_tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    let ggx = f64_tensor(vec![0.5, -0.5], vec![2]);
    check_double_grad(|xs| broadcast_to_op(&xs[0], &[2, 2]), &[x], &gy, &[ggx], 1e-6, 1e-7, 1e-5)
}
