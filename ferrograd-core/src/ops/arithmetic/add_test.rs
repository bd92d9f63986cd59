use super::*;
use crate::autograd::grad_check::{check_double_grad, check_grad, GradCheckError};
use crate::utils::testing::{check_grad_near, check_tensor_near, f64_param, f64_tensor};

#[test]
fn test_add_forward() -> Result<(), FerrogradError> {
    let a = Variable::from_vec_f32(vec![1.0, 2.0, 3.0], vec![3])?;
    let b = Variable::from_vec_f32(vec![10.0, 20.0, 30.0], vec![3])?;
    let c = add_op(&a, &b)?;
    check_tensor_near(&c.value()?, &[3], &[11.0, 22.0, 33.0], 1e-6);
    Ok(())
}

#[test]
fn test_add_broadcasting() -> Result<(), FerrogradError> {
    let matrix = Variable::from_vec_f64(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2])?;
    let row = Variable::from_vec_f64(vec![10.0, 20.0], vec![2])?;
    let c = add_op(&matrix, &row)?;
    check_tensor_near(&c.value()?, &[2, 2], &[11.0, 22.0, 13.0, 24.0], 1e-12);
    Ok(())
}

#[test]
fn test_add_incompatible_shapes() -> Result<(), FerrogradError> {
    let a = Variable::from_vec_f64(vec![1.0, 2.0], vec![2])?;
    let b = Variable::from_vec_f64(vec![1.0, 2.0, 3.0], vec![3])?;
    assert!(matches!(add_op(&a, &b), Err(FerrogradError::BroadcastError { .. })));
    Ok(())
}

#[test]
fn test_add_dtype_mismatch() -> Result<(), FerrogradError> {
    let a = Variable::from_vec_f32(vec![1.0], vec![1])?;
    let b = Variable::from_vec_f64(vec![1.0], vec![1])?;
    assert!(matches!(add_op(&a, &b), Err(FerrogradError::DTypeMismatch { .. })));
    Ok(())
}

#[test]
fn test_add_backward_broadcast_sums_gradient() -> Result<(), FerrogradError> {
    let a = f64_param(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
    let b = f64_param(vec![1.0, 2.0, 3.0], vec![3]);
    let c = add_op(&a, &b)?;
    c.backward_with(Some(f64_tensor(vec![1.0; 6], vec![2, 3])), Default::default())?;
    check_grad_near(&a, &[1.0; 6], 1e-12);
    check_grad_near(&b, &[2.0, 2.0, 2.0], 1e-12);
    Ok(())
}

#[test]
fn test_add_check_grad() -> Result<(), GradCheckError> {
    let a = f64_tensor(vec![0.5, -1.0, 2.0, 3.5, 0.0, 1.0], vec![2, 3]);
    let b = f64_tensor(vec![1.0, 2.0, 3.0], vec![1, 3]);
    let gy = f64_tensor(vec![0.1, 0.2, 0.3, -0.4, 0.5, 0.6], vec![2, 3]);
    check_grad(|xs| add_op(&xs[0], &xs[1]), &[a, b], &gy, 1e-6, 1e-7, 1e-5)
}

#[test]
fn test_add_check_double_grad() -> Result<(), GradCheckError> {
    let a = f64_tensor(vec![0.5, -1.0, 2.0, 3.5], vec![2, 2]);
    let b = f64_tensor(vec![1.0, 2.0], vec![2]);
    let gy = f64_tensor(vec![0.1, 0.2, 0.3, -0.4], vec![2, 2]);
    let gga = f64_tensor(vec![1.0, -1.0, 0.5, 2.0], vec![2, 2]);
    let ggb = f64_tensor(vec![0.3, 0.7], vec![2]);
    check_double_grad(
        |xs| add_op(&xs[0], &xs[1]),
        &[a, b],
        &gy,
        &[gga, ggb],
        1e-6,
        1e-7,
        1e-5,
    )
}
