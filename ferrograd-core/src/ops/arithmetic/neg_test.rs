use super::*;
use crate::autograd::grad_check::{check_double_grad, check_grad, GradCheckError};
use crate::utils::testing::{check_tensor_near, f64_tensor};

#[test]
fn test_neg_forward() -> Result<(), FerrogradError> {
    let a = Variable::from_vec_f32(vec![1.0, -2.0, 0.0], vec![3])?;
    check_tensor_near(&neg_op(&a)?.value()?, &[3], &[-1.0, 2.0, 0.0], 0.0);
    Ok(())
}

#[test]
fn test_neg_check_grad() -> Result<(), GradCheckError> {
    let x = f64_tensor(vec![1.0, -2.0, 0.5, 4.0], vec![2, 2]);
    let gy = f64_tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    check_grad(|xs| neg_op(&xs[0]), &[x], &gy, 1e-6, 1e-7, 1e-5)
}

#[test]
fn test_neg_check_double_grad() -> Result<(), GradCheckError> {
    let x = f64_tensor(vec![1.0, -2.0], vec![2]);
    let gy = f64_tensor(vec![0.5, 1.5], vec![2]);
    let ggx = f64_tensor(vec![2.0, -1.0], vec![2]);
    check_double_grad(|xs| neg_op(&xs[0]), &[x], &gy, &[ggx], 1e-6, 1e-7, 1e-5)
}
