use super::*;
use crate::ops::arithmetic::{add_op, mul_op};
use crate::utils::testing::{check_grad_near, check_tensor_near, f64_const, f64_param};

#[test]
fn test_requires_grad_only_on_leaves() -> Result<(), FerrogradError> {
    let a = f64_const(vec![1.0], vec![1]);
    assert!(!a.requires_grad());
    a.requires_grad_(true)?;
    assert!(a.requires_grad());

    let b = add_op(&a, &a)?;
    assert_eq!(b.requires_grad_(false), Err(FerrogradError::RequiresGradOnNonLeaf));
    Ok(())
}

#[test]
fn test_set_grad_checks_shape() -> Result<(), FerrogradError> {
    let a = f64_param(vec![1.0, 2.0], vec![2]);
    a.set_grad(Tensor::new_f64(vec![0.5, 0.5], vec![2])?)?;
    check_grad_near(&a, &[0.5, 0.5], 0.0);
    assert!(matches!(
        a.set_grad(Tensor::new_f64(vec![0.5], vec![1])?),
        Err(FerrogradError::ShapeMismatch { .. })
    ));
    Ok(())
}

#[test]
fn test_grad_with_released_value_is_distinguishable() -> Result<(), FerrogradError> {
    let a = f64_param(vec![1.0, 2.0], vec![2]);
    a.set_grad(Tensor::new_f64(vec![0.5, 0.5], vec![2])?)?;
    let g = a.grad_var().expect("gradient was set");
    g.release_value();

    assert!(a.grad().is_none());
    let kept = a.grad_var().expect("gradient variable is kept");
    assert!(matches!(kept.value(), Err(FerrogradError::UninitializedValue { .. })));
    Ok(())
}

#[test]
fn test_accumulate_grad_adds_and_reduces() -> Result<(), FerrogradError> {
    let a = f64_param(vec![1.0, 2.0], vec![2]);
    a.accumulate_grad(&f64_const(vec![1.0, 2.0], vec![2]))?;
    a.accumulate_grad(&f64_const(vec![10.0, 20.0, 30.0, 40.0], vec![2, 2]))?;
    check_grad_near(&a, &[41.0, 62.0], 1e-12);

    let err = a.accumulate_grad(&f64_const(vec![1.0, 2.0, 3.0], vec![3]));
    assert_eq!(
        err,
        Err(FerrogradError::GradientAccumulationShapeMismatch {
            expected: vec![2],
            actual: vec![3],
        })
    );
    Ok(())
}

#[test]
fn test_zero_grad_is_idempotent() -> Result<(), FerrogradError> {
    let a = f64_param(vec![1.0], vec![1]);
    let y = mul_op(&a, &a)?;
    y.backward()?;
    assert!(a.grad().is_some());
    a.zero_grad();
    a.zero_grad();
    assert!(a.grad().is_none());
    Ok(())
}

#[test]
fn test_detach_cuts_the_graph() -> Result<(), FerrogradError> {
    let a = f64_param(vec![3.0], vec![1]);
    let h = mul_op(&a, &a)?.with_name("h");
    let d = h.detach()?;
    assert!(d.is_leaf());
    assert!(!d.requires_grad());
    assert_eq!(d.name().as_deref(), Some("h"));
    check_tensor_near(&d.value()?, &[1], &[9.0], 0.0);

    // y = h * detach(h): only the first factor carries gradient.
    let y = mul_op(&h, &d)?;
    y.backward()?;
    check_grad_near(&a, &[54.0], 1e-12);
    Ok(())
}
