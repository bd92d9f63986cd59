use super::*;
use crate::utils::testing::{check_grad_near, check_tensor_near, f64_param};

#[test]
fn test_every_name_creates_its_operation() {
    for &name in NAMES {
        let op = create(name).unwrap_or_else(|| panic!("'{}' should be in the catalog", name));
        assert_eq!(op.name(), name);
    }
    assert!(create("conv2d").is_none());
}

#[test]
fn test_apply_by_name() -> Result<(), FerrogradError> {
    let a = f64_param(vec![1.0, 2.0], vec![2]);
    let b = f64_param(vec![3.0, 4.0], vec![2]);
    let outputs = apply_by_name("mul", &[&a, &b])?;
    assert_eq!(outputs.len(), 1);
    check_tensor_near(&outputs[0].value()?, &[2], &[3.0, 8.0], 0.0);
    outputs[0].sum_all()?.backward()?;
    check_grad_near(&a, &[3.0, 4.0], 0.0);
    Ok(())
}

#[test]
fn test_apply_by_name_unknown() {
    let a = f64_param(vec![1.0], vec![1]);
    assert!(matches!(
        apply_by_name("frobnicate", &[&a]),
        Err(FerrogradError::UnsupportedOperation(_))
    ));
}

#[test]
fn test_apply_by_name_wrong_arity() {
    let a = f64_param(vec![1.0], vec![1]);
    assert!(matches!(
        apply_by_name("add", &[&a]),
        Err(FerrogradError::InvalidArgument(_))
    ));
}
