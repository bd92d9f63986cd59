use crate::tensor::Tensor;
use crate::variable::Variable;

/// Checks that two tensors are approximately equal (shape and data within
/// `tolerance`). Works for both dtypes by comparing in f64.
///
/// Panics on mismatch, so it is meant for tests.
pub fn check_tensor_near(actual: &Tensor, expected_shape: &[usize], expected_data: &[f64], tolerance: f64) {
    assert_eq!(actual.shape(), expected_shape, "Shape mismatch");
    let actual_data = actual.to_f64_vec();
    assert_eq!(actual_data.len(), expected_data.len(), "Data length mismatch");
    for (i, (a, e)) in actual_data.iter().zip(expected_data).enumerate() {
        let diff = (a - e).abs();
        let both_nan = a.is_nan() && e.is_nan();
        let same_infinity = a.is_infinite() && a == e;
        if !(both_nan || same_infinity || diff <= tolerance) {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}

/// [`check_tensor_near`] on the gradient of `var`. Panics if it has none.
pub fn check_grad_near(var: &Variable, expected_data: &[f64], tolerance: f64) {
    let grad = var.grad().expect("variable has no gradient");
    check_tensor_near(&grad, &var.shape(), expected_data, tolerance);
}

/// F64 leaf that requires grad.
pub fn f64_param(data: Vec<f64>, shape: Vec<usize>) -> Variable {
    Variable::new_requires_grad(Tensor::new_f64(data, shape).expect("Failed to create test tensor"))
}

/// F64 leaf that does not require grad.
pub fn f64_const(data: Vec<f64>, shape: Vec<usize>) -> Variable {
    Variable::new(Tensor::new_f64(data, shape).expect("Failed to create test tensor"))
}

/// F64 tensor, panicking on a data/shape mismatch.
pub fn f64_tensor(data: Vec<f64>, shape: Vec<usize>) -> Tensor {
    Tensor::new_f64(data, shape).expect("Failed to create test tensor")
}
