use ferrograd_core::{Tensor, Variable};

#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Constant F64 vector.
#[allow(dead_code)]
pub fn constant(data: Vec<f64>) -> Variable {
    let n = data.len();
    Variable::new(Tensor::new_f64(data, vec![n]).expect("Test tensor creation failed"))
}

/// F64 vector leaf that requires grad.
#[allow(dead_code)]
pub fn param(data: Vec<f64>) -> Variable {
    let n = data.len();
    Variable::new_requires_grad(Tensor::new_f64(data, vec![n]).expect("Test tensor creation failed"))
}

#[allow(dead_code)]
pub fn scalar_of(var: &Variable) -> f64 {
    var.value().expect("value").item().expect("scalar")
}
