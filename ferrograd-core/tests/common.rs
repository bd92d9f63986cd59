use ferrograd_core::{Tensor, Variable};

/// Routes `log` output through the test harness. Safe to call from every test.
#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[allow(dead_code)]
pub fn tensor(data: Vec<f64>, shape: Vec<usize>) -> Tensor {
    Tensor::new_f64(data, shape).expect("Test tensor creation failed")
}

/// F64 leaf that requires grad.
#[allow(dead_code)]
pub fn param(data: Vec<f64>, shape: Vec<usize>) -> Variable {
    Variable::new_requires_grad(tensor(data, shape))
}

#[allow(dead_code)]
pub fn grad_values(var: &Variable) -> Vec<f64> {
    var.grad().expect("variable has no gradient").to_f64_vec()
}
