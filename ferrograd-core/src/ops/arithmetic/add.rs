use crate::autograd::{apply_op_single, single_grad_output, BackwardContext, Operation};
use crate::error::FerrogradError;
use crate::ops::binary_inputs;
use crate::tensor::Tensor;
use crate::variable::Variable;

/// Elementwise `a + b` with broadcasting.
#[derive(Debug)]
pub struct AddOp;

impl Operation for AddOp {
    fn name(&self) -> &'static str {
        "add"
    }

    fn forward(&self, inputs: &[Tensor]) -> Result<Vec<Tensor>, FerrogradError> {
        let (a, b) = binary_inputs(inputs, self.name())?;
        Ok(vec![a.zip_with(b, |x, y| x + y, |x, y| x + y, self.name())?])
    }

    fn backward(
        &self,
        _ctx: &BackwardContext<'_>,
        grad_outputs: &[Option<Variable>],
    ) -> Result<Vec<Option<Variable>>, FerrogradError> {
        // Broadcast axes are summed away by the engine.
        let gy = single_grad_output(grad_outputs).cloned();
        Ok(vec![gy.clone(), gy])
    }
}

/// Adds two variables elementwise, broadcasting their shapes.
///
/// # Errors
/// `BroadcastError` for incompatible shapes, `DTypeMismatch` for mixed dtypes.
pub fn add_op(a: &Variable, b: &Variable) -> Result<Variable, FerrogradError> {
    apply_op_single(AddOp, &[a, b])
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
