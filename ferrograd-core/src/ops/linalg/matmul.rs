use crate::autograd::{apply_op_single, single_grad_output, BackwardContext, Operation};
use crate::error::FerrogradError;
use crate::ops::binary_inputs;
use crate::ops::view::transpose_op;
use crate::tensor::Tensor;
use crate::variable::Variable;

/// Matrix product of two 2-D variables.
#[derive(Debug)]
pub struct MatmulOp;

impl Operation for MatmulOp {
    fn name(&self) -> &'static str {
        "matmul"
    }

    fn forward(&self, inputs: &[Tensor]) -> Result<Vec<Tensor>, FerrogradError> {
        let (a, b) = binary_inputs(inputs, self.name())?;
        Ok(vec![a.matmul(b)?])
    }

    fn backward(
        &self,
        ctx: &BackwardContext<'_>,
        grad_outputs: &[Option<Variable>],
    ) -> Result<Vec<Option<Variable>>, FerrogradError> {
        let Some(gy) = single_grad_output(grad_outputs) else {
            return Ok(vec![None, None]);
        };
        let a = ctx.input(0)?;
        let b = ctx.input(1)?;
        // grad_a = gy @ b^T, grad_b = a^T @ gy
        let grad_a = if a.requires_grad() {
            Some(matmul_op(gy, &transpose_op(b, None)?)?)
        } else {
            None
        };
        let grad_b = if b.requires_grad() {
            Some(matmul_op(&transpose_op(a, None)?, gy)?)
        } else {
            None
        };
        Ok(vec![grad_a, grad_b])
    }
}

/// `[m, k] x [k, n] -> [m, n]`.
pub fn matmul_op(a: &Variable, b: &Variable) -> Result<Variable, FerrogradError> {
    apply_op_single(MatmulOp, &[a, b])
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
