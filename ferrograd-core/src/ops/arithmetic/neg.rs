use crate::autograd::{apply_op_single, single_grad_output, BackwardContext, Operation};
use crate::error::FerrogradError;
use crate::ops::unary_input;
use crate::tensor::Tensor;
use crate::variable::Variable;

#[derive(Debug)]
pub struct NegOp;

impl Operation for NegOp {
    fn name(&self) -> &'static str {
        "neg"
    }

    fn forward(&self, inputs: &[Tensor]) -> Result<Vec<Tensor>, FerrogradError> {
        let x = unary_input(inputs, self.name())?;
        Ok(vec![x.map(|v| -v, |v| -v)])
    }

    fn backward(
        &self,
        _ctx: &BackwardContext<'_>,
        grad_outputs: &[Option<Variable>],
    ) -> Result<Vec<Option<Variable>>, FerrogradError> {
        match single_grad_output(grad_outputs) {
            Some(gy) => Ok(vec![Some(neg_op(gy)?)]),
            None => Ok(vec![None]),
        }
    }
}

pub fn neg_op(x: &Variable) -> Result<Variable, FerrogradError> {
    apply_op_single(NegOp, &[x])
}

#[cfg(test)]
#[path = "neg_test.rs"]
mod tests;
