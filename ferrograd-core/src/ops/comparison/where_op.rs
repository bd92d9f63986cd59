use crate::autograd::{apply_op_single, single_grad_output, BackwardContext, Operation};
use crate::error::FerrogradError;
use crate::ops::binary_inputs;
use crate::tensor::{scalar, Tensor};
use crate::variable::Variable;

/// Elementwise select between two variables under a constant condition
/// (non-zero means "take the first").
#[derive(Debug)]
pub struct WhereOp {
    condition: Tensor,
}

impl Operation for WhereOp {
    fn name(&self) -> &'static str {
        "where"
    }

    fn forward(&self, inputs: &[Tensor]) -> Result<Vec<Tensor>, FerrogradError> {
        let (a, b) = binary_inputs(inputs, self.name())?;
        Ok(vec![Tensor::where_select(&self.condition, a, b)?])
    }

    fn backward(
        &self,
        ctx: &BackwardContext<'_>,
        grad_outputs: &[Option<Variable>],
    ) -> Result<Vec<Option<Variable>>, FerrogradError> {
        let Some(gy) = single_grad_output(grad_outputs) else {
            return Ok(vec![None, None]);
        };
        // Routing through `where` again keeps non-finite gradients of the
        // unselected branch out of the result.
        let zero = Variable::new(scalar(0.0, gy.dtype()));
        let grad_a = if ctx.input(0)?.requires_grad() {
            Some(where_op(&self.condition, gy, &zero)?)
        } else {
            None
        };
        let grad_b = if ctx.input(1)?.requires_grad() {
            Some(where_op(&self.condition, &zero, gy)?)
        } else {
            None
        };
        Ok(vec![grad_a, grad_b])
    }
}

/// Takes `a` where `condition` is non-zero and `b` elsewhere. All three
/// broadcast together; `condition` does not take part in differentiation.
pub fn where_op(condition: &Tensor, a: &Variable, b: &Variable) -> Result<Variable, FerrogradError> {
    apply_op_single(
        WhereOp {
            condition: condition.clone(),
        },
        &[a, b],
    )
}

#[cfg(test)]
#[path = "where_op_test.rs"]
mod tests;
