use std::fmt::Debug;

use crate::autograd::node::OpNode;
use crate::error::FerrogradError;
use crate::tensor::Tensor;
use crate::variable::Variable;

/// A differentiable computation step.
///
/// `forward` maps input arrays to output arrays and must be pure: the engine
/// may call it again to recompute a released output value. `backward` maps
/// the gradients of the outputs to the gradients of the inputs and is written
/// with operations on `Variable`s, so that when it runs with grad mode enabled
/// the produced gradients are themselves differentiable.
///
/// The trait requires `Debug + Send + Sync` because operations are stored as
/// `Box<dyn Operation>` inside shared graph nodes.
pub trait Operation: Debug + Send + Sync {
    /// Short name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Computes the output values from the input values.
    ///
    /// Shape and dtype validation happens here, before the engine records
    /// anything in the graph.
    fn forward(&self, inputs: &[Tensor]) -> Result<Vec<Tensor>, FerrogradError>;

    /// Computes one gradient per input, in input order.
    ///
    /// `grad_outputs[i]` is `None` when no gradient reached output `i`; the
    /// engine never calls `backward` when all of them are `None`. Inputs
    /// that the result does not depend on differentiably get `None`, not a
    /// zero array. Returned gradients may have a broadcast shape; the engine
    /// sums them back to the input shape.
    fn backward(
        &self,
        ctx: &BackwardContext<'_>,
        grad_outputs: &[Option<Variable>],
    ) -> Result<Vec<Option<Variable>>, FerrogradError>;
}

/// View of the graph node handed to [`Operation::backward`].
pub struct BackwardContext<'a> {
    node: &'a OpNode,
}

impl<'a> BackwardContext<'a> {
    pub(crate) fn new(node: &'a OpNode) -> Self {
        BackwardContext { node }
    }

    /// The inputs the operation was applied to.
    pub fn inputs(&self) -> &[Variable] {
        self.node.inputs()
    }

    /// Input `index`, or `InternalError` if the operation had fewer inputs.
    pub fn input(&self, index: usize) -> Result<&Variable, FerrogradError> {
        self.node.inputs().get(index).ok_or_else(|| {
            FerrogradError::InternalError(format!(
                "'{}' has no input {}",
                self.node.name(),
                index
            ))
        })
    }

    /// Output `index` if it is still alive. Backward formulas that need an
    /// output value fall back to recomputing it from the inputs.
    pub fn output(&self, index: usize) -> Option<Variable> {
        self.node.output(index)
    }
}

/// Returns the only output gradient of a single-output operation.
pub fn single_grad_output(grad_outputs: &[Option<Variable>]) -> Option<&Variable> {
    grad_outputs.first().and_then(Option::as_ref)
}
