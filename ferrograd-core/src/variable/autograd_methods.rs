use crate::autograd::engine::{self, fit_gradient, BackwardOptions};
use crate::error::FerrogradError;
use crate::ops::arithmetic::add::add_op;
use crate::tensor::Tensor;
use crate::variable::Variable;

impl Variable {
    /// Sets the `requires_grad` flag of a leaf.
    ///
    /// # Errors
    /// `RequiresGradOnNonLeaf` for variables produced by an operation.
    pub fn requires_grad_(&self, requires_grad: bool) -> Result<(), FerrogradError> {
        let mut guard = self.write_data();
        if guard.creator.is_some() {
            return Err(FerrogradError::RequiresGradOnNonLeaf);
        }
        guard.requires_grad = requires_grad;
        Ok(())
    }

    /// The accumulated gradient as an array.
    ///
    /// A gradient whose value cannot be produced (released and not
    /// recomputable) is reported as `None` and logged; `grad_var` still
    /// returns it.
    pub fn grad(&self) -> Option<Tensor> {
        let grad = self.grad_var()?;
        match grad.value() {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("gradient of {:?} has no value: {}", self.name(), e);
                None
            }
        }
    }

    /// The accumulated gradient as a variable. After a backward with double
    /// backprop enabled it has its own creator chain.
    pub fn grad_var(&self) -> Option<Variable> {
        self.read_data().grad.clone()
    }

    /// Replaces the gradient with `grad`, which must match the variable's shape.
    pub fn set_grad(&self, grad: Tensor) -> Result<(), FerrogradError> {
        let shape = self.shape();
        if grad.shape_ref() != shape.as_slice() {
            return Err(FerrogradError::ShapeMismatch {
                expected: shape,
                actual: grad.shape(),
                operation: "set_grad".to_string(),
            });
        }
        self.set_grad_var(Some(Variable::new(grad)));
        Ok(())
    }

    /// Replaces the gradient variable as is.
    pub fn set_grad_var(&self, grad: Option<Variable>) {
        self.write_data().grad = grad;
    }

    /// Adds `grad` to the existing gradient, or stores it if there is none.
    ///
    /// A gradient with a broadcast shape is first summed back to the
    /// variable's shape. The addition is an ordinary operation, so it is
    /// recorded when grad mode is enabled.
    ///
    /// # Errors
    /// `GradientAccumulationShapeMismatch` if `grad` cannot be reduced to the
    /// variable's shape.
    pub fn accumulate_grad(&self, grad: &Variable) -> Result<(), FerrogradError> {
        let fitted = fit_gradient(grad, &self.shape())?;
        let summed = match self.grad_var() {
            Some(existing) => add_op(&existing, &fitted)?,
            None => fitted,
        };
        self.set_grad_var(Some(summed));
        Ok(())
    }

    /// Clears the gradient. Idempotent.
    pub fn zero_grad(&self) {
        self.set_grad_var(None);
    }

    /// Backpropagates from this variable, which must hold a single element.
    pub fn backward(&self) -> Result<(), FerrogradError> {
        engine::backward(&[self.clone()], &[], BackwardOptions::default())
    }

    /// Backpropagates from this variable with an explicit seed and options.
    ///
    /// With `enable_double_backprop`, leaf gradients reference the graph that
    /// produced them, which in turn references the leaf: call
    /// [`zero_grad`](Variable::zero_grad) to release it, or use
    /// [`engine::grad`] which stores nothing.
    pub fn backward_with(
        &self,
        seed: Option<Tensor>,
        options: BackwardOptions,
    ) -> Result<(), FerrogradError> {
        let seeds = [seed.map(Variable::new)];
        engine::backward(&[self.clone()], &seeds, options)
    }

    /// A new leaf sharing this variable's value, cut off from the graph.
    pub fn detach(&self) -> Result<Variable, FerrogradError> {
        let detached = Variable::new(self.value()?);
        if let Some(name) = self.name() {
            detached.set_name(name);
        }
        Ok(detached)
    }
}

#[cfg(test)]
#[path = "autograd_methods_test.rs"]
mod tests;
