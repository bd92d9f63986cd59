use std::fmt::{self, Debug};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, Weak};

use once_cell::sync::OnceCell;

use crate::autograd::grad_mode::is_grad_enabled;
use crate::autograd::operation::Operation;
use crate::error::FerrogradError;
use crate::variable::{Variable, VariableData};

/// Identity of a graph node, used as a key by the traversal engine.
pub type NodeId = *const OpNode;

/// A recorded operation application.
///
/// The node owns its inputs strongly and refers to its outputs weakly: an
/// output keeps its creator (and thus the whole upstream graph) alive, never
/// the reverse.
pub struct OpNode {
    pub(crate) op: Box<dyn Operation>,
    inputs: Vec<Variable>,
    outputs: OnceCell<Vec<Weak<RwLock<VariableData>>>>,
    rank: usize,
    in_backward: AtomicBool,
}

impl OpNode {
    pub fn name(&self) -> &'static str {
        self.op.name()
    }

    /// `max(rank of inputs) + 1`; leaves have rank 0.
    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn inputs(&self) -> &[Variable] {
        &self.inputs
    }

    pub fn num_outputs(&self) -> usize {
        self.outputs.get().map_or(0, Vec::len)
    }

    /// Upgrades the weak reference to output `index`.
    pub fn output(&self, index: usize) -> Option<Variable> {
        self.outputs
            .get()
            .and_then(|outputs| outputs.get(index))
            .and_then(Weak::upgrade)
            .map(|data| Variable { data })
    }

    pub(crate) fn id(self: &Arc<Self>) -> NodeId {
        Arc::as_ptr(self)
    }

    /// Marks the node as running its backward until the entry is dropped.
    pub(crate) fn enter_backward(&self) -> Result<BackwardEntry<'_>, FerrogradError> {
        if self.in_backward.swap(true, Ordering::AcqRel) {
            return Err(FerrogradError::GraphReentrancy {
                operation: self.name().to_string(),
            });
        }
        Ok(BackwardEntry {
            flag: &self.in_backward,
        })
    }
}

impl Debug for OpNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpNode")
            .field("op", &self.op)
            .field("rank", &self.rank)
            .field("num_inputs", &self.inputs.len())
            .field("num_outputs", &self.num_outputs())
            .finish()
    }
}

pub(crate) struct BackwardEntry<'a> {
    flag: &'a AtomicBool,
}

impl Drop for BackwardEntry<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Applies `op` to `inputs`: runs the forward eagerly and, when grad mode is
/// enabled and some input requires grad, records a node linking the inputs
/// to the returned outputs.
///
/// Forward errors are returned before anything is recorded, so a failed
/// application leaves the graph untouched.
pub fn apply_op<O: Operation + 'static>(
    op: O,
    inputs: &[&Variable],
) -> Result<Vec<Variable>, FerrogradError> {
    apply_boxed_op(Box::new(op), inputs)
}

/// [`apply_op`] for operations with exactly one output.
pub fn apply_op_single<O: Operation + 'static>(
    op: O,
    inputs: &[&Variable],
) -> Result<Variable, FerrogradError> {
    let name = op.name();
    let mut outputs = apply_op(op, inputs)?;
    if outputs.len() != 1 {
        return Err(FerrogradError::InternalError(format!(
            "'{}' produced {} outputs, expected 1",
            name,
            outputs.len()
        )));
    }
    Ok(outputs.remove(0))
}

/// Type-erased form of [`apply_op`], used by the name-based catalog.
pub fn apply_boxed_op(
    op: Box<dyn Operation>,
    inputs: &[&Variable],
) -> Result<Vec<Variable>, FerrogradError> {
    let values = inputs
        .iter()
        .map(|v| v.value())
        .collect::<Result<Vec<_>, _>>()?;
    let results = op.forward(&values)?;

    let record = is_grad_enabled() && inputs.iter().any(|v| v.requires_grad());
    if !record {
        return Ok(results.into_iter().map(Variable::new).collect());
    }

    let rank = inputs.iter().map(|v| v.rank()).max().unwrap_or(0) + 1;
    let node = Arc::new(OpNode {
        op,
        inputs: inputs.iter().map(|v| (*v).clone()).collect(),
        outputs: OnceCell::new(),
        rank,
        in_backward: AtomicBool::new(false),
    });
    let outputs: Vec<Variable> = results
        .into_iter()
        .enumerate()
        .map(|(index, value)| Variable::from_output(value, Arc::clone(&node), index))
        .collect();
    let weak_outputs = outputs.iter().map(|v| Arc::downgrade(&v.data)).collect();
    if node.outputs.set(weak_outputs).is_err() {
        return Err(FerrogradError::InternalError(
            "node outputs registered twice".to_string(),
        ));
    }
    log::trace!(
        "recorded '{}' at rank {} ({} inputs, {} outputs)",
        node.name(),
        rank,
        node.inputs.len(),
        outputs.len()
    );
    Ok(outputs)
}

#[cfg(test)]
#[path = "node_test.rs"]
mod tests;
