//! Rank-ordered reverse traversal.
//!
//! Nodes are popped from a max-heap keyed by rank. Every consumer of a
//! variable has a strictly higher rank than the variable's creator, so by the
//! time a creator is popped all contributions to its outputs have been summed.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::sync::Arc;

use crate::autograd::grad_mode::GradModeGuard;
use crate::autograd::node::{NodeId, OpNode};
use crate::autograd::operation::BackwardContext;
use crate::error::FerrogradError;
use crate::ops::arithmetic::add::add_op;
use crate::ops::view::sum_to::sum_to_op;
use crate::tensor::{ones_like, utils::reduction_axes_for};
use crate::variable::{Variable, VariableId};

/// Per-call settings of [`backward`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackwardOptions {
    /// Store the gradient of every non-leaf variable visited on the way.
    pub retain_grad: bool,
    /// Run backward formulas with grad mode enabled so the resulting
    /// gradients can be differentiated again.
    pub enable_double_backprop: bool,
}

impl Default for BackwardOptions {
    fn default() -> Self {
        BackwardOptions {
            retain_grad: true,
            enable_double_backprop: false,
        }
    }
}

/// Where computed gradients end up.
#[derive(Debug, Clone, Copy)]
enum Sink {
    /// Leaves accumulate into their `grad` field.
    Fields { retain_grad: bool },
    /// Nothing is written; gradients are collected for the caller.
    Collect,
}

struct Candidate {
    rank: usize,
    seq: usize,
    node: Arc<OpNode>,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank && self.seq == other.seq
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    // Highest rank first; insertion order among equal ranks.
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Gradient accumulated for one variable during a traversal. `owner` keeps
/// the variable alive so its address cannot be reused as a key.
struct GradSlot {
    #[allow(dead_code)]
    owner: Variable,
    grad: Variable,
}

struct Traversal {
    sink: Sink,
    double_backprop: bool,
    heap: BinaryHeap<Candidate>,
    queued: HashSet<NodeId>,
    grads: HashMap<VariableId, GradSlot>,
    seq: usize,
    visited: usize,
}

impl Traversal {
    fn new(sink: Sink, double_backprop: bool) -> Self {
        Traversal {
            sink,
            double_backprop,
            heap: BinaryHeap::new(),
            queued: HashSet::new(),
            grads: HashMap::new(),
            seq: 0,
            visited: 0,
        }
    }

    fn push(&mut self, node: Arc<OpNode>) {
        if self.queued.insert(node.id()) {
            self.heap.push(Candidate {
                rank: node.rank(),
                seq: self.seq,
                node,
            });
            self.seq += 1;
        }
    }

    fn seed(&mut self, root: &Variable, seed: Option<&Variable>) -> Result<(), FerrogradError> {
        if !root.requires_grad() {
            return Err(FerrogradError::RequiresGradNotMet);
        }
        let seed = match seed {
            Some(seed) => {
                if seed.shape() != root.shape() {
                    return Err(FerrogradError::ShapeMismatch {
                        expected: root.shape(),
                        actual: seed.shape(),
                        operation: "backward seed".to_string(),
                    });
                }
                seed.clone()
            }
            None => {
                if root.numel() != 1 {
                    return Err(FerrogradError::BackwardNonScalar);
                }
                Variable::new(ones_like(&root.value()?))
            }
        };
        let _mode = GradModeGuard::new(self.double_backprop);
        self.deliver(root, seed)
    }

    /// Routes a gradient contribution to `target` and schedules its creator.
    fn deliver(&mut self, target: &Variable, grad: Variable) -> Result<(), FerrogradError> {
        let grad = fit_gradient(&grad, &target.shape())?;
        let creator = target.creator();
        match (self.sink, &creator) {
            (Sink::Fields { .. }, None) => target.accumulate_grad(&grad)?,
            _ => {
                let key = target.id();
                let summed = match self.grads.get(&key) {
                    Some(slot) => add_op(&slot.grad, &grad)?,
                    None => grad,
                };
                self.grads.insert(
                    key,
                    GradSlot {
                        owner: target.clone(),
                        grad: summed,
                    },
                );
            }
        }
        if let Some(node) = creator {
            self.push(node);
        }
        Ok(())
    }

    fn run(&mut self) -> Result<(), FerrogradError> {
        while let Some(Candidate { node, .. }) = self.heap.pop() {
            self.visit(&node)?;
        }
        Ok(())
    }

    fn visit(&mut self, node: &Arc<OpNode>) -> Result<(), FerrogradError> {
        let outputs: Vec<Option<Variable>> =
            (0..node.num_outputs()).map(|i| node.output(i)).collect();
        let grad_outputs: Vec<Option<Variable>> = outputs
            .iter()
            .map(|output| {
                output
                    .as_ref()
                    .and_then(|v| self.grads.get(&v.id()).map(|slot| slot.grad.clone()))
            })
            .collect();
        if grad_outputs.iter().all(Option::is_none) {
            log::debug!("skipping '{}': no gradient reached its outputs", node.name());
            return Ok(());
        }
        log::trace!("visiting '{}' at rank {}", node.name(), node.rank());
        self.visited += 1;

        if let Sink::Fields { retain_grad: true } = self.sink {
            for (output, grad) in outputs.iter().zip(&grad_outputs) {
                if let (Some(output), Some(grad)) = (output, grad) {
                    output.set_grad_var(Some(grad.clone()));
                }
            }
        }

        let _mode = GradModeGuard::new(self.double_backprop);
        let input_grads = {
            let _entry = node.enter_backward()?;
            let ctx = BackwardContext::new(node);
            node.op
                .backward(&ctx, &grad_outputs)
                .map_err(|source| FerrogradError::BackwardError {
                    operation: node.name().to_string(),
                    source: Box::new(source),
                })?
        };
        if input_grads.len() != node.inputs().len() {
            return Err(FerrogradError::BackwardError {
                operation: node.name().to_string(),
                source: Box::new(FerrogradError::InternalError(format!(
                    "backward returned {} gradients for {} inputs",
                    input_grads.len(),
                    node.inputs().len()
                ))),
            });
        }
        for (input, grad) in node.inputs().iter().zip(input_grads) {
            let Some(grad) = grad else { continue };
            if !input.requires_grad() {
                continue;
            }
            self.deliver(input, grad)?;
        }
        Ok(())
    }
}

/// Sums a gradient over broadcast axes so it matches `shape`.
pub(crate) fn fit_gradient(grad: &Variable, shape: &[usize]) -> Result<Variable, FerrogradError> {
    let grad_shape = grad.shape();
    if grad_shape == shape {
        return Ok(grad.clone());
    }
    if reduction_axes_for(&grad_shape, shape).is_none() {
        return Err(FerrogradError::GradientAccumulationShapeMismatch {
            expected: shape.to_vec(),
            actual: grad_shape,
        });
    }
    sum_to_op(grad, shape)
}

fn check_seeds(roots: &[Variable], seeds: &[Option<Variable>]) -> Result<(), FerrogradError> {
    if !seeds.is_empty() && seeds.len() != roots.len() {
        return Err(FerrogradError::InvalidArgument(format!(
            "{} seeds given for {} roots",
            seeds.len(),
            roots.len()
        )));
    }
    Ok(())
}

/// Backpropagates from `roots`, accumulating into the `grad` field of every
/// reachable leaf that requires grad.
///
/// `seeds` is either empty (every root must hold a single element and is
/// seeded with one) or has one optional seed per root. On error the traversal
/// stops and gradients already written are left in place.
pub fn backward(
    roots: &[Variable],
    seeds: &[Option<Variable>],
    options: BackwardOptions,
) -> Result<(), FerrogradError> {
    check_seeds(roots, seeds)?;
    log::debug!(
        "backward from {} root(s) (retain_grad={}, double_backprop={})",
        roots.len(),
        options.retain_grad,
        options.enable_double_backprop
    );
    let mut traversal = Traversal::new(
        Sink::Fields {
            retain_grad: options.retain_grad,
        },
        options.enable_double_backprop,
    );
    for (i, root) in roots.iter().enumerate() {
        traversal.seed(root, seeds.get(i).and_then(Option::as_ref))?;
    }
    traversal.run()?;
    log::debug!("backward finished after visiting {} node(s)", traversal.visited);
    Ok(())
}

/// Computes the gradients of `outputs` with respect to `inputs` without
/// touching any `grad` field.
///
/// Returns one entry per input: `None` when the outputs do not depend on it.
/// With `enable_double_backprop` the returned gradients carry creator chains
/// and can be differentiated again; since nothing is stored on the
/// variables, this creates no reference cycles.
pub fn grad(
    outputs: &[Variable],
    inputs: &[Variable],
    grad_outputs: &[Option<Variable>],
    enable_double_backprop: bool,
) -> Result<Vec<Option<Variable>>, FerrogradError> {
    check_seeds(outputs, grad_outputs)?;
    log::debug!(
        "grad of {} output(s) w.r.t. {} input(s) (double_backprop={})",
        outputs.len(),
        inputs.len(),
        enable_double_backprop
    );
    let mut traversal = Traversal::new(Sink::Collect, enable_double_backprop);
    for (i, output) in outputs.iter().enumerate() {
        traversal.seed(output, grad_outputs.get(i).and_then(Option::as_ref))?;
    }
    traversal.run()?;
    log::debug!("grad finished after visiting {} node(s)", traversal.visited);
    Ok(inputs
        .iter()
        .map(|input| traversal.grads.get(&input.id()).map(|slot| slot.grad.clone()))
        .collect())
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
