use std::collections::HashSet;
use std::sync::Arc;

use crate::autograd::node::{NodeId, OpNode};
use crate::variable::{Variable, VariableId};

/// Collects every node reachable from `root` through creator/input edges,
/// sorted by decreasing rank.
pub fn reachable_nodes(root: &Variable) -> Vec<Arc<OpNode>> {
    let mut seen: HashSet<NodeId> = HashSet::new();
    let mut nodes = Vec::new();
    let mut stack: Vec<Arc<OpNode>> = root.creator().into_iter().collect();
    while let Some(node) = stack.pop() {
        if !seen.insert(node.id()) {
            continue;
        }
        stack.extend(node.inputs().iter().filter_map(Variable::creator));
        nodes.push(node);
    }
    nodes.sort_by(|a, b| b.rank().cmp(&a.rank()));
    nodes
}

/// Clears the gradient of `root` and of every variable upstream of it.
///
/// This is the reset to run after a failed backward, which leaves partial
/// gradients behind.
pub fn zero_grad_graph(root: &Variable) {
    let mut seen: HashSet<VariableId> = HashSet::new();
    let mut stack = vec![root.clone()];
    let mut cleared = 0usize;
    while let Some(var) = stack.pop() {
        if !seen.insert(var.id()) {
            continue;
        }
        var.zero_grad();
        cleared += 1;
        if let Some(node) = var.creator() {
            stack.extend(node.inputs().iter().cloned());
        }
    }
    log::debug!("zero_grad_graph cleared {} variable(s)", cleared);
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
