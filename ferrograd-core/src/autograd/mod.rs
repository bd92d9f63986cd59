pub mod engine;
pub mod grad_check;
pub mod grad_mode;
pub mod graph;
pub mod node;
pub mod operation;

pub use engine::{backward, grad, BackwardOptions};
pub use grad_mode::{enable_grad, is_grad_enabled, no_grad, GradModeGuard};
pub use graph::{reachable_nodes, zero_grad_graph};
pub use node::{apply_boxed_op, apply_op, apply_op_single, NodeId, OpNode};
pub use operation::{single_grad_output, BackwardContext, Operation};
