//! Core of the ferrograd autograd engine: an immutable array backend
//! ([`Tensor`]), graph nodes ([`Variable`]), the backward traversal engine
//! and a small catalog of differentiable operations.

pub mod autograd;
pub mod buffer;
pub mod error;
pub mod ops;
pub mod tensor;
pub mod tensor_data;
pub mod types;
pub mod utils;
pub mod variable;

pub use autograd::{backward, grad, no_grad, BackwardOptions};
pub use error::FerrogradError;
pub use tensor::Tensor;
pub use types::DType;
pub use variable::Variable;
// Re-export traits required by public functions/structs
pub use num_traits;
