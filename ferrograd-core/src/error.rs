use crate::types::DType;
use thiserror::Error;

/// Custom error type for the ferrograd framework.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum FerrogradError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Cannot broadcast shapes: {shape1:?} and {shape2:?}")]
    BroadcastError {
        shape1: Vec<usize>,
        shape2: Vec<usize>,
    },

    #[error("Data type mismatch for operation '{operation}': expected {expected:?}, got {actual:?}")]
    DTypeMismatch {
        expected: DType,
        actual: DType,
        operation: String,
    },

    #[error("Invalid axis {axis} for tensor of rank {rank}")]
    InvalidAxis { axis: usize, rank: usize },

    #[error("Invalid permutation: dims {dims:?} are not a valid permutation for rank {rank}")]
    InvalidPermutation { dims: Vec<usize>, rank: usize },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Value of variable {name:?} read before it was set")]
    UninitializedValue { name: Option<String> },

    #[error("Operation requires tensor to require grad, but it doesn't.")]
    RequiresGradNotMet,

    #[error("requires_grad can only be changed on leaf variables")]
    RequiresGradOnNonLeaf,

    #[error("Backward called on non-scalar variable without explicit gradient.")]
    BackwardNonScalar,

    #[error("Backward of '{operation}' failed: {source}")]
    BackwardError {
        operation: String,
        #[source]
        source: Box<FerrogradError>,
    },

    #[error("Backward of '{operation}' entered while it was already running")]
    GraphReentrancy { operation: String },

    #[error("Shape mismatch during gradient accumulation: expected {expected:?}, got {actual:?}")]
    GradientAccumulationShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}
