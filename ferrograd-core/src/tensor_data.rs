// src/tensor_data.rs
use std::fmt::Debug;

use crate::buffer::Buffer;
use crate::error::FerrogradError;
use crate::tensor::utils::calculate_strides;
use crate::types::DType;

/// Internal storage and metadata for a `Tensor`.
///
/// Tensors are always contiguous in row-major order; `strides` are kept so
/// kernels can map coordinates to buffer offsets without recomputing them.
#[derive(Debug)]
pub struct TensorData {
    /// The underlying typed data buffer.
    pub(crate) buffer: Buffer,
    /// The shape (dimensions) of the tensor.
    pub(crate) shape: Vec<usize>,
    /// Contiguous strides for `shape`.
    pub(crate) strides: Vec<usize>,
}

impl TensorData {
    /// Creates a new `TensorData` from a buffer and a shape.
    ///
    /// # Errors
    /// Returns `FerrogradError::TensorCreationError` if the buffer length does
    /// not match the number of elements implied by `shape`.
    pub fn new(buffer: Buffer, shape: Vec<usize>) -> Result<Self, FerrogradError> {
        let numel: usize = shape.iter().product();
        let data_len = buffer.len();
        if data_len != numel {
            return Err(FerrogradError::TensorCreationError { data_len, shape });
        }
        let strides = calculate_strides(&shape);
        Ok(TensorData {
            buffer,
            shape,
            strides,
        })
    }

    pub fn dtype(&self) -> DType {
        self.buffer.dtype()
    }

    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }
}
