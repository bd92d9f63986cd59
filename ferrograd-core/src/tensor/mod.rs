// src/tensor/mod.rs

use std::sync::Arc;

use crate::buffer::Buffer;
use crate::error::FerrogradError;
use crate::tensor_data::TensorData;
use crate::types::DType;

pub mod create;
mod elementwise_methods;
mod kernels;
mod reduction_methods;
mod traits;
pub mod utils;
mod view_methods;

pub use create::{
    filled, from_vec_f32, from_vec_f64, full, full_f64, full_like, ones, ones_f64, ones_like,
    rand, rand_range, randn, scalar, zeros, zeros_f64, zeros_like,
};
pub(crate) use view_methods::validate_permutation;

/// Immutable N-dimensional array: the array backend under every `Variable`.
///
/// `Tensor` wraps an `Arc<TensorData>`, so clones are cheap and share the
/// buffer. Tensors carry no autograd state; differentiation happens at the
/// `Variable` level.
pub struct Tensor {
    pub(crate) data: Arc<TensorData>,
}

impl Tensor {
    /// Creates a new Tensor with the given f32 data and shape.
    pub fn new(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, FerrogradError> {
        Self::from_buffer(Buffer::F32(Arc::new(data_vec)), shape)
    }

    /// Creates a new Tensor with the given f64 data and shape.
    pub fn new_f64(data_vec: Vec<f64>, shape: Vec<usize>) -> Result<Self, FerrogradError> {
        Self::from_buffer(Buffer::F64(Arc::new(data_vec)), shape)
    }

    /// Creates a tensor from an existing buffer, validating its length.
    pub fn from_buffer(buffer: Buffer, shape: Vec<usize>) -> Result<Self, FerrogradError> {
        let tensor_data = TensorData::new(buffer, shape)?;
        Ok(Tensor {
            data: Arc::new(tensor_data),
        })
    }

    /// Builds a tensor whose buffer length is already known to match `shape`.
    pub(crate) fn from_parts(buffer: Buffer, shape: Vec<usize>) -> Self {
        debug_assert_eq!(buffer.len(), shape.iter().product::<usize>());
        let strides = utils::calculate_strides(&shape);
        Tensor {
            data: Arc::new(TensorData {
                buffer,
                shape,
                strides,
            }),
        }
    }

    /// Returns the data type (`DType`) of the tensor elements.
    pub fn dtype(&self) -> DType {
        self.data.dtype()
    }

    /// Returns a clone of the tensor's shape.
    pub fn shape(&self) -> Vec<usize> {
        self.data.shape.clone()
    }

    /// Borrows the tensor's shape.
    pub fn shape_ref(&self) -> &[usize] {
        &self.data.shape
    }

    /// Returns a clone of the tensor's strides.
    pub fn strides(&self) -> Vec<usize> {
        self.data.strides.clone()
    }

    /// Returns the number of dimensions.
    pub fn ndim(&self) -> usize {
        self.data.shape.len()
    }

    /// Returns the number of elements in the tensor.
    pub fn numel(&self) -> usize {
        self.data.numel()
    }

    /// Provides access to the underlying buffer.
    pub fn buffer(&self) -> &Buffer {
        &self.data.buffer
    }

    /// Returns a copy of the data as `Vec<f32>`.
    /// Fails if the tensor is not F32.
    pub fn get_f32_data(&self) -> Result<Vec<f32>, FerrogradError> {
        Ok(self.buffer().try_get_f32()?.as_ref().clone())
    }

    /// Returns a copy of the data as `Vec<f64>`.
    /// Fails if the tensor is not F64.
    pub fn get_f64_data(&self) -> Result<Vec<f64>, FerrogradError> {
        Ok(self.buffer().try_get_f64()?.as_ref().clone())
    }

    /// Returns the data widened to f64, whatever the dtype.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.buffer().to_f64_vec()
    }

    /// Returns the single element of a one-element tensor as f64.
    pub fn item(&self) -> Result<f64, FerrogradError> {
        if self.numel() != 1 {
            return Err(FerrogradError::ShapeMismatch {
                expected: vec![],
                actual: self.shape(),
                operation: "item".to_string(),
            });
        }
        Ok(self.to_f64_vec()[0])
    }

    /// Converts the tensor to another dtype. Returns a cheap clone if the
    /// dtype already matches.
    pub fn cast(&self, dtype: DType) -> Tensor {
        if self.dtype() == dtype {
            return self.clone();
        }
        let buffer = match dtype {
            DType::F32 => Buffer::F32(Arc::new(
                self.to_f64_vec().into_iter().map(|x| x as f32).collect(),
            )),
            DType::F64 => Buffer::F64(Arc::new(self.to_f64_vec())),
        };
        Tensor::from_parts(buffer, self.shape())
    }
}

#[cfg(test)]
#[path = "tensor_test.rs"]
mod tests;
