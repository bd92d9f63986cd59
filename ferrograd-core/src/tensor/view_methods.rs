use std::sync::Arc;

use super::kernels::{gather, transpose_kernel};
use super::utils::broadcast_shapes;
use super::Tensor;
use crate::buffer::Buffer;
use crate::error::FerrogradError;

impl Tensor {
    /// Materialises this tensor broadcast to `target_shape`.
    ///
    /// # Errors
    /// `BroadcastError` if the shape cannot be expanded to `target_shape`.
    pub fn broadcast_to(&self, target_shape: &[usize]) -> Result<Tensor, FerrogradError> {
        if self.shape_ref() == target_shape {
            return Ok(self.clone());
        }
        let expanded = broadcast_shapes(self.shape_ref(), target_shape)?;
        if expanded != target_shape {
            return Err(FerrogradError::BroadcastError {
                shape1: self.shape(),
                shape2: target_shape.to_vec(),
            });
        }
        let buffer = match self.buffer() {
            Buffer::F32(data) => Buffer::F32(Arc::new(gather(data, self.shape_ref(), target_shape))),
            Buffer::F64(data) => Buffer::F64(Arc::new(gather(data, self.shape_ref(), target_shape))),
        };
        Ok(Tensor::from_parts(buffer, target_shape.to_vec()))
    }

    /// Returns a tensor with the same data and a new shape. The buffer is shared.
    pub fn reshape(&self, new_shape: &[usize]) -> Result<Tensor, FerrogradError> {
        let new_numel: usize = new_shape.iter().product();
        if new_numel != self.numel() {
            return Err(FerrogradError::ShapeMismatch {
                expected: new_shape.to_vec(),
                actual: self.shape(),
                operation: "reshape".to_string(),
            });
        }
        Ok(Tensor::from_parts(self.buffer().clone(), new_shape.to_vec()))
    }

    /// Permutes the axes according to `perm` (`out.shape[i] = shape[perm[i]]`).
    pub fn transpose(&self, perm: &[usize]) -> Result<Tensor, FerrogradError> {
        validate_permutation(perm, self.ndim())?;
        let out_shape: Vec<usize> = perm.iter().map(|&p| self.shape_ref()[p]).collect();
        let buffer = match self.buffer() {
            Buffer::F32(data) => Buffer::F32(Arc::new(transpose_kernel(data, self.shape_ref(), perm))),
            Buffer::F64(data) => Buffer::F64(Arc::new(transpose_kernel(data, self.shape_ref(), perm))),
        };
        Ok(Tensor::from_parts(buffer, out_shape))
    }
}

/// Checks that `perm` contains every axis below `rank` exactly once.
pub(crate) fn validate_permutation(perm: &[usize], rank: usize) -> Result<(), FerrogradError> {
    let mut seen = vec![false; rank];
    let valid = perm.len() == rank
        && perm.iter().all(|&p| {
            if p >= rank || seen[p] {
                false
            } else {
                seen[p] = true;
                true
            }
        });
    if valid {
        Ok(())
    } else {
        Err(FerrogradError::InvalidPermutation {
            dims: perm.to_vec(),
            rank,
        })
    }
}
