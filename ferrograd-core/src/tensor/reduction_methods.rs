use std::sync::Arc;

use super::kernels::{matmul_kernel, sum_axes_kernel};
use super::utils::{normalize_axes, reduction_axes_for};
use super::Tensor;
use crate::buffer::Buffer;
use crate::error::FerrogradError;

impl Tensor {
    /// Sums over `axes`. An empty slice leaves the data unchanged.
    ///
    /// With `keep_dims`, reduced axes stay in the shape with size 1.
    ///
    /// # Errors
    /// `InvalidAxis` if any axis is out of range.
    pub fn sum_axes(&self, axes: &[usize], keep_dims: bool) -> Result<Tensor, FerrogradError> {
        let axes = normalize_axes(axes, self.ndim())?;
        let shape = self.shape_ref();
        let (buffer, out_shape) = match self.buffer() {
            Buffer::F32(data) => {
                let (out, out_shape) = sum_axes_kernel(data, shape, &axes, keep_dims);
                (Buffer::F32(Arc::new(out)), out_shape)
            }
            Buffer::F64(data) => {
                let (out, out_shape) = sum_axes_kernel(data, shape, &axes, keep_dims);
                (Buffer::F64(Arc::new(out)), out_shape)
            }
        };
        Ok(Tensor::from_parts(buffer, out_shape))
    }

    /// Sums over every axis, returning a shape-`[]` tensor.
    pub fn sum_all(&self) -> Tensor {
        let axes: Vec<usize> = (0..self.ndim()).collect();
        let (buffer, out_shape) = match self.buffer() {
            Buffer::F32(data) => {
                let (out, s) = sum_axes_kernel(data, self.shape_ref(), &axes, false);
                (Buffer::F32(Arc::new(out)), s)
            }
            Buffer::F64(data) => {
                let (out, s) = sum_axes_kernel(data, self.shape_ref(), &axes, false);
                (Buffer::F64(Arc::new(out)), s)
            }
        };
        Tensor::from_parts(buffer, out_shape)
    }

    /// Reduces a broadcast result back to `target_shape` by summing over the
    /// broadcast axes. This is the inverse of [`Tensor::broadcast_to`].
    ///
    /// # Errors
    /// `ShapeMismatch` if `target_shape` does not broadcast to this shape.
    pub fn sum_to(&self, target_shape: &[usize]) -> Result<Tensor, FerrogradError> {
        if self.shape_ref() == target_shape {
            return Ok(self.clone());
        }
        let axes = reduction_axes_for(self.shape_ref(), target_shape).ok_or_else(|| {
            FerrogradError::ShapeMismatch {
                expected: target_shape.to_vec(),
                actual: self.shape(),
                operation: "sum_to".to_string(),
            }
        })?;
        self.sum_axes(&axes, true)?.reshape(target_shape)
    }

    /// 2-D matrix product `[m, k] x [k, n] -> [m, n]`.
    pub fn matmul(&self, other: &Tensor) -> Result<Tensor, FerrogradError> {
        if self.ndim() != 2 || other.ndim() != 2 {
            return Err(FerrogradError::UnsupportedOperation(format!(
                "matmul expects 2-D operands, got shapes {:?} and {:?}",
                self.shape_ref(),
                other.shape_ref()
            )));
        }
        let (m, k) = (self.shape_ref()[0], self.shape_ref()[1]);
        let (k2, n) = (other.shape_ref()[0], other.shape_ref()[1]);
        if k != k2 {
            return Err(FerrogradError::ShapeMismatch {
                expected: vec![k, n],
                actual: other.shape(),
                operation: "matmul".to_string(),
            });
        }
        let buffer = match (self.buffer(), other.buffer()) {
            (Buffer::F32(a), Buffer::F32(b)) => Buffer::F32(Arc::new(matmul_kernel(a, b, m, k, n))),
            (Buffer::F64(a), Buffer::F64(b)) => Buffer::F64(Arc::new(matmul_kernel(a, b, m, k, n))),
            _ => {
                return Err(FerrogradError::DTypeMismatch {
                    expected: self.dtype(),
                    actual: other.dtype(),
                    operation: "matmul".to_string(),
                })
            }
        };
        Ok(Tensor::from_parts(buffer, vec![m, n]))
    }
}
