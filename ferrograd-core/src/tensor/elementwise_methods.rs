use std::sync::Arc;

use super::kernels::{broadcast_zip, gather};
use super::utils::broadcast_shapes;
use super::Tensor;
use crate::buffer::Buffer;
use crate::error::FerrogradError;

impl Tensor {
    /// Applies a unary function to every element, keeping shape and dtype.
    ///
    /// One closure per dtype, so callers can use the natively typed
    /// `f32`/`f64` math functions.
    pub fn map<F32Op, F64Op>(&self, op_f32: F32Op, op_f64: F64Op) -> Tensor
    where
        F32Op: Fn(f32) -> f32,
        F64Op: Fn(f64) -> f64,
    {
        let buffer = match self.buffer() {
            Buffer::F32(data) => Buffer::F32(Arc::new(data.iter().map(|&x| op_f32(x)).collect())),
            Buffer::F64(data) => Buffer::F64(Arc::new(data.iter().map(|&x| op_f64(x)).collect())),
        };
        Tensor::from_parts(buffer, self.shape())
    }

    /// Applies a binary function elementwise with NumPy broadcasting.
    ///
    /// # Errors
    /// `DTypeMismatch` if the dtypes differ, `BroadcastError` if the shapes
    /// are not broadcast-compatible.
    pub fn zip_with<F32Op, F64Op>(
        &self,
        other: &Tensor,
        op_f32: F32Op,
        op_f64: F64Op,
        operation: &str,
    ) -> Result<Tensor, FerrogradError>
    where
        F32Op: Fn(f32, f32) -> f32,
        F64Op: Fn(f64, f64) -> f64,
    {
        let out_shape = broadcast_shapes(self.shape_ref(), other.shape_ref())?;
        let buffer = match (self.buffer(), other.buffer()) {
            (Buffer::F32(a), Buffer::F32(b)) => Buffer::F32(Arc::new(broadcast_zip(
                a,
                self.shape_ref(),
                b,
                other.shape_ref(),
                &out_shape,
                op_f32,
            ))),
            (Buffer::F64(a), Buffer::F64(b)) => Buffer::F64(Arc::new(broadcast_zip(
                a,
                self.shape_ref(),
                b,
                other.shape_ref(),
                &out_shape,
                op_f64,
            ))),
            _ => {
                return Err(FerrogradError::DTypeMismatch {
                    expected: self.dtype(),
                    actual: other.dtype(),
                    operation: operation.to_string(),
                })
            }
        };
        Ok(Tensor::from_parts(buffer, out_shape))
    }

    /// Selects `on_true` where `condition` is non-zero and `on_false`
    /// elsewhere. All three tensors broadcast together.
    ///
    /// Only the selected branch is read for each position, so non-finite
    /// values in the other branch never leak into the result.
    pub fn where_select(
        condition: &Tensor,
        on_true: &Tensor,
        on_false: &Tensor,
    ) -> Result<Tensor, FerrogradError> {
        let value_shape = broadcast_shapes(on_true.shape_ref(), on_false.shape_ref())?;
        let out_shape = broadcast_shapes(condition.shape_ref(), &value_shape)?;
        let mask: Vec<bool> = gather(&condition.to_f64_vec(), condition.shape_ref(), &out_shape)
            .into_iter()
            .map(|c| c != 0.0)
            .collect();

        let buffer = match (on_true.buffer(), on_false.buffer()) {
            (Buffer::F32(t), Buffer::F32(f)) => {
                let t = gather(t, on_true.shape_ref(), &out_shape);
                let f = gather(f, on_false.shape_ref(), &out_shape);
                Buffer::F32(Arc::new(select(&mask, &t, &f)))
            }
            (Buffer::F64(t), Buffer::F64(f)) => {
                let t = gather(t, on_true.shape_ref(), &out_shape);
                let f = gather(f, on_false.shape_ref(), &out_shape);
                Buffer::F64(Arc::new(select(&mask, &t, &f)))
            }
            _ => {
                return Err(FerrogradError::DTypeMismatch {
                    expected: on_true.dtype(),
                    actual: on_false.dtype(),
                    operation: "where".to_string(),
                })
            }
        };
        Ok(Tensor::from_parts(buffer, out_shape))
    }
}

fn select<T: Copy>(mask: &[bool], on_true: &[T], on_false: &[T]) -> Vec<T> {
    mask.iter()
        .zip(on_true.iter().zip(on_false))
        .map(|(&m, (&t, &f))| if m { t } else { f })
        .collect()
}
