// src/tensor/traits.rs

use std::fmt::{self, Debug};
use std::sync::Arc;

use crate::buffer::Buffer;
use crate::tensor::Tensor;

impl Clone for Tensor {
    /// Shallow clone: increases the reference count of the shared data.
    fn clone(&self) -> Self {
        Tensor {
            data: Arc::clone(&self.data),
        }
    }
}

impl Debug for Tensor {
    /// Shows shape, dtype and up to eight leading elements.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const PREVIEW: usize = 8;
        write!(f, "Tensor(shape={:?}, dtype={:?}, data=", self.shape_ref(), self.dtype())?;
        let values = self.to_f64_vec();
        let shown: Vec<f64> = values.iter().take(PREVIEW).copied().collect();
        if values.len() > PREVIEW {
            write!(f, "{:?} ... {} elements", shown, values.len())?;
        } else {
            write!(f, "{:?}", shown)?;
        }
        write!(f, ")")
    }
}

impl PartialEq for Tensor {
    /// Value equality: same shape, same dtype, same elements.
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.data, &other.data) {
            return true;
        }
        if self.shape_ref() != other.shape_ref() {
            return false;
        }
        match (self.buffer(), other.buffer()) {
            (Buffer::F32(a), Buffer::F32(b)) => a == b,
            (Buffer::F64(a), Buffer::F64(b)) => a == b,
            _ => false,
        }
    }
}
