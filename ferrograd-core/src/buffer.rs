use std::sync::Arc;

use crate::error::FerrogradError;
use crate::types::DType;

/// Typed CPU storage behind a `Tensor`.
///
/// The vectors are wrapped in `Arc` so reshapes and detached variables can
/// share one allocation.
#[derive(Debug, Clone)]
pub enum Buffer {
    /// Buffer holding f32 data.
    F32(Arc<Vec<f32>>),
    /// Buffer holding f64 data.
    F64(Arc<Vec<f64>>),
}

impl Buffer {
    pub fn dtype(&self) -> DType {
        match self {
            Buffer::F32(_) => DType::F32,
            Buffer::F64(_) => DType::F64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Buffer::F32(data) => data.len(),
            Buffer::F64(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Attempts to get a reference to the underlying `Arc<Vec<f32>>`.
    ///
    /// Returns an error if the buffer is not of type F32.
    pub fn try_get_f32(&self) -> Result<&Arc<Vec<f32>>, FerrogradError> {
        match self {
            Buffer::F32(data) => Ok(data),
            Buffer::F64(_) => Err(FerrogradError::DTypeMismatch {
                expected: DType::F32,
                actual: DType::F64,
                operation: "try_get_f32".to_string(),
            }),
        }
    }

    /// Attempts to get a reference to the underlying `Arc<Vec<f64>>`.
    pub fn try_get_f64(&self) -> Result<&Arc<Vec<f64>>, FerrogradError> {
        match self {
            Buffer::F64(data) => Ok(data),
            Buffer::F32(_) => Err(FerrogradError::DTypeMismatch {
                expected: DType::F64,
                actual: DType::F32,
                operation: "try_get_f64".to_string(),
            }),
        }
    }

    /// Copies the buffer into a `Vec<f64>`, widening f32 values.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        match self {
            Buffer::F32(data) => data.iter().map(|&x| x as f64).collect(),
            Buffer::F64(data) => data.as_ref().clone(),
        }
    }
}
