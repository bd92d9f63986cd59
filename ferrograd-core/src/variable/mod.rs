// src/variable/mod.rs

use std::fmt::{self, Debug};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::autograd::node::OpNode;
use crate::error::FerrogradError;
use crate::tensor::Tensor;
use crate::types::DType;

mod autograd_methods;
mod op_methods;

/// Identity of a variable, used as a key during traversal.
pub type VariableId = *const RwLock<VariableData>;

/// Shared state of a [`Variable`].
pub struct VariableData {
    /// Current value; `None` for an unset placeholder or a released output.
    pub(crate) value: Option<Tensor>,
    pub(crate) shape: Vec<usize>,
    pub(crate) dtype: DType,
    /// Accumulated gradient. Stored as a variable so that gradients computed
    /// with double backprop keep their own graph.
    pub(crate) grad: Option<Variable>,
    /// The node that produced this variable; `None` for leaves.
    pub(crate) creator: Option<Arc<OpNode>>,
    /// Position among the creator's outputs.
    pub(crate) output_index: usize,
    pub(crate) rank: usize,
    pub(crate) requires_grad: bool,
    pub(crate) name: Option<String>,
}

/// A node in the data-flow graph.
///
/// `Variable` is a cheap handle (`Arc<RwLock<VariableData>>`); clones refer to
/// the same node. Leaves wrap user data, non-leaves are produced by
/// [`apply_op`](crate::autograd::apply_op) and keep their creator alive.
pub struct Variable {
    pub(crate) data: Arc<RwLock<VariableData>>,
}

impl Variable {
    /// Wraps a tensor in a leaf that does not require grad.
    pub fn new(value: Tensor) -> Self {
        Self::leaf(value, false)
    }

    /// Wraps a tensor in a leaf that requires grad.
    pub fn new_requires_grad(value: Tensor) -> Self {
        Self::leaf(value, true)
    }

    fn leaf(value: Tensor, requires_grad: bool) -> Self {
        let shape = value.shape();
        let dtype = value.dtype();
        Self::from_data(VariableData {
            value: Some(value),
            shape,
            dtype,
            grad: None,
            creator: None,
            output_index: 0,
            rank: 0,
            requires_grad,
            name: None,
        })
    }

    /// Creates an F32 leaf from a vector of data and a shape.
    pub fn from_vec_f32(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, FerrogradError> {
        Ok(Self::new(Tensor::new(data_vec, shape)?))
    }

    /// Creates an F64 leaf from a vector of data and a shape.
    pub fn from_vec_f64(data_vec: Vec<f64>, shape: Vec<usize>) -> Result<Self, FerrogradError> {
        Ok(Self::new(Tensor::new_f64(data_vec, shape)?))
    }

    /// Creates a leaf with a known shape and dtype but no value yet.
    ///
    /// Reading it fails with `UninitializedValue` until
    /// [`set_value`](Variable::set_value) is called.
    pub fn placeholder(shape: &[usize], dtype: DType) -> Self {
        Self::from_data(VariableData {
            value: None,
            shape: shape.to_vec(),
            dtype,
            grad: None,
            creator: None,
            output_index: 0,
            rank: 0,
            requires_grad: false,
            name: None,
        })
    }

    pub(crate) fn from_output(value: Tensor, creator: Arc<OpNode>, output_index: usize) -> Self {
        let shape = value.shape();
        let dtype = value.dtype();
        let rank = creator.rank();
        Self::from_data(VariableData {
            value: Some(value),
            shape,
            dtype,
            grad: None,
            creator: Some(creator),
            output_index,
            rank,
            requires_grad: true,
            name: None,
        })
    }

    fn from_data(data: VariableData) -> Self {
        Variable {
            data: Arc::new(RwLock::new(data)),
        }
    }

    /// Acquires a read lock on the variable's data.
    pub fn read_data(&self) -> RwLockReadGuard<'_, VariableData> {
        self.data.read().expect("RwLock poisoned")
    }

    /// Acquires a write lock on the variable's data.
    pub fn write_data(&self) -> RwLockWriteGuard<'_, VariableData> {
        self.data.write().expect("RwLock poisoned")
    }

    pub fn id(&self) -> VariableId {
        Arc::as_ptr(&self.data)
    }

    pub fn shape(&self) -> Vec<usize> {
        self.read_data().shape.clone()
    }

    pub fn dtype(&self) -> DType {
        self.read_data().dtype
    }

    pub fn numel(&self) -> usize {
        self.read_data().shape.iter().product()
    }

    pub fn ndim(&self) -> usize {
        self.read_data().shape.len()
    }

    /// Topological depth: 0 for leaves, the creator's rank otherwise.
    pub fn rank(&self) -> usize {
        self.read_data().rank
    }

    pub fn requires_grad(&self) -> bool {
        self.read_data().requires_grad
    }

    pub fn is_leaf(&self) -> bool {
        self.read_data().creator.is_none()
    }

    pub fn creator(&self) -> Option<Arc<OpNode>> {
        self.read_data().creator.clone()
    }

    pub fn output_index(&self) -> usize {
        self.read_data().output_index
    }

    pub fn name(&self) -> Option<String> {
        self.read_data().name.clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.write_data().name = Some(name.into());
    }

    /// Builder-style [`set_name`](Variable::set_name).
    pub fn with_name(self, name: impl Into<String>) -> Self {
        self.set_name(name);
        self
    }

    /// Returns the current value.
    ///
    /// A released output value is recomputed by re-running the creator's
    /// forward on its inputs and cached again.
    ///
    /// # Errors
    /// `UninitializedValue` if the value was never set and there is no
    /// creator to recompute it from.
    pub fn value(&self) -> Result<Tensor, FerrogradError> {
        let (creator, index) = {
            let guard = self.read_data();
            if let Some(value) = &guard.value {
                return Ok(value.clone());
            }
            match &guard.creator {
                Some(creator) => (Arc::clone(creator), guard.output_index),
                None => {
                    return Err(FerrogradError::UninitializedValue {
                        name: guard.name.clone(),
                    })
                }
            }
        };
        log::trace!("recomputing output {} of '{}'", index, creator.name());
        let input_values = creator
            .inputs()
            .iter()
            .map(Variable::value)
            .collect::<Result<Vec<_>, _>>()?;
        let mut outputs = creator.op.forward(&input_values)?;
        if index >= outputs.len() {
            return Err(FerrogradError::InternalError(format!(
                "'{}' recomputed {} outputs, needed index {}",
                creator.name(),
                outputs.len(),
                index
            )));
        }
        let value = outputs.swap_remove(index);
        self.write_data().value = Some(value.clone());
        Ok(value)
    }

    /// Sets the value of a leaf. Shape and dtype must match the variable's.
    pub fn set_value(&self, value: Tensor) -> Result<(), FerrogradError> {
        let mut guard = self.write_data();
        if guard.creator.is_some() {
            return Err(FerrogradError::UnsupportedOperation(
                "set_value on a variable produced by an operation".to_string(),
            ));
        }
        if value.shape_ref() != guard.shape.as_slice() {
            return Err(FerrogradError::ShapeMismatch {
                expected: guard.shape.clone(),
                actual: value.shape(),
                operation: "set_value".to_string(),
            });
        }
        if value.dtype() != guard.dtype {
            return Err(FerrogradError::DTypeMismatch {
                expected: guard.dtype,
                actual: value.dtype(),
                operation: "set_value".to_string(),
            });
        }
        guard.value = Some(value);
        Ok(())
    }

    /// Drops the cached value. Non-leaf values are recomputed on the next
    /// read; a released leaf becomes uninitialized.
    pub fn release_value(&self) {
        let mut guard = self.write_data();
        if guard.creator.is_none() {
            log::warn!(
                "releasing the value of leaf {:?}; it cannot be recomputed",
                guard.name
            );
        }
        guard.value = None;
    }
}

impl Clone for Variable {
    /// Shallow clone sharing the same graph node.
    fn clone(&self) -> Self {
        Variable {
            data: Arc::clone(&self.data),
        }
    }
}

impl Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.read_data();
        f.debug_struct("Variable")
            .field("name", &guard.name)
            .field("shape", &guard.shape)
            .field("dtype", &guard.dtype)
            .field("requires_grad", &guard.requires_grad)
            .field("creator", &guard.creator.as_ref().map(|c| c.name()))
            .field("has_grad", &guard.grad.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "variable_test.rs"]
mod tests;
