use crate::autograd::{apply_op_single, single_grad_output, BackwardContext, Operation};
use crate::error::FerrogradError;
use crate::ops::unary_input;
use crate::tensor::{validate_permutation, Tensor};
use crate::variable::Variable;

#[derive(Debug)]
pub struct TransposeOp {
    perm: Vec<usize>,
}

impl Operation for TransposeOp {
    fn name(&self) -> &'static str {
        "transpose"
    }

    fn forward(&self, inputs: &[Tensor]) -> Result<Vec<Tensor>, FerrogradError> {
        let x = unary_input(inputs, self.name())?;
        Ok(vec![x.transpose(&self.perm)?])
    }

    fn backward(
        &self,
        _ctx: &BackwardContext<'_>,
        grad_outputs: &[Option<Variable>],
    ) -> Result<Vec<Option<Variable>>, FerrogradError> {
        let Some(gy) = single_grad_output(grad_outputs) else {
            return Ok(vec![None]);
        };
        let mut inverse = vec![0; self.perm.len()];
        for (i, &p) in self.perm.iter().enumerate() {
            inverse[p] = i;
        }
        Ok(vec![Some(transpose_op(gy, Some(&inverse))?)])
    }
}

/// Permutes the axes of `x`. `None` reverses them.
///
/// # Errors
/// `InvalidPermutation` if `perm` is not a permutation of `0..ndim`.
pub fn transpose_op(x: &Variable, perm: Option<&[usize]>) -> Result<Variable, FerrogradError> {
    let rank = x.ndim();
    let perm: Vec<usize> = match perm {
        Some(perm) => perm.to_vec(),
        None => (0..rank).rev().collect(),
    };
    validate_permutation(&perm, rank)?;
    apply_op_single(TransposeOp { perm }, &[x])
}

#[cfg(test)]
#[path = "transpose_test.rs"]
mod tests;
