use std::cmp::max;

use crate::error::FerrogradError;

/// Calculates the strides for a given shape.
/// Strides represent the number of elements to skip in the flattened data array
/// to move one step along each dimension.
///
/// Example:
/// shape = [2, 3] -> strides = [3, 1]
/// shape = [2, 2, 2] -> strides = [4, 2, 1]
pub fn calculate_strides(shape: &[usize]) -> Vec<usize> {
    if shape.is_empty() {
        return vec![];
    }
    let rank = shape.len();
    let mut strides = vec![1; rank];
    for i in (0..rank - 1).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}

/// Determines the output shape resulting from broadcasting two input shapes.
///
/// Follows NumPy broadcasting rules:
/// 1. If the shapes have different numbers of dimensions, prepend 1s to the shorter shape.
/// 2. Compare dimensions element-wise from right to left.
/// 3. Dimensions are compatible if they are equal, or one of them is 1.
pub fn broadcast_shapes(shape_a: &[usize], shape_b: &[usize]) -> Result<Vec<usize>, FerrogradError> {
    let rank_a = shape_a.len();
    let rank_b = shape_b.len();
    let max_rank = max(rank_a, rank_b);
    let mut result_shape = vec![0; max_rank];

    for i in 0..max_rank {
        let dim_a = if i < rank_a { shape_a[rank_a - 1 - i] } else { 1 };
        let dim_b = if i < rank_b { shape_b[rank_b - 1 - i] } else { 1 };

        result_shape[max_rank - 1 - i] = if dim_a == dim_b || dim_b == 1 {
            dim_a
        } else if dim_a == 1 {
            dim_b
        } else {
            return Err(FerrogradError::BroadcastError {
                shape1: shape_a.to_vec(),
                shape2: shape_b.to_vec(),
            });
        };
    }
    Ok(result_shape)
}

/// Strides that read a contiguous tensor of `shape` as if it had been
/// broadcast to `target_shape`: broadcast and prepended dimensions get stride 0.
///
/// `shape` must be broadcastable to `target_shape`.
pub fn broadcast_strides(shape: &[usize], target_shape: &[usize]) -> Vec<usize> {
    let strides = calculate_strides(shape);
    let offset = target_shape.len().saturating_sub(shape.len());
    (0..target_shape.len())
        .map(|i| {
            if i < offset {
                0
            } else {
                let d = i - offset;
                if shape[d] == 1 && target_shape[i] != 1 {
                    0
                } else {
                    strides[d]
                }
            }
        })
        .collect()
}

/// Advances a row-major coordinate counter by one element.
pub(crate) fn increment_coord(coord: &mut [usize], shape: &[usize]) {
    for d in (0..shape.len()).rev() {
        coord[d] += 1;
        if coord[d] < shape[d] {
            return;
        }
        coord[d] = 0;
    }
}

/// Linear offset of `coord` under `strides`.
pub(crate) fn offset_of(coord: &[usize], strides: &[usize]) -> usize {
    coord.iter().zip(strides).map(|(c, s)| c * s).sum()
}

/// Axes that must be summed to bring a gradient of `grad_shape` back to
/// `target_shape` after broadcasting. Returns `None` when `target_shape`
/// does not broadcast to `grad_shape`.
pub fn reduction_axes_for(grad_shape: &[usize], target_shape: &[usize]) -> Option<Vec<usize>> {
    if target_shape.len() > grad_shape.len() {
        return None;
    }
    let lead = grad_shape.len() - target_shape.len();
    let mut axes: Vec<usize> = (0..lead).collect();
    for (i, &target_dim) in target_shape.iter().enumerate() {
        let grad_dim = grad_shape[lead + i];
        if target_dim == grad_dim {
            continue;
        }
        if target_dim == 1 {
            axes.push(lead + i);
        } else {
            return None;
        }
    }
    Some(axes)
}

/// Validates reduction axes against `rank`, returning them sorted and deduplicated.
pub(crate) fn normalize_axes(axes: &[usize], rank: usize) -> Result<Vec<usize>, FerrogradError> {
    let mut processed = Vec::with_capacity(axes.len());
    for &axis in axes {
        if axis >= rank {
            return Err(FerrogradError::InvalidAxis { axis, rank });
        }
        processed.push(axis);
    }
    processed.sort_unstable();
    processed.dedup();
    Ok(processed)
}

#[cfg(test)]
#[path = "utils_test.rs"]
mod tests;
