// src/tensor/kernels.rs
//
// Dtype-generic CPU loops shared by the tensor methods. Every kernel reads
// contiguous row-major inputs and writes a fresh contiguous output.

use num_traits::Float;

use super::utils::{broadcast_strides, calculate_strides, increment_coord, offset_of};

/// Applies `op` elementwise over two inputs broadcast to `out_shape`.
pub(crate) fn broadcast_zip<T, F>(
    a: &[T],
    a_shape: &[usize],
    b: &[T],
    b_shape: &[usize],
    out_shape: &[usize],
    op: F,
) -> Vec<T>
where
    T: Copy,
    F: Fn(T, T) -> T,
{
    let numel: usize = out_shape.iter().product();
    // Fast path: identical shapes need no index arithmetic.
    if a_shape == out_shape && b_shape == out_shape {
        return a.iter().zip(b).map(|(&x, &y)| op(x, y)).collect();
    }
    let a_strides = broadcast_strides(a_shape, out_shape);
    let b_strides = broadcast_strides(b_shape, out_shape);
    let mut coord = vec![0; out_shape.len()];
    let mut result = Vec::with_capacity(numel);
    for _ in 0..numel {
        let va = a[offset_of(&coord, &a_strides)];
        let vb = b[offset_of(&coord, &b_strides)];
        result.push(op(va, vb));
        increment_coord(&mut coord, out_shape);
    }
    result
}

/// Materialises `src` broadcast to `out_shape`.
pub(crate) fn gather<T: Copy>(src: &[T], src_shape: &[usize], out_shape: &[usize]) -> Vec<T> {
    let numel: usize = out_shape.iter().product();
    if src_shape == out_shape {
        return src.to_vec();
    }
    let strides = broadcast_strides(src_shape, out_shape);
    let mut coord = vec![0; out_shape.len()];
    let mut result = Vec::with_capacity(numel);
    for _ in 0..numel {
        result.push(src[offset_of(&coord, &strides)]);
        increment_coord(&mut coord, out_shape);
    }
    result
}

/// Sums `src` over `axes` (sorted, deduplicated, in range).
///
/// Returns the data together with the reduced shape (size-1 dims kept when
/// `keep_dims` is set).
pub(crate) fn sum_axes_kernel<T: Float>(
    src: &[T],
    shape: &[usize],
    axes: &[usize],
    keep_dims: bool,
) -> (Vec<T>, Vec<usize>) {
    let kept_shape: Vec<usize> = shape
        .iter()
        .enumerate()
        .map(|(d, &s)| if axes.contains(&d) { 1 } else { s })
        .collect();
    let out_numel: usize = kept_shape.iter().product();
    let out_strides = calculate_strides(&kept_shape);
    // Reduced dims contribute nothing to the output offset.
    let write_strides: Vec<usize> = out_strides
        .iter()
        .enumerate()
        .map(|(d, &s)| if axes.contains(&d) { 0 } else { s })
        .collect();

    let mut result = vec![T::zero(); out_numel];
    let mut coord = vec![0; shape.len()];
    for &value in src {
        let offset = offset_of(&coord, &write_strides);
        result[offset] = result[offset] + value;
        increment_coord(&mut coord, shape);
    }

    let out_shape = if keep_dims {
        kept_shape
    } else {
        shape
            .iter()
            .enumerate()
            .filter(|(d, _)| !axes.contains(d))
            .map(|(_, &s)| s)
            .collect()
    };
    (result, out_shape)
}

/// Permutes the axes of `src`; `perm` must be a valid permutation.
pub(crate) fn transpose_kernel<T: Copy>(src: &[T], shape: &[usize], perm: &[usize]) -> Vec<T> {
    let src_strides = calculate_strides(shape);
    let out_shape: Vec<usize> = perm.iter().map(|&p| shape[p]).collect();
    let read_strides: Vec<usize> = perm.iter().map(|&p| src_strides[p]).collect();
    let numel: usize = shape.iter().product();
    let mut coord = vec![0; out_shape.len()];
    let mut result = Vec::with_capacity(numel);
    for _ in 0..numel {
        result.push(src[offset_of(&coord, &read_strides)]);
        increment_coord(&mut coord, &out_shape);
    }
    result
}

/// Naive `[m, k] x [k, n]` matrix product.
pub(crate) fn matmul_kernel<T: Float>(a: &[T], b: &[T], m: usize, k: usize, n: usize) -> Vec<T> {
    let mut result = vec![T::zero(); m * n];
    for i in 0..m {
        for p in 0..k {
            let a_ip = a[i * k + p];
            for j in 0..n {
                result[i * n + j] = result[i * n + j] + a_ip * b[p * n + j];
            }
        }
    }
    result
}

#[cfg(test)]
#[path = "kernels_test.rs"]
mod tests;
