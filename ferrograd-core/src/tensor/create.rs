use std::sync::Arc;

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::buffer::Buffer;
use crate::error::FerrogradError;
use crate::tensor::Tensor;
use crate::types::DType;

/// Creates a new F32 tensor filled with zeros with the specified shape.
pub fn zeros(shape: &[usize]) -> Result<Tensor, FerrogradError> {
    full(shape, 0.0)
}

/// Creates a new F64 tensor filled with zeros with the specified shape.
pub fn zeros_f64(shape: &[usize]) -> Result<Tensor, FerrogradError> {
    full_f64(shape, 0.0)
}

/// Creates a new F32 tensor filled with ones with the specified shape.
pub fn ones(shape: &[usize]) -> Result<Tensor, FerrogradError> {
    full(shape, 1.0)
}

/// Creates a new F64 tensor filled with ones with the specified shape.
pub fn ones_f64(shape: &[usize]) -> Result<Tensor, FerrogradError> {
    full_f64(shape, 1.0)
}

/// Creates a new F32 tensor filled with `value`.
pub fn full(shape: &[usize], value: f32) -> Result<Tensor, FerrogradError> {
    let numel = shape.iter().product();
    Tensor::new(vec![value; numel], shape.to_vec())
}

/// Creates a new F64 tensor filled with `value`.
pub fn full_f64(shape: &[usize], value: f64) -> Result<Tensor, FerrogradError> {
    let numel = shape.iter().product();
    Tensor::new_f64(vec![value; numel], shape.to_vec())
}

/// Creates a new F32 tensor from a vector of data and a shape.
pub fn from_vec_f32(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Tensor, FerrogradError> {
    Tensor::new(data_vec, shape)
}

/// Creates a new F64 tensor from a vector of data and a shape.
pub fn from_vec_f64(data_vec: Vec<f64>, shape: Vec<usize>) -> Result<Tensor, FerrogradError> {
    Tensor::new_f64(data_vec, shape)
}

/// Creates a tensor of the given shape and dtype filled with `value`.
pub fn filled(shape: &[usize], value: f64, dtype: DType) -> Tensor {
    let numel = shape.iter().product();
    let buffer = match dtype {
        DType::F32 => Buffer::F32(Arc::new(vec![value as f32; numel])),
        DType::F64 => Buffer::F64(Arc::new(vec![value; numel])),
    };
    Tensor::from_parts(buffer, shape.to_vec())
}

/// Creates a shape-`[]` tensor holding `value`.
pub fn scalar(value: f64, dtype: DType) -> Tensor {
    filled(&[], value, dtype)
}

/// Creates a tensor filled with `value`, with the shape and dtype of `tensor`.
pub fn full_like(tensor: &Tensor, value: f64) -> Tensor {
    filled(tensor.shape_ref(), value, tensor.dtype())
}

/// Creates a new tensor filled with zeros, with the shape and dtype of `tensor`.
pub fn zeros_like(tensor: &Tensor) -> Tensor {
    full_like(tensor, 0.0)
}

/// Creates a new tensor filled with ones, with the shape and dtype of `tensor`.
pub fn ones_like(tensor: &Tensor) -> Tensor {
    full_like(tensor, 1.0)
}

/// Samples uniformly from `[0, 1)`.
pub fn rand(shape: &[usize], dtype: DType) -> Tensor {
    rand_range(shape, 0.0, 1.0, dtype)
}

/// Samples uniformly from `[low, high)`.
pub fn rand_range(shape: &[usize], low: f64, high: f64, dtype: DType) -> Tensor {
    let numel = shape.iter().product();
    let mut rng = rand::thread_rng();
    let data_vec: Vec<f64> = (0..numel)
        .map(|_| low + (high - low) * rng.gen::<f64>())
        .collect();
    Tensor::from_parts(Buffer::F64(Arc::new(data_vec)), shape.to_vec()).cast(dtype)
}

/// Samples from the standard normal distribution.
pub fn randn(shape: &[usize], dtype: DType) -> Tensor {
    let numel = shape.iter().product();
    let mut rng = rand::thread_rng();
    let data_vec: Vec<f64> = (0..numel).map(|_| StandardNormal.sample(&mut rng)).collect();
    Tensor::from_parts(Buffer::F64(Arc::new(data_vec)), shape.to_vec()).cast(dtype)
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
