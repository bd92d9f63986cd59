/// Defines the possible data types for Tensor elements.
///
/// Only floating-point types are differentiable; integer-valued arguments
/// (such as the order of `polygamma`) are carried in float tensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DType {
    /// 32-bit floating-point type.
    #[default]
    F32,
    /// 64-bit floating-point type.
    F64,
}
