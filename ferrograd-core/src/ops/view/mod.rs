pub mod broadcast_to;
pub mod reshape;
pub mod sum_to;
pub mod transpose;

pub use broadcast_to::broadcast_to_op;
pub use reshape::reshape_op;
pub use sum_to::sum_to_op;
pub use transpose::transpose_op;
