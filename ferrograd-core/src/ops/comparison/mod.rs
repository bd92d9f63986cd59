pub mod where_op;

pub use where_op::where_op;
