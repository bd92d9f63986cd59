pub mod add;
pub mod div;
pub mod mul;
pub mod neg;
pub mod pow;
pub mod scalar;
pub mod sub;

pub use add::add_op;
pub use div::div_op;
pub use mul::mul_op;
pub use neg::neg_op;
pub use pow::pow_scalar_op;
pub use scalar::{add_scalar, div_scalar, mul_scalar, rsub_scalar};
pub use sub::sub_op;
