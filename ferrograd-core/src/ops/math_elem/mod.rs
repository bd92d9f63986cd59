pub mod exp;
pub mod gamma;
pub mod ln;
pub mod sigmoid;
pub mod special;
pub mod sqrt;
pub mod tanh;

pub use exp::exp_op;
pub use gamma::{digamma_op, lgamma_op, polygamma_n_op, polygamma_op};
pub use ln::ln_op;
pub use sigmoid::sigmoid_op;
pub use sqrt::sqrt_op;
pub use tanh::tanh_op;
