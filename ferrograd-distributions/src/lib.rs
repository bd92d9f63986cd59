//! Probability distributions whose parameters are ferrograd [`Variable`]s.
//!
//! Densities, moments and entropies are built from catalog operations, so
//! they can be differentiated with respect to the parameters (twice, when
//! needed). Reparameterised samplers (`Uniform`, `StudentT`) are
//! differentiable too; `Bernoulli` samples are constants.
//!
//! [`Variable`]: ferrograd_core::Variable

pub mod bernoulli;
pub mod distribution;
pub mod student_t;
pub mod uniform;

pub use bernoulli::Bernoulli;
pub use distribution::Distribution;
pub use student_t::StudentT;
pub use uniform::Uniform;
