//! Newton's method on f(x) = x^4 - 3x^2 + x, using the engine for both the
//! first and the second derivative.

use ferrograd_core::ops::arithmetic::{add_op, mul_scalar, pow_scalar_op, sub_op};
use ferrograd_core::{grad, FerrogradError, Tensor, Variable};

fn f(x: &Variable) -> Result<Variable, FerrogradError> {
    let quartic = pow_scalar_op(x, 4.0)?;
    let quadratic = mul_scalar(&pow_scalar_op(x, 2.0)?, 3.0)?;
    add_op(&sub_op(&quartic, &quadratic)?, x)
}

fn main() -> Result<(), FerrogradError> {
    let _ = env_logger::builder().try_init();

    let mut x0 = 2.0f64;
    for step in 0..8 {
        let x = Variable::new_requires_grad(Tensor::new_f64(vec![x0], vec![1])?);
        let y = f(&x)?;
        let g = grad(&[y.clone()], &[x.clone()], &[], true)?
            .remove(0)
            .ok_or(FerrogradError::RequiresGradNotMet)?;
        let h = grad(&[g.clone()], &[x.clone()], &[], false)?
            .remove(0)
            .ok_or(FerrogradError::RequiresGradNotMet)?;

        let (fx, gx, hx) = (y.value()?.item()?, g.value()?.item()?, h.value()?.item()?);
        println!("step {step}: x = {x0:.10}, f = {fx:.10}, f' = {gx:.3e}, f'' = {hx:.4}");
        if gx.abs() < 1e-12 {
            break;
        }
        x0 -= gx / hx;
    }
    Ok(())
}
