use super::*;
use approx::assert_relative_eq;

fn var(data: Vec<f64>) -> Variable {
    let n = data.len();
    Variable::new(Tensor::new_f64(data, vec![n]).expect("Failed to create test tensor"))
}

fn param(data: Vec<f64>) -> Variable {
    let v = var(data);
    v.requires_grad_(true).expect("leaf");
    v
}

fn values(v: &Variable) -> Vec<f64> {
    v.value().expect("value").to_f64_vec()
}

fn grad_values(v: &Variable) -> Vec<f64> {
    v.grad().expect("gradient was not computed").to_f64_vec()
}

#[test]
fn test_new_checks_parameters() {
    let result = StudentT::new(var(vec![3.0]), var(vec![0.0, 1.0]), var(vec![1.0]));
    assert!(matches!(result, Err(FerrogradError::ShapeMismatch { .. })));
}

#[test]
fn test_log_prob_values() -> Result<(), FerrogradError> {
    let d = StudentT::new(var(vec![3.0, 3.0, 1.0]), var(vec![0.0, 0.5, 0.0]), var(vec![1.0, 2.0, 1.0]))?;
    let lp = values(&d.log_prob(&var(vec![0.0, 2.5, 3.0]))?);
    assert_relative_eq!(lp[0], -1.0008888496235098, epsilon = 1e-10);
    assert_relative_eq!(lp[1], -2.2694001750870165, epsilon = 1e-10);
    // Cauchy density 1 / (π (1 + x²))
    assert_relative_eq!(lp[2], -(10.0 * PI).ln(), epsilon = 1e-10);
    Ok(())
}

#[test]
fn test_log_prob_gradients() -> Result<(), FerrogradError> {
    let loc = param(vec![-1.0]);
    let scale = param(vec![1.5]);
    let d = StudentT::new(var(vec![5.0]), loc.clone(), scale.clone())?;
    let lp = d.log_prob(&var(vec![0.7]))?;
    assert_relative_eq!(lp.value()?.item()?, -2.0600032926168814, epsilon = 1e-10);
    lp.sum_all()?.backward()?;
    assert_relative_eq!(grad_values(&loc)[0], 0.7213578500707214, epsilon = 1e-10);
    assert_relative_eq!(grad_values(&scale)[0], 0.15087223008015094, epsilon = 1e-10);
    Ok(())
}

#[test]
fn test_mean_defined_only_above_one() -> Result<(), FerrogradError> {
    let d = StudentT::new(var(vec![0.5, 3.0]), var(vec![1.0, 2.0]), var(vec![1.0, 1.0]))?;
    let m = values(&d.mean()?);
    assert!(m[0].is_nan());
    assert_eq!(m[1], 2.0);
    Ok(())
}

#[test]
fn test_variance_regimes() -> Result<(), FerrogradError> {
    let scale = param(vec![1.0, 1.5, 1.0]);
    let d = StudentT::new(var(vec![1.5, 5.0, 0.5]), var(vec![0.0, 0.0, 0.0]), scale.clone())?;
    let v = d.variance()?;
    let vals = values(&v);
    assert_eq!(vals[0], f64::INFINITY);
    assert_relative_eq!(vals[1], 2.25 * 5.0 / 3.0, epsilon = 1e-12);
    assert!(vals[2].is_nan());

    index_one(&v)?.backward()?;
    assert_relative_eq!(grad_values(&scale)[1], 5.0, epsilon = 1e-12);
    assert_eq!(grad_values(&scale)[0], 0.0);
    Ok(())
}

/// Picks element 1 of a length-3 vector through a differentiable mask.
fn index_one(v: &Variable) -> Result<Variable, FerrogradError> {
    let mask = Tensor::new_f64(vec![0.0, 1.0, 0.0], vec![3])?;
    let zero = var(vec![0.0, 0.0, 0.0]);
    where_op(&mask, v, &zero)?.sum_all()
}

#[test]
fn test_entropy_values() -> Result<(), FerrogradError> {
    let scale = param(vec![1.0, 2.0, 1.5]);
    let d = StudentT::new(var(vec![1.0, 1.0, 5.0]), var(vec![0.0, 3.0, -2.0]), scale.clone())?;
    let h = d.entropy()?;
    let vals = values(&h);
    assert_relative_eq!(vals[0], (4.0 * PI).ln(), epsilon = 1e-9);
    assert_relative_eq!(vals[1], 3.224171427529236, epsilon = 1e-9);
    assert_relative_eq!(vals[2], 2.032967780522535, epsilon = 1e-9);

    h.sum_all()?.backward()?;
    let g = grad_values(&scale);
    assert_relative_eq!(g[1], 0.5, epsilon = 1e-12);
    assert_relative_eq!(g[2], 1.0 / 1.5, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_sample_statistics_and_pathwise_gradient() -> Result<(), FerrogradError> {
    let n = 20000;
    let loc = param(vec![3.0]);
    let scale = param(vec![0.5]);
    let d = StudentT::new(var(vec![10.0]), loc.clone(), scale.clone())?;
    let samples = d.sample_n(n)?;
    assert_eq!(samples.shape(), vec![n, 1]);

    let xs = values(&samples);
    let mean = xs.iter().sum::<f64>() / n as f64;
    let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
    assert!((mean - 3.0).abs() < 0.05, "sample mean {}", mean);
    assert!((var - 0.3125).abs() < 0.05, "sample variance {}", var);

    samples.sum_all()?.backward()?;
    assert_relative_eq!(grad_values(&loc)[0], n as f64, epsilon = 1e-9);
    Ok(())
}

#[test]
fn test_sample_rejects_invalid_degrees_of_freedom() -> Result<(), FerrogradError> {
    let d = StudentT::new(var(vec![-1.0]), var(vec![0.0]), var(vec![1.0]))?;
    assert!(matches!(d.sample_n(4), Err(FerrogradError::InvalidArgument(_))));
    Ok(())
}

#[test]
fn test_support_and_shapes() -> Result<(), FerrogradError> {
    let d = StudentT::new(var(vec![3.0, 4.0]), var(vec![0.0, 0.0]), var(vec![1.0, 1.0]))?;
    assert_eq!(d.support(), "real");
    assert_eq!(d.batch_shape(), vec![2]);
    assert_eq!(d.sample(&[2, 3])?.shape(), vec![2, 3, 2]);
    Ok(())
}
