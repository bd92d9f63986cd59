use super::*;
use approx::assert_relative_eq;

#[test]
fn test_ln_gamma_known_values() {
    assert_relative_eq!(ln_gamma(1.0), 0.0, epsilon = 1e-12);
    assert_relative_eq!(ln_gamma(2.0), 0.0, epsilon = 1e-12);
    assert_relative_eq!(ln_gamma(0.5), 0.572_364_942_924_700_1, epsilon = 1e-10);
    assert_relative_eq!(ln_gamma(5.0), 24.0f64.ln(), epsilon = 1e-10);
    assert_relative_eq!(ln_gamma(100.0), 359.134_205_369_575_4, max_relative = 1e-12);
}

#[test]
fn test_ln_gamma_reflection_and_poles() {
    // Γ(-0.5) = -2√π
    assert_relative_eq!(
        ln_gamma(-0.5),
        (2.0 * PI.sqrt()).ln(),
        epsilon = 1e-10
    );
    assert_eq!(ln_gamma(0.0), f64::INFINITY);
    assert_eq!(ln_gamma(-3.0), f64::INFINITY);
    assert!(ln_gamma(f64::NAN).is_nan());
}

#[test]
fn test_digamma_known_values() {
    let euler_gamma = 0.577_215_664_901_532_9;
    assert_relative_eq!(digamma(1.0), -euler_gamma, epsilon = 1e-10);
    assert_relative_eq!(digamma(0.5), -1.963_510_026_021_423, epsilon = 1e-10);
    assert_relative_eq!(digamma(10.0), 2.251_752_589_066_721, epsilon = 1e-10);
    assert!(digamma(0.0).is_nan());
    assert!(digamma(-2.0).is_nan());
}

#[test]
fn test_digamma_recurrence_negative_argument() {
    // ψ(x + 1) = ψ(x) + 1/x
    let x = -0.5;
    assert_relative_eq!(digamma(x + 1.0), digamma(x) + 1.0 / x, epsilon = 1e-10);
    let x = -1.3;
    assert_relative_eq!(digamma(x + 1.0), digamma(x) + 1.0 / x, epsilon = 1e-9);
}

#[test]
fn test_polygamma_known_values() {
    assert_relative_eq!(polygamma(1, 1.0), PI * PI / 6.0, epsilon = 1e-10);
    assert_relative_eq!(polygamma(2, 1.0), -2.404_113_806_319_188_5, epsilon = 1e-10);
    assert_relative_eq!(polygamma(1, 0.5), PI * PI / 2.0, epsilon = 1e-10);
    assert_relative_eq!(polygamma(3, 1.0), PI.powi(4) / 15.0, epsilon = 1e-9);
    assert_relative_eq!(polygamma(0, 1.0), digamma(1.0));
}

#[test]
fn test_polygamma_matches_digamma_derivative() {
    let x = 3.7;
    let h = 1e-5;
    let numeric = (digamma(x + h) - digamma(x - h)) / (2.0 * h);
    assert_relative_eq!(polygamma(1, x), numeric, max_relative = 1e-7);
}

#[test]
fn test_polygamma_poles_are_nan() {
    assert!(polygamma(1, 0.0).is_nan());
    assert!(polygamma(2, -3.0).is_nan());
    assert!(polygamma(1, f64::NAN).is_nan());
}

#[test]
fn test_polygamma_negative_argument() {
    // ψ'(-1/2) = π²/2 + 4
    assert_relative_eq!(polygamma(1, -0.5), PI * PI / 2.0 + 4.0, epsilon = 1e-9);
    // ψ''(1/2) = -14 ζ(3), then two steps down the recurrence
    assert_relative_eq!(polygamma(2, -0.5), -0.8287966442343198, epsilon = 1e-9);
    assert_relative_eq!(polygamma(2, -1.5), -0.2362040516417272, epsilon = 1e-9);
}
