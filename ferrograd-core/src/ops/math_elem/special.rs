//! Scalar gamma-family functions used by the `lgamma`, `digamma` and
//! `polygamma` operations. All of them work in f64.

use std::f64::consts::PI;

const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEFFS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// B2, B4, ..., B14.
const BERNOULLI_EVEN: [f64; 7] = [
    1.0 / 6.0,
    -1.0 / 30.0,
    1.0 / 42.0,
    -1.0 / 30.0,
    5.0 / 66.0,
    -691.0 / 2730.0,
    7.0 / 6.0,
];

fn is_non_positive_integer(x: f64) -> bool {
    x <= 0.0 && x == x.floor()
}

/// `ln |Γ(x)|`. Poles (non-positive integers) give `+inf`.
pub fn ln_gamma(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if is_non_positive_integer(x) {
        return f64::INFINITY;
    }
    if x < 0.5 {
        // Reflection: Γ(x)Γ(1 - x) = π / sin(πx)
        return (PI / (PI * x).sin().abs()).ln() - ln_gamma(1.0 - x);
    }
    let x = x - 1.0;
    let t = x + LANCZOS_G + 0.5;
    let series = LANCZOS_COEFFS
        .iter()
        .enumerate()
        .skip(1)
        .fold(LANCZOS_COEFFS[0], |acc, (i, &c)| acc + c / (x + i as f64));
    0.5 * (2.0 * PI).ln() + (x + 0.5) * t.ln() - t + series.ln()
}

/// `ψ(x) = d/dx ln Γ(x)`. Poles give NaN.
pub fn digamma(x: f64) -> f64 {
    if x.is_nan() || is_non_positive_integer(x) {
        return f64::NAN;
    }
    let mut x = x;
    let mut result = 0.0;
    if x <= 0.0 {
        // Reflection: ψ(1 - x) - ψ(x) = π cot(πx)
        result -= PI / (PI * x).tan();
        x = 1.0 - x;
    }
    while x < 10.0 {
        result -= 1.0 / x;
        x += 1.0;
    }
    let inv = 1.0 / x;
    let inv2 = inv * inv;
    let tail = inv2
        * (1.0 / 12.0
            - inv2 * (1.0 / 120.0 - inv2 * (1.0 / 252.0 - inv2 * (1.0 / 240.0 - inv2 / 132.0))));
    result + x.ln() - 0.5 * inv - tail
}

/// `ψ⁽ⁿ⁾(x)`, the n-th derivative of the digamma function.
///
/// `n = 0` is `digamma`. Poles (non-positive integers) give NaN.
pub fn polygamma(n: u32, x: f64) -> f64 {
    if n == 0 {
        return digamma(x);
    }
    if x.is_nan() || is_non_positive_integer(x) {
        return f64::NAN;
    }
    let nf = n as f64;
    let power = n as i32 + 1;

    // ψ⁽ⁿ⁾(x) = (-1)^(n+1) n! Σ_k (x + k)^-(n+1); sum the head exactly.
    // Negative x walks up through the recurrence ψ⁽ⁿ⁾(x + 1) = ψ⁽ⁿ⁾(x) + (-1)^n n! / x^(n+1).
    let mut z = x;
    let mut head = 0.0;
    while z < 20.0 {
        head += z.powi(-power);
        z += 1.0;
    }

    // Asymptotic tail at z:
    // 1/(n z^n) + 1/(2 z^(n+1)) + Σ_k B_2k (2k+n-1)! / ((2k)! n! z^(2k+n))
    let mut tail = 1.0 / (nf * z.powi(n as i32)) + 0.5 * z.powi(-power);
    let mut ratio = 1.0 / nf;
    let mut z_pow = z.powi(n as i32);
    for (i, &b) in BERNOULLI_EVEN.iter().enumerate() {
        let two_k = 2.0 * (i as f64 + 1.0);
        ratio *= (two_k + nf - 2.0) * (two_k + nf - 1.0) / ((two_k - 1.0) * two_k);
        z_pow *= z * z;
        tail += b * ratio / z_pow;
    }

    let sign = if n % 2 == 1 { 1.0 } else { -1.0 };
    let factorial: f64 = (1..=n).map(f64::from).product();
    sign * factorial * (head + tail)
}

#[cfg(test)]
#[path = "special_test.rs"]
mod tests;
