//! Special functions backing the distribution formulas. The numerics come from
//! `statrs`; the wrappers here pin down the edges of each domain so the
//! distributions get `NaN` or a limit value instead of a panic.

use statrs::function::{beta, erf as statrs_erf, gamma};

/// Natural log of `Γ(x)` for `x > 0`. Zero and the negative integers are
/// poles and give `+inf`; other non-positive arguments give `NaN`.
pub fn ln_gamma(x: f64) -> f64 {
    if x.is_nan() || x == f64::NEG_INFINITY {
        return f64::NAN;
    }
    if x <= 0.0 {
        return if x.fract() == 0.0 { f64::INFINITY } else { f64::NAN };
    }
    gamma::ln_gamma(x)
}

/// `ln(n!)`.
pub fn ln_factorial(n: u64) -> f64 {
    ln_gamma(n as f64 + 1.0)
}

/// `ln(n choose k)`; `-inf` when `k > n`.
pub fn ln_choose(n: u64, k: u64) -> f64 {
    if k > n {
        return f64::NEG_INFINITY;
    }
    if k == 0 || k == n {
        return 0.0;
    }
    ln_factorial(n) - ln_factorial(k) - ln_factorial(n - k)
}

/// Regularized lower incomplete gamma `P(a, x)`. `NaN` outside `a > 0, x >= 0`.
pub fn regularized_lower_gamma(a: f64, x: f64) -> f64 {
    if a.is_nan() || x.is_nan() || a <= 0.0 || x < 0.0 || a.is_infinite() {
        return f64::NAN;
    }
    if x == 0.0 {
        return 0.0;
    }
    if x.is_infinite() {
        return 1.0;
    }
    gamma::gamma_lr(a, x)
}

/// Regularized upper incomplete gamma `Q(a, x) = 1 - P(a, x)`.
pub fn regularized_upper_gamma(a: f64, x: f64) -> f64 {
    if a.is_nan() || x.is_nan() || a <= 0.0 || x < 0.0 || a.is_infinite() {
        return f64::NAN;
    }
    if x == 0.0 {
        return 1.0;
    }
    if x.is_infinite() {
        return 0.0;
    }
    gamma::gamma_ur(a, x)
}

/// Regularized incomplete beta `I_x(a, b)`. `NaN` outside `a, b > 0` and
/// `0 <= x <= 1`.
pub fn regularized_beta(a: f64, b: f64, x: f64) -> f64 {
    if a.is_nan() || b.is_nan() || x.is_nan() || a <= 0.0 || b <= 0.0 {
        return f64::NAN;
    }
    if !(0.0..=1.0).contains(&x) || a.is_infinite() || b.is_infinite() {
        return f64::NAN;
    }
    if x == 0.0 {
        return 0.0;
    }
    if x == 1.0 {
        return 1.0;
    }
    beta::beta_reg(a, b, x).clamp(0.0, 1.0)
}

/// The error function.
pub fn erf(x: f64) -> f64 {
    statrs_erf::erf(x)
}

/// The complementary error function, accurate in the upper tail.
pub fn erfc(x: f64) -> f64 {
    statrs_erf::erfc(x)
}
