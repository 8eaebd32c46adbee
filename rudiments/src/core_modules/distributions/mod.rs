// THEORY:
// Probability distributions as small immutable values. Every distribution is
// built through a validating constructor, so a value that exists always has
// legal parameters, and the formulas below never need to re-check them.
//
// Each one answers the same questions through `RandomVariable`: where its mass
// lives (`support`), its first two moments, the mass/density and cumulative
// functions, the moment generating function, and a random draw. Closed forms
// come from the textbook definitions; the cumulative functions of the gamma
// family go through the regularized incomplete gamma in `special`, and those of
// the binomial family through the regularized incomplete beta. `special` wraps
// the `statrs` implementations.
//
// Sampling is delegated to `rand_distr`. The sampler is built once in the
// constructor and stored beside the parameters.

pub mod continuous;
pub mod discrete;
pub mod multinomial;
pub mod special;

pub use continuous::{Exponential, Gamma, Normal, StandardNormal, UniformContinuous};
pub use discrete::{
    Bernoulli, Binomial, Geometric, Hypergeometric, NegativeBinomial, Poisson, UniformDiscrete,
};
pub use multinomial::Multinomial;

use crate::error::{Result, RudimentsError};
use rand::Rng;

/// Closed or half-open range of values a random variable can take. `None`
/// marks an unbounded side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Support<T> {
    pub lower: Option<T>,
    pub upper: Option<T>,
}

impl<T: PartialOrd> Support<T> {
    pub fn bounded(lower: T, upper: T) -> Self {
        Self {
            lower: Some(lower),
            upper: Some(upper),
        }
    }

    pub fn from_lower(lower: T) -> Self {
        Self {
            lower: Some(lower),
            upper: None,
        }
    }

    pub fn unbounded() -> Self {
        Self {
            lower: None,
            upper: None,
        }
    }

    pub fn contains(&self, x: &T) -> bool {
        self.lower.as_ref().is_none_or(|l| x >= l) && self.upper.as_ref().is_none_or(|u| x <= u)
    }
}

/// Common interface of the univariate distributions.
pub trait RandomVariable {
    /// `i64` for discrete variables, `f64` for continuous ones.
    type Value: Copy + PartialOrd;

    fn support(&self) -> Support<Self::Value>;

    fn expectation(&self) -> f64;

    fn variance(&self) -> f64;

    fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// `P(X <= x)`.
    fn cdf(&self, x: Self::Value) -> f64;

    /// Probability mass (discrete) or density (continuous) at `x`.
    fn pdf(&self, x: Self::Value) -> f64;

    /// `E[e^(tX)]`; `+inf` where it diverges.
    fn mgf(&self, t: f64) -> f64;

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Value;
}

pub(crate) fn check_probability(name: &str, p: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(RudimentsError::invalid_parameter(format!(
            "{} must be a probability in [0, 1], got {}",
            name, p
        )))
    }
}

pub(crate) fn check_positive(name: &str, value: f64) -> Result<f64> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(RudimentsError::invalid_parameter(format!(
            "{} must be positive and finite, got {}",
            name, value
        )))
    }
}

pub(crate) fn sampler_error(error: impl std::fmt::Display) -> RudimentsError {
    RudimentsError::invalid_parameter(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn support_bounds() {
        let s = Support::bounded(0, 10);
        assert!(s.contains(&0) && s.contains(&10));
        assert!(!s.contains(&11));
        assert!(Support::from_lower(1.0).contains(&1e300));
        assert!(Support::<f64>::unbounded().contains(&-1e300));
    }

    #[test]
    fn parameter_checks() {
        assert!(check_probability("p", 0.5).is_ok());
        assert!(check_probability("p", 1.5).is_err());
        assert!(check_probability("p", f64::NAN).is_err());
        assert!(check_positive("rate", 0.0).is_err());
        assert!(check_positive("rate", f64::INFINITY).is_err());
    }
}
