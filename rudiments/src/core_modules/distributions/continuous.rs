//! Real-valued distributions.

use super::special::{erfc, ln_gamma, regularized_lower_gamma};
use super::{RandomVariable, Support, check_positive, sampler_error};
use crate::error::{Result, RudimentsError};
use rand::Rng;
use rand_distr::{Distribution, Exp, Uniform};
use std::f64::consts::{PI, SQRT_2};
use tracing::warn;

/// Equally likely reals in `[a, b)`.
#[derive(Debug, Clone)]
pub struct UniformContinuous {
    a: f64,
    b: f64,
    sampler: Uniform<f64>,
}

impl UniformContinuous {
    pub fn new(a: f64, b: f64) -> Result<Self> {
        if !a.is_finite() || !b.is_finite() || a >= b {
            return Err(RudimentsError::invalid_parameter(format!(
                "uniform bounds must be finite with a < b, got [{}, {}]",
                a, b
            )));
        }
        Ok(Self {
            a,
            b,
            sampler: Uniform::new(a, b),
        })
    }
}

impl RandomVariable for UniformContinuous {
    type Value = f64;

    fn support(&self) -> Support<f64> {
        Support::bounded(self.a, self.b)
    }

    fn expectation(&self) -> f64 {
        (self.a + self.b) / 2.0
    }

    fn variance(&self) -> f64 {
        (self.b - self.a).powi(2) / 12.0
    }

    fn cdf(&self, x: f64) -> f64 {
        ((x - self.a) / (self.b - self.a)).clamp(0.0, 1.0)
    }

    fn pdf(&self, x: f64) -> f64 {
        if self.support().contains(&x) {
            1.0 / (self.b - self.a)
        } else {
            0.0
        }
    }

    fn mgf(&self, t: f64) -> f64 {
        if t == 0.0 {
            return 1.0;
        }
        ((t * self.b).exp() - (t * self.a).exp()) / (t * (self.b - self.a))
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.sampler.sample(rng)
    }
}

/// Waiting time between events at rate `lambda`.
#[derive(Debug, Clone)]
pub struct Exponential {
    lambda: f64,
    sampler: Exp<f64>,
}

impl Exponential {
    pub fn new(lambda: f64) -> Result<Self> {
        let lambda = check_positive("lambda", lambda)?;
        Ok(Self {
            lambda,
            sampler: Exp::new(lambda).map_err(sampler_error)?,
        })
    }
}

impl RandomVariable for Exponential {
    type Value = f64;

    fn support(&self) -> Support<f64> {
        Support::from_lower(0.0)
    }

    fn expectation(&self) -> f64 {
        1.0 / self.lambda
    }

    fn variance(&self) -> f64 {
        1.0 / (self.lambda * self.lambda)
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        -(-self.lambda * x).exp_m1()
    }

    fn pdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return 0.0;
        }
        self.lambda * (-self.lambda * x).exp()
    }

    fn mgf(&self, t: f64) -> f64 {
        if t >= self.lambda {
            return f64::INFINITY;
        }
        self.lambda / (self.lambda - t)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.sampler.sample(rng)
    }
}

/// Gamma distribution with shape `k` and scale `theta`.
#[derive(Debug, Clone)]
pub struct Gamma {
    shape: f64,
    scale: f64,
    sampler: rand_distr::Gamma<f64>,
}

impl Gamma {
    pub fn new(shape: f64, scale: f64) -> Result<Self> {
        let shape = check_positive("shape", shape)?;
        let scale = check_positive("scale", scale)?;
        Ok(Self {
            shape,
            scale,
            sampler: rand_distr::Gamma::new(shape, scale).map_err(sampler_error)?,
        })
    }
}

impl RandomVariable for Gamma {
    type Value = f64;

    fn support(&self) -> Support<f64> {
        Support::from_lower(0.0)
    }

    fn expectation(&self) -> f64 {
        self.shape * self.scale
    }

    fn variance(&self) -> f64 {
        self.shape * self.scale * self.scale
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        regularized_lower_gamma(self.shape, x / self.scale)
    }

    fn pdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return 0.0;
        }
        if x == 0.0 {
            return match self.shape {
                k if k < 1.0 => f64::INFINITY,
                k if k == 1.0 => 1.0 / self.scale,
                _ => 0.0,
            };
        }
        ((self.shape - 1.0) * x.ln() - x / self.scale - ln_gamma(self.shape)
            - self.shape * self.scale.ln())
        .exp()
    }

    fn mgf(&self, t: f64) -> f64 {
        if t >= 1.0 / self.scale {
            return f64::INFINITY;
        }
        (1.0 - self.scale * t).powf(-self.shape)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.sampler.sample(rng)
    }
}

/// Normal distribution with mean `mean` and variance `variance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    mean: f64,
    variance: f64,
}

impl Normal {
    pub fn new(mean: f64, variance: f64) -> Result<Self> {
        let variance = check_positive("variance", variance)?;
        if !mean.is_finite() {
            return Err(RudimentsError::invalid_parameter(format!(
                "mean must be finite, got {}",
                mean
            )));
        }
        Ok(Self { mean, variance })
    }

    /// Like `new`, but invalid parameters fall back to the standard normal.
    pub fn new_or_standard(mean: f64, variance: f64) -> Self {
        Self::new(mean, variance).unwrap_or_else(|error| {
            warn!(mean, variance, %error, "invalid normal parameters, using N(0, 1)");
            Self::standard()
        })
    }

    pub fn standard() -> Self {
        Self {
            mean: 0.0,
            variance: 1.0,
        }
    }
}

impl RandomVariable for Normal {
    type Value = f64;

    fn support(&self) -> Support<f64> {
        Support::unbounded()
    }

    fn expectation(&self) -> f64 {
        self.mean
    }

    fn variance(&self) -> f64 {
        self.variance
    }

    fn cdf(&self, x: f64) -> f64 {
        0.5 * erfc(-(x - self.mean) / (self.std_dev() * SQRT_2))
    }

    fn pdf(&self, x: f64) -> f64 {
        let z = x - self.mean;
        (-z * z / (2.0 * self.variance)).exp() / (2.0 * PI * self.variance).sqrt()
    }

    fn mgf(&self, t: f64) -> f64 {
        (self.mean * t + self.variance * t * t / 2.0).exp()
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let z: f64 = rand_distr::StandardNormal.sample(rng);
        self.mean + self.std_dev() * z
    }
}

/// The normal distribution with mean 0 and variance 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardNormal;

impl StandardNormal {
    /// The z-score of `x` under `N(mean, variance)`.
    pub fn z_score(x: f64, mean: f64, variance: f64) -> f64 {
        (x - mean) / variance.sqrt()
    }
}

impl RandomVariable for StandardNormal {
    type Value = f64;

    fn support(&self) -> Support<f64> {
        Support::unbounded()
    }

    fn expectation(&self) -> f64 {
        0.0
    }

    fn variance(&self) -> f64 {
        1.0
    }

    fn cdf(&self, x: f64) -> f64 {
        0.5 * erfc(-x / SQRT_2)
    }

    fn pdf(&self, x: f64) -> f64 {
        (-x * x / 2.0).exp() / (2.0 * PI).sqrt()
    }

    fn mgf(&self, t: f64) -> f64 {
        (t * t / 2.0).exp()
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rand_distr::StandardNormal.sample(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sample_moments<D: RandomVariable<Value = f64>>(dist: &D, seed: u64) -> (f64, f64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let draws: Vec<f64> = (0..20_000).map(|_| dist.sample(&mut rng)).collect();
        let mean = draws.iter().sum::<f64>() / draws.len() as f64;
        let variance =
            draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (draws.len() - 1) as f64;
        (mean, variance)
    }

    #[test]
    fn uniform() {
        let d = UniformContinuous::new(2.0, 6.0).unwrap();
        assert_eq!(d.pdf(3.0), 0.25);
        assert_eq!(d.pdf(7.0), 0.0);
        assert_eq!(d.cdf(5.0), 0.75);
        assert_eq!(d.cdf(-1.0), 0.0);
        assert_relative_eq!(d.variance(), 16.0 / 12.0);
        assert_eq!(d.mgf(0.0), 1.0);
        assert!(UniformContinuous::new(1.0, 1.0).is_err());
        let (mean, _) = sample_moments(&d, 1);
        assert!((mean - 4.0).abs() < 0.05);
    }

    #[test]
    fn exponential() {
        let d = Exponential::new(2.0).unwrap();
        assert_relative_eq!(d.cdf(1.0), 1.0 - (-2f64).exp(), epsilon = 1e-15);
        assert_relative_eq!(d.pdf(0.0), 2.0);
        assert_relative_eq!(d.mgf(1.0), 2.0);
        assert!(d.mgf(2.0).is_infinite());
        let (mean, variance) = sample_moments(&d, 2);
        assert!((mean - 0.5).abs() < 0.02);
        assert!((variance - 0.25).abs() < 0.02);
    }

    #[test]
    fn gamma_reduces_to_exponential() {
        let g = Gamma::new(1.0, 0.5).unwrap();
        let e = Exponential::new(2.0).unwrap();
        for x in [0.0, 0.1, 0.7, 3.0] {
            assert_relative_eq!(g.pdf(x), e.pdf(x), epsilon = 1e-12);
            assert_relative_eq!(g.cdf(x), e.cdf(x), epsilon = 1e-12);
        }
        let g = Gamma::new(3.0, 2.0).unwrap();
        assert_relative_eq!(g.expectation(), 6.0);
        assert_relative_eq!(g.variance(), 12.0);
        // Erlang(3) cdf at x: 1 - e^(-x/2)(1 + x/2 + x^2/8)
        let x: f64 = 4.0;
        let erlang = 1.0 - (-x / 2.0).exp() * (1.0 + x / 2.0 + x * x / 8.0);
        assert_relative_eq!(g.cdf(x), erlang, epsilon = 1e-12);
        let (mean, _) = sample_moments(&g, 3);
        assert!((mean - 6.0).abs() < 0.1);
        assert!(Gamma::new(0.0, 1.0).is_err());
    }

    #[test]
    fn normal() {
        let d = Normal::new(1.0, 4.0).unwrap();
        assert_relative_eq!(d.cdf(1.0), 0.5, epsilon = 1e-15);
        assert_relative_eq!(d.std_dev(), 2.0);
        assert_relative_eq!(d.pdf(1.0), 1.0 / (8.0 * PI).sqrt(), epsilon = 1e-15);
        assert_relative_eq!(d.mgf(0.5), (0.5f64 + 0.5).exp(), epsilon = 1e-12);
        let (mean, variance) = sample_moments(&d, 4);
        assert!((mean - 1.0).abs() < 0.05);
        assert!((variance - 4.0).abs() < 0.15);
        assert!(Normal::new(0.0, -1.0).is_err());
        assert_eq!(Normal::new_or_standard(0.0, -1.0), Normal::standard());
    }

    #[test]
    fn standard_normal() {
        let z = StandardNormal;
        assert_relative_eq!(z.cdf(1.96), 0.975_002_104_851_779_6, epsilon = 1e-12);
        assert_relative_eq!(z.cdf(-1.96) + z.cdf(1.96), 1.0, epsilon = 1e-14);
        assert_relative_eq!(z.pdf(0.0), 1.0 / (2.0 * PI).sqrt());
        assert_relative_eq!(StandardNormal::z_score(5.0, 1.0, 4.0), 2.0);
        let (mean, variance) = sample_moments(&z, 5);
        assert!(mean.abs() < 0.03);
        assert!((variance - 1.0).abs() < 0.05);
    }
}
