//! Integer-valued distributions. Values are `i64`; counts and sizes given to
//! constructors are `u64`.

use super::special::{
    ln_choose, ln_factorial, ln_gamma, regularized_beta, regularized_upper_gamma,
};
use super::{RandomVariable, Support, check_positive, check_probability, sampler_error};
use crate::error::{Result, RudimentsError};
use rand::Rng;
use rand_distr::{Distribution, Uniform};

// Sum of the mass function over `lower..=x`, clipped to the support.
fn cumulative<D: RandomVariable<Value = i64>>(dist: &D, x: i64) -> f64 {
    let support = dist.support();
    let lower = support.lower.unwrap_or(0);
    if x < lower {
        return 0.0;
    }
    let upper = support.upper.map_or(x, |u| u.min(x));
    let total: f64 = (lower..=upper).map(|k| dist.pdf(k)).sum();
    total.min(1.0)
}

// Near the center the incomplete beta loses accuracy once both shape
// parameters pass this size; there the mass is summed directly.
const CLOSED_FORM_LIMIT: f64 = 50_000.0;
// Mass further out than this many standard deviations is below f64 resolution.
const TAIL_SIGMAS: f64 = 40.0;

// `P(X <= x)` given as the incomplete beta `I_t(a, b)`, falling back to a sum
// over the window that holds the mass when both shapes are large.
fn incomplete_beta_cdf<D: RandomVariable<Value = i64>>(
    dist: &D,
    x: i64,
    a: f64,
    b: f64,
    t: f64,
) -> f64 {
    let (mean, sd) = (dist.expectation(), dist.std_dev());
    let z = (x as f64 - mean) / sd;
    if a.min(b) <= CLOSED_FORM_LIMIT || z.abs() > TAIL_SIGMAS {
        return regularized_beta(a, b, t);
    }
    let start = (mean - TAIL_SIGMAS * sd).floor() as i64;
    let lower = dist.support().lower.unwrap_or(0).max(start);
    let total: f64 = (lower..=x).map(|k| dist.pdf(k)).sum();
    total.min(1.0)
}

/// A single trial: 1 with probability `p`, else 0.
#[derive(Debug, Clone)]
pub struct Bernoulli {
    p: f64,
    sampler: rand_distr::Bernoulli,
}

impl Bernoulli {
    pub fn new(p: f64) -> Result<Self> {
        let p = check_probability("p", p)?;
        Ok(Self {
            p,
            sampler: rand_distr::Bernoulli::new(p).map_err(sampler_error)?,
        })
    }

    pub fn p(&self) -> f64 {
        self.p
    }
}

impl RandomVariable for Bernoulli {
    type Value = i64;

    fn support(&self) -> Support<i64> {
        Support::bounded(0, 1)
    }

    fn expectation(&self) -> f64 {
        self.p
    }

    fn variance(&self) -> f64 {
        self.p * (1.0 - self.p)
    }

    fn cdf(&self, x: i64) -> f64 {
        match x {
            x if x < 0 => 0.0,
            0 => 1.0 - self.p,
            _ => 1.0,
        }
    }

    fn pdf(&self, x: i64) -> f64 {
        match x {
            0 => 1.0 - self.p,
            1 => self.p,
            _ => 0.0,
        }
    }

    fn mgf(&self, t: f64) -> f64 {
        1.0 - self.p + self.p * t.exp()
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        i64::from(self.sampler.sample(rng))
    }
}

/// Number of successes in `n` independent trials.
#[derive(Debug, Clone)]
pub struct Binomial {
    n: u64,
    p: f64,
    sampler: rand_distr::Binomial,
}

impl Binomial {
    pub fn new(n: u64, p: f64) -> Result<Self> {
        let p = check_probability("p", p)?;
        Ok(Self {
            n,
            p,
            sampler: rand_distr::Binomial::new(n, p).map_err(sampler_error)?,
        })
    }
}

impl RandomVariable for Binomial {
    type Value = i64;

    fn support(&self) -> Support<i64> {
        Support::bounded(0, self.n as i64)
    }

    fn expectation(&self) -> f64 {
        self.n as f64 * self.p
    }

    fn variance(&self) -> f64 {
        self.n as f64 * self.p * (1.0 - self.p)
    }

    fn cdf(&self, x: i64) -> f64 {
        if x < 0 {
            return 0.0;
        }
        let k = x as u64;
        if k >= self.n || self.p == 0.0 {
            return 1.0;
        }
        if self.p == 1.0 {
            return 0.0;
        }
        // P(X <= k) = I_{1-p}(n - k, k + 1)
        incomplete_beta_cdf(self, x, (self.n - k) as f64, k as f64 + 1.0, 1.0 - self.p)
    }

    fn pdf(&self, x: i64) -> f64 {
        if !self.support().contains(&x) {
            return 0.0;
        }
        let k = x as u64;
        if self.p == 0.0 {
            return if k == 0 { 1.0 } else { 0.0 };
        }
        if self.p == 1.0 {
            return if k == self.n { 1.0 } else { 0.0 };
        }
        let (successes, failures) = (k as f64, (self.n - k) as f64);
        (ln_choose(self.n, k) + successes * self.p.ln() + failures * (-self.p).ln_1p()).exp()
    }

    fn mgf(&self, t: f64) -> f64 {
        (1.0 - self.p + self.p * t.exp()).powf(self.n as f64)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        self.sampler.sample(rng) as i64
    }
}

/// Number of trials up to and including the first success (support `1..`).
#[derive(Debug, Clone)]
pub struct Geometric {
    p: f64,
    sampler: rand_distr::Geometric,
}

impl Geometric {
    pub fn new(p: f64) -> Result<Self> {
        let p = check_probability("p", p)?;
        if p == 0.0 {
            return Err(RudimentsError::invalid_parameter(
                "geometric success probability must be nonzero",
            ));
        }
        Ok(Self {
            p,
            sampler: rand_distr::Geometric::new(p).map_err(sampler_error)?,
        })
    }
}

impl RandomVariable for Geometric {
    type Value = i64;

    fn support(&self) -> Support<i64> {
        Support::from_lower(1)
    }

    fn expectation(&self) -> f64 {
        1.0 / self.p
    }

    fn variance(&self) -> f64 {
        (1.0 - self.p) / (self.p * self.p)
    }

    fn cdf(&self, x: i64) -> f64 {
        if x < 1 {
            return 0.0;
        }
        1.0 - (1.0 - self.p).powf(x as f64)
    }

    fn pdf(&self, x: i64) -> f64 {
        if x < 1 {
            return 0.0;
        }
        (1.0 - self.p).powf((x - 1) as f64) * self.p
    }

    fn mgf(&self, t: f64) -> f64 {
        let q = (1.0 - self.p) * t.exp();
        if q >= 1.0 {
            return f64::INFINITY;
        }
        self.p * t.exp() / (1.0 - q)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        // rand_distr counts the failures before the success
        self.sampler.sample(rng) as i64 + 1
    }
}

/// Number of failures before the `r`-th success.
#[derive(Debug, Clone)]
pub struct NegativeBinomial {
    r: u64,
    p: f64,
    failures: rand_distr::Geometric,
}

impl NegativeBinomial {
    pub fn new(r: u64, p: f64) -> Result<Self> {
        let p = check_probability("p", p)?;
        if r == 0 || p == 0.0 {
            return Err(RudimentsError::invalid_parameter(format!(
                "negative binomial needs r >= 1 and p > 0, got r = {}, p = {}",
                r, p
            )));
        }
        Ok(Self {
            r,
            p,
            failures: rand_distr::Geometric::new(p).map_err(sampler_error)?,
        })
    }
}

impl RandomVariable for NegativeBinomial {
    type Value = i64;

    fn support(&self) -> Support<i64> {
        Support::from_lower(0)
    }

    fn expectation(&self) -> f64 {
        self.r as f64 * (1.0 - self.p) / self.p
    }

    fn variance(&self) -> f64 {
        self.r as f64 * (1.0 - self.p) / (self.p * self.p)
    }

    fn cdf(&self, x: i64) -> f64 {
        if x < 0 {
            return 0.0;
        }
        if self.p == 1.0 {
            return 1.0;
        }
        // P(X <= k) = I_p(r, k + 1)
        incomplete_beta_cdf(self, x, self.r as f64, x as f64 + 1.0, self.p)
    }

    fn pdf(&self, x: i64) -> f64 {
        if x < 0 {
            return 0.0;
        }
        if self.p == 1.0 {
            return if x == 0 { 1.0 } else { 0.0 };
        }
        let (k, r) = (x as f64, self.r as f64);
        // C(k + r - 1, k) p^r q^k
        (ln_gamma(k + r) - ln_factorial(x as u64) - ln_gamma(r)
            + r * self.p.ln()
            + k * (-self.p).ln_1p())
        .exp()
    }

    fn mgf(&self, t: f64) -> f64 {
        let q = (1.0 - self.p) * t.exp();
        if q >= 1.0 {
            return f64::INFINITY;
        }
        (self.p / (1.0 - q)).powf(self.r as f64)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        (0..self.r).map(|_| self.failures.sample(rng) as i64).sum()
    }
}

/// Count of events at rate `lambda`.
#[derive(Debug, Clone)]
pub struct Poisson {
    lambda: f64,
    sampler: rand_distr::Poisson<f64>,
}

impl Poisson {
    pub fn new(lambda: f64) -> Result<Self> {
        let lambda = check_positive("lambda", lambda)?;
        Ok(Self {
            lambda,
            sampler: rand_distr::Poisson::new(lambda).map_err(sampler_error)?,
        })
    }
}

impl RandomVariable for Poisson {
    type Value = i64;

    fn support(&self) -> Support<i64> {
        Support::from_lower(0)
    }

    fn expectation(&self) -> f64 {
        self.lambda
    }

    fn variance(&self) -> f64 {
        self.lambda
    }

    fn cdf(&self, x: i64) -> f64 {
        if x < 0 {
            return 0.0;
        }
        regularized_upper_gamma(x as f64 + 1.0, self.lambda)
    }

    fn pdf(&self, x: i64) -> f64 {
        if x < 0 {
            return 0.0;
        }
        (x as f64 * self.lambda.ln() - self.lambda - ln_factorial(x as u64)).exp()
    }

    fn mgf(&self, t: f64) -> f64 {
        (self.lambda * (t.exp() - 1.0)).exp()
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        let draw: f64 = self.sampler.sample(rng);
        draw as i64
    }
}

/// Successes in `draws` draws without replacement from `population` items of
/// which `successes` are marked.
#[derive(Debug, Clone)]
pub struct Hypergeometric {
    population: u64,
    successes: u64,
    draws: u64,
    sampler: rand_distr::Hypergeometric,
}

impl Hypergeometric {
    pub fn new(population: u64, successes: u64, draws: u64) -> Result<Self> {
        if successes > population || draws > population {
            return Err(RudimentsError::invalid_parameter(format!(
                "hypergeometric needs successes ({}) and draws ({}) within the population ({})",
                successes, draws, population
            )));
        }
        Ok(Self {
            population,
            successes,
            draws,
            sampler: rand_distr::Hypergeometric::new(population, successes, draws)
                .map_err(sampler_error)?,
        })
    }

    fn moments(&self) -> (f64, f64, f64) {
        (
            self.population as f64,
            self.successes as f64,
            self.draws as f64,
        )
    }
}

impl RandomVariable for Hypergeometric {
    type Value = i64;

    fn support(&self) -> Support<i64> {
        let lower = (self.draws + self.successes).saturating_sub(self.population);
        Support::bounded(lower as i64, self.draws.min(self.successes) as i64)
    }

    fn expectation(&self) -> f64 {
        let (n_pop, k, n) = self.moments();
        if n_pop == 0.0 { 0.0 } else { n * k / n_pop }
    }

    fn variance(&self) -> f64 {
        let (n_pop, k, n) = self.moments();
        if n_pop <= 1.0 {
            return 0.0;
        }
        n * (k / n_pop) * ((n_pop - k) / n_pop) * ((n_pop - n) / (n_pop - 1.0))
    }

    fn cdf(&self, x: i64) -> f64 {
        cumulative(self, x)
    }

    fn pdf(&self, x: i64) -> f64 {
        if !self.support().contains(&x) {
            return 0.0;
        }
        let k = x as u64;
        (ln_choose(self.successes, k) + ln_choose(self.population - self.successes, self.draws - k)
            - ln_choose(self.population, self.draws))
        .exp()
    }

    fn mgf(&self, t: f64) -> f64 {
        let support = self.support();
        let (lower, upper) = (support.lower.unwrap_or(0), support.upper.unwrap_or(0));
        (lower..=upper).map(|k| (t * k as f64).exp() * self.pdf(k)).sum()
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        self.sampler.sample(rng) as i64
    }
}

/// Equally likely integers in `a..=b`.
#[derive(Debug, Clone)]
pub struct UniformDiscrete {
    a: i64,
    b: i64,
    sampler: Uniform<i64>,
}

impl UniformDiscrete {
    pub fn new(a: i64, b: i64) -> Result<Self> {
        if a > b {
            return Err(RudimentsError::invalid_parameter(format!(
                "uniform bounds out of order: {} > {}",
                a, b
            )));
        }
        Ok(Self {
            a,
            b,
            sampler: Uniform::new_inclusive(a, b),
        })
    }

    fn count(&self) -> f64 {
        (self.b as f64 - self.a as f64) + 1.0
    }
}

impl RandomVariable for UniformDiscrete {
    type Value = i64;

    fn support(&self) -> Support<i64> {
        Support::bounded(self.a, self.b)
    }

    fn expectation(&self) -> f64 {
        (self.a as f64 + self.b as f64) / 2.0
    }

    fn variance(&self) -> f64 {
        let n = self.count();
        (n * n - 1.0) / 12.0
    }

    fn cdf(&self, x: i64) -> f64 {
        if x < self.a {
            0.0
        } else if x >= self.b {
            1.0
        } else {
            (x as f64 - self.a as f64 + 1.0) / self.count()
        }
    }

    fn pdf(&self, x: i64) -> f64 {
        if self.support().contains(&x) {
            1.0 / self.count()
        } else {
            0.0
        }
    }

    fn mgf(&self, t: f64) -> f64 {
        if t == 0.0 {
            return 1.0;
        }
        let n = self.count();
        ((self.a as f64 * t).exp() - ((self.b as f64 + 1.0) * t).exp()) / (n * (1.0 - t.exp()))
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        self.sampler.sample(rng)
    }
}
