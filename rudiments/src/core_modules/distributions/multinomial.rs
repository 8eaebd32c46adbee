//! The multinomial distribution: counts of each of `k` outcomes over `n`
//! independent draws. Values are count vectors, so it sits outside the
//! scalar `RandomVariable` trait and exposes the same questions per outcome.

use super::special::{ln_factorial, ln_gamma};
use super::{check_probability, sampler_error};
use crate::error::{Result, RudimentsError};
use rand::Rng;
use rand_distr::{Distribution, WeightedIndex};

const PROBABILITY_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct Multinomial {
    n: u64,
    p: Vec<f64>,
    sampler: WeightedIndex<f64>,
}

impl Multinomial {
    /// `p` must be non-empty, each entry a probability, summing to 1.
    pub fn new(n: u64, p: &[f64]) -> Result<Self> {
        if p.is_empty() {
            return Err(RudimentsError::invalid_parameter(
                "multinomial needs at least one outcome",
            ));
        }
        for &pi in p {
            check_probability("outcome probability", pi)?;
        }
        let total: f64 = p.iter().sum();
        if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(RudimentsError::invalid_parameter(format!(
                "outcome probabilities sum to {}, not 1",
                total
            )));
        }
        Ok(Self {
            n,
            p: p.to_vec(),
            sampler: WeightedIndex::new(p).map_err(sampler_error)?,
        })
    }

    pub fn trials(&self) -> u64 {
        self.n
    }

    pub fn outcomes(&self) -> usize {
        self.p.len()
    }

    /// Probability of observing exactly `counts`. Zero when the counts have
    /// the wrong length, a negative entry, or do not add up to `n`.
    pub fn pmf(&self, counts: &[i64]) -> f64 {
        if counts.len() != self.p.len() || counts.iter().any(|&c| c < 0) {
            return 0.0;
        }
        let total = counts.iter().try_fold(0u64, |acc, &c| acc.checked_add(c as u64));
        if total != Some(self.n) {
            return 0.0;
        }
        let mut ln_p = ln_factorial(self.n);
        for (&c, &pi) in counts.iter().zip(&self.p) {
            if c == 0 {
                continue;
            }
            if pi == 0.0 {
                return 0.0;
            }
            ln_p += c as f64 * pi.ln() - ln_gamma(c as f64 + 1.0);
        }
        ln_p.exp()
    }

    /// `E[X_i] = n p_i`.
    pub fn means(&self) -> Vec<f64> {
        self.p.iter().map(|pi| self.n as f64 * pi).collect()
    }

    /// `Var[X_i] = n p_i (1 - p_i)`.
    pub fn variances(&self) -> Vec<f64> {
        self.p.iter().map(|pi| self.n as f64 * pi * (1.0 - pi)).collect()
    }

    /// `Cov[X_i, X_j]`: the variance on the diagonal, `-n p_i p_j` off it.
    pub fn covariance(&self, i: usize, j: usize) -> Result<f64> {
        let k = self.p.len();
        let (Some(&pi), Some(&pj)) = (self.p.get(i), self.p.get(j)) else {
            return Err(RudimentsError::IndexOutOfBounds {
                row: i,
                col: j,
                rows: k,
                cols: k,
            });
        };
        let n = self.n as f64;
        Ok(if i == j { n * pi * (1.0 - pi) } else { -n * pi * pj })
    }

    /// `(Σ p_i e^(t_i))^n`.
    pub fn mgf(&self, t: &[f64]) -> Result<f64> {
        if t.len() != self.p.len() {
            return Err(RudimentsError::dimension_mismatch(
                (t.len(), 1),
                (self.p.len(), 1),
            ));
        }
        let base: f64 = self.p.iter().zip(t).map(|(pi, ti)| pi * ti.exp()).sum();
        Ok(base.powf(self.n as f64))
    }

    /// One draw of the count vector.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<i64> {
        let mut counts = vec![0i64; self.p.len()];
        for _ in 0..self.n {
            counts[self.sampler.sample(rng)] += 1;
        }
        counts
    }
}
