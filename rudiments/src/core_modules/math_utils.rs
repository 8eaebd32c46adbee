// THEORY:
// Integer helpers for counting and elementary number theory, plus a handful of
// classic linear-time array problems. All arithmetic is checked: a result that
// does not fit its integer type is an `Overflow` error, never a wrapped value.

use crate::error::{Result, RudimentsError};
use std::collections::{HashMap, HashSet};

fn overflow(what: &str) -> RudimentsError {
    RudimentsError::overflow(format!("{} does not fit in 64 bits", what))
}

pub fn max(values: &[i64]) -> Option<i64> {
    values.iter().copied().max()
}

pub fn min(values: &[i64]) -> Option<i64> {
    values.iter().copied().min()
}

/// `1 + 2 + ... + n`.
pub fn simple_summation(n: i64) -> Result<i64> {
    let product = (n as i128) * (n as i128 + 1) / 2;
    i64::try_from(product).map_err(|_| overflow("summation"))
}

/// `(n1 + 1) + ... + n2`.
pub fn summation_between(n1: i64, n2: i64) -> Result<i64> {
    simple_summation(n2)?
        .checked_sub(simple_summation(n1)?)
        .ok_or_else(|| overflow("summation"))
}

/// `c + c·r + ... + c·r^(n-1)`.
pub fn geometric_summation(c: i64, r: i64, n: u32) -> Result<i64> {
    if n == 0 {
        return Ok(0);
    }
    if r == 1 {
        return c.checked_mul(n as i64).ok_or_else(|| overflow("geometric summation"));
    }
    let power = r.checked_pow(n).ok_or_else(|| overflow("geometric summation"))?;
    power
        .checked_sub(1)
        .and_then(|v| v.checked_mul(c))
        .map(|v| v / (r - 1))
        .ok_or_else(|| overflow("geometric summation"))
}

/// `(x + y)^n` (the sum of the binomial expansion terms).
pub fn binomial_summation(x: i64, y: i64, n: u32) -> Result<i64> {
    x.checked_add(y)
        .and_then(|base| base.checked_pow(n))
        .ok_or_else(|| overflow("binomial summation"))
}

pub fn factorial(n: u64) -> Result<u64> {
    (2..=n).try_fold(1u64, |acc, i| acc.checked_mul(i).ok_or_else(|| overflow("factorial")))
}

/// `n choose k`; zero when `k > n`.
pub fn choose(n: u64, k: u64) -> Result<u64> {
    if k > n {
        return Ok(0);
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        // exact at every step: result * (n - i) is divisible by (i + 1)
        result = result * (n - i) as u128 / (i + 1) as u128;
        if result > u64::MAX as u128 {
            return Err(overflow("binomial coefficient"));
        }
    }
    Ok(result as u64)
}

/// Row `n` of Pascal's triangle (row 0 is `[1]`).
pub fn pascal_row(n: usize) -> Result<Vec<u64>> {
    let mut row = vec![1u64];
    for _ in 0..n {
        let mut next = Vec::with_capacity(row.len() + 1);
        next.push(1);
        for pair in row.windows(2) {
            next.push(
                pair[0]
                    .checked_add(pair[1])
                    .ok_or_else(|| overflow("pascal triangle entry"))?,
            );
        }
        next.push(1);
        row = next;
    }
    Ok(row)
}

/// Greatest common divisor, always non-negative. `gcd(0, 0)` is 0.
pub fn gcd(x: i64, y: i64) -> i64 {
    let (mut a, mut b) = (x.unsigned_abs(), y.unsigned_abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a as i64
}

pub fn are_relatively_prime(x: i64, y: i64) -> bool {
    gcd(x, y) == 1
}

pub fn is_prime(x: u64) -> bool {
    if x < 2 {
        return false;
    }
    (2..).take_while(|&i| i <= x / i).all(|i| x % i != 0)
}

/// The `n`-th Fibonacci number, `F(0) = 0`, `F(1) = 1`.
pub fn fibonacci(n: u32) -> Result<u64> {
    let mut current = 0u64;
    let mut next = Some(1u64);
    for _ in 0..n {
        let step = next.ok_or_else(|| overflow("fibonacci number"))?;
        next = current.checked_add(step);
        current = step;
    }
    Ok(current)
}

/// Row/column/diagonal sum of an `n x n` normal magic square.
pub fn magic_square_constant(n: u64) -> Result<u64> {
    n.checked_mul(n)
        .and_then(|sq| sq.checked_add(1))
        .and_then(|v| v.checked_mul(n))
        .map(|v| v / 2)
        .ok_or_else(|| overflow("magic square constant"))
}

/// Number of balanced strings of `n` pairs of parentheses (Catalan number).
pub fn count_valid_parentheses(n: u64) -> Result<u64> {
    let mut catalan: u128 = 1;
    for k in 0..n {
        catalan = catalan * 2 * (2 * k as u128 + 1) / (k as u128 + 2);
        if catalan > u64::MAX as u128 {
            return Err(overflow("catalan number"));
        }
    }
    Ok(catalan as u64)
}

/// Minimum and maximum sums of all but one element.
pub fn sum_min_max(values: &[i64]) -> Result<(i64, i64)> {
    let (Some(lo), Some(hi)) = (min(values), max(values)) else {
        return Err(RudimentsError::invalid_parameter("sum_min_max of an empty slice"));
    };
    let sum: i128 = values.iter().map(|&v| v as i128).sum();
    let to_i64 = |v: i128| i64::try_from(v).map_err(|_| overflow("partial sum"));
    Ok((to_i64(sum - hi as i128)?, to_i64(sum - lo as i128)?))
}

/// Largest sum of a subset with no two adjacent elements; the empty subset
/// counts, so the result is never negative.
pub fn max_non_adjacent_subset_sum(values: &[i64]) -> Result<i64> {
    let (mut with_last, mut without_last) = (0i64, 0i64);
    for &v in values {
        let taken = without_last
            .checked_add(v)
            .ok_or_else(|| overflow("subset sum"))?;
        without_last = without_last.max(with_last);
        with_last = taken;
    }
    Ok(with_last.max(without_last))
}

/// Indices `(i, j)`, `i < j`, of the first pair (by `j`) whose values add to
/// `sum`.
pub fn first_two_indices_with_sum(values: &[i64], sum: i64) -> Option<(usize, usize)> {
    let mut complements: HashMap<i128, usize> = HashMap::with_capacity(values.len());
    for (j, &v) in values.iter().enumerate() {
        if let Some(&i) = complements.get(&(v as i128)) {
            return Some((i, j));
        }
        complements.entry(sum as i128 - v as i128).or_insert(j);
    }
    None
}

/// Values `(a, b)` of the first pair (by position of `b`) adding to `sum`.
pub fn first_two_values_with_sum(values: &[i64], sum: i64) -> Option<(i64, i64)> {
    let mut complements: HashSet<i128> = HashSet::with_capacity(values.len());
    for &v in values {
        if complements.contains(&(v as i128)) {
            return Some(((sum as i128 - v as i128) as i64, v));
        }
        complements.insert(sum as i128 - v as i128);
    }
    None
}

/// Smallest total of positive ranks such that every element ranked above a
/// smaller neighbor gets a strictly larger rank.
pub fn min_local_rank_sum(values: &[i64]) -> u64 {
    let n = values.len();
    if n == 0 {
        return 0;
    }
    let mut left = vec![1u64; n];
    let mut right = vec![1u64; n];
    for i in 1..n {
        if values[i] > values[i - 1] {
            left[i] = left[i - 1] + 1;
        }
    }
    for i in (0..n - 1).rev() {
        if values[i] > values[i + 1] {
            right[i] = right[i + 1] + 1;
        }
    }
    left.iter().zip(&right).map(|(l, r)| *l.max(r)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summations() {
        assert_eq!(simple_summation(100).unwrap(), 5050);
        assert_eq!(summation_between(3, 5).unwrap(), 9);
        assert_eq!(geometric_summation(3, 2, 4).unwrap(), 45);
        assert_eq!(geometric_summation(3, 1, 4).unwrap(), 12);
        assert_eq!(geometric_summation(3, 2, 0).unwrap(), 0);
        assert_eq!(binomial_summation(1, 1, 10).unwrap(), 1024);
        assert_eq!(binomial_summation(1, 1, 0).unwrap(), 1);
        assert!(simple_summation(i64::MAX).is_err());
        assert!(geometric_summation(1, 10, 40).is_err());
    }

    #[test]
    fn counting() {
        assert_eq!(factorial(0).unwrap(), 1);
        assert_eq!(factorial(20).unwrap(), 2_432_902_008_176_640_000);
        assert!(matches!(factorial(21), Err(RudimentsError::Overflow { .. })));
        assert_eq!(choose(5, 2).unwrap(), 10);
        assert_eq!(choose(2, 5).unwrap(), 0);
        assert_eq!(choose(62, 31).unwrap(), 465_428_353_255_261_088);
        assert_eq!(pascal_row(4).unwrap(), vec![1, 4, 6, 4, 1]);
        assert_eq!(pascal_row(0).unwrap(), vec![1]);
        let row = pascal_row(30).unwrap();
        assert!(row.iter().enumerate().all(|(k, &v)| v == choose(30, k as u64).unwrap()));
    }

    #[test]
    fn number_theory() {
        assert_eq!(gcd(48, 18), 6);
        assert_eq!(gcd(-48, 18), 6);
        assert_eq!(gcd(0, 7), 7);
        assert!(are_relatively_prime(9, 28));
        assert!(!are_relatively_prime(9, 27));
        let primes: Vec<u64> = (0..30).filter(|&x| is_prime(x)).collect();
        assert_eq!(primes, [2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
        assert_eq!(fibonacci(0).unwrap(), 0);
        assert_eq!(fibonacci(10).unwrap(), 55);
        assert_eq!(fibonacci(93).unwrap(), 12_200_160_415_121_876_738);
        assert!(fibonacci(94).is_err());
    }

    #[test]
    fn puzzles() {
        assert_eq!(magic_square_constant(3).unwrap(), 15);
        assert_eq!(magic_square_constant(4).unwrap(), 34);
        let catalan: Vec<u64> = (0..6).map(|n| count_valid_parentheses(n).unwrap()).collect();
        assert_eq!(catalan, [1, 1, 2, 5, 14, 42]);
        assert_eq!(sum_min_max(&[1, 3, 5, 7, 9]).unwrap(), (16, 24));
        assert!(sum_min_max(&[]).is_err());
        assert_eq!(max_non_adjacent_subset_sum(&[3, 7, 4, 6, 5]).unwrap(), 13);
        assert_eq!(max_non_adjacent_subset_sum(&[-1, -2]).unwrap(), 0);
        assert_eq!(max_non_adjacent_subset_sum(&[5]).unwrap(), 5);
    }

    #[test]
    fn pairs_with_sum() {
        let values = [2, 7, 11, 15, 4, 5];
        assert_eq!(first_two_indices_with_sum(&values, 9), Some((0, 1)));
        assert_eq!(first_two_indices_with_sum(&values, 9 + 100), None);
        assert_eq!(first_two_values_with_sum(&values, 9), Some((2, 7)));
        assert_eq!(first_two_values_with_sum(&values, 15), Some((11, 4)));
    }

    #[test]
    fn local_ranks() {
        assert_eq!(min_local_rank_sum(&[1, 2, 2]), 4);
        assert_eq!(min_local_rank_sum(&[1, 0, 2]), 5);
        assert_eq!(min_local_rank_sum(&[4]), 1);
        assert_eq!(min_local_rank_sum(&[]), 0);
    }
}
