// THEORY:
// Complex numbers, quaternions and octonions as plain `Copy` values: one real
// part plus 1, 3 or 7 imaginary parts. Each algebra is built from the previous
// one by the Cayley-Dickson construction, and the products below follow it:
// complex multiplication, the Hamilton product, and the octonion product of
// quaternion pairs. Every step loses a property (quaternions are not
// commutative, octonions are not associative) but all three keep a
// multiplicative norm, which the tests lean on.

use crate::error::{Result, RudimentsError};
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use tracing::warn;

/// Shared component-wise arithmetic for the three algebras.
macro_rules! hypercomplex_linear_ops {
    ($name:ident) => {
        impl Add for $name {
            type Output = $name;
            fn add(self, rhs: $name) -> $name {
                let mut out = self;
                out.re += rhs.re;
                for (a, b) in out.im.iter_mut().zip(rhs.im) {
                    *a += b;
                }
                out
            }
        }

        impl Sub for $name {
            type Output = $name;
            fn sub(self, rhs: $name) -> $name {
                self + (-rhs)
            }
        }

        impl Neg for $name {
            type Output = $name;
            fn neg(self) -> $name {
                $name {
                    re: -self.re,
                    im: self.im.map(|v| -v),
                }
            }
        }

        impl $name {
            pub fn real(&self) -> f64 {
                self.re
            }

            /// The imaginary part at `n` (0-based). Out of range logs a warning
            /// and yields 0.0.
            pub fn imag_at(&self, n: usize) -> f64 {
                match self.im.get(n) {
                    Some(&v) => v,
                    None => {
                        warn!(n, kind = stringify!($name), "invalid imaginary part, using 0.0");
                        0.0
                    }
                }
            }

            pub fn conjugate(&self) -> $name {
                $name {
                    re: self.re,
                    im: self.im.map(|v| -v),
                }
            }

            /// Squared Euclidean norm of all components.
            pub fn norm_sqr(&self) -> f64 {
                self.re * self.re + self.im.iter().map(|v| v * v).sum::<f64>()
            }

            pub fn norm(&self) -> f64 {
                self.norm_sqr().sqrt()
            }

            pub fn scale(&self, k: f64) -> $name {
                $name {
                    re: self.re * k,
                    im: self.im.map(|v| v * k),
                }
            }

            /// Multiplicative inverse: conjugate over squared norm.
            pub fn inverse(&self) -> Result<$name> {
                let n = self.norm_sqr();
                if n == 0.0 {
                    return Err(RudimentsError::DivideByZero);
                }
                Ok(self.conjugate().scale(1.0 / n))
            }
        }
    };
}

/// A complex number `re + im·i`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Complex {
    re: f64,
    im: [f64; 1],
}

impl Complex {
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im: [im] }
    }

    pub fn imag(&self) -> f64 {
        self.im[0]
    }
}

hypercomplex_linear_ops!(Complex);

impl Mul for Complex {
    type Output = Complex;
    fn mul(self, rhs: Complex) -> Complex {
        let (a, b) = (self.re, self.imag());
        let (c, d) = (rhs.re, rhs.imag());
        Complex::new(a * c - b * d, a * d + b * c)
    }
}

impl Zero for Complex {
    fn zero() -> Self {
        Complex::new(0.0, 0.0)
    }

    fn is_zero(&self) -> bool {
        self.re == 0.0 && self.imag() == 0.0
    }
}

impl One for Complex {
    fn one() -> Self {
        Complex::new(1.0, 0.0)
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C = {:.2} + {:.2}i", self.re, self.imag())
    }
}

/// A quaternion `re + i·x + j·y + k·z`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quaternion {
    re: f64,
    im: [f64; 3],
}

impl Quaternion {
    pub fn new(re: f64, im: [f64; 3]) -> Self {
        Self { re, im }
    }

    pub fn imag(&self) -> [f64; 3] {
        self.im
    }
}

hypercomplex_linear_ops!(Quaternion);

impl Mul for Quaternion {
    type Output = Quaternion;
    /// Hamilton product.
    fn mul(self, rhs: Quaternion) -> Quaternion {
        let (a1, [b1, c1, d1]) = (self.re, self.im);
        let (a2, [b2, c2, d2]) = (rhs.re, rhs.im);
        Quaternion::new(
            a1 * a2 - b1 * b2 - c1 * c2 - d1 * d2,
            [
                a1 * b2 + b1 * a2 + c1 * d2 - d1 * c2,
                a1 * c2 - b1 * d2 + c1 * a2 + d1 * b2,
                a1 * d2 + b1 * c2 - c1 * b2 + d1 * a2,
            ],
        )
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Q = {:.2} + {:.2}i + {:.2}j + {:.2}k",
            self.re, self.im[0], self.im[1], self.im[2]
        )
    }
}

/// An octonion `re + Σ im[n]·e_(n+1)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Octonion {
    re: f64,
    im: [f64; 7],
}

impl Octonion {
    pub fn new(re: f64, im: [f64; 7]) -> Self {
        Self { re, im }
    }

    pub fn imag(&self) -> [f64; 7] {
        self.im
    }

    /// The unit `e_n`, `n` in 1..=7; `e_0` is the real unit.
    pub fn unit(n: usize) -> Self {
        let mut o = Octonion::default();
        match n {
            0 => o.re = 1.0,
            1..=7 => o.im[n - 1] = 1.0,
            _ => warn!(n, "no such octonion unit, returning zero"),
        }
        o
    }

    // (re, e1, e2, e3) and (e4, e5, e6, e7).
    fn halves(&self) -> (Quaternion, Quaternion) {
        let [e1, e2, e3, e4, e5, e6, e7] = self.im;
        (
            Quaternion::new(self.re, [e1, e2, e3]),
            Quaternion::new(e4, [e5, e6, e7]),
        )
    }

    fn from_halves(a: Quaternion, b: Quaternion) -> Self {
        let [e1, e2, e3] = a.im;
        let [e5, e6, e7] = b.im;
        Octonion::new(a.re, [e1, e2, e3, b.re, e5, e6, e7])
    }
}

hypercomplex_linear_ops!(Octonion);

impl Mul for Octonion {
    type Output = Octonion;
    /// Cayley-Dickson product: `(a, b)(c, d) = (ac - d*b, da + bc*)`.
    fn mul(self, rhs: Octonion) -> Octonion {
        let (a, b) = self.halves();
        let (c, d) = rhs.halves();
        Octonion::from_halves(
            a * c - d.conjugate() * b,
            d * a + b * c.conjugate(),
        )
    }
}

impl fmt::Display for Octonion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "O = {:.2}", self.re)?;
        for (i, v) in self.im.iter().enumerate() {
            write!(f, " + {:.2}e_{}", v, i + 1)?;
        }
        Ok(())
    }
}
