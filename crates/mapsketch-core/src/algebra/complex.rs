//! Complex arithmetic used by the polynomial solvers.
//!
//! `ComplexNumber` is an immutable value: every operation returns a new
//! number. Field arithmetic is delegated to `num_complex::Complex64`; the
//! branch conventions of `log` and `sqrt` are fixed here explicitly because
//! the root filters downstream depend on them.
//!
//! Comparisons never use an implicit epsilon. Every call site passes the
//! tolerance that fits its own numeric scale.

use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// A complex number `real + imaginary·i`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ComplexNumber {
    pub real: f64,
    pub imaginary: f64,
}

impl ComplexNumber {
    pub const ZERO: ComplexNumber = ComplexNumber::new(0.0, 0.0);
    pub const ONE: ComplexNumber = ComplexNumber::new(1.0, 0.0);
    pub const I: ComplexNumber = ComplexNumber::new(0.0, 1.0);

    pub const fn new(real: f64, imaginary: f64) -> Self {
        Self { real, imaginary }
    }

    pub const fn from_real(real: f64) -> Self {
        Self::new(real, 0.0)
    }

    fn raw(self) -> Complex64 {
        Complex64::new(self.real, self.imaginary)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn add(self, other: ComplexNumber) -> ComplexNumber {
        (self.raw() + other.raw()).into()
    }

    pub fn subtract(self, other: ComplexNumber) -> ComplexNumber {
        (self.raw() - other.raw()).into()
    }

    pub fn multiply(self, other: ComplexNumber) -> ComplexNumber {
        (self.raw() * other.raw()).into()
    }

    /// Division by zero yields non-finite components, as with `f64`.
    pub fn divide(self, other: ComplexNumber) -> ComplexNumber {
        (self.raw() / other.raw()).into()
    }

    pub fn negate(self) -> ComplexNumber {
        ComplexNumber::new(-self.real, -self.imaginary)
    }

    pub fn scale(self, factor: f64) -> ComplexNumber {
        ComplexNumber::new(self.real * factor, self.imaginary * factor)
    }

    /// Modulus `|z|`.
    pub fn abs(self) -> f64 {
        self.real.hypot(self.imaginary)
    }

    /// Argument in `(-π, π]`, computed with `atan2`.
    pub fn arg(self) -> f64 {
        self.imaginary.atan2(self.real)
    }

    pub fn exp(self) -> ComplexNumber {
        self.raw().exp().into()
    }

    /// Principal logarithm.
    ///
    /// A negative real input with zero imaginary part (of either sign) maps to
    /// imaginary part `π`, the upper side of the branch cut.
    pub fn log(self) -> ComplexNumber {
        if self.imaginary == 0.0 && self.real < 0.0 {
            return ComplexNumber::new((-self.real).ln(), PI);
        }
        ComplexNumber::new(self.abs().ln(), self.arg())
    }

    /// `exp(log(z)·p)`. Zero raised to a power with positive real part is zero.
    pub fn pow(self, power: impl Into<ComplexNumber>) -> ComplexNumber {
        let power = power.into();
        if self.real == 0.0 && self.imaginary == 0.0 && power.real > 0.0 {
            return ComplexNumber::ZERO;
        }
        self.log().multiply(power).exp()
    }

    pub fn squared(self) -> ComplexNumber {
        self.multiply(self)
    }

    pub fn cubed(self) -> ComplexNumber {
        self.multiply(self).multiply(self)
    }

    /// Principal square root.
    ///
    /// The imaginary part of the result carries the sign of the input's
    /// imaginary part; a zero imaginary part counts as non-negative.
    pub fn sqrt(self) -> ComplexNumber {
        let modulus = self.abs();
        let real = ((modulus + self.real) / 2.0).max(0.0).sqrt();
        let imaginary = ((modulus - self.real) / 2.0).max(0.0).sqrt();
        if self.imaginary < 0.0 {
            ComplexNumber::new(real, -imaginary)
        } else {
            ComplexNumber::new(real, imaginary)
        }
    }

    /// All `n` n-th roots (De Moivre), in order of increasing `k`.
    ///
    /// Root `k` has modulus `|z|^(1/n)` and argument `(arg(z) + 2πk) / n`.
    /// Returns an empty list for `n == 0`.
    pub fn get_roots(self, n: usize) -> Vec<ComplexNumber> {
        if n == 0 {
            return Vec::new();
        }
        let count = n as f64;
        let modulus = self.abs().powf(1.0 / count);
        let arg = self.arg();
        (0..n)
            .map(|k| {
                let angle = (arg + 2.0 * PI * k as f64) / count;
                ComplexNumber::new(modulus * angle.cos(), modulus * angle.sin())
            })
            .collect()
    }

    /// Component-wise comparison within `tolerance`.
    pub fn is_equal(self, other: ComplexNumber, tolerance: f64) -> bool {
        (self.real - other.real).abs() <= tolerance
            && (self.imaginary - other.imaginary).abs() <= tolerance
    }

    pub fn is_zero(self, tolerance: f64) -> bool {
        self.is_equal(ComplexNumber::ZERO, tolerance)
    }

    pub fn is_finite(self) -> bool {
        self.real.is_finite() && self.imaginary.is_finite()
    }

    /// Drops values within `max_difference` of an earlier value.
    ///
    /// Pairwise O(n²); order is stable and the first occurrence wins.
    pub fn remove_duplicates(values: &[ComplexNumber], max_difference: f64) -> Vec<ComplexNumber> {
        let mut unique: Vec<ComplexNumber> = Vec::with_capacity(values.len());
        for value in values {
            if !unique.iter().any(|u| u.is_equal(*value, max_difference)) {
                unique.push(*value);
            }
        }
        unique
    }

    /// Keeps values whose imaginary part is within `max_imaginary` of zero and
    /// snaps that part to exactly `0.0`.
    pub fn remove_imaginary(values: &[ComplexNumber], max_imaginary: f64) -> Vec<ComplexNumber> {
        values
            .iter()
            .filter(|v| v.imaginary.abs() <= max_imaginary)
            .map(|v| ComplexNumber::from_real(v.real))
            .collect()
    }
}

impl From<Complex64> for ComplexNumber {
    fn from(c: Complex64) -> Self {
        Self::new(c.re, c.im)
    }
}

impl From<ComplexNumber> for Complex64 {
    fn from(c: ComplexNumber) -> Self {
        c.raw()
    }
}

impl From<f64> for ComplexNumber {
    fn from(real: f64) -> Self {
        Self::from_real(real)
    }
}

impl Add for ComplexNumber {
    type Output = ComplexNumber;
    fn add(self, rhs: ComplexNumber) -> ComplexNumber {
        ComplexNumber::add(self, rhs)
    }
}

impl Sub for ComplexNumber {
    type Output = ComplexNumber;
    fn sub(self, rhs: ComplexNumber) -> ComplexNumber {
        self.subtract(rhs)
    }
}

impl Mul for ComplexNumber {
    type Output = ComplexNumber;
    fn mul(self, rhs: ComplexNumber) -> ComplexNumber {
        self.multiply(rhs)
    }
}

impl Div for ComplexNumber {
    type Output = ComplexNumber;
    fn div(self, rhs: ComplexNumber) -> ComplexNumber {
        self.divide(rhs)
    }
}

impl Neg for ComplexNumber {
    type Output = ComplexNumber;
    fn neg(self) -> ComplexNumber {
        self.negate()
    }
}

impl fmt::Display for ComplexNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.imaginary < 0.0 {
            write!(f, "{} - {}i", self.real, -self.imaginary)
        } else {
            write!(f, "{} + {}i", self.real, self.imaginary)
        }
    }
}
