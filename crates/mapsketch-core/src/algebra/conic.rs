//! General conic coefficients for ellipses.
//!
//! An ellipse is stored as the coefficients of
//! `a·x² + b·xy + c·y² + d·x + e·y + f = 0`. Pairs of conics are reduced by
//! eliminating one coefficient at a time until a univariate polynomial
//! remains (see [`crate::algebra::intersection`]).
//!
//! Rotation convention: `from_ellipse` rotates the axis-aligned conic by the
//! *negated* angle, so an ellipse with `rotation_degrees = θ` has its major
//! axis through `center + rx·(cos(−θ), sin(−θ))`. Screen rotation is
//! clockwise-positive; the algebra works with the negated radian angle.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Names one of the six conic coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Coefficient {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Coefficient {
    pub const ALL: [Coefficient; 6] = [
        Coefficient::A,
        Coefficient::B,
        Coefficient::C,
        Coefficient::D,
        Coefficient::E,
        Coefficient::F,
    ];
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Coefficient::A => "a",
            Coefficient::B => "b",
            Coefficient::C => "c",
            Coefficient::D => "d",
            Coefficient::E => "e",
            Coefficient::F => "f",
        };
        f.write_str(name)
    }
}

/// Coefficients of a general conic `a·x² + b·xy + c·y² + d·x + e·y + f = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EllipseCoefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl EllipseCoefficients {
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Builds the conic of an ellipse centred at `(cx, cy)` with radii
    /// `(rx, ry)` and a clockwise screen rotation in degrees.
    ///
    /// Zero radii produce non-finite coefficients; callers must reject them.
    pub fn from_ellipse(center: (f64, f64), radii: (f64, f64), rotation_degrees: f64) -> Self {
        let (h, k) = center;
        let (rx, ry) = radii;
        let angle = -rotation_degrees.to_radians();
        let (sin, cos) = angle.sin_cos();
        let inv_rx2 = 1.0 / (rx * rx);
        let inv_ry2 = 1.0 / (ry * ry);

        let a = cos * cos * inv_rx2 + sin * sin * inv_ry2;
        let b = 2.0 * sin * cos * (inv_rx2 - inv_ry2);
        let c = sin * sin * inv_rx2 + cos * cos * inv_ry2;
        let d = -2.0 * a * h - b * k;
        let e = -2.0 * c * k - b * h;
        let f = a * h * h + b * h * k + c * k * k - 1.0;

        Self { a, b, c, d, e, f }
    }

    pub fn get(&self, coefficient: Coefficient) -> f64 {
        match coefficient {
            Coefficient::A => self.a,
            Coefficient::B => self.b,
            Coefficient::C => self.c,
            Coefficient::D => self.d,
            Coefficient::E => self.e,
            Coefficient::F => self.f,
        }
    }

    pub fn to_array(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.a * factor,
            self.b * factor,
            self.c * factor,
            self.d * factor,
            self.e * factor,
            self.f * factor,
        )
    }

    /// Evaluates the conic polynomial at `(x, y)`. Zero means on the curve,
    /// negative means inside an ellipse.
    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        self.a * x * x + self.b * x * y + self.c * y * y + self.d * x + self.e * y + self.f
    }

    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }

    /// Cancels `coefficient` between two conics.
    ///
    /// Returns `first·k₂ − second·k₁` where `k₁`, `k₂` are the named
    /// coefficient of `first` and `second`. The result has that coefficient
    /// equal to zero. `None` when either source coefficient is non-finite;
    /// callers must stop the solve chain in that case.
    pub fn eliminate_term(
        first: &EllipseCoefficients,
        second: &EllipseCoefficients,
        coefficient: Coefficient,
    ) -> Option<EllipseCoefficients> {
        let k1 = first.get(coefficient);
        let k2 = second.get(coefficient);
        if !k1.is_finite() || !k2.is_finite() {
            return None;
        }
        let combine = |p: f64, q: f64| p * k2 - q * k1;
        let mut result = EllipseCoefficients::new(
            combine(first.a, second.a),
            combine(first.b, second.b),
            combine(first.c, second.c),
            combine(first.d, second.d),
            combine(first.e, second.e),
            combine(first.f, second.f),
        );
        // Exact cancellation, free of rounding residue.
        match coefficient {
            Coefficient::A => result.a = 0.0,
            Coefficient::B => result.b = 0.0,
            Coefficient::C => result.c = 0.0,
            Coefficient::D => result.d = 0.0,
            Coefficient::E => result.e = 0.0,
            Coefficient::F => result.f = 0.0,
        }
        Some(result)
    }
}
