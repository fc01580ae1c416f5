//! Closed-form roots of real polynomials up to degree four.
//!
//! Roots are returned as [`ComplexNumber`]s so callers decide how to filter
//! them: `ComplexNumber::remove_imaginary` to keep near-real roots and
//! `ComplexNumber::remove_duplicates` to collapse repeated ones. A leading
//! coefficient within `tolerance` of zero degrades the polynomial to the
//! next lower degree.

use super::complex::ComplexNumber;

/// Roots of `a·x² + b·x + c`.
pub fn solve_quadratic(a: f64, b: f64, c: f64, tolerance: f64) -> Vec<ComplexNumber> {
    if a.abs() <= tolerance {
        if b.abs() <= tolerance {
            return Vec::new();
        }
        return vec![ComplexNumber::from_real(-c / b)];
    }
    let (first, second) = solve_monic_quadratic(
        ComplexNumber::from_real(b / a),
        ComplexNumber::from_real(c / a),
    );
    vec![first, second]
}

/// Roots of `y² + b·y + c` with complex coefficients.
fn solve_monic_quadratic(b: ComplexNumber, c: ComplexNumber) -> (ComplexNumber, ComplexNumber) {
    let discriminant = b.squared() - c.scale(4.0);
    let root = discriminant.sqrt();
    let half = ComplexNumber::from_real(0.5);
    ((-b + root) * half, (-b - root) * half)
}

/// Roots of `a·x³ + b·x² + c·x + d` (Cardano).
pub fn solve_cubic(a: f64, b: f64, c: f64, d: f64, tolerance: f64) -> Vec<ComplexNumber> {
    if a.abs() <= tolerance {
        return solve_quadratic(b, c, d, tolerance);
    }
    let (b, c, d) = (b / a, c / a, d / a);
    let shift = b / 3.0;

    // Depressed form t³ + p·t + q with x = t − b/3.
    let p = c - b * b / 3.0;
    let q = 2.0 * b * b * b / 27.0 - b * c / 3.0 + d;

    let discriminant = ComplexNumber::from_real(q * q / 4.0 + p * p * p / 27.0);
    let root = discriminant.sqrt();
    let half_q = ComplexNumber::from_real(-q / 2.0);
    let plus = half_q + root;
    let minus = half_q - root;
    let cube = if plus.abs() >= minus.abs() { plus } else { minus };

    if cube.abs() == 0.0 {
        // p = q = 0: triple root.
        return vec![ComplexNumber::from_real(-shift); 3];
    }

    cube.get_roots(3)
        .into_iter()
        .map(|u| {
            let v = ComplexNumber::from_real(-p / 3.0) / u;
            u + v - ComplexNumber::from_real(shift)
        })
        .collect()
}

/// Roots of `a·x⁴ + b·x³ + c·x² + d·x + e` (Ferrari).
pub fn solve_quartic(a: f64, b: f64, c: f64, d: f64, e: f64, tolerance: f64) -> Vec<ComplexNumber> {
    if a.abs() <= tolerance {
        return solve_cubic(b, c, d, e, tolerance);
    }
    let (b, c, d, e) = (b / a, c / a, d / a, e / a);
    let shift = ComplexNumber::from_real(b / 4.0);

    // Depressed form y⁴ + p·y² + q·y + r with x = y − b/4.
    let b2 = b * b;
    let p = c - 3.0 * b2 / 8.0;
    let q = d - b * c / 2.0 + b2 * b / 8.0;
    let r = e - b * d / 4.0 + b2 * c / 16.0 - 3.0 * b2 * b2 / 256.0;

    let depressed: Vec<ComplexNumber> = if q.abs() <= tolerance {
        // Biquadratic: z² + p·z + r with z = y².
        solve_quadratic(1.0, p, r, tolerance)
            .into_iter()
            .flat_map(|z| {
                let root = z.sqrt();
                [root, -root]
            })
            .collect()
    } else {
        // Resolvent cubic m³ + p·m² + (p²/4 − r)·m − q²/8; any non-zero root works.
        let resolvent = solve_cubic(1.0, p, p * p / 4.0 - r, -q * q / 8.0, tolerance);
        let m = resolvent
            .into_iter()
            .fold(ComplexNumber::ZERO, |best, m| if m.abs() > best.abs() { m } else { best });
        if m.abs() == 0.0 {
            return Vec::new();
        }
        let s = m.scale(2.0).sqrt();
        let base = ComplexNumber::from_real(p / 2.0) + m;
        let correction = ComplexNumber::from_real(q) / s.scale(2.0);

        let (y1, y2) = solve_monic_quadratic(-s, base + correction);
        let (y3, y4) = solve_monic_quadratic(s, base - correction);
        vec![y1, y2, y3, y4]
    };

    depressed.into_iter().map(|y| y - shift).collect()
}

/// Near-real, de-duplicated roots as plain reals, in discovery order.
pub fn real_roots(roots: &[ComplexNumber], max_imaginary: f64, max_difference: f64) -> Vec<f64> {
    let real = ComplexNumber::remove_imaginary(roots, max_imaginary);
    ComplexNumber::remove_duplicates(&real, max_difference)
        .into_iter()
        .map(|r| r.real)
        .collect()
}

/// Evaluates a polynomial given highest-degree-first coefficients (Horner).
pub fn evaluate(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().fold(0.0, |acc, c| acc * x + c)
}
