//! Intersections between ellipses and between an ellipse and a segment.
//!
//! Two conics are reduced by eliminating `c` (the `y²` coefficient), which
//! leaves a conic linear in `y`. Treating both originals as quadratics in `y`
//! and taking their resultant yields a quartic in `x`; its real roots are
//! back-substituted into the first conic and kept when they also satisfy the
//! second one.

use super::complex::ComplexNumber;
use super::conic::{Coefficient, EllipseCoefficients};
use super::polynomial::{real_roots, solve_quadratic, solve_quartic};

/// Intersection points of two ellipses.
///
/// `tolerance` is a distance in the conics' coordinate units. Identical
/// conics (infinitely many common points) and non-finite input yield no
/// points.
pub fn intersect_conics(
    first: &EllipseCoefficients,
    second: &EllipseCoefficients,
    tolerance: f64,
) -> Vec<(f64, f64)> {
    let Some(reduced) = EllipseCoefficients::eliminate_term(first, second, Coefficient::C) else {
        tracing::trace!("conic elimination undefined for pair");
        return Vec::new();
    };

    let quartic = resultant_in_x(first, second, &reduced);
    let scale = quartic.iter().fold(0.0f64, |m, c| m.max(c.abs()));
    if scale == 0.0 || !scale.is_finite() {
        return Vec::new();
    }
    let [q4, q3, q2, q1, q0] = quartic.map(|c| c / scale);

    let loose = tolerance.sqrt();
    let roots = solve_quartic(q4, q3, q2, q1, q0, tolerance);
    let xs = real_roots(&roots, loose, tolerance);

    let mut points = Vec::new();
    for x in xs {
        let ys = solve_quadratic(
            first.c,
            first.b * x + first.e,
            first.a * x * x + first.d * x + first.f,
            tolerance,
        );
        for y in ComplexNumber::remove_imaginary(&ys, loose) {
            let y = y.real;
            if distance_to_curve(first, x, y) <= loose && distance_to_curve(second, x, y) <= loose {
                points.push(ComplexNumber::new(x, y));
            }
        }
        // Near a vertical tangent the y-quadratic loses its real roots to
        // rounding; fall back to the vertex of the parabola in y.
        if points.iter().all(|p| (p.real - x).abs() > tolerance) && first.c != 0.0 {
            let y = -(first.b * x + first.e) / (2.0 * first.c);
            if distance_to_curve(first, x, y) <= loose && distance_to_curve(second, x, y) <= loose {
                points.push(ComplexNumber::new(x, y));
            }
        }
    }

    ComplexNumber::remove_duplicates(&points, loose)
        .into_iter()
        .map(|p| (p.real, p.imaginary))
        .collect()
}

/// Parameters `t ∈ [0, 1]` where the segment `from → to` meets the conic,
/// ascending.
pub fn intersect_line(
    conic: &EllipseCoefficients,
    from: (f64, f64),
    to: (f64, f64),
    tolerance: f64,
) -> Vec<f64> {
    let (x0, y0) = from;
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let c = conic;

    let quadratic = c.a * dx * dx + c.b * dx * dy + c.c * dy * dy;
    let linear = 2.0 * c.a * x0 * dx + c.b * (x0 * dy + y0 * dx) + 2.0 * c.c * y0 * dy + c.d * dx + c.e * dy;
    let constant = c.evaluate(x0, y0);

    let roots = solve_quadratic(quadratic, linear, constant, tolerance);
    let mut ts: Vec<f64> = real_roots(&roots, tolerance.sqrt(), tolerance)
        .into_iter()
        .filter(|t| *t >= -tolerance && *t <= 1.0 + tolerance)
        .map(|t| t.clamp(0.0, 1.0))
        .collect();
    ts.sort_by(|a, b| a.total_cmp(b));
    ts
}

/// First-order distance from `(x, y)` to the curve: `|F| / |∇F|`.
fn distance_to_curve(conic: &EllipseCoefficients, x: f64, y: f64) -> f64 {
    let value = conic.evaluate(x, y);
    let gx = 2.0 * conic.a * x + conic.b * y + conic.d;
    let gy = conic.b * x + 2.0 * conic.c * y + conic.e;
    let gradient = gx.hypot(gy);
    if gradient == 0.0 {
        value.abs()
    } else {
        value.abs() / gradient
    }
}

/// Resultant of the two conics viewed as quadratics in `y`, as quartic
/// coefficients in `x` (highest degree first).
///
/// With `reduced = first·c₂ − second·c₁` the resultant is `u² + v·w`, where
/// `u = a'x² + d'x + f'`, `v = b'x + e'` and
/// `w = (b₁x + e₁)(a₂x² + d₂x + f₂) − (b₂x + e₂)(a₁x² + d₁x + f₁)`.
fn resultant_in_x(
    first: &EllipseCoefficients,
    second: &EllipseCoefficients,
    reduced: &EllipseCoefficients,
) -> [f64; 5] {
    let (ua, ud, uf) = (reduced.a, reduced.d, reduced.f);
    let (vb, ve) = (reduced.b, reduced.e);

    let cross = |p: &EllipseCoefficients, q: &EllipseCoefficients| -> [f64; 4] {
        [
            p.b * q.a,
            p.b * q.d + p.e * q.a,
            p.b * q.f + p.e * q.d,
            p.e * q.f,
        ]
    };
    let lhs = cross(first, second);
    let rhs = cross(second, first);
    let w = [lhs[0] - rhs[0], lhs[1] - rhs[1], lhs[2] - rhs[2], lhs[3] - rhs[3]];

    [
        ua * ua + vb * w[0],
        2.0 * ua * ud + vb * w[1] + ve * w[0],
        ud * ud + 2.0 * ua * uf + vb * w[2] + ve * w[1],
        2.0 * ud * uf + vb * w[3] + ve * w[2],
        uf * uf + ve * w[3],
    ]
}
