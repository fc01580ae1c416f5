//! Conic-section algebra.
//!
//! - [`complex`]: complex arithmetic and n-th root extraction
//! - [`conic`]: ellipses as general conic coefficients, term elimination
//! - [`polynomial`]: closed-form roots up to degree four
//! - [`intersection`]: ellipse/ellipse and ellipse/segment intersections

pub mod complex;
pub mod conic;
pub mod intersection;
pub mod polynomial;

pub use complex::ComplexNumber;
pub use conic::{Coefficient, EllipseCoefficients};
pub use intersection::{intersect_conics, intersect_line};
