//! # MapSketch Core
//!
//! Core types and utilities for MapSketch.
//! Provides the error types, editor settings and the conic-section algebra
//! (complex arithmetic, conic coefficients, polynomial roots, intersections)
//! the geometry engine builds on.

pub mod algebra;
pub mod constants;
pub mod error;
pub mod settings;

pub use algebra::{
    intersect_conics, intersect_line, Coefficient, ComplexNumber, EllipseCoefficients,
};
pub use error::{Error, GeometryError, Result, SettingsError};
pub use settings::Settings;
