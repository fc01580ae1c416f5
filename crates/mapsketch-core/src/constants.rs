//! Numeric constants shared across the geometry engine.

/// Tolerance for comparisons in logical map units.
pub const GEOMETRY_EPSILON: f64 = 1e-9;

/// Tolerance used when solving conic intersections.
pub const INTERSECTION_TOLERANCE: f64 = 1e-9;

/// Number of segments a full ellipse is flattened into for hit-testing.
pub const ARC_FLATTEN_SEGMENTS: usize = 64;
