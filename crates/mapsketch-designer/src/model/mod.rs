//! Geometry model shared by every tool.
//!
//! Map space uses the same axis orientation as the canvas. Rotations follow
//! the conic convention of `mapsketch_core::algebra::conic`: a positive angle
//! in degrees turns a point by the *negated* radian angle in map coordinates.

use std::ops::{Add, Mul, Neg, Sub};

use nalgebra::{Point2, Rotation2};
use serde::{Deserialize, Serialize};

mod path;
mod shape;

pub use path::{get_path_bounds, Path, SweepFlag, Transit};
pub(crate) use shape::normalize_degrees;
pub use shape::{ShapeGeometry, ShapeGroup, ShapeId, ShapeTemplate};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A displacement; same shape as [`Point`].
pub type Vector = Point;

impl Point {
    pub const ZERO: Point = Point::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn as_tuple(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Horizontal and vertical radii of an ellipse or arc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Radii {
    pub x: f64,
    pub y: f64,
}

impl Radii {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn as_tuple(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// Axis-aligned box. Derived from geometry, never stored long-term.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Normalized box spanning two arbitrary corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let min_x = a.x.min(b.x);
        let min_y = a.y.min(b.y);
        Self::new(min_x, min_y, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    /// Smallest box containing every point, `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut min, mut max) = (first, first);
        for p in iter {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Self::from_corners(min, max))
    }

    pub fn min(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn max(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Corners in order top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.right(), self.y),
            Point::new(self.right(), self.bottom()),
            Point::new(self.x, self.bottom()),
        ]
    }

    /// Inclusive containment.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Inclusive overlap test; touching edges count.
    pub fn intersects(&self, other: &Bounds) -> bool {
        !(other.x > self.right()
            || other.right() < self.x
            || other.y > self.bottom()
            || other.bottom() < self.y)
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::from_corners(
            Point::new(self.x.min(other.x), self.y.min(other.y)),
            Point::new(self.right().max(other.right()), self.bottom().max(other.bottom())),
        )
    }

    pub fn expand(&self, margin: f64) -> Bounds {
        Bounds::new(
            self.x - margin,
            self.y - margin,
            self.width + 2.0 * margin,
            self.height + 2.0 * margin,
        )
    }

    /// Whether the box is at least `min_size` in both dimensions.
    pub fn meets_minimum(&self, min_size: f64) -> bool {
        self.width >= min_size && self.height >= min_size
    }
}

/// `{x·scale.x + translation.x, y·scale.y + translation.y}`.
pub fn transform_point(point: Point, scale: Vector, translation: Vector) -> Point {
    Point::new(
        point.x * scale.x + translation.x,
        point.y * scale.y + translation.y,
    )
}

/// Scale-only transform; translation defaults to zero.
pub fn scale_point(point: Point, scale: Vector) -> Point {
    transform_point(point, scale, Vector::ZERO)
}

/// Rotates `point` about `center` by `degrees` (negated radians, see module docs).
pub fn rotate_point(point: Point, center: Point, degrees: f64) -> Point {
    if degrees == 0.0 {
        return point;
    }
    let rotation = Rotation2::new(-degrees.to_radians());
    let local = Point2::new(point.x - center.x, point.y - center.y);
    let turned = rotation * local;
    Point::new(center.x + turned.x, center.y + turned.y)
}
