use std::fmt;

use serde::{Deserialize, Serialize};

use super::path::{polyline_intersects_rect, Path};
use super::{rotate_point, Bounds, Point, Vector};

/// Stable identifier of a shape group within a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeId(pub u64);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shape#{}", self.0)
    }
}

/// Styling preset new shapes are created from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeTemplate {
    pub name: String,
    pub stroke: String,
    pub fill: Option<String>,
    pub stroke_width: f64,
}

impl Default for ShapeTemplate {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            stroke: "#000000".to_string(),
            fill: None,
            stroke_width: 1.0,
        }
    }
}

impl ShapeTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// The transformable part of a shape group, recorded in change sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeGeometry {
    pub paths: Vec<Path>,
    pub rotation: f64,
}

/// One or more paths drawn with a shared template.
///
/// `rotation` (degrees) is applied about the centre of the unrotated
/// bounds of `paths`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeGroup {
    pub id: ShapeId,
    pub name: String,
    pub template: String,
    pub paths: Vec<Path>,
    #[serde(default)]
    pub rotation: f64,
}

impl ShapeGroup {
    pub fn new(id: ShapeId, template: impl Into<String>, paths: Vec<Path>) -> Self {
        Self {
            id,
            name: format!("Shape {}", id.0),
            template: template.into(),
            paths,
            rotation: 0.0,
        }
    }

    pub fn geometry(&self) -> ShapeGeometry {
        ShapeGeometry {
            paths: self.paths.clone(),
            rotation: self.rotation,
        }
    }

    pub fn set_geometry(&mut self, geometry: ShapeGeometry) {
        self.paths = geometry.paths;
        self.rotation = geometry.rotation;
    }

    /// Bounds of the paths before rotation.
    pub fn local_bounds(&self) -> Bounds {
        self.paths
            .iter()
            .map(Path::bounds)
            .reduce(|a, b| a.union(&b))
            .unwrap_or_default()
    }

    /// Rotation pivot.
    pub fn pivot(&self) -> Point {
        self.local_bounds().center()
    }

    /// Map-space bounds, rotation included.
    pub fn bounds(&self) -> Bounds {
        let local = self.local_bounds();
        if self.rotation == 0.0 {
            return local;
        }
        let pivot = local.center();
        Bounds::from_points(
            local
                .corners()
                .into_iter()
                .map(|c| rotate_point(c, pivot, self.rotation)),
        )
        .unwrap_or(local)
    }

    fn to_local(&self, point: Point) -> Point {
        rotate_point(point, self.pivot(), -self.rotation)
    }

    pub fn contains_point(&self, point: Point, tolerance: f64) -> bool {
        let local = self.to_local(point);
        self.paths.iter().any(|p| p.contains_point(local, tolerance))
    }

    pub fn intersects_rect(&self, rect: &Bounds) -> bool {
        if !self.bounds().intersects(rect) {
            return false;
        }
        if self.rotation == 0.0 {
            return self.paths.iter().any(|p| p.intersects_rect(rect));
        }
        let pivot = self.pivot();
        self.paths.iter().any(|path| {
            let outline: Vec<Point> = path
                .flatten()
                .into_iter()
                .map(|p| rotate_point(p, pivot, self.rotation))
                .collect();
            polyline_intersects_rect(&outline, path.is_closed(), rect)
        })
    }

    /// Map-space outlines, rotation applied.
    pub fn outlines(&self) -> Vec<(Vec<Point>, bool)> {
        let pivot = self.pivot();
        self.paths
            .iter()
            .map(|path| {
                let points = path
                    .flatten()
                    .into_iter()
                    .map(|p| rotate_point(p, pivot, self.rotation))
                    .collect();
                (points, path.is_closed())
            })
            .collect()
    }

    pub fn translated(&self, delta: Vector) -> Self {
        let mut moved = self.clone();
        moved.paths = self.paths.iter().map(|p| p.translated(delta)).collect();
        moved
    }

    /// Scales about a map-space `anchor` by map-axis factors.
    ///
    /// The factors are projected onto the group's local axes, so a group
    /// turned by a quarter turn stretches along the map axis that was
    /// dragged. The pivot moves as if scaled about `anchor`. Exact when the
    /// rotation is a multiple of 90 degrees; other angles lose the shear a
    /// true map-axis scale would introduce.
    pub fn scaled_about(&self, anchor: Point, sx: f64, sy: f64) -> Self {
        let pivot = self.pivot();
        let target = Point::new(
            anchor.x + (pivot.x - anchor.x) * sx,
            anchor.y + (pivot.y - anchor.y) * sy,
        );
        let (local_sx, local_sy) = self.local_factors(sx, sy);
        let mut scaled = self.clone();
        scaled.paths = self
            .paths
            .iter()
            .map(|p| p.scaled_about(pivot, local_sx, local_sy).translated(target - pivot))
            .collect();
        scaled
    }

    /// Map-axis scale factors expressed along the local x and y axes.
    fn local_factors(&self, sx: f64, sy: f64) -> (f64, f64) {
        if self.rotation == 0.0 {
            return (sx, sy);
        }
        let origin = Point::new(0.0, 0.0);
        let u = rotate_point(Point::new(1.0, 0.0), origin, self.rotation);
        let v = rotate_point(Point::new(0.0, 1.0), origin, self.rotation);
        (
            sx * u.x * u.x + sy * u.y * u.y,
            sx * v.x * v.x + sy * v.y * v.y,
        )
    }

    pub fn rotated_about(&self, center: Point, degrees: f64) -> Self {
        let pivot = self.pivot();
        let target = rotate_point(pivot, center, degrees);
        let mut rotated = self.translated(target - pivot);
        rotated.rotation = normalize_degrees(self.rotation + degrees);
        rotated
    }
}

/// Wraps an angle into `(-180, 180]`.
pub(crate) fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}
