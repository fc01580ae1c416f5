//! Snap overlays.
//!
//! An [`Overlay`] maps a map-space point to the nearest point of interest
//! (grid crossing, guide intersection, guide projection) or returns it
//! unchanged. Tools snap through [`SnapService`], which handles the
//! canvas/map round trip.

use std::f64::consts::TAU;

use mapsketch_core::algebra::{intersect_conics, intersect_line, EllipseCoefficients};
use mapsketch_core::constants::INTERSECTION_TOLERANCE;

use crate::model::{rotate_point, Point, Radii};
use crate::viewport::Viewport;

/// Source of snap targets in map space.
pub trait Overlay {
    /// Nearest overlay point to `map_point`, or `map_point` itself when no
    /// target is close enough.
    fn nearest_overlay_point(&self, map_point: Point) -> Point;
}

/// Overlay without snap targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOverlay;

impl Overlay for NoOverlay {
    fn nearest_overlay_point(&self, map_point: Point) -> Point {
        map_point
    }
}

/// Regular grid. Each axis snaps independently when within `threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridOverlay {
    pub spacing: f64,
    pub threshold: f64,
}

impl GridOverlay {
    pub fn new(spacing: f64, threshold: f64) -> Self {
        Self { spacing, threshold }
    }
}

impl Overlay for GridOverlay {
    fn nearest_overlay_point(&self, map_point: Point) -> Point {
        if self.spacing <= 0.0 {
            return map_point;
        }
        let threshold = self.threshold.max(0.0);
        let sx = (map_point.x / self.spacing).round() * self.spacing;
        let sy = (map_point.y / self.spacing).round() * self.spacing;
        Point::new(
            if (sx - map_point.x).abs() <= threshold { sx } else { map_point.x },
            if (sy - map_point.y).abs() <= threshold { sy } else { map_point.y },
        )
    }
}

/// Samples used to project onto an ellipse guide.
const ELLIPSE_SAMPLES: usize = 360;

/// Construction geometry a [`GuideOverlay`] snaps to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Guide {
    Line { from: Point, to: Point },
    Ellipse { center: Point, radii: Radii, rotation: f64 },
}

impl Guide {
    fn conic(&self) -> Option<EllipseCoefficients> {
        match *self {
            Guide::Ellipse {
                center,
                radii,
                rotation,
            } => {
                let conic =
                    EllipseCoefficients::from_ellipse(center.as_tuple(), radii.as_tuple(), rotation);
                conic.is_finite().then_some(conic)
            }
            Guide::Line { .. } => None,
        }
    }

    /// Nearest point on the guide.
    ///
    /// Exact for lines. Ellipses are sampled at `ELLIPSE_SAMPLES` evenly
    /// spaced parameter angles (one degree apart) and the closest sample
    /// wins, so the result lies on the ellipse but may miss the true foot
    /// by roughly half a sample step of arc, `PI / 360 * max(radii)`.
    fn project(&self, p: Point) -> Point {
        match *self {
            Guide::Line { from, to } => {
                let d = to - from;
                let len2 = d.x * d.x + d.y * d.y;
                if len2 == 0.0 {
                    return from;
                }
                let t = (((p.x - from.x) * d.x + (p.y - from.y) * d.y) / len2).clamp(0.0, 1.0);
                from + d * t
            }
            Guide::Ellipse {
                center,
                radii,
                rotation,
            } => {
                (0..ELLIPSE_SAMPLES)
                    .map(|i| {
                        let angle = TAU * i as f64 / ELLIPSE_SAMPLES as f64;
                        let local = Point::new(
                            center.x + radii.x * angle.cos(),
                            center.y + radii.y * angle.sin(),
                        );
                        rotate_point(local, center, rotation)
                    })
                    .min_by(|a, b| a.distance_to(&p).total_cmp(&b.distance_to(&p)))
                    .unwrap_or(center)
            }
        }
    }
}

/// Guide lines and ellipses, snapping first to their mutual intersections,
/// then to the nearest guide, then to an optional grid.
#[derive(Debug, Clone, Default)]
pub struct GuideOverlay {
    guides: Vec<Guide>,
    intersections: Vec<Point>,
    threshold: f64,
    grid: Option<GridOverlay>,
}

impl GuideOverlay {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    pub fn with_grid(mut self, grid: GridOverlay) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn guides(&self) -> &[Guide] {
        &self.guides
    }

    pub fn intersections(&self) -> &[Point] {
        &self.intersections
    }

    /// Adds a guide and records its intersections with the existing ones.
    pub fn add_guide(&mut self, guide: Guide) {
        for existing in &self.guides {
            let found = guide_intersections(existing, &guide);
            tracing::trace!(count = found.len(), "guide intersections");
            self.intersections.extend(found);
        }
        self.guides.push(guide);
    }
}

impl Overlay for GuideOverlay {
    fn nearest_overlay_point(&self, map_point: Point) -> Point {
        let nearest = |candidates: &mut dyn Iterator<Item = Point>| {
            candidates
                .filter(|c| c.distance_to(&map_point) <= self.threshold)
                .min_by(|a, b| a.distance_to(&map_point).total_cmp(&b.distance_to(&map_point)))
        };

        if let Some(hit) = nearest(&mut self.intersections.iter().copied()) {
            return hit;
        }
        if let Some(hit) = nearest(&mut self.guides.iter().map(|g| g.project(map_point))) {
            return hit;
        }
        match &self.grid {
            Some(grid) => grid.nearest_overlay_point(map_point),
            None => map_point,
        }
    }
}

fn guide_intersections(a: &Guide, b: &Guide) -> Vec<Point> {
    match (a, b) {
        (Guide::Line { from: p1, to: p2 }, Guide::Line { from: q1, to: q2 }) => {
            line_intersection(*p1, *p2, *q1, *q2).into_iter().collect()
        }
        (Guide::Line { from, to }, ellipse @ Guide::Ellipse { .. })
        | (ellipse @ Guide::Ellipse { .. }, Guide::Line { from, to }) => {
            let Some(conic) = ellipse.conic() else {
                return Vec::new();
            };
            let d = *to - *from;
            intersect_line(&conic, from.as_tuple(), to.as_tuple(), INTERSECTION_TOLERANCE)
                .into_iter()
                .map(|t| *from + d * t)
                .collect()
        }
        (first @ Guide::Ellipse { .. }, second @ Guide::Ellipse { .. }) => {
            match (first.conic(), second.conic()) {
                (Some(c1), Some(c2)) => intersect_conics(&c1, &c2, INTERSECTION_TOLERANCE)
                    .into_iter()
                    .map(Point::from)
                    .collect(),
                _ => Vec::new(),
            }
        }
    }
}

fn line_intersection(p1: Point, p2: Point, q1: Point, q2: Point) -> Option<Point> {
    let r = p2 - p1;
    let s = q2 - q1;
    let denom = r.x * s.y - r.y * s.x;
    if denom.abs() < f64::EPSILON {
        return None;
    }
    let qp = q1 - p1;
    let t = (qp.x * s.y - qp.y * s.x) / denom;
    let u = (qp.x * r.y - qp.y * r.x) / denom;
    ((0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)).then(|| p1 + r * t)
}

/// Snaps canvas points through an overlay.
pub struct SnapService;

impl SnapService {
    /// Converts to map space, asks the overlay for the nearest point and
    /// converts back.
    pub fn snap_canvas_point(canvas: Point, viewport: &Viewport, overlay: &dyn Overlay) -> Point {
        let map = viewport.canvas_to_map(canvas);
        let snapped = overlay.nearest_overlay_point(map);
        viewport.map_to_canvas(snapped)
    }
}
