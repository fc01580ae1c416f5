//! Relative-command paths.
//!
//! A [`Path`] is an absolute start point followed by [`Transit`]s whose
//! coordinates are relative to the pen position at the start of each transit.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use mapsketch_core::algebra::{intersect_line, EllipseCoefficients};
use mapsketch_core::constants::{ARC_FLATTEN_SEGMENTS, INTERSECTION_TOLERANCE};
use mapsketch_core::GeometryError;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{Bounds, Point, Radii, Vector};

/// Arc direction in terms of the parametric angle
/// `atan2((y − cy) / ry, (x − cx) / rx)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SweepFlag {
    /// Flag value 0: the angle decreases from start to end.
    Negative,
    /// Flag value 1: the angle increases from start to end.
    Positive,
}

impl SweepFlag {
    pub fn from_flag(flag: u8) -> Self {
        if flag == 0 {
            SweepFlag::Negative
        } else {
            SweepFlag::Positive
        }
    }

    pub fn as_flag(self) -> u8 {
        match self {
            SweepFlag::Negative => 0,
            SweepFlag::Positive => 1,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SweepFlag::Negative => SweepFlag::Positive,
            SweepFlag::Positive => SweepFlag::Negative,
        }
    }
}

/// One segment of a path, relative to the current pen position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Transit {
    Line {
        dx: f64,
        dy: f64,
    },
    /// Elliptical arc. `end` and `center` are relative to the arc's start.
    Arc {
        end: Vector,
        center: Vector,
        radii: Radii,
        sweep: SweepFlag,
    },
}

impl Transit {
    pub fn line(dx: f64, dy: f64) -> Self {
        Transit::Line { dx, dy }
    }

    pub fn arc(end: Vector, center: Vector, radii: Radii, sweep: SweepFlag) -> Self {
        Transit::Arc {
            end,
            center,
            radii,
            sweep,
        }
    }

    /// Pen displacement produced by this transit.
    pub fn delta(&self) -> Vector {
        match *self {
            Transit::Line { dx, dy } => Vector::new(dx, dy),
            Transit::Arc { end, .. } => end,
        }
    }

    /// Scales every relative offset; arcs flip direction under reflection.
    pub fn scaled(&self, sx: f64, sy: f64) -> Self {
        match *self {
            Transit::Line { dx, dy } => Transit::Line {
                dx: dx * sx,
                dy: dy * sy,
            },
            Transit::Arc {
                end,
                center,
                radii,
                sweep,
            } => Transit::Arc {
                end: Vector::new(end.x * sx, end.y * sy),
                center: Vector::new(center.x * sx, center.y * sy),
                radii: Radii::new(radii.x * sx.abs(), radii.y * sy.abs()),
                sweep: if sx * sy < 0.0 { sweep.flipped() } else { sweep },
            },
        }
    }
}

/// An arc resolved to absolute coordinates and parametric angles.
#[derive(Debug, Clone, Copy)]
struct ArcSpan {
    center: Point,
    radii: Radii,
    start_angle: f64,
    /// Swept magnitude in radians, `0..2π`.
    span: f64,
    direction: f64,
}

impl ArcSpan {
    fn resolve(pen: Point, end: Vector, center: Vector, radii: Radii, sweep: SweepFlag) -> Self {
        let center = pen + center;
        let start_angle = parametric_angle(center, radii, pen);
        let end_angle = parametric_angle(center, radii, pen + end);
        let (span, direction) = match sweep {
            SweepFlag::Positive => ((end_angle - start_angle).rem_euclid(TAU), 1.0),
            SweepFlag::Negative => ((start_angle - end_angle).rem_euclid(TAU), -1.0),
        };
        Self {
            center,
            radii,
            start_angle,
            span,
            direction,
        }
    }

    fn point_at(&self, angle: f64) -> Point {
        Point::new(
            self.center.x + self.radii.x * angle.cos(),
            self.center.y + self.radii.y * angle.sin(),
        )
    }

    fn covers(&self, angle: f64) -> bool {
        let offset = ((angle - self.start_angle) * self.direction).rem_euclid(TAU);
        offset <= self.span + 1e-12
    }

    /// Axis extrema (0, π/2, π, 3π/2) that fall inside the swept range.
    fn extrema(&self) -> impl Iterator<Item = Point> + '_ {
        [0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2]
            .into_iter()
            .filter(|a| self.covers(*a))
            .map(|a| self.point_at(a))
    }

    fn conic(&self) -> EllipseCoefficients {
        EllipseCoefficients::from_ellipse(self.center.as_tuple(), self.radii.as_tuple(), 0.0)
    }

    fn is_degenerate(&self) -> bool {
        self.radii.x <= 0.0 || self.radii.y <= 0.0
    }
}

fn parametric_angle(center: Point, radii: Radii, p: Point) -> f64 {
    let nx = if radii.x == 0.0 { 0.0 } else { (p.x - center.x) / radii.x };
    let ny = if radii.y == 0.0 { 0.0 } else { (p.y - center.y) / radii.y };
    ny.atan2(nx)
}

/// Absolute start point plus relative transits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub start: Point,
    pub transits: SmallVec<[Transit; 4]>,
    /// Whether the path touched the visible map area when it was created.
    /// A rendering hint only; never used for hit testing.
    #[serde(default = "visible_by_default")]
    pub in_view: bool,
}

fn visible_by_default() -> bool {
    true
}

impl Path {
    pub fn new(start: Point) -> Self {
        Self::with_transits(start, std::iter::empty())
    }

    pub fn with_transits(start: Point, transits: impl IntoIterator<Item = Transit>) -> Self {
        Self {
            start,
            transits: transits.into_iter().collect(),
            in_view: true,
        }
    }

    /// Sets the `in_view` hint from the visible map area.
    pub fn with_view_hint(mut self, visible: &Bounds) -> Self {
        self.in_view = self.bounds().intersects(visible);
        self
    }

    /// Closed axis-aligned rectangle spanning two corners.
    pub fn rectangle(a: Point, b: Point) -> Self {
        let w = b.x - a.x;
        let h = b.y - a.y;
        Self::with_transits(
            a,
            [
                Transit::line(w, 0.0),
                Transit::line(0.0, h),
                Transit::line(-w, 0.0),
                Transit::line(0.0, -h),
            ],
        )
    }

    /// Checks the path model invariants: at least one transit, finite
    /// coordinates everywhere and strictly positive arc radii.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.transits.is_empty() {
            return Err(GeometryError::EmptyPath);
        }
        let finite = |field: &'static str, value: f64| {
            if value.is_finite() {
                Ok(())
            } else {
                Err(GeometryError::NonFinite { field, value })
            }
        };
        finite("start.x", self.start.x)?;
        finite("start.y", self.start.y)?;
        for transit in &self.transits {
            match *transit {
                Transit::Line { dx, dy } => {
                    finite("dx", dx)?;
                    finite("dy", dy)?;
                }
                Transit::Arc {
                    end, center, radii, ..
                } => {
                    finite("end.x", end.x)?;
                    finite("end.y", end.y)?;
                    finite("center.x", center.x)?;
                    finite("center.y", center.y)?;
                    finite("radii.x", radii.x)?;
                    finite("radii.y", radii.y)?;
                    if radii.x <= 0.0 || radii.y <= 0.0 {
                        return Err(GeometryError::InvalidRadii {
                            rx: radii.x,
                            ry: radii.y,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    pub fn push(&mut self, transit: Transit) {
        self.transits.push(transit);
    }

    /// Pen position after the last transit.
    pub fn end(&self) -> Point {
        self.transits
            .iter()
            .fold(self.start, |pen, transit| pen + transit.delta())
    }

    pub fn is_closed(&self) -> bool {
        !self.transits.is_empty() && self.end().distance_to(&self.start) < 1e-9
    }

    /// Pen positions: the start followed by the end of every transit.
    pub fn vertices(&self) -> Vec<Point> {
        let mut points = Vec::with_capacity(self.transits.len() + 1);
        let mut pen = self.start;
        points.push(pen);
        for transit in &self.transits {
            pen = pen + transit.delta();
            points.push(pen);
        }
        points
    }

    pub fn bounds(&self) -> Bounds {
        get_path_bounds(self.start, &self.transits)
    }

    pub fn translated(&self, delta: Vector) -> Self {
        Self {
            start: self.start + delta,
            ..self.clone()
        }
    }

    /// Scales about `anchor`. Arc radii scale by the absolute factors.
    pub fn scaled_about(&self, anchor: Point, sx: f64, sy: f64) -> Self {
        Self {
            start: Point::new(
                anchor.x + (self.start.x - anchor.x) * sx,
                anchor.y + (self.start.y - anchor.y) * sy,
            ),
            transits: self.transits.iter().map(|t| t.scaled(sx, sy)).collect(),
            in_view: self.in_view,
        }
    }

    /// Polyline approximation. Arcs use `ARC_FLATTEN_SEGMENTS` per full turn.
    pub fn flatten(&self) -> Vec<Point> {
        let mut points = vec![self.start];
        let mut pen = self.start;
        for transit in &self.transits {
            if let Transit::Arc {
                end,
                center,
                radii,
                sweep,
            } = *transit
            {
                let arc = ArcSpan::resolve(pen, end, center, radii, sweep);
                let steps = ((arc.span / TAU) * ARC_FLATTEN_SEGMENTS as f64).ceil().max(2.0) as usize;
                for step in 1..steps {
                    let t = step as f64 / steps as f64;
                    points.push(arc.point_at(arc.start_angle + arc.direction * arc.span * t));
                }
            }
            pen = pen + transit.delta();
            points.push(pen);
        }
        points
    }

    /// Whether `point` is inside the closed path (even-odd) or within
    /// `tolerance` of its outline.
    pub fn contains_point(&self, point: Point, tolerance: f64) -> bool {
        let outline = self.flatten();
        if self.is_closed() && polygon_contains(&outline, point) {
            return true;
        }
        outline
            .windows(2)
            .any(|seg| distance_to_segment(point, seg[0], seg[1]) <= tolerance)
    }

    /// Whether the path's outline or interior touches `rect`.
    ///
    /// Line segments are clipped exactly; arcs are tested against the
    /// rectangle edges with the conic/segment solver.
    pub fn intersects_rect(&self, rect: &Bounds) -> bool {
        if !self.bounds().intersects(rect) {
            return false;
        }
        if self.vertices().into_iter().any(|v| rect.contains(v)) {
            return true;
        }
        if self.is_closed() && self.contains_point(rect.center(), 0.0) {
            return true;
        }

        let edges = rect_edges(rect);
        let mut pen = self.start;
        for transit in &self.transits {
            let next = pen + transit.delta();
            let hit = match *transit {
                Transit::Line { .. } => edges.iter().any(|(a, b)| segments_intersect(pen, next, *a, *b)),
                Transit::Arc {
                    end,
                    center,
                    radii,
                    sweep,
                } => {
                    let arc = ArcSpan::resolve(pen, end, center, radii, sweep);
                    if arc.is_degenerate() {
                        edges.iter().any(|(a, b)| segments_intersect(pen, next, *a, *b))
                    } else {
                        arc_meets_edges(&arc, &edges)
                    }
                }
            };
            if hit {
                return true;
            }
            pen = next;
        }
        false
    }

    /// Conics of the path's arcs in absolute coordinates.
    pub fn arc_conics(&self) -> Vec<EllipseCoefficients> {
        let mut pen = self.start;
        let mut conics = Vec::new();
        for transit in &self.transits {
            if let Transit::Arc {
                end,
                center,
                radii,
                sweep,
            } = *transit
            {
                let arc = ArcSpan::resolve(pen, end, center, radii, sweep);
                if !arc.is_degenerate() {
                    conics.push(arc.conic());
                }
            }
            pen = pen + transit.delta();
        }
        conics
    }
}

/// Bounding box of a path given as start point and transits.
///
/// Includes every transit endpoint plus, for arcs, the axis-extremum points
/// that fall within the swept angular range.
pub fn get_path_bounds(start: Point, transits: &[Transit]) -> Bounds {
    let mut pen = start;
    let mut points: Vec<Point> = vec![start];
    for transit in transits {
        if let Transit::Arc {
            end,
            center,
            radii,
            sweep,
        } = *transit
        {
            let arc = ArcSpan::resolve(pen, end, center, radii, sweep);
            points.extend(arc.extrema());
        }
        pen = pen + transit.delta();
        points.push(pen);
    }
    Bounds::from_points(points).unwrap_or_default()
}

fn arc_meets_edges(arc: &ArcSpan, edges: &[(Point, Point); 4]) -> bool {
    let conic = arc.conic();
    edges.iter().any(|(a, b)| {
        intersect_line(&conic, a.as_tuple(), b.as_tuple(), INTERSECTION_TOLERANCE)
            .into_iter()
            .any(|t| {
                let hit = Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t);
                arc.covers(parametric_angle(arc.center, arc.radii, hit))
            })
    })
}

fn rect_edges(rect: &Bounds) -> [(Point, Point); 4] {
    let [tl, tr, br, bl] = rect.corners();
    [(tl, tr), (tr, br), (br, bl), (bl, tl)]
}

/// Whether any part of a polyline (or closed polygon) touches `rect`.
pub(crate) fn polyline_intersects_rect(points: &[Point], closed: bool, rect: &Bounds) -> bool {
    if points.iter().any(|p| rect.contains(*p)) {
        return true;
    }
    if closed && polygon_contains(points, rect.center()) {
        return true;
    }
    let edges = rect_edges(rect);
    points.windows(2).any(|seg| {
        edges
            .iter()
            .any(|(a, b)| segments_intersect(seg[0], seg[1], *a, *b))
    })
}

/// Even-odd ray cast.
pub(crate) fn polygon_contains(polygon: &[Point], p: Point) -> bool {
    let mut inside = false;
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.y > p.y) != (pj.y > p.y) {
            let x = pi.x + (p.y - pi.y) * (pj.x - pi.x) / (pj.y - pi.y);
            if p.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

pub(crate) fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len2 = ab.x * ab.x + ab.y * ab.y;
    if len2 == 0.0 {
        return p.distance_to(&a);
    }
    let t = (((p.x - a.x) * ab.x + (p.y - a.y) * ab.y) / len2).clamp(0.0, 1.0);
    p.distance_to(&(a + ab * t))
}

fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

fn on_segment(a: Point, b: Point, p: Point) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

pub(crate) fn segments_intersect(p1: Point, p2: Point, q1: Point, q2: Point) -> bool {
    let d1 = cross(q1, q2, p1);
    let d2 = cross(q1, q2, p2);
    let d3 = cross(p1, p2, q1);
    let d4 = cross(p1, p2, q2);
    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }
    (d1 == 0.0 && on_segment(q1, q2, p1))
        || (d2 == 0.0 && on_segment(q1, q2, p2))
        || (d3 == 0.0 && on_segment(p1, p2, q1))
        || (d4 == 0.0 && on_segment(p1, p2, q2))
}
