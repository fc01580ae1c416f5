//! Transient device-space feedback drawn while a gesture is in progress.

use lyon::math::point;
use lyon::path::Path as OutlinePath;

use crate::model::{Bounds, Point, ShapeGroup};
use crate::viewport::Viewport;

/// Two-tone dashed stroke, a dark line under a light one so the preview
/// stays visible on any background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewStroke {
    pub under: [u8; 4],
    pub over: [u8; 4],
    pub width: f32,
    pub dash: [f32; 2],
}

impl Default for PreviewStroke {
    fn default() -> Self {
        Self {
            under: [0x20, 0x20, 0x20, 0xff],
            over: [0xf0, 0xf0, 0xf0, 0xff],
            width: 1.0,
            dash: [4.0, 4.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    /// Outline of the shape being drawn.
    Shape,
    /// Rubber-band rectangle (selection or zoom).
    RubberBand,
    /// Selection being moved, resized, rotated or nudged.
    Transform,
}

/// Outlines in canvas coordinates plus how to stroke them.
#[derive(Debug, Clone)]
pub struct Preview {
    pub kind: PreviewKind,
    pub outlines: Vec<OutlinePath>,
    pub stroke: PreviewStroke,
}

impl Preview {
    pub fn new(kind: PreviewKind, outlines: Vec<OutlinePath>) -> Self {
        Self {
            kind,
            outlines,
            stroke: PreviewStroke::default(),
        }
    }

    /// Rectangle between two canvas points.
    pub fn rubber_band(a: Point, b: Point) -> Self {
        let rect = Bounds::from_corners(a, b);
        Self::new(PreviewKind::RubberBand, vec![outline(&rect.corners(), true)])
    }

    /// Map-space shape groups drawn in canvas space.
    pub fn of_groups<'a>(
        kind: PreviewKind,
        groups: impl IntoIterator<Item = &'a ShapeGroup>,
        viewport: &Viewport,
    ) -> Self {
        let outlines = groups
            .into_iter()
            .flat_map(|group| group.outlines())
            .map(|(points, closed)| {
                let canvas: Vec<Point> = points.into_iter().map(|p| viewport.map_to_canvas(p)).collect();
                outline(&canvas, closed)
            })
            .collect();
        Self::new(kind, outlines)
    }

    pub fn is_empty(&self) -> bool {
        self.outlines.is_empty()
    }
}

/// Builds a lyon path through `points`.
pub fn outline(points: &[Point], closed: bool) -> OutlinePath {
    let mut builder = OutlinePath::builder();
    if let Some((first, rest)) = points.split_first() {
        builder.begin(point(first.x as f32, first.y as f32));
        for p in rest {
            builder.line_to(point(p.x as f32, p.y as f32));
        }
        builder.end(closed);
    }
    builder.build()
}
