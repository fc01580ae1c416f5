use crate::events::Modifiers;
use crate::host::Host;
use crate::model::Point;

use super::{resolve_canvas_point, snap_requested};

/// Forces a square drag: `|dy| = |dx|`, keeping the side of the anchor the
/// raw point is on vertically.
pub fn constrain_to_square(anchor: Point, raw: Point) -> Point {
    let magnitude = (raw.x - anchor.x).abs();
    let dy = if raw.y < anchor.y { -magnitude } else { magnitude };
    Point::new(raw.x, anchor.y + dy)
}

/// Anchor and current point of a press-drag-release gesture, canvas space.
///
/// Snap mode is sampled once at pointer-down and applies to every later
/// point of the gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DragGesture {
    pub anchor: Point,
    pub current: Point,
    pub snap: bool,
}

impl DragGesture {
    pub fn begin(host: &dyn Host, position: Point, modifiers: Modifiers) -> Self {
        let snap = snap_requested(host, modifiers);
        let anchor = resolve_canvas_point(host, position, snap);
        Self {
            anchor,
            current: anchor,
            snap,
        }
    }

    /// Snaps, then applies the square constraint while Shift is held.
    pub fn update(&mut self, host: &dyn Host, position: Point, modifiers: Modifiers) {
        let snapped = resolve_canvas_point(host, position, self.snap);
        self.current = if modifiers.shift {
            constrain_to_square(self.anchor, snapped)
        } else {
            snapped
        };
    }

    pub fn map_points(&self, host: &dyn Host) -> (Point, Point) {
        let viewport = host.viewport();
        (viewport.canvas_to_map(self.anchor), viewport.canvas_to_map(self.current))
    }
}
