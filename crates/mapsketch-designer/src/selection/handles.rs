//! Selection handles and their device-space hot zones.

use crate::model::{Bounds, Point};

/// The eight resize handles around a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl Handle {
    pub const ALL: [Handle; 8] = [
        Handle::TopLeft,
        Handle::Top,
        Handle::TopRight,
        Handle::Right,
        Handle::BottomRight,
        Handle::Bottom,
        Handle::BottomLeft,
        Handle::Left,
    ];

    /// Handle centre on `rect` (canvas space, y down).
    pub fn position(&self, rect: &Bounds) -> Point {
        let center = rect.center();
        match self {
            Handle::TopLeft => Point::new(rect.x, rect.y),
            Handle::Top => Point::new(center.x, rect.y),
            Handle::TopRight => Point::new(rect.right(), rect.y),
            Handle::Right => Point::new(rect.right(), center.y),
            Handle::BottomRight => Point::new(rect.right(), rect.bottom()),
            Handle::Bottom => Point::new(center.x, rect.bottom()),
            Handle::BottomLeft => Point::new(rect.x, rect.bottom()),
            Handle::Left => Point::new(rect.x, center.y),
        }
    }

    pub fn moves_left(&self) -> bool {
        matches!(self, Handle::TopLeft | Handle::Left | Handle::BottomLeft)
    }

    pub fn moves_right(&self) -> bool {
        matches!(self, Handle::TopRight | Handle::Right | Handle::BottomRight)
    }

    pub fn moves_top(&self) -> bool {
        matches!(self, Handle::TopLeft | Handle::Top | Handle::TopRight)
    }

    pub fn moves_bottom(&self) -> bool {
        matches!(self, Handle::BottomLeft | Handle::Bottom | Handle::BottomRight)
    }

    pub fn is_corner(&self) -> bool {
        (self.moves_left() || self.moves_right()) && (self.moves_top() || self.moves_bottom())
    }
}

fn within(p: Point, target: Point, size: f64) -> bool {
    let half = size / 2.0;
    (p.x - target.x).abs() <= half && (p.y - target.y).abs() <= half
}

/// Resize handle whose hot zone (a `size`-pixel square) contains `point`.
pub fn handle_at(rect: &Bounds, point: Point, size: f64) -> Option<Handle> {
    Handle::ALL
        .into_iter()
        .find(|h| within(point, h.position(rect), size))
}

/// Rotate handle centre, `offset` pixels above the top edge.
pub fn rotate_handle_position(rect: &Bounds, offset: f64) -> Point {
    Point::new(rect.center().x, rect.y - offset)
}

pub fn hits_rotate_handle(rect: &Bounds, point: Point, size: f64, offset: f64) -> bool {
    within(point, rotate_handle_position(rect, offset), size)
}
