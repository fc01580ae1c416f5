//! Pure transform math for move, resize and rotate gestures (map space).

use crate::model::{Bounds, Point, Vector};

use super::handles::Handle;

/// Smallest scale magnitude a resize may produce; keeps arcs non-degenerate.
const MIN_SCALE: f64 = 0.01;

/// Drag delta, restricted to its dominant axis when `lock` is set.
pub fn move_delta(delta: Vector, lock: bool) -> Vector {
    if !lock {
        return delta;
    }
    if delta.x.abs() >= delta.y.abs() {
        Vector::new(delta.x, 0.0)
    } else {
        Vector::new(0.0, delta.y)
    }
}

/// Scale anchor and factors for dragging `handle` of `bounds` by `delta`.
///
/// The anchor is the opposite edge or corner. With `lock`, corner handles
/// scale uniformly by the larger factor and edge handles drag the other
/// axis along about the centre.
pub fn resize_factors(handle: Handle, bounds: &Bounds, delta: Vector, lock: bool) -> (Point, f64, f64) {
    let center = bounds.center();
    let factor = |size: f64, grown: f64| if size > 0.0 { grown / size } else { 1.0 };

    let (anchor_x, mut sx) = if handle.moves_left() {
        (bounds.right(), factor(bounds.width, bounds.width - delta.x))
    } else if handle.moves_right() {
        (bounds.x, factor(bounds.width, bounds.width + delta.x))
    } else {
        (center.x, 1.0)
    };
    let (anchor_y, mut sy) = if handle.moves_top() {
        (bounds.bottom(), factor(bounds.height, bounds.height - delta.y))
    } else if handle.moves_bottom() {
        (bounds.y, factor(bounds.height, bounds.height + delta.y))
    } else {
        (center.y, 1.0)
    };

    if lock {
        if handle.is_corner() {
            let s = sx.abs().max(sy.abs());
            sx = s.copysign(sx);
            sy = s.copysign(sy);
        } else if handle.moves_left() || handle.moves_right() {
            sy = sx.abs();
        } else {
            sx = sy.abs();
        }
    }

    let clamp = |s: f64| if s.abs() < MIN_SCALE { MIN_SCALE.copysign(s) } else { s };
    (Point::new(anchor_x, anchor_y), clamp(sx), clamp(sy))
}

/// Rotation in degrees that follows the pointer from `start` to `current`
/// around `center`, snapped to `snap_degrees` when `lock` is set.
pub fn rotation_delta(center: Point, start: Point, current: Point, lock: bool, snap_degrees: f64) -> f64 {
    let a0 = (start.y - center.y).atan2(start.x - center.x);
    let a1 = (current.y - center.y).atan2(current.x - center.x);
    // Rotation angles are the negated mathematical angle.
    let degrees = crate::model::normalize_degrees(-(a1 - a0).to_degrees());
    if lock && snap_degrees > 0.0 {
        (degrees / snap_degrees).round() * snap_degrees
    } else {
        degrees
    }
}
