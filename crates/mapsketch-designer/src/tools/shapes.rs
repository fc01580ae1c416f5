//! Press-drag-release shape tools.
//!
//! The drag vector `(w, h) = current − anchor` defines every shape. For
//! arcs and ellipses the sweep flag is 1 when `w` and `h` share a sign, so
//! the construction bulges the same way whichever quadrant the drag goes.

use std::marker::PhantomData;

use crate::events::{Key, PointerButton, ToolEvent};
use crate::host::Host;
use crate::model::{Path, Point, Radii, SweepFlag, Transit, Vector};
use crate::preview::{outline, Preview, PreviewKind};

use super::drag::DragGesture;
use super::{can_draw, commit_paths, Tool, ToolKind, ToolOutcome};

/// A shape defined by a drag from `anchor` to `current`.
pub trait DragShape {
    const KIND: ToolKind;
    const LABEL: &'static str;

    fn path_from_drag(anchor: Point, current: Point) -> Path;
}

fn sweep_for(w: f64, h: f64) -> SweepFlag {
    if (w >= 0.0) == (h >= 0.0) {
        SweepFlag::Positive
    } else {
        SweepFlag::Negative
    }
}

/// Closed rectangle: four lines from the anchor.
#[derive(Debug, Clone, Copy, Default)]
pub struct RectangleShape;

impl DragShape for RectangleShape {
    const KIND: ToolKind = ToolKind::DrawRectangle;
    const LABEL: &'static str = "Draw Rectangle";

    fn path_from_drag(anchor: Point, current: Point) -> Path {
        Path::rectangle(anchor, current)
    }
}

/// Ellipse inscribed in the drag rectangle, as two half arcs starting at
/// the middle of the anchor side.
#[derive(Debug, Clone, Copy, Default)]
pub struct EllipseShape;

impl DragShape for EllipseShape {
    const KIND: ToolKind = ToolKind::DrawEllipse;
    const LABEL: &'static str = "Draw Ellipse";

    fn path_from_drag(anchor: Point, current: Point) -> Path {
        let w = current.x - anchor.x;
        let h = current.y - anchor.y;
        let radii = Radii::new(w.abs() / 2.0, h.abs() / 2.0);
        let sweep = sweep_for(w, h);
        Path::with_transits(
            anchor + Vector::new(0.0, h / 2.0),
            [
                Transit::arc(Vector::new(w, 0.0), Vector::new(w / 2.0, 0.0), radii, sweep),
                Transit::arc(Vector::new(-w, 0.0), Vector::new(-w / 2.0, 0.0), radii, sweep),
            ],
        )
    }
}

/// Quarter ellipse from the anchor to the current point, centred below
/// (or above) the anchor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArcShape;

impl DragShape for ArcShape {
    const KIND: ToolKind = ToolKind::DrawArc;
    const LABEL: &'static str = "Draw Arc";

    fn path_from_drag(anchor: Point, current: Point) -> Path {
        let w = current.x - anchor.x;
        let h = current.y - anchor.y;
        Path::with_transits(
            anchor,
            [Transit::arc(
                Vector::new(w, h),
                Vector::new(0.0, h),
                Radii::new(w.abs(), h.abs()),
                sweep_for(w, h),
            )],
        )
    }
}

/// Generic drag-to-draw tool: idle until pointer-down, previews on move,
/// commits one shape on pointer-up.
pub struct DrawShapeTool<S: DragShape> {
    gesture: Option<DragGesture>,
    shape: PhantomData<S>,
}

pub type DrawRectangleTool = DrawShapeTool<RectangleShape>;
pub type DrawEllipseTool = DrawShapeTool<EllipseShape>;
pub type DrawArcTool = DrawShapeTool<ArcShape>;

impl<S: DragShape> DrawShapeTool<S> {
    pub fn new() -> Self {
        Self {
            gesture: None,
            shape: PhantomData,
        }
    }

    fn show_preview(&self, gesture: &DragGesture, host: &mut dyn Host) {
        let path = S::path_from_drag(gesture.anchor, gesture.current);
        let preview = Preview::new(
            PreviewKind::Shape,
            vec![outline(&path.flatten(), path.is_closed())],
        );
        host.set_preview(Some(preview));
    }
}

impl<S: DragShape> Default for DrawShapeTool<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DragShape> Tool for DrawShapeTool<S> {
    fn kind(&self) -> ToolKind {
        S::KIND
    }

    fn activate(&mut self, host: &mut dyn Host) {
        self.gesture = None;
        host.set_preview(None);
    }

    fn handle_event(&mut self, event: &ToolEvent, host: &mut dyn Host) -> ToolOutcome {
        match *event {
            ToolEvent::PointerDown {
                position,
                button: PointerButton::Primary,
                modifiers,
            } => {
                if self.gesture.is_some() || !can_draw(host) {
                    return ToolOutcome::Ignored;
                }
                let gesture = DragGesture::begin(host, position, modifiers);
                tracing::trace!(tool = %S::KIND, x = gesture.anchor.x, y = gesture.anchor.y, "drag started");
                self.gesture = Some(gesture);
                ToolOutcome::Updated
            }
            ToolEvent::PointerMove {
                position,
                modifiers,
            } => {
                let Some(mut gesture) = self.gesture else {
                    return ToolOutcome::Ignored;
                };
                gesture.update(host, position, modifiers);
                self.gesture = Some(gesture);
                self.show_preview(&gesture, host);
                ToolOutcome::Updated
            }
            ToolEvent::PointerUp {
                position,
                button: PointerButton::Primary,
                modifiers,
            } => {
                let Some(mut gesture) = self.gesture.take() else {
                    return ToolOutcome::Ignored;
                };
                host.set_preview(None);
                gesture.update(host, position, modifiers);
                let (anchor, current) = gesture.map_points(host);
                commit_paths(host, vec![S::path_from_drag(anchor, current)], S::LABEL, true)
            }
            ToolEvent::KeyDown {
                key: Key::Escape, ..
            } if self.gesture.is_some() => {
                self.cancel(host);
                ToolOutcome::Cancelled
            }
            _ => ToolOutcome::Ignored,
        }
    }

    fn cancel(&mut self, host: &mut dyn Host) {
        self.gesture = None;
        host.set_preview(None);
    }

    fn is_idle(&self) -> bool {
        self.gesture.is_none()
    }
}
