use crate::commands::Change;
use crate::events::{Key, PointerButton, ToolEvent};
use crate::host::Host;
use crate::model::{Bounds, Vector};
use crate::preview::Preview;

use super::drag::DragGesture;
use super::{log_bounds, Tool, ToolKind, ToolOutcome};

/// Zoom level that makes a map-space rectangle fill the viewport.
///
/// Takes the larger of the two per-axis ratios, not the smaller: the
/// rectangle's tighter axis fills the surface and the other axis may be
/// cropped. A 400x600 drag on an 800x600 surface gives 2.00, where the
/// smaller ratio would give 1.00 and leave the view unchanged. The result is
/// clamped to `[zoom_min, zoom_max]` and rounded to two decimals. `None` for
/// an empty rectangle.
pub fn zoom_for_rect(
    viewport_width: f64,
    viewport_height: f64,
    rect: &Bounds,
    zoom_min: f64,
    zoom_max: f64,
) -> Option<f64> {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return None;
    }
    let ratio = (viewport_width / rect.width).max(viewport_height / rect.height);
    let clamped = ratio.clamp(zoom_min, zoom_max);
    Some((clamped * 100.0).round() / 100.0)
}

/// Drag a rectangle to zoom into it.
#[derive(Debug, Default)]
pub struct ZoomTool {
    gesture: Option<DragGesture>,
}

impl ZoomTool {
    pub fn new() -> Self {
        Self { gesture: None }
    }

    fn commit(&self, gesture: &DragGesture, host: &mut dyn Host) -> ToolOutcome {
        let (anchor, current) = gesture.map_points(host);
        let rect = Bounds::from_corners(anchor, current);
        log_bounds("zoom", &rect);

        let viewport = host.viewport();
        let settings = host.settings();
        let Some(zoom) = zoom_for_rect(
            viewport.width(),
            viewport.height(),
            &rect,
            settings.zoom_min,
            settings.zoom_max,
        ) else {
            tracing::debug!("empty zoom rectangle discarded");
            return ToolOutcome::Discarded;
        };
        let pan = -Vector::new(rect.x, rect.y);
        let (zoom_before, pan_before) = (viewport.zoom(), viewport.pan());

        let mut change_set = host.start_change_set("Zoom");
        change_set.push(Change::Zoom {
            before: zoom_before,
            after: zoom,
        });
        change_set.push(Change::Pan {
            before: pan_before,
            after: pan,
        });
        host.complete_change_set(change_set);
        tracing::info!(zoom, pan_x = pan.x, pan_y = pan.y, "zoomed to rectangle");
        ToolOutcome::Committed
    }
}

impl Tool for ZoomTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Zoom
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
            } if self.gesture.is_none() => {
                self.gesture = Some(DragGesture::begin(host, position, modifiers));
                ToolOutcome::Updated
            }
            ToolEvent::PointerMove {
                position,
                modifiers,
            } => {
                let Some(gesture) = self.gesture.as_mut() else {
                    return ToolOutcome::Ignored;
                };
                gesture.update(host, position, modifiers);
                let preview = Preview::rubber_band(gesture.anchor, gesture.current);
                host.set_preview(Some(preview));
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
                self.commit(&gesture, host)
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
