use crate::events::{PointerButton, ToolEvent};
use crate::host::Host;
use crate::model::{Path, Point};

use super::{can_draw, commit_paths, resolve_canvas_point, snap_requested, Tool, ToolKind, ToolOutcome};

/// Places a small square marker centred on the release point.
#[derive(Debug, Default)]
pub struct DrawPointTool;

impl DrawPointTool {
    pub fn new() -> Self {
        Self
    }

    /// Square of side `size` centred on `center`.
    pub fn point_path(center: Point, size: f64) -> Path {
        let half = size / 2.0;
        Path::rectangle(
            Point::new(center.x - half, center.y - half),
            Point::new(center.x + half, center.y + half),
        )
    }
}

impl Tool for DrawPointTool {
    fn kind(&self) -> ToolKind {
        ToolKind::DrawPoint
    }

    fn activate(&mut self, host: &mut dyn Host) {
        host.set_preview(None);
    }

    fn handle_event(&mut self, event: &ToolEvent, host: &mut dyn Host) -> ToolOutcome {
        let ToolEvent::PointerUp {
            position,
            button: PointerButton::Primary,
            modifiers,
        } = *event
        else {
            return ToolOutcome::Ignored;
        };
        if !can_draw(host) {
            return ToolOutcome::Ignored;
        }
        let snap = snap_requested(host, modifiers);
        let canvas = resolve_canvas_point(host, position, snap);
        let center = host.viewport().canvas_to_map(canvas);
        let path = Self::point_path(center, host.settings().point_size);
        commit_paths(host, vec![path], "Draw Point", false)
    }

    fn cancel(&mut self, _host: &mut dyn Host) {}

    fn is_idle(&self) -> bool {
        true
    }
}
