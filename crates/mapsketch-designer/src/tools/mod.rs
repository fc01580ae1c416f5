//! Interactive tools.
//!
//! Each tool is a small state machine driven by [`ToolEvent`]s. Tools keep
//! only gesture state; everything else is read from the [`Host`] per event.
//! A gesture either commits exactly one change set or none.

use std::fmt;

use crate::commands::Change;
use crate::events::{Modifiers, ToolEvent};
use crate::host::Host;
use crate::model::{Bounds, Path, Point};
use crate::overlay::SnapService;

mod drag;
mod point;
mod shapes;
mod zoom;

pub use drag::constrain_to_square;
pub use point::DrawPointTool;
pub use shapes::{
    ArcShape, DragShape, DrawArcTool, DrawEllipseTool, DrawRectangleTool, DrawShapeTool,
    EllipseShape, RectangleShape,
};
pub use zoom::{zoom_for_rect, ZoomTool};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    DrawPoint,
    DrawRectangle,
    DrawEllipse,
    DrawArc,
    SelectRectangle,
    Zoom,
}

impl ToolKind {
    pub const ALL: [ToolKind; 6] = [
        ToolKind::DrawPoint,
        ToolKind::DrawRectangle,
        ToolKind::DrawEllipse,
        ToolKind::DrawArc,
        ToolKind::SelectRectangle,
        ToolKind::Zoom,
    ];
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ToolKind::DrawPoint => "Point",
            ToolKind::DrawRectangle => "Rectangle",
            ToolKind::DrawEllipse => "Ellipse",
            ToolKind::DrawArc => "Arc",
            ToolKind::SelectRectangle => "Select",
            ToolKind::Zoom => "Zoom",
        };
        f.write_str(name)
    }
}

/// What a tool did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOutcome {
    /// Event not relevant in the current state.
    Ignored,
    /// Gesture state or preview changed.
    Updated,
    /// A change set was committed.
    Committed,
    /// Gesture ended without a change (e.g. below minimum size).
    Discarded,
    /// Gesture aborted by the user.
    Cancelled,
}

pub trait Tool {
    fn kind(&self) -> ToolKind;

    /// Called when the tool becomes active. Resets gesture state.
    fn activate(&mut self, host: &mut dyn Host);

    fn handle_event(&mut self, event: &ToolEvent, host: &mut dyn Host) -> ToolOutcome;

    /// Abandons any gesture in progress without committing.
    fn cancel(&mut self, host: &mut dyn Host);

    fn is_idle(&self) -> bool;
}

/// Owns one instance of every tool and routes events to the active one.
pub struct ToolBox {
    tools: Vec<Box<dyn Tool>>,
    active: ToolKind,
}

impl ToolBox {
    pub fn new() -> Self {
        Self {
            tools: vec![
                Box::new(DrawPointTool::new()),
                Box::new(DrawRectangleTool::default()),
                Box::new(DrawEllipseTool::default()),
                Box::new(DrawArcTool::default()),
                Box::new(crate::selection::SelectionTool::new()),
                Box::new(ZoomTool::new()),
            ],
            active: ToolKind::SelectRectangle,
        }
    }

    pub fn active(&self) -> ToolKind {
        self.active
    }

    /// Switches tools, cancelling any gesture of the previous one.
    pub fn activate(&mut self, kind: ToolKind, host: &mut dyn Host) {
        if let Some(current) = self.tool_mut(self.active) {
            if !current.is_idle() {
                tracing::debug!(tool = %kind, "cancelling gesture on tool switch");
                current.cancel(host);
            }
        }
        self.active = kind;
        if let Some(next) = self.tool_mut(kind) {
            next.activate(host);
        }
        tracing::debug!(tool = %kind, "tool activated");
    }

    pub fn handle_event(&mut self, event: &ToolEvent, host: &mut dyn Host) -> ToolOutcome {
        let active = self.active;
        match self.tool_mut(active) {
            Some(tool) => tool.handle_event(event, host),
            None => ToolOutcome::Ignored,
        }
    }

    fn tool_mut(&mut self, kind: ToolKind) -> Option<&mut Box<dyn Tool>> {
        self.tools.iter_mut().find(|t| t.kind() == kind)
    }
}

impl Default for ToolBox {
    fn default() -> Self {
        Self::new()
    }
}

/// Snap toggle for a gesture: the setting, inverted while Control is held.
pub(crate) fn snap_requested(host: &dyn Host, modifiers: Modifiers) -> bool {
    host.settings().snap_enabled ^ modifiers.control
}

pub(crate) fn resolve_canvas_point(host: &dyn Host, position: Point, snap: bool) -> Point {
    if snap {
        SnapService::snap_canvas_point(position, host.viewport(), host.overlay())
    } else {
        position
    }
}

/// Drawing needs both a template and a layer to put the shape on.
pub(crate) fn can_draw(host: &dyn Host) -> bool {
    let ready = host.active_template().is_some() && host.active_layer().is_some();
    if !ready {
        tracing::trace!("no active template or layer; drawing ignored");
    }
    ready
}

/// Adds `paths` as one new shape group in a single change set.
pub(crate) fn commit_paths(
    host: &mut dyn Host,
    paths: Vec<Path>,
    label: &str,
    enforce_min_size: bool,
) -> ToolOutcome {
    let Some(bounds) = paths.iter().map(Path::bounds).reduce(|a, b| a.union(&b)) else {
        return ToolOutcome::Discarded;
    };
    let min_size = host.settings().min_shape_size;
    if enforce_min_size && !bounds.meets_minimum(min_size) {
        tracing::debug!(
            width = bounds.width,
            height = bounds.height,
            min_size,
            "shape below minimum size discarded"
        );
        return ToolOutcome::Discarded;
    }
    if host.active_layer().is_none() {
        return ToolOutcome::Ignored;
    }
    let visible = host.viewport().visible_map_bounds();
    let paths = paths.into_iter().map(|p| p.with_view_hint(&visible)).collect();
    let Some(group) = host.create_shape_from_paths(paths) else {
        return ToolOutcome::Ignored;
    };
    tracing::info!(id = %group.id, label, "shape created");
    let mut change_set = host.start_change_set(label);
    change_set.push(Change::AddShape { group });
    host.complete_change_set(change_set);
    ToolOutcome::Committed
}

pub(crate) fn log_bounds(label: &str, bounds: &Bounds) {
    tracing::trace!(
        label,
        x = bounds.x,
        y = bounds.y,
        width = bounds.width,
        height = bounds.height,
        "gesture bounds"
    );
}
