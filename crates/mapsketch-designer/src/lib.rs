//! # MapSketch Designer
//!
//! Interactive geometry editing for vector maps: drawing tools, the
//! selection/transform engine and the path model they operate on.
//!
//! ## Architecture
//!
//! ```text
//! Host (editor services: viewport, settings, overlay, layer, change sets)
//!   ├── ToolBox ── DrawPoint / DrawRectangle / DrawEllipse / DrawArc / Zoom
//!   │          └── SelectionTool (select, move, resize, rotate, nudge)
//!   └── Canvas  (reference host with undo history)
//!
//! Model: Path (start + relative Line/Arc transits) -> ShapeGroup
//! ```
//!
//! Tools hold only per-gesture state and talk to the editor through
//! [`host::Host`]. Every completed gesture commits at most one
//! [`commands::ChangeSet`].
//!
//! ## Usage
//!
//! ```
//! use mapsketch_designer::canvas::Canvas;
//! use mapsketch_designer::events::ToolEvent;
//! use mapsketch_designer::tools::{ToolBox, ToolKind, ToolOutcome};
//!
//! let mut canvas = Canvas::default();
//! let mut tools = ToolBox::new();
//! tools.activate(ToolKind::DrawRectangle, &mut canvas);
//!
//! tools.handle_event(&ToolEvent::pointer_down(10.0, 10.0), &mut canvas);
//! tools.handle_event(&ToolEvent::pointer_move(50.0, 40.0), &mut canvas);
//! let outcome = tools.handle_event(&ToolEvent::pointer_up(50.0, 40.0), &mut canvas);
//!
//! assert_eq!(outcome, ToolOutcome::Committed);
//! assert_eq!(canvas.shape_count(), 1);
//! ```

pub mod canvas;
pub mod commands;
pub mod events;
pub mod host;
pub mod model;
pub mod overlay;
pub mod preview;
pub mod selection;
pub mod tools;
pub mod viewport;

pub use canvas::{Canvas, ShapeLayer};
pub use commands::{Change, ChangeSet};
pub use events::{Key, Modifiers, PointerButton, ToolEvent};
pub use host::{Host, Layer};
pub use model::{
    get_path_bounds, rotate_point, scale_point, transform_point, Bounds, Path, Point, Radii,
    ShapeGeometry, ShapeGroup, ShapeId, ShapeTemplate, SweepFlag, Transit, Vector,
};
pub use overlay::{Guide, GridOverlay, GuideOverlay, NoOverlay, Overlay, SnapService};
pub use preview::{Preview, PreviewKind, PreviewStroke};
pub use selection::{ActivityState, Handle, SelectionTool};
pub use tools::{Tool, ToolBox, ToolKind, ToolOutcome};
pub use viewport::{canvas_to_map, map_to_canvas, Viewport};
