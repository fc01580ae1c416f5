//! Contracts between tools and the editor that hosts them.
//!
//! Tools never own document state. Everything they read (viewport, settings,
//! overlay, template, layer) and every change they make goes through
//! [`Host`]. Host-owned values are read fresh on every event.

use mapsketch_core::Settings;

use crate::commands::ChangeSet;
use crate::model::{Path, Point, ShapeGeometry, ShapeGroup, ShapeId, ShapeTemplate};
use crate::overlay::Overlay;
use crate::preview::Preview;
use crate::viewport::Viewport;

/// A drawing layer: ordered shape groups plus the selection.
pub trait Layer {
    fn name(&self) -> &str;

    /// Shapes in draw order, bottom first.
    fn shapes(&self) -> Vec<&ShapeGroup>;

    fn shape(&self, id: ShapeId) -> Option<&ShapeGroup>;

    fn selected_ids(&self) -> Vec<ShapeId>;

    /// Shapes whose geometry contains any of `points` (map space) within
    /// `tolerance` map units.
    fn select_by_points(&self, points: &[Point], tolerance: f64) -> Vec<ShapeId>;

    /// Shapes intersecting the region enclosed by `path` (map space).
    fn select_by_path(&self, path: &Path) -> Vec<ShapeId>;

    fn add_shape_group(&mut self, group: ShapeGroup);

    fn remove_shape(&mut self, id: ShapeId) -> Option<ShapeGroup>;

    /// Replaces the geometry of `id`. Returns `false` when absent.
    fn replace_shape(&mut self, id: ShapeId, geometry: ShapeGeometry) -> bool;

    fn set_selection(&mut self, ids: &[ShapeId]);
}

/// Editor services available to tools.
pub trait Host {
    fn viewport(&self) -> &Viewport;

    fn settings(&self) -> &Settings;

    fn overlay(&self) -> &dyn Overlay;

    fn active_template(&self) -> Option<&ShapeTemplate>;

    fn active_layer(&self) -> Option<&dyn Layer>;

    /// Allocates a new shape group from map-space paths using the active
    /// template. `None` when there is no active template.
    fn create_shape_from_paths(&mut self, paths: Vec<Path>) -> Option<ShapeGroup>;

    fn start_change_set(&mut self, label: &str) -> ChangeSet;

    /// Applies every change of `change_set` and records it for undo.
    fn complete_change_set(&mut self, change_set: ChangeSet);

    /// Replaces the transient preview; `None` clears it.
    fn set_preview(&mut self, preview: Option<Preview>);
}
