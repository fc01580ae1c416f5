//! Reference host: viewport, layers, templates and undo history.
//!
//! `Canvas` is the in-memory editor the tools run against in the demo and
//! the tests. Change sets are applied atomically on completion and kept on
//! an undo stack.

mod layer;

pub use layer::ShapeLayer;

use mapsketch_core::Settings;

use crate::commands::{Change, ChangeSet};
use crate::host::{Host, Layer};
use crate::model::{Path, ShapeGroup, ShapeId, ShapeTemplate};
use crate::overlay::{NoOverlay, Overlay};
use crate::preview::Preview;
use crate::viewport::Viewport;

/// Undo history depth.
pub const MAX_HISTORY: usize = 50;

pub struct Canvas {
    viewport: Viewport,
    settings: Settings,
    overlay: Box<dyn Overlay>,
    templates: Vec<ShapeTemplate>,
    active_template: Option<usize>,
    layers: Vec<ShapeLayer>,
    active_layer: Option<usize>,
    preview: Option<Preview>,
    next_id: u64,
    undo_stack: Vec<ChangeSet>,
    redo_stack: Vec<ChangeSet>,
}

impl Canvas {
    /// Creates a canvas with one layer and the default template active.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            viewport: Viewport::new(width, height),
            settings: Settings::default(),
            overlay: Box::new(NoOverlay),
            templates: vec![ShapeTemplate::default()],
            active_template: Some(0),
            layers: vec![ShapeLayer::new("Layer 1")],
            active_layer: Some(0),
            preview: None,
            next_id: 1,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Creates a canvas with no layers and no templates; drawing tools
    /// ignore input until both exist.
    pub fn empty(width: f64, height: f64) -> Self {
        Self {
            templates: Vec::new(),
            active_template: None,
            layers: Vec::new(),
            active_layer: None,
            ..Self::new(width, height)
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_overlay(mut self, overlay: impl Overlay + 'static) -> Self {
        self.overlay = Box::new(overlay);
        self
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Adds a template and makes it active.
    pub fn add_template(&mut self, template: ShapeTemplate) {
        self.templates.push(template);
        self.active_template = Some(self.templates.len() - 1);
    }

    /// Adds a layer and makes it active. Returns its index.
    pub fn add_layer(&mut self, name: impl Into<String>) -> usize {
        self.layers.push(ShapeLayer::new(name));
        let index = self.layers.len() - 1;
        self.active_layer = Some(index);
        index
    }

    pub fn set_active_layer(&mut self, index: Option<usize>) {
        self.active_layer = index.filter(|i| *i < self.layers.len());
    }

    pub fn layer(&self) -> Option<&ShapeLayer> {
        self.active_layer.and_then(|i| self.layers.get(i))
    }

    fn layer_mut(&mut self) -> Option<&mut ShapeLayer> {
        self.active_layer.and_then(|i| self.layers.get_mut(i))
    }

    pub fn shape(&self, id: ShapeId) -> Option<&ShapeGroup> {
        self.layer().and_then(|l| l.shape(id))
    }

    pub fn shape_count(&self) -> usize {
        self.layer().map_or(0, ShapeLayer::len)
    }

    pub fn selected_ids(&self) -> Vec<ShapeId> {
        self.layer().map(|l| l.selected_ids()).unwrap_or_default()
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    /// Committed change sets, oldest first.
    pub fn history(&self) -> &[ChangeSet] {
        &self.undo_stack
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Reverts the last change set. Returns `false` when there is none.
    pub fn undo(&mut self) -> bool {
        let Some(change_set) = self.undo_stack.pop() else {
            return false;
        };
        self.apply(&change_set.inverted());
        tracing::debug!(label = %change_set.label, "undo");
        self.redo_stack.push(change_set);
        true
    }

    /// Re-applies the last undone change set.
    pub fn redo(&mut self) -> bool {
        let Some(change_set) = self.redo_stack.pop() else {
            return false;
        };
        self.apply(&change_set);
        tracing::debug!(label = %change_set.label, "redo");
        self.undo_stack.push(change_set);
        true
    }

    fn apply(&mut self, change_set: &ChangeSet) {
        for change in &change_set.changes {
            self.apply_change(change);
        }
    }

    fn apply_change(&mut self, change: &Change) {
        match change {
            Change::AddShape { group } => {
                if let Some(layer) = self.layer_mut() {
                    layer.add_shape_group(group.clone());
                }
            }
            Change::RemoveShape { group } => {
                if let Some(layer) = self.layer_mut() {
                    layer.remove_shape(group.id);
                }
            }
            Change::TransformShape { id, after, .. } => {
                let replaced = self
                    .layer_mut()
                    .is_some_and(|layer| layer.replace_shape(*id, after.clone()));
                if !replaced {
                    tracing::warn!(%id, "transform for unknown shape skipped");
                }
            }
            Change::Selection { after, .. } => {
                if let Some(layer) = self.layer_mut() {
                    layer.set_selection(after);
                }
            }
            Change::Zoom { after, .. } => {
                if let Err(e) = self.viewport.set_zoom(*after) {
                    tracing::warn!("zoom change rejected: {}", e);
                }
            }
            Change::Pan { after, .. } => self.viewport.set_pan(*after),
        }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl Host for Canvas {
    fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn overlay(&self) -> &dyn Overlay {
        self.overlay.as_ref()
    }

    fn active_template(&self) -> Option<&ShapeTemplate> {
        self.active_template.and_then(|i| self.templates.get(i))
    }

    fn active_layer(&self) -> Option<&dyn Layer> {
        self.layer().map(|l| l as &dyn Layer)
    }

    fn create_shape_from_paths(&mut self, paths: Vec<Path>) -> Option<ShapeGroup> {
        let template = self.active_template()?.name.clone();
        if let Some(error) = paths.iter().find_map(|p| p.validate().err()) {
            tracing::warn!("rejected shape geometry: {}", error);
            return None;
        }
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        Some(ShapeGroup::new(id, template, paths))
    }

    fn start_change_set(&mut self, label: &str) -> ChangeSet {
        ChangeSet::new(label)
    }

    fn complete_change_set(&mut self, change_set: ChangeSet) {
        if change_set.is_empty() {
            return;
        }
        self.apply(&change_set);
        tracing::debug!(label = %change_set.label, changes = change_set.len(), "change set committed");
        self.undo_stack.push(change_set);
        self.redo_stack.clear();
        if self.undo_stack.len() > MAX_HISTORY {
            self.undo_stack.remove(0);
        }
    }

    fn set_preview(&mut self, preview: Option<Preview>) {
        self.preview = preview;
    }
}
