//! Selection and transform engine.
//!
//! One tool covers picking, rubber-band selection, move, resize, rotate and
//! keyboard nudging. The activity state is decided at pointer-down by
//! hit-testing the current selection's handles in device space:
//!
//! ```text
//! resize handle  -> Resize(handle)
//! rotate handle  -> Rotate
//! inside bounds  -> Move
//! on a shape     -> Move, after picking that shape
//! elsewhere      -> Select
//! ```
//!
//! Every gesture commits at most one change set, holding the shape
//! transforms and the selection before/after.

use crate::commands::{Change, ChangeSet};
use crate::events::{Key, Modifiers, PointerButton, ToolEvent};
use crate::host::Host;
use crate::model::{Bounds, Path, Point, ShapeGroup, ShapeId, Vector};
use crate::preview::{Preview, PreviewKind};
use crate::tools::{Tool, ToolKind, ToolOutcome};

pub mod handles;
pub mod transform;

pub use handles::{handle_at, hits_rotate_handle, rotate_handle_position, Handle};
pub use transform::{move_delta, resize_factors, rotation_delta};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityState {
    #[default]
    Default,
    Select,
    Move,
    Resize(Handle),
    Rotate,
}

/// Pointer gesture snapshot taken at pointer-down.
#[derive(Debug, Clone)]
struct PointerGesture {
    start: Point,
    current: Point,
    lock: bool,
    originals: Vec<ShapeGroup>,
    /// Map-space selection bounds at pointer-down.
    bounds: Bounds,
    selection_before: Vec<ShapeId>,
    /// Selection the gesture commits with; differs from `selection_before`
    /// when the press picked a shape.
    selection_after: Vec<ShapeId>,
}

#[derive(Debug, Clone)]
struct Nudge {
    key: Key,
    offset: Vector,
    travelled: f64,
    originals: Vec<ShapeGroup>,
}

/// Modifier keys as seen through key-down/key-up events.
#[derive(Debug, Clone, Copy, Default)]
struct HeldModifiers {
    shift: bool,
    control: bool,
    alt: bool,
}

impl HeldModifiers {
    fn set(&mut self, key: Key, down: bool) {
        match key {
            Key::Shift => self.shift = down,
            Key::Control => self.control = down,
            Key::Alt => self.alt = down,
            _ => {}
        }
    }

    fn any(&self) -> bool {
        self.shift || self.control || self.alt
    }
}

/// Applies a pick to the previous selection: replaces it, or toggles each
/// picked id in and out of it.
pub fn combine_selection(before: &[ShapeId], picked: &[ShapeId], toggle: bool) -> Vec<ShapeId> {
    if !toggle {
        return picked.to_vec();
    }
    let mut result = before.to_vec();
    for id in picked {
        match result.iter().position(|existing| existing == id) {
            Some(index) => {
                result.remove(index);
            }
            None => result.push(*id),
        }
    }
    result
}

/// Map-space union of the bounds of `groups`.
pub fn selection_bounds<'a>(groups: impl IntoIterator<Item = &'a ShapeGroup>) -> Option<Bounds> {
    groups.into_iter().map(ShapeGroup::bounds).reduce(|a, b| a.union(&b))
}

#[derive(Debug, Default)]
pub struct SelectionTool {
    state: ActivityState,
    gesture: Option<PointerGesture>,
    nudge: Option<Nudge>,
    held: HeldModifiers,
}

impl SelectionTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ActivityState {
        self.state
    }

    /// Whether picks currently toggle instead of replacing the selection.
    pub fn toggle_active(&self) -> bool {
        self.held.any()
    }

    fn reset(&mut self, host: &mut dyn Host) {
        self.state = ActivityState::Default;
        self.gesture = None;
        self.nudge = None;
        host.set_preview(None);
    }

    /// Forgets tracked modifier keys; their key-up may have gone to
    /// another tool.
    fn release_modifiers(&mut self) {
        self.held = HeldModifiers::default();
    }

    fn pointer_down(&mut self, position: Point, modifiers: Modifiers, host: &mut dyn Host) -> ToolOutcome {
        if self.gesture.is_some() {
            return ToolOutcome::Ignored;
        }
        if self.nudge.is_some() {
            self.finish_nudge(host);
        }
        let Some(layer) = host.active_layer() else {
            return ToolOutcome::Ignored;
        };
        let selection_before = layer.selected_ids();
        let mut selection_after = selection_before.clone();
        let mut originals: Vec<ShapeGroup> = selection_before
            .iter()
            .filter_map(|id| layer.shape(*id).cloned())
            .collect();

        let viewport = host.viewport();
        let settings = host.settings();
        let mut bounds = selection_bounds(&originals).unwrap_or_default();
        let rect = viewport.map_bounds_to_canvas(&bounds);
        let mut state = if originals.is_empty() {
            ActivityState::Select
        } else if let Some(handle) = handle_at(&rect, position, settings.handle_size_px) {
            ActivityState::Resize(handle)
        } else if hits_rotate_handle(
            &rect,
            position,
            settings.handle_size_px,
            settings.rotate_handle_offset_px,
        ) {
            ActivityState::Rotate
        } else if rect.contains(position) {
            ActivityState::Move
        } else {
            ActivityState::Select
        };

        if state == ActivityState::Select {
            let point = viewport.canvas_to_map(position);
            let tolerance = viewport.canvas_length_to_map(settings.hit_tolerance_px);
            // Topmost shape under the pointer.
            if let Some(hit) = layer.select_by_points(&[point], tolerance).last().copied() {
                let picked = combine_selection(&selection_before, &[hit], self.toggle_active());
                if picked.contains(&hit) {
                    originals = picked.iter().filter_map(|id| layer.shape(*id).cloned()).collect();
                    bounds = selection_bounds(&originals).unwrap_or_default();
                    selection_after = picked;
                    state = ActivityState::Move;
                }
            }
        }

        tracing::debug!(?state, selected = originals.len(), "selection gesture started");
        self.state = state;
        self.gesture = Some(PointerGesture {
            start: position,
            current: position,
            lock: modifiers.shift,
            originals,
            bounds,
            selection_before,
            selection_after,
        });
        ToolOutcome::Updated
    }

    /// Originals with the live transform applied.
    fn transformed(&self, gesture: &PointerGesture, host: &dyn Host) -> Vec<ShapeGroup> {
        let viewport = host.viewport();
        let delta = viewport.canvas_to_map(gesture.current) - viewport.canvas_to_map(gesture.start);
        match self.state {
            ActivityState::Move => {
                let delta = move_delta(delta, gesture.lock);
                gesture.originals.iter().map(|g| g.translated(delta)).collect()
            }
            ActivityState::Resize(handle) => {
                let (anchor, sx, sy) = resize_factors(handle, &gesture.bounds, delta, gesture.lock);
                gesture
                    .originals
                    .iter()
                    .map(|g| g.scaled_about(anchor, sx, sy))
                    .collect()
            }
            ActivityState::Rotate => {
                let center = gesture.bounds.center();
                let degrees = rotation_delta(
                    center,
                    viewport.canvas_to_map(gesture.start),
                    viewport.canvas_to_map(gesture.current),
                    gesture.lock,
                    host.settings().rotate_snap_degrees,
                );
                gesture
                    .originals
                    .iter()
                    .map(|g| g.rotated_about(center, degrees))
                    .collect()
            }
            ActivityState::Default | ActivityState::Select => gesture.originals.clone(),
        }
    }

    fn pointer_move(&mut self, position: Point, modifiers: Modifiers, host: &mut dyn Host) -> ToolOutcome {
        let Some(mut gesture) = self.gesture.take() else {
            return ToolOutcome::Ignored;
        };
        gesture.current = position;
        gesture.lock = modifiers.shift;
        let preview = match self.state {
            ActivityState::Select => Preview::rubber_band(gesture.start, gesture.current),
            _ => {
                let groups = self.transformed(&gesture, host);
                Preview::of_groups(PreviewKind::Transform, &groups, host.viewport())
            }
        };
        host.set_preview(Some(preview));
        self.gesture = Some(gesture);
        ToolOutcome::Updated
    }

    fn pointer_up(&mut self, position: Point, modifiers: Modifiers, host: &mut dyn Host) -> ToolOutcome {
        let Some(mut gesture) = self.gesture.take() else {
            return ToolOutcome::Ignored;
        };
        gesture.current = position;
        gesture.lock = modifiers.shift;
        host.set_preview(None);

        let outcome = match self.state {
            // A click on the selection body without dragging picks.
            ActivityState::Select | ActivityState::Move if gesture.current == gesture.start => {
                self.finish_select(&gesture, host)
            }
            ActivityState::Select => self.finish_select(&gesture, host),
            ActivityState::Move => self.finish_transform(&gesture, host, "Move"),
            ActivityState::Resize(_) => self.finish_transform(&gesture, host, "Resize"),
            ActivityState::Rotate => self.finish_transform(&gesture, host, "Rotate"),
            ActivityState::Default => ToolOutcome::Ignored,
        };
        self.state = ActivityState::Default;
        outcome
    }

    fn finish_select(&self, gesture: &PointerGesture, host: &mut dyn Host) -> ToolOutcome {
        let viewport = host.viewport();
        let settings = host.settings();
        let Some(layer) = host.active_layer() else {
            return ToolOutcome::Ignored;
        };
        let dx = (gesture.current.x - gesture.start.x).abs();
        let dy = (gesture.current.y - gesture.start.y).abs();

        let picked = if dx < settings.pick_threshold_px && dy < settings.pick_threshold_px {
            let point = viewport.canvas_to_map(gesture.current);
            let tolerance = viewport.canvas_length_to_map(settings.hit_tolerance_px);
            layer.select_by_points(&[point], tolerance)
        } else {
            let region = Path::rectangle(
                viewport.canvas_to_map(gesture.start),
                viewport.canvas_to_map(gesture.current),
            );
            layer.select_by_path(&region)
        };
        let after = combine_selection(&gesture.selection_before, &picked, self.toggle_active());
        if after == gesture.selection_before {
            return ToolOutcome::Discarded;
        }
        tracing::debug!(picked = picked.len(), selected = after.len(), "selection changed");

        let mut change_set = host.start_change_set("Select");
        change_set.push(Change::Selection {
            before: gesture.selection_before.clone(),
            after,
        });
        host.complete_change_set(change_set);
        ToolOutcome::Committed
    }

    fn finish_transform(&self, gesture: &PointerGesture, host: &mut dyn Host, label: &str) -> ToolOutcome {
        let transformed = self.transformed(gesture, host);
        let mut change_set = host.start_change_set(label);
        push_transforms(&mut change_set, &gesture.originals, &transformed);
        if gesture.selection_after != gesture.selection_before {
            change_set.push(Change::Selection {
                before: gesture.selection_before.clone(),
                after: gesture.selection_after.clone(),
            });
        }
        if change_set.is_empty() {
            return ToolOutcome::Discarded;
        }
        tracing::info!(label, shapes = change_set.transformed_ids().len(), "selection transformed");
        host.complete_change_set(change_set);
        ToolOutcome::Committed
    }

    fn arrow_down(&mut self, key: Key, repeat: bool, host: &mut dyn Host) -> ToolOutcome {
        let Some((ux, uy)) = key.arrow_direction() else {
            return ToolOutcome::Ignored;
        };
        if self.gesture.is_some() {
            return ToolOutcome::Ignored;
        }
        if self.nudge.as_ref().is_some_and(|n| n.key != key) {
            self.finish_nudge(host);
        }
        if self.nudge.is_none() {
            let Some(layer) = host.active_layer() else {
                return ToolOutcome::Ignored;
            };
            let originals: Vec<ShapeGroup> = layer
                .selected_ids()
                .iter()
                .filter_map(|id| layer.shape(*id).cloned())
                .collect();
            if originals.is_empty() {
                return ToolOutcome::Ignored;
            }
            self.nudge = Some(Nudge {
                key,
                offset: Vector::ZERO,
                travelled: 0.0,
                originals,
            });
        }

        let viewport = host.viewport();
        let settings = host.settings();
        let cap = viewport.width().min(viewport.height()) / viewport.zoom();
        let requested = if repeat {
            settings.nudge_repeat_step
        } else {
            settings.nudge_step
        };
        let Some(nudge) = self.nudge.as_mut() else {
            return ToolOutcome::Ignored;
        };
        let step = requested.min(cap - nudge.travelled);
        if step <= 0.0 {
            tracing::trace!(cap, "nudge limit reached");
            return ToolOutcome::Ignored;
        }
        nudge.travelled += step;
        nudge.offset = nudge.offset + Vector::new(ux, uy) * step;

        let moved: Vec<ShapeGroup> = nudge.originals.iter().map(|g| g.translated(nudge.offset)).collect();
        let preview = Preview::of_groups(PreviewKind::Transform, &moved, viewport);
        host.set_preview(Some(preview));
        ToolOutcome::Updated
    }

    fn finish_nudge(&mut self, host: &mut dyn Host) -> ToolOutcome {
        let Some(nudge) = self.nudge.take() else {
            return ToolOutcome::Ignored;
        };
        host.set_preview(None);
        let moved: Vec<ShapeGroup> = nudge.originals.iter().map(|g| g.translated(nudge.offset)).collect();
        let mut change_set = host.start_change_set("Nudge");
        push_transforms(&mut change_set, &nudge.originals, &moved);
        if change_set.is_empty() {
            return ToolOutcome::Discarded;
        }
        tracing::debug!(dx = nudge.offset.x, dy = nudge.offset.y, "nudge committed");
        host.complete_change_set(change_set);
        ToolOutcome::Committed
    }
}

fn push_transforms(change_set: &mut ChangeSet, originals: &[ShapeGroup], transformed: &[ShapeGroup]) {
    for (before, after) in originals.iter().zip(transformed) {
        if before.paths != after.paths || before.rotation != after.rotation {
            change_set.push(Change::TransformShape {
                id: before.id,
                before: before.geometry(),
                after: after.geometry(),
            });
        }
    }
}

impl Tool for SelectionTool {
    fn kind(&self) -> ToolKind {
        ToolKind::SelectRectangle
    }

    fn activate(&mut self, host: &mut dyn Host) {
        self.release_modifiers();
        self.reset(host);
    }

    fn handle_event(&mut self, event: &ToolEvent, host: &mut dyn Host) -> ToolOutcome {
        match *event {
            ToolEvent::PointerDown {
                position,
                button: PointerButton::Primary,
                modifiers,
            } => self.pointer_down(position, modifiers, host),
            ToolEvent::PointerMove {
                position,
                modifiers,
            } => self.pointer_move(position, modifiers, host),
            ToolEvent::PointerUp {
                position,
                button: PointerButton::Primary,
                modifiers,
            } => self.pointer_up(position, modifiers, host),
            ToolEvent::KeyDown { key: Key::Escape, .. } => {
                if self.gesture.is_none() && self.nudge.is_none() {
                    return ToolOutcome::Ignored;
                }
                tracing::debug!(state = ?self.state, "selection gesture cancelled");
                self.reset(host);
                ToolOutcome::Cancelled
            }
            ToolEvent::KeyDown { key, .. } if key.is_modifier() => {
                self.held.set(key, true);
                ToolOutcome::Ignored
            }
            ToolEvent::KeyUp { key, .. } if key.is_modifier() => {
                self.held.set(key, false);
                ToolOutcome::Ignored
            }
            ToolEvent::KeyDown { key, repeat, .. } => self.arrow_down(key, repeat, host),
            ToolEvent::KeyUp { key, .. } if self.nudge.as_ref().is_some_and(|n| n.key == key) => {
                self.finish_nudge(host)
            }
            _ => ToolOutcome::Ignored,
        }
    }

    fn cancel(&mut self, host: &mut dyn Host) {
        self.release_modifiers();
        self.reset(host);
    }

    fn is_idle(&self) -> bool {
        self.gesture.is_none() && self.nudge.is_none()
    }
}
