//! Change sets: the unit of commit and undo.
//!
//! Tools open a change set through the host, push the [`Change`]s a gesture
//! produced and hand it back to the host, which applies it atomically.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{ShapeGeometry, ShapeGroup, ShapeId, Vector};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(clippy::large_enum_variant)]
pub enum Change {
    AddShape {
        group: ShapeGroup,
    },
    RemoveShape {
        group: ShapeGroup,
    },
    TransformShape {
        id: ShapeId,
        before: ShapeGeometry,
        after: ShapeGeometry,
    },
    Selection {
        before: Vec<ShapeId>,
        after: Vec<ShapeId>,
    },
    Zoom {
        before: f64,
        after: f64,
    },
    Pan {
        before: Vector,
        after: Vector,
    },
}

impl Change {
    /// The change that reverts this one.
    pub fn inverted(&self) -> Change {
        match self {
            Change::AddShape { group } => Change::RemoveShape {
                group: group.clone(),
            },
            Change::RemoveShape { group } => Change::AddShape {
                group: group.clone(),
            },
            Change::TransformShape { id, before, after } => Change::TransformShape {
                id: *id,
                before: after.clone(),
                after: before.clone(),
            },
            Change::Selection { before, after } => Change::Selection {
                before: after.clone(),
                after: before.clone(),
            },
            Change::Zoom { before, after } => Change::Zoom {
                before: *after,
                after: *before,
            },
            Change::Pan { before, after } => Change::Pan {
                before: *after,
                after: *before,
            },
        }
    }
}

/// Ordered changes committed together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeSet {
    pub id: Uuid,
    pub label: String,
    pub changes: Vec<Change>,
}

impl ChangeSet {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            changes: Vec::new(),
        }
    }

    pub fn push(&mut self, change: Change) {
        self.changes.push(change);
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Reverse-order inverse, used for undo. Keeps the id.
    pub fn inverted(&self) -> ChangeSet {
        ChangeSet {
            id: self.id,
            label: self.label.clone(),
            changes: self.changes.iter().rev().map(Change::inverted).collect(),
        }
    }

    pub fn transformed_ids(&self) -> Vec<ShapeId> {
        self.changes
            .iter()
            .filter_map(|c| match c {
                Change::TransformShape { id, .. } => Some(*id),
                _ => None,
            })
            .collect()
    }
}
