use crate::host::Layer;
use crate::model::{Path, Point, ShapeGeometry, ShapeGroup, ShapeId};

/// In-memory layer: shape groups in draw order plus the selected ids.
///
/// # Selection Model
///
/// - Selection order is the order ids were selected in.
/// - Ids of shapes that are removed leave the selection with them.
#[derive(Debug, Clone, Default)]
pub struct ShapeLayer {
    name: String,
    shapes: Vec<ShapeGroup>,
    selected: Vec<ShapeId>,
}

impl ShapeLayer {
    /// Creates an empty layer.
    ///
    /// # Examples
    ///
    /// ```
    /// use mapsketch_designer::canvas::ShapeLayer;
    /// use mapsketch_designer::host::Layer;
    ///
    /// let layer = ShapeLayer::new("Roads");
    /// assert_eq!(layer.name(), "Roads");
    /// assert!(layer.shapes().is_empty());
    /// ```
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shapes: Vec::new(),
            selected: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl Layer for ShapeLayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn shapes(&self) -> Vec<&ShapeGroup> {
        self.shapes.iter().collect()
    }

    fn shape(&self, id: ShapeId) -> Option<&ShapeGroup> {
        self.shapes.iter().find(|s| s.id == id)
    }

    fn selected_ids(&self) -> Vec<ShapeId> {
        self.selected.clone()
    }

    fn select_by_points(&self, points: &[Point], tolerance: f64) -> Vec<ShapeId> {
        self.shapes
            .iter()
            .filter(|s| points.iter().any(|p| s.contains_point(*p, tolerance)))
            .map(|s| s.id)
            .collect()
    }

    fn select_by_path(&self, path: &Path) -> Vec<ShapeId> {
        let region = path.bounds();
        self.shapes
            .iter()
            .filter(|s| s.intersects_rect(&region))
            .map(|s| s.id)
            .collect()
    }

    fn add_shape_group(&mut self, group: ShapeGroup) {
        self.shapes.push(group);
    }

    fn remove_shape(&mut self, id: ShapeId) -> Option<ShapeGroup> {
        let index = self.shapes.iter().position(|s| s.id == id)?;
        self.selected.retain(|s| *s != id);
        Some(self.shapes.remove(index))
    }

    fn replace_shape(&mut self, id: ShapeId, geometry: ShapeGeometry) -> bool {
        match self.shapes.iter_mut().find(|s| s.id == id) {
            Some(shape) => {
                shape.set_geometry(geometry);
                true
            }
            None => false,
        }
    }

    fn set_selection(&mut self, ids: &[ShapeId]) {
        self.selected = ids
            .iter()
            .copied()
            .filter(|id| self.shapes.iter().any(|s| s.id == *id))
            .collect();
    }
}
