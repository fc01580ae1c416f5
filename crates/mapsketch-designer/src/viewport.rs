//! Viewport and coordinate transformation between canvas and map space.
//!
//! Canvas coordinates are device pixels with (0,0) at the top-left of the
//! drawing surface. Map coordinates are logical units of the document.
//!
//! Formula:
//! ```text
//! map    = canvas / zoom - pan
//! canvas = (map + pan) * zoom
//! ```
//!
//! The two are exact inverses for any `zoom > 0`.

use std::fmt;

use mapsketch_core::GeometryError;
use serde::{Deserialize, Serialize};

use crate::model::{transform_point, Bounds, Point, Vector};

/// Scales by `1/zoom`, then translates by `-pan`.
pub fn canvas_to_map(point: Point, zoom: f64, pan: Vector) -> Point {
    transform_point(point, Vector::new(1.0 / zoom, 1.0 / zoom), -pan)
}

/// Inverse of [`canvas_to_map`].
pub fn map_to_canvas(point: Point, zoom: f64, pan: Vector) -> Point {
    transform_point(point, Vector::new(zoom, zoom), pan * zoom)
}

/// Zoom, pan and device size of the drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    zoom: f64,
    pan: Vector,
    width: f64,
    height: f64,
}

impl Viewport {
    /// Creates a viewport at zoom 1 with no pan.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            zoom: 1.0,
            pan: Vector::ZERO,
            width,
            height,
        }
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level. Non-positive or non-finite values are rejected.
    pub fn set_zoom(&mut self, zoom: f64) -> Result<(), GeometryError> {
        if !(zoom.is_finite() && zoom > 0.0) {
            return Err(GeometryError::InvalidZoom { zoom });
        }
        self.zoom = zoom;
        Ok(())
    }

    pub fn pan(&self) -> Vector {
        self.pan
    }

    pub fn set_pan(&mut self, pan: Vector) {
        self.pan = pan;
    }

    /// Device width in pixels.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Device height in pixels.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Sets the device dimensions (typically called when the surface resizes).
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn canvas_to_map(&self, point: Point) -> Point {
        canvas_to_map(point, self.zoom, self.pan)
    }

    pub fn map_to_canvas(&self, point: Point) -> Point {
        map_to_canvas(point, self.zoom, self.pan)
    }

    /// Converts a device-space length to map units.
    pub fn canvas_length_to_map(&self, length: f64) -> f64 {
        length / self.zoom
    }

    /// Map-space bounds of the visible surface.
    pub fn visible_map_bounds(&self) -> Bounds {
        Bounds::from_corners(
            self.canvas_to_map(Point::ZERO),
            self.canvas_to_map(Point::new(self.width, self.height)),
        )
    }

    /// Converts map-space bounds to canvas space.
    pub fn map_bounds_to_canvas(&self, bounds: &Bounds) -> Bounds {
        Bounds::from_corners(
            self.map_to_canvas(bounds.min()),
            self.map_to_canvas(bounds.max()),
        )
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Viewport(zoom: {:.2}, pan: ({:.2}, {:.2}), size: {}x{})",
            self.zoom, self.pan.x, self.pan.y, self.width, self.height
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}
