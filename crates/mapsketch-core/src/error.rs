//! Error handling for MapSketch
//!
//! Provides the error types shared by the geometry engine:
//! - Geometry errors (malformed paths, arcs and conics)
//! - Settings errors (parsing/validation of editor settings)
//!
//! All error types use `thiserror` for ergonomic error handling. Degenerate
//! user input (an accidental click, a zero-size drag) is not an error; tools
//! discard it silently. These types cover programmer-facing failures only.

use thiserror::Error;

/// Geometry error type
///
/// Raised when geometry is constructed from values that violate the
/// path model invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Path coordinate or radius is NaN or infinite
    #[error("Path has non-finite {field}: {value}")]
    NonFinite {
        /// The offending field name.
        field: &'static str,
        /// The offending value.
        value: f64,
    },

    /// Radii must be strictly positive
    #[error("Invalid radii ({rx}, {ry}): radii must be positive")]
    InvalidRadii {
        /// Horizontal radius.
        rx: f64,
        /// Vertical radius.
        ry: f64,
    },

    /// Zoom must be strictly positive and finite
    #[error("Invalid zoom level {zoom}")]
    InvalidZoom {
        /// The rejected zoom value.
        zoom: f64,
    },

    /// A path with no transits has no extent
    #[error("Path has no transits")]
    EmptyPath,
}

/// Settings error type
///
/// Represents errors raised while loading or validating editor settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Settings document could not be parsed
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// A setting failed validation
    #[error("Invalid setting value for {setting}: {reason}")]
    InvalidValue {
        /// The setting with the invalid value.
        setting: String,
        /// The reason the value is invalid.
        reason: String,
    },
}

/// Main error type for MapSketch
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Settings error
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }

    /// Check if this is a settings error
    pub fn is_settings_error(&self) -> bool {
        matches!(self, Error::Settings(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
