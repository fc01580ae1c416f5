//! # MapSketch
//!
//! Geometry and transform engine of a vector map editor.
//!
//! ## Architecture
//!
//! MapSketch is organized as a workspace:
//!
//! 1. **mapsketch-core** - Settings, errors and conic/polynomial algebra
//! 2. **mapsketch-designer** - Path model, viewport, drawing tools,
//!    selection engine and the reference canvas host
//! 3. **mapsketch** - Logging setup and the demo binary

pub use mapsketch_core::{Error, GeometryError, Result, Settings, SettingsError};
pub use mapsketch_designer as designer;

pub use mapsketch_designer::{
    Canvas, Change, ChangeSet, Host, Key, Modifiers, Path, Point, ShapeGroup, ShapeId, ToolBox,
    ToolEvent, ToolKind, ToolOutcome, Viewport,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
