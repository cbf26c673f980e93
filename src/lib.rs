//! # PaintKit
//!
//! Shape drawing and scan conversion for a paint tool, with undo/redo and
//! optional sync to a drawing server.
//!
//! ## Architecture
//!
//! PaintKit is organized as a workspace with multiple crates:
//!
//! 1. **paintkit-core** - Geometry, colors, algorithm selectors, errors
//! 2. **paintkit-raster** - Pixel-walk algorithms and drawing surfaces
//! 3. **paintkit-settings** - Configuration with JSON/TOML persistence
//! 4. **paintkit-designer** - Shapes, scene history, interaction, redraw
//! 5. **paintkit-communication** - Server wire types and HTTP client
//! 6. **paintkit** - [`PaintSession`] and the replay binary

pub mod session;

pub use paintkit_communication as communication;
pub use paintkit_designer as designer;
pub use paintkit_raster as raster;
pub use paintkit_settings as settings;

pub use paintkit_core::{
    Algorithm, CircleAlgorithm, Color, Error, ImageError, LineAlgorithm, PixelPoint, Point,
    RemoteError, Result,
};
pub use paintkit_designer::{InputEvent, InteractionController, SceneEvent, Shape, ShapeKind};
pub use paintkit_raster::{PixmapSurface, RecordingSurface, Surface};
pub use paintkit_settings::PaintConfig;
pub use session::{load_image_for_processing, Notice, PaintSession};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support, INFO by default
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

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
