//! PaintKit Settings Crate
//!
//! Handles the paint configuration: defaults, validation and JSON/TOML
//! persistence.

pub mod config;
pub mod error;

pub use config::{
    CanvasSettings, EraseMode, PaintConfig, RasterSettings, RemoteSettings, ToolSettings,
    ToolSwitchPolicy, CONFIG_FILE_NAME, MAX_CANVAS_EDGE,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
