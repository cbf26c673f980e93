//! Configuration for PaintKit
//!
//! Provides configuration file handling, defaults, and validation.
//! Supports JSON and TOML file formats, picked by file extension.
//!
//! Configuration is organized into logical sections:
//! - Canvas (surface size, background color)
//! - Tools (pen color and width, algorithm, erase and preview parameters)
//! - Raster (pixel-walk algorithm choices)
//! - Remote (server-side drawing collaborator)

use paintkit_core::{Algorithm, CircleAlgorithm, Color, LineAlgorithm};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

/// Largest accepted canvas edge, in pixels.
pub const MAX_CANVAS_EDGE: u32 = 16_384;

/// File name used inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "paintkit.toml";

/// What happens to an unfinished shape when the active tool changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolSwitchPolicy {
    /// Discard the unfinished shape. It is not moved to the undo stack.
    #[default]
    CancelInProgress,
    /// Leave the unfinished shape in the scene; it can be resumed by
    /// switching back to its tool.
    KeepInProgress,
}

/// How freehand erasing is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EraseMode {
    /// Stroke the erased path locally in the background color.
    #[default]
    Local,
    /// Send each erase sample to the server and show the returned raster.
    Remote,
}

impl std::fmt::Display for EraseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

/// Canvas settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
    /// Color the surface is cleared to, also used by the erasers
    pub background: Color,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: Color::rgb(0x1A, 0x1A, 0x24),
        }
    }
}

/// Tool settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Initial pen color
    pub color: Color,
    /// Initial stroke width
    pub stroke_width: f64,
    /// Initial rendering algorithm
    pub algorithm: Algorithm,
    /// Parameter steps used to flatten Bézier curves
    pub bezier_steps: usize,
    /// Freehand eraser width as a multiple of the stroke width
    pub eraser_width_multiplier: f64,
    /// Radius of control-point markers in previews
    pub marker_radius: f64,
    /// Unfinished-shape handling on tool change
    pub tool_switch: ToolSwitchPolicy,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            color: Color::rgb(0xFF, 0xBF, 0x00),
            stroke_width: 2.0,
            algorithm: Algorithm::Raster,
            bezier_steps: 100,
            eraser_width_multiplier: 2.0,
            marker_radius: 4.0,
            tool_switch: ToolSwitchPolicy::CancelInProgress,
        }
    }
}

/// Raster algorithm settings
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterSettings {
    pub line: LineAlgorithm,
    pub circle: CircleAlgorithm,
}

/// Remote drawing collaborator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSettings {
    /// Mirror edits to the server
    pub enabled: bool,
    /// Server origin, e.g. `http://127.0.0.1:8000`
    pub base_url: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
    /// Freehand erase handling
    pub erase_mode: EraseMode,
    /// Value sent in the `X-CSRFToken` header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csrf_token: Option<String>,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_ms: 10_000,
            erase_mode: EraseMode::Local,
            csrf_token: None,
        }
    }
}

/// Complete paint configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PaintConfig {
    pub canvas: CanvasSettings,
    pub tools: ToolSettings,
    pub raster: RasterSettings,
    pub remote: RemoteSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> ConfigResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("<none>").to_string())),
    }
}

impl PaintConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config location, e.g. `~/.config/paintkit/paintkit.toml`.
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("paintkit").join(CONFIG_FILE_NAME))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no config directory on this platform".to_string())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("cannot read {}: {}", path.display(), e))
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load config from `path`, falling back to defaults when it is missing
    /// or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!("No configuration at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring configuration {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("cannot write {}: {}", path.display(), e))
        })?;

        debug!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let canvas = &self.canvas;
        for (key, value) in [("canvas.width", canvas.width), ("canvas.height", canvas.height)] {
            if value == 0 || value > MAX_CANVAS_EDGE {
                return Err(ConfigError::ValueOutOfRange {
                    key: key.to_string(),
                    value: value.to_string(),
                }
                .into());
            }
        }

        let tools = &self.tools;
        if !(tools.stroke_width.is_finite() && tools.stroke_width > 0.0) {
            return Err(SettingsError::invalid("tools.stroke_width", "must be > 0"));
        }
        if tools.bezier_steps == 0 {
            return Err(SettingsError::invalid("tools.bezier_steps", "must be >= 1"));
        }
        if !(tools.eraser_width_multiplier.is_finite() && tools.eraser_width_multiplier > 0.0) {
            return Err(SettingsError::invalid(
                "tools.eraser_width_multiplier",
                "must be > 0",
            ));
        }
        if !(tools.marker_radius.is_finite() && tools.marker_radius >= 0.0) {
            return Err(SettingsError::invalid("tools.marker_radius", "must be >= 0"));
        }

        let remote = &self.remote;
        if remote.timeout_ms == 0 {
            return Err(SettingsError::invalid("remote.timeout_ms", "must be > 0"));
        }
        if remote.enabled
            && !(remote.base_url.starts_with("http://") || remote.base_url.starts_with("https://"))
        {
            return Err(SettingsError::invalid(
                "remote.base_url",
                "must be an http(s) URL when remote sync is enabled",
            ));
        }
        if remote.erase_mode == EraseMode::Remote && !remote.enabled {
            return Err(SettingsError::invalid(
                "remote.erase_mode",
                "remote erasing requires remote.enabled",
            ));
        }

        Ok(())
    }

    /// Width of the freehand eraser for a given stroke width.
    pub fn eraser_width(&self, stroke_width: f64) -> f64 {
        stroke_width * self.tools.eraser_width_multiplier
    }
}
