//! Save and load drawings.
//!
//! A scene file is pretty-printed JSON holding the canvas parameters and the
//! finished shapes in paint order. Undo history and any in-progress shape
//! are not stored.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use paintkit_core::{Color, Error};
use paintkit_settings::CanvasSettings;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::model::Shape;
use crate::scene::SceneState;

/// Scene file format version
pub const SCENE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFile {
    pub version: u32,
    pub metadata: SceneMetadata,
    pub canvas: CanvasState,
    pub shapes: Vec<Shape>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasState {
    pub width: u32,
    pub height: u32,
    pub background: Color,
}

impl From<&CanvasSettings> for CanvasState {
    fn from(canvas: &CanvasSettings) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            background: canvas.background,
        }
    }
}

impl SceneFile {
    pub fn new(name: impl Into<String>, canvas: CanvasState) -> Self {
        let now = Utc::now();
        Self {
            version: SCENE_FORMAT_VERSION,
            metadata: SceneMetadata {
                name: name.into(),
                created: now,
                modified: now,
            },
            canvas,
            shapes: Vec::new(),
        }
    }

    /// Snapshot of the finished shapes of `scene`.
    pub fn from_scene(name: impl Into<String>, canvas: CanvasState, scene: &SceneState) -> Self {
        let mut file = Self::new(name, canvas);
        file.shapes = scene
            .shapes()
            .iter()
            .filter(|shape| shape.completed)
            .cloned()
            .collect();
        file
    }

    /// A scene with the stored shapes and empty history.
    pub fn to_scene(&self) -> SceneState {
        SceneState::from_shapes(self.shapes.clone())
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize scene")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write scene file {}", path.display()))?;
        info!("Saved {} shapes to {}", self.shapes.len(), path.display());
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file {}", path.display()))?;

        let mut scene: SceneFile =
            serde_json::from_str(&content).context("Failed to parse scene file")?;
        if scene.version != SCENE_FORMAT_VERSION {
            return Err(Error::SceneVersion {
                found: scene.version,
                expected: SCENE_FORMAT_VERSION,
            }
            .into());
        }

        scene.metadata.modified = Utc::now();
        info!("Loaded {} shapes from {}", scene.shapes.len(), path.display());
        Ok(scene)
    }
}
