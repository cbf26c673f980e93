//! Host input events.

use paintkit_core::{Algorithm, Color, Point};
use serde::{Deserialize, Serialize};

use super::keymap::KeyPress;
use crate::model::ShapeKind;

/// One pointer, keyboard or toolbar event.
///
/// Serialized as `{"type": "pointer_down", "at": [x, y]}` and so on, which is
/// the format replay scripts use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown { at: Point },
    PointerMove { at: Point },
    PointerUp { at: Point },
    DoubleClick { at: Point },
    Key(KeyPress),
    SelectTool { tool: ShapeKind },
    SetColor { color: Color },
    SetStrokeWidth { width: f64 },
    SetAlgorithm { algorithm: Algorithm },
    Undo,
    Redo,
    Cancel,
    Clear,
}
