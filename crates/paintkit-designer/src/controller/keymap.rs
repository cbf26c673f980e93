//! Keyboard shortcuts.

use serde::{Deserialize, Serialize};

use crate::model::ShapeKind;

/// A key press as delivered by the host.
///
/// `key` is either a single character or a named key such as `Escape` or
/// `Delete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPress {
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
        }
    }

    pub fn ctrl(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: true,
        }
    }
}

/// What a shortcut does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Undo,
    Redo,
    Cancel,
    Clear,
    SelectTool(ShapeKind),
}

/// Maps a key press to its action.
///
/// Ctrl chords only ever trigger their Ctrl action, so Ctrl+Z undoes
/// without also selecting the closed Bézier tool.
pub fn action_for(press: &KeyPress) -> Option<KeyAction> {
    match press.key.as_str() {
        "Escape" => return Some(KeyAction::Cancel),
        "Delete" => return Some(KeyAction::Clear),
        _ => {}
    }

    let mut chars = press.key.chars();
    let c = chars.next()?.to_ascii_lowercase();
    if chars.next().is_some() {
        return None;
    }

    if press.ctrl {
        return match c {
            'z' => Some(KeyAction::Undo),
            'y' => Some(KeyAction::Redo),
            _ => None,
        };
    }

    let kind = match c {
        'f' => ShapeKind::Freehand,
        'l' => ShapeKind::Line,
        'c' => ShapeKind::Circle,
        'b' => ShapeKind::BezierOpen,
        'z' => ShapeKind::BezierClosed,
        'r' => ShapeKind::Rectangle,
        't' => ShapeKind::Triangle,
        'p' => ShapeKind::Polygon,
        'e' => ShapeKind::Ellipse,
        'a' => ShapeKind::EraseArea,
        'x' => ShapeKind::EraseFreehand,
        'q' => ShapeKind::QuadraticBezier,
        _ => return None,
    };
    Some(KeyAction::SelectTool(kind))
}
