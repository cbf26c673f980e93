//! Scene changes the remote collaborator cares about.

use paintkit_core::Point;
use serde::{Deserialize, Serialize};

use crate::model::Shape;

/// An edit reported by the interaction controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SceneEvent {
    /// A drawn shape was finished.
    ShapeCompleted { shape: Shape },
    /// One freehand-eraser sample.
    EraseStroke { point: Point, size: f64 },
    /// A freehand-eraser stroke was released, with every sample it made.
    EraseStrokeFinished { points: Vec<Point>, size: f64 },
    /// An area erase was released.
    EraseArea { start: Point, end: Point },
    /// The scene was cleared.
    Cleared,
}
