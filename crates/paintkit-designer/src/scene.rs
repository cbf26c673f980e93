//! Scene state: the ordered shape list, the in-progress shape and history.
//!
//! Continuous and click-built shapes live in the list from their first point
//! on ("attached"). Drag shapes stay outside the list ("detached") until the
//! pointer is released. Undo moves the last listed shape onto the undone
//! stack and redo moves it back. Committing a shape to the list, and `clear`,
//! empties the undone stack; an in-progress shape that is later discarded
//! leaves it alone.

use tracing::debug;

use crate::model::{Shape, ShapeKind};

#[derive(Debug, Clone, Default, PartialEq)]
enum Current {
    #[default]
    None,
    /// The in-progress shape is the last entry of `shapes`.
    Attached,
    Detached(Shape),
}

#[derive(Debug, Clone, Default)]
pub struct SceneState {
    shapes: Vec<Shape>,
    current: Current,
    undone: Vec<Shape>,
}

impl SceneState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scene holding `shapes` with empty history.
    pub fn from_shapes(shapes: Vec<Shape>) -> Self {
        Self {
            shapes,
            ..Self::default()
        }
    }

    /// Shapes in paint order, including an attached in-progress shape.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Shapes removed by undo, most recent last.
    pub fn undone(&self) -> &[Shape] {
        &self.undone
    }

    /// The shape being built, wherever it lives.
    pub fn current(&self) -> Option<&Shape> {
        match &self.current {
            Current::None => None,
            Current::Attached => self.shapes.last(),
            Current::Detached(shape) => Some(shape),
        }
    }

    pub fn current_mut(&mut self) -> Option<&mut Shape> {
        match &mut self.current {
            Current::None => None,
            Current::Attached => self.shapes.last_mut(),
            Current::Detached(shape) => Some(shape),
        }
    }

    pub fn in_progress(&self) -> bool {
        self.current().is_some()
    }

    /// Whether the in-progress shape is outside the list.
    pub fn is_detached(&self) -> bool {
        matches!(self.current, Current::Detached(_))
    }

    /// Appends an unfinished shape and makes it current.
    ///
    /// History is kept until the shape is committed.
    pub fn begin_attached(&mut self, shape: Shape) {
        debug!("Begin {} {} in list", shape.kind, shape.id);
        self.shapes.push(shape);
        self.current = Current::Attached;
    }

    /// Makes `shape` current without listing it.
    pub fn begin_detached(&mut self, shape: Shape) {
        debug!("Begin {} {} detached", shape.kind, shape.id);
        self.current = Current::Detached(shape);
    }

    /// Makes the last listed shape current again when it is an unfinished
    /// shape of `kind`.
    pub fn resume(&mut self, kind: ShapeKind) -> bool {
        if self.is_detached() {
            return false;
        }
        let resumable = self
            .shapes
            .last()
            .is_some_and(|s| s.kind == kind && !s.completed);
        if resumable {
            self.current = Current::Attached;
        }
        resumable
    }

    /// Finishes the in-progress shape, listing it if it was detached.
    ///
    /// Returns the finished shape, or `None` when nothing was in progress.
    pub fn complete_current(&mut self) -> Option<&Shape> {
        match std::mem::take(&mut self.current) {
            Current::None => None,
            Current::Attached => {
                self.undone.clear();
                let shape = self.shapes.last_mut()?;
                shape.completed = true;
                debug!("Completed {} {} ({} points)", shape.kind, shape.id, shape.points.len());
                Some(&*shape)
            }
            Current::Detached(mut shape) => {
                shape.completed = true;
                debug!("Completed {} {} ({} points)", shape.kind, shape.id, shape.points.len());
                self.push_shape(shape);
                self.shapes.last()
            }
        }
    }

    /// Stops tracking the in-progress shape without changing the list.
    ///
    /// An attached shape stays listed, unfinished, and counts as committed;
    /// a detached one is dropped.
    pub fn release_current(&mut self) {
        if std::mem::take(&mut self.current) == Current::Attached {
            self.undone.clear();
        }
    }

    /// Discards the in-progress shape. It is not moved to the undone stack.
    pub fn cancel_in_progress(&mut self) -> Option<Shape> {
        let discarded = match std::mem::take(&mut self.current) {
            Current::None => None,
            Current::Attached => self.shapes.pop(),
            Current::Detached(shape) => Some(shape),
        };
        if let Some(shape) = &discarded {
            debug!("Discarded unfinished {} {}", shape.kind, shape.id);
        }
        discarded
    }

    /// Appends a shape as-is and invalidates redo.
    pub fn push_shape(&mut self, shape: Shape) {
        self.undone.clear();
        self.shapes.push(shape);
    }

    /// Moves the last listed shape, finished or not, to the undone stack.
    pub fn undo(&mut self) -> bool {
        self.current = Current::None;
        match self.shapes.pop() {
            Some(shape) => {
                debug!("Undo {} {}", shape.kind, shape.id);
                self.undone.push(shape);
                true
            }
            None => false,
        }
    }

    /// Moves the most recently undone shape back to the end of the list.
    ///
    /// An unfinished in-progress shape is discarded first so the restored
    /// shape lands where it was undone from.
    pub fn redo(&mut self) -> bool {
        if self.undone.is_empty() {
            return false;
        }
        self.cancel_in_progress();
        match self.undone.pop() {
            Some(shape) => {
                debug!("Redo {} {}", shape.kind, shape.id);
                self.shapes.push(shape);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.shapes.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// Removes every shape and all history.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.undone.clear();
        self.current = Current::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paintkit_core::{Algorithm, Color, Point};

    fn shape(kind: ShapeKind, x: f64) -> Shape {
        Shape::new(kind, Point::new(x, x), Color::BLACK, 2.0, Algorithm::Raster)
    }

    #[test]
    fn test_detached_shape_is_listed_on_completion() {
        let mut scene = SceneState::new();
        scene.begin_detached(shape(ShapeKind::Line, 0.0));
        assert!(scene.shapes().is_empty());
        assert!(scene.in_progress());

        let id = scene.complete_current().map(|s| s.id);
        assert_eq!(scene.shapes().len(), 1);
        assert_eq!(Some(scene.shapes()[0].id), id);
        assert!(scene.shapes()[0].completed);
        assert!(!scene.in_progress());
    }

    #[test]
    fn test_cancel_does_not_touch_history() {
        let mut scene = SceneState::new();
        scene.push_shape(shape(ShapeKind::Line, 0.0));
        scene.undo();

        scene.begin_attached(shape(ShapeKind::Polygon, 1.0));
        assert!(scene.can_redo());
        assert!(scene.cancel_in_progress().is_some());
        assert!(scene.shapes().is_empty());
        assert!(scene.can_redo());
    }

    #[test]
    fn test_committing_attached_shape_invalidates_redo() {
        let mut scene = SceneState::new();
        scene.push_shape(shape(ShapeKind::Line, 0.0));
        scene.undo();

        scene.begin_attached(shape(ShapeKind::Triangle, 1.0));
        scene.complete_current();
        assert!(!scene.can_redo());

        scene.undo();
        scene.begin_attached(shape(ShapeKind::Polygon, 2.0));
        scene.release_current();
        assert!(!scene.can_redo());
    }

    #[test]
    fn test_redo_replaces_unfinished_shape() {
        let mut scene = SceneState::new();
        scene.push_shape(shape(ShapeKind::Line, 0.0));
        let id = scene.shapes()[0].id;
        scene.undo();

        scene.begin_attached(shape(ShapeKind::BezierOpen, 1.0));
        assert!(scene.redo());
        assert!(!scene.in_progress());
        assert_eq!(scene.shapes().len(), 1);
        assert_eq!(scene.shapes()[0].id, id);
    }

    #[test]
    fn test_undo_pops_unfinished_shape() {
        let mut scene = SceneState::new();
        scene.begin_attached(shape(ShapeKind::Triangle, 0.0));
        assert!(scene.undo());
        assert!(!scene.in_progress());
        assert_eq!(scene.undone().len(), 1);

        assert!(scene.redo());
        assert!(scene.resume(ShapeKind::Triangle));
        assert!(!scene.resume(ShapeKind::BezierOpen));
    }

    #[test]
    fn test_new_shape_invalidates_redo() {
        let mut scene = SceneState::new();
        scene.push_shape(shape(ShapeKind::Line, 0.0));
        scene.undo();
        assert!(scene.can_redo());

        scene.begin_detached(shape(ShapeKind::Circle, 1.0));
        assert!(scene.can_redo());
        scene.complete_current();
        assert!(!scene.can_redo());
        assert!(!scene.redo());
    }

    #[test]
    fn test_clear_drops_history() {
        let mut scene = SceneState::new();
        scene.push_shape(shape(ShapeKind::Line, 0.0));
        scene.push_shape(shape(ShapeKind::Line, 1.0));
        scene.undo();
        scene.clear();
        assert!(!scene.can_undo());
        assert!(!scene.can_redo());
    }
}
