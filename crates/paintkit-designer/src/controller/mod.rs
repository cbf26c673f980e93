//! Interaction controller.
//!
//! Turns pointer and keyboard events into scene mutations and repaints the
//! surface after each one. Edits the remote collaborator should mirror are
//! queued as [`SceneEvent`]s and drained with
//! [`InteractionController::take_events`].

pub mod input;
pub mod keymap;

use paintkit_core::{Algorithm, Color, Point};
use paintkit_raster::Surface;
use paintkit_settings::{PaintConfig, ToolSwitchPolicy};
use tracing::{debug, warn};

use crate::events::SceneEvent;
use crate::model::{Shape, ShapeKind, ToolFamily};
use crate::render::{redraw, Preview, RenderSettings};
use crate::scene::SceneState;

pub use input::InputEvent;
pub use keymap::{action_for, KeyAction, KeyPress};

/// Pen and tool selection applied to new shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolState {
    pub tool: ShapeKind,
    pub color: Color,
    pub stroke_width: f64,
    pub algorithm: Algorithm,
}

impl ToolState {
    pub fn from_config(config: &PaintConfig) -> Self {
        Self {
            tool: ShapeKind::Freehand,
            color: config.tools.color,
            stroke_width: config.tools.stroke_width,
            algorithm: config.tools.algorithm,
        }
    }
}

pub struct InteractionController<S: Surface> {
    scene: SceneState,
    surface: S,
    tools: ToolState,
    render: RenderSettings,
    tool_switch: ToolSwitchPolicy,
    eraser_width_multiplier: f64,
    pointer_down: bool,
    hover: Option<Point>,
    events: Vec<SceneEvent>,
}

impl<S: Surface> InteractionController<S> {
    pub fn new(surface: S, config: &PaintConfig) -> Self {
        let mut controller = Self {
            scene: SceneState::new(),
            surface,
            tools: ToolState::from_config(config),
            render: RenderSettings::from_config(config),
            tool_switch: config.tools.tool_switch,
            eraser_width_multiplier: config.tools.eraser_width_multiplier,
            pointer_down: false,
            hover: None,
            events: Vec::new(),
        };
        controller.redraw();
        controller
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn render_settings(&self) -> &RenderSettings {
        &self.render
    }

    /// Replaces the scene, e.g. after loading a file, and repaints.
    pub fn replace_scene(&mut self, scene: SceneState) {
        self.scene = scene;
        self.pointer_down = false;
        self.redraw();
    }

    /// Dispatches one input event.
    pub fn handle(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerDown { at } => self.pointer_down(*at),
            InputEvent::PointerMove { at } => self.pointer_move(*at),
            InputEvent::PointerUp { at } => self.pointer_up(*at),
            InputEvent::DoubleClick { at } => self.double_click(*at),
            InputEvent::Key(press) => self.key(press),
            InputEvent::SelectTool { tool } => self.set_tool(*tool),
            InputEvent::SetColor { color } => self.set_color(*color),
            InputEvent::SetStrokeWidth { width } => self.set_stroke_width(*width),
            InputEvent::SetAlgorithm { algorithm } => self.set_algorithm(*algorithm),
            InputEvent::Undo => self.undo(),
            InputEvent::Redo => self.redo(),
            InputEvent::Cancel => self.cancel(),
            InputEvent::Clear => self.clear(),
        }
    }

    fn new_shape(&self, at: Point) -> Shape {
        let kind = self.tools.tool;
        let (color, width) = if kind.is_erase() {
            let width = if kind == ShapeKind::EraseFreehand {
                self.tools.stroke_width * self.eraser_width_multiplier
            } else {
                self.tools.stroke_width
            };
            (self.render.background, width)
        } else {
            (self.tools.color, self.tools.stroke_width)
        };
        Shape::new(kind, at, color, width, self.tools.algorithm)
    }

    pub fn pointer_down(&mut self, at: Point) {
        if !at.is_finite() {
            warn!("Ignoring pointer down at non-finite {:?}", at);
            return;
        }
        self.hover = Some(at);
        self.pointer_down = true;
        let kind = self.tools.tool;

        match kind.tool_family() {
            ToolFamily::Continuous => {
                // A stroke whose release never arrived is kept as drawn.
                let dangling = self
                    .scene
                    .current()
                    .is_some_and(|s| s.kind.tool_family() == ToolFamily::Continuous);
                if dangling {
                    self.finish_current();
                    self.pointer_down = true;
                } else {
                    self.scene.cancel_in_progress();
                }
                let shape = self.new_shape(at);
                if kind == ShapeKind::EraseFreehand {
                    self.events.push(SceneEvent::EraseStroke {
                        point: at,
                        size: shape.stroke_width,
                    });
                }
                self.scene.begin_attached(shape);
            }
            ToolFamily::Drag => {
                if self.scene.is_detached() {
                    self.scene.cancel_in_progress();
                }
                let shape = self.new_shape(at);
                self.scene.begin_detached(shape);
            }
            ToolFamily::FixedClick(_) | ToolFamily::OpenClick => {
                if self.scene.resume(kind) {
                    self.add_click_point(at);
                } else {
                    if self.scene.is_detached() {
                        self.scene.cancel_in_progress();
                    }
                    let shape = self.new_shape(at);
                    self.scene.begin_attached(shape);
                }
            }
        }
        self.redraw();
    }

    fn add_click_point(&mut self, at: Point) {
        let Some(shape) = self.scene.current_mut() else {
            return;
        };
        shape.push_point(at);
        if shape.has_all_points() {
            self.finish_current();
        }
    }

    fn finish_current(&mut self) {
        self.pointer_down = false;
        let Some(shape) = self.scene.complete_current() else {
            return;
        };
        let event = match shape.kind {
            ShapeKind::EraseFreehand => Some(SceneEvent::EraseStrokeFinished {
                points: shape.points.clone(),
                size: shape.stroke_width,
            }),
            ShapeKind::EraseArea => match shape.points.as_slice() {
                [start, .., end] => Some(SceneEvent::EraseArea {
                    start: *start,
                    end: *end,
                }),
                _ => None,
            },
            _ => Some(SceneEvent::ShapeCompleted {
                shape: shape.clone(),
            }),
        };
        if let Some(event) = event {
            self.events.push(event);
        }
    }

    pub fn pointer_move(&mut self, at: Point) {
        if !at.is_finite() {
            return;
        }
        self.hover = Some(at);
        let in_progress = self.scene.in_progress();
        if self.pointer_down && in_progress {
            let kind = self.tools.tool;
            match kind.tool_family() {
                ToolFamily::Continuous => {
                    if let Some(shape) = self.scene.current_mut() {
                        shape.push_point(at);
                        if kind == ShapeKind::EraseFreehand {
                            let size = shape.stroke_width;
                            self.events.push(SceneEvent::EraseStroke { point: at, size });
                        }
                    }
                }
                ToolFamily::Drag => {
                    if let Some(shape) = self.scene.current_mut() {
                        shape.set_last_point(at);
                    }
                }
                ToolFamily::FixedClick(_) | ToolFamily::OpenClick => {}
            }
        }
        if in_progress {
            self.redraw();
        }
    }

    pub fn pointer_up(&mut self, at: Point) {
        if !self.pointer_down {
            return;
        }
        self.pointer_down = false;
        if !self.scene.in_progress() {
            return;
        }
        match self.tools.tool.tool_family() {
            ToolFamily::Continuous => self.finish_current(),
            ToolFamily::Drag => {
                if let Some(shape) = self.scene.current_mut() {
                    if at.is_finite() {
                        shape.set_last_point(at);
                    } else if shape.points.len() == 1 {
                        let first = shape.points[0];
                        shape.push_point(first);
                    }
                }
                self.finish_current();
            }
            // Click tools advance on pointer down only.
            ToolFamily::FixedClick(_) | ToolFamily::OpenClick => {}
        }
        self.redraw();
    }

    /// Finishes an open-ended polygon without adding a point.
    pub fn double_click(&mut self, _at: Point) {
        if self.tools.tool.tool_family() != ToolFamily::OpenClick {
            return;
        }
        let kind = self.tools.tool;
        if !self.scene.resume(kind) {
            return;
        }
        let ready = self.scene.current().is_some_and(Shape::can_finalize);
        if ready {
            self.finish_current();
        } else {
            debug!("Polygon needs at least {} points", kind.min_points());
            self.scene.cancel_in_progress();
            self.pointer_down = false;
        }
        self.redraw();
    }

    pub fn key(&mut self, press: &KeyPress) {
        match action_for(press) {
            Some(KeyAction::Undo) => self.undo(),
            Some(KeyAction::Redo) => self.redo(),
            Some(KeyAction::Cancel) => self.cancel(),
            Some(KeyAction::Clear) => self.clear(),
            Some(KeyAction::SelectTool(kind)) => self.set_tool(kind),
            None => {}
        }
    }

    pub fn set_tool(&mut self, tool: ShapeKind) {
        if tool == self.tools.tool {
            return;
        }
        debug!("Tool {} -> {}", self.tools.tool, tool);
        match self.tool_switch {
            ToolSwitchPolicy::CancelInProgress => {
                self.scene.cancel_in_progress();
            }
            ToolSwitchPolicy::KeepInProgress => {
                if self.scene.is_detached() {
                    self.scene.cancel_in_progress();
                } else {
                    self.scene.release_current();
                }
            }
        }
        self.tools.tool = tool;
        self.pointer_down = false;
        self.redraw();
    }

    pub fn set_color(&mut self, color: Color) {
        self.tools.color = color;
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.tools.stroke_width = width;
        } else {
            warn!("Ignoring stroke width {}", width);
        }
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.tools.algorithm = algorithm;
    }

    pub fn undo(&mut self) {
        self.pointer_down = false;
        if self.scene.is_detached() {
            self.scene.cancel_in_progress();
        }
        if self.scene.undo() {
            self.redraw();
        }
    }

    pub fn redo(&mut self) {
        self.pointer_down = false;
        if self.scene.is_detached() {
            self.scene.cancel_in_progress();
        }
        if self.scene.redo() {
            self.redraw();
        }
    }

    /// Discards the in-progress shape.
    pub fn cancel(&mut self) {
        self.pointer_down = false;
        if self.scene.cancel_in_progress().is_some() {
            self.redraw();
        }
    }

    pub fn clear(&mut self) {
        self.pointer_down = false;
        self.scene.clear();
        self.events.push(SceneEvent::Cleared);
        self.redraw();
    }

    /// Repaints the whole scene.
    pub fn redraw(&mut self) {
        let preview = Preview {
            hover: self.hover,
            marker_color: Some(self.tools.color),
        };
        redraw(&self.scene, &preview, &mut self.surface, &self.render);
    }

    /// Drains the queued edits.
    pub fn take_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }
}
