//! # PaintKit Designer
//!
//! Shape model, scene state with undo/redo, the interaction controller that
//! turns pointer and keyboard input into shapes, and the redraw driver that
//! paints a scene onto a [`paintkit_raster::Surface`].

pub mod controller;
pub mod events;
pub mod model;
pub mod render;
pub mod scene;
pub mod scene_file;

pub use controller::{action_for, InputEvent, InteractionController, KeyAction, KeyPress, ToolState};
pub use events::SceneEvent;
pub use model::{Shape, ShapeKind, ToolFamily};
pub use render::{redraw, render_shape, Preview, RenderSettings};
pub use scene::SceneState;
pub use scene_file::{CanvasState, SceneFile, SceneMetadata, SCENE_FORMAT_VERSION};
