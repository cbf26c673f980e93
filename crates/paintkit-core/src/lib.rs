//! # PaintKit Core
//!
//! Core types shared by every PaintKit crate: surface-space geometry,
//! colors, rendering algorithm selectors and the unified error type.

pub mod error;
pub mod types;

pub use error::{Error, ImageError, RemoteError, Result};
pub use types::{round_half_up, Algorithm, CircleAlgorithm, Color, LineAlgorithm, PixelPoint, Point};
