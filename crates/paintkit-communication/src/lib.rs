//! # PaintKit Communication
//!
//! Talks to the server that keeps an authoritative raster of the drawing and
//! applies image filters. Provides the wire types, `data:` URL handling and
//! an async [`DrawingBackend`] with an HTTP implementation.

pub mod backend;
pub mod data_url;
pub mod wire;

pub use backend::{
    DrawingBackend, HttpDrawingBackend, DRAW_ENDPOINT, HISTOGRAM_ENDPOINT, PROCESS_IMAGE_ENDPOINT,
};
pub use data_url::DataUrl;
pub use wire::{
    erase_stroke_requests, request_for_event, DrawAction, DrawRequest, DrawResponse, EraseData,
    FilterRequest, HistogramData, ProcessedImage, ShapePayload, HISTOGRAM_BINS,
};
