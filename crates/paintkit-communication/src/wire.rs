//! Request and response bodies exchanged with the drawing server.

use paintkit_core::{Color, Point, RemoteError};
use paintkit_designer::{SceneEvent, Shape};
use serde::{Deserialize, Serialize};

use crate::data_url::DataUrl;

/// Number of bins per histogram channel.
pub const HISTOGRAM_BINS: usize = 256;

/// Operation requested from `/paint/api/draw/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawAction {
    Draw,
    Clear,
    Erase,
    Resize,
    Save,
}

/// A finished shape as the server draws it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapePayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub points: Vec<Point>,
    pub color: Color,
    pub line_width: f64,
}

impl From<&Shape> for ShapePayload {
    fn from(shape: &Shape) -> Self {
        Self {
            kind: shape.kind.name().to_string(),
            points: shape.points.clone(),
            color: shape.color,
            line_width: shape.stroke_width,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EraseData {
    /// One freehand-eraser sample; `size` is the eraser diameter.
    Free { point: Point, size: f64 },
    Area {
        start_point: Point,
        end_point: Point,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawRequest {
    pub action: DrawAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<ShapePayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub erase_data: Option<EraseData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl DrawRequest {
    fn bare(action: DrawAction) -> Self {
        Self {
            action,
            shape: None,
            erase_data: None,
            width: None,
            height: None,
            filename: None,
        }
    }

    pub fn draw(shape: &Shape) -> Self {
        Self {
            shape: Some(ShapePayload::from(shape)),
            ..Self::bare(DrawAction::Draw)
        }
    }

    pub fn erase(data: EraseData) -> Self {
        Self {
            erase_data: Some(data),
            ..Self::bare(DrawAction::Erase)
        }
    }

    pub fn clear() -> Self {
        Self::bare(DrawAction::Clear)
    }

    pub fn resize(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::bare(DrawAction::Resize)
        }
    }

    pub fn save(filename: impl Into<String>) -> Self {
        Self {
            filename: Some(filename.into()),
            ..Self::bare(DrawAction::Save)
        }
    }
}

/// Maps a controller edit onto the request that mirrors it on the server.
pub fn request_for_event(event: &SceneEvent) -> Option<DrawRequest> {
    let request = match event {
        SceneEvent::ShapeCompleted { shape } if shape.kind.is_erase() => return None,
        SceneEvent::ShapeCompleted { shape } => DrawRequest::draw(shape),
        SceneEvent::EraseStroke { point, size } => DrawRequest::erase(EraseData::Free {
            point: *point,
            size: *size,
        }),
        SceneEvent::EraseArea { start, end } => DrawRequest::erase(EraseData::Area {
            start_point: *start,
            end_point: *end,
        }),
        // Samples already went out one by one as `EraseStroke`.
        SceneEvent::EraseStrokeFinished { .. } => return None,
        SceneEvent::Cleared => DrawRequest::clear(),
    };
    Some(request)
}

/// One `free` erase per sample of a released eraser stroke, in stroke order.
pub fn erase_stroke_requests(points: &[Point], size: f64) -> Vec<DrawRequest> {
    points
        .iter()
        .map(|point| DrawRequest::erase(EraseData::Free { point: *point, size }))
        .collect()
}

/// Body returned by `/paint/api/draw/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DrawResponse {
    /// The server raster to show, if any.
    ///
    /// A `success: false` body becomes [`RemoteError::Rejected`].
    pub fn into_image(self) -> Result<Option<DataUrl>, RemoteError> {
        if !self.success {
            return Err(RemoteError::Rejected {
                message: self.error.unwrap_or_else(|| "unknown error".to_string()),
            });
        }
        self.image
            .map(|url| {
                url.parse::<DataUrl>()
                    .map_err(|e| RemoteError::MalformedResponse {
                        endpoint: crate::backend::DRAW_ENDPOINT.to_string(),
                        reason: e.to_string(),
                    })
            })
            .transpose()
    }
}

/// A filter to apply on `/process-image/`.
///
/// Filter names and parameters are passed through untouched; the server
/// owns their meaning (e.g. `binary` with `threshold`).
#[derive(Debug, Clone, PartialEq)]
pub struct FilterRequest {
    pub image: DataUrl,
    pub filter_type: String,
    pub params: Vec<(String, String)>,
}

impl FilterRequest {
    pub fn new(image: DataUrl, filter_type: impl Into<String>) -> Self {
        Self {
            image,
            filter_type: filter_type.into(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedImage {
    pub image: DataUrl,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProcessResponse {
    #[serde(default)]
    pub processed_image: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Per-channel pixel counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramData {
    pub luminance: Vec<u64>,
    pub red: Vec<u64>,
    pub green: Vec<u64>,
    pub blue: Vec<u64>,
}

impl HistogramData {
    /// Checks that every channel has exactly [`HISTOGRAM_BINS`] bins.
    pub fn validate(&self) -> Result<(), String> {
        for (name, channel) in [
            ("luminance", &self.luminance),
            ("red", &self.red),
            ("green", &self.green),
            ("blue", &self.blue),
        ] {
            if channel.len() != HISTOGRAM_BINS {
                return Err(format!(
                    "{} channel has {} bins, expected {}",
                    name,
                    channel.len(),
                    HISTOGRAM_BINS
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistogramResponse {
    #[serde(default)]
    pub histogram_data: Option<HistogramData>,
    #[serde(default)]
    pub error: Option<String>,
}
