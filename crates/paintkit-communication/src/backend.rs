//! The drawing and image-processing server as an async collaborator.

use std::time::Duration;

use async_trait::async_trait;
use paintkit_core::RemoteError;
use paintkit_settings::RemoteSettings;
use reqwest::multipart::Form;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::data_url::DataUrl;
use crate::wire::{
    DrawRequest, DrawResponse, FilterRequest, HistogramData, HistogramResponse, ProcessResponse,
    ProcessedImage,
};

pub const DRAW_ENDPOINT: &str = "/paint/api/draw/";
pub const PROCESS_IMAGE_ENDPOINT: &str = "/process-image/";
pub const HISTOGRAM_ENDPOINT: &str = "/generate-histogram/";

const CSRF_HEADER: &str = "X-CSRFToken";

/// Server-side collaborator.
///
/// Implementations never retry; every failure is reported once.
#[async_trait]
pub trait DrawingBackend: Send + Sync {
    /// Mirrors one scene edit. A `success: false` body is returned as-is.
    async fn draw(&self, request: &DrawRequest) -> Result<DrawResponse, RemoteError>;

    async fn process_image(&self, request: &FilterRequest) -> Result<ProcessedImage, RemoteError>;

    async fn generate_histogram(&self, image: &DataUrl) -> Result<HistogramData, RemoteError>;
}

/// [`DrawingBackend`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpDrawingBackend {
    client: Client,
    base_url: String,
    timeout_ms: u64,
    csrf_token: Option<String>,
}

impl HttpDrawingBackend {
    pub fn new(settings: &RemoteSettings) -> Result<Self, RemoteError> {
        if !settings.enabled {
            return Err(RemoteError::Disabled);
        }
        let client = Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .user_agent(concat!("paintkit/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RemoteError::RequestFailed {
                endpoint: String::new(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            timeout_ms: settings.timeout_ms,
            csrf_token: settings.csrf_token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn transport_error(&self, endpoint: &str, err: reqwest::Error) -> RemoteError {
        if err.is_timeout() {
            RemoteError::Timeout {
                endpoint: endpoint.to_string(),
                timeout_ms: self.timeout_ms,
            }
        } else {
            RemoteError::RequestFailed {
                endpoint: endpoint.to_string(),
                reason: err.to_string(),
            }
        }
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        response: Response,
    ) -> Result<T, RemoteError> {
        let status = response.status();
        if !status.is_success() {
            warn!("{} answered HTTP {}", endpoint, status.as_u16());
            return Err(RemoteError::HttpStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| RemoteError::MalformedResponse {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            })
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        form: Form,
    ) -> Result<T, RemoteError> {
        let mut request = self.client.post(self.url(endpoint)).multipart(form);
        if let Some(token) = &self.csrf_token {
            request = request.header(CSRF_HEADER, token.as_str());
        }
        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(endpoint, e))?;
        self.read_json(endpoint, response).await
    }
}

fn malformed(endpoint: &str, reason: impl ToString) -> RemoteError {
    RemoteError::MalformedResponse {
        endpoint: endpoint.to_string(),
        reason: reason.to_string(),
    }
}

#[async_trait]
impl DrawingBackend for HttpDrawingBackend {
    async fn draw(&self, request: &DrawRequest) -> Result<DrawResponse, RemoteError> {
        debug!("POST {} action={:?}", DRAW_ENDPOINT, request.action);
        let mut builder = self.client.post(self.url(DRAW_ENDPOINT)).json(request);
        if let Some(token) = &self.csrf_token {
            builder = builder.header(CSRF_HEADER, token.as_str());
        }
        let response = builder
            .send()
            .await
            .map_err(|e| self.transport_error(DRAW_ENDPOINT, e))?;
        self.read_json(DRAW_ENDPOINT, response).await
    }

    async fn process_image(&self, request: &FilterRequest) -> Result<ProcessedImage, RemoteError> {
        debug!("POST {} filter={}", PROCESS_IMAGE_ENDPOINT, request.filter_type);
        let mut form = Form::new()
            .text("image_data", request.image.to_string())
            .text("filter_type", request.filter_type.clone());
        for (key, value) in &request.params {
            form = form.text(key.clone(), value.clone());
        }

        let body: ProcessResponse = self.post_form(PROCESS_IMAGE_ENDPOINT, form).await?;
        if let Some(message) = body.error {
            return Err(RemoteError::Rejected { message });
        }
        let url = body
            .processed_image
            .ok_or_else(|| malformed(PROCESS_IMAGE_ENDPOINT, "missing processed_image"))?;
        let image = url
            .parse::<DataUrl>()
            .map_err(|e| malformed(PROCESS_IMAGE_ENDPOINT, e))?;
        Ok(ProcessedImage { image })
    }

    async fn generate_histogram(&self, image: &DataUrl) -> Result<HistogramData, RemoteError> {
        debug!("POST {}", HISTOGRAM_ENDPOINT);
        let form = Form::new().text("image_data", image.to_string());

        let body: HistogramResponse = self.post_form(HISTOGRAM_ENDPOINT, form).await?;
        if let Some(message) = body.error {
            return Err(RemoteError::Rejected { message });
        }
        let data = body
            .histogram_data
            .ok_or_else(|| malformed(HISTOGRAM_ENDPOINT, "missing histogram_data"))?;
        data.validate()
            .map_err(|reason| malformed(HISTOGRAM_ENDPOINT, reason))?;
        Ok(data)
    }
}
