//! A drawing session: the interaction controller plus server sync.
//!
//! Input is applied to the scene synchronously. Edits the server should
//! mirror are posted from spawned tasks, and their outcomes come back over a
//! channel drained by [`PaintSession::poll_responses`]. A returned raster
//! replaces the whole surface; a failure leaves a [`Notice`] and repaints
//! the scene locally. Outcomes are applied in arrival order and never touch
//! the shape list, so a late response may overwrite newer local strokes
//! until the next redraw.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use paintkit_communication::{
    erase_stroke_requests, request_for_event, DataUrl, DrawAction, DrawRequest, DrawResponse,
    DrawingBackend, FilterRequest, HistogramData, HttpDrawingBackend, ProcessedImage,
};
use paintkit_core::{Error, ImageError, RemoteError, Result};
use paintkit_designer::{
    CanvasState, InputEvent, InteractionController, SceneEvent, SceneFile,
};
use paintkit_raster::Surface;
use paintkit_settings::{CanvasSettings, EraseMode, PaintConfig};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Something the user should be told about.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// The server could not mirror an edit; the local drawing is shown.
    RemoteFailed {
        action: DrawAction,
        error: RemoteError,
    },
    /// The server returned a raster that could not be decoded.
    BadImage {
        action: DrawAction,
        error: ImageError,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::RemoteFailed { action, error } => {
                write!(f, "Server {:?} failed: {}", action, error)
            }
            Notice::BadImage { action, error } => {
                write!(f, "Server {:?} returned an unusable image: {}", action, error)
            }
        }
    }
}

struct RemoteOutcome {
    action: DrawAction,
    result: std::result::Result<Option<DataUrl>, RemoteError>,
}

pub struct PaintSession<S: Surface> {
    controller: InteractionController<S>,
    canvas: CanvasSettings,
    backend: Option<Arc<dyn DrawingBackend>>,
    erase_mode: EraseMode,
    tx: mpsc::UnboundedSender<RemoteOutcome>,
    rx: mpsc::UnboundedReceiver<RemoteOutcome>,
    in_flight: usize,
    notices: Vec<Notice>,
}

impl<S: Surface> PaintSession<S> {
    /// A local-only session.
    pub fn new(surface: S, config: &PaintConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            controller: InteractionController::new(surface, config),
            canvas: config.canvas.clone(),
            backend: None,
            erase_mode: config.remote.erase_mode,
            tx,
            rx,
            in_flight: 0,
            notices: Vec::new(),
        }
    }

    /// A session mirroring edits to `backend`.
    pub fn with_backend(surface: S, config: &PaintConfig, backend: Arc<dyn DrawingBackend>) -> Self {
        let mut session = Self::new(surface, config);
        session.backend = Some(backend);
        session
    }

    /// A session using the HTTP backend when remote sync is enabled.
    pub fn from_config(surface: S, config: &PaintConfig) -> Result<Self> {
        if !config.remote.enabled {
            return Ok(Self::new(surface, config));
        }
        let backend = HttpDrawingBackend::new(&config.remote)?;
        info!("Mirroring edits to {}", backend.base_url());
        Ok(Self::with_backend(surface, config, Arc::new(backend)))
    }

    pub fn controller(&self) -> &InteractionController<S> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut InteractionController<S> {
        &mut self.controller
    }

    pub fn surface(&self) -> &S {
        self.controller.surface()
    }

    pub fn into_surface(self) -> S {
        self.controller.into_surface()
    }

    pub fn is_remote(&self) -> bool {
        self.backend.is_some()
    }

    /// Requests posted whose outcome has not been applied yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Applies one input event, then posts the edits it produced.
    pub fn handle(&mut self, event: &InputEvent) {
        self.controller.handle(event);
        self.dispatch_events();
    }

    fn dispatch_events(&mut self) {
        let events = self.controller.take_events();
        if self.backend.is_none() {
            return;
        }

        for event in &events {
            let requests = match (event, self.erase_mode) {
                (SceneEvent::EraseStroke { .. }, EraseMode::Local) => continue,
                // The server must see the erase before any later draw answers
                // with its raster, so the stroke goes out once released.
                (SceneEvent::EraseStrokeFinished { points, size }, EraseMode::Local) => {
                    erase_stroke_requests(points, *size)
                }
                _ => request_for_event(event).into_iter().collect(),
            };
            if !requests.is_empty() {
                self.post(requests);
            }
        }
    }

    /// Sends `requests` in order from one task on the current Tokio runtime.
    ///
    /// The batch stops at its first failure; otherwise the last raster the
    /// server returned is applied.
    fn post(&mut self, requests: Vec<DrawRequest>) {
        let Some(backend) = self.backend.clone() else {
            return;
        };
        let Some(action) = requests.first().map(|r| r.action) else {
            return;
        };
        let Ok(runtime) = Handle::try_current() else {
            warn!("No async runtime, {:?} not sent to server", action);
            self.fail(
                action,
                RemoteError::RequestFailed {
                    endpoint: paintkit_communication::DRAW_ENDPOINT.to_string(),
                    reason: "no async runtime".to_string(),
                },
            );
            return;
        };

        debug!("Posting {:?} x{}", action, requests.len());
        let tx = self.tx.clone();
        self.in_flight += 1;
        runtime.spawn(async move {
            let mut result = Ok(None);
            for request in &requests {
                match backend.draw(request).await.and_then(DrawResponse::into_image) {
                    Ok(Some(image)) => result = Ok(Some(image)),
                    Ok(None) => {}
                    Err(error) => {
                        result = Err(error);
                        break;
                    }
                }
            }
            // The receiver only goes away with the session.
            let _ = tx.send(RemoteOutcome { action, result });
        });
    }

    /// Applies every outcome that has arrived. Returns how many were applied.
    pub fn poll_responses(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(outcome) = self.rx.try_recv() {
            self.apply(outcome);
            applied += 1;
        }
        applied
    }

    /// Waits for every posted request and applies the outcomes.
    pub async fn wait_for_responses(&mut self) {
        while self.in_flight > 0 {
            match self.rx.recv().await {
                Some(outcome) => self.apply(outcome),
                None => break,
            }
        }
    }

    fn apply(&mut self, outcome: RemoteOutcome) {
        self.in_flight = self.in_flight.saturating_sub(1);
        let action = outcome.action;
        match outcome.result {
            Ok(Some(url)) => match url.to_image() {
                Ok(image) => {
                    debug!("Applying {}x{} server raster", image.width(), image.height());
                    self.controller.surface_mut().draw_image(&image);
                }
                Err(error) => {
                    warn!("Unusable server raster for {:?}: {}", action, error);
                    self.notices.push(Notice::BadImage { action, error });
                    self.controller.redraw();
                }
            },
            Ok(None) => {}
            Err(error) => self.fail(action, error),
        }
    }

    fn fail(&mut self, action: DrawAction, error: RemoteError) {
        warn!("Server {:?} failed: {}", action, error);
        self.notices.push(Notice::RemoteFailed { action, error });
        self.controller.redraw();
    }

    fn backend(&self) -> Result<&Arc<dyn DrawingBackend>> {
        self.backend.as_ref().ok_or(Error::Remote(RemoteError::Disabled))
    }

    pub async fn process_image(&self, request: &FilterRequest) -> Result<ProcessedImage> {
        Ok(self.backend()?.process_image(request).await?)
    }

    pub async fn generate_histogram(&self, image: &DataUrl) -> Result<HistogramData> {
        Ok(self.backend()?.generate_histogram(image).await?)
    }

    /// Writes the finished shapes to a scene file.
    pub fn save_scene(&self, path: impl AsRef<Path>, name: &str) -> anyhow::Result<()> {
        SceneFile::from_scene(name, CanvasState::from(&self.canvas), self.controller.scene())
            .save_to_file(path)
    }

    /// Replaces the scene with the shapes stored in a scene file.
    pub fn load_scene(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let file = SceneFile::load_from_file(path)?;
        self.controller.replace_scene(file.to_scene());
        Ok(())
    }
}

/// Reads an image file for the filter server.
///
/// Files that are not a decodable image are rejected before anything is
/// sent.
pub fn load_image_for_processing(path: impl AsRef<Path>) -> Result<DataUrl> {
    let path = path.as_ref();
    let not_an_image = || {
        Error::from(ImageError::NotAnImage {
            path: path.display().to_string(),
        })
    };

    let bytes = std::fs::read(path)?;
    let format = image::guess_format(&bytes).map_err(|_| not_an_image())?;
    image::load_from_memory_with_format(&bytes, format).map_err(|_| not_an_image())?;

    Ok(DataUrl::new(format.to_mime_type(), bytes))
}
