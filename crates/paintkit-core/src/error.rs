//! Error handling for PaintKit
//!
//! Provides the error types shared by every layer of the workspace:
//! - Remote errors (the server-side drawing and filter collaborator)
//! - Image errors (data URLs, file selection, decoding)
//! - Scene file errors (saving and loading drawings)
//!
//! Geometry never produces an error: degenerate input is rendered as a
//! minimal primitive instead. All error types use `thiserror`.

use thiserror::Error;

/// Remote collaborator error type
///
/// Represents failures talking to the image-processing server, either at the
/// transport level or as an explicit error reported in the response body.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RemoteError {
    /// Remote sync is disabled in the configuration
    #[error("Remote drawing backend is disabled")]
    Disabled,

    /// The request could not be delivered
    #[error("Request to {endpoint} failed: {reason}")]
    RequestFailed {
        /// The endpoint path that was called.
        endpoint: String,
        /// The transport-level reason.
        reason: String,
    },

    /// The request timed out
    #[error("Request to {endpoint} timed out after {timeout_ms}ms")]
    Timeout {
        /// The endpoint path that was called.
        endpoint: String,
        /// The timeout duration in milliseconds.
        timeout_ms: u64,
    },

    /// The server answered with a non-success HTTP status
    #[error("Server returned HTTP {status} for {endpoint}")]
    HttpStatus {
        /// The endpoint path that was called.
        endpoint: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The server reported a failure in the response body
    #[error("Server rejected request: {message}")]
    Rejected {
        /// The error message sent by the server.
        message: String,
    },

    /// The response body did not have the expected shape
    #[error("Malformed response from {endpoint}: {reason}")]
    MalformedResponse {
        /// The endpoint path that was called.
        endpoint: String,
        /// What was wrong with the body.
        reason: String,
    },
}

/// Image error type
///
/// Covers data URL parsing, image decoding and invalid file selection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImageError {
    /// The string is not a `data:` URL
    #[error("Not a data URL: {reason}")]
    InvalidDataUrl {
        /// Why the URL was rejected.
        reason: String,
    },

    /// The data URL payload is not valid base64
    #[error("Invalid base64 payload: {reason}")]
    InvalidBase64 {
        /// The decoder message.
        reason: String,
    },

    /// The bytes could not be decoded as an image
    #[error("Failed to decode image: {reason}")]
    DecodeFailed {
        /// The decoder message.
        reason: String,
    },

    /// The image could not be encoded
    #[error("Failed to encode image: {reason}")]
    EncodeFailed {
        /// The encoder message.
        reason: String,
    },

    /// A selected file is not an image
    #[error("File {path} is not a supported image")]
    NotAnImage {
        /// The rejected file path.
        path: String,
    },
}

/// Main error type for PaintKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Remote collaborator error
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// Image error
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unsupported scene file version
    #[error("Unsupported scene file version {found} (expected {expected})")]
    SceneVersion {
        /// The version found in the file.
        found: u32,
        /// The version this build writes.
        expected: u32,
    },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a remote collaborator error
    pub fn is_remote_error(&self) -> bool {
        matches!(self, Error::Remote(_))
    }

    /// Check if this is an image error
    pub fn is_image_error(&self) -> bool {
        matches!(self, Error::Image(_))
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Remote(RemoteError::Timeout { .. }))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_display() {
        let err = RemoteError::Rejected {
            message: "bad shape".to_string(),
        };
        assert_eq!(err.to_string(), "Server rejected request: bad shape");

        let err = RemoteError::HttpStatus {
            endpoint: "/paint/api/draw/".to_string(),
            status: 500,
        };
        assert_eq!(err.to_string(), "Server returned HTTP 500 for /paint/api/draw/");
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = RemoteError::Timeout {
            endpoint: "/process-image/".to_string(),
            timeout_ms: 100,
        }
        .into();
        assert!(err.is_remote_error());
        assert!(err.is_timeout());

        let err: Error = ImageError::NotAnImage {
            path: "notes.txt".to_string(),
        }
        .into();
        assert!(err.is_image_error());
        assert_eq!(err.to_string(), "File notes.txt is not a supported image");
    }
}
