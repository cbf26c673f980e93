//! `data:` URLs carrying base64 images, the format the server exchanges
//! rasters in.

use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use base64::{engine::general_purpose, Engine as _};
use image::{DynamicImage, ImageFormat, RgbaImage};
use paintkit_core::ImageError;

const PNG_MIME: &str = "image/png";

/// A decoded `data:<mime>;base64,<payload>` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    mime: String,
    bytes: Vec<u8>,
}

impl DataUrl {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    /// PNG-encodes `image`.
    pub fn from_image(image: &RgbaImage) -> Result<Self, ImageError> {
        let mut bytes = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(image.clone())
            .write_to(&mut bytes, ImageFormat::Png)
            .map_err(|e| ImageError::EncodeFailed {
                reason: e.to_string(),
            })?;
        Ok(Self::new(PNG_MIME, bytes.into_inner()))
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }

    /// Decodes the payload into an RGBA raster.
    pub fn to_image(&self) -> Result<RgbaImage, ImageError> {
        image::load_from_memory(&self.bytes)
            .map(|img| img.to_rgba8())
            .map_err(|e| ImageError::DecodeFailed {
                reason: e.to_string(),
            })
    }
}

impl FromStr for DataUrl {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ImageError::InvalidDataUrl {
            reason: reason.to_string(),
        };

        let rest = s
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| invalid("missing 'data:' prefix"))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| invalid("missing ',' separator"))?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| invalid("only base64 payloads are supported"))?;

        let bytes = general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| ImageError::InvalidBase64 {
                reason: e.to_string(),
            })?;
        Ok(Self::new(mime, bytes))
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "data:{};base64,{}",
            self.mime,
            general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}
