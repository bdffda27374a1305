//! Decode/encode capability used by the compression strategies.
//!
//! The strategies only ever talk to an [`ImageCodec`]: they hand it source
//! bytes to get a [`PixelBuffer`], and a (possibly modified) buffer plus a
//! format and quality to get encoded bytes back. [`RasterCodec`] is the
//! production implementation.

mod raster;

use pixel_prep::PixelBuffer;
use serde::Deserialize;

use crate::error::{DecodeError, EncodeError};
use crate::models::ImageFormat;

pub use raster::RasterCodec;

/// External image codec capability
pub trait ImageCodec: Send + Sync {
    /// Decode source bytes into an RGBA8 buffer
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer, DecodeError>;

    /// Encode a buffer in `format` at `quality` (0.0 to 1.0).
    ///
    /// Lossless formats may ignore `quality`.
    fn encode(
        &self,
        buffer: &PixelBuffer,
        format: ImageFormat,
        quality: f32,
    ) -> Result<Vec<u8>, EncodeError>;
}

/// Deflate effort for the initial PNG write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PngCompression {
    Fast,
    #[default]
    Default,
    Best,
}

impl From<PngCompression> for png::Compression {
    fn from(level: PngCompression) -> Self {
        match level {
            PngCompression::Fast => png::Compression::Fast,
            PngCompression::Default => png::Compression::Default,
            PngCompression::Best => png::Compression::Best,
        }
    }
}

/// Settings for [`RasterCodec`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    pub png_compression: PngCompression,
    /// Re-compress PNG output with oxipng, keeping the smaller result
    pub optimize_png: bool,
    /// oxipng preset, 0..=6
    pub optimize_level: u8,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            png_compression: PngCompression::Default,
            optimize_png: true,
            optimize_level: 2,
        }
    }
}
