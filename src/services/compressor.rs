use pixel_prep::{self as prep, PixelBuffer, QuantizeMode};
use std::sync::Arc;

use crate::codec::{CodecOptions, ImageCodec, RasterCodec};
use crate::error::{CompressionError, PathError, SessionError};
use crate::models::{CompressionRequest, CompressionResult, ImageFormat, StrategyPath};

/// PNG requests at or above this quality skip all pixel preprocessing
pub const PNG_PASSTHROUGH_QUALITY: f32 = 0.95;

/// Content-aware compression dispatcher.
///
/// Picks a strategy from the request's format, runs it against the codec, and
/// answers any failure of the PNG or JPEG path with a mutation-free re-encode
/// of the original bytes.
#[derive(Clone)]
pub struct Compressor {
    codec: Arc<dyn ImageCodec>,
}

impl Compressor {
    pub fn new(codec: Arc<dyn ImageCodec>) -> Self {
        Self { codec }
    }

    /// Compressor backed by the production [`RasterCodec`]
    pub fn with_raster_codec(options: CodecOptions) -> Self {
        Self::new(Arc::new(RasterCodec::new(options)))
    }

    /// Compress one image
    pub fn compress(
        &self,
        request: &CompressionRequest,
    ) -> Result<CompressionResult, CompressionError> {
        let quality = validate_quality(request.quality)?;
        let bytes = request.bytes.as_slice();
        let format = request.format;

        let outcome = match format {
            ImageFormat::Png => self.png_path(bytes, quality),
            ImageFormat::Jpeg => self.jpeg_path(bytes, quality),
            ImageFormat::WebP | ImageFormat::Other => self.pass_through(bytes, format, quality),
        };

        match outcome {
            Ok(result) => {
                tracing::debug!(
                    path = %result.path,
                    format = %result.format,
                    quality = result.quality,
                    size = result.bytes.len(),
                    "Compression finished"
                );
                Ok(result)
            }
            Err(e) => {
                tracing::warn!(%e, %format, "Compression path failed, using basic fallback");
                self.basic_fallback(bytes, format, quality)
                    .map_err(|source| CompressionError::FallbackExhausted { format, source })
            }
        }
    }

    /// Run [`compress`](Self::compress) on the blocking thread pool
    pub async fn compress_async(
        &self,
        request: CompressionRequest,
    ) -> Result<CompressionResult, SessionError> {
        let compressor = self.clone();
        tokio::task::spawn_blocking(move || compressor.compress(&request))
            .await
            .map_err(|e| SessionError::Task(e.to_string()))?
            .map_err(SessionError::from)
    }

    /// Alpha-aware quantization, then lossless PNG
    fn png_path(&self, bytes: &[u8], quality: f32) -> Result<CompressionResult, PathError> {
        let mut buffer = self.codec.decode(bytes)?;

        if quality >= PNG_PASSTHROUGH_QUALITY {
            tracing::debug!(quality, "PNG quality high enough, skipping quantization");
        } else {
            let mode = QuantizeMode::select(&buffer);
            if quality < prep::QUANTIZE_QUALITY_CEILING {
                prep::quantize_with(&mut buffer, mode, quality);
                tracing::debug!(?mode, factor = mode.factor(quality), "Quantized PNG");
            } else {
                tracing::debug!(?mode, quality, "PNG quality above quantization ceiling");
            }
        }

        self.finish(&buffer, ImageFormat::Png, quality, StrategyPath::Png)
    }

    /// Profile, optional smoothing, adaptive JPEG quality
    fn jpeg_path(&self, bytes: &[u8], quality: f32) -> Result<CompressionResult, PathError> {
        let mut buffer = self.codec.decode(bytes)?;

        let profile = prep::profile(&buffer)?;
        tracing::debug!(
            complexity = profile.complexity(),
            uniform_ratio = profile.uniform_ratio(),
            contrast_ratio = profile.contrast_ratio(),
            "Content profile"
        );

        if profile.has_high_frequency() && quality < prep::SMOOTH_QUALITY_CEILING {
            let changed = prep::smooth(&mut buffer)?;
            tracing::debug!(changed, "Smoothed uniform areas");
        }

        let effective = prep::adapt(quality, &profile);
        tracing::debug!(requested = quality, effective, "Adapted JPEG quality");

        self.finish(&buffer, ImageFormat::Jpeg, effective, StrategyPath::JpegAdaptive)
    }

    /// Re-encode at the original format and quality, no pixel changes
    fn pass_through(
        &self,
        bytes: &[u8],
        format: ImageFormat,
        quality: f32,
    ) -> Result<CompressionResult, PathError> {
        let buffer = self.codec.decode(bytes)?;
        self.finish(&buffer, format.encoded_as(), quality, StrategyPath::PassThrough)
    }

    /// Fresh decode of the source bytes, re-encoded without mutation
    fn basic_fallback(
        &self,
        bytes: &[u8],
        format: ImageFormat,
        quality: f32,
    ) -> Result<CompressionResult, PathError> {
        let buffer = self.codec.decode(bytes)?;
        self.finish(
            &buffer,
            format.encoded_as(),
            quality,
            StrategyPath::BasicFallback,
        )
    }

    fn finish(
        &self,
        buffer: &PixelBuffer,
        format: ImageFormat,
        quality: f32,
        path: StrategyPath,
    ) -> Result<CompressionResult, PathError> {
        let bytes = self.codec.encode(buffer, format, quality)?;
        Ok(CompressionResult {
            bytes,
            format,
            quality,
            path,
        })
    }
}

impl Default for Compressor {
    fn default() -> Self {
        Self::with_raster_codec(CodecOptions::default())
    }
}

fn validate_quality(quality: f32) -> Result<f32, CompressionError> {
    if (0.0..=1.0).contains(&quality) {
        Ok(quality)
    } else {
        Err(CompressionError::InvalidQuality(quality))
    }
}
