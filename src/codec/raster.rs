use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};
use pixel_prep::PixelBuffer;
use std::io::Cursor;

use super::{CodecOptions, ImageCodec};
use crate::error::{DecodeError, EncodeError};
use crate::models::ImageFormat;

/// Codec backed by the `image`, `png`, `oxipng` and `webp` crates.
///
/// - Decoding sniffs the container and always yields RGBA8.
/// - PNG is written as 8-bit RGBA, then optionally re-compressed losslessly
///   with oxipng (alpha-channel colour data is never touched).
/// - JPEG is written at `round(quality * 100)`; alpha is dropped.
/// - WebP is written lossy through libwebp at `round(quality * 100)`.
/// - `Other` is written as PNG.
#[derive(Debug, Clone, Default)]
pub struct RasterCodec {
    options: CodecOptions,
}

impl RasterCodec {
    pub fn new(options: CodecOptions) -> Self {
        Self { options }
    }

    fn encode_png(&self, buffer: &PixelBuffer) -> Result<Vec<u8>, EncodeError> {
        let (width, height) = dimensions(buffer)?;
        let codec_err = |e: png::EncodingError| EncodeError::Codec {
            format: ImageFormat::Png,
            message: e.to_string(),
        };

        let mut buf = Cursor::new(Vec::new());
        {
            let mut encoder = png::Encoder::new(&mut buf, width, height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_compression(self.options.png_compression.into());
            encoder.set_adaptive_filter(png::AdaptiveFilterType::Adaptive);
            let mut writer = encoder.write_header().map_err(codec_err)?;
            writer
                .write_image_data(buffer.as_bytes())
                .map_err(codec_err)?;
            writer.finish().map_err(codec_err)?;
        }
        let png_bytes = buf.into_inner();

        if !self.options.optimize_png {
            return Ok(png_bytes);
        }

        // Lossless re-compression (filter search + reductions)
        let options = oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..oxipng::Options::from_preset(self.options.optimize_level)
        };
        match oxipng::optimize_from_memory(&png_bytes, &options) {
            Ok(optimized) if optimized.len() < png_bytes.len() => {
                tracing::debug!(
                    before = png_bytes.len(),
                    after = optimized.len(),
                    "oxipng reduced PNG"
                );
                Ok(optimized)
            }
            Ok(_) => Ok(png_bytes),
            Err(e) => {
                tracing::debug!(%e, "oxipng failed, keeping unoptimized PNG");
                Ok(png_bytes)
            }
        }
    }

    fn encode_jpeg(&self, buffer: &PixelBuffer, quality: f32) -> Result<Vec<u8>, EncodeError> {
        let (width, height) = dimensions(buffer)?;
        let rgb: Vec<u8> = buffer
            .as_bytes()
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();

        let mut out = Vec::new();
        JpegEncoder::new_with_quality(&mut out, lossy_quality(quality))
            .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
            .map_err(|e| EncodeError::Codec {
                format: ImageFormat::Jpeg,
                message: e.to_string(),
            })?;
        Ok(out)
    }

    fn encode_webp(&self, buffer: &PixelBuffer, quality: f32) -> Result<Vec<u8>, EncodeError> {
        let (width, height) = dimensions(buffer)?;
        let codec_err = |message: String| EncodeError::Codec {
            format: ImageFormat::WebP,
            message,
        };

        let mut config =
            webp::WebPConfig::new().map_err(|_| codec_err("Failed to create WebP config".into()))?;
        config.lossless = 0;
        config.quality = f32::from(lossy_quality(quality));

        let encoded = webp::Encoder::from_rgba(buffer.as_bytes(), width, height)
            .encode_advanced(&config)
            .map_err(|e| codec_err(format!("{e:?}")))?;
        Ok(encoded.to_vec())
    }
}

impl ImageCodec for RasterCodec {
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
        let image =
            image::load_from_memory(bytes).map_err(|e| DecodeError::Malformed(e.to_string()))?;
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(PixelBuffer::new(
            rgba.into_raw(),
            width as usize,
            height as usize,
        )?)
    }

    fn encode(
        &self,
        buffer: &PixelBuffer,
        format: ImageFormat,
        quality: f32,
    ) -> Result<Vec<u8>, EncodeError> {
        match format.encoded_as() {
            ImageFormat::Jpeg => self.encode_jpeg(buffer, quality),
            ImageFormat::WebP => self.encode_webp(buffer, quality),
            _ => self.encode_png(buffer),
        }
    }
}

/// Map 0.0..=1.0 to the lossy encoders' 1..=100 scale
fn lossy_quality(quality: f32) -> u8 {
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

fn dimensions(buffer: &PixelBuffer) -> Result<(u32, u32), EncodeError> {
    let unsupported = || EncodeError::UnsupportedDimensions {
        width: buffer.width(),
        height: buffer.height(),
    };
    if buffer.is_empty() {
        return Err(unsupported());
    }
    let width = u32::try_from(buffer.width()).map_err(|_| unsupported())?;
    let height = u32::try_from(buffer.height()).map_err(|_| unsupported())?;
    Ok((width, height))
}
