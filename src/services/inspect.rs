use pixel_prep::{self as prep, QuantizeMode};
use serde::Serialize;

use crate::codec::ImageCodec;
use crate::error::PathError;
use crate::models::ImageFormat;

/// What the analysis stage sees in an image, without encoding anything
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentReport {
    pub format: ImageFormat,
    pub width: usize,
    pub height: usize,
    pub has_alpha: bool,
    pub complexity: f32,
    pub uniform_ratio: f32,
    pub contrast_ratio: f32,
    pub has_uniform_areas: bool,
    pub has_high_frequency: bool,
    pub requested_quality: f32,
    /// Quality the JPEG path would encode at
    pub effective_quality: f32,
    /// Whether the JPEG path would smooth this image
    pub would_smooth: bool,
    /// Quantizer variant the PNG path would pick
    pub quantize_mode: &'static str,
}

/// Decode `bytes` and report its content profile
pub fn inspect(
    codec: &dyn ImageCodec,
    bytes: &[u8],
    format: ImageFormat,
    quality: f32,
) -> Result<ContentReport, PathError> {
    let buffer = codec.decode(bytes)?;
    let profile = prep::profile(&buffer)?;

    Ok(ContentReport {
        format,
        width: buffer.width(),
        height: buffer.height(),
        has_alpha: prep::has_alpha_channel(&buffer),
        complexity: profile.complexity(),
        uniform_ratio: profile.uniform_ratio(),
        contrast_ratio: profile.contrast_ratio(),
        has_uniform_areas: profile.has_uniform_areas(),
        has_high_frequency: profile.has_high_frequency(),
        requested_quality: quality,
        effective_quality: prep::adapt(quality, &profile),
        would_smooth: profile.has_high_frequency() && quality < prep::SMOOTH_QUALITY_CEILING,
        quantize_mode: QuantizeMode::select(&buffer).name(),
    })
}
