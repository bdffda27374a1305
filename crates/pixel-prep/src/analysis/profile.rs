//! Whole-image content statistics.
//!
//! [`profile`] walks a strided sample of the buffer and summarises how much
//! local variation it contains. The result drives both the smoothing decision
//! and the adaptive encoder quality.

use super::gradient::{gradient_unchecked, uniform_unchecked};
use crate::buffer::{PixelBuffer, CHANNELS};
use crate::error::PrepError;

/// Upper bound on the number of pixels visited by [`profile`].
pub const MAX_SAMPLES: usize = 10_000;

/// Gradient above which a sampled pixel counts as high contrast.
pub const HIGH_CONTRAST_GRADIENT: f32 = 30.0;

/// `uniform_ratio` above which an image is said to have uniform areas.
pub const UNIFORM_AREAS_RATIO: f32 = 0.3;

/// `contrast_ratio` above which an image is said to have high-frequency detail.
pub const HIGH_FREQUENCY_RATIO: f32 = 0.2;

/// Summary of an image's local variation.
///
/// Produced once per compression call and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContentProfile {
    complexity: f32,
    uniform_ratio: f32,
    contrast_ratio: f32,
}

impl ContentProfile {
    /// Build a profile from its three measured statistics.
    ///
    /// The boolean classifications are derived from the ratios, so they can
    /// never disagree with them.
    pub fn new(complexity: f32, uniform_ratio: f32, contrast_ratio: f32) -> Self {
        Self {
            complexity,
            uniform_ratio,
            contrast_ratio,
        }
    }

    /// Mean gradient magnitude over the sampled pixels.
    #[inline]
    pub fn complexity(&self) -> f32 {
        self.complexity
    }

    /// Fraction of sampled pixels classified uniform.
    #[inline]
    pub fn uniform_ratio(&self) -> f32 {
        self.uniform_ratio
    }

    /// Fraction of sampled pixels whose gradient exceeds 30.
    #[inline]
    pub fn contrast_ratio(&self) -> f32 {
        self.contrast_ratio
    }

    #[inline]
    pub fn has_uniform_areas(&self) -> bool {
        self.uniform_ratio > UNIFORM_AREAS_RATIO
    }

    #[inline]
    pub fn has_high_frequency(&self) -> bool {
        self.contrast_ratio > HIGH_FREQUENCY_RATIO
    }
}

/// Profile a buffer from a strided sample of its pixels.
///
/// The stride is `ceil(pixel_count / 10000)`, so at most 10000 pixels are
/// visited and they are spread over the whole image. Ratios are taken over
/// the pixels actually visited. An empty buffer produces the all-zero profile.
///
/// # Example
///
/// ```
/// use pixel_prep::{profile, PixelBuffer};
///
/// let flat = PixelBuffer::filled(8, 8, [40, 40, 40, 255]).unwrap();
/// let p = profile(&flat).unwrap();
/// assert_eq!(p.complexity(), 0.0);
/// assert!(p.has_uniform_areas());
/// assert!(!p.has_high_frequency());
/// ```
pub fn profile(buffer: &PixelBuffer) -> Result<ContentProfile, PrepError> {
    let pixels = buffer.pixel_count();
    if pixels == 0 {
        return Ok(ContentProfile::default());
    }

    let data = buffer.as_bytes();
    let row_bytes = buffer.row_bytes();
    let stride = pixels.div_ceil(MAX_SAMPLES).max(1);

    let mut total_gradient = 0.0f64;
    let mut uniform = 0usize;
    let mut high_contrast = 0usize;
    let mut samples = 0usize;

    for pixel in (0..pixels).step_by(stride) {
        let index = pixel * CHANNELS;
        buffer.check_index(index)?;

        let gradient = gradient_unchecked(data, index, row_bytes);
        total_gradient += gradient as f64;
        if uniform_unchecked(data, index, row_bytes) {
            uniform += 1;
        }
        if gradient > HIGH_CONTRAST_GRADIENT {
            high_contrast += 1;
        }
        samples += 1;
    }

    let n = samples as f64;
    Ok(ContentProfile::new(
        (total_gradient / n) as f32,
        (uniform as f64 / n) as f32,
        (high_contrast as f64 / n) as f32,
    ))
}
