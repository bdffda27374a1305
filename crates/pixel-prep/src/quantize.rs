//! Transparency-aware colour quantization.
//!
//! Two variants reduce per-channel precision by snapping R, G and B to
//! multiples of a factor derived from the requested quality:
//!
//! | Variant | Chosen when | Factor | Pixels touched | Alpha |
//! |---------|-------------|--------|----------------|-------|
//! | [`QuantizeMode::AlphaPreserving`] | any alpha < 255 | `max(4, floor((1-q)*12))` | alpha == 255 only | never written |
//! | [`QuantizeMode::Opaque`] | no alpha < 255 | `max(3, floor((1-q)*16))` | all | forced to 255 |
//!
//! Nothing happens at `quality >= 0.8`.
//!
//! Snapping uses round-half-away-from-zero (`f32::round`) and saturates at
//! 255, so `255` with factor 8 stays `255` rather than wrapping.

use crate::buffer::PixelBuffer;

/// Quantization is skipped at or above this requested quality.
pub const QUANTIZE_QUALITY_CEILING: f32 = 0.8;

/// Which quantizer variant to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantizeMode {
    /// Touch fully opaque pixels only; translucent pixels pass through byte-exact.
    AlphaPreserving,
    /// Touch every pixel and force alpha to 255.
    Opaque,
}

impl QuantizeMode {
    /// Pick the variant for a buffer: alpha-preserving if any pixel is translucent.
    pub fn select(buffer: &PixelBuffer) -> Self {
        if has_alpha_channel(buffer) {
            QuantizeMode::AlphaPreserving
        } else {
            QuantizeMode::Opaque
        }
    }

    /// Short lowercase name, for reports and logs.
    pub fn name(self) -> &'static str {
        match self {
            QuantizeMode::AlphaPreserving => "alpha-preserving",
            QuantizeMode::Opaque => "opaque",
        }
    }

    /// Rounding step for the given quality.
    pub fn factor(self, quality: f32) -> u8 {
        let (scale, floor) = match self {
            QuantizeMode::AlphaPreserving => (12.0, 4),
            QuantizeMode::Opaque => (16.0, 3),
        };
        let raw = ((1.0 - quality) * scale).floor();
        // quality is validated to [0, 1] upstream, so raw stays in 0..=scale
        (raw.clamp(0.0, 255.0) as u8).max(floor)
    }
}

/// Whether any pixel has alpha below 255. Stops at the first one found.
pub fn has_alpha_channel(buffer: &PixelBuffer) -> bool {
    buffer.as_bytes().chunks_exact(4).any(|px| px[3] < 255)
}

/// Select a variant for `buffer` and quantize it in place.
///
/// Returns the variant that ran, or `None` when `quality >= 0.8` and the
/// buffer was left untouched.
///
/// # Example
///
/// ```
/// use pixel_prep::{quantize, PixelBuffer, QuantizeMode};
///
/// let mut buffer = PixelBuffer::filled(2, 2, [100, 150, 200, 255]).unwrap();
/// assert_eq!(quantize(&mut buffer, 0.5), Some(QuantizeMode::Opaque));
/// assert_eq!(buffer.pixel(0, 0), [104, 152, 200, 255]);
/// ```
pub fn quantize(buffer: &mut PixelBuffer, quality: f32) -> Option<QuantizeMode> {
    if quality >= QUANTIZE_QUALITY_CEILING {
        return None;
    }
    let mode = QuantizeMode::select(buffer);
    quantize_with(buffer, mode, quality);
    Some(mode)
}

/// Quantize in place with an explicit variant.
///
/// No-op when `quality >= 0.8`.
pub fn quantize_with(buffer: &mut PixelBuffer, mode: QuantizeMode, quality: f32) {
    if quality >= QUANTIZE_QUALITY_CEILING {
        return;
    }
    let factor = mode.factor(quality);

    for px in buffer.as_bytes_mut().chunks_exact_mut(4) {
        match mode {
            QuantizeMode::AlphaPreserving => {
                if px[3] == 255 {
                    snap_rgb(px, factor);
                }
            }
            QuantizeMode::Opaque => {
                snap_rgb(px, factor);
                px[3] = 255;
            }
        }
    }
}

#[inline]
fn snap_rgb(px: &mut [u8], factor: u8) {
    for c in &mut px[..3] {
        *c = snap(*c, factor);
    }
}

#[inline]
fn snap(channel: u8, factor: u8) -> u8 {
    let f = factor as f32;
    let snapped = (channel as f32 / f).round() * f;
    snapped.min(255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_alpha_preserving() {
        assert_eq!(QuantizeMode::AlphaPreserving.factor(0.0), 12);
        assert_eq!(QuantizeMode::AlphaPreserving.factor(0.5), 6);
        assert_eq!(QuantizeMode::AlphaPreserving.factor(0.75), 4);
    }

    #[test]
    fn test_factor_opaque() {
        assert_eq!(QuantizeMode::Opaque.factor(0.0), 16);
        assert_eq!(QuantizeMode::Opaque.factor(0.5), 8);
        assert_eq!(QuantizeMode::Opaque.factor(0.79), 3);
    }

    #[test]
    fn test_snap_rounds_half_away_from_zero() {
        assert_eq!(snap(100, 8), 104); // 12.5 -> 13
        assert_eq!(snap(150, 8), 152); // 18.75 -> 19
        assert_eq!(snap(200, 8), 200);
        assert_eq!(snap(3, 6), 6); // 0.5 -> 1
    }

    #[test]
    fn test_snap_saturates() {
        assert_eq!(snap(255, 8), 255); // 31.875 -> 32 -> 256
        assert_eq!(snap(255, 6), 255); // 42.5 -> 43 -> 258
        assert_eq!(snap(253, 6), 252);
    }

    #[test]
    fn test_has_alpha_channel() {
        let opaque = PixelBuffer::filled(3, 3, [1, 2, 3, 255]).unwrap();
        assert!(!has_alpha_channel(&opaque));

        let mut translucent = opaque.clone();
        translucent.as_bytes_mut()[35] = 254;
        assert!(has_alpha_channel(&translucent));
    }

    #[test]
    fn test_skipped_at_high_quality() {
        let original = PixelBuffer::filled(2, 2, [101, 151, 201, 255]).unwrap();
        let mut buffer = original.clone();
        assert_eq!(quantize(&mut buffer, 0.8), None);
        assert_eq!(buffer, original);
    }

    #[test]
    fn test_alpha_preserving_leaves_translucent_pixels() {
        let data = vec![
            101, 151, 201, 255, //
            101, 151, 201, 128, //
            7, 9, 11, 0, //
            250, 250, 250, 255,
        ];
        let mut buffer = PixelBuffer::new(data, 2, 2).unwrap();
        assert_eq!(quantize(&mut buffer, 0.5), Some(QuantizeMode::AlphaPreserving));
        // factor 6
        assert_eq!(buffer.pixel(0, 0), [102, 150, 204, 255]);
        assert_eq!(buffer.pixel(1, 0), [101, 151, 201, 128]);
        assert_eq!(buffer.pixel(0, 1), [7, 9, 11, 0]);
        assert_eq!(buffer.pixel(1, 1), [252, 252, 252, 255]);
    }

    #[test]
    fn test_opaque_forces_alpha() {
        let mut buffer = PixelBuffer::filled(2, 1, [10, 20, 30, 255]).unwrap();
        quantize_with(&mut buffer, QuantizeMode::Opaque, 0.0);
        // factor 16
        assert_eq!(buffer.pixel(0, 0), [16, 16, 32, 255]);
    }
}
