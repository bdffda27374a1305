//! Content-adaptive encoder quality.

use crate::analysis::ContentProfile;

/// Lowest quality [`adapt`] will return.
pub const MIN_EFFECTIVE_QUALITY: f32 = 0.1;

/// Highest quality [`adapt`] will return.
pub const MAX_EFFECTIVE_QUALITY: f32 = 0.95;

/// Map a requested quality and a content profile to the quality handed to the
/// lossy encoder.
///
/// Rules run in order:
///
/// 1. start from `base`
/// 2. mostly flat (`has_uniform_areas` and `uniform_ratio > 0.5`):
///    `max(0.3, base - 0.1)`
/// 3. lots of detail (`has_high_frequency` and `contrast_ratio > 0.4`):
///    `min(0.9, base + 0.1)`. This replaces the result of rule 2.
/// 4. `complexity > 50`: `min(0.9, current + 0.05)`. This stacks on top of
///    whichever of 2 or 3 applied.
/// 5. clamp to `[0.1, 0.95]`
///
/// # Example
///
/// ```
/// use pixel_prep::{adapt, ContentProfile};
///
/// let flat = ContentProfile::new(0.0, 1.0, 0.0);
/// assert!((adapt(0.5, &flat) - 0.4).abs() < 1e-6);
/// ```
pub fn adapt(base: f32, profile: &ContentProfile) -> f32 {
    let mut effective = base;

    if profile.has_uniform_areas() && profile.uniform_ratio() > 0.5 {
        effective = (base - 0.1).max(0.3);
    }

    if profile.has_high_frequency() && profile.contrast_ratio() > 0.4 {
        effective = (base + 0.1).min(0.9);
    }

    if profile.complexity() > 50.0 {
        effective = (effective + 0.05).min(0.9);
    }

    effective.clamp(MIN_EFFECTIVE_QUALITY, MAX_EFFECTIVE_QUALITY)
}
