//! Read-only content analysis.
//!
//! - [`gradient_at`]: per-pixel gradient magnitude (average of the right and
//!   lower RGB differences)
//! - [`is_uniform_area`]: 5x5 flatness predicate shared by the profiler and
//!   the smoother
//! - [`profile`]: strided whole-image summary as a [`ContentProfile`]
//!
//! Nothing in this module mutates the buffer.

mod gradient;
mod profile;

pub use gradient::{
    gradient_at, is_uniform_area, UNIFORM_DIFF_THRESHOLD, UNIFORM_MAX_VARYING_RATIO,
    UNIFORM_RADIUS,
};
pub(crate) use gradient::uniform_unchecked;
pub use profile::{
    profile, ContentProfile, HIGH_CONTRAST_GRADIENT, HIGH_FREQUENCY_RATIO, MAX_SAMPLES,
    UNIFORM_AREAS_RATIO,
};
