//! pixel-prep: content-aware pre-compression for RGBA rasters
//!
//! This crate holds the pixel-level heuristics that sit in front of a lossy
//! or lossless image encoder. They decide how much colour precision to drop
//! and what quality to hand to the codec. It has no dependencies and never
//! encodes or decodes anything itself.
//!
//! # Quick Start
//!
//! ```
//! use pixel_prep::{adapt, profile, quantize, PixelBuffer};
//!
//! // PNG-style: quantize in place before a lossless encode
//! let mut buffer = PixelBuffer::filled(2, 2, [100, 150, 200, 255]).unwrap();
//! quantize(&mut buffer, 0.5);
//! assert_eq!(buffer.pixel(0, 0), [104, 152, 200, 255]);
//!
//! // JPEG-style: profile, then derive the encoder quality
//! let p = profile(&buffer).unwrap();
//! let effective = adapt(0.5, &p);
//! assert!((0.1..=0.95).contains(&effective));
//! ```
//!
//! # Pipeline Overview
//!
//! ```text
//! PixelBuffer (RGBA8, row-major)
//!     |
//!     +---> profile()          gradient_at + is_uniform_area over a
//!     |        |               strided sample of <= 10000 pixels
//!     |        v
//!     |     ContentProfile ---> adapt()  -> effective encoder quality
//!     |
//!     +---> smooth()           mean of 4 neighbours on uniform pixels
//!     |                        (lossy path, high-frequency content, q < 0.8)
//!     |
//!     +---> quantize()         snap RGB to multiples of a factor
//!                              (lossless path, q < 0.8)
//! ```
//!
//! # Offsets, Not Coordinates
//!
//! The neighbourhood predicates address pixels by byte offset and bound
//! lookups by buffer length only. Windows at the right edge of a row
//! therefore read pixels from the start of the next row. This is part of the
//! classification contract: changing it shifts `uniform_ratio` on narrow
//! images, and with it the adaptive quality.
//!
//! # Transparency
//!
//! [`QuantizeMode::AlphaPreserving`] never writes to a pixel that is not fully
//! opaque, alpha included. [`QuantizeMode::Opaque`] is only selected when
//! [`has_alpha_channel`] finds no alpha below 255, and it then forces every
//! alpha to 255.

pub mod analysis;
pub mod buffer;
pub mod error;
pub mod quality;
pub mod quantize;
pub mod smooth;


pub use analysis::{gradient_at, is_uniform_area, profile, ContentProfile};
pub use buffer::PixelBuffer;
pub use error::PrepError;
pub use quality::{adapt, MAX_EFFECTIVE_QUALITY, MIN_EFFECTIVE_QUALITY};
pub use quantize::{
    has_alpha_channel, quantize, quantize_with, QuantizeMode, QUANTIZE_QUALITY_CEILING,
};
pub use smooth::{smooth, SMOOTH_QUALITY_CEILING};
