//! imgsqueeze - content-aware image pre-compression
//!
//! Decodes an image, conditions its pixels for the target encoder (alpha-aware
//! quantization for PNG, selective smoothing and adaptive quality for JPEG),
//! and re-encodes it. Any failure in the advanced paths falls back to a plain
//! re-encode of the original.
//!
//! The pixel algorithms live in the `pixel-prep` crate; this crate adds the
//! codec, the strategy dispatcher, the async session and the CLI.

pub mod codec;
pub mod error;
pub mod models;
pub mod services;

pub use codec::{CodecOptions, ImageCodec, PngCompression, RasterCodec};
pub use error::{CompressionError, ErrorKind, SessionError};
pub use models::{CompressionRequest, CompressionResult, ImageFormat, StrategyPath};
pub use services::{CompressionSession, Compressor};
