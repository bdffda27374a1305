use pixel_prep::PrepError;
use thiserror::Error;

use crate::models::ImageFormat;

/// Source bytes could not be turned into a pixel buffer
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Unsupported or corrupt image data: {0}")]
    Malformed(String),

    #[error("Decoded image has an invalid layout: {0}")]
    Layout(#[from] PrepError),
}

/// The codec rejected a buffer or its parameters
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("{format} encode error: {message}")]
    Codec {
        format: ImageFormat,
        message: String,
    },

    #[error("Unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: usize, height: usize },
}

/// Failure inside one strategy path.
///
/// Never reaches the caller directly: the dispatcher answers it with the
/// basic fallback.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] PrepError),

    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),
}

/// Caller-visible failure of a compression call
#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("Invalid quality {0}: expected a value between 0.0 and 1.0")]
    InvalidQuality(f32),

    #[error("Basic fallback failed for {format}: {source}")]
    FallbackExhausted {
        format: ImageFormat,
        source: PathError,
    },
}

/// Coarse failure category, for callers that branch on the kind of error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Decode,
    Analysis,
    Encode,
    InvalidQuality,
    FallbackExhausted,
}

impl PathError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PathError::Decode(_) => ErrorKind::Decode,
            PathError::Analysis(_) => ErrorKind::Analysis,
            PathError::Encode(_) => ErrorKind::Encode,
        }
    }
}

impl CompressionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CompressionError::InvalidQuality(_) => ErrorKind::InvalidQuality,
            CompressionError::FallbackExhausted { .. } => ErrorKind::FallbackExhausted,
        }
    }

    /// Kind of the failure that exhausted the fallback, if any
    pub fn cause_kind(&self) -> Option<ErrorKind> {
        match self {
            CompressionError::FallbackExhausted { source, .. } => Some(source.kind()),
            CompressionError::InvalidQuality(_) => None,
        }
    }
}

/// Failure of an asynchronous or session-managed compression call
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Superseded by a newer request")]
    Superseded,

    #[error("Compression task failed: {0}")]
    Task(String),

    #[error(transparent)]
    Compression(#[from] CompressionError),
}
