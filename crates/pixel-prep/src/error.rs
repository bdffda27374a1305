//! Error type for pixel buffer construction and analysis.

use std::fmt;

/// Error type for pixel buffer operations.
///
/// None of these occur for a well-formed buffer driven through the crate's
/// own passes; they signal a caller handing in inconsistent data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrepError {
    /// Sample count does not equal `width * height * 4`
    BufferSize {
        /// Number of bytes the dimensions require
        expected: usize,
        /// Number of bytes actually supplied
        actual: usize,
    },
    /// `width * height * 4` overflows `usize`
    Dimensions {
        /// Requested width in pixels
        width: usize,
        /// Requested height in pixels
        height: usize,
    },
    /// Byte offset is past the end of the buffer or not on a pixel boundary
    InvalidIndex {
        /// Offending byte offset
        index: usize,
        /// Buffer length in bytes
        len: usize,
    },
}

impl fmt::Display for PrepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrepError::BufferSize { expected, actual } => {
                write!(
                    f,
                    "pixel buffer has {} bytes, expected {} (width * height * 4)",
                    actual, expected
                )
            }
            PrepError::Dimensions { width, height } => {
                write!(f, "image dimensions {}x{} are too large", width, height)
            }
            PrepError::InvalidIndex { index, len } => {
                write!(
                    f,
                    "byte offset {} is not a pixel start in a buffer of {} bytes",
                    index, len
                )
            }
        }
    }
}

impl std::error::Error for PrepError {}
