//! Owned RGBA8 raster.
//!
//! [`PixelBuffer`] is the unit every pass in this crate works on. It stores
//! interleaved `R, G, B, A` samples in row-major order and guarantees that
//! the sample count is exactly `width * height * 4`.
//!
//! Read-only passes (gradient analysis, profiling) borrow it shared; mutating
//! passes (quantization, smoothing) take `&mut`, so two passes can never
//! alias the same pixels.

use crate::error::PrepError;

/// Bytes per RGBA pixel.
pub const CHANNELS: usize = 4;

/// An owned RGBA8 raster, row-major, four bytes per pixel.
///
/// # Example
///
/// ```
/// use pixel_prep::PixelBuffer;
///
/// let buffer = PixelBuffer::filled(2, 2, [100, 150, 200, 255]).unwrap();
/// assert_eq!(buffer.len(), 16);
/// assert_eq!(buffer.pixel(1, 1), [100, 150, 200, 255]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl PixelBuffer {
    /// Wrap decoded RGBA samples.
    ///
    /// Fails if `data.len() != width * height * 4`.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> Result<Self, PrepError> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(PrepError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Create a buffer where every pixel has the same RGBA value.
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> Result<Self, PrepError> {
        let len = byte_len(width, height)?;
        let data = rgba.iter().copied().cycle().take(len).collect();
        Ok(Self {
            data,
            width,
            height,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.data.len() / CHANNELS
    }

    /// Number of bytes in one row (`width * 4`).
    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.width * CHANNELS
    }

    /// Number of bytes in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw interleaved samples.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Raw interleaved samples, mutable.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// RGBA value at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the raster.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of range");
        let i = (y * self.width + x) * CHANNELS;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Consume the buffer and return its samples.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Check that `index` is the byte offset of a pixel inside this buffer.
    pub(crate) fn check_index(&self, index: usize) -> Result<(), PrepError> {
        if index % CHANNELS != 0 || index >= self.data.len() {
            return Err(PrepError::InvalidIndex {
                index,
                len: self.data.len(),
            });
        }
        Ok(())
    }
}

fn byte_len(width: usize, height: usize) -> Result<usize, PrepError> {
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or(PrepError::Dimensions { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_exact_length() {
        let buffer = PixelBuffer::new(vec![0; 3 * 2 * 4], 3, 2).unwrap();
        assert_eq!(buffer.width(), 3);
        assert_eq!(buffer.height(), 2);
        assert_eq!(buffer.pixel_count(), 6);
        assert_eq!(buffer.row_bytes(), 12);
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        let err = PixelBuffer::new(vec![0; 23], 3, 2).unwrap_err();
        assert_eq!(
            err,
            PrepError::BufferSize {
                expected: 24,
                actual: 23
            }
        );
    }

    #[test]
    fn test_new_rejects_overflowing_dimensions() {
        let err = PixelBuffer::new(Vec::new(), usize::MAX, 2).unwrap_err();
        assert!(matches!(err, PrepError::Dimensions { .. }));
    }

    #[test]
    fn test_empty_buffer() {
        let buffer = PixelBuffer::new(Vec::new(), 0, 0).unwrap();
        assert!(buffer.is_empty());
        assert_eq!(buffer.pixel_count(), 0);
    }

    #[test]
    fn test_filled_repeats_pixel() {
        let buffer = PixelBuffer::filled(3, 1, [1, 2, 3, 4]).unwrap();
        assert_eq!(buffer.as_bytes(), &[1, 2, 3, 4, 1, 2, 3, 4, 1, 2, 3, 4]);
    }

    #[test]
    fn test_pixel_row_major() {
        let data: Vec<u8> = (0..16).collect();
        let buffer = PixelBuffer::new(data, 2, 2).unwrap();
        assert_eq!(buffer.pixel(1, 0), [4, 5, 6, 7]);
        assert_eq!(buffer.pixel(0, 1), [8, 9, 10, 11]);
    }

    #[test]
    fn test_check_index() {
        let buffer = PixelBuffer::filled(2, 2, [0, 0, 0, 255]).unwrap();
        assert!(buffer.check_index(0).is_ok());
        assert!(buffer.check_index(12).is_ok());
        assert!(buffer.check_index(16).is_err());
        assert!(buffer.check_index(5).is_err());
    }
}
