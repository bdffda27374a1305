//! Neighbour averaging over flat regions.
//!
//! Before a lossy encode, pixels that sit in uniform areas are replaced by the
//! rounded mean of their four direct neighbours. This removes the sensor noise
//! and dithering that would otherwise cost bits in smooth regions.
//!
//! The pass reads from the untouched input and writes to a separate output
//! buffer, which is copied back at the end. A pixel's new value therefore never
//! depends on a neighbour that was already smoothed in the same pass.

use crate::analysis::uniform_unchecked;
use crate::buffer::{PixelBuffer, CHANNELS};
use crate::error::PrepError;

/// Smoothing runs only below this requested quality.
pub const SMOOTH_QUALITY_CEILING: f32 = 0.8;

/// Average uniform pixels with their direct neighbours, in place.
///
/// Neighbours are the pixels at byte offsets `-4`, `+4`, `-row` and `+row`.
/// Offsets outside the buffer are left out of the mean. Alpha is never
/// changed. Returns the number of pixels that were rewritten.
///
/// # Example
///
/// ```
/// use pixel_prep::{smooth, PixelBuffer};
///
/// let mut flat = PixelBuffer::filled(4, 4, [60, 60, 60, 255]).unwrap();
/// let before = flat.clone();
/// smooth(&mut flat).unwrap();
/// assert_eq!(flat, before);
/// ```
pub fn smooth(buffer: &mut PixelBuffer) -> Result<usize, PrepError> {
    let row_bytes = buffer.row_bytes();
    let source = buffer.as_bytes();
    let mut output = source.to_vec();
    let len = source.len() as isize;
    let offsets = [-4, 4, -(row_bytes as isize), row_bytes as isize];
    let mut rewritten = 0;

    for index in (0..source.len()).step_by(CHANNELS) {
        buffer.check_index(index)?;
        if !uniform_unchecked(source, index, row_bytes) {
            continue;
        }

        let mut sum = [0u32; 3];
        let mut count = 0u32;
        for offset in offsets {
            let neighbour = index as isize + offset;
            if neighbour < 0 || neighbour >= len {
                continue;
            }
            let n = neighbour as usize;
            for (acc, &c) in sum.iter_mut().zip(&source[n..n + 3]) {
                *acc += c as u32;
            }
            count += 1;
        }
        if count == 0 {
            continue;
        }

        for (out, acc) in output[index..index + 3].iter_mut().zip(sum) {
            *out = (acc as f32 / count as f32).round() as u8;
        }
        rewritten += 1;
    }

    buffer.as_bytes_mut().copy_from_slice(&output);
    Ok(rewritten)
}
