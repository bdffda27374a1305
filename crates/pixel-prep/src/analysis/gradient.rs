//! Local gradient magnitude and flat-area classification.
//!
//! Both predicates work on byte offsets into the interleaved buffer, not on
//! `(x, y)` coordinates. Neighbour lookups are bounded by the buffer length
//! only, so a 5x5 window centred near the right edge picks up pixels from the
//! start of the next row. The profiler and smoother both depend on exactly
//! this behaviour.

use crate::buffer::PixelBuffer;
use crate::error::PrepError;

/// Half-width of the square window inspected by [`is_uniform_area`].
pub const UNIFORM_RADIUS: isize = 2;

/// Summed `|dR| + |dG| + |dB|` above which a neighbour counts as varying.
pub const UNIFORM_DIFF_THRESHOLD: u32 = 20;

/// A pixel is uniform when the share of varying neighbours stays below this.
pub const UNIFORM_MAX_VARYING_RATIO: f32 = 0.3;

/// Average per-channel, per-direction first difference around a pixel.
///
/// Sums the absolute R, G, B differences to the pixel on the right (only when
/// it lies on the same row) and to the pixel below (only when it exists), then
/// divides by 6. Alpha is ignored.
///
/// `index` must be the byte offset of a pixel.
///
/// # Example
///
/// ```
/// use pixel_prep::{gradient_at, PixelBuffer};
///
/// let flat = PixelBuffer::filled(4, 4, [10, 20, 30, 255]).unwrap();
/// assert_eq!(gradient_at(&flat, 0).unwrap(), 0.0);
/// ```
pub fn gradient_at(buffer: &PixelBuffer, index: usize) -> Result<f32, PrepError> {
    buffer.check_index(index)?;
    Ok(gradient_unchecked(buffer.as_bytes(), index, buffer.row_bytes()))
}

/// Whether the 5x5 window around a pixel is essentially flat.
///
/// Every neighbour in the window (centre excluded) whose byte offset lands
/// inside the buffer is compared against the centre. The pixel is uniform if
/// at least one comparison was made and fewer than 30% of the neighbours
/// differ by more than 20 in summed RGB distance.
///
/// `index` must be the byte offset of a pixel.
pub fn is_uniform_area(buffer: &PixelBuffer, index: usize) -> Result<bool, PrepError> {
    buffer.check_index(index)?;
    Ok(uniform_unchecked(buffer.as_bytes(), index, buffer.row_bytes()))
}

pub(crate) fn gradient_unchecked(data: &[u8], index: usize, row_bytes: usize) -> f32 {
    let mut gradient = 0u32;

    let right = index + 4;
    if right < data.len() && right % row_bytes != 0 {
        gradient += rgb_distance(&data[index..index + 3], &data[right..right + 3]);
    }

    let below = index + row_bytes;
    if below < data.len() {
        gradient += rgb_distance(&data[index..index + 3], &data[below..below + 3]);
    }

    gradient as f32 / 6.0
}

pub(crate) fn uniform_unchecked(data: &[u8], index: usize, row_bytes: usize) -> bool {
    let center = &data[index..index + 3];
    let row = row_bytes as isize;
    let len = data.len() as isize;
    let mut varying = 0u32;
    let mut comparisons = 0u32;

    for dy in -UNIFORM_RADIUS..=UNIFORM_RADIUS {
        for dx in -UNIFORM_RADIUS..=UNIFORM_RADIUS {
            if dx == 0 && dy == 0 {
                continue;
            }
            let neighbour = index as isize + dy * row + dx * 4;
            if neighbour < 0 || neighbour >= len {
                continue;
            }
            let n = neighbour as usize;
            if rgb_distance(center, &data[n..n + 3]) > UNIFORM_DIFF_THRESHOLD {
                varying += 1;
            }
            comparisons += 1;
        }
    }

    comparisons > 0 && (varying as f32 / comparisons as f32) < UNIFORM_MAX_VARYING_RATIO
}

#[inline]
fn rgb_distance(a: &[u8], b: &[u8]) -> u32 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| x.abs_diff(y) as u32)
        .sum()
}
