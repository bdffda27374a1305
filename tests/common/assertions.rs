//! Assertion helpers for tests.

use imgsqueeze::{ImageCodec, ImageFormat, RasterCodec};
use pixel_prep::PixelBuffer;

/// Assert bytes carry the magic number of `format`
pub fn assert_format(bytes: &[u8], format: ImageFormat) {
    assert_eq!(
        ImageFormat::sniff(bytes),
        format,
        "Expected {} output, got {} bytes starting with {:?}",
        format,
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}

/// Decode bytes with the production codec
pub fn decode(bytes: &[u8]) -> PixelBuffer {
    RasterCodec::default()
        .decode(bytes)
        .expect("output should decode")
}

/// Assert every pixel of `buffer` equals `rgba`
pub fn assert_all_pixels(buffer: &PixelBuffer, rgba: [u8; 4]) {
    for (i, px) in buffer.as_bytes().chunks_exact(4).enumerate() {
        assert_eq!(px, rgba, "pixel {i} differs");
    }
}
