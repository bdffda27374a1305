//! Mock codecs for exercising the fallback and session paths.

use imgsqueeze::error::{DecodeError, EncodeError};
use imgsqueeze::{ImageCodec, ImageFormat, RasterCodec};
use pixel_prep::PixelBuffer;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Fails every decode
pub struct FailingCodec;

impl ImageCodec for FailingCodec {
    fn decode(&self, _bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
        Err(DecodeError::Malformed("mock decoder always fails".to_string()))
    }

    fn encode(
        &self,
        _buffer: &PixelBuffer,
        _format: ImageFormat,
        _quality: f32,
    ) -> Result<Vec<u8>, EncodeError> {
        Ok(Vec::new())
    }
}

/// Real codec whose first `failures` encodes fail
pub struct FlakyEncodeCodec {
    inner: RasterCodec,
    remaining_failures: AtomicUsize,
}

impl FlakyEncodeCodec {
    pub fn new(failures: usize) -> Self {
        Self {
            inner: RasterCodec::default(),
            remaining_failures: AtomicUsize::new(failures),
        }
    }
}

impl ImageCodec for FlakyEncodeCodec {
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
        self.inner.decode(bytes)
    }

    fn encode(
        &self,
        buffer: &PixelBuffer,
        format: ImageFormat,
        quality: f32,
    ) -> Result<Vec<u8>, EncodeError> {
        let failing = self
            .remaining_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(EncodeError::Codec {
                format,
                message: "mock encoder failure".to_string(),
            });
        }
        self.inner.encode(buffer, format, quality)
    }
}

/// Real codec that sleeps before decoding inputs larger than `threshold` bytes
pub struct SlowDecodeCodec {
    inner: RasterCodec,
    threshold: usize,
    delay: Duration,
}

impl SlowDecodeCodec {
    pub fn new(threshold: usize, delay: Duration) -> Self {
        Self {
            inner: RasterCodec::default(),
            threshold,
            delay,
        }
    }
}

impl ImageCodec for SlowDecodeCodec {
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
        if bytes.len() > self.threshold {
            std::thread::sleep(self.delay);
        }
        self.inner.decode(bytes)
    }

    fn encode(
        &self,
        buffer: &PixelBuffer,
        format: ImageFormat,
        quality: f32,
    ) -> Result<Vec<u8>, EncodeError> {
        self.inner.encode(buffer, format, quality)
    }
}

/// Real codec that keeps a copy of every buffer handed to `encode`
#[derive(Default)]
pub struct CapturingCodec {
    inner: RasterCodec,
    encoded: std::sync::Mutex<Vec<PixelBuffer>>,
}

impl CapturingCodec {
    pub fn encoded(&self) -> Vec<PixelBuffer> {
        self.encoded.lock().unwrap().clone()
    }
}

impl ImageCodec for CapturingCodec {
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
        self.inner.decode(bytes)
    }

    fn encode(
        &self,
        buffer: &PixelBuffer,
        format: ImageFormat,
        quality: f32,
    ) -> Result<Vec<u8>, EncodeError> {
        self.encoded.lock().unwrap().push(buffer.clone());
        self.inner.encode(buffer, format, quality)
    }
}
