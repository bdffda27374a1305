use serde::Serialize;
use std::fmt;

use super::ImageFormat;

/// Input to a single compression call
#[derive(Debug, Clone)]
pub struct CompressionRequest {
    /// Encoded source image
    pub bytes: Vec<u8>,
    /// Source format hint (selects the strategy)
    pub format: ImageFormat,
    /// Requested quality, 0.0 to 1.0
    pub quality: f32,
}

impl CompressionRequest {
    pub fn new(bytes: Vec<u8>, format: ImageFormat, quality: f32) -> Self {
        Self {
            bytes,
            format,
            quality,
        }
    }
}

/// Which strategy produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyPath {
    /// Alpha-aware quantization + lossless PNG
    Png,
    /// Profile, optional smoothing, adaptive JPEG quality
    JpegAdaptive,
    /// Re-encode at the original format and quality, no pixel changes
    PassThrough,
    /// Mutation-free re-encode after an advanced path failed
    BasicFallback,
}

impl fmt::Display for StrategyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyPath::Png => "png",
            StrategyPath::JpegAdaptive => "jpeg-adaptive",
            StrategyPath::PassThrough => "pass-through",
            StrategyPath::BasicFallback => "basic-fallback",
        };
        f.write_str(name)
    }
}

/// Output of a successful compression call
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionResult {
    /// Encoded output
    pub bytes: Vec<u8>,
    /// Format the output was written in
    pub format: ImageFormat,
    /// Quality handed to the encoder
    pub quality: f32,
    /// Strategy that produced the output
    pub path: StrategyPath,
}

/// How much a compression run saved, graded for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SavingsTier {
    Excellent,
    Good,
    Moderate,
    Light,
    None,
}

impl SavingsTier {
    /// Grade a signed reduction percentage
    pub fn from_percent(percent: i64) -> Self {
        match percent {
            p if p > 70 => SavingsTier::Excellent,
            p if p > 50 => SavingsTier::Good,
            p if p > 20 => SavingsTier::Moderate,
            p if p > 0 => SavingsTier::Light,
            _ => SavingsTier::None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SavingsTier::Excellent => "excellent optimization",
            SavingsTier::Good => "good optimization",
            SavingsTier::Moderate => "moderate optimization",
            SavingsTier::Light => "light optimization",
            SavingsTier::None => "no reduction",
        }
    }
}

/// Size comparison between source and output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompressionStats {
    pub original_bytes: usize,
    pub compressed_bytes: usize,
    /// Bytes saved, zero when the output grew
    pub saved_bytes: usize,
    /// Rounded reduction percentage, negative when the output grew
    pub reduction_percent: i64,
    pub tier: SavingsTier,
}

impl CompressionStats {
    pub fn new(original_bytes: usize, compressed_bytes: usize) -> Self {
        let reduction_percent = if original_bytes == 0 {
            0
        } else {
            let delta = original_bytes as f64 - compressed_bytes as f64;
            (delta / original_bytes as f64 * 100.0).round() as i64
        };

        Self {
            original_bytes,
            compressed_bytes,
            saved_bytes: original_bytes.saturating_sub(compressed_bytes),
            reduction_percent,
            tier: SavingsTier::from_percent(reduction_percent),
        }
    }

    /// Reduction percentage floored at zero, for progress bars and summaries
    pub fn display_percent(&self) -> i64 {
        self.reduction_percent.max(0)
    }
}
