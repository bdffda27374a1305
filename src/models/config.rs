use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::codec::{CodecOptions, PngCompression};
use crate::models::ImageFormat;

/// Application configuration loaded from a YAML file
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Quality used when the caller does not pass one
    #[serde(default = "default_quality")]
    pub default_quality: f32,

    /// Prefix for derived output file names
    #[serde(default = "default_output_prefix")]
    pub output_prefix: String,

    /// PNG writer settings
    #[serde(default)]
    pub png: PngConfig,
}

fn default_quality() -> f32 {
    0.8
}

fn default_output_prefix() -> String {
    "optimized_".to_string()
}

/// PNG writer settings
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PngConfig {
    /// Run oxipng over the encoded PNG
    #[serde(default = "default_optimize")]
    pub optimize: bool,

    /// oxipng preset (0 = fastest, 6 = smallest)
    #[serde(default = "default_optimize_level")]
    pub optimize_level: u8,

    /// Deflate effort of the initial PNG write
    #[serde(default)]
    pub compression: PngCompression,
}

fn default_optimize() -> bool {
    true
}

fn default_optimize_level() -> u8 {
    2
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            optimize: default_optimize(),
            optimize_level: default_optimize_level(),
            compression: PngCompression::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file, falling back to defaults
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        default_quality = config.default_quality,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse and validate a YAML document
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        let mut config: Self = serde_yaml::from_str(content)?;
        if !(0.0..=1.0).contains(&config.default_quality) {
            tracing::warn!(
                default_quality = config.default_quality,
                "default_quality out of range, using 0.8"
            );
            config.default_quality = default_quality();
        }
        config.png.optimize_level = config.png.optimize_level.min(6);
        Ok(config)
    }

    /// Codec settings derived from this configuration
    pub fn codec_options(&self) -> CodecOptions {
        CodecOptions {
            png_compression: self.png.compression,
            optimize_png: self.png.optimize,
            optimize_level: self.png.optimize_level,
        }
    }

    /// Output path next to `input`: `<dir>/<prefix><stem><ext>`
    pub fn output_path_for(&self, input: &Path, format: ImageFormat) -> PathBuf {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("image");
        let name = format!("{}{}{}", self.output_prefix, stem, format.extension());
        match input.parent() {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_quality: default_quality(),
            output_prefix: default_output_prefix(),
            png: PngConfig::default(),
        }
    }
}
