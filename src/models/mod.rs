pub mod compression;
pub mod config;
pub mod format;

pub use compression::{
    CompressionRequest, CompressionResult, CompressionStats, SavingsTier, StrategyPath,
};
pub use config::{AppConfig, PngConfig};
pub use format::ImageFormat;
