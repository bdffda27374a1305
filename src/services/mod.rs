pub mod compressor;
pub mod inspect;
pub mod session;

pub use compressor::{Compressor, PNG_PASSTHROUGH_QUALITY};
pub use inspect::{inspect, ContentReport};
pub use session::CompressionSession;
