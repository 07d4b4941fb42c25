pub mod bits;
pub mod codec;
pub mod error;
pub mod format;
pub mod stats;

pub use bits::{BitReader, BitWriter};
pub use codec::{Codec, CodecMeta};
pub use error::EngineError;
pub use format::{Algorithm, ContainerHeader, HEADER_SIZE};
pub use stats::CompressionStats;
