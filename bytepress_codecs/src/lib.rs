mod huffman;
mod rle;
pub mod service;

pub use huffman::HuffmanCodec;
pub use rle::RleCodec;
pub use service::{compress, decompress};

use std::sync::Arc;

use bytepress_core::format::{ALGO_HUFFMAN, ALGO_RLE};
use bytepress_core::{Algorithm, Codec, EngineError};

/// Resolve a codec from its wire id, as stored in a container header.
///
/// This is the decompression dispatch: the header names the codec, so no
/// algorithm argument ever accompanies a decompress call.
pub fn codec_by_id(id: u8) -> Result<Arc<dyn Codec>, EngineError> {
    match id {
        ALGO_RLE => Ok(Arc::new(RleCodec)),
        ALGO_HUFFMAN => Ok(Arc::new(HuffmanCodec)),
        other => Err(EngineError::UnsupportedAlgorithm(format!(
            "unknown algorithm id {other}"
        ))),
    }
}

/// Resolve the codec for a named algorithm. Infallible: the enum is the
/// closed set of supported algorithms.
pub fn codec_for(algorithm: Algorithm) -> Arc<dyn Codec> {
    match algorithm {
        Algorithm::Rle => Arc::new(RleCodec),
        Algorithm::Huffman => Arc::new(HuffmanCodec),
    }
}
