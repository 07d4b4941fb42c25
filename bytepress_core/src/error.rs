//! The single error type shared by the container format, the bit stream
//! primitives, and the codecs.

use thiserror::Error;

/// Failure taxonomy for a single compress/decompress request.
///
/// All variants are terminal for the request in progress: the engine is
/// deterministic, so retrying the same bytes cannot succeed and no retry is
/// ever attempted internally. Callers translate these into user-facing
/// messages.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Algorithm name or wire id that no codec claims.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Container header malformed, or its length fields disagree with the
    /// actual buffer.
    #[error("invalid container: {0}")]
    InvalidContainer(String),

    /// Codec-level decode failure: malformed RLE pairing, unparsable Huffman
    /// table, or a bit stream that ran dry before the declared output length
    /// was produced.
    #[error("corrupt stream: {0}")]
    CorruptStream(String),

    /// Bit reader exhausted before the declared bit count.
    #[error("bit stream out of data: requested {requested} bits, {remaining} remaining")]
    OutOfData { requested: u32, remaining: u64 },
}
