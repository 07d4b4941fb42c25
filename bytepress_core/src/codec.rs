//! The codec abstraction every compression algorithm implements.

use crate::error::EngineError;

/// Codec-specific metadata stored in the container's metadata block.
///
/// For RLE this is always empty — the pair stream is self-delimiting. For
/// Huffman it carries the serialized symbol table, which is what lets the
/// decoder rebuild the exact code assignment without re-running frequency
/// analysis.
#[derive(Default, Debug, Clone)]
pub struct CodecMeta {
    pub table: Vec<u8>,
}

/// Core compression abstraction.
///
/// Each `Codec` implementation:
/// - Is identified by a stable `id()` stored in the container header.
/// - Is stateless across calls; every invocation owns its buffers, so any
///   number of encodes/decodes may run concurrently.
/// - May write metadata into `meta.table` on encode; the same bytes are
///   handed back verbatim on decode.
pub trait Codec: Send + Sync {
    /// Stable algorithm id stored in the container header.
    fn id(&self) -> u8;

    /// Selector name for CLI display and logging.
    fn name(&self) -> &'static str;

    /// Encode `raw` into a payload, writing any sidecar metadata the decoder
    /// will need into `meta.table`.
    fn encode(&self, raw: &[u8], meta: &mut CodecMeta) -> Result<Vec<u8>, EngineError>;

    /// Decode `payload` back into exactly `original_length` bytes.
    ///
    /// `meta` contains the table written by `encode`. Implementations must
    /// fail with [`EngineError::CorruptStream`] rather than return partial or
    /// truncated output.
    fn decode(
        &self,
        payload: &[u8],
        meta: &CodecMeta,
        original_length: u64,
    ) -> Result<Vec<u8>, EngineError>;
}
