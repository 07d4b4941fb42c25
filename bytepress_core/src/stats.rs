//! Size and timing statistics reported after a compress call.

use std::time::Duration;

use serde::Serialize;

/// Derived, read-only statistics for one compress call.
///
/// The field names are a compatibility contract with the API layer and its
/// front-end — they are serialized verbatim and must not be renamed. Stats
/// are recomputed on every call and never persisted inside a container.
#[derive(Debug, Clone, Serialize)]
pub struct CompressionStats {
    /// Bytes of the raw input payload.
    pub original_size: u64,
    /// Bytes of the full container (header + metadata + encoded payload).
    pub compressed_size: u64,
    /// `original_size / compressed_size`; 1.0 for an empty input, 0.0 if the
    /// container were ever empty (it never is — the header alone is 13 bytes).
    pub compression_ratio: f64,
    /// Wall-clock seconds spent on codec + container work only; any I/O done
    /// by the caller is excluded.
    pub processing_time: f64,
}

impl CompressionStats {
    pub fn new(original_size: u64, compressed_size: u64, elapsed: Duration) -> Self {
        let compression_ratio = if original_size == 0 {
            1.0
        } else if compressed_size == 0 {
            0.0
        } else {
            original_size as f64 / compressed_size as f64
        };
        Self {
            original_size,
            compressed_size,
            compression_ratio,
            processing_time: elapsed.as_secs_f64(),
        }
    }
}
