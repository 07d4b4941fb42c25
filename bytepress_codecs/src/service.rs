//! Stateless compression service: the engine's public entry point.
//!
//! `compress` and `decompress` transform in-memory buffers only; reading the
//! payload from storage and persisting the container are the caller's job.
//! Every invocation owns its buffers and shares nothing, so calls may run
//! concurrently without coordination.

use std::time::{Duration, Instant};

use log::debug;

use bytepress_core::codec::CodecMeta;
use bytepress_core::format::{build_container, split_container, ContainerHeader};
use bytepress_core::{Algorithm, CompressionStats, EngineError};

use crate::{codec_by_id, codec_for};

/// Compress `raw` with `algorithm`, returning the self-describing container
/// and the statistics the API layer reports.
///
/// Timing covers codec and container work only, not any caller I/O.
pub fn compress(
    raw: &[u8],
    algorithm: Algorithm,
) -> Result<(Vec<u8>, CompressionStats), EngineError> {
    let codec = codec_for(algorithm);

    let start = Instant::now();
    let mut meta = CodecMeta::default();
    let payload = codec.encode(raw, &mut meta)?;
    let header = ContainerHeader {
        algorithm_id: codec.id(),
        original_length: raw.len() as u64,
        metadata_length: meta.table.len() as u32,
    };
    let container = build_container(&header, &meta.table, &payload);
    let elapsed = start.elapsed();

    let stats = CompressionStats::new(raw.len() as u64, container.len() as u64, elapsed);
    debug!(
        "compress algorithm={} original={} compressed={} ratio={:.3}",
        codec.name(),
        stats.original_size,
        stats.compressed_size,
        stats.compression_ratio
    );

    Ok((container, stats))
}

/// Decompress a container produced by [`compress`].
///
/// The container is self-describing: the codec is picked from the header's
/// algorithm id, no external hint required. Returns the original bytes and
/// the processing time; callers may surface or drop the timing.
pub fn decompress(container: &[u8]) -> Result<(Vec<u8>, Duration), EngineError> {
    let start = Instant::now();
    let (header, metadata, payload) = split_container(container)?;
    let codec = codec_by_id(header.algorithm_id)?;

    let meta = CodecMeta {
        table: metadata.to_vec(),
    };
    let raw = codec.decode(payload, &meta, header.original_length)?;
    if raw.len() as u64 != header.original_length {
        return Err(EngineError::CorruptStream(format!(
            "decoded {} bytes but the header declares {}",
            raw.len(),
            header.original_length
        )));
    }
    let elapsed = start.elapsed();

    debug!(
        "decompress algorithm={} original={} elapsed={:?}",
        codec.name(),
        header.original_length,
        elapsed
    );

    Ok((raw, elapsed))
}
