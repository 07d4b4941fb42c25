//! Wire layout of the bytepress container.
//!
//! A container is `header || metadata_block || encoded_payload`. The header
//! names the algorithm and carries the two lengths needed to slice the rest,
//! which is what makes decompression self-describing: the container alone,
//! with no external algorithm hint, is enough to recover the original bytes.

use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// Fixed size of the container header in bytes.
///   algorithm_id:u8 + original_length:u64 + metadata_length:u32
///   = 1 + 8 + 4 = 13
pub const HEADER_SIZE: usize = 13;

// ── Algorithm ids ──────────────────────────────────────────────────────────
// 0 is never assigned, so an all-zero buffer cannot parse as a valid header.

pub const ALGO_RLE: u8 = 1;
pub const ALGO_HUFFMAN: u8 = 2;

/// The closed set of supported compression algorithms.
///
/// Extending the set means adding a variant here, a codec implementing it,
/// and a wire id constant — nothing is resolved at runtime beyond this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Rle,
    Huffman,
}

impl Algorithm {
    /// Stable wire id stored in the container header.
    pub fn id(self) -> u8 {
        match self {
            Algorithm::Rle => ALGO_RLE,
            Algorithm::Huffman => ALGO_HUFFMAN,
        }
    }

    /// Selector string used by the CLI and the HTTP path segment.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Rle => "rle",
            Algorithm::Huffman => "huffman",
        }
    }

    /// Resolve an algorithm from its wire id.
    pub fn from_id(id: u8) -> Result<Self, EngineError> {
        match id {
            ALGO_RLE => Ok(Algorithm::Rle),
            ALGO_HUFFMAN => Ok(Algorithm::Huffman),
            other => Err(EngineError::UnsupportedAlgorithm(format!(
                "unknown algorithm id {other}"
            ))),
        }
    }
}

impl FromStr for Algorithm {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rle" => Ok(Algorithm::Rle),
            "huffman" => Ok(Algorithm::Huffman),
            other => Err(EngineError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Header ─────────────────────────────────────────────────────────────────

/// Decoded representation of the 13-byte container header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHeader {
    pub algorithm_id: u8,
    /// Length of the original payload in bytes. Decoders stop after exactly
    /// this many bytes, which is what makes trailing bit padding harmless.
    pub original_length: u64,
    /// Length of the codec metadata block. Always 0 for RLE.
    pub metadata_length: u32,
}

impl ContainerHeader {
    /// Serialize to exactly `HEADER_SIZE` bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        buf[0] = self.algorithm_id;
        buf[1..9].copy_from_slice(&self.original_length.to_le_bytes());
        buf[9..13].copy_from_slice(&self.metadata_length.to_le_bytes());
        buf
    }

    /// Deserialize from the first `HEADER_SIZE` bytes of `buf`.
    pub fn from_bytes(buf: &[u8]) -> Result<Self, EngineError> {
        if buf.len() < HEADER_SIZE {
            return Err(EngineError::InvalidContainer(format!(
                "header needs {HEADER_SIZE} bytes, got {}",
                buf.len()
            )));
        }
        let original_length = u64::from_le_bytes(
            buf[1..9]
                .try_into()
                .map_err(|_| EngineError::InvalidContainer("header slice".to_string()))?,
        );
        let metadata_length = u32::from_le_bytes(
            buf[9..13]
                .try_into()
                .map_err(|_| EngineError::InvalidContainer("header slice".to_string()))?,
        );
        Ok(Self {
            algorithm_id: buf[0],
            original_length,
            metadata_length,
        })
    }
}

// ── Container assembly / parsing ───────────────────────────────────────────

/// Assemble a full container from its three parts.
pub fn build_container(header: &ContainerHeader, metadata: &[u8], payload: &[u8]) -> Vec<u8> {
    debug_assert_eq!(header.metadata_length as usize, metadata.len());
    let mut out = Vec::with_capacity(HEADER_SIZE + metadata.len() + payload.len());
    out.extend_from_slice(&header.to_bytes());
    out.extend_from_slice(metadata);
    out.extend_from_slice(payload);
    out
}

/// Parse a container into `(header, metadata_block, encoded_payload)`.
///
/// Fails with [`EngineError::InvalidContainer`] when the buffer is shorter
/// than the header or the declared metadata length overruns the buffer.
pub fn split_container(container: &[u8]) -> Result<(ContainerHeader, &[u8], &[u8]), EngineError> {
    let header = ContainerHeader::from_bytes(container)?;
    let metadata_end = HEADER_SIZE + header.metadata_length as usize;
    if metadata_end > container.len() {
        return Err(EngineError::InvalidContainer(format!(
            "metadata_length {} overruns container of {} bytes",
            header.metadata_length,
            container.len()
        )));
    }
    let metadata = &container[HEADER_SIZE..metadata_end];
    let payload = &container[metadata_end..];
    Ok((header, metadata, payload))
}
