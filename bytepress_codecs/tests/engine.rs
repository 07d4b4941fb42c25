//! End-to-end tests of the compression service: round trips over binary
//! data, container self-description, stats, and corruption detection.

use bytepress_codecs::{compress, decompress};
use bytepress_core::format::HEADER_SIZE;
use bytepress_core::{Algorithm, ContainerHeader, EngineError};

/// Generate `len` deterministic bytes using a simple LCG.
fn pseudo_random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = seed;
    (0..len)
        .map(|_| {
            rng = rng
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (rng >> 56) as u8
        })
        .collect()
}

/// Generate `len` highly compressible bytes (repeating pattern).
fn compressible_bytes(len: usize) -> Vec<u8> {
    let pattern = b"the quick brown fox jumps over the lazy dog. ";
    (0..len).map(|i| pattern[i % pattern.len()]).collect()
}

fn roundtrip(data: &[u8], algorithm: Algorithm) -> Vec<u8> {
    let (container, stats) = compress(data, algorithm).unwrap();
    assert_eq!(stats.original_size, data.len() as u64);
    assert_eq!(stats.compressed_size, container.len() as u64);
    let (recovered, _) = decompress(&container).unwrap();
    recovered
}

// ── Round trips ────────────────────────────────────────────────────────────

#[test]
fn roundtrip_matrix() {
    let inputs: Vec<Vec<u8>> = vec![
        Vec::new(),
        vec![0x00],
        vec![0xFF; 1],
        vec![0xAB; 5000],
        (0..=255).collect(),
        pseudo_random_bytes(64 * 1024, 0xDEAD_BEEF),
        compressible_bytes(10_000),
    ];
    for input in &inputs {
        for algorithm in [Algorithm::Rle, Algorithm::Huffman] {
            assert_eq!(
                roundtrip(input, algorithm),
                *input,
                "{algorithm} round trip failed for {} bytes",
                input.len()
            );
        }
    }
}

#[test]
fn rle_known_pairs() {
    let (container, stats) = compress(b"AAAAABB", Algorithm::Rle).unwrap();
    assert_eq!(stats.original_size, 7);
    // header + (5,'A')(2,'B')
    assert_eq!(&container[HEADER_SIZE..], &[5, b'A', 2, b'B']);
    let (recovered, _) = decompress(&container).unwrap();
    assert_eq!(recovered, b"AAAAABB");
}

#[test]
fn empty_payload_container() {
    for algorithm in [Algorithm::Rle, Algorithm::Huffman] {
        let (container, stats) = compress(&[], algorithm).unwrap();
        let header = ContainerHeader::from_bytes(&container).unwrap();
        assert_eq!(header.original_length, 0);
        assert_eq!(stats.compression_ratio, 1.0);
        let (recovered, _) = decompress(&container).unwrap();
        assert!(recovered.is_empty());
    }
}

#[test]
fn decompress_needs_no_algorithm_hint() {
    let data = compressible_bytes(2048);
    let (rle, _) = compress(&data, Algorithm::Rle).unwrap();
    let (huffman, _) = compress(&data, Algorithm::Huffman).unwrap();
    // Same entry point recovers both; only the container decides.
    assert_eq!(decompress(&rle).unwrap().0, data);
    assert_eq!(decompress(&huffman).unwrap().0, data);
}

// ── Stats ──────────────────────────────────────────────────────────────────

#[test]
fn stats_match_sizes() {
    let data = compressible_bytes(9000);
    let (container, stats) = compress(&data, Algorithm::Huffman).unwrap();
    assert_eq!(stats.original_size, 9000);
    assert_eq!(stats.compressed_size, container.len() as u64);
    let expected = stats.original_size as f64 / stats.compressed_size as f64;
    assert!((stats.compression_ratio - expected).abs() < 1e-9);
    assert!(stats.processing_time >= 0.0);
}

#[test]
fn huffman_compresses_skewed_text() {
    let data = compressible_bytes(50_000);
    let (_, stats) = compress(&data, Algorithm::Huffman).unwrap();
    assert!(
        stats.compression_ratio > 1.0,
        "english-like text should shrink under huffman, ratio={}",
        stats.compression_ratio
    );
}

#[test]
fn rle_worst_case_stays_within_double() {
    let data: Vec<u8> = (0..10_000).map(|i| (i % 2) as u8).collect();
    let (container, _) = compress(&data, Algorithm::Rle).unwrap();
    assert!(container.len() <= HEADER_SIZE + 2 * data.len());
}

// ── Determinism ────────────────────────────────────────────────────────────

#[test]
fn identical_input_yields_identical_containers() {
    let data = pseudo_random_bytes(32 * 1024, 42);
    for algorithm in [Algorithm::Rle, Algorithm::Huffman] {
        let (a, _) = compress(&data, algorithm).unwrap();
        let (b, _) = compress(&data, algorithm).unwrap();
        assert_eq!(a, b, "{algorithm} output must be byte-identical");
    }
}

// ── Corruption detection ───────────────────────────────────────────────────

#[test]
fn truncated_container_never_silently_succeeds() {
    let data = pseudo_random_bytes(4096, 7);
    for algorithm in [Algorithm::Rle, Algorithm::Huffman] {
        let (container, _) = compress(&data, algorithm).unwrap();
        let truncated = &container[..container.len() - 1];
        let err = decompress(truncated).unwrap_err();
        assert!(
            matches!(
                err,
                EngineError::CorruptStream(_) | EngineError::InvalidContainer(_)
            ),
            "{algorithm} truncation produced {err:?}"
        );
    }
}

#[test]
fn short_buffer_is_invalid_container() {
    let err = decompress(&[0u8; HEADER_SIZE - 1]).unwrap_err();
    assert!(matches!(err, EngineError::InvalidContainer(_)));
}

#[test]
fn unknown_algorithm_id_is_unsupported() {
    let (mut container, _) = compress(b"payload", Algorithm::Rle).unwrap();
    container[0] = 0x7F;
    let err = decompress(&container).unwrap_err();
    assert!(matches!(err, EngineError::UnsupportedAlgorithm(_)));
}

#[test]
fn metadata_overrun_is_invalid_container() {
    let (mut container, _) = compress(b"payload", Algorithm::Huffman).unwrap();
    // Inflate metadata_length past the end of the buffer.
    container[9..13].copy_from_slice(&u32::MAX.to_le_bytes());
    let err = decompress(&container).unwrap_err();
    assert!(matches!(err, EngineError::InvalidContainer(_)));
}

#[test]
fn forged_original_length_is_rejected() {
    // A header declaring an absurd original_length must come back as a typed
    // error; the decoders must not size buffers from the untrusted value.
    let data = compressible_bytes(1024);
    for algorithm in [Algorithm::Rle, Algorithm::Huffman] {
        let (mut container, _) = compress(&data, algorithm).unwrap();
        container[1..9].copy_from_slice(&(1u64 << 60).to_le_bytes());
        let err = decompress(&container).unwrap_err();
        assert!(
            matches!(err, EngineError::CorruptStream(_)),
            "{algorithm} forged length produced {err:?}"
        );
    }
}

#[test]
fn declared_length_mismatch_is_corrupt() {
    let (mut container, _) = compress(b"AAAAABB", Algorithm::Rle).unwrap();
    // Claim one byte more than the pair stream reproduces.
    container[1..9].copy_from_slice(&8u64.to_le_bytes());
    let err = decompress(&container).unwrap_err();
    assert!(matches!(err, EngineError::CorruptStream(_)));
}
