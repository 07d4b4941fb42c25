//! Huffman codec with a canonical code table.
//!
//! Encoding stages: frequency count over the 256 byte values, min-heap tree
//! build, code lengths from leaf depth, canonical code assignment from the
//! lengths, then bit-packed payload emission. Only the `(symbol, length)`
//! pairs travel in the container metadata — both sides derive identical
//! canonical codes from the lengths, so the table stays small and the
//! decoder never re-runs frequency analysis.
//!
//! Determinism: heap ties on frequency are broken by node creation order
//! (earlier node pops first), so code lengths — and therefore the canonical
//! codes and the whole container — are identical across runs on the same
//! input.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use bytepress_core::bits::{BitReader, BitWriter};
use bytepress_core::codec::{Codec, CodecMeta};
use bytepress_core::format::ALGO_HUFFMAN;
use bytepress_core::EngineError;

/// Code lengths beyond this would overflow the canonical accumulator. A
/// length this deep needs a payload above fib(65) bytes, far past anything
/// that fits in memory, so the bound only guards table parsing.
const MAX_CODE_LEN: u8 = 63;

pub struct HuffmanCodec;

impl Codec for HuffmanCodec {
    fn id(&self) -> u8 {
        ALGO_HUFFMAN
    }

    fn name(&self) -> &'static str {
        "huffman"
    }

    fn encode(&self, raw: &[u8], meta: &mut CodecMeta) -> Result<Vec<u8>, EngineError> {
        if raw.is_empty() {
            return Ok(Vec::new());
        }

        let freqs = byte_frequencies(raw);
        let lengths = code_lengths(&freqs);
        let codes = canonical_codes(&lengths)?;
        meta.table = serialize_table(&lengths);

        // Dense per-symbol lookup for the emission loop.
        let mut by_symbol = [(0u64, 0u8); 256];
        for &(symbol, code, len) in &codes {
            by_symbol[symbol as usize] = (code, len);
        }

        let total_bits: u64 = raw
            .iter()
            .map(|&b| by_symbol[b as usize].1 as u64)
            .sum();
        let mut writer = BitWriter::with_capacity((total_bits as usize + 7) / 8);
        for &byte in raw {
            let (code, len) = by_symbol[byte as usize];
            for shift in (0..len).rev() {
                writer.push_bit(code >> shift & 1 == 1);
            }
        }

        let (payload, _) = writer.finish();
        Ok(payload)
    }

    fn decode(
        &self,
        payload: &[u8],
        meta: &CodecMeta,
        original_length: u64,
    ) -> Result<Vec<u8>, EngineError> {
        if original_length == 0 {
            return Ok(Vec::new());
        }

        let lengths = parse_table(&meta.table)?;
        let codes = canonical_codes(&lengths)?;
        let tree = DecodeTree::build(&codes)?;

        let mut reader = BitReader::new(payload, payload.len() as u64 * 8);
        // The header's original_length is untrusted; every decoded byte
        // consumes at least one payload bit, so cap the preallocation there.
        // A forged length exhausts the reader and fails as a corrupt stream.
        let max_possible = payload.len() as u64 * 8;
        let mut out = Vec::with_capacity(original_length.min(max_possible) as usize);
        for _ in 0..original_length {
            out.push(tree.next_symbol(&mut reader)?);
        }
        Ok(out)
    }
}

// ── Frequency analysis and tree build ──────────────────────────────────────

fn byte_frequencies(raw: &[u8]) -> [u64; 256] {
    let mut freqs = [0u64; 256];
    for &byte in raw {
        freqs[byte as usize] += 1;
    }
    freqs
}

struct Node {
    freq: u64,
    symbol: Option<u8>,
    children: Option<(usize, usize)>,
}

/// Build per-symbol code lengths from the frequency table.
///
/// Returns `(symbol, length)` pairs sorted by `(length, symbol)` — the
/// canonical order the table is serialized in. A payload with a single
/// distinct byte gets the degenerate 1-bit code so the bit writer has a
/// valid unit to emit per occurrence.
fn code_lengths(freqs: &[u64; 256]) -> Vec<(u8, u8)> {
    // Arena index doubles as creation order for the tie-break.
    let mut arena: Vec<Node> = Vec::new();
    let mut heap: BinaryHeap<Reverse<(u64, usize)>> = BinaryHeap::new();

    for (symbol, &freq) in freqs.iter().enumerate() {
        if freq > 0 {
            let idx = arena.len();
            arena.push(Node {
                freq,
                symbol: Some(symbol as u8),
                children: None,
            });
            heap.push(Reverse((freq, idx)));
        }
    }

    let mut lengths: Vec<(u8, u8)> = Vec::new();

    if arena.len() == 1 {
        lengths.push((arena[0].symbol.unwrap_or(0), 1));
        return lengths;
    }

    while heap.len() > 1 {
        let Reverse((lo_freq, lo_idx)) = heap.pop().unwrap_or(Reverse((0, 0)));
        let Reverse((hi_freq, hi_idx)) = heap.pop().unwrap_or(Reverse((0, 0)));
        let idx = arena.len();
        arena.push(Node {
            freq: lo_freq + hi_freq,
            symbol: None,
            children: Some((lo_idx, hi_idx)),
        });
        heap.push(Reverse((lo_freq + hi_freq, idx)));
    }

    // Leaf depth = code length.
    if let Some(Reverse((_, root))) = heap.pop() {
        let mut stack = vec![(root, 0u8)];
        while let Some((idx, depth)) = stack.pop() {
            let node = &arena[idx];
            match (node.symbol, node.children) {
                (Some(symbol), _) => lengths.push((symbol, depth)),
                (None, Some((left, right))) => {
                    stack.push((left, depth + 1));
                    stack.push((right, depth + 1));
                }
                (None, None) => {}
            }
        }
    }

    lengths.sort_unstable_by_key(|&(symbol, len)| (len, symbol));
    lengths
}

// ── Canonical codes ────────────────────────────────────────────────────────

/// Assign canonical codes to `(symbol, length)` entries sorted by
/// `(length, symbol)`. Returns `(symbol, code, length)` triples.
///
/// Shared by encoder and decoder so both sides compute the identical,
/// prefix-free mapping from the lengths alone. Fails with `CorruptStream`
/// when the entries cannot form a valid prefix code (unsorted table, zero or
/// oversized lengths, oversubscribed length set).
fn canonical_codes(entries: &[(u8, u8)]) -> Result<Vec<(u8, u64, u8)>, EngineError> {
    let mut codes = Vec::with_capacity(entries.len());
    let mut code: u64 = 0;
    let mut prev_len: u8 = 0;

    for &(symbol, len) in entries {
        if len == 0 || len > MAX_CODE_LEN {
            return Err(EngineError::CorruptStream(format!(
                "invalid Huffman code length {len} for symbol {symbol}"
            )));
        }
        if len < prev_len {
            return Err(EngineError::CorruptStream(
                "Huffman table entries not in canonical order".to_string(),
            ));
        }
        code <<= len - prev_len;
        if code >> len != 0 {
            return Err(EngineError::CorruptStream(
                "Huffman code lengths oversubscribe the code space".to_string(),
            ));
        }
        codes.push((symbol, code, len));
        code += 1;
        prev_len = len;
    }

    Ok(codes)
}

// ── Symbol table serialization ─────────────────────────────────────────────
// Layout: count:u16 LE, then count x (symbol:u8, length:u8) in canonical
// order. 2 + 2n bytes total, at most 514.

fn serialize_table(lengths: &[(u8, u8)]) -> Vec<u8> {
    let mut table = Vec::with_capacity(2 + 2 * lengths.len());
    table.extend_from_slice(&(lengths.len() as u16).to_le_bytes());
    for &(symbol, len) in lengths {
        table.push(symbol);
        table.push(len);
    }
    table
}

fn parse_table(table: &[u8]) -> Result<Vec<(u8, u8)>, EngineError> {
    if table.len() < 2 {
        return Err(EngineError::CorruptStream(
            "Huffman table shorter than its count field".to_string(),
        ));
    }
    let count = u16::from_le_bytes([table[0], table[1]]) as usize;
    if count == 0 || count > 256 {
        return Err(EngineError::CorruptStream(format!(
            "Huffman table claims {count} symbols"
        )));
    }
    if table.len() != 2 + 2 * count {
        return Err(EngineError::CorruptStream(format!(
            "Huffman table length {} does not match {count} entries",
            table.len()
        )));
    }

    let mut seen = [false; 256];
    let mut entries = Vec::with_capacity(count);
    for pair in table[2..].chunks_exact(2) {
        let (symbol, len) = (pair[0], pair[1]);
        if seen[symbol as usize] {
            return Err(EngineError::CorruptStream(format!(
                "Huffman table repeats symbol {symbol}"
            )));
        }
        seen[symbol as usize] = true;
        entries.push((symbol, len));
    }
    Ok(entries)
}

// ── Decoding ───────────────────────────────────────────────────────────────

struct DecodeNode {
    children: [Option<usize>; 2],
    symbol: Option<u8>,
}

/// Binary decode tree rebuilt from the canonical codes; walking it bit by
/// bit yields one symbol per leaf.
struct DecodeTree {
    nodes: Vec<DecodeNode>,
}

impl DecodeTree {
    fn build(codes: &[(u8, u64, u8)]) -> Result<Self, EngineError> {
        let mut nodes = vec![DecodeNode {
            children: [None, None],
            symbol: None,
        }];

        for &(symbol, code, len) in codes {
            let mut idx = 0usize;
            for shift in (0..len).rev() {
                if nodes[idx].symbol.is_some() {
                    return Err(EngineError::CorruptStream(
                        "Huffman code is prefixed by another code".to_string(),
                    ));
                }
                let bit = (code >> shift & 1) as usize;
                idx = match nodes[idx].children[bit] {
                    Some(child) => child,
                    None => {
                        let child = nodes.len();
                        nodes.push(DecodeNode {
                            children: [None, None],
                            symbol: None,
                        });
                        nodes[idx].children[bit] = Some(child);
                        child
                    }
                };
            }
            if nodes[idx].symbol.is_some() || nodes[idx].children.iter().any(Option::is_some) {
                return Err(EngineError::CorruptStream(
                    "Huffman code collides with another code".to_string(),
                ));
            }
            nodes[idx].symbol = Some(symbol);
        }

        Ok(Self { nodes })
    }

    /// Walk bits until a leaf is reached. Exhausting the payload mid-code is
    /// a truncated stream, reported as `CorruptStream`.
    fn next_symbol(&self, reader: &mut BitReader<'_>) -> Result<u8, EngineError> {
        let mut idx = 0usize;
        loop {
            if let Some(symbol) = self.nodes[idx].symbol {
                return Ok(symbol);
            }
            let bit = reader.read_bit().map_err(|_| {
                EngineError::CorruptStream(
                    "Huffman bit stream exhausted before original length was produced".to_string(),
                )
            })? as usize;
            idx = self.nodes[idx].children[bit].ok_or_else(|| {
                EngineError::CorruptStream("Huffman bit sequence matches no code".to_string())
            })?;
        }
    }
}
