//! Byte-oriented run-length codec.
//!
//! The encoded stream is a sequence of `(count, value)` byte pairs with
//! `count` in 1..=255; runs longer than 255 split into consecutive pairs.
//! Because the scheme never interprets the value byte, it is unambiguous for
//! arbitrary binary data with no escape characters, and a stream with no two
//! adjacent equal bytes expands to exactly 2x — the hard worst case.

use bytepress_core::codec::{Codec, CodecMeta};
use bytepress_core::format::ALGO_RLE;
use bytepress_core::EngineError;

const MAX_RUN: u8 = u8::MAX;

pub struct RleCodec;

impl Codec for RleCodec {
    fn id(&self) -> u8 {
        ALGO_RLE
    }

    fn name(&self) -> &'static str {
        "rle"
    }

    fn encode(&self, raw: &[u8], _meta: &mut CodecMeta) -> Result<Vec<u8>, EngineError> {
        let Some((&first, rest)) = raw.split_first() else {
            return Ok(Vec::new());
        };

        let mut out = Vec::new();
        let mut value = first;
        let mut count: u8 = 1;

        for &byte in rest {
            if byte == value && count < MAX_RUN {
                count += 1;
            } else {
                out.push(count);
                out.push(value);
                value = byte;
                count = 1;
            }
        }
        out.push(count);
        out.push(value);

        Ok(out)
    }

    fn decode(
        &self,
        payload: &[u8],
        _meta: &CodecMeta,
        original_length: u64,
    ) -> Result<Vec<u8>, EngineError> {
        if payload.len() % 2 != 0 {
            return Err(EngineError::CorruptStream(
                "RLE stream has a dangling count byte with no value".to_string(),
            ));
        }

        // The header's original_length is untrusted; a pair stream of n bytes
        // can reproduce at most (n/2)*255 bytes, so cap the preallocation
        // there. A forged length is caught by the caller's length check.
        let max_possible = payload.len() as u64 / 2 * MAX_RUN as u64;
        let mut out = Vec::with_capacity(original_length.min(max_possible) as usize);
        for pair in payload.chunks_exact(2) {
            let (count, value) = (pair[0], pair[1]);
            if count == 0 {
                return Err(EngineError::CorruptStream(
                    "RLE run count of zero".to_string(),
                ));
            }
            out.resize(out.len() + count as usize, value);
        }

        Ok(out)
    }
}
