//! Bit-level reader and writer over in-memory byte buffers.
//!
//! Bits flow most-significant-first: the first bit pushed lands in the high
//! bit of the first byte. The writer reports how many bits were actually
//! written so a reader can be bounded by the real bit count instead of
//! mistaking flush padding for data.

use crate::error::EngineError;

/// Accumulates bits MSB-first into a growable byte buffer.
pub struct BitWriter {
    bytes: Vec<u8>,
    /// Bits staged in the current partial byte, left-aligned.
    current: u8,
    /// Valid bit count in `current`, 0..8.
    used: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self {
            bytes: Vec::new(),
            current: 0,
            used: 0,
        }
    }

    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
            current: 0,
            used: 0,
        }
    }

    /// Append a single bit.
    pub fn push_bit(&mut self, bit: bool) {
        if bit {
            self.current |= 0x80 >> self.used;
        }
        self.used += 1;
        if self.used == 8 {
            self.bytes.push(self.current);
            self.current = 0;
            self.used = 0;
        }
    }

    /// Append the low `n` bits of `value`, most significant first. `n <= 32`.
    pub fn push_bits(&mut self, value: u32, n: u8) {
        debug_assert!(n <= 32);
        for shift in (0..n).rev() {
            self.push_bit(value >> shift & 1 == 1);
        }
    }

    /// Total bits written so far.
    pub fn bit_len(&self) -> u64 {
        self.bytes.len() as u64 * 8 + self.used as u64
    }

    /// Pad the final partial byte with zero bits and return the buffer along
    /// with the count of meaningful bits (padding excluded).
    pub fn finish(mut self) -> (Vec<u8>, u64) {
        let bit_len = self.bit_len();
        if self.used > 0 {
            self.bytes.push(self.current);
        }
        (self.bytes, bit_len)
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Consumes bits MSB-first from a byte buffer, bounded by an explicit bit
/// count so trailing pad bits are never surfaced as data.
pub struct BitReader<'a> {
    bytes: &'a [u8],
    bit_len: u64,
    pos: u64,
}

impl<'a> BitReader<'a> {
    /// `bit_len` is the number of meaningful bits in `bytes`; it must not
    /// exceed `bytes.len() * 8`.
    pub fn new(bytes: &'a [u8], bit_len: u64) -> Self {
        debug_assert!(bit_len <= bytes.len() as u64 * 8);
        Self {
            bytes,
            bit_len,
            pos: 0,
        }
    }

    /// Bits left before the declared count is exhausted.
    pub fn remaining(&self) -> u64 {
        self.bit_len - self.pos
    }

    /// Read one bit, or fail with [`EngineError::OutOfData`].
    pub fn read_bit(&mut self) -> Result<bool, EngineError> {
        if self.pos >= self.bit_len {
            return Err(EngineError::OutOfData {
                requested: 1,
                remaining: 0,
            });
        }
        let byte = self.bytes[(self.pos / 8) as usize];
        let bit = byte >> (7 - (self.pos % 8) as u8) & 1 == 1;
        self.pos += 1;
        Ok(bit)
    }

    /// Read `n` bits (`n <= 32`) as an unsigned value, most significant first.
    pub fn read_bits(&mut self, n: u8) -> Result<u32, EngineError> {
        debug_assert!(n <= 32);
        if self.remaining() < n as u64 {
            return Err(EngineError::OutOfData {
                requested: n as u32,
                remaining: self.remaining(),
            });
        }
        let mut value = 0u32;
        for _ in 0..n {
            value = value << 1 | self.read_bit()? as u32;
        }
        Ok(value)
    }
}
