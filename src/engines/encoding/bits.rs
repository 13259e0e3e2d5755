use crate::error::{HueboxError, Result};
use std::fmt;
use std::sync::Arc;

const WORD_BITS: usize = 64;

#[inline]
fn low_mask(width: usize) -> u64 {
    if width >= WORD_BITS {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

#[inline]
fn words_for(len: usize) -> usize {
    (len + WORD_BITS - 1) / WORD_BITS
}

/// Immutable, fixed-length bit array.
///
/// Bit `i` lives in word `i / 64` at position `63 - i % 64`, so reading a run
/// of bits left to right yields the most significant bit first. Bits past
/// `len` in the last word are always zero. Storage is reference counted, so
/// cloning a genome's bits is cheap and never aliases mutably.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitVector {
    words: Arc<[u64]>,
    len: usize,
}

impl BitVector {
    /// All-zero vector of `len` bits
    pub fn zeros(len: usize) -> Self {
        Self {
            words: vec![0u64; words_for(len)].into(),
            len,
        }
    }

    pub fn from_bools<I: IntoIterator<Item = bool>>(bits: I) -> Self {
        let mut builder = BitVectorBuilder::new();
        for bit in bits {
            builder.push_bit(bit);
        }
        builder.finish()
    }

    /// Every byte contributes eight bits, most significant first.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut builder = BitVectorBuilder::with_capacity(bytes.len() * 8);
        for &byte in bytes {
            builder.push_bits(byte as u64, 8);
        }
        builder.finish()
    }

    /// Joins vectors end to end.
    pub fn concat<'a, I>(parts: I) -> Self
    where
        I: IntoIterator<Item = &'a BitVector>,
    {
        let mut builder = BitVectorBuilder::new();
        for part in parts {
            builder.extend_from_slice(part.as_slice());
        }
        builder.finish()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some(self.bit_unchecked(index))
    }

    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.bit_unchecked(i))
    }

    /// View over the whole vector
    pub fn as_slice(&self) -> BitSlice<'_> {
        BitSlice {
            source: self,
            offset: 0,
            len: self.len,
        }
    }

    /// View over `len` bits starting at `offset`, addressed from zero.
    pub fn slice(&self, offset: usize, len: usize) -> Result<BitSlice<'_>> {
        self.as_slice().slice(offset, len)
    }

    #[inline]
    fn bit_unchecked(&self, index: usize) -> bool {
        let word = self.words[index / WORD_BITS];
        (word >> (WORD_BITS - 1 - index % WORD_BITS)) & 1 == 1
    }

    /// Reads `width` (1..=64) bits at absolute position `offset`, MSB first.
    /// Callers have already checked `offset + width <= len`.
    #[inline]
    fn read_unchecked(&self, offset: usize, width: usize) -> u64 {
        let mut value = 0u64;
        let mut pos = offset;
        let mut remaining = width;

        while remaining > 0 {
            let word = self.words[pos / WORD_BITS];
            let bit_in_word = pos % WORD_BITS;
            let take = (WORD_BITS - bit_in_word).min(remaining);
            let chunk = (word >> (WORD_BITS - bit_in_word - take)) & low_mask(take);

            value = if take == WORD_BITS { chunk } else { (value << take) | chunk };
            remaining -= take;
            pos += take;
        }

        value
    }
}

impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitVector({} bits, {} set)", self.len, self.count_ones())
    }
}

impl FromIterator<bool> for BitVector {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self::from_bools(iter)
    }
}

/// Borrowed window into a [`BitVector`].
///
/// Positions are relative to the start of the window, so a box segment carved
/// out of a genome decodes exactly like a standalone vector.
#[derive(Clone, Copy)]
pub struct BitSlice<'a> {
    source: &'a BitVector,
    offset: usize,
    len: usize,
}

impl<'a> BitSlice<'a> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some(self.source.bit_unchecked(self.offset + index))
    }

    /// Narrower view; `offset` is relative to this view.
    pub fn slice(&self, offset: usize, len: usize) -> Result<BitSlice<'a>> {
        let end = offset.checked_add(len);
        match end {
            Some(end) if end <= self.len => Ok(BitSlice {
                source: self.source,
                offset: self.offset + offset,
                len,
            }),
            _ => Err(HueboxError::SliceOutOfBounds {
                offset,
                len,
                source_len: self.len,
            }),
        }
    }

    /// Unsigned value of `width` bits at `offset`, most significant bit first.
    pub fn read_bits(&self, offset: usize, width: u32) -> Result<u64> {
        if width == 0 || width as usize > WORD_BITS {
            return Err(HueboxError::Configuration(format!(
                "field width must be between 1 and 64 bits, got {}",
                width
            )));
        }
        // bounds check through slice() so errors read the same everywhere
        let window = self.slice(offset, width as usize)?;
        Ok(self.source.read_unchecked(window.offset, width as usize))
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + 'a {
        let source = self.source;
        (self.offset..self.offset + self.len).map(move |i| source.bit_unchecked(i))
    }

    /// Detaches the view into an owned vector.
    pub fn to_bit_vector(&self) -> BitVector {
        let mut builder = BitVectorBuilder::with_capacity(self.len);
        builder.extend_from_slice(*self);
        builder.finish()
    }
}

impl fmt::Debug for BitSlice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitSlice(offset {}, {} bits)", self.offset, self.len)
    }
}

/// Append-only staging area; the only way bits get written.
#[derive(Debug, Default)]
pub struct BitVectorBuilder {
    words: Vec<u64>,
    len: usize,
}

impl BitVectorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self {
            words: Vec::with_capacity(words_for(bits)),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push_bit(&mut self, bit: bool) {
        let bit_in_word = self.len % WORD_BITS;
        if bit_in_word == 0 {
            self.words.push(0);
        }
        if bit {
            if let Some(last) = self.words.last_mut() {
                *last |= 1u64 << (WORD_BITS - 1 - bit_in_word);
            }
        }
        self.len += 1;
    }

    /// Appends the low `width` bits of `value`, most significant first.
    pub fn push_bits(&mut self, value: u64, width: u32) {
        for shift in (0..width).rev() {
            self.push_bit((value >> shift) & 1 == 1);
        }
    }

    pub fn extend_from_slice(&mut self, bits: BitSlice<'_>) {
        for bit in bits.iter() {
            self.push_bit(bit);
        }
    }

    pub fn finish(self) -> BitVector {
        BitVector {
            words: self.words.into(),
            len: self.len,
        }
    }
}
