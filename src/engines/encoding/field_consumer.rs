use super::bits::BitSlice;
use crate::error::Result;

/// Deterministically consumes fixed-width fields from a bit view, left to right
pub struct FieldConsumer<'a> {
    bits: BitSlice<'a>,
    position: usize,
}

impl<'a> FieldConsumer<'a> {
    pub fn new(bits: BitSlice<'a>) -> Self {
        Self { bits, position: 0 }
    }

    /// Consume the next `width` bits as an unsigned integer.
    ///
    /// Running past the end is an error; the consumer never wraps or pads.
    pub fn consume(&mut self, width: u32) -> Result<u64> {
        let value = self.bits.read_bits(self.position, width)?;
        self.position += width as usize;
        Ok(value)
    }

    pub fn remaining(&self) -> usize {
        self.bits.len() - self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    pub fn position(&self) -> usize {
        self.position
    }
}
