use super::bits::{BitSlice, BitVector, BitVectorBuilder};
use super::field_consumer::FieldConsumer;
use crate::error::{HueboxError, Result};

/// Ordered list of field widths describing how a bit segment splits into
/// unsigned integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    widths: Vec<u32>,
    total_width: usize,
}

impl FieldSpec {
    pub fn new(widths: Vec<u32>) -> Result<Self> {
        if widths.is_empty() {
            return Err(HueboxError::Configuration(
                "field spec must contain at least one field".to_string()
            ));
        }
        if let Some(&bad) = widths.iter().find(|&&w| w == 0 || w > 64) {
            return Err(HueboxError::Configuration(format!(
                "field width must be between 1 and 64 bits, got {}",
                bad
            )));
        }
        let total_width = widths.iter().map(|&w| w as usize).sum();
        Ok(Self { widths, total_width })
    }

    pub fn widths(&self) -> &[u32] {
        &self.widths
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Sum of all widths, i.e. the exact segment length this spec decodes
    pub fn total_width(&self) -> usize {
        self.total_width
    }

    pub fn decode(&self, bits: BitSlice<'_>) -> Result<Vec<u64>> {
        let mut out = vec![0u64; self.widths.len()];
        self.decode_into(bits, &mut out)?;
        Ok(out)
    }

    /// Allocation-free decode; `out` must have one slot per field.
    pub fn decode_into(&self, bits: BitSlice<'_>, out: &mut [u64]) -> Result<()> {
        if bits.len() != self.total_width {
            return Err(HueboxError::FieldWidthMismatch {
                expected: self.total_width,
                actual: bits.len(),
            });
        }
        if out.len() != self.widths.len() {
            return Err(HueboxError::Configuration(format!(
                "decode buffer holds {} fields, spec has {}",
                out.len(),
                self.widths.len()
            )));
        }

        let mut consumer = FieldConsumer::new(bits);
        for (slot, &width) in out.iter_mut().zip(&self.widths) {
            *slot = consumer.consume(width)?;
        }
        Ok(())
    }

    /// Inverse of [`FieldSpec::decode`].
    pub fn encode(&self, values: &[u64]) -> Result<BitVector> {
        if values.len() != self.widths.len() {
            return Err(HueboxError::Configuration(format!(
                "expected {} field values, got {}",
                self.widths.len(),
                values.len()
            )));
        }

        let mut builder = BitVectorBuilder::with_capacity(self.total_width);
        for (&value, &width) in values.iter().zip(&self.widths) {
            if width < 64 && value >> width != 0 {
                return Err(HueboxError::FieldOverflow { value, width });
            }
            builder.push_bits(value, width);
        }
        Ok(builder.finish())
    }
}
