use crate::config::{ConfigSection, EncodingConfig};
use crate::engines::encoding::{BitSlice, BitVector, FieldSpec};
use crate::error::{HueboxError, Result};

/// Number of fields in one box segment: four corners, then r, g, b, a.
pub const FIELDS_PER_BOX: usize = 8;

/// One decoded box segment. Values are raw field values, not pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BoxDescriptor {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
    pub r: u32,
    pub g: u32,
    pub b: u32,
    pub a: u32,
}

impl BoxDescriptor {
    fn from_fields(fields: &[u64; FIELDS_PER_BOX]) -> Self {
        // widths are capped at 16 bits by EncodingConfig, so these never truncate
        Self {
            x0: fields[0] as u32,
            y0: fields[1] as u32,
            x1: fields[2] as u32,
            y1: fields[3] as u32,
            r: fields[4] as u32,
            g: fields[5] as u32,
            b: fields[6] as u32,
            a: fields[7] as u32,
        }
    }

    fn to_fields(self) -> [u64; FIELDS_PER_BOX] {
        [
            self.x0 as u64,
            self.y0 as u64,
            self.x1 as u64,
            self.y1 as u64,
            self.r as u64,
            self.g as u64,
            self.b as u64,
            self.a as u64,
        ]
    }
}

/// How a genome splits into boxes: the box count plus the per-box field spec.
///
/// Fixed for a whole run and shared read-only by every evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenomeLayout {
    num_boxes: usize,
    bits_per_corner: u32,
    bits_per_color_channel: u32,
    box_spec: FieldSpec,
}

impl GenomeLayout {
    pub fn new(num_boxes: usize, bits_per_corner: u32, bits_per_color_channel: u32) -> Result<Self> {
        Self::from_config(&EncodingConfig {
            num_boxes,
            bits_per_corner,
            bits_per_color_channel,
        })
    }

    pub fn from_config(config: &EncodingConfig) -> Result<Self> {
        config.validate()?;

        let corner = config.bits_per_corner;
        let color = config.bits_per_color_channel;
        let box_spec = FieldSpec::new(vec![corner, corner, corner, corner, color, color, color, color])?;

        if box_spec.total_width() != config.bits_per_box() {
            return Err(HueboxError::Configuration(format!(
                "box field spec covers {} bits, expected {}",
                box_spec.total_width(),
                config.bits_per_box()
            )));
        }

        log::debug!(
            "Genome layout: {} boxes x {} bits = {} bits",
            config.num_boxes,
            box_spec.total_width(),
            config.total_bits()
        );

        Ok(Self {
            num_boxes: config.num_boxes,
            bits_per_corner: corner,
            bits_per_color_channel: color,
            box_spec,
        })
    }

    pub fn num_boxes(&self) -> usize {
        self.num_boxes
    }

    pub fn bits_per_corner(&self) -> u32 {
        self.bits_per_corner
    }

    pub fn bits_per_color_channel(&self) -> u32 {
        self.bits_per_color_channel
    }

    pub fn box_spec(&self) -> &FieldSpec {
        &self.box_spec
    }

    pub fn bits_per_box(&self) -> usize {
        self.box_spec.total_width()
    }

    pub fn total_bits(&self) -> usize {
        self.bits_per_box() * self.num_boxes
    }

    /// Largest corner field value, `2^bits_per_corner - 1`
    pub fn max_corner(&self) -> u32 {
        (1u32 << self.bits_per_corner) - 1
    }

    /// Largest color field value, `2^bits_per_color_channel - 1`
    pub fn max_color(&self) -> u32 {
        (1u32 << self.bits_per_color_channel) - 1
    }

    /// Rescales a color field to the 8-bit channel range, rounding to nearest.
    #[inline]
    pub fn color_to_u8(&self, value: u32) -> u8 {
        let max = self.max_color() as u64;
        ((value as u64 * 255 + max / 2) / max) as u8
    }

    pub fn check_genome(&self, bits: &BitVector) -> Result<()> {
        if bits.len() != self.total_bits() {
            return Err(HueboxError::GenomeLength {
                expected: self.total_bits(),
                actual: bits.len(),
            });
        }
        Ok(())
    }

    /// Bits `[index * bits_per_box, (index + 1) * bits_per_box)` of the genome.
    pub fn box_segment<'a>(&self, bits: &'a BitVector, index: usize) -> Result<BitSlice<'a>> {
        let width = self.bits_per_box();
        bits.slice(index * width, width)
    }

    pub fn decode_box(&self, segment: BitSlice<'_>) -> Result<BoxDescriptor> {
        let mut fields = [0u64; FIELDS_PER_BOX];
        self.box_spec.decode_into(segment, &mut fields)?;
        Ok(BoxDescriptor::from_fields(&fields))
    }

    /// Decodes every box, in genome order.
    pub fn decode_boxes(&self, bits: &BitVector) -> Result<Vec<BoxDescriptor>> {
        self.check_genome(bits)?;
        (0..self.num_boxes)
            .map(|i| self.decode_box(self.box_segment(bits, i)?))
            .collect()
    }

    pub fn encode_box(&self, descriptor: &BoxDescriptor) -> Result<BitVector> {
        self.box_spec.encode(&descriptor.to_fields())
    }

    /// Builds a full genome from exactly `num_boxes` descriptors.
    pub fn encode_boxes(&self, descriptors: &[BoxDescriptor]) -> Result<BitVector> {
        if descriptors.len() != self.num_boxes {
            return Err(HueboxError::Configuration(format!(
                "layout holds {} boxes, got {} descriptors",
                self.num_boxes,
                descriptors.len()
            )));
        }
        let segments = descriptors
            .iter()
            .map(|d| self.encode_box(d))
            .collect::<Result<Vec<_>>>()?;
        Ok(BitVector::concat(&segments))
    }
}
