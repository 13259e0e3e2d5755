use super::traits::{check_range, ConfigSection};
use crate::error::HueboxError;
use serde::{Deserialize, Serialize};

/// Widths that fix how a genome is carved into boxes.
///
/// Each box is four corner coordinates followed by four color channels
/// (red, green, blue, alpha), so a box occupies
/// `4 * bits_per_corner + 4 * bits_per_color_channel` bits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingConfig {
    pub num_boxes: usize,
    /// 12 bits gives a corner domain of 0..=4095
    pub bits_per_corner: u32,
    /// 8 bits gives a channel domain of 0..=255
    pub bits_per_color_channel: u32,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            num_boxes: 30,
            bits_per_corner: 12,
            bits_per_color_channel: 8,
        }
    }
}

impl EncodingConfig {
    pub fn bits_per_box(&self) -> usize {
        (self.bits_per_corner as usize + self.bits_per_color_channel as usize) * 4
    }

    pub fn total_bits(&self) -> usize {
        self.bits_per_box() * self.num_boxes
    }
}

impl ConfigSection for EncodingConfig {
    fn section_name() -> &'static str {
        "encoding"
    }

    fn validate(&self) -> Result<(), HueboxError> {
        if self.num_boxes == 0 {
            return Err(HueboxError::Configuration(
                "encoding.num_boxes must be at least 1".to_string()
            ));
        }
        check_range(Self::section_name(), "bits_per_corner", self.bits_per_corner, 1, 16)?;
        check_range(Self::section_name(), "bits_per_color_channel", self.bits_per_color_channel, 1, 16)?;
        Ok(())
    }
}
