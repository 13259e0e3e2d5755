use super::traits::ConfigSection;
use crate::error::HueboxError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Overwritten with a PNG of every new elite
    pub elite_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            elite_path: PathBuf::from("elite.png"),
        }
    }
}

impl ConfigSection for OutputConfig {
    fn section_name() -> &'static str {
        "output"
    }

    fn validate(&self) -> Result<(), HueboxError> {
        if self.elite_path.as_os_str().is_empty() {
            return Err(HueboxError::Configuration(
                "output.elite_path must not be empty".to_string()
            ));
        }
        Ok(())
    }
}
