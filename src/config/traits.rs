use crate::error::HueboxError;
use serde::{Deserialize, Serialize};

/// Trait for configuration sections
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<(), HueboxError>;
}

/// Shared range check so every section reports bounds the same way.
pub(crate) fn check_range<T>(section: &str, field: &str, value: T, min: T, max: T) -> Result<(), HueboxError>
where
    T: PartialOrd + std::fmt::Display,
{
    if value < min || value > max {
        return Err(HueboxError::Configuration(format!(
            "{}.{} must be between {} and {}, got {}",
            section, field, min, max, value
        )));
    }
    Ok(())
}
