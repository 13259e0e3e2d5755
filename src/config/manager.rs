use super::{
    encoding::EncodingConfig,
    evolution::EvolutionConfig,
    output::OutputConfig,
    traits::ConfigSection,
};
use crate::error::HueboxError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix for environment overrides, e.g. `HUEBOX_ENCODING__NUM_BOXES=50`.
pub const ENV_PREFIX: &str = "HUEBOX";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub encoding: EncodingConfig,
    pub evolution: EvolutionConfig,
    pub output: OutputConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), HueboxError> {
        self.encoding.validate()?;
        self.evolution.validate()?;
        self.output.validate()?;
        Ok(())
    }
}

/// Owns the run configuration until the run starts.
///
/// Everything is fixed once evaluation begins: the manager hands out shared
/// references and `update` needs `&mut self`.
#[derive(Debug, Default)]
pub struct ConfigManager {
    config: AppConfig,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a TOML file, applies `HUEBOX_*` environment overrides and validates.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, HueboxError> {
        let path = path.as_ref();
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path).format(::config::FileFormat::Toml))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;

        log::debug!("Loaded configuration from {}: {:?}", path.display(), config);
        Ok(Self { config })
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), HueboxError> {
        let toml_str = toml::to_string_pretty(&self.config)?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn get(&self) -> &AppConfig {
        &self.config
    }

    /// Applies `f` and keeps the result only if it validates.
    pub fn update<F>(&mut self, f: F) -> Result<(), HueboxError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.config.clone();
        f(&mut candidate);
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }

    pub fn into_inner(self) -> AppConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    // loads read process-wide env vars, so loader tests run one at a time
    static LOADER_LOCK: Mutex<()> = Mutex::new(());

    fn loader_lock() -> MutexGuard<'static, ()> {
        LOADER_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[test]
    fn test_defaults_match_reference_run() {
        let config = AppConfig::default();
        assert_eq!(config.encoding.num_boxes, 30);
        assert_eq!(config.encoding.bits_per_corner, 12);
        assert_eq!(config.encoding.bits_per_color_channel, 8);
        assert_eq!(config.encoding.bits_per_box(), 80);
        assert_eq!(config.encoding.total_bits(), 2400);
        assert_eq!(config.evolution.population_size, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_then_load_preserves_values() {
        let _guard = loader_lock();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huebox.toml");

        let mut manager = ConfigManager::new();
        manager
            .update(|c| {
                c.encoding.num_boxes = 12;
                c.evolution.max_iterations = 500;
            })
            .unwrap();
        manager.save_to_file(&path).unwrap();

        let loaded = ConfigManager::load_from_file(&path).unwrap();
        assert_eq!(loaded.get(), manager.get());
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let _guard = loader_lock();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[encoding]\nnum_boxes = 7\n").unwrap();

        let loaded = ConfigManager::load_from_file(&path).unwrap();
        assert_eq!(loaded.get().encoding.num_boxes, 7);
        assert_eq!(loaded.get().encoding.bits_per_corner, 12);
        assert_eq!(loaded.get().evolution, EvolutionConfig::default());
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let _guard = loader_lock();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[encoding]\nbits_per_corner = 40\n").unwrap();

        let err = ConfigManager::load_from_file(&path).unwrap_err();
        assert!(matches!(err, HueboxError::Configuration(_)));
    }

    #[test]
    fn test_rejected_update_keeps_previous_config() {
        let mut manager = ConfigManager::new();
        let result = manager.update(|c| c.evolution.worker_threads = 0);

        assert!(result.is_err());
        assert_eq!(manager.get().evolution.worker_threads, 6);
    }

    #[test]
    fn test_env_override_wins_over_file() {
        let _guard = loader_lock();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("env.toml");
        std::fs::write(&path, "[encoding]\nnum_boxes = 7\n").unwrap();

        std::env::set_var("HUEBOX_ENCODING__NUM_BOXES", "50");
        let loaded = ConfigManager::load_from_file(&path);
        std::env::remove_var("HUEBOX_ENCODING__NUM_BOXES");

        let loaded = loaded.unwrap();
        assert_eq!(loaded.get().encoding.num_boxes, 50);
        assert_eq!(loaded.get().encoding.bits_per_corner, 12);
    }
}
