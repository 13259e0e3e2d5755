use super::traits::ConfigSection;
use crate::error::HueboxError;
use serde::{Deserialize, Serialize};

/// Run-wide settings shared with the search engine that drives evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    /// Completed generations after which the stop predicate fires
    pub max_iterations: u64,
    /// Size of the rayon pool used for population evaluation
    pub worker_threads: usize,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_iterations: 99_999_999,
            worker_threads: 6,
        }
    }
}

impl EvolutionConfig {
    /// Builds the evaluation pool. Worker threads are named `huebox-eval-{i}`.
    pub fn build_thread_pool(&self) -> Result<rayon::ThreadPool, HueboxError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.worker_threads)
            .thread_name(|i| format!("huebox-eval-{i}"))
            .build()?;
        Ok(pool)
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), HueboxError> {
        if self.population_size == 0 {
            return Err(HueboxError::Configuration(
                "Population size must be at least 1".to_string()
            ));
        }
        if self.max_iterations == 0 {
            return Err(HueboxError::Configuration(
                "Max iterations must be at least 1".to_string()
            ));
        }
        if self.worker_threads == 0 {
            return Err(HueboxError::Configuration(
                "Worker threads must be at least 1".to_string()
            ));
        }
        Ok(())
    }
}
