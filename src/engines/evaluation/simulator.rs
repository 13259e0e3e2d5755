use super::evaluator::FitnessEvaluator;
use crate::config::EvolutionConfig;
use crate::engines::generation::Genome;
use crate::error::Result;
use std::sync::atomic::{AtomicU64, Ordering};

/// The one capability a search engine needs from this crate: turn a genome
/// into a fitness and record it on the genome.
pub trait Simulator: Send + Sync {
    fn evaluate(&self, genome: &mut dyn Genome) -> Result<u64>;
}

impl Simulator for FitnessEvaluator {
    fn evaluate(&self, genome: &mut dyn Genome) -> Result<u64> {
        FitnessEvaluator::evaluate(self, genome)
    }
}

/// Engine-side termination check, consulted once per generation.
pub trait StopPredicate: Send + Sync {
    fn should_stop(&self) -> bool;
}

/// Stops once a fixed number of generations have completed.
#[derive(Debug)]
pub struct MaxIterations {
    limit: u64,
    completed: AtomicU64,
}

impl MaxIterations {
    pub fn new(limit: u64) -> Self {
        Self {
            limit,
            completed: AtomicU64::new(0),
        }
    }

    pub fn from_config(config: &EvolutionConfig) -> Self {
        Self::new(config.max_iterations)
    }

    /// Call when a generation finishes; returns the new count.
    pub fn record_generation(&self) -> u64 {
        self.completed.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Relaxed)
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl StopPredicate for MaxIterations {
    fn should_stop(&self) -> bool {
        self.completed() >= self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TargetImage;
    use crate::engines::encoding::BitVector;
    use crate::engines::generation::BitGenome;
    use crate::engines::rendering::GenomeLayout;
    use std::sync::Arc;

    #[test]
    fn test_max_iterations_stops_at_limit() {
        let stop = MaxIterations::new(3);
        assert!(!stop.should_stop());

        stop.record_generation();
        stop.record_generation();
        assert!(!stop.should_stop());

        assert_eq!(stop.record_generation(), 3);
        assert!(stop.should_stop());
    }

    #[test]
    fn test_evaluator_as_trait_object() {
        let layout = GenomeLayout::new(2, 12, 8).unwrap();
        let target = Arc::new(TargetImage::solid(4, 4, [0, 0, 0]).unwrap());
        let simulator: Box<dyn Simulator> = Box::new(FitnessEvaluator::new(layout, target).unwrap());

        let mut genome = BitGenome::new(BitVector::zeros(160));
        assert_eq!(simulator.evaluate(&mut genome).unwrap(), 360 * 16);
        assert_eq!(genome.fitness(), 360 * 16);
    }
}
