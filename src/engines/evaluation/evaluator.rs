use super::hue::{hue_rgb8, score, MAX_SCORE};
use crate::data::TargetImage;
use crate::engines::encoding::BitVector;
use crate::engines::generation::Genome;
use crate::engines::rendering::{Canvas, GenomeLayout, GenomeRenderer};
use crate::error::{HueboxError, Result};
use rayon::prelude::*;
use std::sync::Arc;

/// Renders genomes and scores them against a shared target by hue similarity.
///
/// Holds only read-only state, so one evaluator can serve every worker thread.
/// Each call allocates and owns its canvas.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator {
    renderer: GenomeRenderer,
    target: Arc<TargetImage>,
}

impl FitnessEvaluator {
    pub fn new(layout: GenomeLayout, target: Arc<TargetImage>) -> Result<Self> {
        let renderer = GenomeRenderer::new(layout, target.width(), target.height())?;
        Ok(Self { renderer, target })
    }

    pub fn renderer(&self) -> &GenomeRenderer {
        &self.renderer
    }

    pub fn target(&self) -> &Arc<TargetImage> {
        &self.target
    }

    /// Score of a perfect hue match on every pixel
    pub fn max_fitness(&self) -> u64 {
        MAX_SCORE as u64 * self.target.pixel_count() as u64
    }

    /// Sum of per-pixel hue scores, truncated toward zero.
    pub fn score_canvas(&self, canvas: &Canvas) -> Result<u64> {
        profiling::scope!("FitnessEvaluator::score_canvas");
        if canvas.width() != self.target.width() || canvas.height() != self.target.height() {
            return Err(HueboxError::Configuration(format!(
                "canvas is {}x{} but target is {}x{}",
                canvas.width(),
                canvas.height(),
                self.target.width(),
                self.target.height()
            )));
        }

        // cache the hue of the previous pixel's color
        let mut last_rgb = [0u8, 0, 0];
        let mut last_hue = hue_rgb8(last_rgb);
        let mut total = 0.0f64;

        for (&target_hue, px) in self.target.hues().iter().zip(canvas.as_raw().chunks_exact(4)) {
            let rgb = [px[0], px[1], px[2]];
            if rgb != last_rgb {
                last_rgb = rgb;
                last_hue = hue_rgb8(rgb);
            }
            total += score(target_hue, last_hue);
        }

        Ok(total as u64)
    }

    /// Fitness of raw genome bits without touching any genome.
    pub fn fitness_of(&self, bits: &BitVector) -> Result<u64> {
        let canvas = self.renderer.render(bits)?;
        self.score_canvas(&canvas)
    }

    /// Renders, scores and writes the fitness back onto `genome`.
    pub fn evaluate<G: Genome + ?Sized>(&self, genome: &mut G) -> Result<u64> {
        let fitness = self.fitness_of(genome.bits())?;
        genome.set_fitness(fitness);
        Ok(fitness)
    }

    /// Evaluates a batch on the current rayon pool.
    ///
    /// Stops at the first malformed genome; genomes evaluated before it keep
    /// their new fitness.
    pub fn evaluate_population<G: Genome + Send>(&self, genomes: &mut [G]) -> Result<()> {
        profiling::scope!("FitnessEvaluator::evaluate_population");
        genomes
            .par_iter_mut()
            .try_for_each(|genome| self.evaluate(genome).map(|_| ()))
    }
}
