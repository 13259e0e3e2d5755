use crate::engines::encoding::BitVector;
use crate::engines::evaluation::FitnessEvaluator;
use crate::engines::rendering::GenomeRenderer;
use crate::error::Result;
use image::RgbaImage;

/// Re-renders genomes for persistence outside the evaluation loop.
#[derive(Debug, Clone)]
pub struct EliteSnapshot {
    renderer: GenomeRenderer,
}

impl EliteSnapshot {
    pub fn new(renderer: GenomeRenderer) -> Self {
        Self { renderer }
    }

    /// Uses the same layout and canvas size the evaluator scores with.
    pub fn from_evaluator(evaluator: &FitnessEvaluator) -> Self {
        Self::new(evaluator.renderer().clone())
    }

    pub fn render_genome_to_image(&self, bits: &BitVector) -> Result<RgbaImage> {
        Ok(self.renderer.render(bits)?.into_image())
    }
}
