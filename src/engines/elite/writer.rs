use super::report::ReportSink;
use super::snapshot::EliteSnapshot;
use crate::config::OutputConfig;
use crate::engines::generation::Genome;
use anyhow::Context;
use image::ImageFormat;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Receives the engine's "new best genome" events.
pub trait EliteConsumer {
    fn on_elite(&mut self, genome: &dyn Genome) -> EliteOutcome;
}

/// What happened while handling one elite event. Failures are already logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EliteOutcome {
    pub iteration: u64,
    pub image_written: bool,
    pub reported: bool,
}

/// Overwrites a PNG with every new elite and reports `<iteration>\t<fitness>`.
///
/// I/O failures never propagate. They are logged at warn level and the run
/// continues.
pub struct EliteWriter<S: ReportSink> {
    snapshot: EliteSnapshot,
    output_path: PathBuf,
    sink: S,
    iteration: u64,
    started: Instant,
}

impl<S: ReportSink> EliteWriter<S> {
    pub fn new(snapshot: EliteSnapshot, output_path: impl Into<PathBuf>, sink: S) -> Self {
        Self {
            snapshot,
            output_path: output_path.into(),
            sink,
            iteration: 0,
            started: Instant::now(),
        }
    }

    pub fn from_config(snapshot: EliteSnapshot, config: &OutputConfig, sink: S) -> Self {
        Self::new(snapshot, config.elite_path.clone(), sink)
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Number of elites handled so far
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn write_snapshot(&self, genome: &dyn Genome) -> anyhow::Result<()> {
        profiling::scope!("EliteWriter::write_snapshot");
        let image = self
            .snapshot
            .render_genome_to_image(genome.bits())
            .context("rendering elite genome")?;
        image
            .save_with_format(&self.output_path, ImageFormat::Png)
            .with_context(|| format!("writing {}", self.output_path.display()))?;
        Ok(())
    }

    /// Reports total wall-clock time since the writer was created.
    pub fn finish(&mut self) -> Duration {
        let elapsed = self.started.elapsed();
        log::info!("Run finished after {:?} ({} elites)", elapsed, self.iteration);
        if let Err(e) = self.sink.on_run_complete(elapsed) {
            log::warn!("Failed to report run duration: {}", e);
        }
        elapsed
    }
}

impl<S: ReportSink> EliteConsumer for EliteWriter<S> {
    fn on_elite(&mut self, genome: &dyn Genome) -> EliteOutcome {
        self.iteration += 1;
        let fitness = genome.fitness();

        let image_written = match self.write_snapshot(genome) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Elite snapshot {} skipped: {:#}", self.iteration, e);
                false
            }
        };

        let reported = match self.sink.on_elite(self.iteration, fitness) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Elite report {} skipped: {}", self.iteration, e);
                false
            }
        };

        log::debug!("Elite {} with fitness {}", self.iteration, fitness);
        EliteOutcome {
            iteration: self.iteration,
            image_written,
            reported,
        }
    }
}
