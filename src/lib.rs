//! Genome interpretation core for evolving box-based approximations of an image.
//!
//! A genome is a fixed-length bit vector. Each fixed-width segment decodes into
//! one colored, translucent rectangle; the rectangles are composited in order
//! onto an opaque black canvas and the result is scored against a target image
//! by per-pixel hue similarity.

pub mod config;
pub mod data;
pub mod engines;
pub mod error;

pub use data::TargetImage;
pub use engines::elite::{EliteConsumer, EliteSnapshot, EliteWriter};
pub use engines::encoding::{BitSlice, BitVector, FieldSpec};
pub use engines::evaluation::{FitnessEvaluator, MaxIterations, Simulator, StopPredicate};
pub use engines::generation::{BitGenome, Genome};
pub use engines::rendering::{BoxDescriptor, GenomeLayout, GenomeRenderer};
pub use error::{HueboxError, Result};
