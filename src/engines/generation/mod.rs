pub mod genome;

pub use genome::{BitGenome, Genome};
