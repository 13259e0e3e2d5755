pub mod evaluator;
pub mod hue;
pub mod simulator;

pub use evaluator::FitnessEvaluator;
pub use simulator::{MaxIterations, Simulator, StopPredicate};
