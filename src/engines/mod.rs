pub mod elite;
pub mod encoding;
pub mod evaluation;
pub mod generation;
pub mod rendering;
