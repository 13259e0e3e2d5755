pub mod traits;
pub mod encoding;
pub mod evolution;
pub mod output;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use encoding::EncodingConfig;
pub use evolution::EvolutionConfig;
pub use output::OutputConfig;
pub use traits::ConfigSection;
