use thiserror::Error;

#[derive(Error, Debug)]
pub enum HueboxError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Bit slice out of bounds: offset {offset} + length {len} exceeds {source_len} bits")]
    SliceOutOfBounds { offset: usize, len: usize, source_len: usize },

    #[error("Field widths sum to {expected} bits but the slice holds {actual}")]
    FieldWidthMismatch { expected: usize, actual: usize },

    #[error("Genome length mismatch: expected {expected} bits, got {actual}")]
    GenomeLength { expected: usize, actual: usize },

    #[error("Value {value} does not fit in a {width}-bit field")]
    FieldOverflow { value: u64, width: u32 },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config source error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, HueboxError>;
