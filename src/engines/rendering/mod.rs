pub mod canvas;
pub mod layout;
pub mod renderer;

pub use canvas::{Canvas, PixelRect};
pub use layout::{BoxDescriptor, GenomeLayout, FIELDS_PER_BOX};
pub use renderer::GenomeRenderer;
