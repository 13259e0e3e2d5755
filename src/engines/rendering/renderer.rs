use super::canvas::{Canvas, PixelRect};
use super::layout::{BoxDescriptor, GenomeLayout};
use crate::engines::encoding::BitVector;
use crate::error::{HueboxError, Result};

/// Turns genomes into rasters of a fixed size.
///
/// Boxes are drawn back to front in genome order onto an opaque black canvas.
/// Corners are mapped linearly from the field domain to pixel space and the
/// covered area is the bounding box of the two mapped corners, half-open on
/// the far edges: a box whose mapped corners coincide on either axis covers no
/// pixels.
#[derive(Debug, Clone)]
pub struct GenomeRenderer {
    layout: GenomeLayout,
    width: u32,
    height: u32,
}

impl GenomeRenderer {
    pub fn new(layout: GenomeLayout, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(HueboxError::Configuration(format!(
                "canvas must be non-empty, got {}x{}",
                width, height
            )));
        }
        Ok(Self { layout, width, height })
    }

    pub fn layout(&self) -> &GenomeLayout {
        &self.layout
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `round(field / max_corner * extent)`
    #[inline]
    pub fn map_corner(&self, field: u32, extent: u32) -> u32 {
        let max = self.layout.max_corner() as f64;
        ((field as f64 / max) * extent as f64).round() as u32
    }

    /// Pixel area a box covers before clipping.
    pub fn box_rect(&self, descriptor: &BoxDescriptor) -> PixelRect {
        PixelRect::from_corners(
            self.map_corner(descriptor.x0, self.width),
            self.map_corner(descriptor.y0, self.height),
            self.map_corner(descriptor.x1, self.width),
            self.map_corner(descriptor.y1, self.height),
        )
    }

    pub fn decode_boxes(&self, bits: &BitVector) -> Result<Vec<BoxDescriptor>> {
        self.layout.decode_boxes(bits)
    }

    /// Fresh canvas with every box of `bits` composited onto it.
    pub fn render(&self, bits: &BitVector) -> Result<Canvas> {
        profiling::scope!("GenomeRenderer::render");
        self.layout.check_genome(bits)?;

        let mut canvas = Canvas::new(self.width, self.height);
        for i in 0..self.layout.num_boxes() {
            let descriptor = self.layout.decode_box(self.layout.box_segment(bits, i)?)?;
            self.draw_box(&mut canvas, &descriptor);
        }
        Ok(canvas)
    }

    fn draw_box(&self, canvas: &mut Canvas, descriptor: &BoxDescriptor) {
        let rgb = [
            self.layout.color_to_u8(descriptor.r),
            self.layout.color_to_u8(descriptor.g),
            self.layout.color_to_u8(descriptor.b),
        ];
        let alpha = self.layout.color_to_u8(descriptor.a);
        canvas.fill_rect_over(self.box_rect(descriptor), rgb, alpha);
    }
}
