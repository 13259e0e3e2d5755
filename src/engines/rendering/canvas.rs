use image::{Rgba, RgbaImage};

const OPAQUE_BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Axis-aligned pixel rectangle covering `[x0, x1) x [y0, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl PixelRect {
    /// Bounding box of two corner points in either order.
    pub fn from_corners(ax: u32, ay: u32, bx: u32, by: u32) -> Self {
        Self {
            x0: ax.min(bx),
            y0: ay.min(by),
            x1: ax.max(bx),
            y1: ay.max(by),
        }
    }

    pub fn clip(self, width: u32, height: u32) -> Self {
        Self {
            x0: self.x0.min(width),
            y0: self.y0.min(height),
            x1: self.x1.min(width),
            y1: self.y1.min(height),
        }
    }

    pub fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Rounded `src * a + dst * (1 - a)` on 8-bit channels.
#[inline(always)]
fn blend(src: u8, dst: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    ((src as u32 * a + dst as u32 * (255 - a) + 127) / 255) as u8
}

/// RGBA raster owned by a single render call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Opaque black canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, OPAQUE_BLACK),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    /// Raw RGBA bytes, row-major
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Composites a solid color over `rect` with the "over" operator.
    /// Only rows and columns inside the clipped rectangle are touched.
    pub fn fill_rect_over(&mut self, rect: PixelRect, rgb: [u8; 3], alpha: u8) {
        profiling::scope!("fill_rect_over");

        let rect = rect.clip(self.width(), self.height());
        if rect.is_empty() || alpha == 0 {
            return;
        }

        let stride = self.width() as usize * 4;
        let x_start = rect.x0 as usize * 4;
        let x_end = rect.x1 as usize * 4;
        let buf: &mut [u8] = &mut self.image;

        for y in rect.y0 as usize..rect.y1 as usize {
            let row = &mut buf[y * stride + x_start..y * stride + x_end];
            for px in row.chunks_exact_mut(4) {
                px[0] = blend(rgb[0], px[0], alpha);
                px[1] = blend(rgb[1], px[1], alpha);
                px[2] = blend(rgb[2], px[2], alpha);
                px[3] = blend(255, px[3], alpha);
            }
        }
    }
}
