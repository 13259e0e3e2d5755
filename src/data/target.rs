use crate::engines::evaluation::hue::hue_rgb8;
use crate::error::{HueboxError, Result};
use image::{DynamicImage, Rgb, RgbImage};
use rayon::prelude::*;
use std::path::Path;

/// Target raster plus its per-pixel hue plane.
///
/// Built once at startup and shared read-only by every evaluation. Hues are
/// precomputed here so scoring a genome only has to compute hues of the
/// rendered side.
#[derive(Debug, Clone)]
pub struct TargetImage {
    pixels: RgbImage,
    hues: Vec<f64>,
}

impl TargetImage {
    /// Decodes any format the `image` crate was built with. Failure here is fatal
    /// for the run.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let decoded = image::open(path)?;
        let target = Self::from_dynamic(decoded)?;
        log::info!(
            "Loaded target {} ({}x{})",
            path.display(),
            target.width(),
            target.height()
        );
        Ok(target)
    }

    pub fn from_dynamic(image: DynamicImage) -> Result<Self> {
        Self::from_rgb(image.to_rgb8())
    }

    pub fn from_rgb(pixels: RgbImage) -> Result<Self> {
        profiling::scope!("TargetImage::from_rgb");
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(HueboxError::Configuration(
                "target image has no pixels".to_string()
            ));
        }

        let hues: Vec<f64> = pixels
            .as_raw()
            .par_chunks_exact(3)
            .map(|p| hue_rgb8([p[0], p[1], p[2]]))
            .collect();

        Ok(Self { pixels, hues })
    }

    /// Single-color target, handy for calibration runs
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Result<Self> {
        Self::from_rgb(RgbImage::from_pixel(width, height, Rgb(rgb)))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixel_count(&self) -> usize {
        self.hues.len()
    }

    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    /// Row-major hue plane
    pub fn hues(&self) -> &[f64] {
        &self.hues
    }

    pub fn hue_at(&self, x: u32, y: u32) -> Option<f64> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        self.hues.get(y as usize * self.width() as usize + x as usize).copied()
    }
}
