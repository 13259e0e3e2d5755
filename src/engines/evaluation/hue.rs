//! Hue extraction and pairwise hue similarity.

/// Hue assigned to achromatic colors (`max == min`). Deliberately outside
/// `[0, 360)` so grays never match pure red at 0°.
pub const ACHROMATIC_HUE: f64 = 360.0;

/// Score of two identical hues
pub const MAX_SCORE: f64 = 360.0;

/// Six-sector HSV hue in degrees for channels normalized to `[0, 1]`.
///
/// Returns a value in `[0, 360)` for chromatic colors and
/// [`ACHROMATIC_HUE`] otherwise.
#[inline]
pub fn hue(r: f64, g: f64, b: f64) -> f64 {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    if delta == 0.0 {
        return ACHROMATIC_HUE;
    }

    let sector = if max == r {
        (g - b) / delta
    } else if max == g {
        2.0 + (b - r) / delta
    } else {
        4.0 + (r - g) / delta
    };

    // tiny negative sectors round up to exactly 360 after the wrap
    let degrees = (sector * 60.0).rem_euclid(360.0);
    if degrees >= 360.0 {
        0.0
    } else {
        degrees
    }
}

#[inline]
pub fn hue_rgb8(rgb: [u8; 3]) -> f64 {
    hue(
        rgb[0] as f64 / 255.0,
        rgb[1] as f64 / 255.0,
        rgb[2] as f64 / 255.0,
    )
}

/// `360 - |a - b|`: 360 for identical hues, 0 for the furthest pair.
#[inline]
pub fn score(a: f64, b: f64) -> f64 {
    MAX_SCORE - (a - b).abs()
}
