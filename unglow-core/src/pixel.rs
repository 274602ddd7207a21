//! Per-pixel alpha recovery.

use image::Rgba;

/// Infer the alpha of a pixel from its brightest channel and un-premultiply
/// the colour by it.
///
/// The source alpha is ignored. A pixel with no colour at all becomes fully
/// transparent black.
pub fn recover_alpha(pixel: Rgba<u8>) -> Rgba<u8> {
    let [r, g, b, _] = pixel.0;
    let alpha = r.max(g).max(b);
    if alpha == 0 {
        return Rgba([0, 0, 0, 0]);
    }

    Rgba([
        unpremultiply(r, alpha),
        unpremultiply(g, alpha),
        unpremultiply(b, alpha),
        alpha,
    ])
}

/// `channel * 255 / alpha`, clamped to 255 and truncated toward zero.
#[inline]
fn unpremultiply(channel: u8, alpha: u8) -> u8 {
    (channel as f64 * 255.0 / alpha as f64).min(255.0) as u8
}
