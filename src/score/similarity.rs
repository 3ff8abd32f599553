use crate::foundation::core::Rgba8;
use crate::foundation::error::{VinciError, VinciResult};
use crate::render::frame::Frame;

/// Weight applied to the summed per-pixel distance.
pub const SIMILARITY_ALPHA: f64 = 0.005;

/// Euclidean distance between two pixels over all four channels.
pub fn pixel_diff(a: Rgba8, b: Rgba8) -> f64 {
    let sq = |x: u8, y: u8| {
        let d = f64::from(x) - f64::from(y);
        d * d
    };
    (sq(a.r, b.r) + sq(a.g, b.g) + sq(a.b, b.b) + sq(a.a, b.a)).sqrt()
}

/// `round(SIMILARITY_ALPHA * Σ pixel_diff)` over two frames of the same size.
///
/// Pixels are summed serially in row-major order so the floating-point total is
/// reproducible.
pub fn image_diff(target: &Frame, rendered: &Frame) -> VinciResult<u64> {
    if (target.width(), target.height()) != (rendered.width(), rendered.height()) {
        return Err(VinciError::validation(format!(
            "target is {}x{} but the rendered frame is {}x{}",
            target.width(),
            target.height(),
            rendered.width(),
            rendered.height()
        )));
    }
    let total: f64 = target
        .pixels()
        .iter()
        .zip(rendered.pixels())
        .map(|(&a, &b)| pixel_diff(a, b))
        .sum();
    Ok((total * SIMILARITY_ALPHA).round() as u64)
}

#[cfg(test)]
#[path = "../../tests/unit/score/similarity.rs"]
mod tests;
