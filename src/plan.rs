//! Pure dimension planning for the resize action.
//!
//! Combines the tag's declared size, the image's natural size, and an
//! optional configured maximum into final target dimensions. No I/O — the
//! caller reads natural dimensions from the encoder backend and rounds the
//! result at the encoder boundary.
//!
//! Any inferred axis uses the *natural* aspect ratio of the source image,
//! never the ratio of a partially specified target, and the maximum clamp
//! rescales from natural dimensions for the same reason.

use crate::attrs::DeclaredSize;

/// Compute target dimensions.
///
/// - Only width declared: height follows the natural aspect ratio (rounded).
/// - Only height declared: width follows the natural aspect ratio (rounded).
/// - Neither: natural dimensions verbatim.
/// - Both: taken as given, no aspect correction.
/// - A declared value of 0 counts as not declared, so the result is always
///   two positive values (natural dimensions are never zero).
/// - If `max` is set and the plan exceeds it on either axis, both axes are
///   replaced by natural dimensions scaled by
///   `min(max_w / natural_w, max_h / natural_h)`. The scaled result may be
///   fractional; rounding is left to the encoder.
pub fn plan_dimensions(
    declared: DeclaredSize,
    natural: (u32, u32),
    max: Option<(u32, u32)>,
) -> (f64, f64) {
    let (nw, nh) = (natural.0 as f64, natural.1 as f64);
    let declared_width = declared.width.filter(|&w| w > 0);
    let declared_height = declared.height.filter(|&h| h > 0);
    let (mut width, mut height) = match (declared_width, declared_height) {
        (Some(w), None) => {
            let w = w as f64;
            (w, (w * nh / nw).round())
        }
        (None, Some(h)) => {
            let h = h as f64;
            ((h * nw / nh).round(), h)
        }
        (None, None) => (nw, nh),
        (Some(w), Some(h)) => (w as f64, h as f64),
    };
    if let Some((max_w, max_h)) = max {
        if width > max_w as f64 || height > max_h as f64 {
            let scale = (max_w as f64 / nw).min(max_h as f64 / nh);
            width = nw * scale;
            height = nh * scale;
        }
    }
    (width, height)
}
