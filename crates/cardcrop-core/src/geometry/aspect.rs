//! Aspect-ratio solving.
//!
//! Ratios are width divided by height. `None` means free mode.

use super::constrain::constrain_to_canvas;
use super::types::{CanvasBounds, CropRegion};

/// Reshape a region to the given ratio, keeping its center.
///
/// The shorter side relative to the ratio drives: a region too wide for the
/// ratio keeps its height, one too tall keeps its width. If the solved size
/// falls below `min_size`, the other dimension is recomputed from the floor.
/// The result is scaled down uniformly if it would not fit on the canvas,
/// then passed through [`constrain_to_canvas`].
pub fn apply_aspect_ratio(
    region: CropRegion,
    ratio: Option<f64>,
    canvas: CanvasBounds,
    min_size: f64,
) -> CropRegion {
    let Some(ratio) = ratio else {
        return region;
    };

    let center = region.center();
    let (mut width, mut height) = if region.width / region.height > ratio {
        (region.height * ratio, region.height)
    } else {
        (region.width, region.width / ratio)
    };
    (width, height) = floor_locked(width, height, ratio, min_size);

    // Shrink uniformly rather than let the canvas clamp break the ratio
    let scale = (canvas.width / width).min(canvas.height / height).min(1.0);
    if scale < 1.0 {
        (width, height) = floor_locked(width * scale, height * scale, ratio, min_size);
    }

    let centered = CropRegion {
        x: center.x - width / 2.0,
        y: center.y - height / 2.0,
        width,
        height,
        rotation_degrees: region.rotation_degrees,
    };
    constrain_to_canvas(centered, canvas, min_size)
}

/// Raise a ratio-locked size to the floor without breaking the ratio.
pub(crate) fn floor_locked(width: f64, height: f64, ratio: f64, min_size: f64) -> (f64, f64) {
    let (mut w, mut h) = (width, height);
    if w < min_size {
        w = min_size;
        h = w / ratio;
    }
    if h < min_size {
        h = min_size;
        w = h * ratio;
    }
    (w, h)
}

/// Size for a ratio-locked resize driven by width.
///
/// The width is limited to `max_width`, the derived height to `max_height`
/// (re-deriving width if needed), then both are floored.
pub(crate) fn lock_from_width(
    width: f64,
    ratio: f64,
    max_width: f64,
    max_height: f64,
    min_size: f64,
) -> (f64, f64) {
    let mut w = width.min(max_width);
    let mut h = w / ratio;
    if h > max_height {
        h = max_height;
        w = h * ratio;
    }
    floor_locked(w, h, ratio, min_size)
}

/// Size for a ratio-locked resize driven by height.
pub(crate) fn lock_from_height(
    height: f64,
    ratio: f64,
    max_width: f64,
    max_height: f64,
    min_size: f64,
) -> (f64, f64) {
    let mut h = height.min(max_height);
    let mut w = h * ratio;
    if w > max_width {
        w = max_width;
        h = w / ratio;
    }
    floor_locked(w, h, ratio, min_size)
}

/// Largest size of the given ratio fitting in a `width` x `height` box.
pub fn fit_ratio(width: f64, height: f64, ratio: Option<f64>) -> (f64, f64) {
    match ratio {
        None => (width, height),
        Some(r) if width / height > r => (height * r, height),
        Some(r) => (width, width / r),
    }
}
