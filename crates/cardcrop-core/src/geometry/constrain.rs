//! Keeping regions on the rendering surface.
//!
//! Resize results must lie fully inside the canvas. Moves get a looser
//! bound so the user can park the region partly off-canvas before resizing
//! it back in.

use super::types::{CanvasBounds, CropRegion};

/// Clamp a region so it lies inside the canvas and respects the size floor.
///
/// Position is clamped first against the incoming size (raised to the floor),
/// then the size is clamped against the room left from the new origin. This
/// order keeps the result stable when both axes sit on a boundary, and makes
/// the function idempotent.
///
/// The floor wins over the canvas: on a canvas smaller than `min_size` the
/// region keeps `min_size` and overhangs.
pub fn constrain_to_canvas(region: CropRegion, canvas: CanvasBounds, min_size: f64) -> CropRegion {
    let pre_w = region.width.max(min_size);
    let pre_h = region.height.max(min_size);

    let x = region.x.min(canvas.width - pre_w).max(0.0);
    let y = region.y.min(canvas.height - pre_h).max(0.0);

    let width = region.width.min(canvas.width - x).max(min_size);
    let height = region.height.min(canvas.height - y).max(min_size);

    CropRegion {
        x,
        y,
        width,
        height,
        rotation_degrees: region.rotation_degrees,
    }
}

/// Bound a moved region so at least `buffer` pixels of it stay on-canvas.
///
/// The left edge may go as far as `-width + buffer` and as far right as
/// `canvas.width - buffer`; likewise vertically. Size is left untouched.
pub fn constrain_move(region: CropRegion, canvas: CanvasBounds, buffer: f64) -> CropRegion {
    let x = region
        .x
        .min(canvas.width - buffer)
        .max(-region.width + buffer);
    let y = region
        .y
        .min(canvas.height - buffer)
        .max(-region.height + buffer);

    CropRegion { x, y, ..region }
}
