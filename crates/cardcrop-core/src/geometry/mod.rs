//! Stateless geometry for the crop editor.
//!
//! Everything here is a pure function of its inputs: rectangle and rotation
//! math, aspect-ratio solving, canvas clamping and overlap checks. The store
//! and drag controller build on these; none of them keep state.
//!
//! # Coordinate System
//!
//! - Surface-local pixels, origin at the top-left, y grows downward
//! - A region's `x`/`y` is its unrotated top-left corner
//! - Rotation is about the region center, in degrees

mod aspect;
mod constrain;
mod overlap;
mod rotation;
mod types;

pub use aspect::{apply_aspect_ratio, fit_ratio};
pub(crate) use aspect::{floor_locked, lock_from_height, lock_from_width};
pub use constrain::{constrain_move, constrain_to_canvas};
pub use overlap::{has_valid_overlap, intersection, overlap_fraction, to_image_crop};
pub use rotation::{pointer_angle, snap_rotation};
pub use types::{
    AspectRatioMode, CanvasBounds, CropRegion, Dimensions, ImagePlacement, NormalizedCrop, Point,
};

/// Snap a pointer delta to the `step` grid, counting completed steps only.
///
/// Rounds toward zero, so a 23px drag on a 5px grid moves 20px and -7px
/// moves -5px.
#[inline]
pub fn quantize(delta: f64, step: f64) -> f64 {
    (delta / step).trunc() * step
}

/// Default region for a freshly opened editor.
///
/// Centers a region on the placed image at `fill` of the image's size,
/// shaped to `ratio`, then constrains it to the canvas.
pub fn centered_region(
    placement: &ImagePlacement,
    canvas: CanvasBounds,
    ratio: Option<f64>,
    fill: f64,
    min_size: f64,
) -> CropRegion {
    let (width, height) = fit_ratio(
        placement.dimensions.width * fill,
        placement.dimensions.height * fill,
        ratio,
    );
    let (width, height) = match ratio {
        Some(r) => floor_locked(width, height, r, min_size),
        None => (width.max(min_size), height.max(min_size)),
    };
    let center = placement.as_region().center();
    let region = CropRegion::new(
        center.x - width / 2.0,
        center.y - height / 2.0,
        width,
        height,
    );
    constrain_to_canvas(region, canvas, min_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_counts_whole_steps() {
        assert_eq!(quantize(23.0, 5.0), 20.0);
        assert_eq!(quantize(25.0, 5.0), 25.0);
        assert_eq!(quantize(-7.0, 5.0), -5.0);
        assert_eq!(quantize(-10.0, 5.0), -10.0);
        assert_eq!(quantize(4.9, 5.0), 0.0);
    }

    #[test]
    fn test_centered_region_on_full_image() {
        let canvas = CanvasBounds {
            width: 800.0,
            height: 600.0,
        };
        let placement = ImagePlacement::covering(canvas);
        let r = centered_region(&placement, canvas, Some(1.0), 0.8, 30.0);
        assert_eq!(r.width, 480.0);
        assert_eq!(r.height, 480.0);
        assert_eq!(r.center(), Point::new(400.0, 300.0));
    }

    #[test]
    fn test_centered_region_free_mode() {
        let canvas = CanvasBounds {
            width: 800.0,
            height: 600.0,
        };
        let placement = ImagePlacement::new(100.0, 100.0, 200.0, 100.0);
        let r = centered_region(&placement, canvas, None, 0.8, 30.0);
        assert_eq!(r, CropRegion::new(120.0, 110.0, 160.0, 80.0));
    }

    #[test]
    fn test_centered_region_on_tiny_image_uses_floor() {
        let canvas = CanvasBounds {
            width: 800.0,
            height: 600.0,
        };
        let placement = ImagePlacement::new(10.0, 10.0, 20.0, 20.0);
        let r = centered_region(&placement, canvas, Some(1.0), 0.8, 30.0);
        assert_eq!(r.width, 30.0);
        assert_eq!(r.height, 30.0);
        assert!(r.x >= 0.0 && r.y >= 0.0);
    }
}
