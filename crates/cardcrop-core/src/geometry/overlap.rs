//! Region-vs-image overlap and image-space conversion.

use super::types::{CropRegion, ImagePlacement, NormalizedCrop};

/// Intersection of two unrotated regions, or `None` if they do not overlap.
///
/// Rectangles that only share an edge do not overlap.
pub fn intersection(a: &CropRegion, b: &CropRegion) -> Option<CropRegion> {
    let left = a.x.max(b.x);
    let top = a.y.max(b.y);
    let right = a.right().min(b.right());
    let bottom = a.bottom().min(b.bottom());

    if right <= left || bottom <= top {
        return None;
    }
    Some(CropRegion::new(left, top, right - left, bottom - top))
}

/// Fraction of the region's area lying over the image, in `[0, 1]`.
pub fn overlap_fraction(region: &CropRegion, placement: &ImagePlacement) -> f64 {
    let area = region.area();
    if area <= 0.0 {
        return 0.0;
    }
    intersection(region, &placement.as_region())
        .map(|i| (i.area() / area).min(1.0))
        .unwrap_or(0.0)
}

/// Whether enough of the region covers the image to be a usable crop.
///
/// Returns `false` when the rectangles do not intersect; otherwise compares
/// the intersection area against `region_area * min_fraction`.
pub fn has_valid_overlap(region: &CropRegion, placement: &ImagePlacement, min_fraction: f64) -> bool {
    match intersection(region, &placement.as_region()) {
        Some(i) => i.area() >= region.area() * min_fraction,
        None => false,
    }
}

/// Express a surface-space region relative to the placed image.
///
/// The result is clamped to the image, so a region hanging off the image
/// yields only the covered part. A region missing the image entirely yields
/// a zero-sized crop at the nearest image edge.
pub fn to_image_crop(region: &CropRegion, placement: &ImagePlacement) -> NormalizedCrop {
    let img_w = placement.dimensions.width;
    let img_h = placement.dimensions.height;
    if img_w <= 0.0 || img_h <= 0.0 {
        return NormalizedCrop {
            left: 0.0,
            top: 0.0,
            width: 0.0,
            height: 0.0,
        };
    }

    let to_x = |v: f64| ((v - placement.position.x) / img_w).clamp(0.0, 1.0);
    let to_y = |v: f64| ((v - placement.position.y) / img_h).clamp(0.0, 1.0);

    let left = to_x(region.x);
    let top = to_y(region.y);
    NormalizedCrop {
        left,
        top,
        width: to_x(region.right()) - left,
        height: to_y(region.bottom()) - top,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Overlap fraction stays within [0, 1].
        #[test]
        fn prop_fraction_in_unit_range(
            x in -1000.0f64..1000.0,
            y in -1000.0f64..1000.0,
            w in 1.0f64..1000.0,
            h in 1.0f64..1000.0,
        ) {
            let image = ImagePlacement::new(0.0, 0.0, 800.0, 600.0);
            let f = overlap_fraction(&CropRegion::new(x, y, w, h), &image);
            prop_assert!((0.0..=1.0).contains(&f));
        }

        /// Property: Normalized crops never leave the unit square.
        #[test]
        fn prop_image_crop_in_unit_square(
            x in -1000.0f64..1000.0,
            y in -1000.0f64..1000.0,
            w in 1.0f64..1000.0,
            h in 1.0f64..1000.0,
        ) {
            let image = ImagePlacement::new(50.0, 25.0, 640.0, 480.0);
            let c = to_image_crop(&CropRegion::new(x, y, w, h), &image);
            prop_assert!(c.left >= 0.0 && c.top >= 0.0);
            prop_assert!(c.width >= 0.0 && c.height >= 0.0);
            prop_assert!(c.left + c.width <= 1.0 + 1e-12);
            prop_assert!(c.top + c.height <= 1.0 + 1e-12);
        }
    }
}
