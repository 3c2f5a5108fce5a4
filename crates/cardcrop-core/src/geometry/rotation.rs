//! Rotation helpers for the rotate handle.
//!
//! Angles are in degrees. Screen y grows downward, so positive angles turn
//! clockwise as seen by the user.

use super::types::Point;

/// Angle of `pointer` around `center`, in degrees in `(-180, 180]`.
pub fn pointer_angle(center: Point, pointer: Point) -> f64 {
    (pointer.y - center.y).atan2(pointer.x - center.x).to_degrees()
}

/// Round an angle to the nearest multiple of `step`, normalized to `[0, 360)`.
pub fn snap_rotation(degrees: f64, step: f64) -> f64 {
    let snapped = (degrees / step).round() * step;
    let normalized = snapped.rem_euclid(360.0);
    // rem_euclid can land on 360 for tiny negative inputs, or keep -0.0
    if normalized >= 360.0 || normalized == 0.0 {
        0.0
    } else {
        normalized
    }
}
