//! Handle identifiers and the per-handle transform table.
//!
//! Every arm is a pure function of the region at drag start, the quantized
//! pointer delta and the active ratio. Resize arms floor their result at
//! `min_size` inline and keep the moving edge on the canvas, so the fixed
//! corner or edge never shifts.
//!
//! The rotate knob sits `rotate_offset` beyond the right edge, on the ray at
//! the region's current angle. Grabbing it therefore reads back the angle the
//! region already has.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EditorError;
use crate::geometry::{
    constrain_move, constrain_to_canvas, lock_from_height, lock_from_width, pointer_angle,
    snap_rotation, CanvasBounds, CropRegion, Point,
};

/// A named grab point on the crop overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleId {
    /// Whole-region translation.
    Move,
    #[serde(rename = "tl")]
    TopLeft,
    #[serde(rename = "tr")]
    TopRight,
    #[serde(rename = "bl")]
    BottomLeft,
    #[serde(rename = "br")]
    BottomRight,
    #[serde(rename = "t")]
    Top,
    #[serde(rename = "b")]
    Bottom,
    #[serde(rename = "l")]
    Left,
    #[serde(rename = "r")]
    Right,
    /// Rotation knob beyond the right edge.
    Rotate,
}

impl HandleId {
    pub const ALL: [HandleId; 10] = [
        HandleId::Move,
        HandleId::TopLeft,
        HandleId::TopRight,
        HandleId::BottomLeft,
        HandleId::BottomRight,
        HandleId::Top,
        HandleId::Bottom,
        HandleId::Left,
        HandleId::Right,
        HandleId::Rotate,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HandleId::Move => "move",
            HandleId::TopLeft => "tl",
            HandleId::TopRight => "tr",
            HandleId::BottomLeft => "bl",
            HandleId::BottomRight => "br",
            HandleId::Top => "t",
            HandleId::Bottom => "b",
            HandleId::Left => "l",
            HandleId::Right => "r",
            HandleId::Rotate => "rotate",
        }
    }

    /// Corner and edge handles.
    pub fn is_resize(self) -> bool {
        !matches!(self, HandleId::Move | HandleId::Rotate)
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HandleId {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HandleId::ALL
            .into_iter()
            .find(|h| h.name() == s)
            .ok_or_else(|| EditorError::UnknownHandle(s.to_string()))
    }
}

/// Canvas and sizing constraints shared by every arm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleLimits {
    pub canvas: CanvasBounds,
    pub min_size: f64,
    pub move_buffer: f64,
    pub rotation_snap_degrees: f64,
}

/// Compute the candidate region for `handle`.
///
/// `delta` is the quantized pointer offset from the drag anchor; `pointer` is
/// the raw position, used only by the rotate knob. Resize handles first pull
/// a region that a move left partly off-canvas back onto it, size intact.
pub fn transform(
    handle: HandleId,
    base: &CropRegion,
    delta: Point,
    pointer: Point,
    ratio: Option<f64>,
    limits: &HandleLimits,
) -> CropRegion {
    let base = if handle.is_resize() {
        constrain_to_canvas(*base, limits.canvas, limits.min_size)
    } else {
        *base
    };
    let CropRegion {
        x: x0,
        y: y0,
        width: w0,
        height: h0,
        ..
    } = base;
    let (dx, dy) = (delta.x, delta.y);
    let min = limits.min_size;
    let cw = limits.canvas.width;
    let ch = limits.canvas.height;

    // Room for the moving edge on each side
    let room_left = x0 + w0;
    let room_top = y0 + h0;
    let room_right = cw - x0;
    let room_bottom = ch - y0;

    match handle {
        HandleId::Move => constrain_move(
            CropRegion {
                x: x0 + dx,
                y: y0 + dy,
                ..base
            },
            limits.canvas,
            limits.move_buffer,
        ),

        HandleId::Rotate => {
            let angle = pointer_angle(base.center(), pointer);
            base.with_rotation(snap_rotation(angle, limits.rotation_snap_degrees))
        }

        HandleId::TopLeft => {
            let (w, h) = corner_size(w0 - dx, h0 - dy, room_left, room_top, ratio, min);
            resized(&base, x0 + w0 - w, y0 + h0 - h, w, h)
        }
        HandleId::TopRight => {
            let (w, h) = corner_size(w0 + dx, h0 - dy, room_right, room_top, ratio, min);
            resized(&base, x0, y0 + h0 - h, w, h)
        }
        HandleId::BottomLeft => {
            let (w, h) = corner_size(w0 - dx, h0 + dy, room_left, room_bottom, ratio, min);
            resized(&base, x0 + w0 - w, y0, w, h)
        }
        HandleId::BottomRight => {
            let (w, h) = corner_size(w0 + dx, h0 + dy, room_right, room_bottom, ratio, min);
            resized(&base, x0, y0, w, h)
        }

        HandleId::Top => match ratio {
            None => {
                let h = (h0 - dy).min(room_top).max(min);
                resized(&base, x0, y0 + h0 - h, w0, h)
            }
            Some(r) => {
                let cx = x0 + w0 / 2.0;
                let (w, h) = lock_from_height(h0 - dy, r, centered_room(cx, cw), room_top, min);
                resized(&base, cx - w / 2.0, y0 + h0 - h, w, h)
            }
        },
        HandleId::Bottom => match ratio {
            None => {
                let h = (h0 + dy).min(room_bottom).max(min);
                resized(&base, x0, y0, w0, h)
            }
            Some(r) => {
                let cx = x0 + w0 / 2.0;
                let (w, h) = lock_from_height(h0 + dy, r, centered_room(cx, cw), room_bottom, min);
                resized(&base, cx - w / 2.0, y0, w, h)
            }
        },
        HandleId::Left => match ratio {
            None => {
                let w = (w0 - dx).min(room_left).max(min);
                resized(&base, x0 + w0 - w, y0, w, h0)
            }
            Some(r) => {
                let cy = y0 + h0 / 2.0;
                let (w, h) = lock_from_width(w0 - dx, r, room_left, centered_room(cy, ch), min);
                resized(&base, x0 + w0 - w, cy - h / 2.0, w, h)
            }
        },
        HandleId::Right => match ratio {
            None => {
                let w = (w0 + dx).min(room_right).max(min);
                resized(&base, x0, y0, w, h0)
            }
            Some(r) => {
                let cy = y0 + h0 / 2.0;
                let (w, h) = lock_from_width(w0 + dx, r, room_right, centered_room(cy, ch), min);
                resized(&base, x0, cy - h / 2.0, w, h)
            }
        },
    }
}

/// Size for a corner drag. Width drives when a ratio is active.
fn corner_size(
    raw_w: f64,
    raw_h: f64,
    max_w: f64,
    max_h: f64,
    ratio: Option<f64>,
    min: f64,
) -> (f64, f64) {
    match ratio {
        Some(r) => lock_from_width(raw_w, r, max_w, max_h, min),
        None => (raw_w.min(max_w).max(min), raw_h.min(max_h).max(min)),
    }
}

/// Extent available to a dimension that grows symmetrically about `center`.
fn centered_room(center: f64, extent: f64) -> f64 {
    2.0 * center.min(extent - center)
}

fn resized(base: &CropRegion, x: f64, y: f64, width: f64, height: f64) -> CropRegion {
    CropRegion {
        x,
        y,
        width,
        height,
        rotation_degrees: base.rotation_degrees,
    }
}

/// Where the rotate knob is drawn for `region`.
pub fn rotate_knob(region: &CropRegion, rotate_offset: f64) -> Point {
    region.to_surface(Point::new(
        region.right() + rotate_offset,
        region.center().y,
    ))
}

/// Resolve a pointer position to the handle under it.
///
/// Checked in priority order: rotate knob, corners, edges, then the interior
/// for `move`. The pointer is taken into the region's unrotated frame first,
/// so the handles grab where [`CropRegion::corners`] draws them.
pub fn hit_test(
    region: &CropRegion,
    point: Point,
    tolerance: f64,
    rotate_offset: f64,
) -> Option<HandleId> {
    let near = |a: f64, b: f64| (a - b).abs() <= tolerance;

    let knob = rotate_knob(region, rotate_offset);
    if (point.x - knob.x).hypot(point.y - knob.y) <= tolerance {
        return Some(HandleId::Rotate);
    }

    let point = region.to_local(point);

    let corners = [
        (region.x, region.y, HandleId::TopLeft),
        (region.right(), region.y, HandleId::TopRight),
        (region.x, region.bottom(), HandleId::BottomLeft),
        (region.right(), region.bottom(), HandleId::BottomRight),
    ];
    if let Some(&(_, _, handle)) = corners
        .iter()
        .find(|(cx, cy, _)| near(point.x, *cx) && near(point.y, *cy))
    {
        return Some(handle);
    }

    let within_x = point.x >= region.x && point.x <= region.right();
    let within_y = point.y >= region.y && point.y <= region.bottom();
    if within_x && near(point.y, region.y) {
        return Some(HandleId::Top);
    }
    if within_x && near(point.y, region.bottom()) {
        return Some(HandleId::Bottom);
    }
    if within_y && near(point.x, region.x) {
        return Some(HandleId::Left);
    }
    if within_y && near(point.x, region.right()) {
        return Some(HandleId::Right);
    }

    region.contains(point).then_some(HandleId::Move)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn limits() -> HandleLimits {
        HandleLimits {
            canvas: CanvasBounds {
                width: 800.0,
                height: 600.0,
            },
            min_size: 30.0,
            move_buffer: 50.0,
            rotation_snap_degrees: 15.0,
        }
    }

    fn base() -> CropRegion {
        CropRegion::new(100.0, 100.0, 200.0, 280.0)
    }

    fn drag(handle: HandleId, dx: f64, dy: f64, ratio: Option<f64>) -> CropRegion {
        transform(handle, &base(), Point::new(dx, dy), Point::default(), ratio, &limits())
    }

    #[test]
    fn test_handle_names_parse() {
        for handle in HandleId::ALL {
            assert_eq!(handle.name().parse::<HandleId>(), Ok(handle));
        }
        assert!(matches!(
            "nw".parse::<HandleId>(),
            Err(EditorError::UnknownHandle(_))
        ));
        assert!(HandleId::Top.is_resize());
        assert!(!HandleId::Move.is_resize());
        assert!(!HandleId::Rotate.is_resize());
    }

    #[test]
    fn test_bottom_right_keeps_top_left() {
        let r = drag(HandleId::BottomRight, 20.0, -5.0, None);
        assert_eq!(r, CropRegion::new(100.0, 100.0, 220.0, 275.0));
    }

    #[test]
    fn test_top_left_keeps_bottom_right() {
        let r = drag(HandleId::TopLeft, 40.0, -60.0, None);
        assert_eq!(r.right(), 300.0);
        assert_eq!(r.bottom(), 380.0);
        assert_eq!(r.width, 160.0);
        assert_eq!(r.height, 340.0);
    }

    #[test]
    fn test_top_right_and_bottom_left_fixed_corners() {
        let r = drag(HandleId::TopRight, 50.0, 50.0, None);
        assert_eq!((r.x, r.bottom()), (100.0, 380.0));
        assert_eq!((r.width, r.height), (250.0, 230.0));

        let r = drag(HandleId::BottomLeft, 50.0, 50.0, None);
        assert_eq!((r.right(), r.y), (300.0, 100.0));
        assert_eq!((r.width, r.height), (150.0, 330.0));
    }

    #[test]
    fn test_edges_move_one_axis() {
        let r = drag(HandleId::Top, 35.0, 20.0, None);
        assert_eq!(r, CropRegion::new(100.0, 120.0, 200.0, 260.0));

        let r = drag(HandleId::Bottom, 35.0, 20.0, None);
        assert_eq!(r, CropRegion::new(100.0, 100.0, 200.0, 300.0));

        let r = drag(HandleId::Left, 20.0, 35.0, None);
        assert_eq!(r, CropRegion::new(120.0, 100.0, 180.0, 280.0));

        let r = drag(HandleId::Right, 20.0, 35.0, None);
        assert_eq!(r, CropRegion::new(100.0, 100.0, 220.0, 280.0));
    }

    #[test]
    fn test_overshoot_is_floored_inline() {
        // Dragging past the opposite corner never produces a degenerate box
        let r = drag(HandleId::BottomRight, -500.0, -500.0, None);
        assert_eq!((r.width, r.height), (30.0, 30.0));
        assert_eq!((r.x, r.y), (100.0, 100.0));

        let r = drag(HandleId::TopLeft, 500.0, 500.0, None);
        assert_eq!((r.width, r.height), (30.0, 30.0));
        assert_eq!((r.right(), r.bottom()), (300.0, 380.0));
    }

    #[test]
    fn test_resize_stops_at_canvas() {
        let r = drag(HandleId::BottomRight, 2000.0, 2000.0, None);
        assert_eq!((r.x, r.y), (100.0, 100.0));
        assert_eq!((r.right(), r.bottom()), (800.0, 600.0));

        let r = drag(HandleId::TopLeft, -2000.0, -2000.0, None);
        assert_eq!((r.x, r.y), (0.0, 0.0));
        assert_eq!((r.right(), r.bottom()), (300.0, 380.0));
    }

    #[test]
    fn test_right_edge_with_square_ratio() {
        let r = drag(HandleId::Right, 200.0, 0.0, Some(1.0));
        assert!((r.width - 400.0).abs() < EPS);
        assert!((r.height - 400.0).abs() < EPS);
        assert_eq!(r.x, 100.0);
        // Vertical center stays at 240
        assert!((r.center().y - 240.0).abs() < EPS);
    }

    #[test]
    fn test_corner_with_ratio_derives_height() {
        let r = drag(HandleId::BottomRight, 100.0, 0.0, Some(1.0));
        assert_eq!((r.x, r.y), (100.0, 100.0));
        assert!((r.width - 300.0).abs() < EPS);
        assert!((r.height - 300.0).abs() < EPS);
    }

    #[test]
    fn test_top_edge_with_ratio_centers_width() {
        let r = drag(HandleId::Top, 0.0, -20.0, Some(1.0));
        assert!((r.height - 300.0).abs() < EPS);
        assert!((r.width - 300.0).abs() < EPS);
        assert_eq!(r.bottom(), 380.0);
        assert!((r.center().x - 200.0).abs() < EPS);
    }

    #[test]
    fn test_move_translates() {
        let r = drag(HandleId::Move, 25.0, -15.0, None);
        assert_eq!(r, CropRegion::new(125.0, 85.0, 200.0, 280.0));
    }

    #[test]
    fn test_move_may_leave_canvas_partially() {
        // Resize handles stay on-canvas; moving is deliberately looser
        let r = drag(HandleId::Move, -250.0, 0.0, None);
        assert_eq!(r.x, -150.0);
        assert!(r.x < 0.0);

        let r = drag(HandleId::Move, 5000.0, 5000.0, None);
        assert_eq!((r.x, r.y), (750.0, 550.0));
    }

    #[test]
    fn test_rotate_snaps_and_keeps_box() {
        // Center of base is (200, 240); pointer straight below -> 90 degrees
        let pointer = Point::new(203.0, 400.0);
        let r = transform(
            HandleId::Rotate,
            &base(),
            Point::default(),
            pointer,
            None,
            &limits(),
        );
        assert_eq!(r.rotation_degrees, 90.0);
        assert_eq!((r.x, r.y, r.width, r.height), (100.0, 100.0, 200.0, 280.0));
    }

    #[test]
    fn test_hit_test_priorities() {
        let r = base();
        assert_eq!(hit_test(&r, Point::new(330.0, 240.0), 10.0, 30.0), Some(HandleId::Rotate));
        assert_eq!(hit_test(&r, Point::new(200.0, 70.0), 10.0, 30.0), None);
        assert_eq!(hit_test(&r, Point::new(103.0, 98.0), 10.0, 30.0), Some(HandleId::TopLeft));
        assert_eq!(hit_test(&r, Point::new(298.0, 382.0), 10.0, 30.0), Some(HandleId::BottomRight));
        assert_eq!(hit_test(&r, Point::new(200.0, 104.0), 10.0, 30.0), Some(HandleId::Top));
        assert_eq!(hit_test(&r, Point::new(200.0, 375.0), 10.0, 30.0), Some(HandleId::Bottom));
        assert_eq!(hit_test(&r, Point::new(95.0, 200.0), 10.0, 30.0), Some(HandleId::Left));
        assert_eq!(hit_test(&r, Point::new(305.0, 200.0), 10.0, 30.0), Some(HandleId::Right));
        assert_eq!(hit_test(&r, Point::new(200.0, 200.0), 10.0, 30.0), Some(HandleId::Move));
        assert_eq!(hit_test(&r, Point::new(500.0, 500.0), 10.0, 30.0), None);
    }

    #[test]
    fn test_hit_test_follows_rotation() {
        let r = base().with_rotation(90.0);
        let [tl, tr, br, bl] = r.corners();
        assert_eq!(hit_test(&r, tl, 10.0, 30.0), Some(HandleId::TopLeft));
        assert_eq!(hit_test(&r, tr, 10.0, 30.0), Some(HandleId::TopRight));
        assert_eq!(hit_test(&r, br, 10.0, 30.0), Some(HandleId::BottomRight));
        assert_eq!(hit_test(&r, bl, 10.0, 30.0), Some(HandleId::BottomLeft));
        assert_eq!(hit_test(&r, r.center(), 10.0, 30.0), Some(HandleId::Move));
        // Where the corner would be without rotation is now empty canvas
        assert_eq!(hit_test(&r, Point::new(100.0, 100.0), 10.0, 30.0), None);
    }

    #[test]
    fn test_grabbing_knob_keeps_rotation() {
        for angle in [0.0, 45.0, 90.0, 300.0] {
            let r = base().with_rotation(angle);
            let knob = rotate_knob(&r, 30.0);
            assert_eq!(hit_test(&r, knob, 10.0, 30.0), Some(HandleId::Rotate));

            let nudged = Point::new(knob.x + 1.0, knob.y);
            let out = transform(HandleId::Rotate, &r, Point::default(), nudged, None, &limits());
            assert_eq!(out.rotation_degrees, angle);
        }
    }

    #[test]
    fn test_unrotated_knob_is_right_of_region() {
        let knob = rotate_knob(&base(), 30.0);
        assert!((knob.x - 330.0).abs() < EPS);
        assert!((knob.y - 240.0).abs() < EPS);
    }

    #[test]
    fn test_parked_region_resize_keeps_size() {
        // A move may leave the region hanging off the left edge
        let parked = CropRegion::new(-150.0, 140.0, 200.0, 200.0);
        for handle in HandleId::ALL.into_iter().filter(|h| h.is_resize()) {
            for ratio in [None, Some(1.0)] {
                let r = transform(handle, &parked, Point::default(), Point::default(), ratio, &limits());
                assert!((r.width - 200.0).abs() < EPS, "{handle} {ratio:?}: {r:?}");
                assert!((r.height - 200.0).abs() < EPS, "{handle} {ratio:?}: {r:?}");
                assert!(r.x >= 0.0, "{handle} {ratio:?}: {r:?}");
            }
        }
    }

    #[test]
    fn test_parked_region_corners_agree() {
        let parked = CropRegion::new(-150.0, 140.0, 200.0, 200.0);
        let tl = transform(HandleId::TopLeft, &parked, Point::default(), Point::default(), None, &limits());
        let br = transform(HandleId::BottomRight, &parked, Point::default(), Point::default(), None, &limits());
        assert_eq!(tl, br);
        assert_eq!(tl, CropRegion::new(0.0, 140.0, 200.0, 200.0));
    }
}
