//! Pointer-drag interpretation.
//!
//! A drag runs Idle -> Dragging -> Idle. Pointer-down on a handle captures an
//! anchor and the region as it was at that moment; every pointer-move
//! recomputes the candidate from that snapshot, never from the previous
//! candidate, so duplicate or reordered move events cannot drift the result.
//! Only pointer-up (or a forced end) reaches the store.
//!
//! The transient [`DragSession`] and the durable
//! [`CropRegionStore`](crate::store::CropRegionStore) are separate types:
//! moves only ever touch the session.

mod handles;

pub use handles::{hit_test, rotate_knob, transform, HandleId, HandleLimits};

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::geometry::{
    apply_aspect_ratio, constrain_to_canvas, quantize, CanvasBounds, CropRegion, Point,
};
use crate::store::CropRegionStore;

/// Pointer and region position captured at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragAnchor {
    pub pointer_x: f64,
    pub pointer_y: f64,
    pub region_x: f64,
    pub region_y: f64,
}

/// State of one in-progress drag. Never historized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub handle: HandleId,
    pub anchor: DragAnchor,
    /// Region at pointer-down; every candidate is derived from it.
    pub base: CropRegion,
    /// Latest candidate; equals `base` until the first move.
    pub candidate: CropRegion,
}

impl DragSession {
    fn new(handle: HandleId, pointer: Point, base: CropRegion) -> Self {
        Self {
            handle,
            anchor: DragAnchor {
                pointer_x: pointer.x,
                pointer_y: pointer.y,
                region_x: base.x,
                region_y: base.y,
            },
            base,
            candidate: base,
        }
    }
}

/// Turns pointer events into candidate regions and commits them on release.
#[derive(Debug, Clone)]
pub struct DragController {
    config: EditorConfig,
    session: Option<DragSession>,
}

impl DragController {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn active_handle(&self) -> Option<HandleId> {
        self.session.map(|s| s.handle)
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Latest candidate of the active drag.
    pub fn candidate(&self) -> Option<CropRegion> {
        self.session.map(|s| s.candidate)
    }

    /// Start a drag on `handle` from `pointer`.
    ///
    /// Ignored (returns `false`) when no surface is attached or a drag is
    /// already running.
    pub fn begin(
        &mut self,
        handle: HandleId,
        pointer: Point,
        base: CropRegion,
        surface: Option<CanvasBounds>,
    ) -> bool {
        if surface.is_none() {
            warn!("Ignoring {handle} drag: no rendering surface attached");
            return false;
        }
        if self.session.is_some() {
            return false;
        }
        debug!("Begin {handle} drag at ({}, {})", pointer.x, pointer.y);
        self.session = Some(DragSession::new(handle, pointer, base));
        true
    }

    /// Recompute the candidate for a pointer at `pointer`.
    ///
    /// Returns `None` when idle.
    pub fn update(
        &mut self,
        pointer: Point,
        canvas: CanvasBounds,
        ratio: Option<f64>,
    ) -> Option<CropRegion> {
        let session = self.session.as_mut()?;
        let step = self.config.resize_step;
        let delta = Point::new(
            quantize(pointer.x - session.anchor.pointer_x, step),
            quantize(pointer.y - session.anchor.pointer_y, step),
        );

        let limits = HandleLimits {
            canvas,
            min_size: self.config.min_size,
            move_buffer: self.config.move_buffer,
            rotation_snap_degrees: self.config.rotation_snap_degrees,
        };
        let moved = transform(session.handle, &session.base, delta, pointer, ratio, &limits);

        let candidate = if session.handle.is_resize() {
            let shaped = apply_aspect_ratio(moved, ratio, canvas, limits.min_size);
            constrain_to_canvas(shaped, canvas, limits.min_size)
        } else {
            moved
        };

        trace!("{} drag candidate {:?}", session.handle, candidate);
        session.candidate = candidate;
        Some(candidate)
    }

    /// End the drag and commit the last candidate.
    ///
    /// A drag that never changed the region commits nothing. Returns the
    /// region that is now current, or `None` when idle.
    pub fn finish(&mut self, store: &mut CropRegionStore) -> Option<CropRegion> {
        let session = self.session.take()?;
        if session.candidate != session.base {
            store.commit(session.candidate);
        }
        debug!("End {} drag", session.handle);
        Some(store.current_region())
    }

    /// Drop the drag without committing. Returns the region at drag start.
    pub fn cancel(&mut self) -> Option<CropRegion> {
        let session = self.session.take()?;
        debug!("Cancel {} drag", session.handle);
        Some(session.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> CanvasBounds {
        CanvasBounds {
            width: 800.0,
            height: 600.0,
        }
    }

    fn start() -> CropRegion {
        CropRegion::new(100.0, 100.0, 200.0, 280.0)
    }

    fn setup() -> (DragController, CropRegionStore) {
        (
            DragController::new(EditorConfig::default()),
            CropRegionStore::new(start(), 50),
        )
    }

    #[test]
    fn test_begin_requires_surface() {
        let (mut drag, store) = setup();
        assert!(!drag.begin(HandleId::Move, Point::new(150.0, 150.0), store.current_region(), None));
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_begin_captures_anchor() {
        let (mut drag, store) = setup();
        assert!(drag.begin(
            HandleId::BottomRight,
            Point::new(300.0, 380.0),
            store.current_region(),
            Some(canvas())
        ));
        let session = drag.session().unwrap();
        assert_eq!(session.anchor.pointer_x, 300.0);
        assert_eq!(session.anchor.region_y, 100.0);
        assert_eq!(drag.active_handle(), Some(HandleId::BottomRight));
    }

    #[test]
    fn test_second_begin_ignored() {
        let (mut drag, store) = setup();
        drag.begin(HandleId::Move, Point::new(150.0, 150.0), start(), Some(canvas()));
        assert!(!drag.begin(HandleId::Rotate, Point::new(0.0, 0.0), store.current_region(), Some(canvas())));
        assert_eq!(drag.active_handle(), Some(HandleId::Move));
    }

    #[test]
    fn test_update_when_idle_is_none() {
        let (mut drag, _) = setup();
        assert_eq!(drag.update(Point::new(1.0, 1.0), canvas(), None), None);
    }

    #[test]
    fn test_bottom_right_scenario_quantizes() {
        let (mut drag, mut store) = setup();
        drag.begin(HandleId::BottomRight, Point::new(300.0, 380.0), store.current_region(), Some(canvas()));

        // Raw (23, -7) snaps to (20, -5)
        let r = drag.update(Point::new(323.0, 373.0), canvas(), None).unwrap();
        assert_eq!(r, CropRegion::new(100.0, 100.0, 220.0, 275.0));

        // Nothing committed yet
        assert_eq!(store.current_region(), start());
        assert_eq!(store.history_len(), 1);

        let committed = drag.finish(&mut store).unwrap();
        assert_eq!(committed, CropRegion::new(100.0, 100.0, 220.0, 275.0));
        assert_eq!(store.history_len(), 2);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_moves_are_not_cumulative() {
        let (mut drag, store) = setup();
        drag.begin(HandleId::Move, Point::new(150.0, 150.0), store.current_region(), Some(canvas()));
        drag.update(Point::new(170.0, 150.0), canvas(), None);
        drag.update(Point::new(170.0, 150.0), canvas(), None);
        let r = drag.update(Point::new(170.0, 150.0), canvas(), None).unwrap();
        assert_eq!(r.x, 120.0);

        // An out-of-order earlier event just wins until the next one
        let r = drag.update(Point::new(160.0, 150.0), canvas(), None).unwrap();
        assert_eq!(r.x, 110.0);
    }

    #[test]
    fn test_square_ratio_right_edge() {
        let (mut drag, store) = setup();
        drag.begin(HandleId::Right, Point::new(300.0, 240.0), store.current_region(), Some(canvas()));
        let r = drag.update(Point::new(500.0, 240.0), canvas(), Some(1.0)).unwrap();
        assert!((r.width - 400.0).abs() < 1e-9);
        assert!((r.height - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotate_commits_snapped_angle() {
        let (mut drag, mut store) = setup();
        drag.begin(HandleId::Rotate, Point::new(330.0, 240.0), store.current_region(), Some(canvas()));
        // Center (200, 240); pointer to the right and slightly down -> ~6 degrees
        drag.update(Point::new(400.0, 262.0), canvas(), None);
        let committed = drag.finish(&mut store).unwrap();
        // 6.3 degrees snaps down to 0, which equals the base: nothing committed
        assert_eq!(committed.rotation_degrees, 0.0);
        assert_eq!(store.history_len(), 1);

        drag.begin(HandleId::Rotate, Point::new(330.0, 240.0), store.current_region(), Some(canvas()));
        drag.update(Point::new(400.0, 440.0), canvas(), None);
        let committed = drag.finish(&mut store).unwrap();
        assert_eq!(committed.rotation_degrees, 45.0);
        assert_eq!(store.history_len(), 2);
    }

    #[test]
    fn test_cancel_discards_candidate() {
        let (mut drag, mut store) = setup();
        drag.begin(HandleId::Move, Point::new(150.0, 150.0), store.current_region(), Some(canvas()));
        drag.update(Point::new(250.0, 250.0), canvas(), None);
        assert_eq!(drag.cancel(), Some(start()));
        assert!(!drag.is_dragging());
        assert_eq!(drag.finish(&mut store), None);
        assert_eq!(store.history_len(), 1);
    }

    #[test]
    fn test_click_without_motion_commits_nothing() {
        let (mut drag, mut store) = setup();
        drag.begin(HandleId::TopLeft, Point::new(100.0, 100.0), store.current_region(), Some(canvas()));
        drag.update(Point::new(101.0, 102.0), canvas(), None);
        assert_eq!(drag.finish(&mut store), Some(start()));
        assert_eq!(store.history_len(), 1);
    }
}
