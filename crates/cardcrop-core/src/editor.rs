//! The crop editor session.
//!
//! [`CropEditor`] is what the UI layer drives. It owns the surface and image
//! placement it was told about, the active aspect-ratio mode, the committed
//! state ([`CropRegionStore`]) and the in-flight drag ([`DragController`]).
//! Pointer events, toolbar buttons and keyboard shortcuts all end up in the
//! same handful of store operations.

use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::drag::{hit_test, rotate_knob, DragController, HandleId};
use crate::error::EditorError;
use crate::geometry::{
    apply_aspect_ratio, centered_region, constrain_to_canvas, has_valid_overlap, to_image_crop,
    AspectRatioMode, CanvasBounds, CropRegion, ImagePlacement, NormalizedCrop, Point,
};
use crate::store::CropRegionStore;

/// Share of the image the default region covers.
const DEFAULT_FILL: f64 = 0.8;

/// Keyboard-equivalent editor actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditorCommand {
    Apply,
    Cancel,
    Undo,
    Redo,
    ToggleGrid,
}

impl EditorCommand {
    pub fn name(self) -> &'static str {
        match self {
            EditorCommand::Apply => "apply",
            EditorCommand::Cancel => "cancel",
            EditorCommand::Undo => "undo",
            EditorCommand::Redo => "redo",
            EditorCommand::ToggleGrid => "toggle-grid",
        }
    }
}

impl fmt::Display for EditorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EditorCommand {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            EditorCommand::Apply,
            EditorCommand::Cancel,
            EditorCommand::Undo,
            EditorCommand::Redo,
            EditorCommand::ToggleGrid,
        ]
        .into_iter()
        .find(|c| c.name() == s)
        .ok_or_else(|| EditorError::UnknownCommand(s.to_string()))
    }
}

/// What the editor hands to the external extract operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropOutcome {
    /// Committed region in surface pixels.
    pub region: CropRegion,
    /// The same region relative to the placed image.
    pub image_crop: NormalizedCrop,
    /// Whether enough of the region covers the image. The caller decides
    /// whether to block or just warn.
    pub has_valid_overlap: bool,
}

/// One crop editing session.
#[derive(Debug, Clone)]
pub struct CropEditor {
    config: EditorConfig,
    canvas: CanvasBounds,
    attached: bool,
    placement: ImagePlacement,
    mode: AspectRatioMode,
    show_grid: bool,
    store: CropRegionStore,
    drag: DragController,
}

impl CropEditor {
    /// Open an editor on `canvas` with the image at `placement`.
    ///
    /// Without an `initial` region, a card-shaped region is centered on the
    /// image. Either way the starting region is clamped to the canvas and
    /// becomes the first history entry.
    pub fn new(
        canvas: CanvasBounds,
        placement: ImagePlacement,
        initial: Option<CropRegion>,
        config: EditorConfig,
    ) -> Result<Self, EditorError> {
        config.validate()?;
        let mode = AspectRatioMode::default();

        let start = match initial {
            Some(region) if is_finite(&region) => {
                constrain_to_canvas(region, canvas, config.min_size)
            }
            Some(region) => {
                warn!("Ignoring non-finite initial region {region:?}");
                centered_region(&placement, canvas, mode.ratio(), DEFAULT_FILL, config.min_size)
            }
            None => centered_region(&placement, canvas, mode.ratio(), DEFAULT_FILL, config.min_size),
        };

        Ok(Self {
            store: CropRegionStore::new(start, config.history_limit),
            drag: DragController::new(config.clone()),
            config,
            canvas,
            attached: true,
            placement,
            mode,
            show_grid: false,
        })
    }

    // ------------------------------------------------------------------
    // State queries
    // ------------------------------------------------------------------

    /// The committed region.
    pub fn region(&self) -> CropRegion {
        self.store.current_region()
    }

    /// What the overlay should draw: the drag candidate while dragging,
    /// otherwise the committed region.
    pub fn display_region(&self) -> CropRegion {
        self.drag.candidate().unwrap_or_else(|| self.store.current_region())
    }

    pub fn can_undo(&self) -> bool {
        self.store.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.store.can_redo()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn active_handle(&self) -> Option<HandleId> {
        self.drag.active_handle()
    }

    pub fn aspect_ratio(&self) -> AspectRatioMode {
        self.mode
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn placement(&self) -> ImagePlacement {
        self.placement
    }

    /// Surface bounds, or `None` while the surface is detached.
    pub fn surface(&self) -> Option<CanvasBounds> {
        self.attached.then_some(self.canvas)
    }

    pub fn history_len(&self) -> usize {
        self.store.history_len()
    }

    pub fn history_index(&self) -> usize {
        self.store.history_index()
    }

    /// Where the overlay should draw the rotate knob.
    pub fn rotate_knob(&self) -> Point {
        rotate_knob(&self.display_region(), self.config.rotate_handle_offset)
    }

    /// Handle under `point` on the committed region.
    pub fn hit_test(&self, point: Point) -> Option<HandleId> {
        hit_test(
            &self.store.current_region(),
            point,
            self.config.handle_tolerance,
            self.config.rotate_handle_offset,
        )
    }

    // ------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------

    /// Start a drag. With `handle` unset the handle is found by hit testing.
    ///
    /// A drag still running from a lost pointer-up is force-ended first.
    /// Returns whether a drag started.
    pub fn pointer_down(&mut self, point: Point, handle: Option<HandleId>) -> bool {
        if self.drag.is_dragging() {
            self.force_end_drag();
        }
        let Some(handle) = handle.or_else(|| self.hit_test(point)) else {
            return false;
        };
        self.drag
            .begin(handle, point, self.store.current_region(), self.surface())
    }

    /// Feed a pointer position into the active drag.
    pub fn pointer_move(&mut self, point: Point) -> Option<CropRegion> {
        let canvas = self.surface()?;
        self.drag.update(point, canvas, self.mode.ratio())
    }

    /// Finish the active drag and commit its result.
    pub fn pointer_up(&mut self) -> Option<CropRegion> {
        self.drag.finish(&mut self.store)
    }

    /// End a dangling drag as if the pointer had been released.
    pub fn force_end_drag(&mut self) -> Option<CropRegion> {
        if self.drag.is_dragging() {
            debug!("Force-ending dangling drag");
        }
        self.drag.finish(&mut self.store)
    }

    /// Abandon the active drag, leaving the committed region as it was.
    ///
    /// Returns whether a drag was cancelled.
    pub fn cancel(&mut self) -> bool {
        self.drag.cancel().is_some()
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    pub fn undo(&mut self) -> Option<CropRegion> {
        self.drag.cancel();
        self.store.undo()
    }

    pub fn redo(&mut self) -> Option<CropRegion> {
        self.drag.cancel();
        self.store.redo()
    }

    /// Switch the aspect-ratio mode.
    ///
    /// A constrained mode is applied to the committed region right away and
    /// the reshaped region is committed if it differs. Switching to free
    /// leaves the region alone.
    pub fn set_aspect_ratio(&mut self, mode: AspectRatioMode) -> CropRegion {
        debug!("Aspect ratio mode {} -> {}", self.mode, mode);
        self.mode = mode;
        if self.drag.is_dragging() {
            return self.display_region();
        }

        let current = self.store.current_region();
        let shaped = apply_aspect_ratio(current, mode.ratio(), self.canvas, self.config.min_size);
        if shaped != current {
            self.store.commit(shaped);
        }
        self.store.current_region()
    }

    /// Replace the committed region without recording history.
    pub fn set_region(&mut self, region: CropRegion) -> CropRegion {
        let region = constrain_to_canvas(region, self.canvas, self.config.min_size);
        self.store.set_region(region);
        region
    }

    /// Replace the committed region and record it for undo.
    pub fn commit_region(&mut self, region: CropRegion) -> CropRegion {
        let region = constrain_to_canvas(region, self.canvas, self.config.min_size);
        self.store.commit(region);
        region
    }

    /// Commit the default centered region for the current mode.
    pub fn reset(&mut self) -> CropRegion {
        self.drag.cancel();
        let region = centered_region(
            &self.placement,
            self.canvas,
            self.mode.ratio(),
            DEFAULT_FILL,
            self.config.min_size,
        );
        if region != self.store.current_region() {
            self.store.commit(region);
        }
        region
    }

    pub fn toggle_grid(&mut self) -> bool {
        self.show_grid = !self.show_grid;
        self.show_grid
    }

    /// Attach (or re-attach) the surface with new bounds.
    ///
    /// A running drag is force-ended, and the committed region is clamped to
    /// the new bounds without recording history.
    pub fn set_canvas(&mut self, canvas: CanvasBounds) {
        self.force_end_drag();
        self.canvas = canvas;
        self.attached = true;

        let current = self.store.current_region();
        let clamped = constrain_to_canvas(current, canvas, self.config.min_size);
        if clamped != current {
            self.store.set_region(clamped);
        }
    }

    /// Mark the surface as gone. New drags are ignored until it returns.
    pub fn detach_canvas(&mut self) {
        self.force_end_drag();
        self.attached = false;
    }

    pub fn set_image_placement(&mut self, placement: ImagePlacement) {
        self.placement = placement;
    }

    /// Hand the committed region to the extract step.
    ///
    /// Any running drag is force-ended first so its result is included.
    pub fn apply(&mut self) -> CropOutcome {
        self.force_end_drag();
        let region = self.store.current_region();
        let outcome = CropOutcome {
            region,
            image_crop: to_image_crop(&region, &self.placement),
            has_valid_overlap: has_valid_overlap(
                &region,
                &self.placement,
                self.config.min_overlap_fraction,
            ),
        };
        if !outcome.has_valid_overlap {
            warn!("Applying crop region with insufficient image overlap");
        }
        outcome
    }

    /// Run a keyboard-equivalent command. Only `apply` produces an outcome.
    pub fn execute(&mut self, command: EditorCommand) -> Option<CropOutcome> {
        match command {
            EditorCommand::Apply => return Some(self.apply()),
            EditorCommand::Cancel => {
                self.cancel();
            }
            EditorCommand::Undo => {
                self.undo();
            }
            EditorCommand::Redo => {
                self.redo();
            }
            EditorCommand::ToggleGrid => {
                self.toggle_grid();
            }
        }
        None
    }
}

fn is_finite(region: &CropRegion) -> bool {
    [
        region.x,
        region.y,
        region.width,
        region.height,
        region.rotation_degrees,
    ]
    .iter()
    .all(|v| v.is_finite())
}
