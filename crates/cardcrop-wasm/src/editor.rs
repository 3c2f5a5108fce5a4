//! Crop editor WASM bindings.
//!
//! Wraps the core `CropEditor` in a class the TypeScript crop tool holds for
//! the lifetime of one editing session. Pointer handlers call straight into
//! it; the overlay reads the display region through the getters each frame.

use cardcrop_core::{
    AspectRatioMode, CanvasBounds, CropEditor, CropRegion, EditorCommand, EditorConfig, HandleId,
    ImagePlacement, Point,
};
use wasm_bindgen::prelude::*;

use crate::convert::{from_optional, to_js, to_js_error};

/// Crop editor session for JavaScript.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const editor = new JsCropEditor(800, 600, { position: { x: 0, y: 0 },
///   dimensions: { width: 800, height: 600 } }, undefined, { historyLimit: 100 });
///
/// canvas.onpointerdown = (e) => editor.pointer_down(e.offsetX, e.offsetY);
/// canvas.onpointermove = (e) => { if (editor.pointer_move(e.offsetX, e.offsetY)) draw(); };
/// canvas.onpointerup = () => editor.pointer_up();
///
/// const { region, imageCrop, hasValidOverlap } = editor.apply();
/// ```
#[wasm_bindgen]
pub struct JsCropEditor {
    inner: CropEditor,
}

#[wasm_bindgen]
impl JsCropEditor {
    /// Open an editing session.
    ///
    /// # Arguments
    /// * `canvas_width`, `canvas_height` - Rendering surface size
    /// * `placement` - `{ position: {x, y}, dimensions: {width, height} }` of the image
    /// * `initial` - Optional `{x, y, width, height, rotationDegrees}` start region
    /// * `config` - Optional partial `EditorConfig` with camelCase keys
    ///   (`historyLimit`, `minSize`, ...); missing fields use defaults
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas_width: f64,
        canvas_height: f64,
        placement: JsValue,
        initial: JsValue,
        config: JsValue,
    ) -> Result<JsCropEditor, JsValue> {
        let canvas = CanvasBounds::new(canvas_width, canvas_height).map_err(to_js_error)?;
        let placement: ImagePlacement =
            from_optional(placement)?.unwrap_or_else(|| ImagePlacement::covering(canvas));
        let initial: Option<CropRegion> = from_optional(initial)?;
        let config: EditorConfig = from_optional(config)?.unwrap_or_default();

        let inner = CropEditor::new(canvas, placement, initial, config).map_err(to_js_error)?;
        Ok(Self { inner })
    }

    /// Start a drag at (`x`, `y`).
    ///
    /// Pass a handle name (`move`, `tl`, `tr`, `bl`, `br`, `t`, `b`, `l`,
    /// `r`, `rotate`) or leave it out to hit-test. Returns whether a drag
    /// started.
    pub fn pointer_down(&mut self, x: f64, y: f64, handle: Option<String>) -> Result<bool, JsValue> {
        let handle = handle
            .map(|name| name.parse::<HandleId>())
            .transpose()
            .map_err(to_js_error)?;
        Ok(self.inner.pointer_down(Point::new(x, y), handle))
    }

    /// Feed a pointer position into the active drag. Returns whether the
    /// display region may have changed.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.inner.pointer_move(Point::new(x, y)).is_some()
    }

    /// Release the pointer and commit the drag. Returns whether a drag ended.
    pub fn pointer_up(&mut self) -> bool {
        self.inner.pointer_up().is_some()
    }

    /// End a drag whose pointer-up never arrived (e.g. on blur).
    pub fn force_end_drag(&mut self) -> bool {
        self.inner.force_end_drag().is_some()
    }

    /// Abandon the active drag without committing.
    pub fn cancel(&mut self) -> bool {
        self.inner.cancel()
    }

    /// Name of the handle under (`x`, `y`), for cursor feedback.
    ///
    /// Matches the rotated overlay drawn from `corners()` and `rotate_knob()`.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<String> {
        self.inner
            .hit_test(Point::new(x, y))
            .map(|h| h.name().to_string())
    }

    pub fn undo(&mut self) -> bool {
        self.inner.undo().is_some()
    }

    pub fn redo(&mut self) -> bool {
        self.inner.redo().is_some()
    }

    #[wasm_bindgen(getter)]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    #[wasm_bindgen(getter)]
    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }

    #[wasm_bindgen(getter)]
    pub fn is_dragging(&self) -> bool {
        self.inner.is_dragging()
    }

    #[wasm_bindgen(getter)]
    pub fn active_handle(&self) -> Option<String> {
        self.inner.active_handle().map(|h| h.name().to_string())
    }

    #[wasm_bindgen(getter)]
    pub fn show_grid(&self) -> bool {
        self.inner.show_grid()
    }

    pub fn toggle_grid(&mut self) -> bool {
        self.inner.toggle_grid()
    }

    /// Current aspect-ratio mode name.
    #[wasm_bindgen(getter)]
    pub fn aspect_ratio(&self) -> String {
        self.inner.aspect_ratio().name().to_string()
    }

    /// Switch aspect-ratio mode (`card`, `landscape`, `portrait`, `square`, `free`).
    pub fn set_aspect_ratio(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode: AspectRatioMode = mode.parse().map_err(to_js_error)?;
        self.inner.set_aspect_ratio(mode);
        Ok(())
    }

    /// Display region left edge (drag candidate while dragging).
    #[wasm_bindgen(getter)]
    pub fn x(&self) -> f64 {
        self.inner.display_region().x
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> f64 {
        self.inner.display_region().y
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 {
        self.inner.display_region().width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        self.inner.display_region().height
    }

    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> f64 {
        self.inner.display_region().rotation_degrees
    }

    /// Display region corners as a flat `[x0, y0, x1, y1, ...]` array in
    /// tl, tr, br, bl order, rotation applied.
    pub fn corners(&self) -> Vec<f64> {
        self.inner
            .display_region()
            .corners()
            .iter()
            .flat_map(|p| [p.x, p.y])
            .collect()
    }

    /// Rotate knob position as `[x, y]`. Grabbing it keeps the current angle.
    pub fn rotate_knob(&self) -> Vec<f64> {
        let knob = self.inner.rotate_knob();
        vec![knob.x, knob.y]
    }

    /// The committed region as `{x, y, width, height, rotationDegrees}`.
    pub fn region(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.region())
    }

    /// Replace the region without recording history (e.g. preset buttons).
    pub fn set_region(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.inner.set_region(CropRegion::new(x, y, width, height));
    }

    /// Replace the region and record it for undo.
    pub fn commit_region(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.inner.commit_region(CropRegion::new(x, y, width, height));
    }

    /// Restore the default centered region.
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Attach or resize the rendering surface.
    pub fn set_canvas(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        let canvas = CanvasBounds::new(width, height).map_err(to_js_error)?;
        self.inner.set_canvas(canvas);
        Ok(())
    }

    /// Mark the surface as unavailable; drags are ignored until `set_canvas`.
    pub fn detach_canvas(&mut self) {
        self.inner.detach_canvas();
    }

    pub fn set_image_placement(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.inner
            .set_image_placement(ImagePlacement::new(x, y, width, height));
    }

    /// Whether the committed region covers enough of the image to apply.
    #[wasm_bindgen(getter)]
    pub fn has_valid_overlap(&self) -> bool {
        cardcrop_core::has_valid_overlap(
            &self.inner.region(),
            &self.inner.placement(),
            self.inner.config().min_overlap_fraction,
        )
    }

    /// Finish any drag and return `{ region, imageCrop, hasValidOverlap }`.
    pub fn apply(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.apply())
    }

    /// Run a keyboard command (`apply`, `cancel`, `undo`, `redo`, `toggle-grid`).
    ///
    /// Returns the apply outcome for `apply`, otherwise `undefined`.
    pub fn execute(&mut self, command: &str) -> Result<JsValue, JsValue> {
        let command: EditorCommand = command.parse().map_err(to_js_error)?;
        match self.inner.execute(command) {
            Some(outcome) => to_js(&outcome),
            None => Ok(JsValue::UNDEFINED),
        }
    }
}

#[cfg(test)]
impl JsCropEditor {
    /// Build from already-parsed parts, bypassing `JsValue` conversion.
    pub(crate) fn from_parts(
        canvas: CanvasBounds,
        placement: ImagePlacement,
        initial: Option<CropRegion>,
    ) -> Self {
        let inner = CropEditor::new(canvas, placement, initial, EditorConfig::default())
            .expect("default config is valid");
        Self { inner }
    }
}
