//! Stateless geometry helpers for JavaScript.
//!
//! Lets the UI validate a region before opening an editor (e.g. when
//! restoring a saved crop) without going through a session.

use cardcrop_core::{AspectRatioMode, CanvasBounds, CropRegion, EditorConfig, ImagePlacement};
use wasm_bindgen::prelude::*;

use crate::convert::{from_js, to_js, to_js_error};

/// Check that `region` covers at least `min_fraction` of its own area on
/// the image described by `placement`.
///
/// # Arguments
/// * `region` - `{x, y, width, height, rotationDegrees?}`
/// * `placement` - `{ position: {x, y}, dimensions: {width, height} }`
/// * `min_fraction` - Required overlap, 0.25 in the editor
#[wasm_bindgen]
pub fn has_valid_overlap(
    region: JsValue,
    placement: JsValue,
    min_fraction: f64,
) -> Result<bool, JsValue> {
    let region: CropRegion = from_js(region, "region")?;
    let placement: ImagePlacement = from_js(placement, "placement")?;
    Ok(cardcrop_core::has_valid_overlap(&region, &placement, min_fraction))
}

/// Clamp `region` inside a `width` x `height` canvas using the default
/// minimum size. Returns the clamped region.
#[wasm_bindgen]
pub fn constrain_to_canvas(region: JsValue, width: f64, height: f64) -> Result<JsValue, JsValue> {
    let region: CropRegion = from_js(region, "region")?;
    let canvas = CanvasBounds::new(width, height).map_err(to_js_error)?;
    let clamped = cardcrop_core::constrain_to_canvas(region, canvas, EditorConfig::default().min_size);
    to_js(&clamped)
}

/// Width/height ratio for a mode name, or `undefined` for `free`.
#[wasm_bindgen]
pub fn aspect_ratio_value(mode: &str) -> Result<Option<f64>, JsValue> {
    let mode: AspectRatioMode = mode.parse().map_err(to_js_error)?;
    Ok(mode.ratio())
}

/// All selectable aspect-ratio mode names, default first.
#[wasm_bindgen]
pub fn aspect_ratio_modes() -> Vec<String> {
    AspectRatioMode::ALL
        .iter()
        .map(|m| m.name().to_string())
        .collect()
}
