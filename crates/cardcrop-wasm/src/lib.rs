//! Cardcrop WASM - WebAssembly bindings for the card crop editor
//!
//! This crate exposes the cardcrop-core editor to the TypeScript UI that
//! draws the crop overlay and forwards pointer events.
//!
//! # Module Structure
//!
//! - `editor` - `JsCropEditor`, one editing session
//! - `geometry` - Stateless overlap/clamp/aspect helpers
//! - `logging` - Routes core `log` output to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropEditor, set_log_level } from '@cardcrop/wasm';
//!
//! await init();
//! set_log_level('debug');
//!
//! const editor = new JsCropEditor(canvas.width, canvas.height, placement);
//! ```

use log::LevelFilter;
use wasm_bindgen::prelude::*;

mod convert;
mod editor;
mod geometry;
mod logging;

pub use editor::JsCropEditor;
pub use geometry::{aspect_ratio_modes, aspect_ratio_value, constrain_to_canvas, has_valid_overlap};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logging::init(LevelFilter::Warn);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Change console verbosity (`off`, `error`, `warn`, `info`, `debug`, `trace`).
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let level = logging::parse_level(level)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown log level: {}", level)))?;
    logging::init(level);
    Ok(())
}
