//! Cardcrop Core - crop-region editor engine
//!
//! This crate provides the geometry and state behind the card cropping tool:
//! region manipulation, handle-based resize, aspect-ratio locking,
//! boundary/overlap constraints and undo/redo.
//!
//! # Module Structure
//!
//! - `geometry` - Pure rectangle, rotation, aspect-ratio and clamping math
//! - `store` - Committed region and bounded undo/redo history
//! - `drag` - Handle identifiers and pointer-drag interpretation
//! - `editor` - The session façade the UI layer drives
//! - `config` - Tunable constants
//!
//! # Data Flow
//!
//! Pointer events go to the drag controller, which derives a candidate
//! region from the drag-start snapshot, shapes and clamps it with the
//! geometry functions, and commits it to the store on release. The renderer
//! reads [`CropEditor::display_region`] every frame.
//!
//! Everything is single-threaded and synchronous; there is no I/O.

pub mod config;
pub mod drag;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod store;

pub use config::EditorConfig;
pub use drag::{DragController, DragSession, HandleId};
pub use editor::{CropEditor, CropOutcome, EditorCommand};
pub use error::EditorError;
pub use geometry::{
    apply_aspect_ratio, constrain_to_canvas, has_valid_overlap, AspectRatioMode, CanvasBounds,
    CropRegion, ImagePlacement, NormalizedCrop, Point,
};
pub use store::CropRegionStore;
