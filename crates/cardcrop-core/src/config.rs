//! Editor tuning constants.
//!
//! The defaults below are what the card editor ships with. The UI layer may
//! override any subset of them by passing a partial object; missing fields
//! fall back to these values through `#[serde(default)]`.

use serde::{Deserialize, Serialize};

use crate::error::EditorError;

/// Smallest allowed crop width or height, in surface pixels.
pub const MIN_SIZE: f64 = 30.0;
/// Grid that pointer deltas are quantized to during move/resize.
pub const RESIZE_STEP: f64 = 5.0;
/// Increment that rotation snaps to.
pub const ROTATION_SNAP_DEGREES: f64 = 15.0;
/// Pixels of the region that must stay on-canvas while moving.
pub const MOVE_BUFFER: f64 = 50.0;
/// Fraction of the region's area that must lie over the image.
pub const MIN_OVERLAP_FRACTION: f64 = 0.25;
/// Maximum number of undo snapshots kept.
pub const HISTORY_LIMIT: usize = 50;
/// Pointer distance within which a handle is grabbed.
pub const HANDLE_TOLERANCE: f64 = 10.0;
/// Distance of the rotate knob beyond the right edge, along the region's angle.
pub const ROTATE_HANDLE_OFFSET: f64 = 30.0;

/// Tunable parameters of a crop editing session.
///
/// Field names are camelCase on the wire (`historyLimit`, `minSize`, ...),
/// matching the region and outcome objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub min_size: f64,
    pub resize_step: f64,
    pub rotation_snap_degrees: f64,
    pub move_buffer: f64,
    pub min_overlap_fraction: f64,
    pub history_limit: usize,
    pub handle_tolerance: f64,
    pub rotate_handle_offset: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_size: MIN_SIZE,
            resize_step: RESIZE_STEP,
            rotation_snap_degrees: ROTATION_SNAP_DEGREES,
            move_buffer: MOVE_BUFFER,
            min_overlap_fraction: MIN_OVERLAP_FRACTION,
            history_limit: HISTORY_LIMIT,
            handle_tolerance: HANDLE_TOLERANCE,
            rotate_handle_offset: ROTATE_HANDLE_OFFSET,
        }
    }
}

impl EditorConfig {
    /// Create a configuration with the default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), EditorError> {
        positive("min_size", self.min_size)?;
        positive("resize_step", self.resize_step)?;
        positive("rotation_snap_degrees", self.rotation_snap_degrees)?;
        positive("handle_tolerance", self.handle_tolerance)?;
        non_negative("move_buffer", self.move_buffer)?;
        non_negative("rotate_handle_offset", self.rotate_handle_offset)?;

        if !(self.min_overlap_fraction > 0.0 && self.min_overlap_fraction <= 1.0) {
            return Err(EditorError::InvalidConfig(format!(
                "min_overlap_fraction must be in (0, 1], got {}",
                self.min_overlap_fraction
            )));
        }
        if self.history_limit == 0 {
            return Err(EditorError::InvalidConfig(
                "history_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn positive(name: &str, value: f64) -> Result<(), EditorError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EditorError::InvalidConfig(format!(
            "{name} must be a positive number, got {value}"
        )))
    }
}

fn non_negative(name: &str, value: f64) -> Result<(), EditorError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EditorError::InvalidConfig(format!(
            "{name} must not be negative, got {value}"
        )))
    }
}
