//! Error types for the crop editor.
//!
//! Geometry itself never fails: out-of-bounds and undersized regions are
//! corrected silently. Errors only arise where text or numbers enter the
//! editor from the UI layer.

use thiserror::Error;

/// Errors raised while parsing or validating editor inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    /// A configuration value is out of its allowed range.
    #[error("Invalid editor configuration: {0}")]
    InvalidConfig(String),

    /// A name that is not one of the ten handle names.
    #[error("Unknown handle: {0}")]
    UnknownHandle(String),

    /// An aspect ratio mode name that is not recognized.
    #[error("Unknown aspect ratio mode: {0}")]
    UnknownAspectRatio(String),

    /// A keyboard command name that is not recognized.
    #[error("Unknown editor command: {0}")]
    UnknownCommand(String),

    /// The rendering surface has an unusable size.
    #[error("Invalid canvas size: {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },
}
