//! Core geometry types for the crop editor.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EditorError;

/// A point in surface-local coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height of the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasBounds {
    pub width: f64,
    pub height: f64,
}

impl CanvasBounds {
    /// Create canvas bounds, rejecting non-finite or non-positive sizes.
    pub fn new(width: f64, height: f64) -> Result<Self, EditorError> {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Ok(Self { width, height })
        } else {
            Err(EditorError::InvalidCanvas { width, height })
        }
    }
}

/// Size of the placed image on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

/// Where the source image currently sits on the rendering surface.
///
/// Supplied by the renderer; the editor only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImagePlacement {
    pub position: Point,
    pub dimensions: Dimensions,
}

impl ImagePlacement {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            position: Point::new(x, y),
            dimensions: Dimensions { width, height },
        }
    }

    /// An image filling the whole canvas.
    pub fn covering(canvas: CanvasBounds) -> Self {
        Self::new(0.0, 0.0, canvas.width, canvas.height)
    }

    /// The image rectangle as an unrotated region.
    pub fn as_region(&self) -> CropRegion {
        CropRegion::new(
            self.position.x,
            self.position.y,
            self.dimensions.width,
            self.dimensions.height,
        )
    }
}

/// The rectangle the user is positioning over the image.
///
/// `x`/`y` is the top-left corner in surface pixels. Rotation is about the
/// center, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation_degrees: f64,
}

impl CropRegion {
    /// Create an unrotated region.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation_degrees: 0.0,
        }
    }

    pub fn with_rotation(self, rotation_degrees: f64) -> Self {
        Self {
            rotation_degrees,
            ..self
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether `point` lies strictly inside the unrotated rectangle.
    pub fn contains(&self, point: Point) -> bool {
        point.x > self.x && point.x < self.right() && point.y > self.y && point.y < self.bottom()
    }

    /// The four corners rotated about the center, in tl, tr, br, bl order.
    ///
    /// Positive angles rotate clockwise on screen (y grows downward).
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.right(), self.y),
            Point::new(self.right(), self.bottom()),
            Point::new(self.x, self.bottom()),
        ]
        .map(|p| self.to_surface(p))
    }

    /// Map a point of the unrotated rectangle to where it is drawn.
    pub fn to_surface(&self, local: Point) -> Point {
        rotate_about(self.center(), local, self.rotation_degrees)
    }

    /// Map a drawn point back into the unrotated rectangle's frame.
    pub fn to_local(&self, surface: Point) -> Point {
        rotate_about(self.center(), surface, -self.rotation_degrees)
    }
}

fn rotate_about(center: Point, point: Point, degrees: f64) -> Point {
    if degrees == 0.0 {
        return point;
    }
    let (sin, cos) = degrees.to_radians().sin_cos();
    let (dx, dy) = (point.x - center.x, point.y - center.y);
    Point::new(center.x + dx * cos - dy * sin, center.y + dx * sin + dy * cos)
}

/// Named width:height constraint applied while resizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectRatioMode {
    /// 2.5in x 3.5in trading card.
    #[default]
    Card,
    Landscape,
    Portrait,
    Square,
    /// Unconstrained.
    Free,
}

impl AspectRatioMode {
    pub const ALL: [AspectRatioMode; 5] = [
        AspectRatioMode::Card,
        AspectRatioMode::Landscape,
        AspectRatioMode::Portrait,
        AspectRatioMode::Square,
        AspectRatioMode::Free,
    ];

    /// Width divided by height, or `None` for free mode.
    pub fn ratio(self) -> Option<f64> {
        match self {
            AspectRatioMode::Card => Some(5.0 / 7.0),
            AspectRatioMode::Landscape => Some(4.0 / 3.0),
            AspectRatioMode::Portrait => Some(3.0 / 4.0),
            AspectRatioMode::Square => Some(1.0),
            AspectRatioMode::Free => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectRatioMode::Card => "card",
            AspectRatioMode::Landscape => "landscape",
            AspectRatioMode::Portrait => "portrait",
            AspectRatioMode::Square => "square",
            AspectRatioMode::Free => "free",
        }
    }
}

impl fmt::Display for AspectRatioMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AspectRatioMode {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AspectRatioMode::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| EditorError::UnknownAspectRatio(s.to_string()))
    }
}

/// A crop expressed relative to the placed image, in `[0, 1]` units.
///
/// (0, 0) is the image's top-left corner and (1, 1) its bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedCrop {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}
