use serde::{Deserialize, Serialize};

use crate::geometry::DTransformation;
use crate::geometry::geo_enums::RotationPolicy;
use crate::opt::strategy::StrategyKind;

/// A single nesting call: the shapes, the sheet they have to fit on, the spacing and the allowed rotations.
/// Coordinates are in the caller's physical units (typically millimeters), Y-up.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NestRequest {
    pub shapes: Vec<ExtShape>,
    pub sheet_width: f64,
    pub sheet_height: f64,
    /// Minimum distance between any two placed shapes
    #[serde(default)]
    pub spacing: f64,
    #[serde(default)]
    pub rotation: RotationPolicy,
}

/// External representation of a shape to be nested
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtShape {
    /// Unique identifier within the request
    pub id: String,
    /// Ordered contour points
    pub points: Vec<[f64; 2]>,
    /// Whether the contour is closed. Open contours are nested as if they were closed.
    #[serde(default = "default_closed")]
    pub closed: bool,
}

fn default_closed() -> bool {
    true
}

/// External representation of a [`NestingResult`](crate::entities::NestingResult)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtSolution {
    pub bounding_width: f64,
    pub bounding_height: f64,
    pub density: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<StrategyKind>,
    /// One entry per shape, in request order
    pub placements: Vec<ExtPlacement>,
}

/// External representation of a [`PlacedShape`](crate::entities::PlacedShape)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtPlacement {
    pub id: String,
    /// The shape's points at their final position
    pub points: Vec<[f64; 2]>,
    pub closed: bool,
    /// The transformation that maps the requested points onto `points`
    pub transformation: ExtTransformation,
}

/// Proper rigid transformation: a rotation around the origin followed by a translation
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ExtTransformation {
    /// The rotation angle in degrees, counterclockwise positive
    pub rotation: f64,
    /// The translation vector (x, y)
    pub translation: (f64, f64),
}

impl From<DTransformation> for ExtTransformation {
    fn from(dt: DTransformation) -> Self {
        ExtTransformation {
            rotation: dt.rotation(),
            translation: dt.translation(),
        }
    }
}
