use std::fmt::Display;

use ordered_float::NotNan;

use crate::geometry::Transformation;

/// Rigid transformation in decomposed form: a rotation around the origin, then a translation.
/// This is the form in which placements are reported to callers.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Copy)]
pub struct DTransformation {
    /// Degrees, counterclockwise positive
    pub rotation: NotNan<f64>,
    pub translation: (NotNan<f64>, NotNan<f64>),
}

impl DTransformation {
    pub fn new(rotation: f64, (tx, ty): (f64, f64)) -> Self {
        Self {
            rotation: NotNan::new(rotation).expect("rotation is NaN"),
            translation: (
                NotNan::new(tx).expect("tx is NaN"),
                NotNan::new(ty).expect("ty is NaN"),
            ),
        }
    }

    pub fn rotation(&self) -> f64 {
        self.rotation.into_inner()
    }

    pub fn translation(&self) -> (f64, f64) {
        (self.translation.0.into_inner(), self.translation.1.into_inner())
    }

    /// Matrix form, to apply the transformation to geometry
    pub fn compose(&self) -> Transformation {
        Transformation::from_dt(self)
    }
}

impl Display for DTransformation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (tx, ty) = self.translation();
        write!(f, "rotated {:.3}°, moved ({tx:.3}, {ty:.3})", self.rotation())
    }
}
