use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::util::FPA;

/// Set of orientations a shape may be placed in.
/// Angles are in degrees, counterclockwise positive, applied around the shape's own bounding box center.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum RotationPolicy {
    /// Only the original orientation
    #[default]
    None,
    /// 0°, 90°, 180° and 270°
    Quarter,
    /// `n` evenly spaced orientations starting at 0°, `n <= 1` disables rotation
    Discrete(usize),
    /// Explicit list of angles, 0° is always tried first even if absent
    Custom(Vec<f64>),
}

impl RotationPolicy {
    /// The angles to try, in order. Always starts with 0°, angles are normalized to `[0, 360)` and
    /// duplicates (modulo 360°) are dropped, keeping the first occurrence.
    pub fn angles(&self) -> Vec<f64> {
        let raw = match self {
            RotationPolicy::None => vec![0.0],
            RotationPolicy::Quarter => vec![0.0, 90.0, 180.0, 270.0],
            RotationPolicy::Discrete(n) => {
                let n = (*n).max(1);
                (0..n).map(|i| i as f64 * 360.0 / n as f64).collect_vec()
            }
            RotationPolicy::Custom(angles) => {
                std::iter::once(0.0).chain(angles.iter().copied()).collect_vec()
            }
        };

        let mut angles: Vec<f64> = Vec::with_capacity(raw.len());
        for angle in raw.into_iter().filter(|a| a.is_finite()) {
            let angle = angle.rem_euclid(360.0);
            //360 - tiny is the same orientation as 0
            let angle = if FPA(angle) == FPA(360.0) { 0.0 } else { angle };
            if !angles.iter().any(|a| FPA(*a) == FPA(angle)) {
                angles.push(angle);
            }
        }
        angles
    }

    /// Number of distinct orientations, 1 meaning rotation is disabled
    pub fn n_orientations(&self) -> usize {
        self.angles().len()
    }

    /// Whether every explicitly listed angle is a finite number
    pub fn is_valid(&self) -> bool {
        match self {
            RotationPolicy::Custom(angles) => angles.iter().all(|a| a.is_finite()),
            _ => true,
        }
    }
}
