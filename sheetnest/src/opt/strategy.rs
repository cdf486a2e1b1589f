use std::cmp::Reverse;
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

use crate::entities::{NestInstance, ShapeInfo, ShapeKey};

/// Order in which the shapes are fed to the greedy placement search.
/// Ties are broken by the caller's input order.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Decreasing bounding box area
    AreaDesc,
    /// Decreasing height
    HeightDesc,
    /// Decreasing width
    WidthDesc,
    /// Decreasing bounding box perimeter
    PerimeterDesc,
    /// Decreasing largest dimension
    MaxDimensionDesc,
    /// Increasing bounding box area
    AreaAsc,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 6] = [
        StrategyKind::AreaDesc,
        StrategyKind::HeightDesc,
        StrategyKind::WidthDesc,
        StrategyKind::PerimeterDesc,
        StrategyKind::MaxDimensionDesc,
        StrategyKind::AreaAsc,
    ];

    /// The shapes of `instance` in the order this strategy processes them
    pub fn order(&self, instance: &NestInstance) -> Vec<ShapeKey> {
        instance
            .keys()
            .iter()
            .copied()
            .sorted_by_cached_key(|k| self.sort_key(instance.shape(*k)))
            .collect_vec()
    }

    fn sort_key(&self, shape: &ShapeInfo) -> Reverse<NotNan<f64>> {
        let value = match self {
            StrategyKind::AreaDesc => shape.area,
            StrategyKind::HeightDesc => shape.height,
            StrategyKind::WidthDesc => shape.width,
            StrategyKind::PerimeterDesc => 2.0 * (shape.width + shape.height),
            StrategyKind::MaxDimensionDesc => f64::max(shape.width, shape.height),
            StrategyKind::AreaAsc => -shape.area,
        };
        Reverse(NotNan::new(value).expect("shape dimensions are finite"))
    }
}

impl Display for StrategyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StrategyKind::AreaDesc => "area_desc",
            StrategyKind::HeightDesc => "height_desc",
            StrategyKind::WidthDesc => "width_desc",
            StrategyKind::PerimeterDesc => "perimeter_desc",
            StrategyKind::MaxDimensionDesc => "max_dimension_desc",
            StrategyKind::AreaAsc => "area_asc",
        };
        write!(f, "{name}")
    }
}
