use itertools::Itertools;
use log::error;

use crate::collision_detection::detect_collision;
use crate::entities::PlacedShape;
use crate::geometry::primitives::Rect;

/// No pair of placed collision polygons is closer than `spacing` (within floating point tolerance)
pub fn placements_are_separated(placements: &[PlacedShape], spacing: f64) -> bool {
    for (a, b) in placements.iter().tuple_combinations() {
        if let Some(kind) = detect_collision(&a.simplified, &b.simplified, spacing) {
            error!("{} and {} violate the spacing of {spacing}: {kind:?}", a.id, b.id);
            return false;
        }
    }
    true
}

/// Every placed full resolution polygon lies within the sheet
pub fn placements_within_sheet(placements: &[PlacedShape], sheet: Rect) -> bool {
    match placements.iter().find(|p| !sheet.almost_contains(&p.bbox)) {
        Some(p) => {
            error!("{} exceeds the sheet: {:?} not in {sheet:?}", p.id, p.bbox);
            false
        }
        None => true,
    }
}

/// Every shape key occurs exactly once
pub fn placements_are_unique(placements: &[PlacedShape]) -> bool {
    placements.iter().map(|p| p.key).all_unique()
}
