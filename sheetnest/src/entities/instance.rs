use itertools::Itertools;
use slotmap::SlotMap;

use crate::entities::{ShapeInfo, ShapeKey};
use crate::geometry::primitives::Rect;

/// Everything a single nesting call operates on: the prepared shapes, the sheet and the spacing.
/// Shapes are stored in an arena and addressed by [`ShapeKey`]s, the caller's input order is retained.
#[derive(Clone, Debug)]
pub struct NestInstance {
    shapes: SlotMap<ShapeKey, ShapeInfo>,
    /// Keys in the caller's input order
    order: Vec<ShapeKey>,
    pub sheet: Rect,
    pub spacing: f64,
}

impl NestInstance {
    pub fn new(shapes: Vec<ShapeInfo>, sheet: Rect, spacing: f64) -> Self {
        let mut arena = SlotMap::with_capacity_and_key(shapes.len());
        let order = shapes
            .into_iter()
            .map(|s| arena.insert(s))
            .collect_vec();
        debug_assert!(order.iter().map(|k| &arena[*k].id).all_unique());
        NestInstance {
            shapes: arena,
            order,
            sheet,
            spacing,
        }
    }

    pub fn shape(&self, key: ShapeKey) -> &ShapeInfo {
        &self.shapes[key]
    }

    /// Shape keys in the caller's input order
    pub fn keys(&self) -> &[ShapeKey] {
        &self.order
    }

    /// Shapes in the caller's input order
    pub fn shapes(&self) -> impl Iterator<Item = (ShapeKey, &ShapeInfo)> {
        self.order.iter().map(|k| (*k, &self.shapes[*k]))
    }

    pub fn key_of(&self, id: &str) -> Option<ShapeKey> {
        self.order.iter().copied().find(|k| self.shapes[*k].id == id)
    }

    pub fn n_shapes(&self) -> usize {
        self.order.len()
    }

    /// Sum of the full-resolution bounding box areas of all shapes
    pub fn total_shape_area(&self) -> f64 {
        self.shapes().map(|(_, s)| s.base().full.bbox.area()).sum()
    }
}
