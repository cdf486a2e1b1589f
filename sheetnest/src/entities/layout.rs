use crate::collision_detection::collides;
use crate::entities::PlacedShape;
use crate::geometry::primitives::{Polygon, Rect};

/// Shapes placed so far during one strategy run
#[derive(Clone, Debug)]
pub struct Layout {
    pub sheet: Rect,
    pub spacing: f64,
    placed: Vec<PlacedShape>,
    /// Union of the bounding boxes of all placed shapes
    extent: Option<Rect>,
}

impl Layout {
    pub fn new(sheet: Rect, spacing: f64) -> Self {
        Layout {
            sheet,
            spacing,
            placed: vec![],
            extent: None,
        }
    }

    pub fn place(&mut self, shape: PlacedShape) {
        debug_assert!(
            !self.collides(&shape.simplified),
            "placing {} would cause a collision",
            shape.id
        );
        self.extent = Some(match self.extent {
            Some(extent) => Rect::bounding_rect(extent, shape.bbox),
            None => shape.bbox,
        });
        self.placed.push(shape);
    }

    /// Whether `polygon` collides with, or is closer than the spacing to, any placed shape
    pub fn collides(&self, polygon: &Polygon) -> bool {
        self.placed
            .iter()
            .any(|p| collides(polygon, &p.simplified, self.spacing))
    }

    pub fn placed_shapes(&self) -> &[PlacedShape] {
        &self.placed
    }

    /// Union of the bounding boxes of all placed shapes, `None` while the layout is empty
    pub fn extent(&self) -> Option<Rect> {
        self.extent
    }

    /// Area of the box spanned from the sheet origin to the furthest placed point
    pub fn bounding_area(&self) -> f64 {
        self.extent
            .map_or(0.0, |e| (e.x_max - self.sheet.x_min) * (e.y_max - self.sheet.y_min))
    }

    pub fn into_placed_shapes(self) -> Vec<PlacedShape> {
        self.placed
    }
}
