use ordered_float::NotNan;

use crate::geometry::primitives::{Point, Rect};

/// The score assigned to a placing option, lower is better.
/// Compares the area of the box spanned from the sheet origin to the furthest point of the layout
/// (if the option were accepted) first, then the height and finally the horizontal position of the option.
#[derive(PartialEq, PartialOrd, Copy, Clone, Debug, Eq, Ord)]
pub struct PlacementScore {
    area: NotNan<f64>,
    y: NotNan<f64>,
    x: NotNan<f64>,
}

impl PlacementScore {
    /// * `extent` - union of the bounding boxes of the shapes placed so far
    /// * `bbox` - bounding box of the shape at the candidate position
    /// * `position` - the candidate position
    pub fn new(extent: Option<Rect>, bbox: Rect, position: Point) -> Self {
        let combined = match extent {
            Some(extent) => Rect::bounding_rect(extent, bbox),
            None => bbox,
        };
        let Point(x, y) = position;
        PlacementScore {
            area: NotNan::new(combined.x_max * combined.y_max).expect("area is NaN"),
            y: NotNan::new(y).expect("y is NaN"),
            x: NotNan::new(x).expect("x is NaN"),
        }
    }

    pub fn area(&self) -> f64 {
        self.area.into_inner()
    }
}
