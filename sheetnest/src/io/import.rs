use anyhow::Result;
use itertools::Itertools;

use crate::geometry::primitives::{Point, Polygon};
use crate::io::ext_repr::ExtShape;

/// Converts the points of an [`ExtShape`] into a [`Polygon`]
pub fn import_polygon(ext_shape: &ExtShape) -> Result<Polygon> {
    let points = ext_shape.points.iter().map(|&p| Point::from(p)).collect_vec();
    Polygon::new(points)
}
