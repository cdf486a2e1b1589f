use anyhow::{Result, ensure};

use crate::entities::{ShapeInfo, ShapeKey};
use crate::geometry::geo_traits::{Shape, Transformable};
use crate::geometry::primitives::{Point, Polygon, Rect};
use crate::geometry::simplification::simplify_polygon;
use crate::geometry::{DTransformation, Transformation};

/// A shape at its final position on the sheet
#[derive(Clone, Debug)]
pub struct PlacedShape {
    pub key: ShapeKey,
    pub id: String,
    /// Rotation of the orientation that was used, in degrees
    pub rotation: f64,
    /// Rigid transformation mapping the caller's original points onto `full`
    pub d_transf: DTransformation,
    /// Placed collision polygon
    pub simplified: Polygon,
    /// Placed full resolution polygon
    pub full: Polygon,
    /// Bounding box of `full`
    pub bbox: Rect,
}

impl PlacedShape {
    /// Places orientation `orientation` of `shape` with its normalized origin at `position`
    pub fn new(key: ShapeKey, shape: &ShapeInfo, orientation: usize, position: Point) -> Self {
        let o = &shape.orientations[orientation];
        let translation = Transformation::from_translation(position.into());
        let simplified = o.simplified.transform_clone(&translation);
        let full = o.full.transform_clone(&translation);
        let d_transf = o.transf.clone().transform(&translation).decompose();
        let bbox = full.bbox();
        PlacedShape {
            key,
            id: shape.id.clone(),
            rotation: o.rotation,
            d_transf,
            simplified,
            full,
            bbox,
        }
    }

    /// Reconstructs a placed shape from points computed outside of the engine.
    /// The points must be a rigid transformation of the shape's original points, in the same order.
    pub fn from_points(
        key: ShapeKey,
        shape: &ShapeInfo,
        points: Vec<Point>,
        max_vertices: usize,
    ) -> Result<Self> {
        ensure!(
            points.len() == shape.original.n_points(),
            "shape {} has {} points, received {}",
            shape.id,
            shape.original.n_points(),
            points.len()
        );
        let full = Polygon::new(points)?;
        let d_transf = estimate_rigid_transformation(&shape.original, &full);

        //the recovered transformation must reproduce the received points
        let reproduced = shape.original.transform_clone(&d_transf.compose());
        let max_deviation = reproduced
            .points
            .iter()
            .zip(&full.points)
            .map(|(a, b)| a.distance_to(b))
            .fold(0.0, f64::max);
        ensure!(
            max_deviation < 1e-3 * (1.0 + full.bbox().max_dimension()),
            "points of shape {} are not a rigid transformation of the original (deviation {max_deviation:.3})",
            shape.id
        );

        let simplified = simplify_polygon(&full, max_vertices);
        let bbox = full.bbox();
        Ok(PlacedShape {
            key,
            id: shape.id.clone(),
            rotation: d_transf.rotation().rem_euclid(360.0),
            d_transf,
            simplified,
            full,
            bbox,
        })
    }
}

/// Recovers the rotation from the first edge with a non-zero length, and the translation from the first point
fn estimate_rigid_transformation(original: &Polygon, placed: &Polygon) -> DTransformation {
    let (o0, p0) = (original.get_point(0), placed.get_point(0));
    let reference = (1..original.n_points()).find(|&i| original.get_point(i).distance_to(&o0) > 1e-9);

    let angle = match reference {
        Some(i) => {
            let (oi, pi) = (original.get_point(i), placed.get_point(i));
            let a_orig = (oi.1 - o0.1).atan2(oi.0 - o0.0);
            let a_placed = (pi.1 - p0.1).atan2(pi.0 - p0.0);
            a_placed - a_orig
        }
        None => 0.0,
    };
    let mut rotated_o0 = o0;
    rotated_o0.transform(&Transformation::from_rotation(angle));
    DTransformation::new(
        angle.to_degrees(),
        (p0.0 - rotated_o0.0, p0.1 - rotated_o0.1),
    )
}
