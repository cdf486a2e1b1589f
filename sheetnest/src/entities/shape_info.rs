use itertools::Itertools;
use slotmap::new_key_type;

use crate::geometry::Transformation;
use crate::geometry::geo_traits::{Shape, Transformable};
use crate::geometry::primitives::Polygon;
use crate::geometry::simplification::simplify_polygon;
use crate::util::FPA;

new_key_type! {
    /// Stable handle of a [`ShapeInfo`] within a [`NestInstance`](crate::entities::NestInstance)
    pub struct ShapeKey;
}

/// A shape prepared for placement: simplified, normalized and pre-rotated in every allowed orientation.
#[derive(Clone, Debug)]
pub struct ShapeInfo {
    /// Caller supplied id, unique within one call
    pub id: String,
    /// Position of the shape in the caller's input
    pub index: usize,
    /// Whether the caller's contour is closed, collision detection always treats it as closed
    pub closed: bool,
    /// The caller's points, untouched
    pub original: Polygon,
    /// One entry per allowed rotation, the unrotated one first
    pub orientations: Vec<Orientation>,
    /// Width of the simplified bounding box in the unrotated orientation
    pub width: f64,
    /// Height of the simplified bounding box in the unrotated orientation
    pub height: f64,
    /// Area of the simplified bounding box (not the polygon's true area)
    pub area: f64,
}

/// One orientation of a [`ShapeInfo`].
///
/// Both polygons are rotated around the center of the full polygon's bounding box and then normalized,
/// so that the bounding box of the full polygon has its minimum corner at the origin.
/// A placement position is then simply a translation of this normalized shape.
#[derive(Clone, Debug)]
pub struct Orientation {
    /// Rotation in degrees, counterclockwise positive
    pub rotation: f64,
    /// Reduced vertex count polygon, used for collision detection
    pub simplified: Polygon,
    /// Full resolution polygon, used for bounds and output
    pub full: Polygon,
    /// Maps the caller's original points onto `full`
    pub transf: Transformation,
}

impl ShapeInfo {
    pub fn new(
        id: String,
        index: usize,
        closed: bool,
        original: Polygon,
        angles: &[f64],
        max_vertices: usize,
    ) -> Self {
        let simplified = simplify_polygon(&original, max_vertices);
        let orientations = angles
            .iter()
            .map(|&angle| Orientation::new(&original, &simplified, angle))
            .collect_vec();
        debug_assert!(orientations.first().is_some_and(|o| o.rotation == 0.0));

        let bbox = orientations[0].simplified.bbox();
        ShapeInfo {
            id,
            index,
            closed,
            original,
            orientations,
            width: bbox.width(),
            height: bbox.height(),
            area: bbox.area(),
        }
    }

    /// The unrotated orientation
    pub fn base(&self) -> &Orientation {
        &self.orientations[0]
    }

    /// Whether the shape fits on a sheet of the given dimensions in at least one orientation
    pub fn fits_in(&self, sheet_width: f64, sheet_height: f64) -> bool {
        self.orientations
            .iter()
            .any(|o| o.fits_in(sheet_width, sheet_height))
    }

    /// Whether `degrees` matches the rotation of one of the orientations, modulo full turns.
    /// Rotations recovered from rounded coordinates are accepted within [`ROTATION_TOLERANCE`].
    pub fn allows_rotation(&self, degrees: f64) -> bool {
        self.orientations.iter().any(|o| {
            let diff = (degrees - o.rotation).rem_euclid(360.0);
            diff < ROTATION_TOLERANCE || 360.0 - diff < ROTATION_TOLERANCE
        })
    }
}

impl Orientation {
    fn new(original: &Polygon, simplified: &Polygon, rotation: f64) -> Self {
        let bbox = original.bbox();
        let to_origin = Transformation::from_translation((-bbox.x_min, -bbox.y_min));
        let transf = if rotation == 0.0 {
            to_origin
        } else {
            let (cx, cy) = (bbox.width() / 2.0, bbox.height() / 2.0);
            let rotated = to_origin
                .translate((-cx, -cy))
                .rotate(rotation.to_radians())
                .translate((cx, cy));
            //renormalize, the rotated bounding box no longer starts at the origin
            let rotated_bbox = original.transform_clone(&rotated).bbox();
            rotated.translate((-rotated_bbox.x_min, -rotated_bbox.y_min))
        };

        Orientation {
            rotation,
            simplified: simplified.transform_clone(&transf),
            full: original.transform_clone(&transf),
            transf,
        }
    }

    /// Width of the simplified bounding box, used to derive placement candidates
    pub fn width(&self) -> f64 {
        self.simplified.bbox().width()
    }

    /// Height of the simplified bounding box, used to derive placement candidates
    pub fn height(&self) -> f64 {
        self.simplified.bbox().height()
    }

    /// Extent of the full polygon measured from the origin
    pub fn extent(&self) -> (f64, f64) {
        let bbox = self.full.bbox();
        (bbox.x_max, bbox.y_max)
    }

    /// Extents within [`FPA::EPSILON`] of the sheet fit, rotations leave noise on exact fits
    pub fn fits_in(&self, sheet_width: f64, sheet_height: f64) -> bool {
        let (w, h) = self.extent();
        FPA(w) <= FPA(sheet_width) && FPA(h) <= FPA(sheet_height)
    }
}

/// In degrees
pub const ROTATION_TOLERANCE: f64 = 0.1;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::primitives::Rect;

    fn rect_shape(x: f64, y: f64, w: f64, h: f64, angles: &[f64]) -> ShapeInfo {
        let polygon = Polygon::from(Rect::try_new(x, y, x + w, y + h).unwrap());
        ShapeInfo::new("r".into(), 0, true, polygon, angles, 60)
    }

    #[test]
    fn orientations_are_normalized_to_the_origin() {
        let shape = rect_shape(40.0, -10.0, 30.0, 10.0, &[0.0, 90.0, 45.0]);
        for o in &shape.orientations {
            let bbox = o.full.bbox();
            assert!(bbox.x_min.abs() < 1e-9, "{}: {bbox:?}", o.rotation);
            assert!(bbox.y_min.abs() < 1e-9, "{}: {bbox:?}", o.rotation);
        }
        assert_eq!(shape.base().full.bbox(), Rect::try_new(0.0, 0.0, 30.0, 10.0).unwrap());
        let (w, h) = shape.orientations[1].extent();
        assert!((w - 10.0).abs() < 1e-9 && (h - 30.0).abs() < 1e-9);
    }

    #[test]
    fn transformation_maps_original_onto_full() {
        let shape = rect_shape(40.0, -10.0, 30.0, 10.0, &[0.0, 90.0, 210.0]);
        for o in &shape.orientations {
            let mapped = shape.original.transform_clone(&o.transf);
            for (a, b) in mapped.points.iter().zip(&o.full.points) {
                assert!(a.distance_to(b) < 1e-9);
            }
        }
    }

    #[test]
    fn rotation_can_make_a_shape_fit() {
        let shape = rect_shape(0.0, 0.0, 250.0, 50.0, &[0.0]);
        assert!(!shape.fits_in(100.0, 300.0));
        let shape = rect_shape(0.0, 0.0, 250.0, 50.0, &[0.0, 90.0]);
        assert!(shape.fits_in(100.0, 300.0));
    }

    #[test]
    fn exact_fit_after_a_quarter_turn() {
        for (w, h) in [(250.0, 50.0), (123.4, 56.7), (300.0, 7.0), (0.3, 0.1)] {
            let shape = rect_shape(3.3, 1.7, w, h, &[0.0, 90.0]);
            assert!(!shape.orientations[0].fits_in(h, w));
            assert!(shape.orientations[1].fits_in(h, w), "{w}x{h}");
            assert!(shape.fits_in(h, w));
        }
    }

    #[test]
    fn allowed_rotations_wrap_around_full_turns() {
        let fixed = rect_shape(0.0, 0.0, 100.0, 20.0, &[0.0]);
        assert!(fixed.allows_rotation(0.0));
        assert!(fixed.allows_rotation(359.99));
        assert!(fixed.allows_rotation(-0.02));
        assert!(!fixed.allows_rotation(90.0));
        assert!(!fixed.allows_rotation(180.0));

        let quarter = rect_shape(0.0, 0.0, 100.0, 20.0, &[0.0, 90.0, 180.0, 270.0]);
        assert!(quarter.allows_rotation(90.03));
        assert!(quarter.allows_rotation(-90.0));
        assert!(!quarter.allows_rotation(45.0));
    }

    #[test]
    fn size_measures_come_from_the_simplified_bbox() {
        let shape = rect_shape(5.0, 5.0, 20.0, 8.0, &[0.0]);
        assert_eq!((shape.width, shape.height, shape.area), (20.0, 8.0, 160.0));
    }
}
