use anyhow::Result;
use anyhow::ensure;

use crate::geometry::Transformation;
use crate::geometry::geo_traits::{CollidesWith, Shape, Transformable, TransformableFrom};
use crate::geometry::primitives::Edge;
use crate::geometry::primitives::Point;
use crate::geometry::primitives::Rect;

/// Ordered sequence of points, implicitly closed: the edge from the last point back to the first
/// participates in every intersection and containment test.
///
/// No orientation, simplicity or non-zero area is required, so open contours (down to a single segment)
/// can be represented as well.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub points: Vec<Point>,
    /// Bounding box, kept in sync with `points` on every transformation
    pub bbox: Rect,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Result<Self> {
        ensure!(
            points.len() >= 2,
            "polygon must have at least 2 points, got {}",
            points.len()
        );
        ensure!(
            points.iter().all(|p| p.is_finite()),
            "polygon contains non-finite coordinates: {points:?}"
        );
        let bbox = Rect::from_points(&points).expect("polygon has points");
        Ok(Polygon { points, bbox })
    }

    pub fn get_point(&self, i: usize) -> Point {
        self.points[i]
    }

    pub fn get_edge(&self, i: usize) -> Edge {
        let j = (i + 1) % self.n_points();
        Edge::new(self.points[i], self.points[j])
    }

    /// All edges, including the closing edge from the last point back to the first
    pub fn edge_iter(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.n_points()).map(move |i| self.get_edge(i))
    }

    pub fn n_points(&self) -> usize {
        self.points.len()
    }

    /// Returns a copy rotated by `degrees` (counterclockwise positive) around `center`
    pub fn rotate_about(&self, degrees: f64, center: Point) -> Polygon {
        let Point(cx, cy) = center;
        let t = Transformation::from_translation((-cx, -cy))
            .rotate(degrees.to_radians())
            .translate((cx, cy));
        self.transform_clone(&t)
    }

    /// Returns a copy shifted by `(dx, dy)`
    pub fn translate(&self, (dx, dy): (f64, f64)) -> Polygon {
        self.transform_clone(&Transformation::from_translation((dx, dy)))
    }

    fn refresh_bbox(&mut self) {
        self.bbox = Rect::from_points(&self.points).expect("polygon has points");
    }
}

impl Shape for Polygon {
    fn bbox(&self) -> Rect {
        self.bbox
    }
}

impl Transformable for Polygon {
    fn transform(&mut self, t: &Transformation) -> &mut Self {
        self.points.iter_mut().for_each(|p| {
            p.transform(t);
        });
        self.refresh_bbox();
        self
    }
}

impl TransformableFrom for Polygon {
    fn transform_from(&mut self, reference: &Self, t: &Transformation) -> &mut Self {
        debug_assert_eq!(self.n_points(), reference.n_points());
        for (p, ref_p) in self.points.iter_mut().zip(&reference.points) {
            p.transform_from(ref_p, t);
        }
        self.refresh_bbox();
        self
    }
}

impl CollidesWith<Point> for Polygon {
    /// Point-in-polygon by ray casting (even-odd rule).
    /// Inclusion of points exactly on an edge is unspecified.
    fn collides_with(&self, point: &Point) -> bool {
        if !self.bbox.collides_with(point) {
            return false;
        }
        let Point(x, y) = *point;
        let mut inside = false;
        for Edge {
            start: Point(x_i, y_i),
            end: Point(x_j, y_j),
        } in self.edge_iter()
        {
            //horizontal ray shot to the right, count the edges straddling its height
            if (y_i > y) != (y_j > y) && x < (x_j - x_i) * (y - y_i) / (y_j - y_i) + x_i {
                inside = !inside;
            }
        }
        inside
    }
}

impl From<Rect> for Polygon {
    fn from(r: Rect) -> Self {
        let points = r.corners().to_vec();
        Polygon { points, bbox: r }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l_shape() -> Polygon {
        Polygon::new(vec![
            Point(0.0, 0.0),
            Point(100.0, 0.0),
            Point(100.0, 20.0),
            Point(20.0, 20.0),
            Point(20.0, 100.0),
            Point(0.0, 100.0),
        ])
        .unwrap()
    }

    #[test]
    fn needs_two_finite_points() {
        assert!(Polygon::new(vec![Point(0.0, 0.0)]).is_err());
        assert!(Polygon::new(vec![Point(0.0, 0.0), Point(f64::NAN, 1.0)]).is_err());
        assert!(Polygon::new(vec![Point(0.0, 0.0), Point(10.0, 0.0)]).is_ok());
    }

    #[test]
    fn point_in_concave_polygon() {
        let l = l_shape();
        assert!(l.collides_with(&Point(10.0, 50.0)));
        assert!(l.collides_with(&Point(50.0, 10.0)));
        // inside the notch, but within the bounding box
        assert!(!l.collides_with(&Point(50.0, 50.0)));
        assert!(!l.collides_with(&Point(150.0, 10.0)));
    }

    #[test]
    fn rotation_about_bbox_center() {
        let square = Polygon::from(Rect::try_new(0.0, 0.0, 10.0, 20.0).unwrap());
        let rotated = square.rotate_about(90.0, square.bbox.centroid());
        let bbox = rotated.bbox();
        assert!((bbox.width() - 20.0).abs() < 1e-9);
        assert!((bbox.height() - 10.0).abs() < 1e-9);
        assert!((bbox.centroid().0 - 5.0).abs() < 1e-9);
        assert!((bbox.centroid().1 - 10.0).abs() < 1e-9);
    }

    #[test]
    fn transform_from_reuses_buffer() {
        let reference = l_shape();
        let mut buffer = reference.clone();
        buffer.transform_from(&reference, &Transformation::from_translation((5.0, 7.0)));
        assert_eq!(buffer.bbox, Rect::try_new(5.0, 7.0, 105.0, 107.0).unwrap());
        assert_eq!(buffer, reference.translate((5.0, 7.0)));
    }
}
