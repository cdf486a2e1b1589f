use crate::geometry::Transformation;
use crate::geometry::geo_traits::{CollidesWith, DistanceTo, Transformable, TransformableFrom};
use crate::geometry::primitives::Point;
use crate::util::FPA;

/// Line segment between two [`Point`]s.
/// Zero-length edges are tolerated: they occur when a contour repeats its first point at the end.
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct Edge {
    pub start: Point,
    pub end: Point,
}

impl Edge {
    pub fn new(start: Point, end: Point) -> Self {
        Edge { start, end }
    }

    /// Returns the closest point which lies on the edge to the given point.
    /// The projection is clamped to the segment.
    pub fn closest_point_on_edge(&self, point: &Point) -> Point {
        //from https://stackoverflow.com/a/6853926
        let Point(x1, y1) = self.start;
        let Point(x2, y2) = self.end;
        let Point(x, y) = point;

        let a = x - x1;
        let b = y - y1;
        let c = x2 - x1;
        let d = y2 - y1;

        let dot = a * c + b * d;
        let len_sq = c * c + d * d;
        let mut param = -1.0;
        if len_sq != 0.0 {
            param = dot / len_sq;
        }
        let (xx, yy) = match param {
            p if p < 0.0 => (x1, y1),              //start is the closest point
            p if p > 1.0 => (x2, y2),              //end is the closest point
            _ => (x1 + param * c, y1 + param * d), //closest point is on the edge
        };

        Point(xx, yy)
    }

    pub fn x_min(&self) -> f64 {
        f64::min(self.start.0, self.end.0)
    }

    pub fn y_min(&self) -> f64 {
        f64::min(self.start.1, self.end.1)
    }

    pub fn x_max(&self) -> f64 {
        f64::max(self.start.0, self.end.0)
    }

    pub fn y_max(&self) -> f64 {
        f64::max(self.start.1, self.end.1)
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Whether both edges lie on the same line and share a stretch of non-zero length.
    /// Edges that only touch at an end point do not overlap.
    pub fn overlaps_collinear(&self, other: &Edge) -> bool {
        let len = self.length();
        if len == 0.0 {
            return false;
        }
        let off_line = |p: Point| cross(self.start, self.end, p).abs() / len > FPA::EPSILON;
        if off_line(other.start) || off_line(other.end) {
            return false;
        }
        //project the other edge onto this one, 0.0 at start and len at end
        let (dx, dy) = ((self.end.0 - self.start.0) / len, (self.end.1 - self.start.1) / len);
        let project = |p: Point| (p.0 - self.start.0) * dx + (p.1 - self.start.1) * dy;
        let (t0, t1) = (project(other.start), project(other.end));
        let shared = f64::min(len, t0.max(t1)) - f64::max(0.0, t0.min(t1));
        shared > FPA::EPSILON
    }
}

impl Transformable for Edge {
    fn transform(&mut self, t: &Transformation) -> &mut Self {
        let Edge { start, end } = self;
        start.transform(t);
        end.transform(t);

        self
    }
}

impl TransformableFrom for Edge {
    fn transform_from(&mut self, reference: &Self, t: &Transformation) -> &mut Self {
        let Edge { start, end } = self;
        start.transform_from(&reference.start, t);
        end.transform_from(&reference.end, t);

        self
    }
}

impl DistanceTo<Point> for Edge {
    #[inline(always)]
    fn distance_to(&self, point: &Point) -> f64 {
        f64::sqrt(self.sq_distance_to(point))
    }

    #[inline(always)]
    fn sq_distance_to(&self, point: &Point) -> f64 {
        let Point(x, y) = point;
        let Point(xx, yy) = self.closest_point_on_edge(point);

        let (dx, dy) = (x - xx, y - yy);
        dx.powi(2) + dy.powi(2)
    }
}

impl CollidesWith<Edge> for Edge {
    /// Proper intersection only: the edges must cross at a single point interior to both.
    /// Collinear, overlapping or merely touching edges are not reported.
    #[inline(always)]
    fn collides_with(&self, other: &Edge) -> bool {
        if f64::max(self.x_min(), other.x_min()) > f64::min(self.x_max(), other.x_max())
            || f64::max(self.y_min(), other.y_min()) > f64::min(self.y_max(), other.y_max())
        {
            //bounding boxes do not overlap
            return false;
        }

        let d1 = cross(other.start, other.end, self.start);
        let d2 = cross(other.start, other.end, self.end);
        let d3 = cross(self.start, self.end, other.start);
        let d4 = cross(self.start, self.end, other.end);

        ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
            && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    }
}

/// z-component of (b - a) x (p - a): positive if `p` lies left of the directed line a->b
#[inline(always)]
fn cross(a: Point, b: Point, p: Point) -> f64 {
    (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0)
}
