use anyhow::Result;
use anyhow::ensure;

use crate::geometry::geo_traits::{AlmostCollidesWith, CollidesWith};
use crate::geometry::primitives::Point;
use crate::util::FPA;

/// Axis-aligned rectangle.
/// Degenerate rectangles (zero width or height) are valid: they are the bounding boxes of open contours.
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct Rect {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Rect {
    pub fn try_new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<Self> {
        ensure!(
            x_min <= x_max && y_min <= y_max,
            "invalid rectangle, x_min: {x_min}, x_max: {x_max}, y_min: {y_min}, y_max: {y_max}"
        );
        Ok(Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Rectangle with its bottom left corner at the origin
    pub fn from_dimensions(width: f64, height: f64) -> Result<Self> {
        Rect::try_new(0.0, 0.0, width, height)
    }

    /// Bounding box of a set of points, computed with a single linear scan.
    /// Returns `None` for an empty set.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let init = Rect {
            x_min: first.0,
            y_min: first.1,
            x_max: first.0,
            y_max: first.1,
        };
        Some(points.fold(init, |mut r, p| {
            r.x_min = r.x_min.min(p.0);
            r.y_min = r.y_min.min(p.1);
            r.x_max = r.x_max.max(p.0);
            r.y_max = r.y_max.max(p.1);
            r
        }))
    }

    /// Returns a new rectangle expanded by `d` in every direction
    pub fn inflate(self, d: f64) -> Self {
        debug_assert!(d >= 0.0, "inflating by a negative distance: {d}");
        Rect {
            x_min: self.x_min - d,
            y_min: self.y_min - d,
            x_max: self.x_max + d,
            y_max: self.y_max + d,
        }
    }

    /// Returns a copy of `self` shifted by `(dx, dy)`
    pub fn translate(self, (dx, dy): (f64, f64)) -> Self {
        Rect {
            x_min: self.x_min + dx,
            y_min: self.y_min + dy,
            x_max: self.x_max + dx,
            y_max: self.y_max + dy,
        }
    }

    /// Returns the smallest rectangle that contains both `a` and `b`.
    pub fn bounding_rect(a: Rect, b: Rect) -> Rect {
        Rect {
            x_min: f64::min(a.x_min, b.x_min),
            y_min: f64::min(a.y_min, b.y_min),
            x_max: f64::max(a.x_max, b.x_max),
            y_max: f64::max(a.y_max, b.y_max),
        }
    }

    /// Returns the largest rectangle that is contained in both `a` and `b`.
    pub fn intersection(a: Rect, b: Rect) -> Option<Rect> {
        let x_min = f64::max(a.x_min, b.x_min);
        let y_min = f64::max(a.y_min, b.y_min);
        let x_max = f64::min(a.x_max, b.x_max);
        let y_max = f64::min(a.y_max, b.y_max);
        if x_min < x_max && y_min < y_max {
            Some(Rect {
                x_min,
                y_min,
                x_max,
                y_max,
            })
        } else {
            None
        }
    }

    /// Whether `other` lies entirely within `self`, with a tolerance for floating point precision.
    pub fn almost_contains(&self, other: &Rect) -> bool {
        FPA(self.x_min) <= FPA(other.x_min)
            && FPA(self.y_min) <= FPA(other.y_min)
            && FPA(self.x_max) >= FPA(other.x_max)
            && FPA(self.y_max) >= FPA(other.y_max)
    }

    /// Returns the four corners of `self`, counterclockwise starting from the bottom left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point(self.x_min, self.y_min),
            Point(self.x_max, self.y_min),
            Point(self.x_max, self.y_max),
            Point(self.x_min, self.y_max),
        ]
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn min_corner(&self) -> Point {
        Point(self.x_min, self.y_min)
    }

    pub fn centroid(&self) -> Point {
        Point(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn perimeter(&self) -> f64 {
        2.0 * (self.width() + self.height())
    }

    pub fn max_dimension(&self) -> f64 {
        f64::max(self.width(), self.height())
    }
}

impl CollidesWith<Rect> for Rect {
    #[inline(always)]
    fn collides_with(&self, other: &Rect) -> bool {
        f64::max(self.x_min, other.x_min) <= f64::min(self.x_max, other.x_max)
            && f64::max(self.y_min, other.y_min) <= f64::min(self.y_max, other.y_max)
    }
}

impl AlmostCollidesWith<Rect> for Rect {
    #[inline(always)]
    fn almost_collides_with(&self, other: &Rect) -> bool {
        FPA(f64::max(self.x_min, other.x_min)) <= FPA(f64::min(self.x_max, other.x_max))
            && FPA(f64::max(self.y_min, other.y_min)) <= FPA(f64::min(self.y_max, other.y_max))
    }
}

impl CollidesWith<Point> for Rect {
    #[inline(always)]
    fn collides_with(&self, point: &Point) -> bool {
        let Point(x, y) = *point;
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}

impl AlmostCollidesWith<Point> for Rect {
    #[inline(always)]
    fn almost_collides_with(&self, point: &Point) -> bool {
        let (x, y) = (*point).into();
        FPA(x) >= FPA(self.x_min)
            && FPA(x) <= FPA(self.x_max)
            && FPA(y) >= FPA(self.y_min)
            && FPA(y) <= FPA(self.y_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bbox_of_points_is_a_linear_scan() {
        let points = [Point(3.0, -1.0), Point(-2.0, 4.0), Point(1.0, 1.0)];
        let bbox = Rect::from_points(&points).unwrap();
        assert_eq!(bbox, Rect::try_new(-2.0, -1.0, 3.0, 4.0).unwrap());
        assert!(Rect::from_points(&Vec::<Point>::new()).is_none());
    }

    #[test]
    fn touching_rects_collide() {
        let a = Rect::try_new(0.0, 0.0, 10.0, 10.0).unwrap();
        let b = Rect::try_new(10.0, 0.0, 20.0, 10.0).unwrap();
        let c = Rect::try_new(10.5, 0.0, 20.0, 10.0).unwrap();
        assert!(a.collides_with(&b));
        assert!(!a.collides_with(&c));
        assert!(a.inflate(0.5).collides_with(&c));
    }

    #[test]
    fn degenerate_rect_is_allowed() {
        let line = Rect::try_new(0.0, 5.0, 10.0, 5.0).unwrap();
        assert_eq!(line.height(), 0.0);
        assert_eq!(line.area(), 0.0);
        assert!(Rect::try_new(1.0, 0.0, 0.0, 1.0).is_err());
    }
}
