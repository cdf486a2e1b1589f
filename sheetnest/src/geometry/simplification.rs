use itertools::Itertools;
use log::trace;

use crate::geometry::primitives::Polygon;

/// Reduces `polygon` to at most `max_vertices` points by keeping every `k`-th vertex,
/// with `k = ceil(n / max_vertices)`. A `max_vertices` of 0 disables simplification.
///
/// Kept vertices retain their exact coordinates, no interpolation takes place.
/// This is a precision/performance trade-off, not a geometric guarantee: the result can cut corners
/// of the original silhouette (and shrink its convex hull on highly irregular shapes).
/// It is only meant for cheap collision approximation, never for output geometry.
pub fn simplify_polygon(polygon: &Polygon, max_vertices: usize) -> Polygon {
    let n = polygon.n_points();
    if max_vertices == 0 || n <= max_vertices {
        return polygon.clone();
    }
    //a polygon needs at least two points
    let max_vertices = max_vertices.max(2);
    let stride = n.div_ceil(max_vertices);
    let points = polygon.points.iter().step_by(stride).copied().collect_vec();

    trace!("simplified polygon from {n} to {} points (stride {stride})", points.len());

    Polygon::new(points).expect("a sample of at least two valid points is a valid polygon")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::primitives::Point;

    fn circle(n: usize, r: f64) -> Polygon {
        let points = (0..n)
            .map(|i| {
                let a = i as f64 / n as f64 * std::f64::consts::TAU;
                Point(r * a.cos(), r * a.sin())
            })
            .collect_vec();
        Polygon::new(points).unwrap()
    }

    #[test]
    fn small_polygons_are_untouched() {
        let c = circle(40, 10.0);
        assert_eq!(simplify_polygon(&c, 60), c);
    }

    #[test]
    fn stride_sampling_keeps_original_points() {
        let c = circle(200, 10.0);
        let s = simplify_polygon(&c, 60);
        // ceil(200 / 60) = 4 -> every 4th vertex
        assert_eq!(s.n_points(), 50);
        assert!(s.n_points() <= 60);
        for (i, p) in s.points.iter().enumerate() {
            assert_eq!(*p, c.points[i * 4]);
        }
    }

    #[test]
    fn never_exceeds_target() {
        for n in [61, 119, 120, 121, 1000, 1001] {
            let s = simplify_polygon(&circle(n, 5.0), 60);
            assert!(s.n_points() <= 60, "{n} -> {}", s.n_points());
            assert!(s.n_points() >= 2);
        }
    }
}
