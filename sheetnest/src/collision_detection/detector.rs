use crate::geometry::geo_traits::{CollidesWith, DistanceTo};
use crate::geometry::primitives::Polygon;
use crate::util::FPA;

/// The check that flagged a pair of polygons as colliding
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollisionKind {
    /// An edge of one polygon properly crosses an edge of the other
    EdgeIntersection,
    /// A vertex of one polygon lies inside the other
    Containment,
    /// A zero-area polygon (an open contour along a line) lies on top of an edge of the other
    CollinearOverlap,
    /// The polygons are disjoint, but closer to each other than the required spacing
    SpacingViolation,
}

/// Whether `a` and `b` overlap or are closer than `spacing` to each other.
#[inline]
pub fn collides(a: &Polygon, b: &Polygon, spacing: f64) -> bool {
    detect_collision(a, b, spacing).is_some()
}

/// Checks `a` against `b`, cheapest test first:
/// 1. bounding boxes, with the one of `a` expanded by `spacing`: disjoint means no collision
/// 2. proper edge intersections
/// 3. containment of any vertex of either polygon in the other
/// 4. for zero-area polygons, which contain nothing, edges overlapping along a shared line
/// 5. vertex-to-edge distances (in both directions) below `spacing`
///
/// Distances within [`FPA::EPSILON`] of `spacing` are accepted, so shapes placed exactly `spacing` apart do not collide.
pub fn detect_collision(a: &Polygon, b: &Polygon, spacing: f64) -> Option<CollisionKind> {
    if !a.bbox.inflate(spacing).collides_with(&b.bbox) {
        return None;
    }

    if a.edge_iter()
        .any(|e_a| b.edge_iter().any(|e_b| e_a.collides_with(&e_b)))
    {
        return Some(CollisionKind::EdgeIntersection);
    }

    if a.points.iter().any(|p| b.collides_with(p)) || b.points.iter().any(|p| a.collides_with(p)) {
        return Some(CollisionKind::Containment);
    }

    if (is_flat(a) || is_flat(b))
        && a.edge_iter()
            .any(|e_a| b.edge_iter().any(|e_b| e_a.overlaps_collinear(&e_b)))
    {
        return Some(CollisionKind::CollinearOverlap);
    }

    let limit = spacing - FPA::EPSILON;
    if limit > 0.0 {
        let sq_limit = limit * limit;
        let too_close = |from: &Polygon, to: &Polygon| {
            from.points
                .iter()
                .any(|p| to.edge_iter().any(|e| e.sq_distance_to(p) < sq_limit))
        };
        if too_close(a, b) || too_close(b, a) {
            return Some(CollisionKind::SpacingViolation);
        }
    }

    None
}

/// Whether all points of the polygon lie on a single line
fn is_flat(polygon: &Polygon) -> bool {
    let doubled_area = polygon
        .edge_iter()
        .map(|e| e.start.0 * e.end.1 - e.end.0 * e.start.1)
        .sum::<f64>();
    doubled_area.abs() <= FPA::EPSILON * (1.0 + polygon.bbox.max_dimension())
}

/// Minimum vertex-to-edge distance between `a` and `b`, 0.0 if they intersect or one contains the other.
pub fn min_separation(a: &Polygon, b: &Polygon) -> f64 {
    match detect_collision(a, b, 0.0) {
        Some(_) => 0.0,
        None => {
            let min_sq = |from: &Polygon, to: &Polygon| {
                from.points
                    .iter()
                    .flat_map(|p| to.edge_iter().map(move |e| e.sq_distance_to(p)))
                    .fold(f64::INFINITY, f64::min)
            };
            f64::min(min_sq(a, b), min_sq(b, a)).sqrt()
        }
    }
}
