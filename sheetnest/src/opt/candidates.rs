use itertools::Itertools;
use ordered_float::NotNan;

use crate::entities::PlacedShape;
use crate::geometry::primitives::{Point, Rect};
use crate::util::NestConfig;

/// Generates the positions at which the placement search tries to put a shape.
///
/// The candidates are anchors derived from the shapes placed so far: flush against their bounding boxes,
/// along their right and top edges and next to every vertex of their collision polygons.
/// Only an empty sheet is sampled with a grid, so the number of candidates scales with the number of placed shapes,
/// not with the size of the sheet.
#[derive(Clone, Copy, Debug)]
pub struct CandidateGenerator {
    pub grid_step: f64,
    pub edge_step: f64,
    pub dedup_quantum: f64,
}

impl CandidateGenerator {
    pub fn new(grid_step: f64, edge_step: f64, dedup_quantum: f64) -> Self {
        debug_assert!(grid_step > 0.0 && edge_step > 0.0 && dedup_quantum > 0.0);
        Self {
            grid_step,
            edge_step,
            dedup_quantum,
        }
    }

    /// Candidates for a shape with a bounding box of `width` x `height`.
    /// Sorted bottom to top, then left to right, without negative coordinates and de-duplicated on a coarse grid.
    pub fn generate(
        &self,
        placed: &[PlacedShape],
        sheet: Rect,
        width: f64,
        height: f64,
        spacing: f64,
    ) -> Vec<Point> {
        let mut candidates = vec![];
        match placed.is_empty() {
            true => self.seed_grid(sheet, &mut candidates),
            false => {
                for shape in placed {
                    self.anchors(shape, width, height, spacing, &mut candidates);
                }
            }
        }

        let q = self.dedup_quantum;
        candidates
            .into_iter()
            .filter(|Point(x, y)| *x >= 0.0 && *y >= 0.0)
            .unique_by(|Point(x, y)| ((x / q).round() as i64, (y / q).round() as i64))
            .sorted_by_key(|Point(x, y)| {
                (
                    NotNan::new(*y).expect("candidate is NaN"),
                    NotNan::new(*x).expect("candidate is NaN"),
                )
            })
            .collect_vec()
    }

    fn seed_grid(&self, sheet: Rect, candidates: &mut Vec<Point>) {
        candidates.push(Point(sheet.x_min, sheet.y_min));
        for y in steps(sheet.y_min, sheet.y_max, self.grid_step) {
            for x in steps(sheet.x_min, sheet.x_max, self.grid_step) {
                candidates.push(Point(x, y));
            }
        }
    }

    fn anchors(
        &self,
        shape: &PlacedShape,
        width: f64,
        height: f64,
        spacing: f64,
        candidates: &mut Vec<Point>,
    ) {
        let Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        } = shape.bbox;
        let s = spacing;

        //to the right: bottom aligned, top aligned, on the bottom of the sheet
        candidates.push(Point(x_max + s, y_min));
        candidates.push(Point(x_max + s, y_max - height));
        candidates.push(Point(x_max + s, 0.0));
        //above: left aligned, right aligned, against the left of the sheet
        candidates.push(Point(x_min, y_max + s));
        candidates.push(Point(x_max - width, y_max + s));
        candidates.push(Point(0.0, y_max + s));

        //walk the right and top edges
        for y in steps(y_min, y_max, self.edge_step) {
            candidates.push(Point(x_max + s, y));
        }
        for x in steps(x_min, x_max, self.edge_step) {
            candidates.push(Point(x, y_max + s));
        }

        //around every vertex, to pack against concave notches
        for &Point(vx, vy) in &shape.simplified.points {
            candidates.push(Point(vx + s, vy));
            candidates.push(Point(vx - s - width, vy));
            candidates.push(Point(vx, vy + s));
            candidates.push(Point(vx, vy - s - height));
            candidates.push(Point(vx + s, vy + s));
        }
    }
}

impl From<&NestConfig> for CandidateGenerator {
    fn from(config: &NestConfig) -> Self {
        CandidateGenerator::new(config.grid_step, config.edge_step, config.dedup_quantum)
    }
}

/// `from`, `from + step`, ... up to and including `to`
fn steps(from: f64, to: f64, step: f64) -> impl Iterator<Item = f64> {
    (0..)
        .map(move |i| from + i as f64 * step)
        .take_while(move |v| *v <= to)
}
