use std::collections::HashMap;

use itertools::Itertools;

use crate::entities::{NestInstance, PlacedShape};
use crate::geometry::primitives::Point;
use crate::opt::strategy::StrategyKind;

/// A complete, collision-free layout of every shape of a nesting call
#[derive(Clone, Debug)]
pub struct NestingResult {
    /// Furthest x-coordinate reached by any placed shape
    pub bounding_width: f64,
    /// Furthest y-coordinate reached by any placed shape
    pub bounding_height: f64,
    /// One placement per shape, in the caller's input order
    pub placements: Vec<PlacedShape>,
    /// The shape ordering that produced this layout, `None` if it was not produced by the local engine
    pub strategy: Option<StrategyKind>,
    /// Sum of the shapes' bounding box areas divided by the bounding area
    pub density: f64,
    /// Number of candidate positions generated over all strategies
    pub n_candidates: usize,
}

impl NestingResult {
    pub fn new(
        instance: &NestInstance,
        mut placements: Vec<PlacedShape>,
        strategy: Option<StrategyKind>,
        n_candidates: usize,
    ) -> Self {
        debug_assert_eq!(placements.len(), instance.n_shapes());
        placements.sort_by_key(|p| instance.shape(p.key).index);

        //placements exceed the sheet by rotation noise at most
        let sheet = instance.sheet;
        let bounding_width = placements.iter().map(|p| p.bbox.x_max).fold(0.0, f64::max).min(sheet.x_max);
        let bounding_height = placements.iter().map(|p| p.bbox.y_max).fold(0.0, f64::max).min(sheet.y_max);
        let bounding_area = bounding_width * bounding_height;
        let density = match bounding_area > 0.0 {
            true => instance.total_shape_area() / bounding_area,
            false => 0.0,
        };

        NestingResult {
            bounding_width,
            bounding_height,
            placements,
            strategy,
            density,
            n_candidates,
        }
    }

    pub fn bounding_area(&self) -> f64 {
        self.bounding_width * self.bounding_height
    }

    pub fn placement(&self, id: &str) -> Option<&PlacedShape> {
        self.placements.iter().find(|p| p.id == id)
    }

    /// Final full-resolution points of every shape, keyed by the caller's id
    pub fn points_by_id(&self) -> HashMap<String, Vec<Point>> {
        self.placements
            .iter()
            .map(|p| (p.id.clone(), p.full.points.clone()))
            .collect()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.placements.iter().map(|p| p.id.as_str()).collect_vec()
    }
}
