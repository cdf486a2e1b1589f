use itertools::Itertools;

use crate::entities::{NestInstance, NestingResult};
use crate::io::ext_repr::{ExtPlacement, ExtSolution};

/// Composes an [`ExtSolution`] from a [`NestingResult`]
pub fn export_solution(result: &NestingResult, instance: &NestInstance) -> ExtSolution {
    let placements = result
        .placements
        .iter()
        .map(|p| ExtPlacement {
            id: p.id.clone(),
            points: p.full.points.iter().map(|&pt| pt.into()).collect_vec(),
            closed: instance.shape(p.key).closed,
            transformation: p.d_transf.into(),
        })
        .collect_vec();

    ExtSolution {
        bounding_width: result.bounding_width,
        bounding_height: result.bounding_height,
        density: result.density,
        strategy: result.strategy,
        placements,
    }
}
