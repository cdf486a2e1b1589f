use log::{debug, trace};

use crate::entities::{Layout, ShapeInfo};
use crate::geometry::Transformation;
use crate::geometry::geo_traits::{Shape, TransformableFrom};
use crate::geometry::primitives::Point;
use crate::opt::candidates::CandidateGenerator;
use crate::opt::score::PlacementScore;
use crate::util::FPA;

/// A valid position for a shape, found by [`search`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacingOption {
    /// Index into [`ShapeInfo::orientations`]
    pub orientation: usize,
    /// Translation of the normalized orientation
    pub position: Point,
    pub score: PlacementScore,
}

/// Searches the layout for the best collision-free position of `shape` over all of its orientations.
/// Returns `None` if no candidate position is valid.
pub fn search(
    layout: &Layout,
    shape: &ShapeInfo,
    generator: &CandidateGenerator,
    candidate_counter: &mut usize,
) -> Option<PlacingOption> {
    //all orientations share the vertex count of the simplified polygon, so one buffer serves all of them
    let mut buffer = shape.base().simplified.clone();
    let mut best: Option<PlacingOption> = None;
    let sheet = layout.sheet;

    for (o_idx, orientation) in shape.orientations.iter().enumerate() {
        let (extent_x, extent_y) = orientation.extent();
        if !orientation.fits_in(sheet.width(), sheet.height()) {
            trace!("[SEARCH] {} does not fit at {}°", shape.id, orientation.rotation);
            continue;
        }

        let candidates = generator.generate(
            layout.placed_shapes(),
            sheet,
            orientation.width(),
            orientation.height(),
            layout.spacing,
        );
        *candidate_counter += candidates.len();

        for position in candidates {
            let Point(x, y) = position;
            if FPA(x + extent_x) > FPA(sheet.x_max) || FPA(y + extent_y) > FPA(sheet.y_max) {
                continue;
            }
            let bbox = orientation.full.bbox().translate((x, y));
            let score = PlacementScore::new(layout.extent(), bbox, position);

            //only check for collisions if the option can replace the current best
            let worth_testing = match &best {
                Some(best) => score < best.score,
                None => true,
            };

            if worth_testing {
                let transf = Transformation::from_translation((x, y));
                buffer.transform_from(&orientation.simplified, &transf);
                if !layout.collides(&buffer) {
                    best = Some(PlacingOption {
                        orientation: o_idx,
                        position,
                        score,
                    });
                }
            }
        }
    }

    match &best {
        Some(b) => debug!(
            "[SEARCH] {} at ({:.1}, {:.1}), r: {}°, area: {:.1}",
            shape.id,
            b.position.0,
            b.position.1,
            shape.orientations[b.orientation].rotation,
            b.score.area()
        ),
        None => debug!("[SEARCH] no valid position for {}", shape.id),
    }

    best
}
