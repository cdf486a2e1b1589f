use std::time::Instant;

use itertools::Itertools;
use log::{debug, info, warn};
use thiserror::Error;
use thousands::Separable;

use crate::NestError;
use crate::entities::{Layout, NestInstance, NestingResult, PlacedShape};
use crate::opt::candidates::CandidateGenerator;
use crate::opt::search::search;
use crate::opt::strategy::StrategyKind;
use crate::util::{NestConfig, assertions};

/// Why a single strategy did not produce a layout
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StrategyError {
    #[error("could not place {id}")]
    NoFeasiblePlacement { id: String, strategy: StrategyKind },
    #[error("cancelled")]
    Cancelled,
}

/// Layout produced by a single strategy
#[derive(Clone, Debug)]
pub struct StrategyOutcome {
    pub strategy: StrategyKind,
    pub placements: Vec<PlacedShape>,
    pub bounding_area: f64,
    pub n_candidates: usize,
}

/// Places every shape of `instance` greedily, in the order dictated by `strategy`.
/// Fails as a whole as soon as one shape cannot be placed.
pub fn run_strategy(
    instance: &NestInstance,
    strategy: StrategyKind,
    generator: &CandidateGenerator,
    is_cancelled: &(dyn Fn() -> bool + Sync),
) -> Result<StrategyOutcome, StrategyError> {
    let mut layout = Layout::new(instance.sheet, instance.spacing);
    let mut n_candidates = 0;

    for key in strategy.order(instance) {
        if is_cancelled() {
            return Err(StrategyError::Cancelled);
        }
        let shape = instance.shape(key);
        match search(&layout, shape, generator, &mut n_candidates) {
            Some(option) => {
                let placed = PlacedShape::new(key, shape, option.orientation, option.position);
                layout.place(placed);
            }
            None => {
                return Err(StrategyError::NoFeasiblePlacement {
                    id: shape.id.clone(),
                    strategy,
                });
            }
        }
    }

    let bounding_area = layout.bounding_area();
    Ok(StrategyOutcome {
        strategy,
        placements: layout.into_placed_shapes(),
        bounding_area,
        n_candidates,
    })
}

/// Evaluates every configured strategy and keeps the layout with the smallest bounding area.
/// Equal areas are settled in favour of the strategy listed first.
pub fn run_strategies(
    instance: &NestInstance,
    config: &NestConfig,
    is_cancelled: &(dyn Fn() -> bool + Sync),
) -> Result<NestingResult, NestError> {
    let start = Instant::now();
    let generator = CandidateGenerator::from(config);
    let run = |&strategy: &StrategyKind| {
        let outcome = run_strategy(instance, strategy, &generator, is_cancelled);
        match &outcome {
            Ok(o) => debug!(
                "[STRAT] {strategy}: area {:.1}, {} candidates",
                o.bounding_area,
                o.n_candidates.separate_with_commas()
            ),
            Err(e) => debug!("[STRAT] {strategy} failed: {e}"),
        }
        outcome
    };

    let outcomes = evaluate(&config.strategies, config.parallel, run);

    let mut n_candidates = 0;
    let mut best: Option<StrategyOutcome> = None;
    let mut last_error = None;
    for outcome in outcomes {
        match outcome {
            Ok(o) => {
                n_candidates += o.n_candidates;
                if best.as_ref().is_none_or(|b| o.bounding_area < b.bounding_area) {
                    best = Some(o);
                }
            }
            Err(StrategyError::Cancelled) => return Err(NestError::Cancelled),
            Err(e) => last_error = Some(e),
        }
    }

    match best {
        Some(best) => {
            debug_assert!(assertions::placements_are_unique(&best.placements));
            debug_assert!(assertions::placements_are_separated(
                &best.placements,
                instance.spacing
            ));
            debug_assert!(assertions::placements_within_sheet(
                &best.placements,
                instance.sheet
            ));
            let result = NestingResult::new(instance, best.placements, Some(best.strategy), n_candidates);
            info!(
                "[STRAT] {} wins: {:.1}x{:.1}, density {:.3}, {} candidates in {}ms",
                best.strategy,
                result.bounding_width,
                result.bounding_height,
                result.density,
                n_candidates.separate_with_commas(),
                start.elapsed().as_millis()
            );
            Ok(result)
        }
        None => {
            let reason = last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no strategy was evaluated".to_string());
            warn!("[STRAT] all strategies failed, last reason: {reason}");
            Err(NestError::AllStrategiesFailed { reason })
        }
    }
}

/// Maps `f` over `strategies` while preserving their order, on the rayon pool if requested and available
#[cfg(feature = "parallel")]
fn evaluate<F, T>(strategies: &[StrategyKind], parallel: bool, f: F) -> Vec<T>
where
    F: Fn(&StrategyKind) -> T + Sync + Send,
    T: Send,
{
    use rayon::prelude::*;
    match parallel {
        true => strategies.par_iter().map(f).collect(),
        false => strategies.iter().map(f).collect_vec(),
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate<F, T>(strategies: &[StrategyKind], _parallel: bool, f: F) -> Vec<T>
where
    F: Fn(&StrategyKind) -> T,
{
    strategies.iter().map(f).collect_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ShapeInfo;
    use crate::geometry::primitives::{Polygon, Rect};

    fn instance(sizes: &[(f64, f64)], sheet: (f64, f64), spacing: f64) -> NestInstance {
        let shapes = sizes
            .iter()
            .enumerate()
            .map(|(i, &(w, h))| {
                let polygon = Polygon::from(Rect::from_dimensions(w, h).unwrap());
                ShapeInfo::new(format!("s{i}"), i, true, polygon, &[0.0], 60)
            })
            .collect_vec();
        NestInstance::new(shapes, Rect::from_dimensions(sheet.0, sheet.1).unwrap(), spacing)
    }

    fn never() -> bool {
        false
    }

    #[test]
    fn one_failing_shape_fails_the_strategy() {
        let inst = instance(&[(60.0, 60.0), (60.0, 60.0)], (100.0, 100.0), 0.0);
        let generator = CandidateGenerator::new(50.0, 25.0, 5.0);
        let err = run_strategy(&inst, StrategyKind::AreaDesc, &generator, &never).unwrap_err();
        assert_eq!(
            err,
            StrategyError::NoFeasiblePlacement {
                id: "s1".into(),
                strategy: StrategyKind::AreaDesc
            }
        );
        assert_eq!(err.to_string(), "could not place s1");
    }

    #[test]
    fn best_strategy_is_never_worse_than_any_single_one() {
        let inst = instance(
            &[(90.0, 20.0), (30.0, 70.0), (45.0, 45.0), (20.0, 20.0), (60.0, 35.0)],
            (200.0, 200.0),
            2.0,
        );
        let config = NestConfig::default();
        let best = run_strategies(&inst, &config, &never).unwrap();
        let generator = CandidateGenerator::from(&config);
        for kind in StrategyKind::ALL {
            let single = run_strategy(&inst, kind, &generator, &never).unwrap();
            assert!(best.bounding_area() <= single.bounding_area + 1e-9, "{kind}");
        }
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let inst = instance(&[(50.0, 30.0), (30.0, 50.0), (40.0, 40.0), (10.0, 80.0)], (150.0, 150.0), 3.0);
        let sequential = NestConfig {
            parallel: false,
            ..NestConfig::default()
        };
        let a = run_strategies(&inst, &sequential, &never).unwrap();
        let b = run_strategies(&inst, &NestConfig::default(), &never).unwrap();
        assert_eq!(a.strategy, b.strategy);
        for (pa, pb) in a.placements.iter().zip(&b.placements) {
            assert_eq!(pa.full, pb.full);
        }
    }

    #[test]
    fn cancellation_is_observed() {
        let inst = instance(&[(10.0, 10.0)], (100.0, 100.0), 0.0);
        let err = run_strategies(&inst, &NestConfig::default(), &|| true).unwrap_err();
        assert_eq!(err, NestError::Cancelled);
    }
}
