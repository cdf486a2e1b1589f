use std::collections::HashSet;
use std::time::Instant;

use log::{debug, info};

use crate::NestError;
use crate::entities::{NestInstance, NestingResult, ShapeInfo};
use crate::geometry::primitives::Rect;
use crate::io::ext_repr::NestRequest;
use crate::io::import::import_polygon;
use crate::opt::runner::run_strategies;
use crate::util::{CancellationChecker, NestConfig};

/// Entry point of the engine.
/// Validates a [`NestRequest`], prepares its shapes and runs every configured strategy on them.
///
/// Holds no state between calls: identical requests yield identical results.
pub struct Nester {
    pub config: NestConfig,
    cancellation_checker: Option<CancellationChecker>,
}

impl Default for Nester {
    fn default() -> Self {
        Nester::new(NestConfig::default())
    }
}

impl Nester {
    pub fn new(config: NestConfig) -> Self {
        Nester {
            config,
            cancellation_checker: None,
        }
    }

    /// Registers a callback that is polled between shapes and between strategies.
    /// Once it returns `true`, the call is abandoned with [`NestError::Cancelled`].
    pub fn with_cancellation_checker(mut self, checker: CancellationChecker) -> Self {
        self.cancellation_checker = Some(checker);
        self
    }

    /// Nests all shapes of `request`, or fails without a partial layout
    pub fn nest(&self, request: &NestRequest) -> Result<NestingResult, NestError> {
        let instance = self.prepare(request)?;
        self.solve(&instance)
    }

    /// Validates the request and builds the arena of prepared shapes.
    /// Every input error, including shapes that fit in no allowed rotation, is reported here,
    /// before any placement work begins.
    pub fn prepare(&self, request: &NestRequest) -> Result<NestInstance, NestError> {
        self.config
            .validate()
            .map_err(|reason| NestError::InvalidConfig { reason })?;

        let (sheet_width, sheet_height) = (request.sheet_width, request.sheet_height);
        let valid_dimension = |d: f64| d.is_finite() && d > 0.0;
        if !(valid_dimension(sheet_width) && valid_dimension(sheet_height)) {
            return Err(NestError::InvalidSheet {
                width: sheet_width,
                height: sheet_height,
            });
        }
        if !(request.spacing.is_finite() && request.spacing >= 0.0) {
            return Err(NestError::InvalidSpacing {
                spacing: request.spacing,
            });
        }
        if !request.rotation.is_valid() {
            return Err(NestError::InvalidRotation {
                reason: format!("{:?} contains non-finite angles", request.rotation),
            });
        }

        let angles = request.rotation.angles();
        let mut seen_ids = HashSet::new();
        let mut shapes = Vec::with_capacity(request.shapes.len());

        for (index, ext_shape) in request.shapes.iter().enumerate() {
            let id = ext_shape.id.clone();
            if !seen_ids.insert(ext_shape.id.as_str()) {
                return Err(NestError::DuplicateId { id });
            }
            if ext_shape.points.len() < 2 {
                return Err(NestError::DegenerateShape { id });
            }
            let polygon = import_polygon(ext_shape).map_err(|e| NestError::InvalidShape {
                id: id.clone(),
                reason: e.to_string(),
            })?;

            let shape = ShapeInfo::new(
                id,
                index,
                ext_shape.closed,
                polygon,
                &angles,
                self.config.max_vertices,
            );
            if !shape.fits_in(sheet_width, sheet_height) {
                let (width, height) = shape.base().extent();
                return Err(NestError::ShapeTooLarge {
                    id: shape.id,
                    width,
                    height,
                    sheet_width,
                    sheet_height,
                });
            }
            debug!(
                "[NEST] prepared {}: {} -> {} points, {} orientation(s)",
                shape.id,
                shape.original.n_points(),
                shape.base().simplified.n_points(),
                shape.orientations.len()
            );
            shapes.push(shape);
        }

        let sheet = Rect::from_dimensions(sheet_width, sheet_height).map_err(|_| {
            NestError::InvalidSheet {
                width: sheet_width,
                height: sheet_height,
            }
        })?;
        Ok(NestInstance::new(shapes, sheet, request.spacing))
    }

    /// Runs the strategies on a prepared instance
    pub fn solve(&self, instance: &NestInstance) -> Result<NestingResult, NestError> {
        let start = Instant::now();
        if self.is_cancelled() {
            return Err(NestError::Cancelled);
        }

        info!(
            "[NEST] nesting {} shape(s) on a {}x{} sheet, spacing {}",
            instance.n_shapes(),
            instance.sheet.width(),
            instance.sheet.height(),
            instance.spacing
        );

        if instance.n_shapes() == 0 {
            return Ok(NestingResult::new(instance, vec![], None, 0));
        }

        let result = run_strategies(instance, &self.config, &|| self.is_cancelled())?;
        info!(
            "[NEST] done in {}ms: {:.1}x{:.1}",
            start.elapsed().as_millis(),
            result.bounding_width,
            result.bounding_height
        );
        Ok(result)
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation_checker.as_ref().is_some_and(|c| c())
    }
}

/// Nests `request` with the default configuration
pub fn nest(request: &NestRequest) -> Result<NestingResult, NestError> {
    Nester::default().nest(request)
}
