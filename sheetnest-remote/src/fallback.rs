use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use itertools::Itertools;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use sheetnest::entities::{NestInstance, NestingResult, PlacedShape};
use sheetnest::geometry::primitives::Point;
use sheetnest::io::ext_repr::NestRequest;
use sheetnest::util::assertions;
use sheetnest::{NestError, Nester};

use crate::wire::{RemoteRequest, RemoteResponse};
use crate::{HttpSolver, RemoteConfig, RemoteError, RemoteSolver};

/// Which engine produced a layout
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SolutionSource {
    Remote,
    Local,
}

/// A successful nesting call and where its layout came from
#[derive(Clone, Debug)]
pub struct Solved {
    pub result: NestingResult,
    pub source: SolutionSource,
    /// The validated job the result refers to
    pub instance: NestInstance,
}

/// Two step pipeline: one remote attempt bounded by `timeout`, then the local engine.
///
/// * remote layout valid: `Ok(remote)`
/// * remote failure of any kind: logged, then `Ok(local)`
/// * local failure: `Err`, the remote failure is not surfaced
pub struct FallbackNester<S: RemoteSolver> {
    solver: S,
    nester: Arc<Nester>,
    timeout: Duration,
}

impl FallbackNester<HttpSolver> {
    pub fn from_config(config: &RemoteConfig, nester: Nester) -> Self {
        FallbackNester::new(HttpSolver::new(config.url.clone()), nester, config.timeout())
    }
}

impl<S: RemoteSolver> FallbackNester<S> {
    pub fn new(solver: S, nester: Nester, timeout: Duration) -> Self {
        FallbackNester {
            solver,
            nester: Arc::new(nester),
            timeout,
        }
    }

    pub fn nester(&self) -> &Nester {
        &self.nester
    }

    /// Invalid requests are rejected locally, before the remote service is contacted
    pub async fn nest(&self, request: &NestRequest) -> Result<Solved, NestError> {
        let instance = self.nester.prepare(request)?;

        if instance.n_shapes() > 0 {
            let start = Instant::now();
            let remote = self.try_remote(request, &instance).await;
            match remote {
                Ok(result) => {
                    info!(
                        "[REMOTE] accepted remote layout {:.1}x{:.1} after {}ms",
                        result.bounding_width,
                        result.bounding_height,
                        start.elapsed().as_millis()
                    );
                    return Ok(Solved {
                        result,
                        source: SolutionSource::Remote,
                        instance,
                    });
                }
                Err(e) => warn!("[REMOTE] {e}, falling back to the local engine"),
            }
        }

        solve_local(self.nester.clone(), instance).await
    }

    async fn try_remote(
        &self,
        request: &NestRequest,
        instance: &NestInstance,
    ) -> Result<NestingResult, RemoteError> {
        let wire_request = RemoteRequest::from(request);
        let response = tokio::time::timeout(self.timeout, self.solver.solve(&wire_request))
            .await
            .map_err(|_| RemoteError::Timeout(self.timeout))??;
        accept_response(response, instance)
    }
}

/// Runs the local engine on a blocking thread. Panics of the engine are propagated to the caller.
pub async fn solve_local(nester: Arc<Nester>, instance: NestInstance) -> Result<Solved, NestError> {
    let local = tokio::task::spawn_blocking(move || {
        let result = nester.solve(&instance);
        (result, instance)
    })
    .await;
    let (result, instance) = match local {
        Ok((result, instance)) => (result?, instance),
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(_) => return Err(NestError::Cancelled),
    };
    Ok(Solved {
        result,
        source: SolutionSource::Local,
        instance,
    })
}

/// Turns a remote response into a result, if it is complete and respects the spacing and the sheet
pub fn accept_response(
    response: RemoteResponse,
    instance: &NestInstance,
) -> Result<NestingResult, RemoteError> {
    if response.status != "ok" {
        return Err(RemoteError::Status(response.status));
    }
    if response.placements.is_empty() {
        return Err(RemoteError::Empty);
    }
    if response.failed > 0 {
        return Err(RemoteError::Incomplete {
            placed: response.placed,
            failed: response.failed,
        });
    }

    let mut by_name: HashMap<String, Vec<[f64; 2]>> = HashMap::new();
    for placement in response.placements {
        if by_name.insert(placement.name.clone(), placement.points).is_some() {
            return Err(RemoteError::Rejected(format!("{} placed twice", placement.name)));
        }
    }

    let mut placements = Vec::with_capacity(instance.n_shapes());
    for (key, shape) in instance.shapes() {
        let points = by_name.remove(&shape.id).ok_or(RemoteError::Incomplete {
            placed: placements.len(),
            failed: instance.n_shapes() - placements.len(),
        })?;
        let points = points.into_iter().map(Point::from).collect_vec();
        //full resolution geometry, the remote layout is checked exactly
        let placed = PlacedShape::from_points(key, shape, points, 0)
            .map_err(|e| RemoteError::Rejected(e.to_string()))?;
        if !shape.allows_rotation(placed.rotation) {
            return Err(RemoteError::Rejected(format!(
                "{} rotated by {:.1}°, which its rotation policy does not allow",
                shape.id, placed.rotation
            )));
        }
        placements.push(placed);
    }
    if let Some(unknown) = by_name.keys().next() {
        return Err(RemoteError::Rejected(format!("unknown shape {unknown}")));
    }

    if !assertions::placements_within_sheet(&placements, instance.sheet) {
        return Err(RemoteError::Rejected("layout exceeds the sheet".into()));
    }
    if !assertions::placements_are_separated(&placements, instance.spacing) {
        return Err(RemoteError::Rejected(format!(
            "layout violates the spacing of {}",
            instance.spacing
        )));
    }

    Ok(NestingResult::new(instance, placements, None, 0))
}
