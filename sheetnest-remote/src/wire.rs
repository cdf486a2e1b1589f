use itertools::Itertools;
use serde::{Deserialize, Serialize};

use sheetnest::io::ext_repr::NestRequest;

/// Request as understood by the remote service
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRequest {
    pub shapes: Vec<RemoteShape>,
    pub sheet_width: f64,
    pub sheet_height: f64,
    /// Spacing between shapes
    pub offset: f64,
    /// Number of discrete angles to try, 1 disables rotation
    pub rotations: usize,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RemoteShape {
    pub name: String,
    pub points: Vec<[f64; 2]>,
    pub closed: bool,
}

/// Response of the remote service
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RemoteResponse {
    /// `"ok"` on success, anything else is a failure
    pub status: String,
    #[serde(default)]
    pub placements: Vec<RemotePlacement>,
    #[serde(default)]
    pub placed: usize,
    #[serde(default)]
    pub failed: usize,
}

/// Final points of one shape, in the same order as requested
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RemotePlacement {
    pub name: String,
    pub points: Vec<[f64; 2]>,
}

impl From<&NestRequest> for RemoteRequest {
    fn from(request: &NestRequest) -> Self {
        let shapes = request
            .shapes
            .iter()
            .map(|s| RemoteShape {
                name: s.id.clone(),
                points: s.points.clone(),
                closed: s.closed,
            })
            .collect_vec();
        RemoteRequest {
            shapes,
            sheet_width: request.sheet_width,
            sheet_height: request.sheet_height,
            offset: request.spacing,
            rotations: request.rotation.n_orientations(),
        }
    }
}
