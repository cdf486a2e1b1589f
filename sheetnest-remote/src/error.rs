use std::time::Duration;

use thiserror::Error;

/// Reasons a remote layout is not used.
/// None of these reach the caller: every one of them is answered by the local engine.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("no answer within {0:?}")]
    Timeout(Duration),
    #[error("remote solver answered with status {0}")]
    Status(String),
    #[error("remote solver returned no placements")]
    Empty,
    #[error("remote solver placed {placed} shape(s), failed {failed}")]
    Incomplete { placed: usize, failed: usize },
    #[error("remote layout rejected: {0}")]
    Rejected(String),
}
