//! Delegation of nesting calls to an optional remote service.
//!
//! A [`FallbackNester`] makes exactly one attempt at the remote service, bounded by a mandatory timeout,
//! and falls back to the local [`sheetnest`] engine on any error, timeout, empty or invalid response.
//! Callers receive the same [`NestingResult`](sheetnest::entities::NestingResult) either way.

mod config;
mod error;
mod fallback;
mod solver;

/// Wire format of the remote service
pub mod wire;

#[doc(inline)]
pub use config::RemoteConfig;
#[doc(inline)]
pub use error::RemoteError;
#[doc(inline)]
pub use fallback::{FallbackNester, SolutionSource, Solved, solve_local};
#[doc(inline)]
pub use solver::{HttpSolver, RemoteSolver};
