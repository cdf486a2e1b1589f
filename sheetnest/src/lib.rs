#![doc = document_features::document_features!()]
//! `sheetnest` places a set of irregular polygons on a rectangular sheet without overlap,
//! respecting a minimum spacing, while keeping the bounding box of the resulting layout small.
//!
//! The engine is a deterministic, bounded-time heuristic: every shape is placed greedily at one of a
//! small set of anchor positions, under several processing orders, and the tightest layout wins.
//! The single entry point is [`nester::Nester`] (or the free function [`nester::nest`]).

/// Polygon-vs-polygon collision detection with spacing tolerance
pub mod collision_detection;

/// Shapes as seen by the engine: the arena of prepared shapes, placed shapes and results
pub mod entities;

/// Geometric primitives and base algorithms
pub mod geometry;

/// External (serializable) representation of requests and solutions
pub mod io;

/// Orchestration of simplification, strategy evaluation and result assembly
pub mod nester;

/// Candidate generation, placement search and the strategy runner
pub mod opt;

/// Helper functionality which does not belong to any specific module
pub mod util;

mod error;

#[doc(inline)]
pub use error::NestError;
#[doc(inline)]
pub use nester::{Nester, nest};
