/// Set of functions used to verify the correctness of layouts.
/// Used in `debug_assert!()` blocks and to vet layouts produced outside the engine.
pub mod assertions;

mod config;
mod fpa;

#[doc(inline)]
pub use config::NestConfig;
#[doc(inline)]
pub use fpa::FPA;

/// Callback polled between shapes and between strategies, returns `true` when the call should be abandoned
pub type CancellationChecker = Box<dyn Fn() -> bool + Send + Sync>;
