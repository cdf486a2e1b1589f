/// Anchor positions for the next shape, derived from the shapes placed so far
pub mod candidates;

/// Greedy search for the best position of a single shape
pub mod search;

/// Evaluation of all shape orderings and selection of the tightest layout
pub mod runner;

pub mod score;

/// Shape orderings
pub mod strategy;
