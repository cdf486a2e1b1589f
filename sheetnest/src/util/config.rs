use serde::{Deserialize, Serialize};

use crate::opt::strategy::StrategyKind;

/// Tuning knobs of the nesting engine.
/// Per-call inputs (sheet, spacing, rotations) live in [`NestRequest`](crate::io::ext_repr::NestRequest).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct NestConfig {
    /// Maximum number of vertices of the simplified polygon used for collision detection, 0 disables simplification
    pub max_vertices: usize,
    /// Step of the seed grid laid over the sheet while it is still empty
    pub grid_step: f64,
    /// Step at which the right and top edges of placed shapes are sampled for candidates
    pub edge_step: f64,
    /// Size of the grid to which candidates are snapped for de-duplication
    pub dedup_quantum: f64,
    /// Shape orderings to evaluate, the tightest resulting layout is kept
    pub strategies: Vec<StrategyKind>,
    /// Evaluate the strategies concurrently (requires the `parallel` feature)
    pub parallel: bool,
}

impl Default for NestConfig {
    fn default() -> Self {
        Self {
            max_vertices: 60,
            grid_step: 50.0,
            edge_step: 25.0,
            dedup_quantum: 5.0,
            strategies: StrategyKind::ALL.to_vec(),
            parallel: true,
        }
    }
}

impl NestConfig {
    /// Returns a description of the first invalid setting, if any
    pub fn validate(&self) -> Result<(), String> {
        let steps = [
            ("grid_step", self.grid_step),
            ("edge_step", self.edge_step),
            ("dedup_quantum", self.dedup_quantum),
        ];
        for (name, value) in steps {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{name} must be a positive number, got {value}"));
            }
        }
        if self.strategies.is_empty() {
            return Err("at least one strategy is required".to_string());
        }
        Ok(())
    }
}
