use std::time::Duration;

use crate::domain::error::SolverError;
use crate::domain::model::TeamModel;

/// Knobs shared by the solver backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverOptions {
    pub use_presolve: bool,
    /// Per-solve budget. Running out counts as an infeasible iteration.
    pub time_limit: Option<Duration>,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            use_presolve: true,
            time_limit: None,
        }
    }
}

/// Result of one solver call
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    /// Proven-optimal 0/1 value for every model variable, by variable index
    Optimal(Vec<bool>),
    /// No feasible assignment (or the budget ran out before one was proven)
    Infeasible { reason: String },
}

/// Common interface for the exact binary-program backends
pub trait Solver: Send + Sync {
    /// Maximize the model's objective subject to its constraints.
    ///
    /// Every call builds its own native problem; nothing is kept between
    /// calls.
    fn solve(&self, model: &TeamModel) -> Result<SolveOutcome, SolverError>;

    /// Get the solver name for logging/debugging
    fn name(&self) -> &str;
}
