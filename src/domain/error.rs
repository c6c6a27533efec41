use thiserror::Error;

/// A solver backend failed to run, or produced an assignment that cannot be
/// turned into a valid team.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{solver} solver failed: {details}")]
pub struct SolverError {
    pub solver: String,
    pub details: String,
}

impl SolverError {
    pub fn new(solver: impl Into<String>, details: impl Into<String>) -> Self {
        SolverError {
            solver: solver.into(),
            details: details.into(),
        }
    }
}

/// Errors that abort a whole `solve` call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizerError {
    /// The pool cannot be solved at all (too small, missing scores, ...)
    #[error("Invalid player pool: {0}")]
    InvalidPool(String),

    /// The backend failed; no local recovery
    #[error(transparent)]
    Solver(#[from] SolverError),
}

pub type Result<T> = std::result::Result<T, OptimizerError>;
