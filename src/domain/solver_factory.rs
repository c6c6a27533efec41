use crate::domain::solver::{Solver, SolverOptions};
use crate::domain::solvers::{ExhaustiveSolver, GlpkSolver};

#[cfg(feature = "highs-solver")]
use crate::domain::solvers::HighsSolver;

/// Available solver backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverType {
    Glpk,
    Exhaustive,
    #[cfg(feature = "highs-solver")]
    Highs,
}

impl SolverType {
    /// Parse solver type from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "glpk" => Some(SolverType::Glpk),
            "exhaustive" => Some(SolverType::Exhaustive),
            #[cfg(feature = "highs-solver")]
            "highs" => Some(SolverType::Highs),
            _ => None,
        }
    }
}

/// Create a solver instance based on the specified type
pub fn create_solver(solver_type: SolverType, options: SolverOptions) -> Box<dyn Solver> {
    match solver_type {
        SolverType::Glpk => Box::new(GlpkSolver::with_options(options)),
        SolverType::Exhaustive => Box::new(ExhaustiveSolver::new()),
        #[cfg(feature = "highs-solver")]
        SolverType::Highs => Box::new(HighsSolver::with_options(options)),
    }
}
