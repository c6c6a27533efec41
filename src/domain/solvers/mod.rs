pub mod exhaustive_solver;
pub mod glpk_solver;

#[cfg(feature = "highs-solver")]
pub mod highs_solver;

pub use exhaustive_solver::ExhaustiveSolver;
pub use glpk_solver::GlpkSolver;

#[cfg(feature = "highs-solver")]
pub use highs_solver::HighsSolver;
