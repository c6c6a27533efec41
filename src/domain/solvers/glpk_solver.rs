use log::warn;

use crate::convert::{to_borrowed_objective, to_glpk_polyhedron};
use crate::domain::error::SolverError;
use crate::domain::model::TeamModel;
use crate::domain::solver::{SolveOutcome, Solver, SolverOptions};
use crate::domain::validate::validate_model;

use glpk_rust::{solve_ilps as glpk_solve_ilps, Status as GlpkStatus};

const NO_TERMINAL_OUTPUT: bool = false;
const MAXIMIZE: bool = true;

/// `glp_intopt` return codes meaning the LP relaxation has no feasible point
const GLP_ENOPFS: i32 = 10;
const GLP_EROOT: i32 = 16;

/// GLPK solver implementation
pub struct GlpkSolver {
    use_presolve: bool,
}

impl GlpkSolver {
    pub fn new() -> Self {
        Self::with_options(SolverOptions::default())
    }

    /// GLPK has no time limit hook; a configured limit is reported and ignored.
    pub fn with_options(options: SolverOptions) -> Self {
        if let Some(limit) = options.time_limit {
            warn!(
                "GLPK backend ignores the configured time limit of {:?}; use the HiGHS backend for bounded solves",
                limit
            );
        }
        GlpkSolver {
            use_presolve: options.use_presolve,
        }
    }
}

/// Pull the `glp_intopt` return code out of glpk-rust's failure message
fn mip_return_code(error: Option<&str>) -> Option<i32> {
    error?.rsplit(':').next()?.trim().parse().ok()
}

impl Default for GlpkSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for GlpkSolver {
    fn solve(&self, model: &TeamModel) -> Result<SolveOutcome, SolverError> {
        validate_model(model, self.name())?;

        // Solver expects &mut
        let mut polyhedron = to_glpk_polyhedron(model);
        let objective = to_borrowed_objective(model);

        let solution = glpk_solve_ilps(
            &mut polyhedron,
            vec![objective],
            MAXIMIZE,
            self.use_presolve,
            NO_TERMINAL_OUTPUT,
        )
            .into_iter()
            .next()
            .ok_or_else(|| SolverError::new(self.name(), "GLPK returned no solution"))?;

        match solution.status {
            GlpkStatus::Optimal => {
                let values = model
                    .variables
                    .iter()
                    .map(|v| solution.solution.get(v.id.as_str()).copied().unwrap_or(0) > 0)
                    .collect();
                Ok(SolveOutcome::Optimal(values))
            }
            GlpkStatus::Infeasible | GlpkStatus::NoFeasible | GlpkStatus::EmptySpace => {
                Ok(SolveOutcome::Infeasible {
                    reason: "GLPK found no feasible assignment".to_string(),
                })
            }
            GlpkStatus::Feasible => Ok(SolveOutcome::Infeasible {
                reason: "GLPK stopped before proving optimality".to_string(),
            }),
            GlpkStatus::MIPFailed
                if matches!(
                    mip_return_code(solution.error.as_deref()),
                    Some(GLP_ENOPFS | GLP_EROOT)
                ) =>
            {
                Ok(SolveOutcome::Infeasible {
                    reason: "GLPK found the relaxation infeasible".to_string(),
                })
            }
            GlpkStatus::Undefined
            | GlpkStatus::Unbounded
            | GlpkStatus::SimplexFailed
            | GlpkStatus::MIPFailed => Err(SolverError::new(
                self.name(),
                solution
                    .error
                    .clone()
                    .unwrap_or_else(|| "GLPK did not finish the solve".to_string()),
            )),
        }
    }

    fn name(&self) -> &str {
        "GLPK"
    }
}
