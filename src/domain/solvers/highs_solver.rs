use log::warn;

use crate::domain::error::SolverError;
use crate::domain::model::{Relation, TeamModel};
use crate::domain::solver::{SolveOutcome, Solver, SolverOptions};
use crate::domain::validate::validate_model;

use ::highs::{ColProblem, HighsModelStatus, Sense};

/// HiGHS solver implementation
pub struct HighsSolver {
    options: SolverOptions,
}

impl HighsSolver {
    pub fn new() -> Self {
        Self::with_options(SolverOptions::default())
    }

    pub fn with_options(options: SolverOptions) -> Self {
        HighsSolver { options }
    }
}

impl Default for HighsSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for HighsSolver {
    fn solve(&self, model: &TeamModel) -> Result<SolveOutcome, SolverError> {
        validate_model(model, self.name())?;

        // A fresh problem per call
        let mut problem = ColProblem::new();

        let mut rows = Vec::with_capacity(model.constraints.len());
        for constraint in &model.constraints {
            let rhs = constraint.rhs as f64;
            let row = match constraint.relation {
                Relation::LessOrEqual => problem.add_row(..=rhs),
                Relation::GreaterOrEqual => problem.add_row(rhs..),
                Relation::Equal => problem.add_row(rhs..=rhs),
            };
            rows.push(row);
        }

        // Column-major view of the constraint matrix
        let mut col_data: Vec<Vec<(usize, f64)>> = vec![Vec::new(); model.variables.len()];
        for (row_idx, constraint) in model.constraints.iter().enumerate() {
            for (var, coef) in &constraint.terms {
                col_data[*var].push((row_idx, *coef as f64));
            }
        }

        for (col_idx, coef) in model.objective.iter().enumerate() {
            let row_factors: Vec<_> = col_data[col_idx]
                .iter()
                .map(|(row_idx, val)| (rows[*row_idx], *val))
                .collect();
            problem.add_integer_column(*coef, 0.0..=1.0, &row_factors);
        }

        let mut highs_model = problem.optimise(Sense::Maximise);
        highs_model.set_option("output_flag", false);
        if !self.options.use_presolve {
            highs_model.set_option("presolve", "off");
        }
        if let Some(limit) = self.options.time_limit {
            highs_model.set_option("time_limit", limit.as_secs_f64());
        }

        let solved = highs_model.solve();

        match solved.status() {
            HighsModelStatus::Optimal => {
                let solution = solved.get_solution();
                let values = (0..model.variables.len())
                    .map(|i| solution.columns().get(i).copied().unwrap_or(0.0).round() > 0.0)
                    .collect();
                Ok(SolveOutcome::Optimal(values))
            }
            // Every column is bounded, so presolve's "unbounded or infeasible" is infeasible
            HighsModelStatus::Infeasible | HighsModelStatus::UnboundedOrInfeasible => {
                Ok(SolveOutcome::Infeasible {
                    reason: "HiGHS proved the model infeasible".to_string(),
                })
            }
            HighsModelStatus::ReachedTimeLimit => {
                warn!("HiGHS reached its time limit of {:?}", self.options.time_limit);
                Ok(SolveOutcome::Infeasible {
                    reason: "HiGHS time limit reached".to_string(),
                })
            }
            other => Err(SolverError::new(
                self.name(),
                format!("HiGHS finished with status {:?}", other),
            )),
        }
    }

    fn name(&self) -> &str {
        "HiGHS"
    }
}
