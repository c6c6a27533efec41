use crate::domain::error::SolverError;
use crate::domain::model::{Relation, TeamModel};
use crate::domain::solver::{SolveOutcome, Solver};
use crate::domain::validate::validate_model;

pub const MAX_FREE_VARIABLES: usize = 24;

/// Exact depth-first search over the non-pinned variables.
///
/// Branches are cut as soon as a row can no longer be satisfied or the
/// objective cannot beat the incumbent. Worst case is still exponential, so
/// this backend is meant for small pools and as a reference for the others.
pub struct ExhaustiveSolver;

impl ExhaustiveSolver {
    pub fn new() -> Self {
        ExhaustiveSolver
    }
}

impl Default for ExhaustiveSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for ExhaustiveSolver {
    fn solve(&self, model: &TeamModel) -> Result<SolveOutcome, SolverError> {
        validate_model(model, self.name())?;

        let pinned = model.pinned_variables();
        let free: Vec<usize> = (0..model.variables.len())
            .filter(|i| !pinned.contains(i))
            .collect();

        if free.len() > MAX_FREE_VARIABLES {
            return Err(SolverError::new(
                self.name(),
                format!(
                    "{} free variables exceed the search limit of {}",
                    free.len(),
                    MAX_FREE_VARIABLES,
                ),
            ));
        }

        let mut search = Search::new(model, free);
        search.branch(0, 0.0);

        Ok(match search.best {
            Some((_, values)) => SolveOutcome::Optimal(values),
            None => SolveOutcome::Infeasible {
                reason: "no assignment satisfies every constraint".to_string(),
            },
        })
    }

    fn name(&self) -> &str {
        "Exhaustive"
    }
}

struct Search<'m> {
    model: &'m TeamModel,
    free: Vec<usize>,
    /// (row, coef) entries per variable
    columns: Vec<Vec<(usize, i32)>>,
    lhs: Vec<i32>,
    /// Positive and negative coefficient mass of undecided variables per row
    pos_left: Vec<i32>,
    neg_left: Vec<i32>,
    /// objective_left[k]: best objective gain still available from free[k..]
    objective_left: Vec<f64>,
    values: Vec<bool>,
    best: Option<(f64, Vec<bool>)>,
}

impl<'m> Search<'m> {
    fn new(model: &'m TeamModel, free: Vec<usize>) -> Self {
        let n_rows = model.constraints.len();

        let mut columns = vec![Vec::new(); model.variables.len()];
        for (row, constraint) in model.constraints.iter().enumerate() {
            for (var, coef) in &constraint.terms {
                columns[*var].push((row, *coef));
            }
        }

        let mut pos_left = vec![0; n_rows];
        let mut neg_left = vec![0; n_rows];
        for var in &free {
            for (row, coef) in &columns[*var] {
                if *coef > 0 {
                    pos_left[*row] += coef;
                } else {
                    neg_left[*row] += coef;
                }
            }
        }

        let mut objective_left = vec![0.0; free.len() + 1];
        for k in (0..free.len()).rev() {
            objective_left[k] = objective_left[k + 1] + model.objective[free[k]].max(0.0);
        }

        Search {
            model,
            free,
            columns,
            lhs: vec![0; n_rows],
            pos_left,
            neg_left,
            objective_left,
            values: vec![false; model.variables.len()],
            best: None,
        }
    }

    fn can_still_satisfy(&self) -> bool {
        self.model
            .constraints
            .iter()
            .enumerate()
            .all(|(row, constraint)| {
                let lowest = self.lhs[row] + self.neg_left[row];
                let highest = self.lhs[row] + self.pos_left[row];
                match constraint.relation {
                    Relation::LessOrEqual => lowest <= constraint.rhs,
                    Relation::GreaterOrEqual => highest >= constraint.rhs,
                    Relation::Equal => lowest <= constraint.rhs && highest >= constraint.rhs,
                }
            })
    }

    fn branch(&mut self, depth: usize, value: f64) {
        if !self.can_still_satisfy() {
            return;
        }
        // Ties never replace the incumbent, so the first optimum found wins
        if let Some((best, _)) = &self.best {
            if value + self.objective_left[depth] <= *best {
                return;
            }
        }
        if depth == self.free.len() {
            self.best = Some((value, self.values.clone()));
            return;
        }

        let var = self.free[depth];
        self.decide(var);

        self.set(var, true);
        self.branch(depth + 1, value + self.model.objective[var]);
        self.set(var, false);
        self.branch(depth + 1, value);

        self.undecide(var);
    }

    fn decide(&mut self, var: usize) {
        for (row, coef) in &self.columns[var] {
            if *coef > 0 {
                self.pos_left[*row] -= coef;
            } else {
                self.neg_left[*row] -= coef;
            }
        }
    }

    fn undecide(&mut self, var: usize) {
        for (row, coef) in &self.columns[var] {
            if *coef > 0 {
                self.pos_left[*row] += coef;
            } else {
                self.neg_left[*row] += coef;
            }
        }
    }

    fn set(&mut self, var: usize, selected: bool) {
        if self.values[var] == selected {
            return;
        }
        self.values[var] = selected;
        let sign = if selected { 1 } else { -1 };
        for (row, coef) in &self.columns[var] {
            self.lhs[*row] += sign * coef;
        }
    }
}
