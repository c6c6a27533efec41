use std::collections::HashSet;

use log::{debug, error, info};

use crate::domain::error::{OptimizerError, Result, SolverError};
use crate::domain::model::{RosterRules, TeamModel};
use crate::domain::pool::{PlayerId, PlayerPool};
use crate::domain::solver::{SolveOutcome, Solver};
use crate::domain::team::{assemble_team, Team};

/// Produces mutually exclusive teams from one pool.
///
/// Team 1 is the optimum over the whole pool, team 2 the optimum once team
/// 1's players are excluded, and so on. This is a greedy partition, not a
/// jointly optimal set of teams.
pub struct TeamOptimizer<'a> {
    pool: &'a PlayerPool,
    solver: &'a dyn Solver,
    rules: RosterRules,
}

/// State of one `solve` call; dropped when the call returns.
struct SolveSession {
    excluded: HashSet<PlayerId>,
    accepted: Vec<Team>,
}

impl<'a> TeamOptimizer<'a> {
    pub fn new(pool: &'a PlayerPool, solver: &'a dyn Solver) -> Self {
        Self::with_rules(pool, solver, RosterRules::default())
    }

    pub fn with_rules(pool: &'a PlayerPool, solver: &'a dyn Solver, rules: RosterRules) -> Self {
        TeamOptimizer { pool, solver, rules }
    }

    /// Generate up to `num_teams` teams, best first.
    ///
    /// Running out of feasible selections ends the run early and returns
    /// the teams found so far. Pool and solver failures abort the call.
    pub fn solve(&self, num_teams: usize) -> Result<Vec<Team>> {
        if self.pool.len() < self.rules.roster_size {
            return Err(OptimizerError::InvalidPool(format!(
                "Need at least {} players, got {}",
                self.rules.roster_size,
                self.pool.len(),
            )));
        }

        let mut session = SolveSession {
            excluded: HashSet::new(),
            accepted: Vec::with_capacity(num_teams),
        };

        for iteration in 1..=num_teams {
            let model = TeamModel::build(self.pool, &session.excluded, &self.rules);
            debug!(
                "Team {}: solving with {} and {} excluded players",
                iteration,
                self.solver.name(),
                session.excluded.len(),
            );

            let outcome = match model.precheck() {
                Some(row) => SolveOutcome::Infeasible {
                    reason: format!("constraint {} cannot be met by the remaining players", row),
                },
                None => self.solver.solve(&model).map_err(|e| {
                    error!("Solver failure on team {}: {}", iteration, e);
                    e
                })?,
            };

            let values = match outcome {
                SolveOutcome::Optimal(values) => values,
                SolveOutcome::Infeasible { reason } => {
                    info!(
                        "Stopping after {} of {} teams: {}",
                        session.accepted.len(),
                        num_teams,
                        reason,
                    );
                    break;
                }
            };

            let team = assemble_team(self.pool, &values, &session.excluded, &self.rules)
                .map_err(|details| SolverError::new(self.solver.name(), details))?;

            debug!("Team {}: total score {:.2}", iteration, team.total_score);
            session.excluded.extend(team.player_ids().cloned());
            session.accepted.push(team);
        }

        Ok(session.accepted)
    }
}
