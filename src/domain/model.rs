use std::collections::HashSet;

use crate::domain::pool::{Player, PlayerId, PlayerPool};

/// Roster-size and role-composition rules for one team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterRules {
    pub roster_size: usize,
    pub min_batsmen: usize,
    pub min_bowlers: usize,
    pub max_allrounders: usize,
    pub max_keepers: usize,
}

impl Default for RosterRules {
    fn default() -> Self {
        RosterRules {
            roster_size: 11,
            min_batsmen: 3,
            min_bowlers: 3,
            max_allrounders: 4,
            max_keepers: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    LessOrEqual,
    GreaterOrEqual,
    Equal,
}

/// `sum(coef * x[var]) <relation> rhs`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    pub name: String,
    pub terms: Vec<(usize, i32)>,
    pub relation: Relation,
    pub rhs: i32,
}

impl LinearConstraint {
    fn counting<'a>(
        name: impl Into<String>,
        players: impl Iterator<Item = (usize, &'a Player)>,
        predicate: impl Fn(&Player) -> bool,
        relation: Relation,
        rhs: usize,
    ) -> Self {
        LinearConstraint {
            name: name.into(),
            terms: players
                .filter(|(_, p)| predicate(p))
                .map(|(i, _)| (i, 1))
                .collect(),
            relation,
            rhs: rhs as i32,
        }
    }

    pub fn lhs(&self, values: &[bool]) -> i32 {
        self.terms
            .iter()
            .filter(|(var, _)| values.get(*var).copied().unwrap_or(false))
            .map(|(_, coef)| *coef)
            .sum()
    }

    pub fn is_satisfied_by(&self, values: &[bool]) -> bool {
        let lhs = self.lhs(values);
        match self.relation {
            Relation::LessOrEqual => lhs <= self.rhs,
            Relation::GreaterOrEqual => lhs >= self.rhs,
            Relation::Equal => lhs == self.rhs,
        }
    }

    fn pins_to_zero(&self) -> Option<usize> {
        match (self.terms.as_slice(), self.relation, self.rhs) {
            ([(var, coef)], Relation::Equal, 0) if *coef != 0 => Some(*var),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecisionVariable {
    pub id: String,
}

/// One binary program: a variable per pool player (same index), a linear
/// objective to maximize and the roster constraints.
///
/// Built fresh for every iteration and dropped once the assignment has been
/// read back.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamModel {
    pub name: String,
    pub variables: Vec<DecisionVariable>,
    pub objective: Vec<f64>,
    pub constraints: Vec<LinearConstraint>,
}

impl TeamModel {
    /// Build the selection model for `pool`.
    ///
    /// Excluded players keep their variable and are pinned to zero by an
    /// equality row, so variable indices always match pool indices.
    pub fn build(pool: &PlayerPool, excluded: &HashSet<PlayerId>, rules: &RosterRules) -> Self {
        let players = pool.players();

        let variables = (0..players.len())
            .map(|i| DecisionVariable {
                id: format!("player_{}", i),
            })
            .collect();
        let objective = players.iter().map(|p| p.predicted_score).collect();

        let mut constraints = vec![
            LinearConstraint::counting(
                "roster_size",
                players.iter().enumerate(),
                |_| true,
                Relation::Equal,
                rules.roster_size,
            ),
            LinearConstraint::counting(
                "min_batsmen",
                players.iter().enumerate(),
                |p| p.flags.is_batsman,
                Relation::GreaterOrEqual,
                rules.min_batsmen,
            ),
            LinearConstraint::counting(
                "min_bowlers",
                players.iter().enumerate(),
                |p| p.flags.is_bowler,
                Relation::GreaterOrEqual,
                rules.min_bowlers,
            ),
            LinearConstraint::counting(
                "max_allrounders",
                players.iter().enumerate(),
                |p| p.flags.is_allrounder,
                Relation::LessOrEqual,
                rules.max_allrounders,
            ),
            LinearConstraint::counting(
                "max_keepers",
                players.iter().enumerate(),
                |p| p.flags.is_keeper(),
                Relation::LessOrEqual,
                rules.max_keepers,
            ),
        ];

        constraints.extend(
            players
                .iter()
                .enumerate()
                .filter(|(_, p)| excluded.contains(&p.id))
                .map(|(i, p)| LinearConstraint {
                    name: format!("exclude_{}", p.id),
                    terms: vec![(i, 1)],
                    relation: Relation::Equal,
                    rhs: 0,
                }),
        );

        TeamModel {
            name: "team_selection".to_string(),
            variables,
            objective,
            constraints,
        }
    }

    /// Variables forced to zero by a single-term equality row
    pub fn pinned_variables(&self) -> HashSet<usize> {
        self.constraints
            .iter()
            .filter_map(LinearConstraint::pins_to_zero)
            .collect()
    }

    /// Cheap necessary-condition check run before a solver call.
    ///
    /// Returns the name of a lower-bounded row that cannot be reached even if
    /// every non-pinned variable were selected.
    pub fn precheck(&self) -> Option<String> {
        let pinned = self.pinned_variables();

        self.constraints
            .iter()
            .filter(|c| c.relation != Relation::LessOrEqual)
            .filter(|c| c.terms.iter().all(|(_, coef)| *coef >= 0))
            .find(|c| {
                let reachable: i32 = c
                    .terms
                    .iter()
                    .filter(|(var, _)| !pinned.contains(var))
                    .map(|(_, coef)| *coef)
                    .sum();
                reachable < c.rhs
            })
            .map(|c| c.name.clone())
    }

    pub fn is_feasible(&self, values: &[bool]) -> bool {
        values.len() == self.variables.len()
            && self.constraints.iter().all(|c| c.is_satisfied_by(values))
    }

    pub fn objective_value(&self, values: &[bool]) -> f64 {
        self.objective
            .iter()
            .zip(values)
            .filter(|(_, selected)| **selected)
            .map(|(coef, _)| *coef)
            .sum()
    }
}
