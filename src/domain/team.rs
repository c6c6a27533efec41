use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::model::RosterRules;
use crate::domain::pool::{Player, PlayerId, PlayerPool, RoleFlags};

pub const CAPTAIN_MULTIPLIER: f64 = 2.0;
pub const VICE_CAPTAIN_MULTIPLIER: f64 = 1.5;
pub const DEFAULT_MULTIPLIER: f64 = 1.0;

/// The single display role of a selected player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "All-rounder")]
    AllRounder,
    Batsman,
    Bowler,
    #[serde(rename = "Wicket-keeper")]
    WicketKeeper,
}

pub type RolePredicate = fn(&RoleFlags) -> bool;

fn plays_allround(flags: &RoleFlags) -> bool {
    flags.is_allrounder
}

fn bats(flags: &RoleFlags) -> bool {
    flags.is_batsman
}

fn bowls(flags: &RoleFlags) -> bool {
    flags.is_bowler
}

/// Evaluated top-down; the first matching predicate names the role.
pub const ROLE_PRECEDENCE: [(RolePredicate, Role); 3] = [
    (plays_allround, Role::AllRounder),
    (bats, Role::Batsman),
    (bowls, Role::Bowler),
];

/// Players with none of the primary flags are listed as wicket-keepers.
pub fn resolve_role(flags: &RoleFlags) -> Role {
    ROLE_PRECEDENCE
        .iter()
        .find(|(matches, _)| matches(flags))
        .map(|(_, role)| *role)
        .unwrap_or(Role::WicketKeeper)
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedPlayer {
    pub player_id: PlayerId,
    pub name: String,
    pub predicted_score: f64,
    pub role: Role,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_captain: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_vice_captain: bool,
    pub multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub total_score: f64,
    /// Sorted by predicted score, captain first
    pub players: Vec<SelectedPlayer>,
}

impl Team {
    pub fn captain(&self) -> Option<&SelectedPlayer> {
        self.players.iter().find(|p| p.is_captain)
    }

    pub fn vice_captain(&self) -> Option<&SelectedPlayer> {
        self.players.iter().find(|p| p.is_vice_captain)
    }

    pub fn player_ids(&self) -> impl Iterator<Item = &PlayerId> {
        self.players.iter().map(|p| &p.player_id)
    }
}

/// Turn a 0/1 assignment over the pool into a team.
///
/// The selection is checked against `rules` and against `excluded` first; an
/// assignment that breaks them is reported back as an error message and never
/// becomes a `Team`.
pub fn assemble_team(
    pool: &PlayerPool,
    values: &[bool],
    excluded: &HashSet<PlayerId>,
    rules: &RosterRules,
) -> Result<Team, String> {
    if values.len() != pool.len() {
        return Err(format!(
            "Assignment covers {} variables but the pool has {} players",
            values.len(),
            pool.len(),
        ));
    }

    let selected: Vec<&Player> = pool
        .players()
        .iter()
        .zip(values)
        .filter(|(_, selected)| **selected)
        .map(|(player, _)| player)
        .collect();

    if let Some(reused) = selected.iter().find(|p| excluded.contains(&p.id)) {
        return Err(format!("Player {} is already in an earlier team", reused.id));
    }
    check_quotas(&selected, rules)?;

    let mut players: Vec<SelectedPlayer> = selected
        .into_iter()
        .map(|p| SelectedPlayer {
            player_id: p.id.clone(),
            name: p.name.clone(),
            predicted_score: p.predicted_score,
            role: resolve_role(&p.flags),
            is_captain: false,
            is_vice_captain: false,
            multiplier: DEFAULT_MULTIPLIER,
        })
        .collect();

    // Stable: equal scores keep pool order
    players.sort_by(|a, b| b.predicted_score.total_cmp(&a.predicted_score));

    if let Some(captain) = players.get_mut(0) {
        captain.is_captain = true;
        captain.multiplier = CAPTAIN_MULTIPLIER;
    }
    if let Some(vice_captain) = players.get_mut(1) {
        vice_captain.is_vice_captain = true;
        vice_captain.multiplier = VICE_CAPTAIN_MULTIPLIER;
    }

    let total_score = players
        .iter()
        .map(|p| p.predicted_score * p.multiplier)
        .sum();

    Ok(Team {
        total_score,
        players,
    })
}

fn check_quotas(selected: &[&Player], rules: &RosterRules) -> Result<(), String> {
    let count = |predicate: fn(&RoleFlags) -> bool| {
        selected.iter().filter(|p| predicate(&p.flags)).count()
    };

    if selected.len() != rules.roster_size {
        return Err(format!(
            "Selected {} players, expected {}",
            selected.len(),
            rules.roster_size
        ));
    }
    let batsmen = count(bats);
    if batsmen < rules.min_batsmen {
        return Err(format!("Only {} batsmen selected", batsmen));
    }
    let bowlers = count(bowls);
    if bowlers < rules.min_bowlers {
        return Err(format!("Only {} bowlers selected", bowlers));
    }
    let allrounders = count(plays_allround);
    if allrounders > rules.max_allrounders {
        return Err(format!("{} all-rounders selected", allrounders));
    }
    let keepers = count(RoleFlags::is_keeper);
    if keepers > rules.max_keepers {
        return Err(format!("{} wicket-keepers selected", keepers));
    }

    Ok(())
}
