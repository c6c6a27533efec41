use std::collections::{HashMap, HashSet};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::domain::error::{OptimizerError, Result};

pub type PlayerId = String;

/// Role indicators produced upstream. They are not mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleFlags {
    #[serde(default)]
    pub is_batsman: bool,
    #[serde(default)]
    pub is_bowler: bool,
    #[serde(default)]
    pub is_allrounder: bool,
    /// Any positive value marks the player as wicket-keeper eligible
    #[serde(default)]
    pub keeper_indicator: f64,
}

impl RoleFlags {
    pub fn is_keeper(&self) -> bool {
        self.keeper_indicator > 0.0
    }
}

/// One row of the attribute table, before scores are joined in.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    pub player_id: PlayerId,
    pub name: String,
    pub flags: RoleFlags,
}

impl PlayerRecord {
    pub fn new(player_id: impl Into<PlayerId>, name: impl Into<String>, flags: RoleFlags) -> Self {
        PlayerRecord {
            player_id: player_id.into(),
            name: name.into(),
            flags,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub predicted_score: f64,
    pub flags: RoleFlags,
}

/// Immutable per-solve snapshot of the candidates.
///
/// Players keep the order of the attribute table; that order is the
/// tie-break everywhere downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerPool {
    players: Vec<Player>,
}

impl PlayerPool {
    /// Join the attribute table with the score mapping.
    ///
    /// Duplicate `player_id`s collapse to their first occurrence. Every
    /// remaining player needs a finite score; scores for unknown ids are
    /// ignored.
    pub fn new(records: Vec<PlayerRecord>, scores: &HashMap<PlayerId, f64>) -> Result<Self> {
        let mut seen: HashSet<PlayerId> = HashSet::with_capacity(records.len());
        let mut players = Vec::with_capacity(records.len());

        for record in records {
            if record.player_id.is_empty() {
                return Err(OptimizerError::InvalidPool(format!(
                    "Player '{}' has an empty player_id",
                    record.name
                )));
            }
            if !seen.insert(record.player_id.clone()) {
                debug!("Dropping duplicate entry for player {}", record.player_id);
                continue;
            }

            let predicted_score = match scores.get(&record.player_id) {
                Some(score) if score.is_finite() => *score,
                Some(score) => {
                    return Err(OptimizerError::InvalidPool(format!(
                        "Predicted score for player {} is not finite ({})",
                        record.player_id, score
                    )))
                }
                None => {
                    return Err(OptimizerError::InvalidPool(format!(
                        "Missing predicted score for player {}",
                        record.player_id
                    )))
                }
            };

            players.push(Player {
                id: record.player_id,
                name: record.name,
                predicted_score,
                flags: record.flags,
            });
        }

        let unknown = scores.keys().filter(|id| !seen.contains(*id)).count();
        if unknown > 0 {
            debug!("Ignoring {} scores for players outside the pool", unknown);
        }

        Ok(PlayerPool { players })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn get(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
