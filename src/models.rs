use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::domain::team::Team;

// ---------- API (wire) types: owned & serde-friendly ----------

pub const DEFAULT_NUM_TEAMS: usize = 3;

/// One row of the attribute table as sent by the feature provider
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PlayerRow {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub player_id: String,
    #[serde(rename = "player", default)]
    pub name: String,
    #[serde(default, deserialize_with = "flag_from_bool_or_number")]
    pub is_batsman: bool,
    #[serde(default, deserialize_with = "flag_from_bool_or_number")]
    pub is_bowler: bool,
    #[serde(default, deserialize_with = "flag_from_bool_or_number")]
    pub is_allrounder: bool,
    /// Keeper indicator; anything above zero means keeper-eligible
    #[serde(default)]
    pub stump: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TeamsRequest {
    pub players: Vec<PlayerRow>,
    /// player_id -> predicted score
    pub predicted_scores: BTreeMap<String, f64>,
    #[serde(default = "default_num_teams")]
    pub num_teams: usize,
}

fn default_num_teams() -> usize {
    DEFAULT_NUM_TEAMS
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TeamsResponse {
    pub solver: String,
    pub teams: Vec<Team>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdValue {
    Text(String),
    Integer(i64),
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match IdValue::deserialize(deserializer)? {
        IdValue::Text(id) => id,
        IdValue::Integer(id) => id.to_string(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagValue {
    Bool(bool),
    Number(f64),
}

fn flag_from_bool_or_number<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match FlagValue::deserialize(deserializer)? {
        FlagValue::Bool(flag) => flag,
        FlagValue::Number(value) => value != 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_player_row_given_numeric_flags_and_id_should_parse() {
        let row: PlayerRow = serde_json::from_value(json!({
            "player_id": 42,
            "player": "V Kohli",
            "is_batsman": 1,
            "is_bowler": 0,
            "is_allrounder": false,
            "stump": 2
        }))
        .unwrap();

        assert_eq!(row.player_id, "42");
        assert_eq!(row.name, "V Kohli");
        assert!(row.is_batsman);
        assert!(!row.is_bowler);
        assert!(!row.is_allrounder);
        assert_eq!(row.stump, 2.0);
    }

    #[test]
    fn test_player_row_given_missing_attributes_should_default_to_zero() {
        let row: PlayerRow = serde_json::from_value(json!({ "player_id": "p1" })).unwrap();

        assert!(!row.is_batsman && !row.is_bowler && !row.is_allrounder);
        assert_eq!(row.stump, 0.0);
        assert_eq!(row.name, "");
    }

    #[test]
    fn test_teams_request_given_no_num_teams_should_default_to_three() {
        let request: TeamsRequest = serde_json::from_value(json!({
            "players": [],
            "predicted_scores": {}
        }))
        .unwrap();

        assert_eq!(request.num_teams, DEFAULT_NUM_TEAMS);
    }
}
