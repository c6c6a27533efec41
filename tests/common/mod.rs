#![allow(dead_code)]

use std::collections::HashMap;

use lineup_optimizer::domain::pool::{PlayerId, PlayerPool, PlayerRecord, RoleFlags};
use serde_json::{json, Value};

pub fn batsman() -> RoleFlags {
    RoleFlags { is_batsman: true, ..Default::default() }
}

pub fn bowler() -> RoleFlags {
    RoleFlags { is_bowler: true, ..Default::default() }
}

pub fn allrounder() -> RoleFlags {
    RoleFlags {
        is_batsman: true,
        is_bowler: true,
        is_allrounder: true,
        keeper_indicator: 0.0,
    }
}

pub fn keeper() -> RoleFlags {
    RoleFlags { keeper_indicator: 1.0, ..Default::default() }
}

pub fn pool_from(players: Vec<(&str, RoleFlags, f64)>) -> PlayerPool {
    let scores: HashMap<PlayerId, f64> = players
        .iter()
        .map(|(id, _, score)| (id.to_string(), *score))
        .collect();
    let records = players
        .into_iter()
        .map(|(id, flags, _)| PlayerRecord::new(id, format!("Player {}", id), flags))
        .collect();
    PlayerPool::new(records, &scores).unwrap()
}

/// 6 batsmen, 5 bowlers, 2 all-rounders, 2 keepers, distinct scores.
///
/// The 11 best raw scores hold both keepers, so the optimum has to drop
/// one of them.
pub fn fifteen_player_rows() -> Vec<(&'static str, RoleFlags, f64)> {
    vec![
        ("b0", batsman(), 90.0),
        ("b1", batsman(), 85.0),
        ("b2", batsman(), 80.0),
        ("b3", batsman(), 75.0),
        ("b4", batsman(), 70.0),
        ("b5", batsman(), 65.0),
        ("w0", bowler(), 30.0),
        ("w1", bowler(), 25.0),
        ("w2", bowler(), 20.0),
        ("w3", bowler(), 15.0),
        ("w4", bowler(), 10.0),
        ("a0", allrounder(), 60.0),
        ("a1", allrounder(), 55.0),
        ("k0", keeper(), 88.0),
        ("k1", keeper(), 86.0),
    ]
}

pub fn fifteen_player_pool() -> PlayerPool {
    pool_from(fifteen_player_rows())
}

/// Deterministic 40-player pool with repeating role pattern
pub fn forty_player_pool() -> PlayerPool {
    let ids: Vec<String> = (0..40).map(|i| format!("p{:02}", i)).collect();
    let rows = ids
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let flags = match i % 8 {
                0..=2 => batsman(),
                3..=5 => bowler(),
                6 => allrounder(),
                _ => keeper(),
            };
            let score = ((i * 37) % 101) as f64 + i as f64 / 100.0;
            (id.as_str(), flags, score)
        })
        .collect();
    pool_from(rows)
}

pub fn fifteen_player_request(num_teams: usize) -> Value {
    let players: Vec<Value> = fifteen_player_rows()
        .iter()
        .map(|(id, flags, _)| {
            json!({
                "player_id": id,
                "player": format!("Player {}", id),
                "is_batsman": flags.is_batsman as i32,
                "is_bowler": flags.is_bowler as i32,
                "is_allrounder": flags.is_allrounder as i32,
                "stump": flags.keeper_indicator,
            })
        })
        .collect();
    let scores: serde_json::Map<String, Value> = fifteen_player_rows()
        .iter()
        .map(|(id, _, score)| (id.to_string(), json!(score)))
        .collect();

    json!({
        "players": players,
        "predicted_scores": scores,
        "num_teams": num_teams,
    })
}
