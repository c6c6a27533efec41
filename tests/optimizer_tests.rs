mod common;

use std::collections::HashSet;

use lineup_optimizer::domain::error::OptimizerError;
use lineup_optimizer::domain::model::RosterRules;
use lineup_optimizer::domain::optimizer::TeamOptimizer;
use lineup_optimizer::domain::pool::PlayerPool;
use lineup_optimizer::domain::solver::Solver;
use lineup_optimizer::domain::solvers::{ExhaustiveSolver, GlpkSolver};
use lineup_optimizer::domain::team::{Role, Team};

use common::*;

/// Independent check: best feasible 11-subset by plain enumeration.
fn brute_force_best(pool: &PlayerPool) -> (f64, HashSet<String>) {
    let players = pool.players();
    let rules = RosterRules::default();
    let mut best: Option<(f64, u32)> = None;

    for mask in 0u32..(1 << players.len()) {
        if mask.count_ones() as usize != rules.roster_size {
            continue;
        }
        let chosen: Vec<_> = (0..players.len())
            .filter(|i| mask & (1 << i) != 0)
            .map(|i| &players[i])
            .collect();

        let batsmen = chosen.iter().filter(|p| p.flags.is_batsman).count();
        let bowlers = chosen.iter().filter(|p| p.flags.is_bowler).count();
        let allrounders = chosen.iter().filter(|p| p.flags.is_allrounder).count();
        let keepers = chosen.iter().filter(|p| p.flags.is_keeper()).count();
        if batsmen < rules.min_batsmen
            || bowlers < rules.min_bowlers
            || allrounders > rules.max_allrounders
            || keepers > rules.max_keepers
        {
            continue;
        }

        let total: f64 = chosen.iter().map(|p| p.predicted_score).sum();
        if best.map_or(true, |(value, _)| total > value) {
            best = Some((total, mask));
        }
    }

    let (total, mask) = best.expect("instance is feasible");
    let ids = (0..players.len())
        .filter(|i| mask & (1 << i) != 0)
        .map(|i| players[i].id.clone())
        .collect();
    (total, ids)
}

fn raw_total(team: &Team) -> f64 {
    team.players.iter().map(|p| p.predicted_score).sum()
}

fn ids(team: &Team) -> HashSet<String> {
    team.player_ids().cloned().collect()
}

fn assert_team_invariants(pool: &PlayerPool, team: &Team) {
    let rules = RosterRules::default();
    assert_eq!(team.players.len(), rules.roster_size);

    let flags: Vec<_> = team
        .players
        .iter()
        .map(|p| &pool.players().iter().find(|q| q.id == p.player_id).unwrap().flags)
        .collect();
    assert!(flags.iter().filter(|f| f.is_batsman).count() >= rules.min_batsmen);
    assert!(flags.iter().filter(|f| f.is_bowler).count() >= rules.min_bowlers);
    assert!(flags.iter().filter(|f| f.is_allrounder).count() <= rules.max_allrounders);
    assert!(flags.iter().filter(|f| f.is_keeper()).count() <= rules.max_keepers);

    let captain = team.captain().unwrap();
    let vice_captain = team.vice_captain().unwrap();
    assert!(team.players[0].is_captain);
    assert!(team.players[1].is_vice_captain);
    assert!(captain.predicted_score >= vice_captain.predicted_score);
    for other in &team.players[2..] {
        assert!(vice_captain.predicted_score >= other.predicted_score);
        assert_eq!(other.multiplier, 1.0);
        assert!(!other.is_captain && !other.is_vice_captain);
    }

    let weighted = captain.predicted_score * 2.0
        + vice_captain.predicted_score * 1.5
        + team.players[2..].iter().map(|p| p.predicted_score).sum::<f64>();
    assert!((team.total_score - weighted).abs() < 1e-9);
}

#[test]
fn test_glpk_given_fifteen_player_pool_should_match_brute_force() {
    let pool = fifteen_player_pool();
    let (expected_total, expected_ids) = brute_force_best(&pool);
    assert_eq!(expected_total, 723.0);

    let solver = GlpkSolver::new();
    let teams = TeamOptimizer::new(&pool, &solver).solve(1).unwrap();

    assert_eq!(teams.len(), 1);
    assert_eq!(ids(&teams[0]), expected_ids);
    assert_eq!(raw_total(&teams[0]), expected_total);
    assert_team_invariants(&pool, &teams[0]);
}

#[test]
fn test_exhaustive_given_fifteen_player_pool_should_match_brute_force() {
    let pool = fifteen_player_pool();
    let (expected_total, expected_ids) = brute_force_best(&pool);

    let solver = ExhaustiveSolver::new();
    let teams = TeamOptimizer::new(&pool, &solver).solve(1).unwrap();

    assert_eq!(ids(&teams[0]), expected_ids);
    assert_eq!(raw_total(&teams[0]), expected_total);
}

#[test]
fn test_fifteen_player_pool_should_name_captain_and_roles() {
    let pool = fifteen_player_pool();
    let solver = GlpkSolver::new();
    let teams = TeamOptimizer::new(&pool, &solver).solve(1).unwrap();
    let team = &teams[0];

    assert_eq!(team.players[0].player_id, "b0");
    assert_eq!(team.players[1].player_id, "k0");
    assert_eq!(team.players[1].role, Role::WicketKeeper);
    assert_eq!(team.total_score, 723.0 + 90.0 + 44.0);

    let allrounder = team.players.iter().find(|p| p.player_id == "a1").unwrap();
    assert_eq!(allrounder.role, Role::AllRounder);
    assert!(!ids(team).contains("k1"));
}

#[test]
fn test_fifteen_player_pool_given_more_teams_than_possible_should_stop_early() {
    let pool = fifteen_player_pool();
    let solver = GlpkSolver::new();

    let teams = TeamOptimizer::new(&pool, &solver).solve(3).unwrap();

    assert_eq!(teams.len(), 1);
}

#[test]
fn test_forty_player_pool_should_return_disjoint_valid_teams() {
    let pool = forty_player_pool();
    let solver = GlpkSolver::new();

    let teams = TeamOptimizer::new(&pool, &solver).solve(3).unwrap();

    assert_eq!(teams.len(), 3);
    for team in &teams {
        assert_team_invariants(&pool, team);
    }
    for (i, a) in teams.iter().enumerate() {
        for b in &teams[i + 1..] {
            assert!(ids(a).is_disjoint(&ids(b)));
        }
    }
    assert!(raw_total(&teams[0]) >= raw_total(&teams[1]));
    assert!(raw_total(&teams[1]) >= raw_total(&teams[2]));
}

#[test]
fn test_solve_given_identical_inputs_should_be_deterministic() {
    let pool = forty_player_pool();
    let solver = GlpkSolver::new();
    let optimizer = TeamOptimizer::new(&pool, &solver);

    assert_eq!(optimizer.solve(3).unwrap(), optimizer.solve(3).unwrap());
}

#[test]
fn test_solve_given_larger_request_should_extend_smaller_one() {
    let pool = forty_player_pool();
    let solver = GlpkSolver::new();
    let optimizer = TeamOptimizer::new(&pool, &solver);

    let many = optimizer.solve(10).unwrap();
    assert!(many.len() < 10);

    for m in 1..=many.len() {
        assert_eq!(optimizer.solve(m).unwrap()[..], many[..m]);
    }
}

#[test]
fn test_solve_given_exact_roster_pool_should_use_everyone_once() {
    let mut rows = fifteen_player_rows();
    rows.retain(|(id, _, _)| !matches!(*id, "b5" | "w4" | "a1" | "k1"));
    let pool = pool_from(rows);
    assert_eq!(pool.len(), 11);

    for solver in [&GlpkSolver::new() as &dyn Solver, &ExhaustiveSolver::new()] {
        let teams = TeamOptimizer::new(&pool, solver).solve(2).unwrap();

        assert_eq!(teams.len(), 1, "{}", solver.name());
        assert_eq!(teams[0].players.len(), 11);
    }
}

#[test]
fn test_solve_given_unsatisfiable_quotas_should_return_no_teams() {
    // Eleven batsmen, one bowler: the bowler minimum can never be met
    let mut rows: Vec<(&str, _, f64)> = vec![
        ("b0", batsman(), 10.0),
        ("b1", batsman(), 11.0),
        ("b2", batsman(), 12.0),
        ("b3", batsman(), 13.0),
        ("b4", batsman(), 14.0),
        ("b5", batsman(), 15.0),
        ("b6", batsman(), 16.0),
        ("b7", batsman(), 17.0),
        ("b8", batsman(), 18.0),
        ("b9", batsman(), 19.0),
        ("b10", batsman(), 20.0),
    ];
    rows.push(("w0", bowler(), 5.0));
    let pool = pool_from(rows);

    let solver = GlpkSolver::new();
    let teams = TeamOptimizer::new(&pool, &solver).solve(3).unwrap();

    assert!(teams.is_empty());
}

#[test]
fn test_solve_given_keeper_heavy_pool_should_return_no_teams() {
    // Only the keeper cap makes this infeasible, so the pre-check passes and
    // the solver has to prove it
    let mut rows = vec![
        ("b0", batsman(), 10.0),
        ("b1", batsman(), 10.0),
        ("b2", batsman(), 10.0),
        ("w0", bowler(), 10.0),
        ("w1", bowler(), 10.0),
        ("w2", bowler(), 10.0),
    ];
    let keepers = ["k0", "k1", "k2", "k3", "k4", "k5"];
    rows.extend(keepers.iter().map(|id| (*id, keeper(), 20.0)));
    let pool = pool_from(rows);

    for solver in [&GlpkSolver::new() as &dyn Solver, &ExhaustiveSolver::new()] {
        let teams = TeamOptimizer::new(&pool, solver).solve(1).unwrap();

        assert!(teams.is_empty(), "{}", solver.name());
    }
}

#[test]
fn test_solve_given_keeper_cap_blocks_second_team_should_keep_first() {
    // Team 1 takes the eleven strong players; the eleven left over pass the
    // pre-check but hold five keepers, so only the solver can rule them out
    let mut rows = Vec::new();
    for id in ["b0", "b1", "b2", "b3", "b4"] {
        rows.push((id, batsman(), 100.0));
    }
    for id in ["w0", "w1", "w2", "w3", "w4"] {
        rows.push((id, bowler(), 100.0));
    }
    rows.push(("k0", keeper(), 100.0));
    for id in ["b5", "b6", "b7"] {
        rows.push((id, batsman(), 1.0));
    }
    for id in ["w5", "w6", "w7"] {
        rows.push((id, bowler(), 1.0));
    }
    for id in ["k1", "k2", "k3", "k4", "k5"] {
        rows.push((id, keeper(), 1.0));
    }
    let pool = pool_from(rows);

    for solver in [&GlpkSolver::new() as &dyn Solver, &ExhaustiveSolver::new()] {
        let teams = TeamOptimizer::new(&pool, solver).solve(3).unwrap();

        assert_eq!(teams.len(), 1, "{}", solver.name());
        assert_eq!(raw_total(&teams[0]), 1100.0);
        assert!(ids(&teams[0]).contains("k0"));
    }
}

#[test]
fn test_solve_given_negative_scores_should_still_pick_full_team() {
    let rows: Vec<(String, _, f64)> = (0..12)
        .map(|i| {
            let flags = if i % 2 == 0 { batsman() } else { bowler() };
            (format!("n{}", i), flags, -(i as f64) - 1.0)
        })
        .collect();
    let pool = pool_from(rows.iter().map(|(id, f, s)| (id.as_str(), f.clone(), *s)).collect());

    let solver = GlpkSolver::new();
    let teams = TeamOptimizer::new(&pool, &solver).solve(1).unwrap();

    assert_eq!(teams.len(), 1);
    assert!(!ids(&teams[0]).contains("n11"));
    assert_team_invariants(&pool, &teams[0]);
}

#[test]
fn test_solve_given_ten_players_should_return_invalid_pool() {
    let mut rows = fifteen_player_rows();
    rows.truncate(10);
    let pool = pool_from(rows);

    let solver = GlpkSolver::new();
    let result = TeamOptimizer::new(&pool, &solver).solve(1);

    assert!(matches!(result, Err(OptimizerError::InvalidPool(_))));
}
