//! # Lineup Optimizer
//!
//! Picks mutually exclusive 11-player fantasy cricket teams from a scored
//! player pool. Each team maximizes the total predicted score under the
//! roster rules (exactly 11 players, at least 3 batsmen and 3 bowlers, at
//! most 4 all-rounders and 1 wicket-keeper). The top two scorers of each
//! team become captain (2x) and vice-captain (1.5x).
//!
//! ```no_run
//! use std::collections::HashMap;
//! use lineup_optimizer::domain::optimizer::TeamOptimizer;
//! use lineup_optimizer::domain::pool::{PlayerPool, PlayerRecord};
//! use lineup_optimizer::domain::solvers::GlpkSolver;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let records: Vec<PlayerRecord> = Vec::new(); // from the feature provider
//! let scores: HashMap<String, f64> = HashMap::new();
//!
//! let pool = PlayerPool::new(records, &scores)?;
//! let solver = GlpkSolver::new();
//! let teams = TeamOptimizer::new(&pool, &solver).solve(3)?;
//! println!("{} teams", teams.len());
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod convert;
pub mod domain;
pub mod models;
pub mod routes;
