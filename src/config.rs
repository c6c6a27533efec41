use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::domain::solver::SolverOptions;
use crate::domain::solver_factory::SolverType;

const DEFAULT_PORT: u16 = 9000;
const DEFAULT_JSON_LIMIT: usize = 2 * 1024 * 1024; // 2 MB
const DEFAULT_CACHE_CAPACITY: usize = 128;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Unknown solver '{0}'")]
    UnknownSolver(String),
}

/// Service settings, read from the environment (and `.env`)
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    pub json_limit: usize,
    pub solver: SolverType,
    pub solver_options: SolverOptions,
    /// 0 disables the response cache
    pub cache_capacity: usize,
    pub sentry_dsn: Option<String>,
}

impl AppConfig {
    /// Unparseable values fall back to their defaults; only an unknown
    /// solver name is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        let solver_name = env::var("SOLVER").unwrap_or_else(|_| "glpk".to_string());
        let solver = SolverType::from_str(&solver_name)
            .ok_or_else(|| ConfigError::UnknownSolver(solver_name.clone()))?;

        let time_limit = env::var("SOLVER_TIME_LIMIT_SECS")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|secs| secs.is_finite() && *secs > 0.0)
            .map(Duration::from_secs_f64);

        Ok(AppConfig {
            port: parse_or("PORT", DEFAULT_PORT),
            json_limit: parse_or("JSON_PAYLOAD_LIMIT", DEFAULT_JSON_LIMIT),
            solver,
            solver_options: SolverOptions {
                use_presolve: parse_or("USE_PRESOLVE", true),
                time_limit,
            },
            cache_capacity: parse_or("CACHE_CAPACITY", DEFAULT_CACHE_CAPACITY),
            sentry_dsn: env::var("SENTRY_DSN").ok().filter(|dsn| !dsn.is_empty()),
        })
    }
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
