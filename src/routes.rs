use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use log::{debug, error, warn};

use crate::cache::SolveCache;
use crate::convert::to_player_pool;
use crate::domain::error::OptimizerError;
use crate::domain::optimizer::TeamOptimizer;
use crate::domain::solver::Solver;
use crate::domain::team::Team;
use crate::models::{ErrorResponse, TeamsRequest, TeamsResponse};

/// Shared by every worker
pub struct AppState {
    pub solver: Arc<dyn Solver>,
    pub cache: SolveCache,
}

impl AppState {
    pub fn new(solver: Arc<dyn Solver>, cache_capacity: usize) -> Self {
        AppState {
            solver,
            cache: SolveCache::new(cache_capacity),
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/teams", web::post().to(solve_teams))
        .route("/health", web::get().to(health_check));
}

/// JSON extractor config: body limit plus `{"error": ...}` bodies for
/// unparseable payloads
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _| {
            let err_string = err.to_string();
            actix_web::error::InternalError::from_response(
                err,
                HttpResponse::BadRequest().json(ErrorResponse { error: err_string }),
            )
            .into()
        })
}

fn error_response(mut builder: actix_web::HttpResponseBuilder, message: String) -> HttpResponse {
    builder.json(ErrorResponse { error: message })
}

fn teams_response(solver: &str, teams: Vec<Team>) -> HttpResponse {
    HttpResponse::Ok().json(TeamsResponse {
        solver: solver.to_string(),
        teams,
    })
}

/// POST /teams
pub async fn solve_teams(state: web::Data<AppState>, req: web::Json<TeamsRequest>) -> HttpResponse {
    let request = req.into_inner();
    if request.num_teams == 0 {
        return error_response(
            HttpResponse::BadRequest(),
            "num_teams must be a positive integer".to_string(),
        );
    }

    let key = SolveCache::key(&request);
    if let Some(teams) = key.as_deref().and_then(|k| state.cache.get(k)) {
        debug!("Serving {} teams from cache", teams.len());
        return teams_response(state.solver.name(), teams);
    }

    // The solve is CPU-bound; keep it off the async workers
    let solver = Arc::clone(&state.solver);
    let result = web::block(move || {
        let pool = to_player_pool(&request)?;
        TeamOptimizer::new(&pool, solver.as_ref()).solve(request.num_teams)
    })
    .await;

    match result {
        Ok(Ok(teams)) => {
            if let Some(key) = key {
                state.cache.put(key, teams.clone());
            }
            teams_response(state.solver.name(), teams)
        }
        Ok(Err(OptimizerError::InvalidPool(details))) => {
            warn!("Rejected player pool: {}", details);
            error_response(HttpResponse::BadRequest(), details)
        }
        Ok(Err(err @ OptimizerError::Solver(_))) => {
            error!("{}", err);
            error_response(HttpResponse::InternalServerError(), err.to_string())
        }
        Err(err) => {
            error!("Solve task failed: {}", err);
            error_response(
                HttpResponse::InternalServerError(),
                "Something went wrong".to_string(),
            )
        }
    }
}

/// GET /health
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

/// GET /
pub async fn root(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "solver": state.solver.name(),
        "endpoints": ["POST /teams", "GET /health"],
    }))
}
