use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::info;

use lineup_optimizer::config::AppConfig;
use lineup_optimizer::domain::solver_factory::create_solver;
use lineup_optimizer::routes::{configure, json_config, AppState};

fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    // Must outlive the server so pending events get flushed
    let _sentry = config.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let solver: Arc<dyn lineup_optimizer::domain::solver::Solver> =
        Arc::from(create_solver(config.solver, config.solver_options));
    let state = web::Data::new(AppState::new(solver, config.cache_capacity));

    info!(
        "Starting server on http://127.0.0.1:{} with the {} solver",
        config.port,
        state.solver.name()
    );

    let json_limit = config.json_limit;
    actix_web::rt::System::new().block_on(async move {
        HttpServer::new(move || {
            App::new()
                .wrap(sentry_actix::Sentry::new())
                .wrap(Logger::default())
                .app_data(state.clone())
                .app_data(json_config(json_limit))
                .configure(configure)
        })
        .bind(("0.0.0.0", config.port))?
        .run()
        .await
    })
}
