use dotenvy::dotenv;
use std::process::ExitCode;

use activities::config::AppConfig;
use activities::database::ActivityStore;
use activities::web;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    // 1. Logging
    tracing_subscriber::fmt::init();
    tracing::info!(build_id = env!("MERGINGTON_BUILD_ID"), "starting activities server");

    // 2. Seed the store
    let config = AppConfig::from_env();
    let catalog = match config.load_catalog() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        activities = catalog.len(),
        seed = ?config.seed_path,
        "activity store seeded"
    );
    let store = ActivityStore::new(catalog);

    // 3. Application
    let app = web::router(store, &config.static_dir);

    // 4. Bind, with one fallback port
    let addr = match config.bind_addr(config.port) {
        Ok(a) => a,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            let fallback = match config.bind_addr(config.port.saturating_add(1)) {
                Ok(a) => a,
                Err(e) => {
                    tracing::error!("{}", e);
                    return ExitCode::FAILURE;
                }
            };
            tracing::warn!(%addr, %fallback, error = %e, "bind failed, trying fallback port");
            match tokio::net::TcpListener::bind(fallback).await {
                Ok(l) => l,
                Err(e) => {
                    tracing::error!(%fallback, error = %e, "could not bind fallback port");
                    return ExitCode::FAILURE;
                }
            }
        }
    };

    match listener.local_addr() {
        Ok(bound) => tracing::info!("serving on http://{}{}", bound, web::INDEX_PATH),
        Err(e) => tracing::warn!(error = %e, "could not read bound address"),
    }

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server stopped");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
