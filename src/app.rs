/*
 * Responsibility
 * - Config load → dependency wiring (pool, migrations, gate, issuer) → Router assembly
 * - Middleware order: http → cors → security headers → bearer gate → handlers
 * - axum::serve() start-up
 */
use std::{panic, process};

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::v1::handlers::health::health;
use crate::config::Config;
use crate::services::auth::{build_auth_gate, build_token_issuer};
use crate::state::AppState;
use crate::{api, middleware};

fn init_tracing() {
    // RUST_LOG wins when set, e.g. RUST_LOG=info,eshop_api=debug,tower_http=debug
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash loudly. Production: default hook, keep serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {} (prefix {})",
        config.app_env,
        config.addr,
        config.api_prefix
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("binding {}", config.addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let db = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("connecting to the database")?;

    sqlx::migrate!()
        .run(&db)
        .await
        .context("running migrations")?;

    let auth = build_auth_gate(config)?;
    let tokens = build_token_issuer(config);

    Ok(AppState::new(db, auth, tokens))
}

pub(crate) fn build_router(state: AppState, config: &Config) -> Router {
    let api = Router::new().nest(&config.api_prefix, api::v1::routes());
    let api = middleware::auth::access::apply(api, state.clone());

    let router = Router::new()
        .route("/health", get(health))
        .merge(api)
        .with_state(state);

    // Last applied runs first.
    let router = middleware::security_headers::apply(router);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router)
}
