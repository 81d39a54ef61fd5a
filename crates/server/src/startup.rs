use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::{init_logging_default, init_logging_json};
use configs::AppConfig;
use dotenvy::dotenv;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::intake::IntakeService;
use service::notify::NotificationDispatcher;

use crate::errors::StartupError;
use crate::routes::{self, auth};

/// `LOG_FORMAT=json` switches to one JSON object per line.
fn init_logging() {
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => init_logging_json(),
        _ => init_logging_default(),
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire the shared state from an open connection and validated config.
pub fn build_state(db: DatabaseConnection, cfg: &AppConfig) -> anyhow::Result<auth::ServerState> {
    let dispatcher = NotificationDispatcher::from_config(&cfg.notify).map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    Ok(auth::ServerState {
        db: db.clone(),
        verifier: Arc::new(auth::JwtVerifier::new(&cfg.auth.jwt_secret)),
        intake: IntakeService::new(db, dispatcher),
    })
}

/// Public entry: load config, connect and migrate the database, serve HTTP.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    if cfg.auth.is_dev_secret() {
        warn!("JWT secret not configured; using the development default");
    }
    common::env::ensure_env(&cfg.server.data_dir, &cfg.database.url).await?;

    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;
    let state = build_state(db, &cfg)?;
    let app: Router = routes::build_router(state, build_cors());

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, notify_webhook = cfg.notify.webhook_url.is_some(), "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
