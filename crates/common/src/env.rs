//! Environment/runtime helpers
//!
//! Sanity checks run once at startup, before the database is opened.

use tracing::{info, warn};

/// Ensure the data directory exists (used by file-backed SQLite URLs) and
/// warn when the database URL looks unset.
pub async fn ensure_env(data_dir: &str, database_url: &str) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;
    if database_url.trim().is_empty() {
        warn!("database url is empty; connection will fail");
    } else if database_url.starts_with("sqlite:") {
        info!(%data_dir, "using sqlite backing store");
    }
    Ok(())
}
