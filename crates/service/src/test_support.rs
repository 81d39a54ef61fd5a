#![cfg(test)]
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use migration::MigratorTrait;

/// Fresh in-memory SQLite database with the schema applied.
///
/// The pool is pinned to one connection: each `sqlite::memory:` connection
/// would otherwise open its own empty database.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let mut opt = ConnectOptions::new("sqlite::memory:".to_string());
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
