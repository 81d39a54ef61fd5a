//! Entity-level tests: field validators plus a round trip through an
//! in-memory SQLite database migrated with the real migrator.

mod crud_tests;

use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

pub(crate) async fn memory_db() -> anyhow::Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new("sqlite::memory:".to_string());
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
