#![cfg(test)]
use std::path::{Path, PathBuf};

use migration::{Migrator, MigratorTrait};
use models::db::{connect_with_config, DatabaseConfig};
use sea_orm::DatabaseConnection;

use crate::seed::{InitSchoolDb, SchoolSeed};

/// Fresh in-memory store, migrated but empty.
///
/// The pool holds a single connection so every query sees the same SQLite memory database.
pub async fn get_empty_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_with_config(&DatabaseConfig::sqlite_memory()).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

/// Fresh in-memory store loaded with the fixture school.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = get_empty_db().await?;
    InitSchoolDb::new(db.clone()).init_db(&SchoolSeed::fixture()).await?;
    Ok(db)
}

/// Migrated SQLite file store behind a multi-connection pool, for tests that race writers.
pub async fn get_file_db(name: &str) -> Result<(DatabaseConnection, PathBuf), anyhow::Error> {
    let path = std::env::temp_dir().join(format!("school-{}-{}.db", name, std::process::id()));
    remove_file_db(&path);
    let cfg = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", path.display()),
        max_connections: 4,
        min_connections: 1,
        ..DatabaseConfig::default()
    };
    let db = connect_with_config(&cfg).await?;
    Migrator::up(&db, None).await?;
    Ok((db, path))
}

/// Remove a file store and its journal files; missing files are fine.
pub fn remove_file_db(path: &Path) {
    for suffix in ["", "-wal", "-shm", "-journal"] {
        let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
    }
}
