mod relation_tests;

use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;

use crate::db::{connect_with_config, DatabaseConfig};

pub(crate) async fn setup_memory_db() -> anyhow::Result<DatabaseConnection> {
    let db = connect_with_config(&DatabaseConfig::sqlite_memory()).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}
