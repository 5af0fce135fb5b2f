use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::config::SeedConfig;

pub mod migrator;

pub async fn open_or_create_db(config: &SeedConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.database_url.clone());
    options.sqlx_logging(false);

    debug!("connecting to database");
    Database::connect(options).await
}

pub async fn migrate_up(db: &DatabaseConnection) -> Result<(), DbErr> {
    let pending = migrator::Migrator::get_pending_migrations(db).await?.len();
    if pending > 0 {
        info!(pending, "applying migrations");
    }
    migrator::Migrator::up(db, None).await
}
