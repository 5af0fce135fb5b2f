use sea_orm_migration::prelude::*;

mod m20261016_000001_create_users_table;
mod m20261016_000002_create_pages_table;
mod m20261016_000003_create_page_members_table;
mod m20261016_000004_create_comments_table;
mod m20261016_000005_create_reactions_table;
mod m20261016_000006_create_reports_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261016_000001_create_users_table::Migration),
            Box::new(m20261016_000002_create_pages_table::Migration),
            Box::new(m20261016_000003_create_page_members_table::Migration),
            Box::new(m20261016_000004_create_comments_table::Migration),
            Box::new(m20261016_000005_create_reactions_table::Migration),
            Box::new(m20261016_000006_create_reports_table::Migration),
        ]
    }
}

#[cfg(test)]
use sea_orm::{Database, DbErr};

#[tokio::test]
async fn test_migrations_okay() -> Result<(), DbErr> {
    let db = Database::connect("sqlite::memory:").await?;
    let schema_manager = SchemaManager::new(&db);

    Migrator::refresh(&db).await?;

    assert!(schema_manager.has_table("user").await?);
    assert!(schema_manager.has_table("page").await?);
    assert!(schema_manager.has_table("page_member").await?);
    assert!(schema_manager.has_table("comment").await?);
    assert!(schema_manager.has_table("reaction").await?);
    assert!(schema_manager.has_table("report").await?);

    Ok(())
}

#[tokio::test]
async fn test_migrations_roll_back_cleanly() -> Result<(), DbErr> {
    let db = Database::connect("sqlite::memory:").await?;
    let schema_manager = SchemaManager::new(&db);

    Migrator::up(&db, None).await?;
    Migrator::down(&db, None).await?;

    assert!(!schema_manager.has_table("report").await?);
    assert!(!schema_manager.has_table("user").await?);

    Ok(())
}
