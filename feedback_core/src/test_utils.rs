use sea_orm_migration::MigratorTrait;

use crate::entity::prelude::*;
use crate::models::migrator::Migrator;

/// Create a new in-memory SQLite database with migrations already applied.
/// Each call creates a fresh, isolated database instance.
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Row counts for every seeded table, in dependency order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCounts {
    pub users: u64,
    pub pages: u64,
    pub page_members: u64,
    pub comments: u64,
    pub reactions: u64,
    pub reports: u64,
}

pub async fn table_counts(db: &DatabaseConnection) -> TableCounts {
    TableCounts {
        users: User::find().count(db).await.unwrap(),
        pages: Page::find().count(db).await.unwrap(),
        page_members: PageMember::find().count(db).await.unwrap(),
        comments: Comment::find().count(db).await.unwrap(),
        reactions: Reaction::find().count(db).await.unwrap(),
        reports: Report::find().count(db).await.unwrap(),
    }
}
