use sea_orm_migration::{prelude::*, schema::*};

use super::m20261016_000001_create_users_table::User;
use super::m20261016_000002_create_pages_table::Page;
use super::m20261016_000004_create_comments_table::Comment;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Report::Table)
                    .if_not_exists()
                    .col(string(Report::Id).primary_key())
                    .col(string(Report::CommentId))
                    .col(string(Report::PageId))
                    .col(string(Report::ReportedById))
                    .col(string(Report::Reason))
                    .col(timestamp_with_time_zone(Report::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-report-comment_id")
                            .from(Report::Table, Report::CommentId)
                            .to(Comment::Table, Comment::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-report-page_id")
                            .from(Report::Table, Report::PageId)
                            .to(Page::Table, Page::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-report-reported_by_id")
                            .from(Report::Table, Report::ReportedById)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Moderation views list reports per page
        manager
            .create_index(
                Index::create()
                    .name("idx_reports_page_id")
                    .table(Report::Table)
                    .col(Report::PageId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Report::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Report {
    Table,
    Id,
    CommentId,
    PageId,
    ReportedById,
    Reason,
    CreatedAt,
}
