use sea_orm_migration::{prelude::*, schema::*};

use super::m20261016_000001_create_users_table::User;
use super::m20261016_000002_create_pages_table::Page;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PageMember::Table)
                    .if_not_exists()
                    .col(string(PageMember::PageId))
                    .col(string(PageMember::UserId))
                    .col(string(PageMember::Role))
                    .col(timestamp_with_time_zone(PageMember::CreatedAt))
                    .index(
                        Index::create()
                            .primary()
                            .col(PageMember::PageId)
                            .col(PageMember::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-page-member-page_id")
                            .from(PageMember::Table, PageMember::PageId)
                            .to(Page::Table, Page::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-page-member-user_id")
                            .from(PageMember::Table, PageMember::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create index on user_id
        manager
            .create_index(
                Index::create()
                    .name("idx_page_members_user_id")
                    .table(PageMember::Table)
                    .col(PageMember::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PageMember::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PageMember {
    Table,
    PageId,
    UserId,
    Role,
    CreatedAt,
}
