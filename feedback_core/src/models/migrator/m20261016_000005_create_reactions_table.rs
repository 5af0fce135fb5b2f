use sea_orm_migration::{prelude::*, schema::*};

use super::m20261016_000001_create_users_table::User;
use super::m20261016_000004_create_comments_table::Comment;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reaction::Table)
                    .if_not_exists()
                    .col(string(Reaction::Id).primary_key())
                    .col(string(Reaction::CommentId))
                    .col(string(Reaction::UserId))
                    .col(string(Reaction::Emoji))
                    .col(timestamp_with_time_zone(Reaction::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-reaction-comment_id")
                            .from(Reaction::Table, Reaction::CommentId)
                            .to(Comment::Table, Comment::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-reaction-user_id")
                            .from(Reaction::Table, Reaction::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reactions_comment_id")
                    .table(Reaction::Table)
                    .col(Reaction::CommentId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reaction::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Reaction {
    Table,
    Id,
    CommentId,
    UserId,
    Emoji,
    CreatedAt,
}
