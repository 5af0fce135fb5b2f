use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20261016_000002_create_pages_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Page::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Page::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Page::Slug).string().not_null())
                    .col(ColumnDef::new(Page::Title).string().not_null())
                    .col(ColumnDef::new(Page::Description).string().not_null())
                    .col(
                        ColumnDef::new(Page::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create unique index on slug
        manager
            .create_index(
                Index::create()
                    .name("idx_pages_slug_unique")
                    .table(Page::Table)
                    .col(Page::Slug)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Page::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Page {
    Table,
    Id,
    Slug,
    Title,
    Description,
    CreatedAt,
}
