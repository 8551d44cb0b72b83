//! pages 表迁移
//!
//! 每个 (project_id, namespace_id, title_key) 自然键只允许一行，
//! 由唯一索引保证，写入端依赖它做 ON CONFLICT upsert。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Pages::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Pages::ProjectId).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Pages::NamespaceId)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Pages::Title).string_len(512).not_null())
                    .col(ColumnDef::new(Pages::TitleKey).string_len(512).not_null())
                    .col(
                        ColumnDef::new(Pages::LastSeenAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 自然键唯一索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_pages_natural_key")
                    .table(Pages::Table)
                    .col(Pages::ProjectId)
                    .col(Pages::NamespaceId)
                    .col(Pages::TitleKey)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_pages_natural_key").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Pages::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Pages {
    #[sea_orm(iden = "pages")]
    Table,
    Id,
    ProjectId,
    NamespaceId,
    Title,
    TitleKey,
    LastSeenAt,
}
