//! page_views 表迁移
//!
//! 每次浏览一行，page_id 外键指向 pages.id。

use sea_orm_migration::prelude::*;

use crate::m20261019_000001_pages::Pages;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PageViews::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PageViews::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PageViews::PageId).big_integer().not_null())
                    .col(
                        ColumnDef::new(PageViews::ViewedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_page_views_page_id")
                            .from(PageViews::Table, PageViews::PageId)
                            .to(Pages::Table, Pages::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 聚合查询按 page_id 分组
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_page_views_page_id")
                    .table(PageViews::Table)
                    .col(PageViews::PageId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_page_views_viewed_at")
                    .table(PageViews::Table)
                    .col(PageViews::ViewedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_page_views_viewed_at").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_page_views_page_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(PageViews::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PageViews {
    #[sea_orm(iden = "page_views")]
    Table,
    Id,
    PageId,
    ViewedAt,
}
