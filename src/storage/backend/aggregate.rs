//! Aggregation queries for SeaOrmStorage
//!
//! 所有读取都在视图上下文的同一个只读事务中完成。

use std::collections::HashMap;

use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QuerySelect,
};
use tracing::warn;

use super::SeaOrmStorage;
use super::converters::model_to_page;
use crate::errors::{PageViewError, Result};
use crate::storage::PageViewCount;

use migration::entities::{page, page_view};

/// 分组计数结果行
#[derive(Debug, FromQueryResult)]
pub struct PageCountRow {
    pub page_id: i64,
    pub count: i64,
}

/// 合并分组计数与 page 行；page 缺失的分组跳过
pub(crate) fn merge_counts(
    rows: Vec<PageCountRow>,
    pages: &mut HashMap<i64, page::Model>,
) -> Vec<PageViewCount> {
    rows.into_iter()
        .filter_map(|row| match pages.remove(&row.page_id) {
            Some(model) => Some(PageViewCount {
                page: model_to_page(model),
                count: row.count.max(0) as u64,
            }),
            None => {
                warn!(
                    "Grouped count references missing page {}, skipping",
                    row.page_id
                );
                None
            }
        })
        .collect()
}

impl SeaOrmStorage {
    /// View counts grouped by page
    ///
    /// Computed over a single read snapshot; order is unspecified.
    pub async fn fetch_page_view_counts(&self) -> Result<Vec<PageViewCount>> {
        let txn = self.begin_read().await?;

        let rows: Vec<PageCountRow> = page_view::Entity::find()
            .select_only()
            .column(page_view::Column::PageId)
            .column_as(page_view::Column::Id.count(), "count")
            .group_by(page_view::Column::PageId)
            .into_model::<PageCountRow>()
            .all(&txn)
            .await
            .map_err(|e| PageViewError::from_db_err("Grouped count query failed", e))?;

        let page_ids: Vec<i64> = rows.iter().map(|r| r.page_id).collect();
        let mut pages: HashMap<i64, page::Model> = HashMap::with_capacity(page_ids.len());

        for chunk in page_ids.chunks(self.import_batch_size) {
            let models = page::Entity::find()
                .filter(page::Column::Id.is_in(chunk.iter().copied()))
                .all(&txn)
                .await
                .map_err(|e| PageViewError::from_db_err("Page lookup failed", e))?;
            pages.extend(models.into_iter().map(|m| (m.id, m)));
        }

        txn.commit()
            .await
            .map_err(|e| PageViewError::from_db_err("Failed to close read snapshot", e))?;

        Ok(merge_counts(rows, &mut pages))
    }

    /// 页面总数
    pub async fn count_pages(&self) -> Result<u64> {
        page::Entity::find()
            .count(&self.reader)
            .await
            .map_err(Into::into)
    }

    /// 浏览记录总数
    pub async fn count_page_views(&self) -> Result<u64> {
        page_view::Entity::find()
            .count(&self.reader)
            .await
            .map_err(Into::into)
    }
}
