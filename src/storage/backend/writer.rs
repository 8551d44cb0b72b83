//! Write operations for SeaOrmStorage
//!
//! - `record_view_at`: page upsert + view insert in one transaction
//! - `import_views`: two-phase bulk import (pages, then views) in one
//!   transaction, skipping requests whose page cannot be found

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use tracing::{debug, info};

use super::SeaOrmStorage;
use super::converters::page_active_model;
use super::identity::{keep_latest_last_seen, natural_key_conflict, resolve_or_create};
use crate::errors::{PageViewError, Result};
use crate::storage::{
    IMPORT_NAMESPACE_ID, ImportSummary, PageKey, PageViewImportRequest, Project,
};

use migration::entities::{page, page_view};

/// 导入阶段一的去重结果：每个自然键一行
#[derive(Debug, Clone)]
pub(crate) struct PageSeed {
    pub key: PageKey,
    pub title: String,
    pub last_seen_at: DateTime<Utc>,
}

/// 按自然键去重，保留首次出现的顺序与标题，last_seen_at 取最新的 viewed_date
pub(crate) fn collect_page_seeds(requests: &[PageViewImportRequest]) -> Vec<PageSeed> {
    let mut index: HashMap<PageKey, usize> = HashMap::with_capacity(requests.len());
    let mut seeds: Vec<PageSeed> = Vec::new();

    for request in requests {
        let key = request.page_key();
        match index.get(&key) {
            Some(&i) => {
                let seed = &mut seeds[i];
                if request.viewed_date > seed.last_seen_at {
                    seed.last_seen_at = request.viewed_date;
                }
            }
            None => {
                index.insert(key.clone(), seeds.len());
                seeds.push(PageSeed {
                    key,
                    title: request.display_title(),
                    last_seen_at: request.viewed_date,
                });
            }
        }
    }

    seeds
}

/// 将导入请求映射为 page_views 行
///
/// 找不到 page 的请求被跳过并计数，不会中断整批导入。
pub(crate) fn build_page_view_rows(
    requests: &[PageViewImportRequest],
    page_ids: &HashMap<PageKey, i64>,
) -> (Vec<page_view::ActiveModel>, usize) {
    let mut skipped = 0;
    let rows = requests
        .iter()
        .filter_map(|request| {
            let key = request.page_key();
            match page_ids.get(&key) {
                Some(&page_id) => Some(page_view::ActiveModel {
                    id: NotSet,
                    page_id: Set(page_id),
                    viewed_at: Set(request.viewed_date),
                }),
                None => {
                    debug!(
                        "Page lookup miss during import: '{}' ({}), skipping view",
                        key.title_key, key.project_id
                    );
                    skipped += 1;
                    None
                }
            }
        })
        .collect();

    (rows, skipped)
}

/// 读取导入涉及的 page id，按自然键索引
async fn load_import_page_ids<C: ConnectionTrait>(
    conn: &C,
    seeds: &[PageSeed],
    batch_size: usize,
) -> std::result::Result<HashMap<PageKey, i64>, sea_orm::DbErr> {
    let wanted: HashSet<&PageKey> = seeds.iter().map(|s| &s.key).collect();
    let mut page_ids = HashMap::with_capacity(seeds.len());

    for chunk in seeds.chunks(batch_size) {
        let projects: HashSet<&str> = chunk.iter().map(|s| s.key.project_id.as_str()).collect();
        let title_keys: HashSet<&str> = chunk.iter().map(|s| s.key.title_key.as_str()).collect();

        let models = page::Entity::find()
            .filter(page::Column::NamespaceId.eq(IMPORT_NAMESPACE_ID))
            .filter(page::Column::ProjectId.is_in(projects))
            .filter(page::Column::TitleKey.is_in(title_keys))
            .all(conn)
            .await?;

        for model in models {
            let key = PageKey {
                project_id: model.project_id,
                namespace_id: model.namespace_id,
                title_key: model.title_key,
            };
            if wanted.contains(&key) {
                page_ids.insert(key, model.id);
            }
        }
    }

    Ok(page_ids)
}

impl SeaOrmStorage {
    /// Record one view of a page now.
    pub async fn record_view(
        &self,
        title: &str,
        namespace_id: i32,
        project: &Project,
    ) -> Result<()> {
        self.record_view_at(title, namespace_id, project, Utc::now())
            .await
    }

    /// Record one view at `viewed_at`.
    ///
    /// The page upsert and the view insert share one transaction: if either
    /// fails, nothing is committed.
    pub async fn record_view_at(
        &self,
        title: &str,
        namespace_id: i32,
        project: &Project,
        viewed_at: DateTime<Utc>,
    ) -> Result<()> {
        let txn = self.begin_write().await?;

        let page = resolve_or_create(&txn, project, namespace_id, title, viewed_at).await?;

        page_view::ActiveModel {
            id: NotSet,
            page_id: Set(page.id),
            viewed_at: Set(viewed_at),
        }
        .insert(&txn)
        .await
        .map_err(|e| {
            PageViewError::from_db_err(format!("Failed to insert view for page {}", page.id), e)
        })?;

        txn.commit()
            .await
            .map_err(|e| PageViewError::from_db_err("Failed to commit page view", e))?;

        debug!(
            "Page view recorded: {} (ns {}, {})",
            page.title, page.namespace_id, page.project_id
        );
        Ok(())
    }

    /// Backfill historical views.
    ///
    /// Imported pages always use namespace 0. An existing page keeps the
    /// later of its stored `last_seen_at` and the newest imported view.
    pub async fn import_views(
        &self,
        requests: &[PageViewImportRequest],
    ) -> Result<ImportSummary> {
        if requests.is_empty() {
            return Ok(ImportSummary::default());
        }

        let batch_size = self.import_batch_size;
        let seeds = collect_page_seeds(requests);

        let txn = self.begin_write().await?;
        let backend = txn.get_database_backend();

        // 阶段一：批量 upsert pages
        for chunk in seeds.chunks(batch_size) {
            let models: Vec<page::ActiveModel> = chunk
                .iter()
                .map(|seed| page_active_model(&seed.key, seed.title.clone(), seed.last_seen_at))
                .collect();

            page::Entity::insert_many(models)
                .on_conflict(keep_latest_last_seen(natural_key_conflict(), backend))
                .exec(&txn)
                .await
                .map_err(|e| PageViewError::from_db_err("Batch page upsert failed", e))?;
        }

        // 阶段二：按自然键查回 page，批量插入 page_views
        let page_ids = load_import_page_ids(&txn, &seeds, batch_size)
            .await
            .map_err(|e| PageViewError::from_db_err("Batch page lookup failed", e))?;

        let (rows, skipped) = build_page_view_rows(requests, &page_ids);
        let inserted = rows.len();

        for chunk in rows.chunks(batch_size) {
            page_view::Entity::insert_many(chunk.to_vec())
                .exec(&txn)
                .await
                .map_err(|e| PageViewError::from_db_err("Batch view insert failed", e))?;
        }

        txn.commit()
            .await
            .map_err(|e| PageViewError::from_db_err("Failed to commit import", e))?;

        info!(
            "Imported {} page views across {} pages ({} skipped)",
            inserted,
            seeds.len(),
            skipped
        );

        Ok(ImportSummary {
            pages_upserted: seeds.len(),
            views_inserted: inserted,
            views_skipped: skipped,
        })
    }
}
