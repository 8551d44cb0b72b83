//! Page identity resolution (find-or-create by natural key)

use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, ConnectionTrait, DbBackend, EntityTrait, QueryFilter};

use super::SeaOrmStorage;
use super::converters::{model_to_page, page_active_model};
use crate::errors::{PageViewError, Result};
use crate::storage::{Page, PageKey, Project};
use crate::utils::normalize_display_title;

use migration::entities::page;

/// ON CONFLICT 目标：自然键唯一索引
pub(super) fn natural_key_conflict() -> OnConflict {
    OnConflict::columns([
        page::Column::ProjectId,
        page::Column::NamespaceId,
        page::Column::TitleKey,
    ])
}

/// 冲突时 last_seen_at 只前进不后退
///
/// 回填历史数据不会把已有 page 的 last_seen_at 拉回过去。
pub(super) fn keep_latest_last_seen(mut conflict: OnConflict, backend: DbBackend) -> OnConflict {
    let latest = match backend {
        DbBackend::Sqlite => "MAX(\"last_seen_at\", excluded.\"last_seen_at\")",
        DbBackend::Postgres => "GREATEST(\"pages\".\"last_seen_at\", EXCLUDED.\"last_seen_at\")",
        _ => "GREATEST(`last_seen_at`, VALUES(`last_seen_at`))",
    };
    conflict
        .value(page::Column::LastSeenAt, Expr::cust(latest))
        .to_owned()
}

/// 按自然键查找 page
pub(super) async fn find_page<C: ConnectionTrait>(
    conn: &C,
    key: &PageKey,
) -> std::result::Result<Option<page::Model>, sea_orm::DbErr> {
    page::Entity::find()
        .filter(page::Column::ProjectId.eq(key.project_id.as_str()))
        .filter(page::Column::NamespaceId.eq(key.namespace_id))
        .filter(page::Column::TitleKey.eq(key.title_key.as_str()))
        .one(conn)
        .await
}

/// 查找或创建 page，刷新 title，last_seen_at 取较新者
///
/// 在调用方传入的连接/事务上执行，因此属于调用方的同一工作单元。
pub(super) async fn resolve_or_create<C: ConnectionTrait>(
    conn: &C,
    project: &Project,
    namespace_id: i32,
    title: &str,
    seen_at: DateTime<Utc>,
) -> Result<page::Model> {
    let key = PageKey::new(project, namespace_id, title);
    let model = page_active_model(&key, normalize_display_title(title), seen_at);

    let conflict = natural_key_conflict()
        .update_column(page::Column::Title)
        .to_owned();

    page::Entity::insert(model)
        .on_conflict(keep_latest_last_seen(conflict, conn.get_database_backend()))
        .exec(conn)
        .await
        .map_err(|e| {
            PageViewError::from_db_err(
                format!(
                    "Failed to upsert page '{}' ({}, ns {})",
                    key.title_key, key.project_id, key.namespace_id
                ),
                e,
            )
        })?;

    find_page(conn, &key)
        .await
        .map_err(|e| {
            PageViewError::from_db_err(format!("Failed to read back page '{}'", key.title_key), e)
        })?
        .ok_or_else(|| {
            PageViewError::transaction_failure(format!(
                "Page '{}' ({}, ns {}) missing after upsert",
                key.title_key, key.project_id, key.namespace_id
            ))
        })
}

impl SeaOrmStorage {
    /// Find or create the canonical page for `(project, namespace_id, title)`
    /// in its own write transaction, refreshing its last-seen timestamp.
    pub async fn resolve_or_create_page(
        &self,
        project: &Project,
        namespace_id: i32,
        title: &str,
    ) -> Result<Page> {
        let txn = self.begin_write().await?;
        let model = resolve_or_create(&txn, project, namespace_id, title, Utc::now()).await?;
        txn.commit()
            .await
            .map_err(|e| PageViewError::from_db_err("Failed to commit page upsert", e))?;
        Ok(model_to_page(model))
    }

    /// Look a page up by natural key without creating it.
    pub async fn find_page(
        &self,
        project: &Project,
        namespace_id: i32,
        title: &str,
    ) -> Result<Option<Page>> {
        let key = PageKey::new(project, namespace_id, title);
        let model = find_page(&self.reader, &key).await?;
        Ok(model.map(model_to_page))
    }
}
