use chrono::{DateTime, Utc};

use crate::storage::{Page, PageKey};
use migration::entities::page;

/// 将 Sea-ORM Model 转换为 Page
pub fn model_to_page(model: page::Model) -> Page {
    Page {
        project_id: model.project_id,
        namespace_id: model.namespace_id,
        title: model.title,
        last_seen_at: model.last_seen_at,
    }
}

/// 构建待 upsert 的 page ActiveModel
pub(super) fn page_active_model(
    key: &PageKey,
    title: String,
    last_seen_at: DateTime<Utc>,
) -> page::ActiveModel {
    use sea_orm::ActiveValue::*;

    page::ActiveModel {
        id: NotSet,
        project_id: Set(key.project_id.clone()),
        namespace_id: Set(key.namespace_id),
        title: Set(title),
        title_key: Set(key.title_key.clone()),
        last_seen_at: Set(last_seen_at),
    }
}
