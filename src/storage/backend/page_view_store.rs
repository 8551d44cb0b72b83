//! PageViewStore implementation for SeaOrmStorage

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::SeaOrmStorage;
use crate::errors::Result;
use crate::storage::{
    ImportSummary, PageViewCount, PageViewImportRequest, PageViewStore, Project,
};

#[async_trait]
impl PageViewStore for SeaOrmStorage {
    fn backend_name(&self) -> &str {
        &self.backend_name
    }

    async fn record_view_at(
        &self,
        title: &str,
        namespace_id: i32,
        project: &Project,
        viewed_at: DateTime<Utc>,
    ) -> Result<()> {
        SeaOrmStorage::record_view_at(self, title, namespace_id, project, viewed_at).await
    }

    async fn import_views(&self, requests: &[PageViewImportRequest]) -> Result<ImportSummary> {
        SeaOrmStorage::import_views(self, requests).await
    }

    async fn fetch_page_view_counts(&self) -> Result<Vec<PageViewCount>> {
        SeaOrmStorage::fetch_page_view_counts(self).await
    }

    async fn count_pages(&self) -> Result<u64> {
        SeaOrmStorage::count_pages(self).await
    }

    async fn count_page_views(&self) -> Result<u64> {
        SeaOrmStorage::count_page_views(self).await
    }
}
