//! Storage seam consumed by the service layer

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::Result;
use crate::storage::{ImportSummary, PageViewCount, PageViewImportRequest, Project};

/// Transactional page-view store
///
/// Writes go through a single serialized writer context; reads run in their
/// own snapshot and never see a half-applied write.
#[async_trait]
pub trait PageViewStore: Send + Sync {
    /// Name of the underlying database backend (`sqlite`, `mysql`, `postgres`)
    fn backend_name(&self) -> &str;

    /// Resolve the page and append one view in a single transaction.
    async fn record_view_at(
        &self,
        title: &str,
        namespace_id: i32,
        project: &Project,
        viewed_at: DateTime<Utc>,
    ) -> Result<()>;

    /// Upsert pages for all requests, then insert one view per request.
    /// Requests whose page cannot be found are skipped.
    async fn import_views(&self, requests: &[PageViewImportRequest]) -> Result<ImportSummary>;

    /// View counts grouped by page, in no particular order.
    async fn fetch_page_view_counts(&self) -> Result<Vec<PageViewCount>>;

    async fn count_pages(&self) -> Result<u64>;

    async fn count_page_views(&self) -> Result<u64>;
}
