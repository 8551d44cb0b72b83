//! Page view service
//!
//! Public facade over a [`PageViewStore`]: record single views, backfill
//! historical views, and read aggregated counts.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::errors::{PageViewError, Result};
use crate::storage::{
    ImportSummary, PageViewCount, PageViewImportRequest, PageViewStore, Project,
};

pub struct PageViewService {
    store: Arc<dyn PageViewStore>,
}

impl PageViewService {
    /// Create a service over an injected store.
    ///
    /// Fails with `StorageUnavailable` when no store is provided.
    pub fn new(store: Option<Arc<dyn PageViewStore>>) -> Result<Self> {
        let store = store.ok_or_else(|| {
            PageViewError::storage_unavailable("No page view store was provided")
        })?;
        Ok(Self { store })
    }

    pub fn backend_name(&self) -> &str {
        self.store.backend_name()
    }

    /// Record a view of `title` in `namespace_id` of `project`, timestamped now.
    pub async fn record_view(
        &self,
        title: &str,
        namespace_id: i32,
        project: &Project,
    ) -> Result<()> {
        self.store
            .record_view_at(title, namespace_id, project, Utc::now())
            .await
    }

    /// Backfill historical views. Pages are filed under namespace 0.
    pub async fn import_views(
        &self,
        requests: &[PageViewImportRequest],
    ) -> Result<ImportSummary> {
        if requests.is_empty() {
            debug!("Empty import request, nothing to do");
            return Ok(ImportSummary::default());
        }

        let summary = self.store.import_views(requests).await?;
        info!(
            "Import finished: {} pages, {} views, {} skipped",
            summary.pages_upserted, summary.views_inserted, summary.views_skipped
        );
        Ok(summary)
    }

    /// View counts grouped by page, unordered.
    pub async fn fetch_page_view_counts(&self) -> Result<Vec<PageViewCount>> {
        self.store.fetch_page_view_counts().await
    }

    /// Most viewed pages, highest count first; ties ordered by title.
    pub async fn top_pages(&self, limit: usize) -> Result<Vec<PageViewCount>> {
        let mut counts = self.store.fetch_page_view_counts().await?;
        sort_by_views(&mut counts);
        counts.truncate(limit);
        Ok(counts)
    }

    /// `(pages, views)` totals
    pub async fn totals(&self) -> Result<(u64, u64)> {
        let pages = self.store.count_pages().await?;
        let views = self.store.count_page_views().await?;
        Ok((pages, views))
    }
}

/// Sort counts descending, then by title, project and namespace
pub fn sort_by_views(counts: &mut [PageViewCount]) {
    counts.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.page.title.cmp(&b.page.title))
            .then_with(|| a.page.project_id.cmp(&b.page.project_id))
            .then_with(|| a.page.namespace_id.cmp(&b.page.namespace_id))
    });
}

/// `(pages, views)` totals of one counts snapshot
pub fn summarize_counts(counts: &[PageViewCount]) -> (u64, u64) {
    let views = counts.iter().map(|c| c.count).sum();
    (counts.len() as u64, views)
}
