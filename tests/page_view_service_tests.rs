//! PageViewService tests
//!
//! Covers store injection, error propagation and the sorted read helpers,
//! against both an in-process mock store and a real SQLite store.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pageviews::config::DatabaseConfig;
use pageviews::errors::{PageViewError, Result};
use pageviews::services::{PageViewService, sort_by_views, summarize_counts};
use pageviews::storage::{
    ImportSummary, Page, PageViewCount, PageViewImportRequest, PageViewStore, Project,
    SeaOrmStorage,
};
use tempfile::TempDir;

// =============================================================================
// Mock store
// =============================================================================

/// 记录调用并返回预设结果的存储
#[derive(Default)]
struct MockStore {
    fail_with: Option<PageViewError>,
    counts: Vec<PageViewCount>,
    recorded: Mutex<Vec<(String, i32, String)>>,
    import_calls: Mutex<usize>,
}

impl MockStore {
    fn failing(err: PageViewError) -> Self {
        Self {
            fail_with: Some(err),
            ..Default::default()
        }
    }

    fn with_counts(counts: Vec<PageViewCount>) -> Self {
        Self {
            counts,
            ..Default::default()
        }
    }

    fn check(&self) -> Result<()> {
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PageViewStore for MockStore {
    fn backend_name(&self) -> &str {
        "mock"
    }

    async fn record_view_at(
        &self,
        title: &str,
        namespace_id: i32,
        project: &Project,
        _viewed_at: DateTime<Utc>,
    ) -> Result<()> {
        self.check()?;
        self.recorded
            .lock()
            .unwrap()
            .push((title.to_string(), namespace_id, project.identifier()));
        Ok(())
    }

    async fn import_views(&self, requests: &[PageViewImportRequest]) -> Result<ImportSummary> {
        self.check()?;
        *self.import_calls.lock().unwrap() += 1;
        Ok(ImportSummary {
            pages_upserted: 1,
            views_inserted: requests.len(),
            views_skipped: 0,
        })
    }

    async fn fetch_page_view_counts(&self) -> Result<Vec<PageViewCount>> {
        self.check()?;
        Ok(self.counts.clone())
    }

    async fn count_pages(&self) -> Result<u64> {
        self.check()?;
        Ok(self.counts.len() as u64)
    }

    async fn count_page_views(&self) -> Result<u64> {
        self.check()?;
        Ok(self.counts.iter().map(|c| c.count).sum())
    }
}

fn count(title: &str, n: u64) -> PageViewCount {
    PageViewCount {
        page: Page {
            project_id: "wikipedia~en".to_string(),
            namespace_id: 0,
            title: title.to_string(),
            last_seen_at: Utc::now(),
        },
        count: n,
    }
}

fn service_over(store: MockStore) -> (PageViewService, Arc<MockStore>) {
    let store = Arc::new(store);
    let service = PageViewService::new(Some(store.clone() as Arc<dyn PageViewStore>)).unwrap();
    (service, store)
}

// =============================================================================
// 构造
// =============================================================================

#[cfg(test)]
mod construction_tests {
    use super::*;

    #[test]
    fn test_missing_store_is_storage_unavailable() {
        let err = PageViewService::new(None).err().unwrap();
        assert!(matches!(err, PageViewError::StorageUnavailable(_)));
        assert_eq!(err.code(), "E001");
    }

    #[test]
    fn test_backend_name_passthrough() {
        let (service, _) = service_over(MockStore::default());
        assert_eq!(service.backend_name(), "mock");
    }
}

// =============================================================================
// 写入与错误传播
// =============================================================================

#[cfg(test)]
mod write_tests {
    use super::*;

    #[tokio::test]
    async fn test_record_view_reaches_store() {
        let (service, store) = service_over(MockStore::default());

        service
            .record_view("Cat", 2, &Project::wikipedia("en"))
            .await
            .unwrap();

        let recorded = store.recorded.lock().unwrap();
        assert_eq!(
            recorded.as_slice(),
            &[("Cat".to_string(), 2, "wikipedia~en".to_string())]
        );
    }

    #[tokio::test]
    async fn test_record_view_propagates_transaction_failure() {
        let (service, _) = service_over(MockStore::failing(
            PageViewError::transaction_failure("disk I/O error"),
        ));

        let err = service
            .record_view("Cat", 0, &Project::Commons)
            .await
            .unwrap_err();

        assert!(matches!(err, PageViewError::TransactionFailure(_)));
        assert!(err.message().contains("disk I/O error"));
    }

    #[tokio::test]
    async fn test_empty_import_skips_store() {
        let (service, store) = service_over(MockStore::default());

        let summary = service.import_views(&[]).await.unwrap();

        assert_eq!(summary, ImportSummary::default());
        assert_eq!(*store.import_calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_import_propagates_storage_unavailable() {
        let (service, _) = service_over(MockStore::failing(
            PageViewError::storage_unavailable("pool closed"),
        ));
        let requests = vec![PageViewImportRequest::new(
            "Dog",
            Project::wikipedia("en"),
            Utc::now(),
        )];

        let err = service.import_views(&requests).await.unwrap_err();
        assert_eq!(err.code(), "E001");
    }
}

// =============================================================================
// 读取
// =============================================================================

#[cfg(test)]
mod read_tests {
    use super::*;

    #[tokio::test]
    async fn test_top_pages_orders_by_count_then_title() {
        let (service, _) = service_over(MockStore::with_counts(vec![
            count("Dog", 2),
            count("Bird", 5),
            count("Cat", 2),
            count("Ant", 1),
        ]));

        let top = service.top_pages(3).await.unwrap();
        let titles: Vec<&str> = top.iter().map(|c| c.page.title.as_str()).collect();

        assert_eq!(titles, vec!["Bird", "Cat", "Dog"]);
    }

    #[tokio::test]
    async fn test_top_pages_limit_larger_than_data() {
        let (service, _) = service_over(MockStore::with_counts(vec![count("Cat", 1)]));
        assert_eq!(service.top_pages(10).await.unwrap().len(), 1);
        assert!(service.top_pages(0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_totals() {
        let (service, _) = service_over(MockStore::with_counts(vec![
            count("Cat", 3),
            count("Dog", 4),
        ]));

        assert_eq!(service.totals().await.unwrap(), (2, 7));
    }

    #[tokio::test]
    async fn test_read_failure_propagates() {
        let (service, _) = service_over(MockStore::failing(
            PageViewError::transaction_failure("snapshot aborted"),
        ));

        assert!(service.fetch_page_view_counts().await.is_err());
        assert!(service.top_pages(5).await.is_err());
        assert!(service.totals().await.is_err());
    }

    #[test]
    fn test_summarize_counts_matches_listed_rows() {
        let counts = vec![count("Cat", 3), count("Dog", 4), count("Bird", 1)];
        assert_eq!(summarize_counts(&counts), (3, 8));
        assert_eq!(summarize_counts(&[]), (0, 0));
    }

    #[test]
    fn test_sort_by_views_tie_breaks_on_namespace() {
        let mut a = count("Cat", 1);
        a.page.namespace_id = 4;
        let b = count("Cat", 1);
        let mut counts = vec![a, b];

        sort_by_views(&mut counts);

        assert_eq!(counts[0].page.namespace_id, 0);
        assert_eq!(counts[1].page.namespace_id, 4);
    }
}

// =============================================================================
// 端到端（SQLite）
// =============================================================================

#[cfg(test)]
mod sqlite_tests {
    use super::*;

    async fn sqlite_service() -> (PageViewService, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = DatabaseConfig {
            database_url: format!(
                "sqlite://{}?mode=rwc",
                temp_dir.path().join("service.db").display()
            ),
            ..Default::default()
        };
        let storage = SeaOrmStorage::new(&config)
            .await
            .expect("Failed to create storage");
        let store: Arc<dyn PageViewStore> = Arc::new(storage);
        let service = PageViewService::new(Some(store)).unwrap();
        (service, temp_dir)
    }

    #[tokio::test]
    async fn test_record_then_top_pages() {
        let (service, _dir) = sqlite_service().await;
        let en = Project::wikipedia("en");

        for _ in 0..3 {
            service.record_view("Cat", 0, &en).await.unwrap();
        }
        service.record_view("Dog", 0, &en).await.unwrap();

        let top = service.top_pages(1).await.unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].page.title, "Cat");
        assert_eq!(top[0].count, 3);
        assert_eq!(service.totals().await.unwrap(), (2, 4));
    }

    #[tokio::test]
    async fn test_import_then_counts() {
        let (service, _dir) = sqlite_service().await;
        let en = Project::wikipedia("en");
        let now = Utc::now();

        let summary = service
            .import_views(&[
                PageViewImportRequest::new("Dog", en.clone(), now),
                PageViewImportRequest::new("Dog", en.clone(), now),
                PageViewImportRequest::new("Cat", en.clone(), now),
            ])
            .await
            .unwrap();

        assert_eq!(summary.pages_upserted, 2);
        assert_eq!(summary.views_inserted, 3);

        let mut counts = service.fetch_page_view_counts().await.unwrap();
        sort_by_views(&mut counts);
        assert_eq!(counts[0].page.title, "Dog");
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[1].page.title, "Cat");
        assert_eq!(counts[1].count, 1);
    }
}
