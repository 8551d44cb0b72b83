//! 批量导入与聚合性能基准测试

use chrono::{Duration, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use pageviews::config::DatabaseConfig;
use pageviews::storage::{PageViewImportRequest, Project, SeaOrmStorage};

/// 生成导入请求：`distinct` 个页面轮流出现
fn generate_requests(rows: usize, distinct: usize) -> Vec<PageViewImportRequest> {
    let base = Utc::now();
    (0..rows)
        .map(|i| {
            PageViewImportRequest::new(
                format!("Page_{}", i % distinct),
                Project::wikipedia("en"),
                base - Duration::minutes(i as i64),
            )
        })
        .collect()
}

async fn memory_storage() -> SeaOrmStorage {
    let config = DatabaseConfig {
        database_url: "sqlite::memory:".to_string(),
        ..Default::default()
    };
    SeaOrmStorage::new(&config).await.unwrap()
}

// ============== 批量导入 ==============

fn bench_import(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("import/import_views");
    group.sample_size(20);

    for (rows, distinct) in [(100, 10), (1000, 100), (5000, 5000)] {
        let storage = rt.block_on(memory_storage());
        let requests = generate_requests(rows, distinct);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(
            BenchmarkId::new(format!("distinct_{}", distinct), rows),
            &requests,
            |b, requests| {
                b.to_async(&rt)
                    .iter(|| async { storage.import_views(requests).await.unwrap() });
            },
        );
    }
    group.finish();
}

// ============== 分组计数 ==============

fn bench_fetch_counts(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("aggregate/fetch_page_view_counts");
    group.sample_size(20);

    for pages in [100, 1000] {
        let storage = rt.block_on(async {
            let storage = memory_storage().await;
            storage
                .import_views(&generate_requests(pages * 10, pages))
                .await
                .unwrap();
            storage
        });
        group.throughput(Throughput::Elements(pages as u64));
        group.bench_function(BenchmarkId::new("pages", pages), |b| {
            b.to_async(&rt)
                .iter(|| async { storage.fetch_page_view_counts().await.unwrap() });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_import, bench_fetch_counts);
criterion_main!(benches);
