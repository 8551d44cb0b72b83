//! CSV 导入导出共享逻辑
//!
//! 导入文件列：`title,project,viewed_at`（viewed_at 为 RFC 3339）
//! 导出文件列：`id,project,namespace,title,count,last_seen_at`

use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::errors::PageViewError;
use crate::storage::{PageViewCount, PageViewImportRequest, Project};

/// 导入 CSV 行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvImportRow {
    pub title: String,
    pub project: String,
    pub viewed_at: String,
}

impl CsvImportRow {
    pub fn into_request(self) -> Result<PageViewImportRequest, PageViewError> {
        if self.title.trim().is_empty() {
            return Err(PageViewError::validation("Empty title"));
        }
        let project: Project = self.project.parse()?;
        let viewed_date = DateTime::parse_from_rfc3339(&self.viewed_at)?.with_timezone(&Utc);
        Ok(PageViewImportRequest::new(self.title, project, viewed_date))
    }
}

/// 浏览计数导出行（仅用于序列化）
#[derive(Debug, Clone, Serialize)]
pub struct CsvCountRow {
    pub id: String,
    pub project: String,
    pub namespace: i32,
    pub title: String,
    pub count: u64,
    pub last_seen_at: String,
}

impl From<&PageViewCount> for CsvCountRow {
    fn from(count: &PageViewCount) -> Self {
        Self {
            id: count.id(),
            project: count.page.project_id.clone(),
            namespace: count.page.namespace_id,
            title: count.page.title.clone(),
            count: count.count,
            last_seen_at: count.page.last_seen_at.to_rfc3339(),
        }
    }
}

/// 从 CSV 文件读取导入请求
///
/// 单行错误只记录警告并跳过；全部行都失败时返回错误。
pub fn read_import_csv<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<PageViewImportRequest>, PageViewError> {
    let file = File::open(path.as_ref())
        .map_err(|e| PageViewError::file_operation(format!("Failed to open file: {}", e)))?;
    let reader = BufReader::new(file);
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut requests = Vec::new();
    let mut errors = Vec::new();

    for (row_idx, result) in csv_reader.deserialize::<CsvImportRow>().enumerate() {
        let row_num = row_idx + 2; // CSV 行号（1-based，跳过 header）

        match result {
            Ok(row) => match row.into_request() {
                Ok(request) => requests.push(request),
                Err(e) => errors.push(format!("Row {}: {}", row_num, e)),
            },
            Err(e) => {
                errors.push(format!("Row {}: CSV parse error: {}", row_num, e));
            }
        }
    }

    if !errors.is_empty() && requests.is_empty() {
        return Err(PageViewError::serialization(format!(
            "Failed to import CSV:\n{}",
            errors.join("\n")
        )));
    }

    if !errors.is_empty() {
        tracing::warn!("CSV import warnings:\n{}", errors.join("\n"));
    }

    Ok(requests)
}

/// 导出浏览计数到 CSV 文件
pub fn export_counts_to_csv<P: AsRef<Path>>(
    counts: &[PageViewCount],
    path: P,
) -> Result<(), PageViewError> {
    let file = File::create(path.as_ref())
        .map_err(|e| PageViewError::file_operation(format!("Failed to create file: {}", e)))?;
    let writer = BufWriter::new(file);
    let mut csv_writer = WriterBuilder::new().from_writer(writer);

    for count in counts {
        csv_writer.serialize(CsvCountRow::from(count)).map_err(|e| {
            PageViewError::serialization(format!("Failed to write CSV row: {}", e))
        })?;
    }

    csv_writer
        .flush()
        .map_err(|e| PageViewError::file_operation(format!("Failed to flush CSV: {}", e)))?;

    Ok(())
}
