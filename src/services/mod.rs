//! Service layer
//!
//! Business logic shared by the CLI and library callers.

mod page_view_service;

pub use page_view_service::{PageViewService, sort_by_views, summarize_counts};
