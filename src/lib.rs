//! Pageviews - page-view recording and aggregation store
//!
//! Records encyclopedia page views, backfills historical views in bulk, and
//! reports view counts grouped by page.
//!
//! # Architecture
//! - `storage`: SeaORM backend, data models and the `PageViewStore` trait
//! - `services`: `PageViewService`, the public facade
//! - `interfaces`: command-line interface
//! - `config`: configuration loading
//! - `system`: logging setup
//! - `utils`: title normalization and CSV helpers

pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;

pub use errors::{PageViewError, Result};
pub use services::PageViewService;
pub use storage::{
    ImportSummary, Page, PageViewCount, PageViewImportRequest, PageViewStore, Project,
    SeaOrmStorage,
};
