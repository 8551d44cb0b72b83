use std::sync::Arc;

use crate::config::StaticConfig;
use crate::errors::Result;

pub mod backend;
pub mod models;
pub mod store;

pub use backend::SeaOrmStorage;
pub use models::{
    IMPORT_NAMESPACE_ID, ImportSummary, Page, PageKey, PageViewCount, PageViewImportRequest,
    Project,
};
pub use store::PageViewStore;

pub struct StorageFactory;

impl StorageFactory {
    /// 使用全局配置创建存储
    pub async fn create() -> Result<Arc<SeaOrmStorage>> {
        let config = crate::config::get_config();
        Self::create_with(&config).await
    }

    /// 使用指定配置创建存储
    pub async fn create_with(config: &StaticConfig) -> Result<Arc<SeaOrmStorage>> {
        let storage = SeaOrmStorage::new(&config.database)
            .await?
            .with_import_batch_size(config.import.batch_size);
        Ok(Arc::new(storage))
    }
}
