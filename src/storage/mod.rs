use std::sync::Arc;

use tracing::info;

use crate::config::DatabaseConfig;
use crate::errors::Result;

pub mod backend;
pub mod memory;
pub mod models;
pub mod traits;
pub mod unavailable;

pub use backend::SeaOrmStorage;
pub use memory::MemoryStorage;
pub use models::ShortLink;
pub use traits::LinkStore;
pub use unavailable::UnavailableStorage;

pub struct StorageFactory;

impl StorageFactory {
    /// 根据 database_url 创建存储后端
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<dyn LinkStore>> {
        let database_url = &config.database_url;

        // 从 URL 自动推断数据库类型
        let backend_type = backend::infer_backend_from_url(database_url)?;

        let storage: Arc<dyn LinkStore> = if backend_type == "memory" {
            Arc::new(MemoryStorage::new())
        } else {
            Arc::new(SeaOrmStorage::new(database_url, &backend_type, config).await?)
        };

        info!("Using storage backend: {}", storage.backend_name());
        Ok(storage)
    }
}
