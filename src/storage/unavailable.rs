//! 降级存储
//!
//! 启动时连不上数据库且 `fail_fast = false` 时使用。服务照常监听，
//! 所有存储操作都返回 `StoreUnavailable`，由 HTTP 层映射为 503。

use async_trait::async_trait;

use crate::errors::{Result, SnaplinkError};
use crate::storage::{LinkStore, ShortLink};

pub struct UnavailableStorage {
    reason: String,
}

impl UnavailableStorage {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    fn err(&self) -> SnaplinkError {
        SnaplinkError::store_unavailable(format!("Storage unavailable: {}", self.reason))
    }
}

#[async_trait]
impl LinkStore for UnavailableStorage {
    async fn insert(&self, _code: &str, _target_url: &str) -> Result<ShortLink> {
        Err(self.err())
    }

    async fn find_by_code(&self, _code: &str) -> Result<ShortLink> {
        Err(self.err())
    }

    async fn exists(&self, _code: &str) -> Result<bool> {
        Err(self.err())
    }

    async fn list_all(&self) -> Result<Vec<ShortLink>> {
        Err(self.err())
    }

    async fn update_target(&self, _code: &str, _target_url: &str) -> Result<ShortLink> {
        Err(self.err())
    }

    async fn delete(&self, _code: &str) -> Result<()> {
        Err(self.err())
    }

    async fn count(&self) -> Result<u64> {
        Err(self.err())
    }

    fn backend_name(&self) -> &str {
        "unavailable"
    }
}
