//! 进程内存储
//!
//! 用于测试和 `memory://` 部署，进程退出后数据丢失。

use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::{debug, info};

use crate::errors::{Result, SnaplinkError};
use crate::storage::{LinkStore, ShortLink};

pub struct MemoryStorage {
    inner: Arc<DashMap<String, ShortLink>>,
    next_id: AtomicI32,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            next_id: AtomicI32::new(1),
        }
    }

    fn not_found(code: &str) -> SnaplinkError {
        SnaplinkError::not_found(format!("Link '{}' not found", code))
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkStore for MemoryStorage {
    async fn insert(&self, code: &str, target_url: &str) -> Result<ShortLink> {
        // entry 持有分片写锁，检查与插入是原子的
        match self.inner.entry(code.to_string()) {
            Entry::Occupied(_) => Err(SnaplinkError::uniqueness_violation(format!(
                "Short code '{}' already exists",
                code
            ))),
            Entry::Vacant(slot) => {
                let now = Utc::now();
                let link = ShortLink {
                    id: self.next_id.fetch_add(1, Ordering::Relaxed),
                    code: code.to_string(),
                    target_url: target_url.to_string(),
                    created_at: now,
                    updated_at: now,
                };
                slot.insert(link.clone());
                info!("Short link inserted: {}", code);
                Ok(link)
            }
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<ShortLink> {
        self.inner
            .get(code)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Self::not_found(code))
    }

    async fn exists(&self, code: &str) -> Result<bool> {
        Ok(self.inner.contains_key(code))
    }

    async fn list_all(&self) -> Result<Vec<ShortLink>> {
        let mut links: Vec<ShortLink> = self
            .inner
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        links.sort_by_key(|link| link.id);
        debug!("Loaded {} short links", links.len());
        Ok(links)
    }

    async fn update_target(&self, code: &str, target_url: &str) -> Result<ShortLink> {
        let mut entry = self.inner.get_mut(code).ok_or_else(|| Self::not_found(code))?;
        entry.target_url = target_url.to_string();
        entry.updated_at = Utc::now();
        info!("Short link updated: {}", code);
        Ok(entry.value().clone())
    }

    async fn delete(&self, code: &str) -> Result<()> {
        self.inner
            .remove(code)
            .map(|_| info!("Short link deleted: {}", code))
            .ok_or_else(|| Self::not_found(code))
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.inner.len() as u64)
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}
