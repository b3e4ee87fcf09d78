//! Link management service
//!
//! Single entry point for HTTP handlers and the CLI. Holds the store handle
//! and the code allocator; handlers never talk to the store directly.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, trace, warn};

use super::allocator::{Allocation, CodeAllocator};
use crate::config::AllocatorConfig;
use crate::errors::{Result, SnaplinkError};
use crate::storage::{LinkStore, ShortLink};
use crate::utils::is_valid_short_code;
use crate::utils::url_validator::validate_url;

/// 健康检查中存储探测的超时时间
const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// 存储健康状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreHealth {
    pub backend: String,
    pub links_count: u64,
    pub response_time_ms: u64,
}

pub struct LinkService {
    store: Arc<dyn LinkStore>,
    allocator: CodeAllocator,
}

impl LinkService {
    pub fn new(store: Arc<dyn LinkStore>, allocator: CodeAllocator) -> Self {
        Self { store, allocator }
    }

    pub fn from_config(store: Arc<dyn LinkStore>, config: &AllocatorConfig) -> Self {
        Self::new(store, CodeAllocator::from_config(config))
    }

    pub fn store(&self) -> &Arc<dyn LinkStore> {
        &self.store
    }

    fn check_target(target_url: &str) -> Result<&str> {
        validate_url(target_url).map_err(|e| SnaplinkError::validation(e.to_string()))
    }

    /// 为目标地址分配新短码并保存
    ///
    /// 插入时短码被并发请求抢占会重新分配，最多 `max_attempts` 轮。
    pub async fn create_link(&self, target_url: &str) -> Result<ShortLink> {
        let target_url = Self::check_target(target_url)?;
        let max_rounds = self.allocator.max_attempts();

        for round in 1..=max_rounds {
            let code = match self.allocator.allocate(self.store.as_ref()).await? {
                Allocation::Allocated(code) => code,
                Allocation::Exhausted { attempts } => {
                    error!(
                        "No free short code found after {} attempts for '{}'",
                        attempts, target_url
                    );
                    return Err(SnaplinkError::allocation_exhausted(format!(
                        "Could not allocate a unique short code after {} attempts",
                        attempts
                    )));
                }
            };

            match self.store.insert(&code, target_url).await {
                Ok(link) => {
                    info!("LinkService: created link '{}' -> '{}'", link.code, link.target_url);
                    return Ok(link);
                }
                Err(e) if e.is_uniqueness_violation() => {
                    warn!(
                        "Short code '{}' was taken concurrently (round {}/{}), reallocating",
                        code, round, max_rounds
                    );
                }
                Err(e) => {
                    error!("Failed to save link '{}': {}", code, e);
                    return Err(e);
                }
            }
        }

        Err(SnaplinkError::allocation_exhausted(format!(
            "Short code insert lost {} consecutive races",
            max_rounds
        )))
    }

    /// 查找短码对应的映射
    ///
    /// 格式不合法的短码直接返回 NotFound，不访问存储。
    pub async fn resolve(&self, code: &str) -> Result<ShortLink> {
        if !is_valid_short_code(code) {
            debug!("Rejecting malformed short code '{}'", code);
            return Err(SnaplinkError::not_found(format!("Link '{}' not found", code)));
        }

        let link = self.store.find_by_code(code).await?;
        trace!("Resolved '{}' -> '{}'", code, link.target_url);
        Ok(link)
    }

    pub async fn list_links(&self) -> Result<Vec<ShortLink>> {
        self.store.list_all().await
    }

    pub async fn update_link(&self, code: &str, target_url: &str) -> Result<ShortLink> {
        let target_url = Self::check_target(target_url)?;
        if !is_valid_short_code(code) {
            return Err(SnaplinkError::not_found(format!("Link '{}' not found", code)));
        }

        let link = self.store.update_target(code, target_url).await?;
        info!("LinkService: updated link '{}' -> '{}'", code, link.target_url);
        Ok(link)
    }

    pub async fn delete_link(&self, code: &str) -> Result<()> {
        if !is_valid_short_code(code) {
            return Err(SnaplinkError::not_found(format!("Link '{}' not found", code)));
        }

        self.store.delete(code).await?;
        info!("LinkService: deleted link '{}'", code);
        Ok(())
    }

    /// 探测存储是否可用
    pub async fn health(&self) -> Result<StoreHealth> {
        let start = std::time::Instant::now();

        let links_count = tokio::time::timeout(HEALTH_CHECK_TIMEOUT, self.store.count())
            .await
            .map_err(|_| {
                SnaplinkError::store_unavailable(format!(
                    "Storage health check timed out after {}s",
                    HEALTH_CHECK_TIMEOUT.as_secs()
                ))
            })??;

        Ok(StoreHealth {
            backend: self.store.backend_name().to_string(),
            links_count,
            response_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}
