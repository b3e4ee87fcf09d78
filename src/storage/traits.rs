use async_trait::async_trait;

use crate::errors::Result;
use crate::storage::ShortLink;

/// 映射存储接口
///
/// 所有操作都是单条记录、相互独立的。`code` 的唯一性由实现保证：
/// 并发插入同一个 code 时，只有一个成功，其余返回 `UniquenessViolation`。
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// 插入新映射；code 已存在时返回 `UniquenessViolation`
    async fn insert(&self, code: &str, target_url: &str) -> Result<ShortLink>;

    /// 按短码查询；不存在时返回 `NotFound`
    async fn find_by_code(&self, code: &str) -> Result<ShortLink>;

    async fn exists(&self, code: &str) -> Result<bool>;

    /// 返回全部映射，调用方不应依赖顺序
    async fn list_all(&self) -> Result<Vec<ShortLink>>;

    /// 替换目标地址；不存在时返回 `NotFound`
    async fn update_target(&self, code: &str, target_url: &str) -> Result<ShortLink>;

    /// 删除映射；不存在时返回 `NotFound`
    async fn delete(&self, code: &str) -> Result<()>;

    async fn count(&self) -> Result<u64>;

    fn backend_name(&self) -> &str;
}
