//! LinkService tests
//!
//! Allocation, create/resolve round trips and concurrent creation against
//! both the SQLite and in-memory stores.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use futures_util::future::join_all;
use tempfile::TempDir;

use snaplink::config::{AllocatorConfig, DatabaseConfig};
use snaplink::errors::{Result, SnaplinkError};
use snaplink::services::{CodeAllocator, CodeGenerator, LinkService};
use snaplink::storage::backend::SeaOrmStorage;
use snaplink::storage::{LinkStore, MemoryStorage, ShortLink, UnavailableStorage};
use snaplink::utils::{CODE_ALPHABET, is_valid_short_code};

// =============================================================================
// Test Setup
// =============================================================================

async fn sqlite_service() -> (Arc<LinkService>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_url = format!(
        "sqlite://{}?mode=rwc",
        temp_dir.path().join("link_service.db").display()
    );
    let storage = SeaOrmStorage::new(&db_url, "sqlite", &DatabaseConfig::default())
        .await
        .expect("Failed to create storage");

    let service = LinkService::from_config(Arc::new(storage), &AllocatorConfig::default());
    (Arc::new(service), temp_dir)
}

fn memory_service() -> Arc<LinkService> {
    Arc::new(LinkService::from_config(
        Arc::new(MemoryStorage::new()),
        &AllocatorConfig::default(),
    ))
}

/// 永远返回同一个短码
struct ConstGenerator(&'static str);

impl CodeGenerator for ConstGenerator {
    fn generate(&self) -> String {
        self.0.to_string()
    }
}

/// 模拟"检查时空闲、插入时已被抢占"：前 `lost_races` 次插入返回唯一约束冲突
struct RacyStore {
    inner: MemoryStorage,
    lost_races: AtomicU32,
    inserts: AtomicU32,
}

impl RacyStore {
    fn new(lost_races: u32) -> Self {
        Self {
            inner: MemoryStorage::new(),
            lost_races: AtomicU32::new(lost_races),
            inserts: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl LinkStore for RacyStore {
    async fn insert(&self, code: &str, target_url: &str) -> Result<ShortLink> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        let remaining = self.lost_races.load(Ordering::SeqCst);
        if remaining > 0 {
            self.lost_races.store(remaining - 1, Ordering::SeqCst);
            return Err(SnaplinkError::uniqueness_violation(format!(
                "Short code '{}' already exists",
                code
            )));
        }
        self.inner.insert(code, target_url).await
    }

    async fn find_by_code(&self, code: &str) -> Result<ShortLink> {
        self.inner.find_by_code(code).await
    }

    async fn exists(&self, code: &str) -> Result<bool> {
        self.inner.exists(code).await
    }

    async fn list_all(&self) -> Result<Vec<ShortLink>> {
        self.inner.list_all().await
    }

    async fn update_target(&self, code: &str, target_url: &str) -> Result<ShortLink> {
        self.inner.update_target(code, target_url).await
    }

    async fn delete(&self, code: &str) -> Result<()> {
        self.inner.delete(code).await
    }

    async fn count(&self) -> Result<u64> {
        self.inner.count().await
    }

    fn backend_name(&self) -> &str {
        "racy"
    }
}

// =============================================================================
// Create / resolve
// =============================================================================

#[tokio::test]
async fn test_created_code_resolves_to_submitted_url() {
    let (service, _dir) = sqlite_service().await;

    let urls = [
        "https://example.com/a",
        "http://localhost:8501/path?x=1&y=2",
        "https://例子.测试/路径",
    ];
    for url in urls {
        let link = service.create_link(url).await.unwrap();
        assert_eq!(link.code.len(), 7);
        assert!(link.code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
        assert_eq!(service.resolve(&link.code).await.unwrap().target_url, url);
    }
}

#[tokio::test]
async fn test_resolve_unknown_code() {
    let (service, _dir) = sqlite_service().await;

    assert!(service.resolve("zzzzzzz").await.unwrap_err().is_not_found());
    assert!(service.resolve("../etc").await.unwrap_err().is_not_found());
    assert!(service.resolve("").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_update_then_delete_lifecycle() {
    let (service, _dir) = sqlite_service().await;

    let link = service.create_link("https://example.com/a").await.unwrap();
    service
        .update_link(&link.code, "https://example.com/b")
        .await
        .unwrap();
    assert_eq!(
        service.resolve(&link.code).await.unwrap().target_url,
        "https://example.com/b"
    );

    service.delete_link(&link.code).await.unwrap();
    assert!(service.resolve(&link.code).await.unwrap_err().is_not_found());
    assert!(service.list_links().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_url_never_reaches_store() {
    let service = Arc::new(LinkService::from_config(
        Arc::new(UnavailableStorage::new("down")),
        &AllocatorConfig::default(),
    ));

    let err = service.create_link("not a url").await.unwrap_err();
    assert!(matches!(err, SnaplinkError::Validation(_)));
}

#[tokio::test]
async fn test_store_unavailable_surfaces() {
    let service = LinkService::from_config(
        Arc::new(UnavailableStorage::new("down")),
        &AllocatorConfig::default(),
    );

    let err = service.create_link("https://example.com").await.unwrap_err();
    assert!(matches!(err, SnaplinkError::StoreUnavailable(_)));
    let err = service.resolve("abc1234").await.unwrap_err();
    assert!(matches!(err, SnaplinkError::StoreUnavailable(_)));
    let err = service.list_links().await.unwrap_err();
    assert!(matches!(err, SnaplinkError::StoreUnavailable(_)));
}

#[tokio::test]
async fn test_overlong_code_length_still_resolves() {
    let service = LinkService::from_config(
        Arc::new(MemoryStorage::new()),
        &AllocatorConfig {
            code_length: 65,
            max_attempts: 10,
        },
    );

    let link = service.create_link("https://example.com/long").await.unwrap();
    assert!(is_valid_short_code(&link.code));
    assert_eq!(
        service.resolve(&link.code).await.unwrap().target_url,
        "https://example.com/long"
    );
}

// =============================================================================
// Allocation retries
// =============================================================================

#[tokio::test]
async fn test_lost_insert_race_is_retried() {
    let store = Arc::new(RacyStore::new(2));
    let service = LinkService::new(
        store.clone(),
        CodeAllocator::new(Arc::new(ConstGenerator("abc1234")), 5),
    );

    let link = service.create_link("https://example.com/a").await.unwrap();
    assert_eq!(link.code, "abc1234");
    assert_eq!(store.inserts.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_repeated_lost_races_exhaust() {
    let store = Arc::new(RacyStore::new(u32::MAX));
    let service = LinkService::new(
        store.clone(),
        CodeAllocator::new(Arc::new(ConstGenerator("abc1234")), 3),
    );

    let err = service
        .create_link("https://example.com/a")
        .await
        .unwrap_err();
    assert!(matches!(err, SnaplinkError::AllocationExhausted(_)));
    assert_eq!(store.inserts.load(Ordering::SeqCst), 3);
    assert_eq!(store.count().await.unwrap(), 0);
}

// =============================================================================
// Concurrency
// =============================================================================

async fn assert_concurrent_creates_unique(service: Arc<LinkService>, n: usize) {
    let results = join_all((0..n).map(|i| {
        let service = service.clone();
        async move {
            service
                .create_link(&format!("https://example.com/{}", i))
                .await
        }
    }))
    .await;

    let mut codes = HashSet::new();
    for (i, result) in results.into_iter().enumerate() {
        let link = result.expect("create_link failed");
        assert!(is_valid_short_code(&link.code));
        assert_eq!(link.target_url, format!("https://example.com/{}", i));
        assert!(codes.insert(link.code), "duplicate code allocated");
    }

    assert_eq!(service.list_links().await.unwrap().len(), n);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_get_distinct_codes_sqlite() {
    let (service, _dir) = sqlite_service().await;
    assert_concurrent_creates_unique(service, 50).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_get_distinct_codes_memory() {
    assert_concurrent_creates_unique(memory_service(), 200).await;
}

/// 一位字符表只有 57 个可用短码，强制并发冲突
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_with_tiny_code_space() {
    let service = Arc::new(LinkService::from_config(
        Arc::new(MemoryStorage::new()),
        &AllocatorConfig {
            code_length: 1,
            max_attempts: 200,
        },
    ));

    let results = join_all((0..20).map(|i| {
        let service = service.clone();
        async move {
            service
                .create_link(&format!("https://example.com/{}", i))
                .await
        }
    }))
    .await;

    let codes: HashSet<String> = results
        .into_iter()
        .map(|r| r.expect("create_link failed").code)
        .collect();
    assert_eq!(codes.len(), 20);
}
