//! SeaORM storage backend
//!
//! This module provides database storage using SeaORM,
//! supporting SQLite, MySQL/MariaDB, and PostgreSQL.

mod connection;
mod converters;
mod mutations;
mod query;
pub mod retry;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::errors::{Result, SnaplinkError};
use crate::storage::{LinkStore, ShortLink};

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{model_to_shortlink, new_active_model};

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("memory://") {
        Ok("memory".to_string())
    } else if database_url.starts_with("sqlite://")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(SnaplinkError::database_config(format!(
            "Cannot infer database type from URL: {}. Supported: sqlite://, mysql://, mariadb://, postgres://, memory://",
            database_url
        )))
    }
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
    retry_config: retry::RetryConfig,
}

impl SeaOrmStorage {
    pub async fn new(database_url: &str, backend_name: &str, config: &DatabaseConfig) -> Result<Self> {
        if database_url.is_empty() {
            return Err(SnaplinkError::database_config("DATABASE_URL is not set"));
        }

        let retry_config = retry::RetryConfig::from(config);

        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, backend_name, config).await?
        };

        let storage = SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
            retry_config,
        };

        run_migrations(&storage.db).await?;

        info!(
            "{} storage initialized",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }
}

#[async_trait]
impl LinkStore for SeaOrmStorage {
    async fn insert(&self, code: &str, target_url: &str) -> Result<ShortLink> {
        self.insert_link(code, target_url).await
    }

    async fn find_by_code(&self, code: &str) -> Result<ShortLink> {
        self.get(code)
            .await?
            .ok_or_else(|| SnaplinkError::not_found(format!("Link '{}' not found", code)))
    }

    async fn exists(&self, code: &str) -> Result<bool> {
        Ok(self.get(code).await?.is_some())
    }

    async fn list_all(&self) -> Result<Vec<ShortLink>> {
        self.load_all().await
    }

    async fn update_target(&self, code: &str, target_url: &str) -> Result<ShortLink> {
        self.set_target(code, target_url).await
    }

    async fn delete(&self, code: &str) -> Result<()> {
        self.remove(code).await
    }

    async fn count(&self) -> Result<u64> {
        self.count_links().await
    }

    fn backend_name(&self) -> &str {
        &self.backend_name
    }
}
