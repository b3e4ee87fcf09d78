//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only database operations.

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use tracing::{debug, error};

use super::converters::model_to_shortlink;
use super::{SeaOrmStorage, retry};
use crate::errors::{Result, SnaplinkError};
use crate::storage::ShortLink;

use migration::entities::short_link;

impl SeaOrmStorage {
    pub async fn get(&self, code: &str) -> Result<Option<ShortLink>> {
        let db = &self.db;

        let result = retry::with_retry(&format!("get({})", code), self.retry_config, || async {
            short_link::Entity::find()
                .filter(short_link::Column::ShortCode.eq(code))
                .one(db)
                .await
        })
        .await;

        match result {
            Ok(model) => Ok(model.map(model_to_shortlink)),
            Err(e) => {
                error!("Failed to query short link '{}' after retries: {}", code, e);
                Err(SnaplinkError::from(e))
            }
        }
    }

    pub async fn load_all(&self) -> Result<Vec<ShortLink>> {
        let db = &self.db;

        let models = retry::with_retry("load_all", self.retry_config, || async {
            short_link::Entity::find()
                .order_by_asc(short_link::Column::Id)
                .all(db)
                .await
        })
        .await
        .map_err(|e| {
            error!("Failed to load short links: {}", e);
            SnaplinkError::from(e)
        })?;

        debug!("Loaded {} short links", models.len());
        Ok(models.into_iter().map(model_to_shortlink).collect())
    }

    pub async fn count_links(&self) -> Result<u64> {
        let db = &self.db;

        retry::with_retry("count", self.retry_config, || async {
            short_link::Entity::find().count(db).await
        })
        .await
        .map_err(SnaplinkError::from)
    }
}
