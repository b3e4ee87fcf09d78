//! Mutation operations for SeaOrmStorage
//!
//! This module contains all write database operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter,
};
use tracing::{info, warn};

use super::converters::{model_to_shortlink, new_active_model};
use super::{SeaOrmStorage, retry};
use crate::errors::{Result, SnaplinkError};
use crate::storage::ShortLink;

use migration::entities::short_link;

/// 日志里截断过长的目标地址
fn truncate_target(target: &str) -> String {
    if target.chars().count() > 50 {
        format!("{}...", target.chars().take(50).collect::<String>())
    } else {
        target.to_string()
    }
}

impl SeaOrmStorage {
    /// 插入新链接，短码冲突时返回 UniquenessViolation（不重试）
    ///
    /// 连接中断时语句可能已经提交，这类错误不重放，直接交给调用方。
    pub async fn insert_link(&self, code: &str, target_url: &str) -> Result<ShortLink> {
        let db = &self.db;
        let active_model = new_active_model(code, target_url, Utc::now());

        let result = retry::with_retry_if(
            &format!("insert({})", code),
            self.retry_config,
            retry::is_safe_to_replay,
            || {
                let active_model = active_model.clone();
                async move { active_model.insert(db).await }
            },
        )
        .await;

        match result {
            Ok(model) => {
                info!(
                    "Short link inserted: {} -> {}",
                    code,
                    truncate_target(target_url)
                );
                Ok(model_to_shortlink(model))
            }
            Err(e) => {
                let err = SnaplinkError::from(e);
                if err.is_uniqueness_violation() {
                    warn!("Short code '{}' already taken at insert time", code);
                }
                Err(err)
            }
        }
    }

    /// 替换目标地址
    pub async fn set_target(&self, code: &str, target_url: &str) -> Result<ShortLink> {
        let db = &self.db;

        let existing = retry::with_retry(&format!("find({})", code), self.retry_config, || async {
            short_link::Entity::find()
                .filter(short_link::Column::ShortCode.eq(code))
                .one(db)
                .await
        })
        .await?
        .ok_or_else(|| SnaplinkError::not_found(format!("Link '{}' not found", code)))?;

        let mut active_model = existing.into_active_model();
        active_model.target_url = Set(target_url.to_string());
        active_model.updated_at = Set(Utc::now());

        let updated = retry::with_retry(&format!("update({})", code), self.retry_config, || {
            let active_model = active_model.clone();
            async move { active_model.update(db).await }
        })
        .await
        .map_err(|e| match e {
            // 查询与更新之间被并发删除
            DbErr::RecordNotUpdated => {
                SnaplinkError::not_found(format!("Link '{}' not found", code))
            }
            other => SnaplinkError::from(other),
        })?;

        info!(
            "Short link updated: {} -> {}",
            code,
            truncate_target(target_url)
        );
        Ok(model_to_shortlink(updated))
    }

    pub async fn remove(&self, code: &str) -> Result<()> {
        let db = &self.db;

        let result = retry::with_retry(&format!("remove({})", code), self.retry_config, || async {
            short_link::Entity::delete_many()
                .filter(short_link::Column::ShortCode.eq(code))
                .exec(db)
                .await
        })
        .await
        .map_err(SnaplinkError::from)?;

        if result.rows_affected == 0 {
            return Err(SnaplinkError::not_found(format!(
                "Link '{}' not found",
                code
            )));
        }

        info!("Short link deleted: {}", code);
        Ok(())
    }
}
