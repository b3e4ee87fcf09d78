use chrono::{DateTime, Utc};

use crate::storage::ShortLink;
use migration::entities::short_link;

/// 将 Sea-ORM Model 转换为 ShortLink
pub fn model_to_shortlink(model: short_link::Model) -> ShortLink {
    ShortLink {
        id: model.id,
        code: model.short_code,
        target_url: model.target_url,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// 构造待插入的 ActiveModel，id 交给数据库分配
pub fn new_active_model(code: &str, target_url: &str, now: DateTime<Utc>) -> short_link::ActiveModel {
    use sea_orm::ActiveValue::*;

    short_link::ActiveModel {
        id: NotSet,
        short_code: Set(code.to_string()),
        target_url: Set(target_url.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    }
}
