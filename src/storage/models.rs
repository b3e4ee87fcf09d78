use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 短码与目标地址的映射
///
/// `code` 全局唯一且创建后不可变；`target_url` 只能通过按短码更新修改。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortLink {
    pub id: i32,
    pub code: String,
    pub target_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
