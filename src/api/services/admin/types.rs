//! API 请求/响应类型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::ShortLink;

/// 错误响应体
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ErrorBody {
    pub code: i32,
    pub detail: String,
}

/// POST /shorten 与 PUT /admin/{code} 的请求体
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TargetUrlRequest {
    pub target_url: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ShortenResponse {
    pub short_url: String,
    pub target_url: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LinkResponse {
    pub id: i32,
    pub code: String,
    pub target_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ShortLink> for LinkResponse {
    fn from(link: ShortLink) -> Self {
        Self {
            id: link.id,
            code: link.code,
            target_url: link.target_url,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthStorageCheck {
    pub status: String,
    pub backend: String,
    pub links_count: Option<u64>,
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime: u64,
    pub storage: HealthStorageCheck,
    pub response_time_ms: u64,
}
