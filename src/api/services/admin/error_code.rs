//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::SnaplinkError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字。按千位分域：
/// - 1000-1099: 通用错误
/// - 3000-3099: 链接错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    // 通用错误 1000-1099
    Unauthorized = 1001,
    InternalServerError = 1005,
    ServiceUnavailable = 1030,

    // 链接错误 3000-3099
    LinkNotFound = 3000,
    LinkAlreadyExists = 3001,
    LinkInvalidUrl = 3002,
    LinkDatabaseError = 3005,
    LinkAllocationExhausted = 3007,
}

impl From<&SnaplinkError> for ErrorCode {
    fn from(err: &SnaplinkError) -> Self {
        match err {
            SnaplinkError::StoreUnavailable(_) => ErrorCode::ServiceUnavailable,
            SnaplinkError::NotFound(_) => ErrorCode::LinkNotFound,
            SnaplinkError::UniquenessViolation(_) => ErrorCode::LinkAlreadyExists,
            SnaplinkError::Validation(_) => ErrorCode::LinkInvalidUrl,
            SnaplinkError::AllocationExhausted(_) => ErrorCode::LinkAllocationExhausted,
            SnaplinkError::DatabaseConfig(_) | SnaplinkError::DatabaseOperation(_) => {
                ErrorCode::LinkDatabaseError
            }
            SnaplinkError::FileOperation(_)
            | SnaplinkError::Serialization(_)
            | SnaplinkError::Configuration(_) => ErrorCode::InternalServerError,
        }
    }
}
