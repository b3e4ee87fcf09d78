//! Admin API 服务模块
//!
//! 该模块包含管理 API 的端点以及各服务共用的响应类型：
//! - 链接列表、更新、删除
//! - 统一错误码和错误响应体

pub mod error_code;
mod helpers;
mod link_crud;
pub mod routes;
mod types;

// 重新导出类型
pub use types::*;

// 重新导出帮助函数
pub use helpers::{error_from_snaplink, error_response, success_response};

// 重新导出错误码
pub use error_code::ErrorCode;

// 重新导出链接管理端点
pub use link_crud::{delete_link, get_all_links, update_link};

pub use routes::admin_routes;
