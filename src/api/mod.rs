//! HTTP 接口
//!
//! 路由注册顺序：`/`、`/shorten`、`/health`、`/admin`，最后是 `/{code}` 跳转。

pub mod middleware;
pub mod services;

use actix_web::{HttpRequest, error, web};

use crate::errors::SnaplinkError;
use services::admin::error_from_snaplink;

/// JSON 请求体解析失败统一按 422 返回，与参数校验错误一致
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err: error::JsonPayloadError, _req: &HttpRequest| {
            let detail = format!("Invalid request body: {}", err);
            let response = error_from_snaplink(&SnaplinkError::validation(detail));
            error::InternalError::from_response(err, response).into()
        })
}

/// 注册所有路由
///
/// 依赖通过 `app_data` 注入：`Arc<LinkService>`、`AdminToken`、`PublicBaseUrl`、
/// `AppStartTime`。
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .configure(services::shorten_routes)
        .service(services::health_routes())
        .configure(services::admin_routes)
        .configure(services::redirect_routes);
}
