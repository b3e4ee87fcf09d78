//! Admin API 路由配置

use actix_web::middleware::from_fn;
use actix_web::web;

use super::link_crud::{delete_link, get_all_links, update_link};
use crate::api::middleware::AdminAuth;

/// Admin 路由 `/admin`
///
/// 包含：
/// - GET/HEAD /admin/links - 获取所有链接
/// - PUT /admin/{code} - 更新链接
/// - DELETE /admin/{code} - 删除链接
pub fn admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(from_fn(AdminAuth::check))
            // /links 必须在 /{code} 之前
            .route("/links", web::get().to(get_all_links))
            .route("/links", web::head().to(get_all_links))
            .route("/{code}", web::put().to(update_link))
            .route("/{code}", web::delete().to(delete_link)),
    );
}
