//! Admin API 链接管理操作

use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use std::sync::Arc;
use tracing::{error, info, trace};

use crate::services::LinkService;

use super::helpers::{error_from_snaplink, success_response};
use super::types::{LinkResponse, MessageResponse, TargetUrlRequest};

/// 获取所有链接
pub async fn get_all_links(service: web::Data<Arc<LinkService>>) -> ActixResult<impl Responder> {
    trace!("Admin API: request to list all links");

    match service.list_links().await {
        Ok(links) => {
            let links: Vec<LinkResponse> = links.into_iter().map(LinkResponse::from).collect();
            info!("Admin API: returning {} links", links.len());
            Ok(success_response(links))
        }
        Err(e) => {
            error!("Admin API: failed to list links: {}", e);
            Ok(error_from_snaplink(&e))
        }
    }
}

/// 更新链接目标地址
pub async fn update_link(
    path: web::Path<String>,
    body: web::Json<TargetUrlRequest>,
    service: web::Data<Arc<LinkService>>,
) -> ActixResult<impl Responder> {
    let code = path.into_inner();
    trace!("Admin API: request to update link '{}'", code);

    let response: HttpResponse = match service.update_link(&code, &body.target_url).await {
        Ok(link) => success_response(LinkResponse::from(link)),
        Err(e) => {
            info!("Admin API: failed to update link '{}': {}", code, e);
            error_from_snaplink(&e)
        }
    };
    Ok(response)
}

/// 删除链接
pub async fn delete_link(
    path: web::Path<String>,
    service: web::Data<Arc<LinkService>>,
) -> ActixResult<impl Responder> {
    let code = path.into_inner();
    trace!("Admin API: request to delete link '{}'", code);

    let response: HttpResponse = match service.delete_link(&code).await {
        Ok(()) => success_response(MessageResponse::new("URL successfully deleted.")),
        Err(e) => {
            info!("Admin API: failed to delete link '{}': {}", code, e);
            error_from_snaplink(&e)
        }
    };
    Ok(response)
}
