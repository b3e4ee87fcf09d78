use actix_web::http::StatusCode;
use actix_web::http::header::{CACHE_CONTROL, LOCATION};
use actix_web::{HttpResponse, Responder, web};
use std::sync::Arc;
use tracing::{debug, error, trace};

use crate::errors::SnaplinkError;
use crate::services::LinkService;

use super::admin::error_from_snaplink;

pub struct RedirectService {}

impl RedirectService {
    pub async fn handle_redirect(
        path: web::Path<String>,
        service: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        let code = path.into_inner();

        match service.resolve(&code).await {
            Ok(link) => {
                trace!("Redirecting '{}' -> '{}'", code, link.target_url);
                Self::finish_redirect(&link.target_url)
            }
            Err(SnaplinkError::NotFound(_)) => {
                debug!("Redirect link not found: {}", code);
                Self::not_found_response(&code)
            }
            Err(e) => {
                error!("Storage error during redirect lookup for '{}': {}", code, e);
                error_from_snaplink(&e)
            }
        }
    }

    #[inline]
    fn finish_redirect(target_url: &str) -> HttpResponse {
        HttpResponse::build(StatusCode::TEMPORARY_REDIRECT)
            .insert_header((LOCATION, target_url))
            .insert_header((CACHE_CONTROL, "no-cache, no-store, must-revalidate"))
            .finish()
    }

    #[inline]
    fn not_found_response(code: &str) -> HttpResponse {
        error_from_snaplink(&SnaplinkError::not_found(format!(
            "Short code '{}' not found",
            code
        )))
    }
}

/// Redirect 路由配置，必须最后注册
pub fn redirect_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{code}", web::get().to(RedirectService::handle_redirect))
        .route("/{code}", web::head().to(RedirectService::handle_redirect));
}
