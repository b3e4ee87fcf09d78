//! 短链创建与根路径

use actix_web::{HttpRequest, HttpResponse, Responder, web};
use std::sync::Arc;
use tracing::{error, info, trace};

use crate::services::LinkService;

use super::admin::{
    MessageResponse, ShortenResponse, TargetUrlRequest, error_from_snaplink, success_response,
};

/// 对外公开的基础地址，未配置时从请求推导
#[derive(Clone, Debug, Default)]
pub struct PublicBaseUrl(pub Option<String>);

impl PublicBaseUrl {
    pub fn new(base: Option<String>) -> Self {
        Self(base.filter(|b| !b.trim().is_empty()))
    }

    /// 拼接完整短链地址
    pub fn short_url(&self, req: &HttpRequest, code: &str) -> String {
        match &self.0 {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), code),
            None => {
                let conn = req.connection_info();
                format!("{}://{}/{}", conn.scheme(), conn.host(), code)
            }
        }
    }
}

pub struct ShortenService;

impl ShortenService {
    pub async fn shorten(
        req: HttpRequest,
        body: web::Json<TargetUrlRequest>,
        service: web::Data<Arc<LinkService>>,
        base_url: Option<web::Data<PublicBaseUrl>>,
    ) -> impl Responder {
        trace!("Received shorten request for '{}'", body.target_url);

        match service.create_link(&body.target_url).await {
            Ok(link) => {
                let short_url = base_url
                    .map(|b| b.get_ref().clone())
                    .unwrap_or_default()
                    .short_url(&req, &link.code);
                info!("Shortened '{}' as {}", link.target_url, short_url);
                success_response(ShortenResponse {
                    short_url,
                    target_url: link.target_url,
                })
            }
            Err(e) => {
                error!("Failed to shorten '{}': {}", body.target_url, e);
                error_from_snaplink(&e)
            }
        }
    }

    /// 根路径：存储可用时返回欢迎信息，否则 503
    pub async fn root(service: web::Data<Arc<LinkService>>) -> HttpResponse {
        match service.health().await {
            Ok(_) => success_response(MessageResponse::new(
                "Welcome! URL Shortener API is running.",
            )),
            Err(e) => error_from_snaplink(&e),
        }
    }
}

pub fn shorten_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(ShortenService::root))
        .route("/shorten", web::post().to(ShortenService::shorten));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_short_url_from_configured_base() {
        let req = TestRequest::default().to_http_request();
        let base = PublicBaseUrl::new(Some("https://sl.example/".to_string()));
        assert_eq!(base.short_url(&req, "abc1234"), "https://sl.example/abc1234");
    }

    #[test]
    fn test_short_url_from_request_host() {
        let req = TestRequest::default()
            .insert_header(("Host", "links.local:8000"))
            .to_http_request();
        let base = PublicBaseUrl::new(Some("  ".to_string()));
        assert_eq!(base.short_url(&req, "abc1234"), "http://links.local:8000/abc1234");
    }
}
