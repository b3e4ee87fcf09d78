use actix_web::middleware::Next;
use actix_web::{
    Error, HttpResponse,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{Method, StatusCode},
    web,
};
use subtle::ConstantTimeEq;
use tracing::{debug, info};

use crate::api::services::admin::{ErrorCode, error_response};

/// Admin API 令牌，通过 `app_data` 注入
#[derive(Clone, Debug, Default)]
pub struct AdminToken(pub String);

impl AdminToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn is_open(&self) -> bool {
        self.0.is_empty()
    }

    /// 常量时间比较 Authorization 头里的 Bearer token
    pub fn verify(&self, header: Option<&[u8]>) -> bool {
        header
            .and_then(|value| value.strip_prefix(b"Bearer "))
            .is_some_and(|presented| presented.ct_eq(self.0.as_bytes()).into())
    }
}

pub struct AdminAuth;

impl AdminAuth {
    /// Admin API 身份验证中间件
    ///
    /// 令牌为空时不做校验。
    pub async fn check(
        req: ServiceRequest,
        next: Next<BoxBody>,
    ) -> Result<ServiceResponse<BoxBody>, Error> {
        if req.method() == Method::OPTIONS {
            return Ok(req.into_response(HttpResponse::NoContent().finish()));
        }

        let token = req
            .app_data::<web::Data<AdminToken>>()
            .map(|data| data.get_ref().clone())
            .unwrap_or_default();

        if token.is_open() {
            return next.call(req).await;
        }

        let header = req
            .headers()
            .get(actix_web::http::header::AUTHORIZATION)
            .map(|value| value.as_bytes());

        if token.verify(header) {
            debug!("Admin API authentication succeeded");
            return next.call(req).await;
        }

        info!("Admin API authentication failed: token mismatch or missing Authorization header");
        Ok(req.into_response(error_response(
            StatusCode::UNAUTHORIZED,
            ErrorCode::Unauthorized,
            "Unauthorized: Invalid or missing token",
        )))
    }
}
