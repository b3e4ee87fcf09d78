//! API 帮助函数

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;

use crate::errors::SnaplinkError;

use super::error_code::ErrorCode;
use super::types::ErrorBody;

/// 构建成功响应（200 + JSON 数据，不加外层包装）
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok()
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(data)
}

/// 构建错误响应
pub fn error_response(status: StatusCode, error_code: ErrorCode, detail: &str) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ErrorBody {
            code: error_code as i32,
            detail: detail.to_string(),
        })
}

/// 从 SnaplinkError 构建错误响应（自动映射 HTTP 状态码和 ErrorCode）
pub fn error_from_snaplink(err: &SnaplinkError) -> HttpResponse {
    error_response(err.http_status(), ErrorCode::from(err), err.message())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn test_error_body_shape() {
        let response = error_from_snaplink(&SnaplinkError::not_found("Link 'x' not found"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], ErrorCode::LinkNotFound as i32);
        assert_eq!(json["detail"], "Link 'x' not found");
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            error_from_snaplink(&SnaplinkError::store_unavailable("down")).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            error_from_snaplink(&SnaplinkError::validation("bad")).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
