//! Redirect service tests
//!
//! Short code → 307 redirect, the hottest path of the service.

use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};

use snaplink::api::configure_routes;
use snaplink::api::middleware::AdminToken;
use snaplink::api::services::admin::{ErrorBody, ErrorCode};
use snaplink::api::services::{AppStartTime, PublicBaseUrl};
use snaplink::config::AllocatorConfig;
use snaplink::services::LinkService;
use snaplink::storage::{LinkStore, MemoryStorage, UnavailableStorage};

macro_rules! init_app {
    ($service:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($service))
                .app_data(web::Data::new(AdminToken::default()))
                .app_data(web::Data::new(PublicBaseUrl::default()))
                .app_data(web::Data::new(AppStartTime::default()))
                .configure(configure_routes),
        )
        .await
    };
}

async fn seeded_service() -> Arc<LinkService> {
    let store = Arc::new(MemoryStorage::new());
    store
        .insert("abc1234", "https://example.com/a?x=1")
        .await
        .unwrap();
    store.insert("AbC1234", "https://example.com/upper").await.unwrap();
    Arc::new(LinkService::from_config(store, &AllocatorConfig::default()))
}

#[actix_web::test]
async fn test_redirect_known_code() {
    let app = init_app!(seeded_service().await);

    let req = TestRequest::get().uri("/abc1234").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "https://example.com/a?x=1"
    );
}

#[actix_web::test]
async fn test_redirect_is_case_sensitive() {
    let app = init_app!(seeded_service().await);

    let req = TestRequest::get().uri("/AbC1234").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "https://example.com/upper"
    );
}

#[actix_web::test]
async fn test_head_redirect() {
    let app = init_app!(seeded_service().await);

    let req = TestRequest::default()
        .method(actix_web::http::Method::HEAD)
        .uri("/abc1234")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[actix_web::test]
async fn test_unknown_code_is_404() {
    let app = init_app!(seeded_service().await);

    let req = TestRequest::get().uri("/nothere").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.code, ErrorCode::LinkNotFound as i32);
    assert!(body.detail.contains("nothere"));
}

#[actix_web::test]
async fn test_malformed_code_is_404() {
    let app = init_app!(seeded_service().await);

    let req = TestRequest::get().uri("/bad%20code").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let long = format!("/{}", "a".repeat(65));
    let req = TestRequest::get().uri(&long).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_multi_segment_path_is_404() {
    let app = init_app!(seeded_service().await);

    let req = TestRequest::get().uri("/abc1234/extra").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_redirect_degraded_store_is_503() {
    let service = Arc::new(LinkService::from_config(
        Arc::new(UnavailableStorage::new("connection refused")),
        &AllocatorConfig::default(),
    ));
    let app = init_app!(service);

    let req = TestRequest::get().uri("/abc1234").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.code, ErrorCode::ServiceUnavailable as i32);
}

#[actix_web::test]
async fn test_redirect_follows_update() {
    let service = seeded_service().await;
    let app = init_app!(service.clone());

    service
        .update_link("abc1234", "https://example.com/b")
        .await
        .unwrap();

    let req = TestRequest::get().uri("/abc1234").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "https://example.com/b"
    );
}
