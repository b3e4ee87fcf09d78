//! Server mode
//!
//! Configures the HTTP server with all routes and runs it until Ctrl+C.

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::api::configure_routes;
use crate::api::middleware::AdminToken;
use crate::api::services::{AppStartTime, PublicBaseUrl};
use crate::config::{CorsConfig, StaticConfig};
use crate::runtime::lifetime;

/// Validate CORS configuration at startup (runs once)
fn validate_cors_config(cors_config: &CorsConfig) {
    if !cors_config.enabled {
        return;
    }

    if cors_config.allowed_origins.is_empty() {
        warn!(
            "CORS enabled but allowed_origins is empty. \
            No cross-origin requests will be allowed."
        );
    }

    for origin in &cors_config.allowed_origins {
        if origin != "*" && url::Url::parse(origin).is_err() {
            warn!("Ignoring invalid CORS origin: {}", origin);
        }
    }

    if cors_config.allowed_origins.iter().any(|o| o == "*") {
        warn!("CORS allows any origin; credentials are disabled");
    }
}

/// Build CORS middleware from configuration
pub fn build_cors_middleware(cors_config: &CorsConfig) -> Cors {
    // 关闭时使用浏览器默认的同源策略
    if !cors_config.enabled {
        return Cors::default();
    }

    let is_any_origin = cors_config.allowed_origins.iter().any(|o| o == "*");

    let mut cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(cors_config.max_age as usize);

    if is_any_origin {
        // 任意来源不能同时携带凭据
        cors = cors.allow_any_origin();
    } else {
        // actix-cors 遇到非法 origin 会 panic，启动时已告警
        for origin in cors_config
            .allowed_origins
            .iter()
            .filter(|o| url::Url::parse(o).is_ok())
        {
            cors = cors.allowed_origin(origin);
        }
        cors = cors.supports_credentials();
    }

    cors
}

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(config: &StaticConfig) -> Result<()> {
    let app_start_time = AppStartTime::default();

    let startup = lifetime::startup::prepare_server_startup(config)
        .await
        .inspect_err(|e| error!("Server startup failed: {:#}", e))?;

    if startup.degraded {
        warn!("Serving in degraded mode: storage is unavailable");
    }

    let link_service = startup.link_service.clone();
    let admin_token = AdminToken::new(config.admin.token.clone());
    let base_url = PublicBaseUrl::new(config.server.public_base_url.clone());
    let cors_config = config.cors.clone();
    validate_cors_config(&cors_config);

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    info!("Using {} worker threads", cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(build_cors_middleware(&cors_config))
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("X-Content-Type-Options", "nosniff")))
            .app_data(web::Data::new(link_service.clone()))
            .app_data(web::Data::new(admin_token.clone()))
            .app_data(web::Data::new(base_url.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .configure(configure_routes)
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .shutdown_timeout(lifetime::shutdown::SHUTDOWN_TIMEOUT_SECS)
    .disable_signals()
    .workers(cpu_count)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    info!("Starting server at http://{}", bind_address);

    let handle = server.handle();
    tokio::select! {
        res = server => {
            res.context("HTTP server terminated with an error")?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(handle) => {
            info!("Graceful shutdown completed");
        }
    }

    Ok(())
}
