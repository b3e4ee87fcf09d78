use std::time::Duration;

use actix_web::dev::ServerHandle;
use tokio::signal;
use tokio::time::timeout;
use tracing::{error, info, warn};

/// 关闭超时时间（秒）
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// 等待 Ctrl+C，然后优雅停止 HTTP 服务
///
/// 停止监听新连接，等待处理中的请求完成，超时后强制停止。
pub async fn listen_for_shutdown(handle: ServerHandle) {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received, draining in-flight requests...");
        }
        Err(e) => {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    }

    match timeout(
        Duration::from_secs(SHUTDOWN_TIMEOUT_SECS),
        handle.stop(true),
    )
    .await
    {
        Ok(()) => info!("HTTP server stopped gracefully"),
        Err(_) => {
            error!(
                "Graceful shutdown timed out after {} seconds, forcing stop",
                SHUTDOWN_TIMEOUT_SECS
            );
            handle.stop(false).await;
        }
    }
}
