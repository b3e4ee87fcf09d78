//! 数据库操作重试
//!
//! 连接丢失、死锁、锁等待超时等瞬时错误按指数退避重试；
//! 唯一约束冲突、记录不存在等确定性错误直接返回给调用方。

use std::future::Future;
use std::time::Duration;

use sea_orm::DbErr;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::DatabaseConfig;

/// 可重试的数据库错误码
///
/// MySQL: 1213 死锁 / 1205 锁等待超时
/// PostgreSQL: 40001 序列化失败 / 40P01 死锁
/// SQLite: 5 BUSY / 6 LOCKED
const RETRYABLE_SQL_CODES: &[&str] = &["1213", "1205", "40001", "40P01", "5", "6"];

/// 判断数据库错误是否是瞬时错误
pub fn is_transient(err: &DbErr) -> bool {
    use sea_orm::error::RuntimeErr;

    match err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => true,
        DbErr::Exec(runtime_err) | DbErr::Query(runtime_err) => match runtime_err {
            RuntimeErr::SqlxError(sqlx_err) => {
                if let Some(db_err) = sqlx_err.as_database_error()
                    && let Some(code) = db_err.code()
                {
                    return RETRYABLE_SQL_CODES.contains(&code.as_ref());
                }
                is_transient_message(&sqlx_err.to_string())
            }
            RuntimeErr::Internal(msg) => is_transient_message(msg),
            #[allow(unreachable_patterns)]
            _ => false,
        },
        _ => false,
    }
}

/// 非幂等写入（INSERT）可以安全重放的错误
///
/// `Conn` 可能发生在语句已经提交之后，重放会撞上自己刚写入的行，
/// 只有拿连接失败和锁冲突这类语句确定未生效的错误才重试。
pub fn is_safe_to_replay(err: &DbErr) -> bool {
    !matches!(err, DbErr::Conn(_)) && is_transient(err)
}

fn is_transient_message(msg: &str) -> bool {
    let msg = msg.to_lowercase();
    msg.contains("deadlock")
        || msg.contains("lock wait timeout")
        || msg.contains("database is locked")
        || msg.contains("serialization failure")
}

#[derive(Clone, Copy, Debug)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 100,
            max_delay_ms: 2000,
        }
    }
}

impl From<&DatabaseConfig> for RetryConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            max_retries: config.retry_count,
            base_delay_ms: config.retry_base_delay_ms,
            max_delay_ms: config.retry_max_delay_ms,
        }
    }
}

impl RetryConfig {
    /// 第 `attempt` 次重试前的等待时间（毫秒），带 0-25% 随机抖动
    pub fn backoff_ms(&self, attempt: u32) -> u64 {
        let exp_delay = self
            .base_delay_ms
            .saturating_mul(2u64.saturating_pow(attempt.saturating_sub(1)));
        let capped = exp_delay.min(self.max_delay_ms);
        capped.saturating_add(rand::random_range(0..=capped / 4))
    }
}

/// 指数退避重试执行器
pub async fn with_retry<T, F, Fut>(
    operation_name: &str,
    config: RetryConfig,
    operation: F,
) -> Result<T, DbErr>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbErr>>,
{
    with_retry_if(operation_name, config, is_transient, operation).await
}

/// 同 `with_retry`，由 `should_retry` 决定哪些错误可以重试
pub async fn with_retry_if<T, F, Fut>(
    operation_name: &str,
    config: RetryConfig,
    should_retry: fn(&DbErr) -> bool,
    mut operation: F,
) -> Result<T, DbErr>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbErr>>,
{
    let mut attempt = 0;
    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    debug!(
                        "Operation '{}' succeeded after {} retries",
                        operation_name, attempt
                    );
                }
                return Ok(value);
            }
            Err(e) if should_retry(&e) && attempt < config.max_retries => {
                attempt += 1;
                let delay = config.backoff_ms(attempt);
                warn!(
                    "Operation '{}' failed (attempt {}/{}): {}; retrying in {} ms",
                    operation_name,
                    attempt,
                    config.max_retries + 1,
                    e,
                    delay
                );
                sleep(Duration::from_millis(delay)).await;
            }
            Err(e) => {
                debug!("Operation '{}' failed: {}", operation_name, e);
                return Err(e);
            }
        }
    }
}
