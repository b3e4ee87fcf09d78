use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum SnaplinkError {
    StoreUnavailable(String),
    NotFound(String),
    UniquenessViolation(String),
    Validation(String),
    AllocationExhausted(String),
    DatabaseConfig(String),
    DatabaseOperation(String),
    FileOperation(String),
    Serialization(String),
    Configuration(String),
}

impl SnaplinkError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            SnaplinkError::StoreUnavailable(_) => "E001",
            SnaplinkError::NotFound(_) => "E002",
            SnaplinkError::UniquenessViolation(_) => "E003",
            SnaplinkError::Validation(_) => "E004",
            SnaplinkError::AllocationExhausted(_) => "E005",
            SnaplinkError::DatabaseConfig(_) => "E006",
            SnaplinkError::DatabaseOperation(_) => "E007",
            SnaplinkError::FileOperation(_) => "E008",
            SnaplinkError::Serialization(_) => "E009",
            SnaplinkError::Configuration(_) => "E010",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            SnaplinkError::StoreUnavailable(_) => "Store Unavailable",
            SnaplinkError::NotFound(_) => "Resource Not Found",
            SnaplinkError::UniquenessViolation(_) => "Uniqueness Violation",
            SnaplinkError::Validation(_) => "Validation Error",
            SnaplinkError::AllocationExhausted(_) => "Code Allocation Exhausted",
            SnaplinkError::DatabaseConfig(_) => "Database Configuration Error",
            SnaplinkError::DatabaseOperation(_) => "Database Operation Error",
            SnaplinkError::FileOperation(_) => "File Operation Error",
            SnaplinkError::Serialization(_) => "Serialization Error",
            SnaplinkError::Configuration(_) => "Configuration Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            SnaplinkError::StoreUnavailable(msg)
            | SnaplinkError::NotFound(msg)
            | SnaplinkError::UniquenessViolation(msg)
            | SnaplinkError::Validation(msg)
            | SnaplinkError::AllocationExhausted(msg)
            | SnaplinkError::DatabaseConfig(msg)
            | SnaplinkError::DatabaseOperation(msg)
            | SnaplinkError::FileOperation(msg)
            | SnaplinkError::Serialization(msg)
            | SnaplinkError::Configuration(msg) => msg,
        }
    }

    /// HTTP 状态码映射
    ///
    /// UniquenessViolation 只在分配重试内部使用，正常不会到达 HTTP 层。
    pub fn http_status(&self) -> StatusCode {
        match self {
            SnaplinkError::StoreUnavailable(_) | SnaplinkError::AllocationExhausted(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            SnaplinkError::NotFound(_) => StatusCode::NOT_FOUND,
            SnaplinkError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            SnaplinkError::UniquenessViolation(_)
            | SnaplinkError::DatabaseConfig(_)
            | SnaplinkError::DatabaseOperation(_)
            | SnaplinkError::FileOperation(_)
            | SnaplinkError::Serialization(_)
            | SnaplinkError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于启动失败时输出到终端）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for SnaplinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SnaplinkError {}

// 便捷的构造函数
impl SnaplinkError {
    pub fn store_unavailable<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::StoreUnavailable(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::NotFound(msg.into())
    }

    pub fn uniqueness_violation<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::UniquenessViolation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::Validation(msg.into())
    }

    pub fn allocation_exhausted<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::AllocationExhausted(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::DatabaseConfig(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::Serialization(msg.into())
    }

    pub fn configuration<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::Configuration(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SnaplinkError::NotFound(_))
    }

    pub fn is_uniqueness_violation(&self) -> bool {
        matches!(self, SnaplinkError::UniquenessViolation(_))
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for SnaplinkError {
    fn from(err: sea_orm::DbErr) -> Self {
        use sea_orm::{DbErr, SqlErr};

        if let Some(SqlErr::UniqueConstraintViolation(msg)) = err.sql_err() {
            return SnaplinkError::UniquenessViolation(msg);
        }

        match err {
            DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => {
                SnaplinkError::StoreUnavailable(err.to_string())
            }
            DbErr::RecordNotFound(msg) => SnaplinkError::NotFound(msg),
            other => SnaplinkError::DatabaseOperation(other.to_string()),
        }
    }
}

impl From<std::io::Error> for SnaplinkError {
    fn from(err: std::io::Error) -> Self {
        SnaplinkError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for SnaplinkError {
    fn from(err: serde_json::Error) -> Self {
        SnaplinkError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for SnaplinkError {
    fn from(err: toml::ser::Error) -> Self {
        SnaplinkError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SnaplinkError>;
