use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShopError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required field '{field}'")]
    MissingField { field: String },

    #[error("Invalid value for field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("{entity} with ID {id} not found.")]
    NotFound { entity: String, id: i64 },

    #[error("Store error: {message}")]
    StoreError { message: String },

    #[error("Malformed cart row for '{username}': {reason}")]
    MalformedRow { username: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 呼叫端輸入有誤
    Input,
    /// 找不到資料
    Lookup,
    /// 儲存層或資料內容損壞
    Data,
    /// 設定或系統環境問題
    System,
}

impl ShopError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::StoreError {
            message: message.into(),
        }
    }

    pub fn product_not_found(id: i64) -> Self {
        Self::NotFound {
            entity: "Product".to_string(),
            id,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } => ErrorCategory::Input,
            Self::NotFound { .. } => ErrorCategory::Lookup,
            Self::MissingField { .. }
            | Self::InvalidField { .. }
            | Self::MalformedRow { .. }
            | Self::StoreError { .. }
            | Self::SerializationError(_) => ErrorCategory::Data,
            Self::IoError(_) | Self::ConfigError { .. } => ErrorCategory::System,
        }
    }

    /// CLI 使用的退出碼
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Input => 2,
            ErrorCategory::Lookup => 4,
            ErrorCategory::Data => 1,
            ErrorCategory::System => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { message } => format!("Invalid input: {}", message),
            Self::NotFound { entity, id } => format!("{} {} does not exist", entity, id),
            Self::MissingField { field } => {
                format!("Stored record is incomplete (missing '{}')", field)
            }
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::IoError(e) => format!("Could not access data file: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShopError>;
