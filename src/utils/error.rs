use thiserror::Error;

#[derive(Error, Debug)]
pub enum StayError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Invalid date: '{value}'")]
    InvalidDate { value: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} already exists: {id}")]
    DuplicateId { entity: &'static str, id: String },

    #[error("Authentication failed for {email}")]
    AuthenticationError { email: String },

    #[error("User {user_id} is not a participant of conversation {conversation_id}")]
    NotParticipant {
        user_id: String,
        conversation_id: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Storage,
    Configuration,
    Input,
    Authentication,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl StayError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            StayError::IoError(_) | StayError::SerializationError(_) => ErrorCategory::Storage,
            StayError::TomlError(_)
            | StayError::ConfigError { .. }
            | StayError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            StayError::ValidationError { .. }
            | StayError::InvalidDate { .. }
            | StayError::NotFound { .. }
            | StayError::DuplicateId { .. } => ErrorCategory::Input,
            StayError::AuthenticationError { .. } | StayError::NotParticipant { .. } => {
                ErrorCategory::Authentication
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            StayError::NotFound { .. } => ErrorSeverity::Low,
            StayError::ValidationError { .. }
            | StayError::InvalidDate { .. }
            | StayError::DuplicateId { .. }
            | StayError::AuthenticationError { .. }
            | StayError::NotParticipant { .. } => ErrorSeverity::Medium,
            StayError::TomlError(_)
            | StayError::ConfigError { .. }
            | StayError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            StayError::IoError(_) | StayError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            StayError::IoError(_) => "無法存取資料目錄".to_string(),
            StayError::SerializationError(_) => "資料檔案格式損壞".to_string(),
            StayError::TomlError(_) => "設定檔格式錯誤".to_string(),
            StayError::ConfigError { message } => format!("設定錯誤: {}", message),
            StayError::InvalidConfigValueError { field, reason, .. } => {
                format!("設定 {} 無效: {}", field, reason)
            }
            StayError::ValidationError { message } => format!("輸入無效: {}", message),
            StayError::InvalidDate { value } => format!("無法解析日期: {}", value),
            StayError::NotFound { entity, id } => format!("找不到 {} ({})", entity, id),
            StayError::DuplicateId { entity, id } => format!("{} 已存在 ({})", entity, id),
            StayError::AuthenticationError { .. } => "帳號或密碼錯誤".to_string(),
            StayError::NotParticipant { conversation_id, .. } => {
                format!("你不是對話 {} 的參與者", conversation_id)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Storage => "Check that the data directory exists and is writable",
            ErrorCategory::Configuration => "Review the TOML configuration file and CLI flags",
            ErrorCategory::Input => "Check the ids and dates passed on the command line",
            ErrorCategory::Authentication => {
                "Sign in with a demo account that takes part in the conversation (see `staybook --help`)"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, StayError>;
