use crate::adapters::{Backend, FileStorage, MemoryStorage};
use crate::utils::error::{Result, StayError};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{validate_one_of, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

const BACKENDS: [&str; 2] = ["file", "memory"];
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["compact", "json"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub storage: StorageConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// `file` 或 `memory`
    pub backend: String,
    pub data_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                backend: "file".to_string(),
                data_dir: "./data".to_string(),
            },
            logging: None,
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${STAYBOOK_DATA})，未設定的變數保留原字串
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| StayError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_one_of("storage.backend", &self.storage.backend, &BACKENDS)?;
        validate_path("storage.data_dir", &self.storage.data_dir)?;

        if let Some(logging) = &self.logging {
            if let Some(level) = &logging.level {
                validate_one_of("logging.level", level, &LOG_LEVELS)?;
            }
            if let Some(format) = &logging.format {
                validate_one_of("logging.format", format, &LOG_FORMATS)?;
            }
        }

        Ok(())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .and_then(LogFormat::parse)
            .unwrap_or_default()
    }

    /// 依設定建立儲存後端
    pub fn open_backend(&self) -> Result<Backend> {
        match self.storage.backend.as_str() {
            "file" => Ok(Backend::File(FileStorage::new(&self.storage.data_dir))),
            "memory" => Ok(Backend::Memory(MemoryStorage::new())),
            other => Err(StayError::InvalidConfigValueError {
                field: "storage.backend".to_string(),
                value: other.to_string(),
                reason: format!("Valid backends: {}", BACKENDS.join(", ")),
            }),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
