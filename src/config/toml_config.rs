use crate::core::ConfigProvider;
use crate::utils::error::{Result, RosterError};
use crate::utils::validation::{validate_non_empty_string, validate_one_of, validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BASE_PATH: &str = "./data";
pub const DEFAULT_DATA_FILE: &str = "employees.json";
pub const LOG_FORMATS: [&str; 2] = ["compact", "json"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    pub storage: StorageConfig,
    pub logging: Option<LoggingConfig>,
    pub report: Option<ReportConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub base_path: String,
    pub data_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub output_file: Option<String>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                base_path: DEFAULT_BASE_PATH.to_string(),
                data_file: None,
            },
            logging: None,
            report: None,
        }
    }
}

impl RosterConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RosterError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RosterError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ROSTER_DATA_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RosterError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_path("storage.base_path", &self.storage.base_path)?;
        if let Some(data_file) = &self.storage.data_file {
            validate_path("storage.data_file", data_file)?;
        }

        if let Some(logging) = &self.logging {
            if let Some(level) = &logging.level {
                validate_non_empty_string("logging.level", level)?;
            }
            if let Some(format) = &logging.format {
                validate_one_of("logging.format", format, &LOG_FORMATS)?;
            }
        }

        if let Some(output_file) = self.report.as_ref().and_then(|r| r.output_file.as_ref()) {
            validate_path("report.output_file", output_file)?;
        }

        Ok(())
    }

    pub fn json_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .map(|f| f == "json")
            .unwrap_or(false)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn report_file(&self) -> Option<&str> {
        self.report.as_ref().and_then(|r| r.output_file.as_deref())
    }
}

impl ConfigProvider for RosterConfig {
    fn base_path(&self) -> &str {
        &self.storage.base_path
    }

    fn data_file(&self) -> &str {
        self.storage.data_file.as_deref().unwrap_or(DEFAULT_DATA_FILE)
    }
}

impl Validate for RosterConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
