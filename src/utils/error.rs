use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("employee {id} already exists")]
    DuplicateEmployee { id: i64 },

    #[error("employee {id} not found")]
    EmployeeNotFound { id: i64 },

    #[error("{value} is not Employee object")]
    InvalidEmployeeType { value: String },

    #[error("employee {id} has non-finite {field}: {value}")]
    NonFiniteValue {
        id: i64,
        field: &'static str,
        value: f64,
    },

    #[error("Unknown employee variant: {tag}")]
    UnknownVariant { tag: String },

    #[error("Record has no className tag")]
    MissingVariantTag,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Usage,
    Persistence,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl RosterError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RosterError::DuplicateEmployee { .. }
            | RosterError::EmployeeNotFound { .. }
            | RosterError::InvalidEmployeeType { .. }
            | RosterError::NonFiniteValue { .. } => ErrorCategory::Usage,
            RosterError::UnknownVariant { .. }
            | RosterError::MissingVariantTag
            | RosterError::SerializationError(_)
            | RosterError::CsvError(_) => ErrorCategory::Persistence,
            RosterError::ConfigError { .. }
            | RosterError::ConfigValidationError { .. }
            | RosterError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            RosterError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Usage => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Persistence => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RosterError::DuplicateEmployee { .. } => "使用未被佔用的員工編號，或先移除既有員工",
            RosterError::EmployeeNotFound { .. } => "確認員工編號是否正確",
            RosterError::InvalidEmployeeType { .. } => "資料檔中的每一筆記錄都必須是 JSON 物件",
            RosterError::NonFiniteValue { .. } => "薪資、工時與係數必須是有限數值",
            RosterError::UnknownVariant { .. } | RosterError::MissingVariantTag => {
                "檢查資料檔的 className 欄位 (Employee, WageEmployee, SalesPerson, Manager)"
            }
            RosterError::SerializationError(_) => "資料檔可能已損毀，請檢查 JSON 格式",
            RosterError::CsvError(_) => "檢查報表輸出路徑是否可寫入",
            RosterError::IoError(_) => "檢查檔案路徑與權限",
            RosterError::ConfigError { .. }
            | RosterError::ConfigValidationError { .. }
            | RosterError::InvalidConfigValueError { .. } => "檢查設定檔與命令列參數",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Usage => self.to_string(),
            ErrorCategory::Persistence => format!("無法讀寫員工資料: {}", self),
            ErrorCategory::Configuration => format!("設定錯誤: {}", self),
            ErrorCategory::System => format!("系統錯誤: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_error_messages() {
        assert_eq!(
            RosterError::DuplicateEmployee { id: 7 }.to_string(),
            "employee 7 already exists"
        );
        assert_eq!(
            RosterError::EmployeeNotFound { id: 7 }.to_string(),
            "employee 7 not found"
        );
        assert_eq!(
            RosterError::InvalidEmployeeType {
                value: "42".to_string()
            }
            .to_string(),
            "42 is not Employee object"
        );
    }

    #[test]
    fn test_category_and_severity() {
        let err = RosterError::EmployeeNotFound { id: 1 };
        assert_eq!(err.category(), ErrorCategory::Usage);
        assert_eq!(err.severity(), ErrorSeverity::Medium);

        let err = RosterError::UnknownVariant {
            tag: "Intern".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Persistence);

        let err = RosterError::IoError(std::io::Error::other("disk"));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_every_severity_maps_to_nonzero_exit() {
        let errors = [
            RosterError::NonFiniteValue {
                id: 2,
                field: "factor",
                value: f64::INFINITY,
            },
            RosterError::MissingVariantTag,
            RosterError::ConfigError {
                message: "bad".to_string(),
            },
            RosterError::IoError(std::io::Error::other("disk")),
        ];
        let severities: Vec<ErrorSeverity> = errors.iter().map(|e| e.severity()).collect();
        assert_eq!(
            severities,
            vec![
                ErrorSeverity::Medium,
                ErrorSeverity::High,
                ErrorSeverity::High,
                ErrorSeverity::Critical
            ]
        );
        assert_eq!(
            errors[0].to_string(),
            "employee 2 has non-finite factor: inf"
        );
    }
}
