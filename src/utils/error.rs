use thiserror::Error;

#[derive(Error, Debug)]
pub enum CmiError {
    /// Raised by the validators and by every write a model object refuses.
    #[error("Validation error: code {code}")]
    ValidationError { code: u16 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid pattern for {field}: {source}")]
    PatternError {
        field: String,
        #[source]
        source: regex::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid config value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl CmiError {
    pub fn validation(code: u16) -> Self {
        CmiError::ValidationError { code }
    }

    /// The numeric error code carried by a validation failure.
    pub fn code(&self) -> Option<u16> {
        match self {
            CmiError::ValidationError { code } => Some(*code),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, CmiError::ValidationError { .. })
    }
}

pub type Result<T> = std::result::Result<T, CmiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_only_for_validation_errors() {
        assert_eq!(CmiError::validation(405).code(), Some(405));
        assert!(CmiError::validation(405).is_validation());

        let config = CmiError::ConfigError {
            message: "bad".to_string(),
        };
        assert_eq!(config.code(), None);
        assert!(!config.is_validation());
    }

    #[test]
    fn test_display_includes_code() {
        assert_eq!(
            CmiError::validation(407).to_string(),
            "Validation error: code 407"
        );
    }
}
