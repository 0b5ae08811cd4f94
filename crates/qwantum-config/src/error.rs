//! Error types for configuration loading.

use thiserror::Error;

/// Primary error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document was not valid JSON for the model.
    #[error("failed to parse configuration document")]
    Parse {
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
    /// Field contained an invalid value.
    #[error("invalid value for '{field}' in '{section}': {message}")]
    InvalidField {
        /// Section that failed validation.
        section: &'static str,
        /// Field that failed validation.
        field: &'static str,
        /// Human-readable error description.
        message: String,
    },
}

/// Result alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn config_error_display_and_source() {
        let parse = match serde_json::from_str::<serde_json::Value>("{") {
            Ok(_) => panic!("expected a parse failure"),
            Err(source) => ConfigError::Parse { source },
        };
        assert_eq!(parse.to_string(), "failed to parse configuration document");
        assert!(parse.source().is_some());

        let invalid = ConfigError::InvalidField {
            section: "reveal",
            field: "threshold",
            message: "must be between 0 and 1".into(),
        };
        assert_eq!(
            invalid.to_string(),
            "invalid value for 'threshold' in 'reveal': must be between 0 and 1"
        );
        assert!(invalid.source().is_none());
    }
}
