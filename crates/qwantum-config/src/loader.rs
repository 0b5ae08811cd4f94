//! JSON entry points for configuration documents.

use serde_json::Value;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::model::QwantumConfig;

impl QwantumConfig {
    /// Parse and validate a JSON document. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or mistyped fields and
    /// [`ConfigError::InvalidField`] when validation fails.
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|source| ConfigError::Parse { source })?;
        config.validate()?;
        debug!(prefix = %config.event_prefix, "configuration loaded");
        Ok(config)
    }

    /// Build and validate a configuration from an already-parsed value.
    ///
    /// # Errors
    ///
    /// Same as [`QwantumConfig::from_json_str`].
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        let config: Self =
            serde_json::from_value(value).map_err(|source| ConfigError::Parse { source })?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_document_yields_defaults() -> ConfigResult<()> {
        assert_eq!(QwantumConfig::from_json_str("{}")?, QwantumConfig::default());
        Ok(())
    }

    #[test]
    fn partial_documents_override_selected_fields() -> ConfigResult<()> {
        let config = QwantumConfig::from_value(json!({
            "classes": { "modal": "dialog" },
            "menu": { "collapseAbovePx": 1024 },
            "timing": { "notificationDurationMs": 5000 },
            "eventPrefix": "site"
        }))?;
        assert_eq!(config.classes.modal, "dialog");
        assert_eq!(config.classes.overlay, "qw-overlay");
        assert_eq!(config.menu.collapse_above_px, 1024);
        assert_eq!(config.timing.notification_duration_ms, 5_000);
        assert_eq!(config.timing.notification_exit_ms, 300);
        assert_eq!(config.event_prefix, "site");
        Ok(())
    }

    #[test]
    fn malformed_documents_report_parse_errors() {
        assert!(matches!(
            QwantumConfig::from_json_str("{\"menu\": {\"collapseAbovePx\": \"wide\"}}"),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            QwantumConfig::from_json_str("not json"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn invalid_values_report_field_errors() {
        assert!(matches!(
            QwantumConfig::from_json_str("{\"reveal\": {\"threshold\": 2}}"),
            Err(ConfigError::InvalidField {
                field: "threshold",
                ..
            })
        ));
    }
}
