//! Validation helpers for configuration documents.

use crate::error::{ConfigError, ConfigResult};
use crate::model::{ClassNames, QwantumConfig};

fn require_token(section: &'static str, field: &'static str, value: &str) -> ConfigResult<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidField {
            section,
            field,
            message: "must not be empty".to_string(),
        });
    }
    if value.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidField {
            section,
            field,
            message: "must be a single token".to_string(),
        });
    }
    Ok(())
}

fn validate_classes(classes: &ClassNames) -> ConfigResult<()> {
    let fields: [(&'static str, &str); 12] = [
        ("modal", classes.modal.as_str()),
        ("modalClose", classes.modal_close.as_str()),
        ("active", classes.active.as_str()),
        ("modalTriggerAttribute", classes.modal_trigger_attribute.as_str()),
        ("burger", classes.burger.as_str()),
        ("navMobile", classes.nav_mobile.as_str()),
        ("overlay", classes.overlay.as_str()),
        ("navLink", classes.nav_link.as_str()),
        ("animate", classes.animate.as_str()),
        ("visible", classes.visible.as_str()),
        ("notifications", classes.notifications.as_str()),
        ("notification", classes.notification.as_str()),
    ];
    fields
        .into_iter()
        .try_for_each(|(field, value)| require_token("classes", field, value))
}

impl QwantumConfig {
    /// Check every field for values the controller cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] naming the first offending field.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_classes(&self.classes)?;
        if self.menu.collapse_above_px == 0 {
            return Err(ConfigError::InvalidField {
                section: "menu",
                field: "collapseAbovePx",
                message: "must be greater than zero".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(ConfigError::InvalidField {
                section: "reveal",
                field: "threshold",
                message: "must be between 0 and 1".to_string(),
            });
        }
        require_token("root", "eventPrefix", &self.event_prefix)
    }
}
