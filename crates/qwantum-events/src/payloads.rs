//! Event payload types emitted by the controller.

use chrono::{DateTime, Utc};

/// Identifier assigned to each published event.
pub type EventId = u64;

/// Notification severity. Known kinds carry their own accent colour; any
/// other kind keeps its name for the class suffix and uses the info accent.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    /// Neutral information.
    #[default]
    Info,
    /// Completed action.
    Success,
    /// Needs attention.
    Warning,
    /// Failed action.
    Error,
    /// Page-defined kind, e.g. `danger`.
    Other(String),
}

impl Severity {
    /// The built-in severities in display order.
    #[must_use]
    pub fn all() -> [Self; 4] {
        [Self::Info, Self::Success, Self::Warning, Self::Error]
    }

    /// Lower-case name used in class names and event details.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Other(name) => name,
        }
    }

    /// Accent colour drawn on the notification's leading edge.
    #[must_use]
    pub const fn accent(&self) -> &'static str {
        match self {
            Self::Info | Self::Other(_) => "#333",
            Self::Success => "#22c55e",
            Self::Warning => "#f59e0b",
            Self::Error => "#ef4444",
        }
    }
}

impl From<String> for Severity {
    /// Blank names and names containing whitespace are not usable as a
    /// class suffix and read as [`Severity::Info`].
    fn from(name: String) -> Self {
        match name.trim() {
            "info" => Self::Info,
            "success" => Self::Success,
            "warning" => Self::Warning,
            "error" => Self::Error,
            other if other.is_empty() || other.contains(char::is_whitespace) => Self::Info,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<&str> for Severity {
    fn from(name: &str) -> Self {
        Self::from(name.to_string())
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// Events surfaced by the dialog, menu and notification subsystems.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// A dialog became visible.
    ModalOpened {
        /// Dialog identifier.
        modal_id: String,
    },
    /// A dialog was hidden.
    ModalClosed {
        /// Dialog identifier.
        modal_id: String,
    },
    /// A dialog was removed from the tree and the registry.
    ModalDestroyed {
        /// Dialog identifier.
        modal_id: String,
    },
    /// The mobile menu opened.
    MenuOpened,
    /// The mobile menu closed.
    MenuClosed,
    /// A notification was added to the stack.
    NotificationShown {
        /// Generated notification identifier.
        notification_id: String,
        /// Message text.
        message: String,
        /// Severity of the notification.
        severity: Severity,
    },
    /// A notification started its exit animation.
    NotificationHidden {
        /// Notification identifier.
        notification_id: String,
    },
}

impl UiEvent {
    /// Machine-friendly discriminator for logs and subscribers.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ModalOpened { .. } => "modal_opened",
            Self::ModalClosed { .. } => "modal_closed",
            Self::ModalDestroyed { .. } => "modal_destroyed",
            Self::MenuOpened => "menu_opened",
            Self::MenuClosed => "menu_closed",
            Self::NotificationShown { .. } => "notification_shown",
            Self::NotificationHidden { .. } => "notification_hidden",
        }
    }
}

/// Metadata wrapper tracking the event id and emission time.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct EventEnvelope {
    /// Sequential identifier.
    pub id: EventId,
    /// Emission time.
    pub timestamp: DateTime<Utc>,
    /// Event payload.
    pub event: UiEvent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_accents_are_fixed() {
        let accents: Vec<_> = Severity::all().iter().map(|s| s.accent()).collect();
        assert_eq!(accents, vec!["#333", "#22c55e", "#f59e0b", "#ef4444"]);
        assert_eq!(Severity::default(), Severity::Info);
    }

    #[test]
    fn severity_deserializes_from_lowercase() -> Result<(), serde_json::Error> {
        let parsed: Severity = serde_json::from_str("\"warning\"")?;
        assert_eq!(parsed, Severity::Warning);
        assert_eq!(serde_json::to_string(&parsed)?, "\"warning\"");
        Ok(())
    }

    #[test]
    fn unknown_severity_keeps_its_name_with_info_accent() -> Result<(), serde_json::Error> {
        let parsed: Severity = serde_json::from_str("\"danger\"")?;
        assert_eq!(parsed, Severity::Other("danger".into()));
        assert_eq!(parsed.as_str(), "danger");
        assert_eq!(parsed.accent(), Severity::Info.accent());
        assert_eq!(serde_json::to_string(&parsed)?, "\"danger\"");
        assert_eq!(Severity::from("  "), Severity::Info);
        assert_eq!(Severity::from("very bad"), Severity::Info);
        Ok(())
    }

    #[test]
    fn serialized_events_carry_type_tag() -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(UiEvent::ModalOpened {
            modal_id: "signup".into(),
        })?;
        assert_eq!(value["type"], "modal_opened");
        assert_eq!(value["modal_id"], "signup");
        assert_eq!(UiEvent::MenuClosed.kind(), "menu_closed");
        Ok(())
    }
}
