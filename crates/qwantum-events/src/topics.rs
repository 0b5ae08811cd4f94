//! DOM event names and detail payloads.
//!
//! Names follow `<prefix>:<scope>:<action>`, e.g. `qw:modal:open`. Detail
//! payloads use camelCase keys so page scripts can read them directly.

use serde_json::{Value, json};

use crate::payloads::UiEvent;

/// Prefix used when the configuration does not override it.
pub const DEFAULT_PREFIX: &str = "qw";

impl UiEvent {
    /// Subsystem segment of the event name.
    #[must_use]
    pub const fn scope(&self) -> &'static str {
        match self {
            Self::ModalOpened { .. } | Self::ModalClosed { .. } | Self::ModalDestroyed { .. } => {
                "modal"
            }
            Self::MenuOpened | Self::MenuClosed => "menu",
            Self::NotificationShown { .. } | Self::NotificationHidden { .. } => "notification",
        }
    }

    /// Action segment of the event name.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::ModalOpened { .. } | Self::MenuOpened => "open",
            Self::ModalClosed { .. } | Self::MenuClosed => "close",
            Self::ModalDestroyed { .. } => "destroy",
            Self::NotificationShown { .. } => "show",
            Self::NotificationHidden { .. } => "hide",
        }
    }

    /// Detail key under which the DOM event carries the affected element:
    /// the dialog root for open/close, the mobile panel for menu events.
    #[must_use]
    pub const fn element_key(&self) -> Option<&'static str> {
        match self {
            Self::ModalOpened { .. } | Self::ModalClosed { .. } => Some("modal"),
            Self::MenuOpened | Self::MenuClosed => Some("mobileNav"),
            Self::ModalDestroyed { .. }
            | Self::NotificationShown { .. }
            | Self::NotificationHidden { .. } => None,
        }
    }

    /// JSON detail attached to the DOM event.
    #[must_use]
    pub fn detail(&self) -> Value {
        match self {
            Self::ModalOpened { modal_id }
            | Self::ModalClosed { modal_id }
            | Self::ModalDestroyed { modal_id } => json!({ "modalId": modal_id }),
            Self::MenuOpened | Self::MenuClosed => json!({}),
            Self::NotificationShown {
                notification_id,
                message,
                severity,
            } => json!({
                "notificationId": notification_id,
                "message": message,
                "type": severity.as_str(),
            }),
            Self::NotificationHidden { notification_id } => {
                json!({ "notificationId": notification_id })
            }
        }
    }
}

/// Full DOM event name for `event` under `prefix`.
#[must_use]
pub fn event_name(prefix: &str, event: &UiEvent) -> String {
    format!("{prefix}:{}:{}", event.scope(), event.action())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payloads::Severity;

    #[test]
    fn names_cover_every_event() {
        let cases = [
            (UiEvent::ModalOpened { modal_id: "a".into() }, "qw:modal:open"),
            (UiEvent::ModalClosed { modal_id: "a".into() }, "qw:modal:close"),
            (
                UiEvent::ModalDestroyed { modal_id: "a".into() },
                "qw:modal:destroy",
            ),
            (UiEvent::MenuOpened, "qw:menu:open"),
            (UiEvent::MenuClosed, "qw:menu:close"),
            (
                UiEvent::NotificationShown {
                    notification_id: "n".into(),
                    message: "m".into(),
                    severity: Severity::Info,
                },
                "qw:notification:show",
            ),
            (
                UiEvent::NotificationHidden {
                    notification_id: "n".into(),
                },
                "qw:notification:hide",
            ),
        ];
        for (event, name) in cases {
            assert_eq!(event_name(DEFAULT_PREFIX, &event), name);
        }
    }

    #[test]
    fn details_use_camel_case_keys() {
        let shown = UiEvent::NotificationShown {
            notification_id: "notification-5".into(),
            message: "Saved".into(),
            severity: Severity::Success,
        };
        assert_eq!(
            shown.detail(),
            json!({"notificationId": "notification-5", "message": "Saved", "type": "success"})
        );
        assert_eq!(
            UiEvent::ModalDestroyed {
                modal_id: "login".into()
            }
            .detail(),
            json!({"modalId": "login"})
        );
    }

    #[test]
    fn element_keys_follow_the_page_contract() {
        assert_eq!(
            UiEvent::ModalOpened { modal_id: "a".into() }.element_key(),
            Some("modal")
        );
        assert_eq!(UiEvent::MenuClosed.element_key(), Some("mobileNav"));
        assert_eq!(
            UiEvent::ModalDestroyed { modal_id: "a".into() }.element_key(),
            None
        );
    }

    #[test]
    fn custom_prefix_is_respected() {
        assert_eq!(event_name("app", &UiEvent::MenuOpened), "app:menu:open");
    }
}
