//! Typed controller configuration.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Class names and attributes forming the markup contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassNames {
    /// Dialog root marker.
    pub modal: String,
    /// Dialog close control.
    pub modal_close: String,
    /// Visible-state class shared by dialogs and menu parts.
    pub active: String,
    /// Attribute naming the dialog an element opens.
    pub modal_trigger_attribute: String,
    /// Burger trigger.
    pub burger: String,
    /// Mobile navigation panel.
    pub nav_mobile: String,
    /// Backdrop behind the panel.
    pub overlay: String,
    /// Navigation links inside the panel.
    pub nav_link: String,
    /// Reveal-on-scroll marker.
    pub animate: String,
    /// Revealed marker.
    pub visible: String,
    /// Notification stack container.
    pub notifications: String,
    /// Notification card.
    pub notification: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            modal: defaults::MODAL_CLASS.to_string(),
            modal_close: defaults::MODAL_CLOSE_CLASS.to_string(),
            active: defaults::ACTIVE_CLASS.to_string(),
            modal_trigger_attribute: defaults::MODAL_TRIGGER_ATTRIBUTE.to_string(),
            burger: defaults::BURGER_CLASS.to_string(),
            nav_mobile: defaults::NAV_MOBILE_CLASS.to_string(),
            overlay: defaults::OVERLAY_CLASS.to_string(),
            nav_link: defaults::NAV_LINK_CLASS.to_string(),
            animate: defaults::ANIMATE_CLASS.to_string(),
            visible: defaults::VISIBLE_CLASS.to_string(),
            notifications: defaults::NOTIFICATIONS_CLASS.to_string(),
            notification: defaults::NOTIFICATION_CLASS.to_string(),
        }
    }
}

impl ClassNames {
    /// Class of a dialog sub-element, e.g. `qw-modal_body`.
    #[must_use]
    pub fn modal_part(&self, part: &str) -> String {
        format!("{}_{part}", self.modal)
    }

    /// Size modifier class, e.g. `qw-modal-lg`.
    #[must_use]
    pub fn modal_size(&self, size: &str) -> String {
        format!("{}-{size}", self.modal)
    }

    /// Severity modifier class, e.g. `qw-notification-error`.
    #[must_use]
    pub fn notification_kind(&self, kind: &str) -> String {
        format!("{}-{kind}", self.notification)
    }
}

/// Mobile menu behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MenuSettings {
    /// Viewport width above which an open menu closes on resize.
    pub collapse_above_px: u32,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            collapse_above_px: defaults::MENU_COLLAPSE_ABOVE_PX,
        }
    }
}

/// Reveal-on-scroll observer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RevealSettings {
    /// Visible fraction (0.0–1.0) that reveals an element.
    pub threshold: f64,
    /// CSS root margin applied to the viewport.
    pub root_margin: String,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            threshold: defaults::REVEAL_THRESHOLD,
            root_margin: defaults::REVEAL_ROOT_MARGIN.to_string(),
        }
    }
}

/// Animation and lifetime timings, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimingSettings {
    /// Delay before `fade_in` reveals its element.
    pub fade_in_delay_ms: u32,
    /// Delay before a notification slides in.
    pub notification_enter_delay_ms: u32,
    /// Exit animation before a notification is removed.
    pub notification_exit_ms: u32,
    /// Default notification lifetime.
    pub notification_duration_ms: u32,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            fade_in_delay_ms: defaults::FADE_IN_DELAY_MS,
            notification_enter_delay_ms: defaults::NOTIFICATION_ENTER_DELAY_MS,
            notification_exit_ms: defaults::NOTIFICATION_EXIT_MS,
            notification_duration_ms: defaults::NOTIFICATION_DURATION_MS,
        }
    }
}

/// Complete controller configuration. Every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QwantumConfig {
    /// Markup contract.
    pub classes: ClassNames,
    /// Mobile menu behaviour.
    pub menu: MenuSettings,
    /// Reveal observer settings.
    pub reveal: RevealSettings,
    /// Animation timings.
    pub timing: TimingSettings,
    /// Prefix for emitted DOM event names.
    pub event_prefix: String,
}

impl Default for QwantumConfig {
    fn default() -> Self {
        Self {
            classes: ClassNames::default(),
            menu: MenuSettings::default(),
            reveal: RevealSettings::default(),
            timing: TimingSettings::default(),
            event_prefix: defaults::EVENT_PREFIX.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_class_names_follow_conventions() {
        let classes = ClassNames::default();
        assert_eq!(classes.modal_part("body"), "qw-modal_body");
        assert_eq!(classes.modal_size("sm"), "qw-modal-sm");
        assert_eq!(classes.notification_kind("error"), "qw-notification-error");
        assert_eq!(classes.modal_part("close"), classes.modal_close);
    }

    #[test]
    fn defaults_match_markup_contract() {
        let config = QwantumConfig::default();
        assert_eq!(config.menu.collapse_above_px, 768);
        assert!((config.reveal.threshold - 0.1).abs() < f64::EPSILON);
        assert_eq!(config.reveal.root_margin, "0px 0px -50px 0px");
        assert_eq!(config.timing.notification_duration_ms, 3_000);
        assert_eq!(config.event_prefix, "qw");
    }
}
