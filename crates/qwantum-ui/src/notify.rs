//! Transient notifications stacked in the top-right corner.
//!
//! # Design
//! - Cards are tracked until hidden; a second `hide` finds nothing and does
//!   nothing.
//! - Each live card owns its enter and auto-dismiss timers, so hiding it
//!   cancels whatever has not fired yet.
//! - The exit timer is detached: removal happens even if the controller is
//!   dropped mid-animation.

use qwantum_dom::{EventKind, Host, ListenOptions, ListenTarget, Timer};
use qwantum_events::{Severity, UiEvent};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::controller::Qwantum;

const CONTAINER_STYLES: [(&str, &str); 7] = [
    ("position", "fixed"),
    ("top", "20px"),
    ("right", "20px"),
    ("z-index", "3000"),
    ("display", "flex"),
    ("flex-direction", "column"),
    ("gap", "10px"),
];

const CARD_STYLES: [(&str, &str); 11] = [
    ("background", "white"),
    ("padding", "16px 20px"),
    ("border-radius", "12px"),
    ("box-shadow", "0 10px 40px rgba(0,0,0,0.1)"),
    ("max-width", "300px"),
    ("transform", "translateX(100%)"),
    ("transition", "all 0.3s ease"),
    ("display", "flex"),
    ("align-items", "center"),
    ("justify-content", "space-between"),
    ("gap", "12px"),
];

const DISMISS_STYLES: [(&str, &str); 11] = [
    ("background", "none"),
    ("border", "none"),
    ("font-size", "18px"),
    ("cursor", "pointer"),
    ("color", "#999"),
    ("padding", "0"),
    ("width", "20px"),
    ("height", "20px"),
    ("display", "flex"),
    ("align-items", "center"),
    ("justify-content", "center"),
];

/// Options accepted by [`Qwantum::show_notification`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationOptions {
    /// Message, inserted as text.
    pub message: String,
    /// Severity; selects the accent colour and class.
    #[serde(rename = "type")]
    pub kind: Severity,
    /// Auto-dismiss delay in milliseconds; zero or negative keeps the card
    /// until hidden. Falls back to the configured default when absent.
    #[serde(rename = "duration")]
    pub duration_ms: Option<f64>,
    /// Render a dismiss button.
    pub closable: bool,
}

impl Default for NotificationOptions {
    fn default() -> Self {
        Self {
            message: "Notification".to_string(),
            kind: Severity::Info,
            duration_ms: None,
            closable: true,
        }
    }
}

impl NotificationOptions {
    /// Options carrying `message` with every other field defaulted.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Set the severity.
    #[must_use]
    pub fn with_kind(mut self, kind: Severity) -> Self {
        self.kind = kind;
        self
    }

    /// Set the auto-dismiss delay.
    #[must_use]
    pub fn with_duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = Some(f64::from(duration_ms));
        self
    }

    /// Whole-millisecond auto-dismiss delay, `None` when the card persists.
    fn auto_dismiss_ms(&self, default_ms: u32) -> Option<u32> {
        let duration = self.duration_ms.unwrap_or(f64::from(default_ms));
        if duration.is_nan() || duration <= 0.0 {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let delay = duration.ceil().min(f64::from(u32::MAX)) as u32;
        Some(delay)
    }
}

pub(crate) struct LiveNotification<H: Host> {
    card: H::Node,
    timers: Vec<H::Timer>,
    _dismiss: Option<H::Listener>,
}

impl<H: Host> Qwantum<H> {
    /// Add a notification card and return its identifier.
    pub fn show_notification(&self, options: NotificationOptions) -> String {
        let host = self.host();
        let id = self.unique_id("notification", |candidate| {
            self.inner.state.borrow().notifications.contains_key(candidate)
        });
        let container = self.notification_container();
        let card = self.build_card(&id, &options);
        let (Some(container), Some(card)) = (container, card) else {
            warn!(notification_id = %id, "notification markup could not be created");
            return id;
        };

        let dismiss = if options.closable {
            host.create_element("button").map(|button| {
                host.set_inner_html(&button, "&times;");
                for (property, value) in DISMISS_STYLES {
                    host.set_style(&button, property, value);
                }
                host.append_child(&card, &button);
                let target = id.clone();
                self.on(
                    ListenTarget::Node(&button),
                    EventKind::Click,
                    ListenOptions::default(),
                    move |controller, _| controller.hide_notification(&target),
                )
            })
        } else {
            None
        };
        host.append_child(&container, &card);

        let timing = self.config().timing;
        let entering = card.clone();
        let mut timers = vec![self.after(timing.notification_enter_delay_ms, move |controller| {
            controller
                .host()
                .set_style(&entering, "transform", "translateX(0)");
        })];
        let auto_dismiss = options.auto_dismiss_ms(timing.notification_duration_ms);
        if let Some(delay) = auto_dismiss {
            let target = id.clone();
            timers.push(self.after(delay, move |controller| {
                controller.hide_notification(&target);
            }));
        }

        let _ = self.inner.state.borrow_mut().notifications.insert(
            id.clone(),
            LiveNotification {
                card,
                timers,
                _dismiss: dismiss,
            },
        );
        debug!(notification_id = %id, ?auto_dismiss, "notification shown");
        self.emit(
            UiEvent::NotificationShown {
                notification_id: id.clone(),
                message: options.message,
                severity: options.kind,
            },
            None,
        );
        id
    }

    /// Slide a live notification out and remove it after the exit animation.
    pub fn hide_notification(&self, id: &str) {
        let entry = self.inner.state.borrow_mut().notifications.remove(id);
        let Some(entry) = entry else {
            debug!(notification_id = id, "hide ignored: not a live notification");
            return;
        };
        let LiveNotification { card, timers, .. } = entry;
        drop(timers);

        let host = self.host();
        host.set_style(&card, "transform", "translateX(100%)");
        host.set_style(&card, "opacity", "0");
        let remover = host.clone();
        host.set_timeout(
            self.config().timing.notification_exit_ms,
            Box::new(move || remover.remove(&card)),
        )
        .forget();
        self.emit(
            UiEvent::NotificationHidden {
                notification_id: id.to_string(),
            },
            None,
        );
    }

    fn notification_container(&self) -> Option<H::Node> {
        let host = self.host();
        let class = &self.config().classes.notifications;
        if let Some(existing) = host.query(&Self::class_selector(class)) {
            return Some(existing);
        }
        let container = host.create_element("div")?;
        host.add_class(&container, class);
        for (property, value) in CONTAINER_STYLES {
            host.set_style(&container, property, value);
        }
        host.append_child(&host.body(), &container);
        Some(container)
    }

    fn build_card(&self, id: &str, options: &NotificationOptions) -> Option<H::Node> {
        let host = self.host();
        let classes = &self.config().classes;
        let card = host.create_element("div")?;
        host.set_attribute(&card, "id", id);
        host.add_class(&card, &classes.notification);
        host.add_class(&card, &classes.notification_kind(options.kind.as_str()));
        for (property, value) in CARD_STYLES {
            host.set_style(&card, property, value);
        }
        host.set_style(
            &card,
            "border-left",
            &format!("4px solid {}", options.kind.accent()),
        );

        let message = host.create_element("span")?;
        host.set_text(&message, &options.message);
        host.set_style(&message, "flex", "1");
        host.append_child(&card, &message);
        Some(card)
    }
}
