//! The UI controller: shared state, wiring helpers and event emission.
//!
//! # Design
//! - `Qwantum` is a cheap `Rc` handle. Listener and timer closures hold a
//!   `Weak` to the same state and do nothing once the controller is gone.
//! - The state `RefCell` is never borrowed across a host call that can run
//!   controller code (dispatch, timers, observer deliveries).
//! - Every operation on an unknown identifier is a silent no-op.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use chrono::{DateTime, Utc};
use qwantum_config::QwantumConfig;
use qwantum_dom::{DomEvent, EventKind, Host, ListenOptions, ListenTarget};
use qwantum_events::{EventEnvelope, EventHub, Subscription, UiEvent, event_name};
use tracing::debug;

use crate::dialog::DialogHandle;
use crate::notify::LiveNotification;
use crate::reveal::RevealWatcher;

/// Dialog, menu, reveal and notification controller over a [`Host`].
pub struct Qwantum<H: Host> {
    pub(crate) inner: Rc<Inner<H>>,
}

impl<H: Host> Clone for Qwantum<H> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<H: Host> std::fmt::Debug for Qwantum<H> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.borrow();
        formatter
            .debug_struct("Qwantum")
            .field("modals", &state.modals.keys().collect::<Vec<_>>())
            .field("active_modal", &state.active_modal)
            .field("menu_open", &state.menu_open)
            .field("notifications", &state.notifications.len())
            .finish_non_exhaustive()
    }
}

pub(crate) struct Inner<H: Host> {
    pub(crate) host: H,
    pub(crate) config: QwantumConfig,
    pub(crate) hub: EventHub,
    pub(crate) state: RefCell<State<H>>,
}

pub(crate) struct State<H: Host> {
    pub(crate) modals: BTreeMap<String, DialogHandle<H>>,
    pub(crate) active_modal: Option<String>,
    pub(crate) menu_open: bool,
    pub(crate) wiring: Vec<H::Listener>,
    pub(crate) reveal: Option<RevealWatcher<H>>,
    pub(crate) notifications: BTreeMap<String, LiveNotification<H>>,
}

impl<H: Host> Default for State<H> {
    fn default() -> Self {
        Self {
            modals: BTreeMap::new(),
            active_modal: None,
            menu_open: false,
            wiring: Vec::new(),
            reveal: None,
            notifications: BTreeMap::new(),
        }
    }
}

impl<H: Host> Qwantum<H> {
    /// Build a controller and wire the page: dialogs and their triggers, the
    /// mobile menu, reveal animations and the global key/resize handlers.
    #[must_use]
    pub fn new(host: H, config: QwantumConfig) -> Self {
        let controller = Self {
            inner: Rc::new(Inner {
                host,
                config,
                hub: EventHub::new(),
                state: RefCell::new(State::default()),
            }),
        };
        controller.init();
        controller
    }

    /// Controller with the default configuration.
    #[must_use]
    pub fn with_defaults(host: H) -> Self {
        Self::new(host, QwantumConfig::default())
    }

    fn init(&self) {
        self.discover_modals();
        self.wire_triggers();
        self.wire_menu();
        let watched = self.watch_reveals();
        self.bind_global();
        debug!(
            modals = self.inner.state.borrow().modals.len(),
            watched, "qwantum initialised"
        );
    }

    /// The host this controller drives.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.inner.host
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &QwantumConfig {
        &self.inner.config
    }

    /// Subscribe to emitted events; see [`EventHub::subscribe`].
    #[must_use]
    pub fn subscribe(&self, callback: impl Fn(&EventEnvelope) + 'static) -> Subscription {
        self.inner.hub.subscribe(callback)
    }

    /// Identifier of the open dialog, if any.
    #[must_use]
    pub fn active_modal(&self) -> Option<String> {
        self.inner.state.borrow().active_modal.clone()
    }

    /// Registered dialog identifiers in sorted order.
    #[must_use]
    pub fn modal_ids(&self) -> Vec<String> {
        self.inner.state.borrow().modals.keys().cloned().collect()
    }

    /// Whether `id` names a registered dialog.
    #[must_use]
    pub fn is_registered(&self, id: &str) -> bool {
        self.inner.state.borrow().modals.contains_key(id)
    }

    /// Root element of a registered dialog.
    #[must_use]
    pub fn modal_root(&self, id: &str) -> Option<H::Node> {
        self.inner
            .state
            .borrow()
            .modals
            .get(id)
            .map(|handle| handle.root().clone())
    }

    /// Whether the mobile menu is open.
    #[must_use]
    pub fn is_menu_open(&self) -> bool {
        self.inner.state.borrow().menu_open
    }

    /// Identifiers of notifications that have not been hidden yet.
    #[must_use]
    pub fn live_notifications(&self) -> Vec<String> {
        self.inner
            .state
            .borrow()
            .notifications
            .keys()
            .cloned()
            .collect()
    }

    fn bind_global(&self) {
        let keys = self.on(
            ListenTarget::Document,
            EventKind::KeyDown,
            ListenOptions::default(),
            |controller, event| {
                if event.key.as_deref() != Some("Escape") {
                    return;
                }
                if let Some(active) = controller.active_modal() {
                    controller.close_modal(&active);
                }
                if controller.is_menu_open() {
                    controller.close_menu();
                }
            },
        );
        let resize = self.on(
            ListenTarget::Window,
            EventKind::Resize,
            ListenOptions::default(),
            |controller, _| {
                let width = controller.host().viewport_width();
                let limit = f64::from(controller.config().menu.collapse_above_px);
                if width > limit && controller.is_menu_open() {
                    debug!(width, "viewport widened; collapsing menu");
                    controller.close_menu();
                }
            },
        );
        self.inner.state.borrow_mut().wiring.extend([keys, resize]);
    }

    pub(crate) fn downgrade(&self) -> Weak<Inner<H>> {
        Rc::downgrade(&self.inner)
    }

    pub(crate) fn upgrade(weak: &Weak<Inner<H>>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    /// Register a listener whose action runs only while the controller lives.
    pub(crate) fn on(
        &self,
        target: ListenTarget<'_, H::Node>,
        kind: EventKind,
        options: ListenOptions,
        action: impl Fn(&Self, &DomEvent<H::Node>) + 'static,
    ) -> H::Listener {
        let weak = self.downgrade();
        self.inner.host.listen(
            target,
            kind,
            options,
            Rc::new(move |event: &DomEvent<H::Node>| {
                if let Some(controller) = Self::upgrade(&weak) {
                    action(&controller, event);
                }
            }),
        )
    }

    /// Schedule an action that runs only while the controller lives.
    pub(crate) fn after(&self, delay_ms: u32, action: impl FnOnce(&Self) + 'static) -> H::Timer {
        let weak = self.downgrade();
        self.inner.host.set_timeout(
            delay_ms,
            Box::new(move || {
                if let Some(controller) = Self::upgrade(&weak) {
                    action(&controller);
                }
            }),
        )
    }

    /// `<class>` as a class selector.
    pub(crate) fn class_selector(class: &str) -> String {
        format!(".{class}")
    }

    pub(crate) fn lock_scroll(&self) {
        let host = &self.inner.host;
        host.set_style(&host.body(), "overflow", "hidden");
    }

    pub(crate) fn unlock_scroll(&self) {
        let host = &self.inner.host;
        host.clear_style(&host.body(), "overflow");
    }

    /// Time-based identifier `<prefix>-<ms>`, suffixed `-<n>` while `taken`.
    pub(crate) fn unique_id(&self, prefix: &str, taken: impl Fn(&str) -> bool) -> String {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let stamp = self.inner.host.now_ms().max(0.0) as u64;
        let base = format!("{prefix}-{stamp}");
        let mut candidate = base.clone();
        let mut suffix = 1_u32;
        while taken(&candidate) || self.inner.host.element_by_id(&candidate).is_some() {
            candidate = format!("{base}-{suffix}");
            suffix += 1;
        }
        candidate
    }

    /// Dispatch the DOM event, with `element` in its detail when the event
    /// names a key for it, and mirror it on the hub.
    pub(crate) fn emit(&self, event: UiEvent, element: Option<&H::Node>) {
        let name = event_name(&self.inner.config.event_prefix, &event);
        let attached = event.element_key().zip(element);
        self.inner.host.dispatch(&name, &event.detail(), attached);
        #[allow(clippy::cast_possible_truncation)]
        let millis = self.inner.host.now_ms() as i64;
        let timestamp: DateTime<Utc> = DateTime::from_timestamp_millis(millis).unwrap_or_default();
        let id = self.inner.hub.publish(event, timestamp);
        debug!(event = %name, id, "ui event emitted");
    }
}
