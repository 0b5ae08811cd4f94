//! Modal dialogs: discovery, open/close, programmatic creation and removal.
//!
//! # Design
//! - At most one dialog is active; opening another closes the current one.
//! - A [`DialogHandle`] owns the dialog's listeners, so removing it from the
//!   registry unwires the dialog.
//! - Clicks count as background dismissals only when they originate on the
//!   dialog root itself, never on its content.

use qwantum_dom::{EventKind, Host, ListenOptions, ListenTarget};
use qwantum_events::UiEvent;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::controller::Qwantum;

/// Size variant rendered as the `<modal>-<size>` class. Names outside the
/// built-in set are kept as page-defined sizes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModalSize {
    /// Small.
    Sm,
    /// Medium.
    #[default]
    Md,
    /// Large.
    Lg,
    /// Extra large.
    Xl,
    /// Full viewport.
    Full,
    /// Page-defined size, e.g. `xxl`.
    Custom(String),
}

impl ModalSize {
    /// Class suffix.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
            Self::Full => "full",
            Self::Custom(name) => name,
        }
    }
}

impl From<String> for ModalSize {
    /// Blank names and names containing whitespace cannot form a class and
    /// read as [`ModalSize::Md`].
    fn from(name: String) -> Self {
        match name.trim() {
            "sm" => Self::Sm,
            "md" => Self::Md,
            "lg" => Self::Lg,
            "xl" => Self::Xl,
            "full" => Self::Full,
            other if other.is_empty() || other.contains(char::is_whitespace) => {
                debug!(size = %name, "unusable dialog size; using md");
                Self::Md
            }
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<&str> for ModalSize {
    fn from(name: &str) -> Self {
        Self::from(name.to_string())
    }
}

impl From<ModalSize> for String {
    fn from(size: ModalSize) -> Self {
        match size {
            ModalSize::Custom(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// Options accepted by [`Qwantum::create_modal`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModalOptions {
    /// Explicit identifier; generated when absent.
    pub id: Option<String>,
    /// Heading. Inserted as text, never parsed as markup, so tags in it
    /// show up literally.
    pub title: String,
    /// Body markup.
    pub content: String,
    /// Size variant.
    pub size: ModalSize,
    /// Render a close control.
    pub closable: bool,
    /// Footer markup; no footer when absent.
    pub footer: Option<String>,
}

impl Default for ModalOptions {
    fn default() -> Self {
        Self {
            id: None,
            title: "Dialog".to_string(),
            content: String::new(),
            size: ModalSize::Md,
            closable: true,
            footer: None,
        }
    }
}

/// A registered dialog and the listeners wired for it.
pub struct DialogHandle<H: Host> {
    id: String,
    root: H::Node,
    _listeners: Vec<H::Listener>,
}

impl<H: Host> DialogHandle<H> {
    /// Dialog identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Root element.
    #[must_use]
    pub fn root(&self) -> &H::Node {
        &self.root
    }
}

impl<H: Host> Qwantum<H> {
    /// Show a registered dialog, closing the active one first.
    pub fn open_modal(&self, id: &str) {
        let Some(root) = self.modal_root(id) else {
            debug!(modal_id = id, "open ignored: unknown dialog");
            return;
        };
        if let Some(active) = self.active_modal() {
            self.close_modal(&active);
        }

        let host = self.host();
        host.add_class(&root, &self.config().classes.active);
        self.lock_scroll();
        self.inner.state.borrow_mut().active_modal = Some(id.to_string());
        host.focus(&root);
        self.emit(
            UiEvent::ModalOpened {
                modal_id: id.to_string(),
            },
            Some(&root),
        );
    }

    /// Hide a registered dialog and restore page scrolling.
    pub fn close_modal(&self, id: &str) {
        let Some(root) = self.modal_root(id) else {
            debug!(modal_id = id, "close ignored: unknown dialog");
            return;
        };
        self.host()
            .remove_class(&root, &self.config().classes.active);
        self.unlock_scroll();
        {
            let mut state = self.inner.state.borrow_mut();
            if state.active_modal.as_deref() == Some(id) {
                state.active_modal = None;
            }
        }
        self.emit(
            UiEvent::ModalClosed {
                modal_id: id.to_string(),
            },
            Some(&root),
        );
    }

    /// Close every registered dialog.
    pub fn close_all_modals(&self) {
        for id in self.modal_ids() {
            self.close_modal(&id);
        }
    }

    /// Build a dialog, append it to the body and register it.
    ///
    /// An explicit id that is already registered replaces the old dialog.
    pub fn create_modal(&self, options: ModalOptions) -> String {
        let explicit = options.id.clone().filter(|id| !id.trim().is_empty());
        let id = match explicit {
            Some(id) => {
                if self.is_registered(&id) {
                    debug!(modal_id = %id, "replacing existing dialog");
                    self.destroy_modal(&id);
                }
                id
            }
            None => {
                let prefix = self.config().classes.modal.clone();
                self.unique_id(&prefix, |candidate| self.is_registered(candidate))
            }
        };

        let Some(root) = self.build_modal(&id, &options) else {
            warn!(modal_id = %id, "dialog markup could not be created");
            return id;
        };
        let host = self.host();
        host.append_child(&host.body(), &root);
        let handle = self.wire_dialog(&id, root);
        let _ = self.inner.state.borrow_mut().modals.insert(id.clone(), handle);
        debug!(modal_id = %id, size = options.size.as_str(), "dialog created");
        id
    }

    /// Close, detach and unregister a dialog.
    pub fn destroy_modal(&self, id: &str) {
        let Some(root) = self.modal_root(id) else {
            debug!(modal_id = id, "destroy ignored: unknown dialog");
            return;
        };
        self.close_modal(id);
        let handle = self.inner.state.borrow_mut().modals.remove(id);
        drop(handle);
        self.host().remove(&root);
        self.emit(
            UiEvent::ModalDestroyed {
                modal_id: id.to_string(),
            },
            None,
        );
    }

    fn build_modal(&self, id: &str, options: &ModalOptions) -> Option<H::Node> {
        let host = self.host();
        let classes = &self.config().classes;
        let element = |tag: &str, class_names: &[String]| {
            let node = host.create_element(tag)?;
            for class in class_names {
                host.add_class(&node, class);
            }
            Some(node)
        };

        let root = element(
            "div",
            &[classes.modal.clone(), classes.modal_size(options.size.as_str())],
        )?;
        host.set_attribute(&root, "id", id);
        let content = element("div", &[classes.modal_part("content")])?;
        let header = element("div", &[classes.modal_part("header")])?;
        let title = element("h3", &[classes.modal_part("title")])?;
        host.set_text(&title, &options.title);
        host.append_child(&header, &title);
        if options.closable {
            let close = element("button", &[classes.modal_close.clone()])?;
            host.set_attribute(&close, "type", "button");
            host.set_inner_html(&close, "&times;");
            host.append_child(&header, &close);
        }
        let body = element("div", &[classes.modal_part("body")])?;
        host.set_inner_html(&body, &options.content);
        host.append_child(&content, &header);
        host.append_child(&content, &body);
        if let Some(footer_markup) = &options.footer {
            let footer = element("div", &[classes.modal_part("footer")])?;
            host.set_inner_html(&footer, footer_markup);
            host.append_child(&content, &footer);
        }
        host.append_child(&root, &content);
        Some(root)
    }

    pub(crate) fn discover_modals(&self) {
        let host = self.host();
        let selector = Self::class_selector(&self.config().classes.modal);
        for root in host.query_all(&selector) {
            let Some(id) = host.attribute(&root, "id").filter(|id| !id.is_empty()) else {
                continue;
            };
            if self.is_registered(&id) {
                warn!(modal_id = %id, "duplicate dialog id skipped");
                continue;
            }
            let handle = self.wire_dialog(&id, root);
            let _ = self.inner.state.borrow_mut().modals.insert(id, handle);
        }
    }

    pub(crate) fn wire_triggers(&self) {
        let host = self.host();
        let attribute = self.config().classes.modal_trigger_attribute.clone();
        let mut listeners = Vec::new();
        for trigger in host.query_all(&format!("[{attribute}]")) {
            let Some(target) = host.attribute(&trigger, &attribute) else {
                continue;
            };
            listeners.push(self.on(
                ListenTarget::Node(&trigger),
                EventKind::Click,
                ListenOptions::prevent_default(),
                move |controller, _| controller.open_modal(&target),
            ));
        }
        self.inner.state.borrow_mut().wiring.extend(listeners);
    }

    fn wire_dialog(&self, id: &str, root: H::Node) -> DialogHandle<H> {
        let mut listeners = Vec::new();
        let background = {
            let id = id.to_string();
            let own_root = root.clone();
            self.on(
                ListenTarget::Node(&root),
                EventKind::Click,
                ListenOptions::default(),
                move |controller, event| {
                    if event.targets(&own_root) {
                        controller.close_modal(&id);
                    }
                },
            )
        };
        listeners.push(background);

        let close_selector = Self::class_selector(&self.config().classes.modal_close);
        if let Some(close) = self.host().query_in(&root, &close_selector) {
            let id = id.to_string();
            listeners.push(self.on(
                ListenTarget::Node(&close),
                EventKind::Click,
                ListenOptions::default(),
                move |controller, _| controller.close_modal(&id),
            ));
        }

        DialogHandle {
            id: id.to_string(),
            root,
            _listeners: listeners,
        }
    }
}
