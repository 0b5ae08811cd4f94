//! Burger-triggered mobile menu.
//!
//! Elements are looked up on every call, so markup swapped in after
//! initialisation is still honoured.

use qwantum_dom::{EventKind, Host, ListenOptions, ListenTarget};
use qwantum_events::UiEvent;
use tracing::debug;

use crate::controller::Qwantum;

struct MenuParts<N> {
    burger: Option<N>,
    panel: Option<N>,
    overlay: Option<N>,
}

impl<N> MenuParts<N> {
    fn present(&self) -> impl Iterator<Item = &N> {
        [&self.burger, &self.panel, &self.overlay]
            .into_iter()
            .flatten()
    }
}

impl<H: Host> Qwantum<H> {
    fn menu_parts(&self) -> MenuParts<H::Node> {
        let host = self.host();
        let classes = &self.config().classes;
        MenuParts {
            burger: host.query(&Self::class_selector(&classes.burger)),
            panel: host.query(&Self::class_selector(&classes.nav_mobile)),
            overlay: host.query(&Self::class_selector(&classes.overlay)),
        }
    }

    /// Open the menu when closed, close it when open.
    pub fn toggle_menu(&self) {
        if self.is_menu_open() {
            self.close_menu();
        } else {
            self.open_menu();
        }
    }

    /// Mark the burger, panel and backdrop active and lock page scrolling.
    pub fn open_menu(&self) {
        let active = &self.config().classes.active;
        let parts = self.menu_parts();
        for node in parts.present() {
            self.host().add_class(node, active);
        }
        self.lock_scroll();
        self.inner.state.borrow_mut().menu_open = true;
        self.emit(UiEvent::MenuOpened, parts.panel.as_ref());
    }

    /// Reverse [`Qwantum::open_menu`].
    pub fn close_menu(&self) {
        let active = &self.config().classes.active;
        let parts = self.menu_parts();
        for node in parts.present() {
            self.host().remove_class(node, active);
        }
        self.unlock_scroll();
        self.inner.state.borrow_mut().menu_open = false;
        self.emit(UiEvent::MenuClosed, parts.panel.as_ref());
    }

    pub(crate) fn wire_menu(&self) {
        let parts = self.menu_parts();
        let (Some(burger), Some(panel)) = (parts.burger, parts.panel) else {
            debug!("no burger menu on page");
            return;
        };
        let host = self.host();
        let overlay = parts.overlay.or_else(|| {
            let overlay = host.create_element("div")?;
            host.add_class(&overlay, &self.config().classes.overlay);
            host.append_child(&host.body(), &overlay);
            debug!("menu backdrop created");
            Some(overlay)
        });

        let mut listeners = vec![self.on(
            ListenTarget::Node(&burger),
            EventKind::Click,
            ListenOptions::default(),
            |controller, _| controller.toggle_menu(),
        )];
        if let Some(overlay) = &overlay {
            listeners.push(self.on(
                ListenTarget::Node(overlay),
                EventKind::Click,
                ListenOptions::default(),
                |controller, _| controller.close_menu(),
            ));
        }
        let link_selector = Self::class_selector(&self.config().classes.nav_link);
        for link in host.query_all_in(&panel, &link_selector) {
            listeners.push(self.on(
                ListenTarget::Node(&link),
                EventKind::Click,
                ListenOptions::default(),
                |controller, _| controller.close_menu(),
            ));
        }
        self.inner.state.borrow_mut().wiring.extend(listeners);
    }
}
