//! Small helpers: manual fade-in, smooth scrolling, debounce and throttle.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use qwantum_dom::{Host, ScrollBehavior, Timer};
use tracing::debug;

use crate::controller::Qwantum;

/// Scroll destination: a selector resolved at call time, or an element.
#[derive(Clone, Debug, PartialEq)]
pub enum ScrollTarget<N> {
    /// First element matching the selector.
    Selector(String),
    /// A specific element.
    Node(N),
}

impl<N> From<&str> for ScrollTarget<N> {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_string())
    }
}

impl<N> From<String> for ScrollTarget<N> {
    fn from(selector: String) -> Self {
        Self::Selector(selector)
    }
}

/// Smooth-scroll so `target` sits `offset` pixels below the viewport top.
/// Unresolvable targets are ignored.
pub fn scroll_to<H: Host>(host: &H, target: ScrollTarget<H::Node>, offset: f64) {
    let node = match target {
        ScrollTarget::Selector(selector) => host.query(&selector),
        ScrollTarget::Node(node) => Some(node),
    };
    let Some(node) = node else {
        debug!("scroll target not found");
        return;
    };
    let top = host.top_of(&node) + host.scroll_offset() - offset;
    host.scroll_to(top, ScrollBehavior::Smooth);
}

/// Wrapper returned by [`debounce`].
pub struct Debounced<H: Host, A> {
    host: H,
    wait_ms: u32,
    callback: Rc<dyn Fn(A)>,
    pending: Rc<RefCell<Option<H::Timer>>>,
}

impl<H: Host, A> Clone for Debounced<H, A> {
    fn clone(&self) -> Self {
        Self {
            host: self.host.clone(),
            wait_ms: self.wait_ms,
            callback: self.callback.clone(),
            pending: self.pending.clone(),
        }
    }
}

impl<H: Host, A: 'static> Debounced<H, A> {
    /// Restart the quiet period; `args` replace any earlier pending call.
    pub fn call(&self, args: A) {
        let callback = self.callback.clone();
        let timer = self
            .host
            .set_timeout(self.wait_ms, Box::new(move || callback(args)));
        let previous = self.pending.borrow_mut().replace(timer);
        drop(previous);
    }

    /// Drop the pending call, if any.
    pub fn cancel(&self) {
        let pending = self.pending.borrow_mut().take();
        drop(pending);
    }
}

/// Invoke `callback` with the latest arguments once `wait_ms` pass without
/// another call.
pub fn debounce<H: Host, A: 'static>(
    host: &H,
    wait_ms: u32,
    callback: impl Fn(A) + 'static,
) -> Debounced<H, A> {
    Debounced {
        host: host.clone(),
        wait_ms,
        callback: Rc::new(callback),
        pending: Rc::new(RefCell::new(None)),
    }
}

/// Wrapper returned by [`throttle`].
pub struct Throttled<H: Host, A> {
    host: H,
    limit_ms: u32,
    callback: Rc<dyn Fn(A)>,
    blocked: Rc<Cell<bool>>,
    window: Rc<RefCell<Option<H::Timer>>>,
}

impl<H: Host, A> Clone for Throttled<H, A> {
    fn clone(&self) -> Self {
        Self {
            host: self.host.clone(),
            limit_ms: self.limit_ms,
            callback: self.callback.clone(),
            blocked: self.blocked.clone(),
            window: self.window.clone(),
        }
    }
}

impl<H: Host, A: 'static> Throttled<H, A> {
    /// Run the callback unless a window is open. Returns whether it ran.
    pub fn call(&self, args: A) -> bool {
        if self.blocked.get() {
            return false;
        }
        self.blocked.set(true);
        let blocked = self.blocked.clone();
        let timer = self
            .host
            .set_timeout(self.limit_ms, Box::new(move || blocked.set(false)));
        let previous = self.window.borrow_mut().replace(timer);
        drop(previous);
        (self.callback)(args);
        true
    }
}

/// Invoke `callback` at most once per `limit_ms`; calls inside the window
/// are dropped.
pub fn throttle<H: Host, A: 'static>(
    host: &H,
    limit_ms: u32,
    callback: impl Fn(A) + 'static,
) -> Throttled<H, A> {
    Throttled {
        host: host.clone(),
        limit_ms,
        callback: Rc::new(callback),
        blocked: Rc::new(Cell::new(false)),
        window: Rc::new(RefCell::new(None)),
    }
}

impl<H: Host> Qwantum<H> {
    /// Tag `node` for the reveal animation and show it after the fade-in
    /// delay, without waiting for it to scroll into view.
    pub fn fade_in(&self, node: &H::Node) {
        let host = self.host().clone();
        let classes = &self.config().classes;
        host.add_class(node, &classes.animate);
        let visible = classes.visible.clone();
        let target = node.clone();
        let revealer = host.clone();
        host.set_timeout(
            self.config().timing.fade_in_delay_ms,
            Box::new(move || revealer.add_class(&target, &visible)),
        )
        .forget();
    }

    /// See [`scroll_to`].
    pub fn scroll_to(&self, target: ScrollTarget<H::Node>, offset: f64) {
        scroll_to(self.host(), target, offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qwantum_dom::{MemoryHost, ScrollRequest};

    #[test]
    fn scroll_to_accounts_for_offset_and_current_scroll() {
        let host = MemoryHost::new();
        let section = host.append_element(&host.body(), "section", &["pricing"]);
        host.set_top(&section, 900.0);
        host.set_scroll_offset(100.0);
        scroll_to(&host, ".pricing".into(), 80.0);
        assert_eq!(
            host.scroll_requests(),
            vec![ScrollRequest {
                top: 820.0,
                behavior: ScrollBehavior::Smooth,
            }]
        );
    }

    #[test]
    fn scroll_to_missing_target_is_ignored() {
        let host = MemoryHost::new();
        scroll_to(&host, "#nowhere".into(), 0.0);
        assert!(host.scroll_requests().is_empty());
    }

    #[test]
    fn debounce_coalesces_to_latest_call() {
        let host = MemoryHost::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let debounced = {
            let seen = seen.clone();
            debounce(&host, 200, move |value: u32| seen.borrow_mut().push(value))
        };
        debounced.call(1);
        host.advance(150);
        debounced.call(2);
        host.advance(150);
        debounced.call(3);
        assert!(seen.borrow().is_empty());
        host.advance(200);
        assert_eq!(*seen.borrow(), vec![3]);
    }

    #[test]
    fn debounce_cancel_drops_pending_call() {
        let host = MemoryHost::new();
        let hits = Rc::new(Cell::new(0));
        let debounced = {
            let hits = hits.clone();
            debounce(&host, 50, move |()| hits.set(hits.get() + 1))
        };
        debounced.call(());
        debounced.cancel();
        host.advance(100);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn throttle_drops_calls_inside_window() {
        let host = MemoryHost::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let throttled = {
            let seen = seen.clone();
            throttle(&host, 100, move |value: u32| seen.borrow_mut().push(value))
        };
        assert!(throttled.call(1));
        assert!(!throttled.call(2));
        host.advance(99);
        assert!(!throttled.call(3));
        host.advance(1);
        assert!(throttled.call(4));
        assert_eq!(*seen.borrow(), vec![1, 4]);
    }

    #[test]
    fn fade_in_reveals_after_delay() {
        let host = MemoryHost::new();
        let node = host.append_element(&host.body(), "div", &[]);
        let qw = Qwantum::with_defaults(host.clone());
        qw.fade_in(&node);
        assert!(host.has_class(&node, "qw-animate-fade-up"));
        assert!(!host.has_class(&node, "qw-visible"));
        host.advance(100);
        assert!(host.has_class(&node, "qw-visible"));
    }
}
