//! The [`Host`] trait and the value types that cross it.
//!
//! # Design
//! - Guards (`Listener`, `Timer`, `Observer`) unregister themselves on drop, so
//!   ownership of a guard is ownership of the wiring.
//! - Every mutation is infallible from the caller's side; implementations log
//!   and swallow host failures.

use std::fmt::Debug;
use std::rc::Rc;

use serde_json::Value;

/// DOM events the controller listens for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Pointer click (bubbles).
    Click,
    /// Keyboard key press.
    KeyDown,
    /// Viewport resize.
    Resize,
}

impl EventKind {
    /// DOM event type string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::KeyDown => "keydown",
            Self::Resize => "resize",
        }
    }
}

/// Where a listener is attached.
#[derive(Clone, Copy, Debug)]
pub enum ListenTarget<'a, N> {
    /// A single element; receives events bubbling from descendants.
    Node(&'a N),
    /// The document; receives every bubbling event and key presses.
    Document,
    /// The window; receives viewport events.
    Window,
}

/// Per-listener options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListenOptions {
    /// Cancel the event's default action before invoking the handler.
    pub prevent_default: bool,
}

impl ListenOptions {
    /// Options that cancel the default action (links, form buttons).
    #[must_use]
    pub const fn prevent_default() -> Self {
        Self {
            prevent_default: true,
        }
    }
}

/// Event snapshot handed to listeners.
#[derive(Clone, Debug, PartialEq)]
pub struct DomEvent<N> {
    /// Event type.
    pub kind: EventKind,
    /// Element the event originated from, when it has one.
    pub target: Option<N>,
    /// Key name for keyboard events (`"Escape"`, `"Enter"`, ...).
    pub key: Option<String>,
}

impl<N: PartialEq> DomEvent<N> {
    /// Whether the event originated on `node` itself rather than a descendant.
    #[must_use]
    pub fn targets(&self, node: &N) -> bool {
        self.target.as_ref() == Some(node)
    }
}

/// Listener callback.
pub type Handler<N> = Rc<dyn Fn(&DomEvent<N>)>;

/// One intersection observation.
#[derive(Clone, Debug, PartialEq)]
pub struct IntersectionEntry<N> {
    /// Observed element.
    pub target: N,
    /// Whether the element currently intersects the root.
    pub is_intersecting: bool,
    /// Visible fraction in the range 0.0–1.0.
    pub ratio: f64,
}

/// Intersection observer callback, invoked with a batch of entries.
pub type IntersectionCallback<N> = Rc<dyn Fn(&[IntersectionEntry<N>])>;

/// Intersection observer settings.
#[derive(Clone, Debug, PartialEq)]
pub struct ObserverOptions {
    /// Visible fraction that triggers a delivery.
    pub threshold: f64,
    /// CSS margin applied to the viewport root.
    pub root_margin: String,
}

/// Scroll animation mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Jump immediately.
    Instant,
    /// Animate smoothly.
    Smooth,
}

/// Pending timer guard. Dropping it cancels the timer.
pub trait Timer: 'static {
    /// Let the timer run to completion without holding the guard.
    fn forget(self);
}

/// Intersection observer guard. Dropping it disconnects the observer.
pub trait Observer<N>: 'static {
    /// Start watching `node`.
    fn observe(&self, node: &N);
    /// Stop watching `node`.
    fn unobserve(&self, node: &N);
}

/// Document-like tree the controller manipulates.
///
/// Implementations are cheap handles; clones refer to the same document.
pub trait Host: Clone + 'static {
    /// Element handle.
    type Node: Clone + PartialEq + Debug + 'static;
    /// Event listener guard.
    type Listener: 'static;
    /// Timer guard.
    type Timer: Timer;
    /// Intersection observer guard.
    type Observer: Observer<Self::Node>;

    /// The document body.
    fn body(&self) -> Self::Node;
    /// Create a detached element.
    fn create_element(&self, tag: &str) -> Option<Self::Node>;
    /// Append `child` as the last child of `parent`.
    fn append_child(&self, parent: &Self::Node, child: &Self::Node);
    /// Detach `node` (and its subtree) from the tree.
    fn remove(&self, node: &Self::Node);
    /// Whether `node` is connected to the document.
    fn is_attached(&self, node: &Self::Node) -> bool;

    /// First attached element matching `selector`.
    fn query(&self, selector: &str) -> Option<Self::Node>;
    /// All attached elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;
    /// First descendant of `root` matching `selector`.
    fn query_in(&self, root: &Self::Node, selector: &str) -> Option<Self::Node>;
    /// All descendants of `root` matching `selector`, in document order.
    fn query_all_in(&self, root: &Self::Node, selector: &str) -> Vec<Self::Node>;
    /// Attached element carrying the given `id`.
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// Attribute value.
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    /// Set an attribute value.
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    /// Add a class token.
    fn add_class(&self, node: &Self::Node, class: &str);
    /// Remove a class token.
    fn remove_class(&self, node: &Self::Node, class: &str);
    /// Whether the class token is present.
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    /// Set an inline style property.
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);
    /// Remove an inline style property.
    fn clear_style(&self, node: &Self::Node, property: &str);
    /// Replace the node's children with a text node.
    fn set_text(&self, node: &Self::Node, text: &str);
    /// Replace the node's children with parsed markup.
    fn set_inner_html(&self, node: &Self::Node, html: &str);
    /// Move keyboard focus to the node.
    fn focus(&self, node: &Self::Node);

    /// Register an event listener.
    fn listen(
        &self,
        target: ListenTarget<'_, Self::Node>,
        kind: EventKind,
        options: ListenOptions,
        handler: Handler<Self::Node>,
    ) -> Self::Listener;
    /// Dispatch a bubbling custom event on the document. `element`, when
    /// given, is attached to the detail object under its key.
    fn dispatch(&self, name: &str, detail: &Value, element: Option<(&str, &Self::Node)>);
    /// Create an intersection observer.
    fn observe_intersections(
        &self,
        options: &ObserverOptions,
        callback: IntersectionCallback<Self::Node>,
    ) -> Option<Self::Observer>;

    /// Milliseconds since an arbitrary epoch.
    fn now_ms(&self) -> f64;
    /// Run `callback` once after `delay_ms`.
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Timer;

    /// Viewport width in CSS pixels.
    fn viewport_width(&self) -> f64;
    /// Current vertical scroll offset.
    fn scroll_offset(&self) -> f64;
    /// Distance from the viewport top to the node's top edge.
    fn top_of(&self, node: &Self::Node) -> f64;
    /// Scroll the viewport to an absolute vertical offset.
    fn scroll_to(&self, top: f64, behavior: ScrollBehavior);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_kind_strings_match_dom_names() {
        assert_eq!(EventKind::Click.as_str(), "click");
        assert_eq!(EventKind::KeyDown.as_str(), "keydown");
        assert_eq!(EventKind::Resize.as_str(), "resize");
    }

    #[test]
    fn targets_compares_origin_only() {
        let event = DomEvent {
            kind: EventKind::Click,
            target: Some(3_u8),
            key: None,
        };
        assert!(event.targets(&3));
        assert!(!event.targets(&4));
    }

    #[test]
    fn prevent_default_options_enable_flag() {
        assert!(ListenOptions::prevent_default().prevent_default);
        assert!(!ListenOptions::default().prevent_default);
    }
}
