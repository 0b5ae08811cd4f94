//! Arena-backed in-memory document with a virtual clock.
//!
//! # Design
//! - Nodes live in a `Vec` for the lifetime of the document; removal only
//!   detaches them, so stale [`NodeId`]s stay valid for inspection.
//! - Callbacks (listeners, timers, observers) are cloned or taken out of the
//!   document before they run, so they may freely call back into the host.
//! - Driving hooks (`click`, `press_key`, `resize`, `advance`, `intersect`)
//!   play the role of the browser's event loop.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::{Rc, Weak};

use serde_json::Value;
use tracing::warn;

use crate::host::{
    DomEvent, EventKind, Handler, Host, IntersectionCallback, IntersectionEntry, ListenOptions,
    ListenTarget, Observer, ObserverOptions, ScrollBehavior, Timer,
};
use crate::selector::{Matchable, Selector};

const DEFAULT_VIEWPORT_WIDTH: f64 = 1280.0;

/// Handle to an element of a [`MemoryHost`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Custom event recorded by [`Host::dispatch`].
#[derive(Clone, Debug, PartialEq)]
pub struct DispatchedEvent {
    /// Event name.
    pub name: String,
    /// JSON detail payload.
    pub detail: Value,
    /// Element attached to the detail, with its key.
    pub element: Option<(String, NodeId)>,
}

/// Viewport scroll recorded by [`Host::scroll_to`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRequest {
    /// Requested absolute offset.
    pub top: f64,
    /// Requested animation mode.
    pub behavior: ScrollBehavior,
}

#[derive(Debug, Default)]
struct NodeData {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    text: String,
    inner_html: Option<String>,
    top: f64,
}

impl Matchable for NodeData {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|existing| existing == class)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    Node(NodeId),
    Document,
    Window,
}

struct ListenerEntry {
    slot: Slot,
    kind: EventKind,
    prevent_default: bool,
    handler: Handler<NodeId>,
}

struct TimerEntry {
    due: f64,
    callback: Box<dyn FnOnce()>,
}

struct ObserverEntry {
    options: ObserverOptions,
    callback: IntersectionCallback<NodeId>,
    targets: BTreeSet<NodeId>,
}

struct Document {
    nodes: Vec<NodeData>,
    listeners: BTreeMap<u64, ListenerEntry>,
    timers: BTreeMap<u64, TimerEntry>,
    observers: BTreeMap<u64, ObserverEntry>,
    dispatched: Vec<DispatchedEvent>,
    scrolls: Vec<ScrollRequest>,
    clock_ms: f64,
    viewport_width: f64,
    scroll_offset: f64,
    focused: Option<NodeId>,
    next_handle: u64,
}

impl Document {
    fn new() -> Self {
        let body = NodeData {
            tag: "body".to_string(),
            ..NodeData::default()
        };
        Self {
            nodes: vec![body],
            listeners: BTreeMap::new(),
            timers: BTreeMap::new(),
            observers: BTreeMap::new(),
            dispatched: Vec::new(),
            scrolls: Vec::new(),
            clock_ms: 0.0,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            scroll_offset: 0.0,
            focused: None,
            next_handle: 1,
        }
    }

    fn handle(&mut self) -> u64 {
        let id = self.next_handle;
        self.next_handle += 1;
        id
    }

    fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id.0)
    }

    fn is_attached(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == BODY {
                return true;
            }
            current = self.node(node).and_then(|data| data.parent);
        }
        false
    }

    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if candidate == ancestor {
                return true;
            }
            current = self.node(candidate).and_then(|data| data.parent);
        }
        false
    }

    fn detach(&mut self, id: NodeId) {
        let parent = self.node_mut(id).and_then(|data| data.parent.take());
        if let Some(parent) = parent.and_then(|parent| self.node_mut(parent)) {
            parent.children.retain(|child| *child != id);
        }
    }

    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self
            .node(root)
            .map(|data| data.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(next) = stack.pop() {
            out.push(next);
            if let Some(data) = self.node(next) {
                stack.extend(data.children.iter().rev().copied());
            }
        }
        out
    }

    fn select(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let selector = match Selector::parse(selector) {
            Ok(selector) => selector,
            Err(err) => {
                warn!(error = %err, "selector rejected");
                return Vec::new();
            }
        };
        self.descendants(root)
            .into_iter()
            .filter(|id| self.node(*id).is_some_and(|data| selector.matches(data)))
            .collect()
    }

    fn path_to_body(&self, node: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = Some(node);
        while let Some(id) = current {
            path.push(id);
            current = self.node(id).and_then(|data| data.parent);
        }
        path
    }

    fn listeners_for(&self, slot: Slot, kind: EventKind) -> Vec<u64> {
        self.listeners
            .iter()
            .filter(|(_, entry)| entry.slot == slot && entry.kind == kind)
            .map(|(id, _)| *id)
            .collect()
    }
}

const BODY: NodeId = NodeId(0);

/// In-memory [`Host`] used by native builds and tests.
#[derive(Clone)]
pub struct MemoryHost {
    doc: Rc<RefCell<Document>>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryHost {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let doc = self.doc.borrow();
        formatter
            .debug_struct("MemoryHost")
            .field("nodes", &doc.nodes.len())
            .field("listeners", &doc.listeners.len())
            .field("timers", &doc.timers.len())
            .field("clock_ms", &doc.clock_ms)
            .finish()
    }
}

impl MemoryHost {
    /// Empty document containing only a body.
    #[must_use]
    pub fn new() -> Self {
        Self {
            doc: Rc::new(RefCell::new(Document::new())),
        }
    }

    /// Create an element with classes and append it under `parent`.
    pub fn append_element(&self, parent: &NodeId, tag: &str, classes: &[&str]) -> NodeId {
        let mut doc = self.doc.borrow_mut();
        let id = NodeId(doc.nodes.len());
        doc.nodes.push(NodeData {
            tag: tag.to_ascii_lowercase(),
            parent: Some(*parent),
            classes: classes.iter().map(ToString::to_string).collect(),
            ..NodeData::default()
        });
        if let Some(parent) = doc.node_mut(*parent) {
            parent.children.push(id);
        }
        id
    }

    fn run_listeners(&self, ids: Vec<u64>, event: &DomEvent<NodeId>) -> bool {
        let mut prevented = false;
        for id in ids {
            let entry = {
                let doc = self.doc.borrow();
                doc.listeners
                    .get(&id)
                    .map(|entry| (entry.handler.clone(), entry.prevent_default))
            };
            if let Some((handler, prevent_default)) = entry {
                prevented |= prevent_default;
                handler(event);
            }
        }
        prevented
    }

    /// Click `node`, bubbling through its ancestors and then the document.
    ///
    /// Returns `true` when a listener cancelled the default action.
    pub fn click(&self, node: &NodeId) -> bool {
        let event = DomEvent {
            kind: EventKind::Click,
            target: Some(*node),
            key: None,
        };
        let path = self.doc.borrow().path_to_body(*node);
        let mut prevented = false;
        for hop in path {
            let ids = self
                .doc
                .borrow()
                .listeners_for(Slot::Node(hop), EventKind::Click);
            prevented |= self.run_listeners(ids, &event);
        }
        let ids = self
            .doc
            .borrow()
            .listeners_for(Slot::Document, EventKind::Click);
        prevented |= self.run_listeners(ids, &event);
        prevented
    }

    /// Press a key with focus on the body.
    pub fn press_key(&self, key: &str) {
        let event = DomEvent {
            kind: EventKind::KeyDown,
            target: Some(BODY),
            key: Some(key.to_string()),
        };
        let mut ids = self
            .doc
            .borrow()
            .listeners_for(Slot::Node(BODY), EventKind::KeyDown);
        ids.extend(
            self.doc
                .borrow()
                .listeners_for(Slot::Document, EventKind::KeyDown),
        );
        self.run_listeners(ids, &event);
    }

    /// Change the viewport width and fire window resize listeners.
    pub fn resize(&self, width: f64) {
        self.doc.borrow_mut().viewport_width = width;
        let event = DomEvent {
            kind: EventKind::Resize,
            target: None,
            key: None,
        };
        let ids = self
            .doc
            .borrow()
            .listeners_for(Slot::Window, EventKind::Resize);
        self.run_listeners(ids, &event);
    }

    /// Advance the virtual clock, firing due timers in deadline order.
    pub fn advance(&self, ms: u32) {
        let target = self.doc.borrow().clock_ms + f64::from(ms);
        loop {
            let next = {
                let mut doc = self.doc.borrow_mut();
                let due = doc
                    .timers
                    .iter()
                    .filter(|(_, entry)| entry.due <= target)
                    .min_by(|(a_id, a), (b_id, b)| a.due.total_cmp(&b.due).then(a_id.cmp(b_id)))
                    .map(|(id, _)| *id);
                due.and_then(|id| doc.timers.remove(&id)).map(|entry| {
                    doc.clock_ms = doc.clock_ms.max(entry.due);
                    entry.callback
                })
            };
            match next {
                Some(callback) => callback(),
                None => break,
            }
        }
        self.doc.borrow_mut().clock_ms = target;
    }

    /// Report that `ratio` of `node` is visible to every observer watching it.
    ///
    /// Observers only receive an entry when the ratio reaches their threshold
    /// (entering) or drops to zero (leaving), mirroring browser crossings.
    pub fn intersect(&self, node: &NodeId, ratio: f64) {
        let deliveries: Vec<(IntersectionCallback<NodeId>, bool)> = {
            let doc = self.doc.borrow();
            doc.observers
                .values()
                .filter(|entry| entry.targets.contains(node))
                .filter_map(|entry| {
                    if ratio > 0.0 && ratio >= entry.options.threshold {
                        Some((entry.callback.clone(), true))
                    } else if ratio <= 0.0 {
                        Some((entry.callback.clone(), false))
                    } else {
                        None
                    }
                })
                .collect()
        };
        for (callback, is_intersecting) in deliveries {
            callback(&[IntersectionEntry {
                target: *node,
                is_intersecting,
                ratio,
            }]);
        }
    }

    /// Set the layout offset reported by [`Host::top_of`].
    pub fn set_top(&self, node: &NodeId, top: f64) {
        if let Some(data) = self.doc.borrow_mut().node_mut(*node) {
            data.top = top;
        }
    }

    /// Set the vertical scroll offset.
    pub fn set_scroll_offset(&self, offset: f64) {
        self.doc.borrow_mut().scroll_offset = offset;
    }

    /// Custom events dispatched so far.
    #[must_use]
    pub fn dispatched(&self) -> Vec<DispatchedEvent> {
        self.doc.borrow().dispatched.clone()
    }

    /// Names of the custom events dispatched so far.
    #[must_use]
    pub fn dispatched_names(&self) -> Vec<String> {
        self.doc
            .borrow()
            .dispatched
            .iter()
            .map(|event| event.name.clone())
            .collect()
    }

    /// Forget recorded custom events.
    pub fn clear_dispatched(&self) {
        self.doc.borrow_mut().dispatched.clear();
    }

    /// Scroll requests issued so far.
    #[must_use]
    pub fn scroll_requests(&self) -> Vec<ScrollRequest> {
        self.doc.borrow().scrolls.clone()
    }

    /// Inline style value.
    #[must_use]
    pub fn style(&self, node: &NodeId, property: &str) -> Option<String> {
        self.doc
            .borrow()
            .node(*node)
            .and_then(|data| data.styles.get(property).cloned())
    }

    /// Text content set through [`Host::set_text`].
    #[must_use]
    pub fn text(&self, node: &NodeId) -> String {
        self.doc
            .borrow()
            .node(*node)
            .map(|data| data.text.clone())
            .unwrap_or_default()
    }

    /// Markup set through [`Host::set_inner_html`].
    #[must_use]
    pub fn inner_html(&self, node: &NodeId) -> Option<String> {
        self.doc
            .borrow()
            .node(*node)
            .and_then(|data| data.inner_html.clone())
    }

    /// Lower-case tag name.
    #[must_use]
    pub fn tag(&self, node: &NodeId) -> String {
        self.doc
            .borrow()
            .node(*node)
            .map(|data| data.tag.clone())
            .unwrap_or_default()
    }

    /// Direct children in order.
    #[must_use]
    pub fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.doc
            .borrow()
            .node(*node)
            .map(|data| data.children.clone())
            .unwrap_or_default()
    }

    /// Number of timers waiting to fire.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.doc.borrow().timers.len()
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.doc.borrow().listeners.len()
    }

    /// Whether any live observer watches `node`.
    #[must_use]
    pub fn is_observed(&self, node: &NodeId) -> bool {
        self.doc
            .borrow()
            .observers
            .values()
            .any(|entry| entry.targets.contains(node))
    }

    /// Options of every live observer.
    #[must_use]
    pub fn observer_options(&self) -> Vec<ObserverOptions> {
        self.doc
            .borrow()
            .observers
            .values()
            .map(|entry| entry.options.clone())
            .collect()
    }

    /// Element that last received focus.
    #[must_use]
    pub fn focused(&self) -> Option<NodeId> {
        self.doc.borrow().focused
    }

    /// Current virtual time.
    #[must_use]
    pub fn clock_ms(&self) -> f64 {
        self.doc.borrow().clock_ms
    }
}

/// Listener guard for [`MemoryHost`].
#[derive(Debug)]
pub struct MemoryListener {
    doc: Weak<RefCell<Document>>,
    id: u64,
}

impl Drop for MemoryListener {
    fn drop(&mut self) {
        if let Some(doc) = self.doc.upgrade() {
            doc.borrow_mut().listeners.remove(&self.id);
        }
    }
}

/// Timer guard for [`MemoryHost`].
#[derive(Debug)]
pub struct MemoryTimer {
    doc: Weak<RefCell<Document>>,
    id: u64,
    detached: bool,
}

impl Timer for MemoryTimer {
    fn forget(mut self) {
        self.detached = true;
    }
}

impl Drop for MemoryTimer {
    fn drop(&mut self) {
        if self.detached {
            return;
        }
        if let Some(doc) = self.doc.upgrade() {
            doc.borrow_mut().timers.remove(&self.id);
        }
    }
}

/// Intersection observer guard for [`MemoryHost`].
#[derive(Debug)]
pub struct MemoryObserver {
    doc: Weak<RefCell<Document>>,
    id: u64,
}

impl Observer<NodeId> for MemoryObserver {
    fn observe(&self, node: &NodeId) {
        if let Some(doc) = self.doc.upgrade() {
            if let Some(entry) = doc.borrow_mut().observers.get_mut(&self.id) {
                entry.targets.insert(*node);
            }
        }
    }

    fn unobserve(&self, node: &NodeId) {
        if let Some(doc) = self.doc.upgrade() {
            if let Some(entry) = doc.borrow_mut().observers.get_mut(&self.id) {
                entry.targets.remove(node);
            }
        }
    }
}

impl Drop for MemoryObserver {
    fn drop(&mut self) {
        if let Some(doc) = self.doc.upgrade() {
            doc.borrow_mut().observers.remove(&self.id);
        }
    }
}

impl Host for MemoryHost {
    type Node = NodeId;
    type Listener = MemoryListener;
    type Timer = MemoryTimer;
    type Observer = MemoryObserver;

    fn body(&self) -> NodeId {
        BODY
    }

    fn create_element(&self, tag: &str) -> Option<NodeId> {
        let mut doc = self.doc.borrow_mut();
        let id = NodeId(doc.nodes.len());
        doc.nodes.push(NodeData {
            tag: tag.to_ascii_lowercase(),
            ..NodeData::default()
        });
        Some(id)
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) {
        let mut doc = self.doc.borrow_mut();
        if doc.node(*parent).is_none() || doc.node(*child).is_none() {
            return;
        }
        if doc.is_ancestor(*child, *parent) {
            warn!(?parent, ?child, "refusing to append a node into its own subtree");
            return;
        }
        doc.detach(*child);
        if let Some(data) = doc.node_mut(*child) {
            data.parent = Some(*parent);
        }
        if let Some(data) = doc.node_mut(*parent) {
            data.children.push(*child);
        }
    }

    fn remove(&self, node: &NodeId) {
        if *node == BODY {
            return;
        }
        self.doc.borrow_mut().detach(*node);
    }

    fn is_attached(&self, node: &NodeId) -> bool {
        self.doc.borrow().is_attached(*node)
    }

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.doc.borrow().select(BODY, selector)
    }

    fn query_in(&self, root: &NodeId, selector: &str) -> Option<NodeId> {
        self.query_all_in(root, selector).into_iter().next()
    }

    fn query_all_in(&self, root: &NodeId, selector: &str) -> Vec<NodeId> {
        self.doc.borrow().select(*root, selector)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let doc = self.doc.borrow();
        doc.descendants(BODY).into_iter().find(|node| {
            doc.node(*node)
                .is_some_and(|data| data.attributes.get("id").is_some_and(|value| value == id))
        })
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        let doc = self.doc.borrow();
        let data = doc.node(*node)?;
        if name == "class" {
            return (!data.classes.is_empty()).then(|| data.classes.join(" "));
        }
        data.attributes.get(name).cloned()
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        if let Some(data) = self.doc.borrow_mut().node_mut(*node) {
            if name == "class" {
                data.classes = value.split_whitespace().map(ToString::to_string).collect();
            } else {
                data.attributes.insert(name.to_string(), value.to_string());
            }
        }
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        if let Some(data) = self.doc.borrow_mut().node_mut(*node) {
            if !Matchable::has_class(&*data, class) {
                data.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        if let Some(data) = self.doc.borrow_mut().node_mut(*node) {
            data.classes.retain(|existing| existing != class);
        }
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.doc
            .borrow()
            .node(*node)
            .is_some_and(|data| Matchable::has_class(data, class))
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        if let Some(data) = self.doc.borrow_mut().node_mut(*node) {
            if value.is_empty() {
                data.styles.remove(property);
            } else {
                data.styles.insert(property.to_string(), value.to_string());
            }
        }
    }

    fn clear_style(&self, node: &NodeId, property: &str) {
        if let Some(data) = self.doc.borrow_mut().node_mut(*node) {
            data.styles.remove(property);
        }
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        let mut doc = self.doc.borrow_mut();
        let children = doc
            .node_mut(*node)
            .map(|data| {
                data.text = text.to_string();
                data.inner_html = None;
                std::mem::take(&mut data.children)
            })
            .unwrap_or_default();
        for child in children {
            if let Some(data) = doc.node_mut(child) {
                data.parent = None;
            }
        }
    }

    fn set_inner_html(&self, node: &NodeId, html: &str) {
        if let Some(data) = self.doc.borrow_mut().node_mut(*node) {
            data.inner_html = Some(html.to_string());
            data.text.clear();
        }
    }

    fn focus(&self, node: &NodeId) {
        self.doc.borrow_mut().focused = Some(*node);
    }

    fn listen(
        &self,
        target: ListenTarget<'_, NodeId>,
        kind: EventKind,
        options: ListenOptions,
        handler: Handler<NodeId>,
    ) -> MemoryListener {
        let slot = match target {
            ListenTarget::Node(node) => Slot::Node(*node),
            ListenTarget::Document => Slot::Document,
            ListenTarget::Window => Slot::Window,
        };
        let mut doc = self.doc.borrow_mut();
        let id = doc.handle();
        doc.listeners.insert(
            id,
            ListenerEntry {
                slot,
                kind,
                prevent_default: options.prevent_default,
                handler,
            },
        );
        MemoryListener {
            doc: Rc::downgrade(&self.doc),
            id,
        }
    }

    fn dispatch(&self, name: &str, detail: &Value, element: Option<(&str, &NodeId)>) {
        self.doc.borrow_mut().dispatched.push(DispatchedEvent {
            name: name.to_string(),
            detail: detail.clone(),
            element: element.map(|(key, node)| (key.to_string(), *node)),
        });
    }

    fn observe_intersections(
        &self,
        options: &ObserverOptions,
        callback: IntersectionCallback<NodeId>,
    ) -> Option<MemoryObserver> {
        let mut doc = self.doc.borrow_mut();
        let id = doc.handle();
        doc.observers.insert(
            id,
            ObserverEntry {
                options: options.clone(),
                callback,
                targets: BTreeSet::new(),
            },
        );
        Some(MemoryObserver {
            doc: Rc::downgrade(&self.doc),
            id,
        })
    }

    fn now_ms(&self) -> f64 {
        self.doc.borrow().clock_ms
    }

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> MemoryTimer {
        let mut doc = self.doc.borrow_mut();
        let id = doc.handle();
        let due = doc.clock_ms + f64::from(delay_ms);
        doc.timers.insert(id, TimerEntry { due, callback });
        MemoryTimer {
            doc: Rc::downgrade(&self.doc),
            id,
            detached: false,
        }
    }

    fn viewport_width(&self) -> f64 {
        self.doc.borrow().viewport_width
    }

    fn scroll_offset(&self) -> f64 {
        self.doc.borrow().scroll_offset
    }

    fn top_of(&self, node: &NodeId) -> f64 {
        let doc = self.doc.borrow();
        doc.node(*node).map_or(0.0, |data| data.top - doc.scroll_offset)
    }

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior) {
        let mut doc = self.doc.borrow_mut();
        doc.scrolls.push(ScrollRequest { top, behavior });
        doc.scroll_offset = top;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::Cell;

    #[test]
    fn queries_follow_document_order_and_skip_detached_nodes() {
        let host = MemoryHost::new();
        let body = host.body();
        let first = host.append_element(&body, "div", &["card"]);
        let nested = host.append_element(&first, "div", &["card"]);
        let second = host.append_element(&body, "div", &["card"]);

        assert_eq!(host.query_all(".card"), vec![first, nested, second]);
        host.remove(&first);
        assert_eq!(host.query_all(".card"), vec![second]);
        assert!(!host.is_attached(&nested));
        assert_eq!(host.query_all_in(&first, ".card"), vec![nested]);
    }

    #[test]
    fn invalid_selectors_match_nothing() {
        let host = MemoryHost::new();
        host.append_element(&host.body(), "nav", &["menu"]);
        assert!(host.query("nav > a").is_none());
    }

    #[test]
    fn element_by_id_requires_attachment() {
        let host = MemoryHost::new();
        let Some(node) = host.create_element("section") else {
            panic!("memory host always creates elements");
        };
        host.set_attribute(&node, "id", "about");
        assert!(host.element_by_id("about").is_none());
        host.append_child(&host.body(), &node);
        assert_eq!(host.element_by_id("about"), Some(node));
    }

    #[test]
    fn clicks_bubble_to_ancestors_then_document() {
        let host = MemoryHost::new();
        let outer = host.append_element(&host.body(), "div", &[]);
        let inner = host.append_element(&outer, "button", &[]);
        let order = Rc::new(RefCell::new(Vec::new()));

        let record = |label: &'static str| -> Handler<NodeId> {
            let order = order.clone();
            Rc::new(move |event: &DomEvent<NodeId>| {
                order.borrow_mut().push((label, event.target));
            })
        };
        let _doc = host.listen(
            ListenTarget::Document,
            EventKind::Click,
            ListenOptions::default(),
            record("document"),
        );
        let _outer = host.listen(
            ListenTarget::Node(&outer),
            EventKind::Click,
            ListenOptions::prevent_default(),
            record("outer"),
        );
        let _inner = host.listen(
            ListenTarget::Node(&inner),
            EventKind::Click,
            ListenOptions::default(),
            record("inner"),
        );

        assert!(host.click(&inner));
        assert_eq!(
            *order.borrow(),
            vec![
                ("inner", Some(inner)),
                ("outer", Some(inner)),
                ("document", Some(inner))
            ]
        );
    }

    #[test]
    fn dropping_a_listener_unregisters_it() {
        let host = MemoryHost::new();
        let node = host.append_element(&host.body(), "a", &[]);
        let hits = Rc::new(Cell::new(0));
        let listener = {
            let hits = hits.clone();
            host.listen(
                ListenTarget::Node(&node),
                EventKind::Click,
                ListenOptions::default(),
                Rc::new(move |_: &DomEvent<NodeId>| hits.set(hits.get() + 1)),
            )
        };
        host.click(&node);
        drop(listener);
        host.click(&node);
        assert_eq!(hits.get(), 1);
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn timers_fire_in_deadline_order_and_cancel_on_drop() {
        let host = MemoryHost::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let push = |label: &'static str| -> Box<dyn FnOnce()> {
            let log = log.clone();
            Box::new(move || log.borrow_mut().push(label))
        };

        host.set_timeout(300, push("late")).forget();
        host.set_timeout(100, push("early")).forget();
        let cancelled = host.set_timeout(200, push("cancelled"));
        drop(cancelled);

        host.advance(150);
        assert_eq!(*log.borrow(), vec!["early"]);
        host.advance(150);
        assert_eq!(*log.borrow(), vec!["early", "late"]);
        assert_eq!(host.pending_timers(), 0);
        assert!((host.clock_ms() - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn timers_scheduled_from_callbacks_fire_within_the_same_advance() {
        let host = MemoryHost::new();
        let fired = Rc::new(Cell::new(false));
        let chained = {
            let host = host.clone();
            let fired = fired.clone();
            Box::new(move || {
                host.set_timeout(50, Box::new(move || fired.set(true))).forget();
            })
        };
        host.set_timeout(50, chained).forget();
        host.advance(100);
        assert!(fired.get());
    }

    #[test]
    fn observers_receive_threshold_crossings_only() {
        let host = MemoryHost::new();
        let node = host.append_element(&host.body(), "section", &[]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let observer = {
            let seen = seen.clone();
            host.observe_intersections(
                &ObserverOptions {
                    threshold: 0.5,
                    root_margin: "0px".into(),
                },
                Rc::new(move |entries: &[IntersectionEntry<NodeId>]| {
                    seen.borrow_mut()
                        .extend(entries.iter().map(|entry| entry.is_intersecting));
                }),
            )
        };
        let Some(observer) = observer else {
            panic!("memory host always creates observers");
        };

        host.intersect(&node, 0.9);
        assert!(seen.borrow().is_empty(), "unobserved nodes get nothing");

        observer.observe(&node);
        host.intersect(&node, 0.2);
        host.intersect(&node, 0.6);
        host.intersect(&node, 0.0);
        assert_eq!(*seen.borrow(), vec![true, false]);

        drop(observer);
        assert!(!host.is_observed(&node));
    }

    #[test]
    fn dispatch_and_scroll_are_recorded() {
        let host = MemoryHost::new();
        let panel = host.append_element(&host.body(), "nav", &[]);
        host.dispatch("qw:menu:open", &json!({}), Some(("mobileNav", &panel)));
        host.scroll_to(420.0, ScrollBehavior::Smooth);
        assert_eq!(host.dispatched_names(), vec!["qw:menu:open".to_string()]);
        assert_eq!(
            host.dispatched()[0].element,
            Some(("mobileNav".to_string(), panel))
        );
        assert_eq!(
            host.scroll_requests(),
            vec![ScrollRequest {
                top: 420.0,
                behavior: ScrollBehavior::Smooth
            }]
        );
        assert!((host.scroll_offset() - 420.0).abs() < f64::EPSILON);
    }

    #[test]
    fn set_text_detaches_children() {
        let host = MemoryHost::new();
        let parent = host.append_element(&host.body(), "p", &[]);
        let child = host.append_element(&parent, "span", &[]);
        host.set_text(&parent, "plain");
        assert!(host.children(&parent).is_empty());
        assert!(!host.is_attached(&child));
        assert_eq!(host.text(&parent), "plain");
    }

    #[test]
    fn append_child_refuses_cycles() {
        let host = MemoryHost::new();
        let outer = host.append_element(&host.body(), "div", &[]);
        let inner = host.append_element(&outer, "div", &[]);
        host.append_child(&inner, &outer);
        assert_eq!(host.children(&outer), vec![inner]);
        assert!(host.is_attached(&outer));
    }
}
