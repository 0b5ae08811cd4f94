//! Browser-backed [`Host`] built on `web-sys` and `gloo`.

use gloo::events::{EventListener, EventListenerOptions};
use gloo::utils::{body, document, window};
use gloo_timers::callback::Timeout;
use serde_json::Value;
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{
    CustomEvent, CustomEventInit, Element, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent, NodeList,
    ScrollToOptions,
};

use crate::host::{
    DomEvent, EventKind, Handler, Host, IntersectionCallback, IntersectionEntry, ListenOptions,
    ListenTarget, Observer, ObserverOptions, ScrollBehavior, Timer,
};

/// [`Host`] over the page's live document.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebHost;

fn log_failure(operation: &'static str, err: &JsValue) {
    warn!(operation, error = ?err, "dom operation failed");
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn detail_value(detail: &Value) -> JsValue {
    serde_json::to_string(detail)
        .map_err(|err| warn!(error = %err, "event detail failed to serialize"))
        .ok()
        .and_then(|raw| {
            js_sys::JSON::parse(&raw)
                .map_err(|err| log_failure("JSON.parse", &err))
                .ok()
        })
        .unwrap_or_else(|| js_sys::Object::new().into())
}

impl Timer for Timeout {
    fn forget(self) {
        let _ = Timeout::forget(self);
    }
}

/// Intersection observer guard; disconnects on drop.
pub struct WebObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl Observer<Element> for WebObserver {
    fn observe(&self, node: &Element) {
        self.observer.observe(node);
    }

    fn unobserve(&self, node: &Element) {
        self.observer.unobserve(node);
    }
}

impl Drop for WebObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

impl Host for WebHost {
    type Node = Element;
    type Listener = EventListener;
    type Timer = Timeout;
    type Observer = WebObserver;

    fn body(&self) -> Element {
        body().into()
    }

    fn create_element(&self, tag: &str) -> Option<Element> {
        document()
            .create_element(tag)
            .map_err(|err| log_failure("create_element", &err))
            .ok()
    }

    fn append_child(&self, parent: &Element, child: &Element) {
        if let Err(err) = parent.append_child(child) {
            log_failure("append_child", &err);
        }
    }

    fn remove(&self, node: &Element) {
        node.remove();
    }

    fn is_attached(&self, node: &Element) -> bool {
        node.is_connected()
    }

    fn query(&self, selector: &str) -> Option<Element> {
        document()
            .query_selector(selector)
            .map_err(|err| log_failure("query_selector", &err))
            .ok()
            .flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        document()
            .query_selector_all(selector)
            .map_err(|err| log_failure("query_selector_all", &err))
            .map(|list| elements(&list))
            .unwrap_or_default()
    }

    fn query_in(&self, root: &Element, selector: &str) -> Option<Element> {
        root.query_selector(selector)
            .map_err(|err| log_failure("query_selector", &err))
            .ok()
            .flatten()
    }

    fn query_all_in(&self, root: &Element, selector: &str) -> Vec<Element> {
        root.query_selector_all(selector)
            .map_err(|err| log_failure("query_selector_all", &err))
            .map(|list| elements(&list))
            .unwrap_or_default()
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        document().get_element_by_id(id)
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        if let Err(err) = node.set_attribute(name, value) {
            log_failure("set_attribute", &err);
        }
    }

    fn add_class(&self, node: &Element, class: &str) {
        if let Err(err) = node.class_list().add_1(class) {
            log_failure("class_list.add", &err);
        }
    }

    fn remove_class(&self, node: &Element, class: &str) {
        if let Err(err) = node.class_list().remove_1(class) {
            log_failure("class_list.remove", &err);
        }
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        if let Some(element) = node.dyn_ref::<HtmlElement>() {
            if let Err(err) = element.style().set_property(property, value) {
                log_failure("style.set_property", &err);
            }
        }
    }

    fn clear_style(&self, node: &Element, property: &str) {
        if let Some(element) = node.dyn_ref::<HtmlElement>() {
            if let Err(err) = element.style().remove_property(property) {
                log_failure("style.remove_property", &err);
            }
        }
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn set_inner_html(&self, node: &Element, html: &str) {
        node.set_inner_html(html);
    }

    fn focus(&self, node: &Element) {
        if let Some(element) = node.dyn_ref::<HtmlElement>() {
            if let Err(err) = element.focus() {
                log_failure("focus", &err);
            }
        }
    }

    fn listen(
        &self,
        target: ListenTarget<'_, Element>,
        kind: EventKind,
        options: ListenOptions,
        handler: Handler<Element>,
    ) -> EventListener {
        let target: EventTarget = match target {
            ListenTarget::Node(node) => node.clone().into(),
            ListenTarget::Document => document().into(),
            ListenTarget::Window => window().into(),
        };
        let listener_options = if options.prevent_default {
            EventListenerOptions::enable_prevent_default()
        } else {
            EventListenerOptions::default()
        };
        let prevent_default = options.prevent_default;
        EventListener::new_with_options(&target, kind.as_str(), listener_options, move |event| {
            if prevent_default {
                event.prevent_default();
            }
            let snapshot = DomEvent {
                kind,
                target: event
                    .target()
                    .and_then(|target| target.dyn_into::<Element>().ok()),
                key: event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key),
            };
            handler(&snapshot);
        })
    }

    fn dispatch(&self, name: &str, detail: &Value, element: Option<(&str, &Element)>) {
        let value = detail_value(detail);
        if let Some((key, node)) = element {
            let node: &JsValue = node.as_ref();
            if let Err(err) = js_sys::Reflect::set(&value, &JsValue::from_str(key), node) {
                log_failure("Reflect.set", &err);
            }
        }
        let init = CustomEventInit::new();
        init.set_bubbles(true);
        init.set_detail(&value);
        match CustomEvent::new_with_event_init_dict(name, &init) {
            Ok(event) => {
                if let Err(err) = document().dispatch_event(&event) {
                    log_failure("dispatch_event", &err);
                }
            }
            Err(err) => log_failure("CustomEvent::new", &err),
        }
    }

    fn observe_intersections(
        &self,
        options: &ObserverOptions,
        callback: IntersectionCallback<Element>,
    ) -> Option<WebObserver> {
        let closure = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                let batch: Vec<IntersectionEntry<Element>> = entries
                    .iter()
                    .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| IntersectionEntry {
                        target: entry.target(),
                        is_intersecting: entry.is_intersecting(),
                        ratio: entry.intersection_ratio(),
                    })
                    .collect();
                callback(&batch);
            },
        );
        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);
        match IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init) {
            Ok(observer) => Some(WebObserver {
                observer,
                _callback: closure,
            }),
            Err(err) => {
                log_failure("IntersectionObserver::new", &err);
                None
            }
        }
    }

    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, callback)
    }

    fn viewport_width(&self) -> f64 {
        window()
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .unwrap_or_default()
    }

    fn scroll_offset(&self) -> f64 {
        window().scroll_y().unwrap_or_default()
    }

    fn top_of(&self, node: &Element) -> f64 {
        node.get_bounding_client_rect().top()
    }

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(match behavior {
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        });
        window().scroll_to_with_scroll_to_options(&options);
    }
}
