//! JavaScript surface exported through `wasm-bindgen`.
//!
//! # Design
//! - Option objects cross the boundary as JSON; anything that fails to
//!   deserialise falls back to defaults with a warning.
//! - `boot` publishes the controller as `window.qw` once the document is parsed.

use gloo::events::EventListener;
use gloo::utils::{document, window};
use qwantum_config::QwantumConfig;
use qwantum_dom::WebHost;
use qwantum_telemetry::{
    DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, init_logging, log_format_from_config,
    log_level_from_config,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::controller::Qwantum;
use crate::dialog::ModalOptions;
use crate::notify::NotificationOptions;
use crate::utils::ScrollTarget;

const CONFIG_ELEMENT_ID: &str = "qw-config";

fn json_from_js(value: &JsValue) -> Option<Value> {
    if value.is_undefined() || value.is_null() {
        return None;
    }
    let raw = js_sys::JSON::stringify(value)
        .ok()
        .and_then(|raw| raw.as_string())?;
    serde_json::from_str(&raw)
        .map_err(|err| warn!(error = %err, "javascript value is not valid JSON"))
        .ok()
}

fn options_from_js<T: DeserializeOwned + Default>(value: &JsValue, kind: &'static str) -> T {
    json_from_js(value)
        .and_then(|json| {
            serde_json::from_value(json)
                .map_err(|err| warn!(kind, error = %err, "invalid options; using defaults"))
                .ok()
        })
        .unwrap_or_default()
}

fn config_from_json(json: Option<Value>) -> QwantumConfig {
    json.and_then(|json| {
        QwantumConfig::from_value(json)
            .map_err(|err| warn!(error = %err, "invalid configuration; using defaults"))
            .ok()
    })
    .unwrap_or_default()
}

/// Controller handle exposed to page scripts as `Qwantum`.
#[wasm_bindgen(js_name = Qwantum)]
pub struct QwantumHandle {
    controller: Qwantum<WebHost>,
}

#[wasm_bindgen(js_class = Qwantum)]
impl QwantumHandle {
    /// Wire the current document. `config` is an optional configuration object.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(config: JsValue) -> Self {
        let config = config_from_json(json_from_js(&config));
        Self {
            controller: Qwantum::new(WebHost, config),
        }
    }

    /// Open a dialog by id.
    #[wasm_bindgen(js_name = openModal)]
    pub fn open_modal(&self, id: &str) {
        self.controller.open_modal(id);
    }

    /// Close a dialog by id.
    #[wasm_bindgen(js_name = closeModal)]
    pub fn close_modal(&self, id: &str) {
        self.controller.close_modal(id);
    }

    /// Close every registered dialog.
    #[wasm_bindgen(js_name = closeAllModals)]
    pub fn close_all_modals(&self) {
        self.controller.close_all_modals();
    }

    /// Create a dialog from an options object and return its id.
    #[wasm_bindgen(js_name = createModal)]
    pub fn create_modal(&self, options: JsValue) -> String {
        let options: ModalOptions = options_from_js(&options, "modal");
        self.controller.create_modal(options)
    }

    /// Remove a dialog by id.
    #[wasm_bindgen(js_name = destroyModal)]
    pub fn destroy_modal(&self, id: &str) {
        self.controller.destroy_modal(id);
    }

    /// Toggle the mobile menu.
    #[wasm_bindgen(js_name = toggleMobileMenu)]
    pub fn toggle_mobile_menu(&self) {
        self.controller.toggle_menu();
    }

    /// Open the mobile menu.
    #[wasm_bindgen(js_name = openMobileMenu)]
    pub fn open_mobile_menu(&self) {
        self.controller.open_menu();
    }

    /// Close the mobile menu.
    #[wasm_bindgen(js_name = closeMobileMenu)]
    pub fn close_mobile_menu(&self) {
        self.controller.close_menu();
    }

    /// Show a notification from an options object and return its id.
    #[wasm_bindgen(js_name = showNotification)]
    pub fn show_notification(&self, options: JsValue) -> String {
        let options: NotificationOptions = options_from_js(&options, "notification");
        self.controller.show_notification(options)
    }

    /// Hide a notification by id.
    #[wasm_bindgen(js_name = hideNotification)]
    pub fn hide_notification(&self, id: &str) {
        self.controller.hide_notification(id);
    }

    /// Reveal an element without waiting for it to scroll into view.
    #[wasm_bindgen(js_name = fadeIn)]
    pub fn fade_in(&self, element: &Element) {
        self.controller.fade_in(element);
    }

    /// Smooth-scroll to a selector or element.
    #[wasm_bindgen(js_name = scrollTo)]
    pub fn scroll_to(&self, target: JsValue, offset: Option<f64>) {
        let target = if let Some(selector) = target.as_string() {
            ScrollTarget::Selector(selector)
        } else if let Ok(element) = target.dyn_into::<Element>() {
            ScrollTarget::Node(element)
        } else {
            warn!("scrollTo expects a selector or an element");
            return;
        };
        self.controller.scroll_to(target, offset.unwrap_or_default());
    }

    /// Observe elements tagged for the reveal animation since the last call.
    #[wasm_bindgen(js_name = refreshAnimations)]
    pub fn refresh_animations(&self) -> u32 {
        u32::try_from(self.controller.watch_reveals()).unwrap_or(u32::MAX)
    }

    /// Identifier of the open dialog.
    #[wasm_bindgen(getter, js_name = activeModal)]
    pub fn active_modal(&self) -> Option<String> {
        self.controller.active_modal()
    }

    /// Whether the mobile menu is open.
    #[wasm_bindgen(getter, js_name = menuOpen)]
    pub fn menu_open(&self) -> bool {
        self.controller.is_menu_open()
    }
}

fn embedded_config() -> Option<Value> {
    let raw = document()
        .get_element_by_id(CONFIG_ELEMENT_ID)?
        .text_content()?;
    serde_json::from_str(&raw)
        .map_err(|err| warn!(error = %err, "qw-config is not valid JSON"))
        .ok()
}

fn install_telemetry(config: Option<&Value>) {
    console_error_panic_hook::set_once();
    let logging = LoggingConfig {
        level: log_level_from_config(config).unwrap_or(DEFAULT_LOG_LEVEL),
        format: log_format_from_config(config).unwrap_or(LogFormat::Compact),
    };
    if let Err(err) = init_logging(&logging) {
        gloo::console::warn!(err.to_string());
    }
}

fn start(config: Option<Value>) {
    let controller = QwantumHandle {
        controller: Qwantum::new(WebHost, config_from_json(config)),
    };
    let published = js_sys::Reflect::set(&window(), &JsValue::from_str("qw"), &controller.into());
    if let Err(err) = published {
        warn!(error = ?err, "failed to publish window.qw");
        return;
    }
    info!("qwantum ready");
}

/// Install telemetry, then build the controller and publish it as
/// `window.qw` once the document has been parsed.
#[wasm_bindgen]
pub fn boot() {
    let config = embedded_config();
    install_telemetry(config.as_ref());
    if document().ready_state() == "loading" {
        EventListener::once(&document(), "DOMContentLoaded", move |_| start(config)).forget();
    } else {
        start(config);
    }
}
