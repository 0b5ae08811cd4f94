#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    unreachable_pub,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! Qwantum page controller: modal dialogs, the mobile burger menu,
//! reveal-on-scroll animations and transient notifications.
//! Layout: controller.rs (state, wiring, emission), dialog.rs, menu.rs,
//! reveal.rs, notify.rs, utils.rs (fade-in, scroll, debounce, throttle),
//! bindings.rs (wasm32 JavaScript surface).
//!
//! The controller is generic over [`qwantum_dom::Host`]; browsers use
//! `WebHost`, tests and native tools use [`qwantum_dom::MemoryHost`].

mod controller;
mod dialog;
mod menu;
mod notify;
mod reveal;
mod utils;

#[cfg(target_arch = "wasm32")]
mod bindings;

#[cfg(target_arch = "wasm32")]
pub use bindings::{QwantumHandle, boot};
pub use controller::Qwantum;
pub use dialog::{DialogHandle, ModalOptions, ModalSize};
pub use notify::NotificationOptions;
pub use qwantum_config::QwantumConfig;
pub use qwantum_events::{EventEnvelope, Severity, UiEvent};
pub use utils::{Debounced, ScrollTarget, Throttled, debounce, scroll_to, throttle};
