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

//! Document abstraction used by the Qwantum controller.
//!
//! Layout: `host.rs` (the [`Host`] trait and event/observer value types),
//! `selector.rs` (compound selector parsing for the in-memory tree),
//! `memory.rs` (arena-backed [`MemoryHost`] with a virtual clock),
//! `web.rs` (browser-backed `WebHost`, `wasm32` only).

pub mod error;
pub mod host;
pub mod memory;
pub mod selector;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{DomError, DomResult};
pub use host::{
    DomEvent, EventKind, Handler, Host, IntersectionCallback, IntersectionEntry, ListenOptions,
    ListenTarget, Observer, ObserverOptions, ScrollBehavior, Timer,
};
pub use memory::{DispatchedEvent, MemoryHost, NodeId, ScrollRequest};
pub use selector::Selector;

#[cfg(target_arch = "wasm32")]
pub use web::WebHost;
