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

//! Typed UI events emitted by the Qwantum controller.
//!
//! Layout: `payloads.rs` (event enum, severity, envelope), `topics.rs`
//! (DOM event names and JSON detail payloads), `hub.rs` (in-process
//! subscriber fan-out).

pub mod hub;
pub mod payloads;
pub mod topics;

pub use hub::{EventHub, Subscription};
pub use payloads::{EventEnvelope, EventId, Severity, UiEvent};
pub use topics::{DEFAULT_PREFIX, event_name};
