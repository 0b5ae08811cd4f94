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

//! Logging setup shared by the Qwantum crates.
//!
//! Library code only emits `tracing` events; binaries and the browser boot
//! path call [`init_logging`] once to decide where those events go.

pub mod console;
pub mod init;

pub use init::{
    DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, init_logging, log_format_from_config,
    log_level_from_config,
};
