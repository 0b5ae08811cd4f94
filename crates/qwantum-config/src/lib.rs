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

//! Controller configuration: class-name conventions, the menu collapse
//! width, reveal thresholds and animation timings.
//!
//! Layout: `defaults.rs` (default tokens), `model.rs` (typed configuration),
//! `validate.rs` (field checks), `loader.rs` (JSON entry points), `error.rs`
//! (typed failures).

pub mod defaults;
pub mod error;
pub mod loader;
pub mod model;
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use model::{ClassNames, MenuSettings, QwantumConfig, RevealSettings, TimingSettings};
