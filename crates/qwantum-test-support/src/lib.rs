#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    unreachable_pub,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![warn(clippy::all, clippy::pedantic)]

//! Shared test helpers used across integration suites.
//! Layout: fixtures.rs (page fixtures on the in-memory host), assert.rs (event assertions).

pub mod assert;
pub mod fixtures;

pub use assert::{EventMismatch, expect_events, last_detail, last_element};
pub use fixtures::{LandingPage, element_with_id, landing_page};
