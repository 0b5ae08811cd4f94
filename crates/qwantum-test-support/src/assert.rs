//! Assertions over events recorded by [`MemoryHost`].

use qwantum_dom::{MemoryHost, NodeId};
use serde_json::Value;

/// Recorded event names differ from the expected sequence.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("expected events {expected:?}, got {actual:?}")]
pub struct EventMismatch {
    /// Expected names in order.
    pub expected: Vec<String>,
    /// Names actually dispatched.
    pub actual: Vec<String>,
}

/// Check the dispatched event names, then clear the record.
///
/// # Errors
///
/// Returns [`EventMismatch`] when the names differ.
pub fn expect_events(host: &MemoryHost, expected: &[&str]) -> Result<(), EventMismatch> {
    let actual = host.dispatched_names();
    host.clear_dispatched();
    if actual.iter().map(String::as_str).eq(expected.iter().copied()) {
        Ok(())
    } else {
        Err(EventMismatch {
            expected: expected.iter().map(ToString::to_string).collect(),
            actual,
        })
    }
}

/// Detail of the most recent event called `name`.
#[must_use]
pub fn last_detail(host: &MemoryHost, name: &str) -> Option<Value> {
    host.dispatched()
        .into_iter()
        .rev()
        .find(|event| event.name == name)
        .map(|event| event.detail)
}

/// Element attached to the most recent event called `name`, with its key.
#[must_use]
pub fn last_element(host: &MemoryHost, name: &str) -> Option<(String, NodeId)> {
    host.dispatched()
        .into_iter()
        .rev()
        .find(|event| event.name == name)
        .and_then(|event| event.element)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qwantum_dom::Host;
    use serde_json::json;

    #[test]
    fn expect_events_clears_after_match() -> Result<(), EventMismatch> {
        let host = MemoryHost::new();
        host.dispatch("qw:menu:open", &json!({}), None);
        expect_events(&host, &["qw:menu:open"])?;
        expect_events(&host, &[])
    }

    #[test]
    fn mismatch_reports_both_sides() {
        let host = MemoryHost::new();
        host.dispatch("qw:menu:close", &json!({}), None);
        let err = expect_events(&host, &["qw:menu:open"]).err();
        assert_eq!(
            err,
            Some(EventMismatch {
                expected: vec!["qw:menu:open".into()],
                actual: vec!["qw:menu:close".into()],
            })
        );
    }

    #[test]
    fn last_detail_picks_latest() {
        let host = MemoryHost::new();
        let root = host.append_element(&host.body(), "div", &[]);
        host.dispatch("qw:modal:open", &json!({"modalId": "a"}), None);
        host.dispatch("qw:modal:open", &json!({"modalId": "b"}), Some(("modal", &root)));
        assert_eq!(last_detail(&host, "qw:modal:open"), Some(json!({"modalId": "b"})));
        assert_eq!(
            last_element(&host, "qw:modal:open"),
            Some(("modal".to_string(), root))
        );
        assert!(last_detail(&host, "qw:modal:close").is_none());
    }
}
