//! Compound selector parsing for the in-memory document.
//!
//! Only a single compound selector is understood: an optional tag followed by
//! any mix of `#id`, `.class`, `[attr]` and `[attr=value]`. Combinators and
//! pseudo-classes are rejected.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{DomError, DomResult};

const TOKEN_PATTERN: &str = r#"^(?:(?P<tag>[A-Za-z][A-Za-z0-9-]*)|#(?P<id>[A-Za-z0-9_-]+)|\.(?P<class>[A-Za-z0-9_-]+)|\[(?P<attr>[A-Za-z0-9_:-]+)(?:=(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|(?P<bare>[^\]"']*)))?\])"#;

static TOKEN: Lazy<Result<Regex, regex::Error>> = Lazy::new(|| Regex::new(TOKEN_PATTERN));

/// Element view the selector is matched against.
pub trait Matchable {
    /// Lower-case tag name.
    fn tag(&self) -> &str;
    /// Attribute value, if present.
    fn attribute(&self, name: &str) -> Option<&str>;
    /// Whether the class token is present.
    fn has_class(&self, class: &str) -> bool;
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct AttributeMatch {
    name: String,
    value: Option<String>,
}

/// Parsed compound selector.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeMatch>,
}

impl Selector {
    /// Parse selector text.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::UnsupportedSelector`] for empty input, combinators,
    /// pseudo-classes or any other syntax outside the compound subset.
    pub fn parse(input: &str) -> DomResult<Self> {
        let token = TOKEN.as_ref().map_err(|err| DomError::Pattern {
            message: err.to_string(),
        })?;
        let unsupported = || DomError::UnsupportedSelector {
            selector: input.to_string(),
        };

        let mut rest = input.trim();
        if rest.is_empty() {
            return Err(unsupported());
        }

        let mut selector = Self::default();
        let mut first = true;
        while !rest.is_empty() {
            let captures = token.captures(rest).ok_or_else(unsupported)?;
            let consumed = captures.get(0).map_or(0, |whole| whole.end());
            if consumed == 0 {
                return Err(unsupported());
            }

            if let Some(tag) = captures.name("tag") {
                if !first {
                    return Err(unsupported());
                }
                selector.tag = Some(tag.as_str().to_ascii_lowercase());
            } else if let Some(id) = captures.name("id") {
                selector.id = Some(id.as_str().to_string());
            } else if let Some(class) = captures.name("class") {
                selector.classes.push(class.as_str().to_string());
            } else if let Some(name) = captures.name("attr") {
                let value = captures
                    .name("dq")
                    .or_else(|| captures.name("sq"))
                    .or_else(|| captures.name("bare"))
                    .map(|value| value.as_str().to_string());
                selector.attributes.push(AttributeMatch {
                    name: name.as_str().to_string(),
                    value,
                });
            }

            rest = &rest[consumed..];
            first = false;
        }

        Ok(selector)
    }

    /// Whether `element` satisfies every part of the selector.
    #[must_use]
    pub fn matches(&self, element: &impl Matchable) -> bool {
        if let Some(tag) = &self.tag {
            if element.tag() != tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.attribute("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|class| element.has_class(class)) {
            return false;
        }
        self.attributes
            .iter()
            .all(|attr| match (element.attribute(&attr.name), &attr.value) {
                (Some(actual), Some(expected)) => actual == expected,
                (Some(_), None) => true,
                (None, _) => false,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    struct Fake {
        tag: &'static str,
        attributes: BTreeMap<&'static str, &'static str>,
        classes: Vec<&'static str>,
    }

    impl Matchable for Fake {
        fn tag(&self) -> &str {
            self.tag
        }

        fn attribute(&self, name: &str) -> Option<&str> {
            self.attributes.get(name).copied()
        }

        fn has_class(&self, class: &str) -> bool {
            self.classes.contains(&class)
        }
    }

    fn trigger() -> Fake {
        Fake {
            tag: "button",
            attributes: BTreeMap::from([("id", "open"), ("data-qw-modal", "signup")]),
            classes: vec!["btn", "btn-primary"],
        }
    }

    #[test]
    fn compound_selectors_match_every_part() -> DomResult<()> {
        let element = trigger();
        assert!(Selector::parse(".btn")?.matches(&element));
        assert!(Selector::parse("button.btn.btn-primary")?.matches(&element));
        assert!(Selector::parse("#open")?.matches(&element));
        assert!(Selector::parse("[data-qw-modal]")?.matches(&element));
        assert!(Selector::parse("[data-qw-modal=\"signup\"]")?.matches(&element));
        assert!(Selector::parse("[data-qw-modal='signup']")?.matches(&element));
        assert!(Selector::parse("[data-qw-modal=signup]")?.matches(&element));
        Ok(())
    }

    #[test]
    fn mismatches_are_rejected() -> DomResult<()> {
        let element = trigger();
        assert!(!Selector::parse("div")?.matches(&element));
        assert!(!Selector::parse(".btn.missing")?.matches(&element));
        assert!(!Selector::parse("#other")?.matches(&element));
        assert!(!Selector::parse("[data-qw-modal=login]")?.matches(&element));
        assert!(!Selector::parse("[href]")?.matches(&element));
        Ok(())
    }

    #[test]
    fn unsupported_syntax_errors() {
        for input in ["", "   ", "nav a", "div > p", "a:hover", ".a,.b", ".btn div"] {
            assert_eq!(
                Selector::parse(input),
                Err(DomError::UnsupportedSelector {
                    selector: input.to_string()
                }),
                "input {input:?}"
            );
        }
    }
}
