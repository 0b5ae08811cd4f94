//! Error primitives for document operations.

use thiserror::Error;

/// Errors raised while interpreting document queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// The selector used syntax the in-memory engine does not understand.
    #[error("unsupported selector '{selector}'")]
    UnsupportedSelector {
        /// Selector text supplied by the caller.
        selector: String,
    },
    /// The selector tokenizer pattern failed to compile.
    #[error("selector pattern failed to compile: {message}")]
    Pattern {
        /// Compiler diagnostic.
        message: String,
    },
}

/// Result wrapper for document operations.
pub type DomResult<T> = Result<T, DomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_selector_names_the_input() {
        let err = DomError::UnsupportedSelector {
            selector: "div > p".into(),
        };
        assert_eq!(err.to_string(), "unsupported selector 'div > p'");
    }
}
