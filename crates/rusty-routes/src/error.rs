//! Errors raised while compiling or registering route rules
//!
//! Matching and reverse generation never produce errors: an unmatched URL is
//! `None`, an unknown route name is `None`, and a malformed regex constraint
//! is treated as always satisfied.

use thiserror::Error;

/// Rule compilation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// A pattern declared more than one `:name*` wildcard segment
    #[error("route `{name}` has {count} wildcard segments in `{pattern}`, at most one is allowed")]
    MultipleWildcards {
        name: String,
        pattern: String,
        count: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiple_wildcards_message() {
        let err = RouterError::MultipleWildcards {
            name: "files".to_string(),
            pattern: "/:a*/:b*".to_string(),
            count: 2,
        };
        assert_eq!(
            err.to_string(),
            "route `files` has 2 wildcard segments in `/:a*/:b*`, at most one is allowed"
        );
    }
}
