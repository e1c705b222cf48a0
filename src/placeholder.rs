/*!
 * Placeholder token pattern shared by the scanner and the substitution engine.
 *
 * A placeholder is a `{`, one or more characters that are neither `{` nor `}`,
 * and a closing `}`. Nested braces never match as a whole: in `{A{B}}` only
 * `{B}` is a token.
 */

use regex::Regex;
use once_cell::sync::Lazy;

/// Regex for matching placeholder tokens
static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{[^{}]+\}").expect("Invalid placeholder regex")
});

/// A placeholder occurrence inside a logical text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderMatch {
    /// Byte offset of the opening brace
    pub start: usize,
    /// Byte offset just past the closing brace
    pub end: usize,
    /// The token text, braces included
    pub token: String,
}

impl PlaceholderMatch {
    /// Length of the matched span in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span is empty (never true for a regex match)
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Find all non-overlapping placeholder matches, left to right
pub fn find_placeholders(text: &str) -> Vec<PlaceholderMatch> {
    PLACEHOLDER_REGEX
        .find_iter(text)
        .map(|m| PlaceholderMatch {
            start: m.start(),
            end: m.end(),
            token: m.as_str().to_string(),
        })
        .collect()
}

/// Iterate over the token strings in a text without allocating match records
pub fn tokens_in(text: &str) -> impl Iterator<Item = &str> {
    PLACEHOLDER_REGEX.find_iter(text).map(|m| m.as_str())
}

/// Check whether a string is exactly one placeholder token
pub fn is_placeholder(candidate: &str) -> bool {
    PLACEHOLDER_REGEX
        .find(candidate)
        .is_some_and(|m| m.start() == 0 && m.end() == candidate.len())
}
