//! Placeholder scanning for `<$identifier>` tokens.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

// Compile-time constant pattern.
#[allow(clippy::expect_used)]
pub(crate) static PLACEHOLDER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<\$([A-Za-z0-9_]+)>").expect("constant placeholder pattern is valid")
});

/// Format the literal token for an identifier.
pub fn placeholder_token(identifier: &str) -> String {
    format!("<${}>", identifier)
}

/// Distinct placeholder identifiers in first-occurrence order.
///
/// Tokens that do not match the placeholder pattern are ignored.
pub fn extract_placeholders(text: &str) -> Vec<String> {
    let mut collector = PlaceholderCollector::default();
    collector.scan(text);
    collector.finish()
}

/// Accumulates identifiers across several texts while keeping a single
/// first-occurrence order.
#[derive(Debug, Default)]
pub(crate) struct PlaceholderCollector {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl PlaceholderCollector {
    pub(crate) fn scan(&mut self, text: &str) {
        for captures in PLACEHOLDER_PATTERN.captures_iter(text) {
            let identifier = &captures[1];
            if self.seen.insert(identifier.to_string()) {
                self.ordered.push(identifier.to_string());
            }
        }
    }

    pub(crate) fn finish(self) -> Vec<String> {
        self.ordered
    }
}
