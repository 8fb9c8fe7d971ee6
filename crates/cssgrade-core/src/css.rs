//! Flexible top-level CSS rule extraction and matching.
//!
//! Not a CSS parser. A single pass pulls out `selector { body }` pairs, which
//! is enough for beginner stylesheets and lets the grader:
//! - find every rule for a selector, regardless of order
//! - accept repeated selectors and repeated properties
//!
//! At-rules, nested blocks and braces inside strings are out of contract.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

static RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)([^{}]+)\{(.*?)\}").expect("static rule pattern"));

/// One `selector-list { body }` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CssRule {
    /// The full selector text, trimmed but not split.
    pub selector_text: String,
    /// Individual selectors of a grouped list (`h4.tag, h5.tag`).
    pub selectors: Vec<String>,
    /// Raw text between the braces, trimmed.
    pub body: String,
}

/// Extract all top-level rules in source order.
///
/// Expects comment-free input (see [`crate::sanitize::strip_css_comments`]).
pub fn extract_rules(css: &str) -> Vec<CssRule> {
    RULE.captures_iter(css)
        .filter_map(|caps| {
            let selector_text = caps.get(1).map_or("", |m| m.as_str()).trim();
            if selector_text.is_empty() {
                return None;
            }
            let selectors = selector_text
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
            Some(CssRule {
                selector_text: selector_text.to_string(),
                selectors,
                body: caps.get(2).map_or("", |m| m.as_str()).trim().to_string(),
            })
        })
        .collect()
}

/// Bodies of all rules whose selector list contains `selector`, compared
/// case-insensitively after trimming.
pub fn bodies_for_exact<'a>(rules: &'a [CssRule], selector: &str) -> Vec<&'a str> {
    let target = selector.trim().to_lowercase();
    rules
        .iter()
        .filter(|r| r.selectors.iter().any(|s| s.trim().to_lowercase() == target))
        .map(|r| r.body.as_str())
        .collect()
}

/// Bodies of all rules whose full selector text matches `pattern`.
pub fn bodies_for_pattern<'a>(rules: &'a [CssRule], pattern: &Regex) -> Vec<&'a str> {
    rules
        .iter()
        .filter(|r| pattern.is_match(&r.selector_text))
        .map(|r| r.body.as_str())
        .collect()
}

/// Compile a case-insensitive selector pattern.
pub fn selector_regex(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// Compile `property \s* : \s* value \s* ;?` as one case-insensitive regex.
///
/// Both halves are regex fragments. Declaration boundaries are not checked,
/// so a value sitting inside an adjacent declaration can match.
pub fn declaration_regex(property: &str, value: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&format!(r"(?:{property})\s*:\s*(?:{value})\s*;?"))
        .case_insensitive(true)
        .build()
}

/// Does `body` contain the declaration anywhere?
pub fn has_declaration(body: &str, declaration: &Regex) -> bool {
    !body.is_empty() && declaration.is_match(body)
}

/// Does `body` contain any of the alternative declarations?
pub fn has_any_declaration(body: &str, alternatives: &[Regex]) -> bool {
    alternatives.iter().any(|d| has_declaration(body, d))
}
