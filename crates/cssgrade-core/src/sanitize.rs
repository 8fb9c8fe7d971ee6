//! Comment stripping.
//!
//! Runs before any matching so that example code left inside comments can
//! never satisfy a check. Comment markers inside string literals are not
//! special-cased.

use std::sync::LazyLock;

use regex::Regex;

static HTML_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("static HTML comment pattern"));

static CSS_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("static CSS comment pattern"));

/// Drop a leading byte-order mark so it never sticks to the first selector.
fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{FEFF}').unwrap_or(text)
}

/// Remove every `<!-- ... -->` span.
pub fn strip_html_comments(html: &str) -> String {
    HTML_COMMENT.replace_all(strip_bom(html), "").into_owned()
}

/// Remove every `/* ... */` span.
pub fn strip_css_comments(css: &str) -> String {
    CSS_COMMENT.replace_all(strip_bom(css), "").into_owned()
}
