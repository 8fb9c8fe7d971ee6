//! Light HTML checks: `<head>` extraction and stylesheet links.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

static HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<head\b[^>]*>(.*?)</head>").expect("static head pattern")
});

static LINK_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<link\b[^>]*>").expect("static link pattern"));

static REL_STYLESHEET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\brel\s*=\s*["']stylesheet["']"#).expect("static rel pattern")
});

/// Inner text of the first `<head>` element, or `""` when there is none.
pub fn head_section(html: &str) -> &str {
    HEAD.captures(html)
        .and_then(|c| c.get(1))
        .map_or("", |m| m.as_str())
}

/// Does `head` contain a `<link>` with `rel="stylesheet"` and an `href` of
/// exactly `href` or `./href`? Attribute order and quote style are free.
pub fn has_stylesheet_link(head: &str, href: &str) -> bool {
    let Ok(href_re) = RegexBuilder::new(&format!(
        r#"\bhref\s*=\s*["'](\./)?{}["']"#,
        regex::escape(href)
    ))
    .case_insensitive(true)
    .build() else {
        return false;
    };

    LINK_TAG
        .find_iter(head)
        .any(|tag| REL_STYLESHEET.is_match(tag.as_str()) && href_re.is_match(tag.as_str()))
}
