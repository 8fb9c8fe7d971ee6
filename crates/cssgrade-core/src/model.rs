//! Core data model types for cssgrade.
//!
//! A rubric is plain data: items with marks and an ordered list of checks.
//! Checks describe *what* to look for; [`crate::engine`] decides how.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A complete marking rubric for one lab.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rubric {
    /// Unique identifier (e.g. "3-1-css-basics").
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description shown to rubric authors.
    #[serde(default)]
    pub description: String,
    /// The gradable items, in report order.
    #[serde(default)]
    pub items: Vec<RubricItem>,
}

impl Rubric {
    /// Sum of all item marks.
    pub fn total_marks(&self) -> f64 {
        self.items.iter().map(|i| i.marks).sum()
    }
}

/// One gradable unit of the assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RubricItem {
    /// Unique identifier (e.g. "todo3").
    pub id: String,
    /// Display name used in feedback.
    pub name: String,
    /// Maximum marks for this item.
    pub marks: f64,
    /// Which submitted file governs this item.
    pub source: SourceKind,
    /// Required checks, all weighted equally.
    #[serde(default)]
    pub checks: Vec<CheckSpec>,
}

/// The kind of student file an item is graded against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Html,
    Css,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Html => write!(f, "HTML"),
            SourceKind::Css => write!(f, "CSS"),
        }
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(SourceKind::Html),
            "css" => Ok(SourceKind::Css),
            other => Err(format!("unknown source kind: {other}")),
        }
    }
}

/// A single labelled pass/fail condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckSpec {
    /// Label shown in the checklist.
    pub label: String,
    /// What the check looks for.
    pub kind: CheckKind,
}

/// What a check looks for.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum CheckKind {
    /// At least one rule matches any of the selectors.
    RuleExists { selectors: Vec<SelectorQuery> },
    /// Some rule matching the selectors carries one of the declarations.
    Declaration {
        selectors: Vec<SelectorQuery>,
        any_of: Vec<DeclPattern>,
    },
    /// The HTML document has a non-empty `<head>`.
    HeadPresent,
    /// `<head>` contains `<link rel="stylesheet">` pointing at `href`
    /// (optionally prefixed with `./`).
    StylesheetLink { href: String },
}

impl CheckKind {
    /// Which source file this kind of check reads.
    pub fn source(&self) -> SourceKind {
        match self {
            CheckKind::RuleExists { .. } | CheckKind::Declaration { .. } => SourceKind::Css,
            CheckKind::HeadPresent | CheckKind::StylesheetLink { .. } => SourceKind::Html,
        }
    }
}

/// How a check finds the rules it inspects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorQuery {
    /// One selector of a grouped list equals this, ignoring case.
    Exact(String),
    /// The whole selector text matches this regular expression.
    Pattern(String),
}

impl fmt::Display for SelectorQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorQuery::Exact(s) => write!(f, "{s}"),
            SelectorQuery::Pattern(p) => write!(f, "/{p}/"),
        }
    }
}

/// One accepted `property: value` form, both as regular expressions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclPattern {
    pub property: String,
    pub value: String,
}

impl DeclPattern {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}
