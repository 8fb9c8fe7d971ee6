//! TOML rubric parser.
//!
//! Loads rubrics from TOML files, ships the built-in lab rubric, and
//! validates rubrics for authoring mistakes.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{
    CheckKind, CheckSpec, DeclPattern, Rubric, RubricItem, SelectorQuery, SourceKind,
};

/// The rubric for lab 3-1 (CSS basics), embedded at build time.
pub const BUILTIN_RUBRIC_TOML: &str = include_str!("../rubrics/css-basics.toml");

/// Marks the built-in rubric distributes across its items.
pub const EXPECTED_ITEM_MARKS: f64 = 80.0;

/// Intermediate TOML structure for parsing rubric files.
#[derive(Debug, Deserialize)]
struct TomlRubricFile {
    rubric: TomlRubricHeader,
    #[serde(default)]
    items: Vec<TomlItem>,
}

#[derive(Debug, Deserialize)]
struct TomlRubricHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlItem {
    id: String,
    name: String,
    marks: f64,
    source: String,
    #[serde(default)]
    checks: Vec<TomlCheck>,
}

#[derive(Debug, Deserialize)]
struct TomlCheck {
    label: String,
    #[serde(default)]
    exact: Vec<String>,
    #[serde(default)]
    patterns: Vec<String>,
    #[serde(default)]
    any_of: Vec<TomlDecl>,
    /// HTML check name: "head" or "stylesheet-link".
    #[serde(default)]
    html: Option<String>,
    #[serde(default = "default_href")]
    href: String,
}

fn default_href() -> String {
    "styles.css".to_string()
}

#[derive(Debug, Deserialize)]
struct TomlDecl {
    property: String,
    value: String,
}

impl TomlCheck {
    fn into_spec(self, item_id: &str) -> Result<CheckSpec> {
        let kind = match self.html.as_deref() {
            Some("head") => CheckKind::HeadPresent,
            Some("stylesheet-link") => CheckKind::StylesheetLink { href: self.href },
            Some(other) => anyhow::bail!(
                "unknown html check {other:?} in {item_id} / \"{}\"",
                self.label
            ),
            None => {
                // Pattern queries first, matching the order bodies are gathered in.
                let selectors: Vec<SelectorQuery> = self
                    .patterns
                    .into_iter()
                    .map(SelectorQuery::Pattern)
                    .chain(self.exact.into_iter().map(SelectorQuery::Exact))
                    .collect();
                if self.any_of.is_empty() {
                    CheckKind::RuleExists { selectors }
                } else {
                    CheckKind::Declaration {
                        selectors,
                        any_of: self
                            .any_of
                            .into_iter()
                            .map(|d| DeclPattern::new(d.property, d.value))
                            .collect(),
                    }
                }
            }
        };

        Ok(CheckSpec {
            label: self.label,
            kind,
        })
    }
}

/// Parse a single TOML file into a `Rubric`.
pub fn parse_rubric(path: &Path) -> Result<Rubric> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read rubric file: {}", path.display()))?;

    parse_rubric_str(&content, path)
}

/// Parse a TOML string into a `Rubric` (useful for testing).
pub fn parse_rubric_str(content: &str, source_path: &Path) -> Result<Rubric> {
    let parsed: TomlRubricFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let items = parsed
        .items
        .into_iter()
        .map(|item| {
            let source: SourceKind = item
                .source
                .parse()
                .map_err(|e: String| anyhow::anyhow!("{} ({})", e, item.id))?;
            let checks = item
                .checks
                .into_iter()
                .map(|c| c.into_spec(&item.id))
                .collect::<Result<Vec<_>>>()?;

            Ok(RubricItem {
                id: item.id,
                name: item.name,
                marks: item.marks,
                source,
                checks,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Rubric {
        id: parsed.rubric.id,
        name: parsed.rubric.name,
        description: parsed.rubric.description,
        items,
    })
}

/// The built-in lab rubric.
pub fn builtin_rubric() -> Result<Rubric> {
    parse_rubric_str(BUILTIN_RUBRIC_TOML, Path::new("<builtin>/css-basics.toml"))
}

/// Load the rubric at `path`, or the built-in one when no path is given.
pub fn load_rubric(path: Option<&Path>) -> Result<Rubric> {
    match path {
        Some(p) => parse_rubric(p),
        None => builtin_rubric(),
    }
}

/// A warning from rubric validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The item ID (if applicable).
    pub item_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a rubric for common authoring issues.
pub fn validate_rubric(rubric: &Rubric) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if rubric.items.is_empty() {
        warnings.push(ValidationWarning {
            item_id: None,
            message: "rubric has no items".into(),
        });
    }

    // Check for duplicate item IDs
    let mut seen_ids = std::collections::HashSet::new();
    for item in &rubric.items {
        if !seen_ids.insert(&item.id) {
            warnings.push(ValidationWarning {
                item_id: Some(item.id.clone()),
                message: format!("duplicate item ID: {}", item.id),
            });
        }
    }

    for item in &rubric.items {
        if item.checks.is_empty() {
            warnings.push(ValidationWarning {
                item_id: Some(item.id.clone()),
                message: "item has no checks and always scores full marks".into(),
            });
        }
        if item.checks.iter().any(|c| c.label.trim().is_empty()) {
            warnings.push(ValidationWarning {
                item_id: Some(item.id.clone()),
                message: "check with an empty label".into(),
            });
        }
    }

    let total = rubric.total_marks();
    if (total - EXPECTED_ITEM_MARKS).abs() > f64::EPSILON {
        warnings.push(ValidationWarning {
            item_id: None,
            message: format!("item marks sum to {total}, expected {EXPECTED_ITEM_MARKS}"),
        });
    }

    warnings
}
