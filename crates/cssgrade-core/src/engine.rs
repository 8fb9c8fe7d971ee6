//! Rubric evaluation.
//!
//! A [`Rubric`] is compiled once into a [`GradingEngine`]; evaluating a
//! submission is then a pure function of the sanitized HTML, the extracted
//! CSS rules and the compiled checks.

use regex::Regex;
use uuid::Uuid;

use crate::config::GraderConfig;
use crate::css::{self, CssRule};
use crate::error::RubricError;
use crate::html;
use crate::loader::Submission;
use crate::model::{CheckKind, Rubric, SelectorQuery, SourceKind};
use crate::report::{FilesChecked, GradeReport, RubricSummary};
use crate::results::{round2, CheckOutcome, ItemResult};
use crate::sanitize::{strip_css_comments, strip_html_comments};
use crate::timing::{SubmissionResult, SubmissionTime};

enum CompiledSelector {
    Exact(String),
    Pattern(Regex),
}

enum CompiledCheck {
    /// Empty `declarations` means the rule only has to exist.
    Css {
        selectors: Vec<CompiledSelector>,
        declarations: Vec<Regex>,
    },
    HeadPresent,
    StylesheetLink {
        href: String,
    },
}

struct CompiledItem {
    id: String,
    name: String,
    marks: f64,
    source: SourceKind,
    checks: Vec<(String, CompiledCheck)>,
}

/// The sanitized inputs every check reads from.
struct Documents {
    html: Option<String>,
    rules: Option<Vec<CssRule>>,
}

/// A compiled rubric, ready to grade submissions.
pub struct GradingEngine {
    rubric_id: String,
    rubric_name: String,
    items: Vec<CompiledItem>,
}

impl GradingEngine {
    /// Compile every pattern in `rubric`.
    pub fn new(rubric: &Rubric) -> Result<Self, RubricError> {
        let items = rubric
            .items
            .iter()
            .map(|item| {
                if !item.marks.is_finite() || item.marks < 0.0 {
                    return Err(RubricError::InvalidMarks {
                        item_id: item.id.clone(),
                        marks: item.marks,
                    });
                }
                let checks = item
                    .checks
                    .iter()
                    .map(|check| {
                        if check.kind.source() != item.source {
                            return Err(RubricError::WrongSource {
                                item_id: item.id.clone(),
                                check: check.label.clone(),
                                source_kind: item.source.to_string(),
                            });
                        }
                        let compiled = compile_check(&item.id, &check.label, &check.kind)?;
                        Ok((check.label.clone(), compiled))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(CompiledItem {
                    id: item.id.clone(),
                    name: item.name.clone(),
                    marks: item.marks,
                    source: item.source,
                    checks,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            rubric_id: rubric.id.clone(),
            rubric_name: rubric.name.clone(),
            items,
        })
    }

    /// Sum of item marks.
    pub fn steps_max(&self) -> f64 {
        self.items.iter().map(|i| i.marks).sum()
    }

    /// Grade every rubric item against `submission`.
    pub fn evaluate(&self, submission: &Submission) -> Vec<ItemResult> {
        // Text that is empty once comments are gone counts as unreadable.
        let html = submission
            .html
            .text()
            .map(strip_html_comments)
            .filter(|t| !t.is_empty());
        let css_text = submission
            .css
            .text()
            .map(strip_css_comments)
            .filter(|t| !t.is_empty());
        let docs = Documents {
            html,
            rules: css_text.as_deref().map(css::extract_rules),
        };
        if let Some(rules) = &docs.rules {
            tracing::debug!("extracted {} CSS rules", rules.len());
        }
        let blank = |kind: SourceKind| match kind {
            SourceKind::Html => docs.html.is_none(),
            SourceKind::Css => docs.rules.is_none(),
        };

        self.items
            .iter()
            .map(|item| {
                let source = submission.source(item.source);
                let reason = source
                    .diagnostic(item.source)
                    .or_else(|| blank(item.source).then(|| source.read_failure(item.source)));
                if let Some(reason) = reason {
                    tracing::warn!("{}: {reason}", item.id);
                    return ItemResult::failed(&item.id, &item.name, item.marks, reason);
                }

                let checklist: Vec<CheckOutcome> = item
                    .checks
                    .iter()
                    .map(|(label, check)| {
                        let passed = run_check(check, &docs);
                        tracing::debug!(item = %item.id, passed, "{label}");
                        CheckOutcome {
                            label: label.clone(),
                            passed,
                        }
                    })
                    .collect();

                let result = ItemResult::from_outcomes(&item.id, &item.name, item.marks, checklist);
                tracing::debug!("{}: {}/{}", item.id, result.score, result.max);
                result
            })
            .collect()
    }

    /// Grade items and timing, and assemble the full report.
    pub fn grade(
        &self,
        submission: &Submission,
        submitted: SubmissionTime,
        config: &GraderConfig,
    ) -> GradeReport {
        let items = self.evaluate(submission);
        let submission_result = SubmissionResult::evaluate(submitted, config);

        let steps_score = round2(items.iter().map(|i| i.score).sum());
        let steps_max = self.steps_max();
        let total = round2(steps_score + submission_result.score);
        let total_max = steps_max + submission_result.max;
        tracing::info!("graded {}: {total}/{total_max}", self.rubric_id);

        GradeReport {
            id: Uuid::new_v4(),
            created_at: chrono::Utc::now(),
            lab: config.lab.clone(),
            rubric: RubricSummary {
                id: self.rubric_id.clone(),
                name: self.rubric_name.clone(),
                item_count: self.items.len(),
            },
            files: FilesChecked {
                html: submission.html.path().map(|p| p.to_path_buf()),
                css: submission.css.path().map(|p| p.to_path_buf()),
                css_expected: config.css_file.clone(),
            },
            items,
            submission: submission_result,
            steps_score,
            steps_max,
            total,
            total_max,
        }
    }
}

fn compile_check(item_id: &str, label: &str, kind: &CheckKind) -> Result<CompiledCheck, RubricError> {
    let invalid = |source: regex::Error| RubricError::InvalidPattern {
        item_id: item_id.to_string(),
        check: label.to_string(),
        source,
    };

    let compile_selectors = |selectors: &[SelectorQuery]| {
        if selectors.is_empty() {
            return Err(RubricError::NoSelectors {
                item_id: item_id.to_string(),
                check: label.to_string(),
            });
        }
        selectors
            .iter()
            .map(|q| match q {
                SelectorQuery::Exact(s) => Ok(CompiledSelector::Exact(s.clone())),
                SelectorQuery::Pattern(p) => css::selector_regex(p)
                    .map(CompiledSelector::Pattern)
                    .map_err(invalid),
            })
            .collect::<Result<Vec<_>, _>>()
    };

    match kind {
        CheckKind::RuleExists { selectors } => Ok(CompiledCheck::Css {
            selectors: compile_selectors(selectors)?,
            declarations: Vec::new(),
        }),
        CheckKind::Declaration { selectors, any_of } => {
            if any_of.is_empty() {
                return Err(RubricError::NoAlternatives {
                    item_id: item_id.to_string(),
                    check: label.to_string(),
                });
            }
            let declarations = any_of
                .iter()
                .map(|d| css::declaration_regex(&d.property, &d.value).map_err(invalid))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(CompiledCheck::Css {
                selectors: compile_selectors(selectors)?,
                declarations,
            })
        }
        CheckKind::HeadPresent => Ok(CompiledCheck::HeadPresent),
        CheckKind::StylesheetLink { href } => Ok(CompiledCheck::StylesheetLink { href: href.clone() }),
    }
}

fn run_check(check: &CompiledCheck, docs: &Documents) -> bool {
    match check {
        CompiledCheck::Css {
            selectors,
            declarations,
        } => {
            let Some(rules) = &docs.rules else {
                return false;
            };
            let bodies: Vec<&str> = selectors
                .iter()
                .flat_map(|s| match s {
                    CompiledSelector::Exact(sel) => css::bodies_for_exact(rules, sel),
                    CompiledSelector::Pattern(re) => css::bodies_for_pattern(rules, re),
                })
                .collect();
            if declarations.is_empty() {
                !bodies.is_empty()
            } else {
                bodies
                    .iter()
                    .any(|b| css::has_any_declaration(b, declarations))
            }
        }
        CompiledCheck::HeadPresent => docs
            .html
            .as_deref()
            .is_some_and(|h| !html::head_section(h).is_empty()),
        CompiledCheck::StylesheetLink { href } => docs
            .html
            .as_deref()
            .is_some_and(|h| html::has_stylesheet_link(html::head_section(h), href)),
    }
}
