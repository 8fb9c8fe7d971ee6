//! Per-item evaluation results and the proportional scoring rule.

use serde::{Deserialize, Serialize};

/// Pass/fail outcome of one required check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub label: String,
    pub passed: bool,
}

impl CheckOutcome {
    /// Checklist line, e.g. `✅ p has color: #333`.
    pub fn checklist_line(&self) -> String {
        let icon = if self.passed { "✅" } else { "❌" };
        format!("{icon} {}", self.label)
    }
}

/// The graded outcome of one rubric item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResult {
    /// Rubric item ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Maximum marks.
    pub max: f64,
    /// Awarded marks, rounded to two decimals.
    pub score: f64,
    /// Every check in rubric order. Empty when the source file was missing.
    pub checklist: Vec<CheckOutcome>,
    /// `Missing: <label>` notes, or a single diagnostic for a missing file.
    pub deductions: Vec<String>,
}

impl ItemResult {
    /// Score an item from its check outcomes.
    pub fn from_outcomes(id: &str, name: &str, max: f64, checklist: Vec<CheckOutcome>) -> Self {
        let deductions: Vec<String> = checklist
            .iter()
            .filter(|c| !c.passed)
            .map(|c| format!("Missing: {}", c.label))
            .collect();
        let score = split_marks(max, deductions.len(), checklist.len());
        Self {
            id: id.to_string(),
            name: name.to_string(),
            max,
            score,
            checklist,
            deductions,
        }
    }

    /// Zero marks with a single diagnostic in place of the checklist.
    pub fn failed(id: &str, name: &str, max: f64, reason: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            max,
            score: 0.0,
            checklist: Vec::new(),
            deductions: vec![reason.into()],
        }
    }

    /// Checks that passed.
    pub fn found(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.checklist.iter().filter(|c| c.passed)
    }

    /// Checks that failed.
    pub fn missed(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.checklist.iter().filter(|c| !c.passed)
    }
}

/// Round to two decimal places.
pub fn round2(n: f64) -> f64 {
    (n * 100.0).round() / 100.0
}

/// Deduct `marks / total_checks` per missing check, clamped at zero.
pub fn split_marks(marks: f64, missing: usize, total_checks: usize) -> f64 {
    if missing == 0 || total_checks == 0 {
        return marks;
    }
    let per_check = marks / total_checks as f64;
    round2(marks - per_check * missing as f64).max(0.0)
}
