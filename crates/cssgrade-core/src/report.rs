//! Grade report types with JSON persistence.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::results::ItemResult;
use crate::timing::SubmissionResult;

/// A complete grading report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Lab name from the configuration.
    pub lab: String,
    /// Summary of the rubric used.
    pub rubric: RubricSummary,
    /// Which files were graded.
    pub files: FilesChecked,
    /// Per-item results, in rubric order.
    pub items: Vec<ItemResult>,
    /// Timing component.
    pub submission: SubmissionResult,
    /// Sum of item scores.
    pub steps_score: f64,
    /// Sum of item maxima.
    pub steps_max: f64,
    /// `steps_score` plus the timing score.
    pub total: f64,
    /// `steps_max` plus the timing maximum.
    pub total_max: f64,
}

/// Summary of a rubric (without the check definitions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RubricSummary {
    pub id: String,
    pub name: String,
    pub item_count: usize,
}

/// The located student files. `None` means nothing was found.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesChecked {
    pub html: Option<PathBuf>,
    pub css: Option<PathBuf>,
    /// Stylesheet name that was searched for.
    pub css_expected: String,
}

impl GradeReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }
}
