//! Submission timing: last commit time against the deadline.

use std::path::Path;
use std::process::Command;

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::config::GraderConfig;
use crate::error::TimestampError;

/// When the work was submitted, as far as we can tell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum SubmissionTime {
    /// Commit time from git, or an explicit override.
    Known { at: DateTime<FixedOffset> },
    /// No timestamp could be obtained; `now` is reported in its place.
    Unavailable { now: DateTime<Utc> },
}

impl SubmissionTime {
    /// Timestamp shown in reports.
    pub fn display(&self) -> String {
        match self {
            SubmissionTime::Known { at } => at.to_rfc3339(),
            SubmissionTime::Unavailable { now } => now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Terminal timing states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeliness {
    OnTime,
    Late,
}

/// Classify a submission. Equality with the deadline is on time; an
/// unknown time is late.
pub fn classify(time: &SubmissionTime, deadline: &DateTime<FixedOffset>) -> Timeliness {
    match time {
        SubmissionTime::Known { at } if at <= deadline => Timeliness::OnTime,
        _ => Timeliness::Late,
    }
}

/// The graded submission-timing component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub submitted: SubmissionTime,
    pub deadline: DateTime<FixedOffset>,
    pub status: Timeliness,
    pub score: f64,
    pub max: f64,
}

impl SubmissionResult {
    /// Score `time` against the configured deadline and marks.
    pub fn evaluate(time: SubmissionTime, config: &GraderConfig) -> Self {
        let status = classify(&time, &config.deadline);
        let score = match status {
            Timeliness::OnTime => config.submission_max,
            Timeliness::Late => config.submission_late,
        };
        tracing::info!(?status, score, "submission timing graded");
        Self {
            submitted: time,
            deadline: config.deadline,
            status,
            score,
            max: config.submission_max,
        }
    }

    pub fn is_late(&self) -> bool {
        self.status == Timeliness::Late
    }
}

/// Commit time of `HEAD` in the repository containing `root`.
pub fn last_commit_time(root: &Path) -> Result<DateTime<FixedOffset>, TimestampError> {
    let output = Command::new("git")
        .arg("-C")
        .arg(root)
        .args(["log", "-1", "--format=%cI"])
        .output()?;

    if !output.status.success() {
        return Err(TimestampError::GitFailed(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    let raw = String::from_utf8_lossy(&output.stdout).trim().to_string();
    DateTime::parse_from_rfc3339(&raw).map_err(|source| TimestampError::Parse { raw, source })
}

/// Look up the submission time, falling back to "unavailable" on any error.
pub fn resolve_submission_time(root: &Path) -> SubmissionTime {
    match last_commit_time(root) {
        Ok(at) => SubmissionTime::Known { at },
        Err(e) => {
            if e.is_missing_git() {
                tracing::warn!("git is not installed; treating submission as late");
            } else {
                tracing::warn!("no commit time available ({e}); treating submission as late");
            }
            SubmissionTime::Unavailable { now: Utc::now() }
        }
    }
}
