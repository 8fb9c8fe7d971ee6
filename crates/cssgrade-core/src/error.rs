//! Domain error types.
//!
//! Grading itself never fails: missing files and unreadable timestamps are
//! folded into the report. These errors cover the setup phase, where a
//! rubric is compiled or a submission timestamp is looked up.

use thiserror::Error;

/// Errors raised while turning a rubric definition into a runnable one.
#[derive(Debug, Error)]
pub enum RubricError {
    /// A selector or declaration pattern is not a valid regular expression.
    #[error("invalid pattern in {item_id} / \"{check}\": {source}")]
    InvalidPattern {
        item_id: String,
        check: String,
        #[source]
        source: regex::Error,
    },

    /// A CSS check names no selectors to look up.
    #[error("check \"{check}\" in {item_id} has no selectors")]
    NoSelectors { item_id: String, check: String },

    /// A declaration check lists no property/value alternatives.
    #[error("check \"{check}\" in {item_id} has no declaration alternatives")]
    NoAlternatives { item_id: String, check: String },

    /// An HTML-only check was placed on a CSS item, or the other way round.
    #[error("check \"{check}\" in {item_id} does not apply to {source_kind} sources")]
    WrongSource {
        item_id: String,
        check: String,
        source_kind: String,
    },

    /// Item marks must be finite and non-negative.
    #[error("item {item_id} has invalid marks: {marks}")]
    InvalidMarks { item_id: String, marks: f64 },
}

/// Errors from reading the submission timestamp out of version control.
#[derive(Debug, Error)]
pub enum TimestampError {
    /// `git` could not be spawned at all.
    #[error("failed to run git: {0}")]
    Spawn(#[from] std::io::Error),

    /// `git log` exited non-zero (not a repository, no commits, ...).
    #[error("git log failed: {0}")]
    GitFailed(String),

    /// The commit time was not RFC 3339.
    #[error("unparseable commit time {raw:?}: {source}")]
    Parse {
        raw: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl TimestampError {
    /// Returns `true` if git itself is unavailable, as opposed to the
    /// directory simply not being a repository.
    pub fn is_missing_git(&self) -> bool {
        matches!(self, TimestampError::Spawn(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}
