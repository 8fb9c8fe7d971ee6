//! cssgrade-report — Student-facing outputs for a graded submission.

pub mod artifacts;
pub mod csv;
pub mod markdown;

#[cfg(test)]
pub(crate) mod fixtures;
