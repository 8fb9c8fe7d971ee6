//! Writing grading outputs to disk.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cssgrade_core::report::GradeReport;

use crate::csv::grade_csv;
use crate::markdown;

/// Paths of the files written by [`write_artifacts`].
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub csv: PathBuf,
    pub feedback: PathBuf,
}

/// Write `grade.csv` and `feedback/README.md` under `dir`, creating it.
pub fn write_artifacts(report: &GradeReport, dir: &Path) -> Result<ArtifactPaths> {
    let feedback_dir = dir.join("feedback");
    std::fs::create_dir_all(&feedback_dir)
        .with_context(|| format!("failed to create {}", feedback_dir.display()))?;

    let paths = ArtifactPaths {
        csv: dir.join("grade.csv"),
        feedback: feedback_dir.join("README.md"),
    };

    std::fs::write(&paths.csv, grade_csv(report))
        .with_context(|| format!("failed to write {}", paths.csv.display()))?;
    std::fs::write(&paths.feedback, markdown::feedback(report))
        .with_context(|| format!("failed to write {}", paths.feedback.display()))?;

    tracing::info!("wrote {} and {}", paths.csv.display(), paths.feedback.display());
    Ok(paths)
}

/// Append the summary to a CI step-summary file (e.g. `$GITHUB_STEP_SUMMARY`).
pub fn append_step_summary(path: &Path, summary: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open step summary {}", path.display()))?;
    file.write_all(summary.as_bytes())
        .with_context(|| format!("failed to append to {}", path.display()))?;
    tracing::debug!("appended summary to {}", path.display());
    Ok(())
}
