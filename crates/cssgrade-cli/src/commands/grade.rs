//! The `cssgrade grade` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::DateTime;

use cssgrade_core::config::{load_config_from, parse_deadline};
use cssgrade_core::engine::GradingEngine;
use cssgrade_core::loader::Submission;
use cssgrade_core::parser::{load_rubric, validate_rubric};
use cssgrade_core::report::GradeReport;
use cssgrade_core::timing::{resolve_submission_time, SubmissionTime};
use cssgrade_report::artifacts::{append_step_summary, write_artifacts};
use cssgrade_report::markdown;

pub struct GradeArgs {
    pub root: PathBuf,
    pub rubric: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub deadline: Option<String>,
    pub submitted_at: Option<String>,
    pub json: bool,
}

pub fn execute(args: GradeArgs) -> Result<()> {
    let mut config = load_config_from(args.config.as_deref())?;
    if let Some(deadline) = &args.deadline {
        config.deadline = parse_deadline(deadline)?;
    }
    if let Some(output) = args.output {
        config.artifacts_dir = output;
    }

    let rubric = load_rubric(args.rubric.as_deref())?;
    for w in validate_rubric(&rubric) {
        match &w.item_id {
            Some(id) => tracing::warn!("rubric [{id}]: {}", w.message),
            None => tracing::warn!("rubric: {}", w.message),
        }
    }
    let engine = GradingEngine::new(&rubric).context("rubric failed to compile")?;

    if !args.root.is_dir() {
        anyhow::bail!("submission root is not a directory: {}", args.root.display());
    }
    let submission = Submission::load(&args.root, &config);

    let submitted = match &args.submitted_at {
        Some(s) => SubmissionTime::Known {
            at: DateTime::parse_from_rfc3339(s.trim())
                .with_context(|| format!("invalid --submitted-at (expected RFC 3339): {s}"))?,
        },
        None => resolve_submission_time(&args.root),
    };

    let report = engine.grade(&submission, submitted, &config);

    let dir = &config.artifacts_dir;
    let paths = write_artifacts(&report, dir)?;

    if let Some(step_summary) = std::env::var_os("GITHUB_STEP_SUMMARY").filter(|v| !v.is_empty()) {
        let summary = markdown::summary(&report, &paths.feedback.display().to_string());
        append_step_summary(PathBuf::from(step_summary).as_path(), &summary)?;
    }

    if args.json {
        let path = dir.join("report.json");
        report.save_json(&path)?;
        eprintln!("JSON report: {}", path.display());
    }

    print_summary(&report);

    println!(
        "✔ Lab graded: {}/{} (Submission: {}/{}, TODOs: {}/{}).",
        report.total,
        report.total_max,
        report.submission.score,
        report.submission.max,
        report.steps_score,
        report.steps_max
    );

    Ok(())
}

fn print_summary(report: &GradeReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Component", "Marks", "Missing"]);

    for item in &report.items {
        let missing = if item.checklist.is_empty() && !item.deductions.is_empty() {
            "file missing".to_string()
        } else {
            item.missed().count().to_string()
        };
        table.add_row(vec![
            Cell::new(&item.name),
            Cell::new(format!("{}/{}", item.score, item.max)),
            Cell::new(missing),
        ]);
    }
    table.add_row(vec![
        Cell::new("Submission (timing)"),
        Cell::new(format!(
            "{}/{}",
            report.submission.score, report.submission.max
        )),
        Cell::new(if report.submission.is_late() { "late" } else { "" }),
    ]);

    eprintln!("\n{table}");
}
