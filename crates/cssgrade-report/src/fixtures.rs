use chrono::DateTime;
use cssgrade_core::config::GraderConfig;
use cssgrade_core::engine::GradingEngine;
use cssgrade_core::loader::Submission;
use cssgrade_core::parser::builtin_rubric;
use cssgrade_core::report::GradeReport;
use cssgrade_core::timing::SubmissionTime;

pub const HTML: &str = r#"<html><head><link rel="stylesheet" href="styles.css"></head></html>"#;

pub const CSS: &str = "p { color: #333; font-size: 16px; }\n.highlight { background: #f0f2f5; }";

/// Grade the fixture submission with the built-in rubric.
pub fn report(css: Option<&str>, submitted_at: &str) -> GradeReport {
    let engine = GradingEngine::new(&builtin_rubric().unwrap()).unwrap();
    let time = SubmissionTime::Known {
        at: DateTime::parse_from_rfc3339(submitted_at).unwrap(),
    };
    engine.grade(
        &Submission::from_text(Some(HTML), css),
        time,
        &GraderConfig::default(),
    )
}

pub fn on_time() -> GradeReport {
    report(Some(CSS), "2026-01-25T18:30:00+03:00")
}
