//! Markdown summary and feedback documents.
//!
//! The summary is meant for a CI job page (collapsible per-item details);
//! the feedback document is the student's full checklist.

use chrono::SecondsFormat;
use cssgrade_core::report::GradeReport;
use cssgrade_core::results::ItemResult;

/// Escape angle brackets so labels like `<head>` render literally.
fn md_escape(s: &str) -> String {
    s.replace('<', "&lt;").replace('>', "&gt;")
}

fn submission_block(report: &GradeReport) -> String {
    let sub = &report.submission;
    let status = if sub.is_late() {
        "(Late submission)"
    } else {
        "(On time)"
    };
    format!(
        "- **Lab:** {}\n\
         - **Deadline (UTC{}):** {}\n\
         - **Last commit time (from git log):** {}\n\
         - **Submission marks:** **{}/{}** {}\n",
        report.lab,
        sub.deadline.format("%:z"),
        sub.deadline.to_rfc3339_opts(SecondsFormat::Secs, false),
        sub.submitted.display(),
        sub.score,
        sub.max,
        status,
    )
}

fn files_block(report: &GradeReport) -> String {
    let html = match &report.files.html {
        Some(p) => format!("✅ {}", p.display()),
        None => "❌ No HTML file found".to_string(),
    };
    let css = match &report.files.css {
        Some(p) => format!("✅ {}", p.display()),
        None => format!("❌ No {} file found", report.files.css_expected),
    };
    format!("- HTML: {html}\n- CSS: {css}\n")
}

fn bullet_list(lines: &[String], empty: &str) -> String {
    if lines.is_empty() {
        format!("- {empty}")
    } else {
        lines
            .iter()
            .map(|l| format!("- {}", md_escape(l)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn details_block(item: &ItemResult) -> String {
    let found: Vec<String> = item.found().map(|c| c.checklist_line()).collect();
    let missed: Vec<String> = item.missed().map(|c| c.checklist_line()).collect();

    let mut md = String::new();
    md.push_str("\n<details>\n");
    md.push_str(&format!(
        "  <summary><strong>{}</strong> — {}/{}</summary>\n\n",
        md_escape(&item.name),
        item.score,
        item.max
    ));
    md.push_str("  <br/>\n\n  <strong>✅ Found</strong>\n\n");
    md.push_str(&bullet_list(&found, "(Nothing detected)"));
    md.push_str("\n\n  <br/><br/>\n\n  <strong>❌ Missing</strong>\n\n");
    md.push_str(&bullet_list(&missed, "(Nothing missing)"));
    md.push_str("\n\n  <br/><br/>\n\n  <strong>❗ Deductions / Notes</strong>\n\n");
    md.push_str(&bullet_list(&item.deductions, "No deductions."));
    md.push_str("\n\n</details>\n");
    md
}

/// Generate the CI summary. `feedback_path` is where the full feedback
/// document was written, as shown to the reader.
pub fn summary(report: &GradeReport, feedback_path: &str) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {} — Autograding Summary\n\n", report.lab));
    md.push_str("## Submission\n\n");
    md.push_str(&submission_block(report));
    md.push_str("\n## Files Checked\n\n");
    md.push_str(&files_block(report));

    md.push_str("\n## Marks Breakdown\n\n");
    md.push_str("| Component | Marks |\n|---|---:|\n");
    for item in &report.items {
        md.push_str(&format!("| {} | {}/{} |\n", item.name, item.score, item.max));
    }
    md.push_str(&format!(
        "| Submission (timing) | {}/{} |\n",
        report.submission.score, report.submission.max
    ));

    md.push_str(&format!(
        "\n## Total Marks\n\n**{} / {}**\n\n",
        report.total, report.total_max
    ));

    md.push_str("## Detailed Checks (What you did / missed)\n");
    for item in &report.items {
        md.push_str(&details_block(item));
    }

    md.push_str(&format!(
        "\n> Full feedback is also available in: `{feedback_path}`\n"
    ));
    md
}

/// Generate the student feedback document.
pub fn feedback(report: &GradeReport) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {} — Feedback\n\n", report.lab));
    md.push_str("## Submission\n\n");
    md.push_str(&submission_block(report));
    md.push_str("\n## Files Checked\n\n");
    md.push_str(&files_block(report));
    md.push_str("\n---\n\n## TODO-by-TODO Feedback\n");

    for item in &report.items {
        md.push_str(&format!(
            "\n### {} — **{}/{}**\n\n",
            item.name, item.score, item.max
        ));
        md.push_str("**Checklist**\n");
        if item.checklist.is_empty() {
            md.push_str("- (No checks available)\n");
        } else {
            for check in &item.checklist {
                md.push_str(&format!("- {}\n", check.checklist_line()));
            }
        }
        md.push_str("\n**Deductions / Notes**\n");
        if item.deductions.is_empty() {
            md.push_str("- ✅ No deductions. Good job!\n");
        } else {
            for note in &item.deductions {
                md.push_str(&format!("- ❗ {note}\n"));
            }
        }
    }

    md.push_str(RULES_SECTION);
    md
}

const RULES_SECTION: &str = "
---

## How marks were deducted (rules)

- HTML comments are ignored (so examples in comments do NOT count).
- CSS comments are ignored (so examples in comments do NOT count).
- Checks are intentionally light: they look for key selectors and key properties.
- CSS rules can be in ANY order, and repeated selectors/properties are allowed.
- Accepted equivalents:
  - `background` or `background-color`
  - `white` or `#fff` or `#ffffff`
  - `font-weight: bold` or `font-weight: 700`
  - font-size rem equivalents: 16px/1rem, 14px/0.875rem, 12px/0.75rem, 18px/1.125rem
- Missing required items reduce marks proportionally within that TODO.
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn summary_has_breakdown_and_total() {
        let md = summary(&fixtures::on_time(), "artifacts/feedback/README.md");
        assert!(md.starts_with("# 3-1-css-basics — Autograding Summary"));
        assert!(md.contains("| TODO 2: Basic Element Selectors (p, span) | 5/10 |"));
        assert!(md.contains("| Submission (timing) | 20/20 |"));
        assert!(md.contains("**36.6 / 100**"));
        assert!(md.contains("- **Deadline (UTC+03:00):** 2026-01-26T23:59:00+03:00"));
        assert!(md.contains("**20/20** (On time)"));
        assert_eq!(md.matches("<details>").count(), 9);
        assert!(md.ends_with("> Full feedback is also available in: `artifacts/feedback/README.md`\n"));
    }

    #[test]
    fn summary_escapes_angle_brackets_in_details() {
        let md = summary(&fixtures::on_time(), "feedback/README.md");
        assert!(md.contains("<strong>TODO 1: HTML links styles.css in &lt;head&gt;</strong> — 6/6"));
        assert!(md.contains("- ✅ Has &lt;head&gt; section"));
    }

    #[test]
    fn summary_reports_late_and_missing_css() {
        let report = fixtures::report(None, "2026-02-01T09:00:00+03:00");
        let md = summary(&report, "feedback/README.md");
        assert!(md.contains("**10/20** (Late submission)"));
        assert!(md.contains("- CSS: ❌ No styles.css file found"));
        assert!(md.contains("- No styles.css file found."));
        assert!(md.contains("- (Nothing detected)"));
        assert!(md.contains("**16 / 100**"));
    }

    #[test]
    fn feedback_lists_checklist_and_deductions() {
        let md = feedback(&fixtures::on_time());
        assert!(md.contains("### TODO 2: Basic Element Selectors (p, span) — **5/10**"));
        assert!(md.contains("- ✅ p has color: #333\n"));
        assert!(md.contains("- ❌ span has color: #888\n"));
        assert!(md.contains("- ❗ Missing: span has color: #888\n"));
        assert!(md.contains("- ✅ No deductions. Good job!"));
        assert!(md.contains("## How marks were deducted (rules)"));
    }

    #[test]
    fn feedback_without_css_has_no_checklist() {
        let md = feedback(&fixtures::report(None, "2026-01-25T18:30:00+03:00"));
        assert!(md.contains("### TODO 9: Group Selectors (h4/h5/h6.trending-tag) — **0/5**"));
        assert!(md.contains("- (No checks available)\n"));
    }

    #[test]
    fn fractional_marks_print_in_shortest_form() {
        let md = summary(&fixtures::on_time(), "feedback/README.md");
        assert!(md.contains("| 3.6/18 |"));
    }
}
