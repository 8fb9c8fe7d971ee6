//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Chat</title>
  <!-- remember to link the stylesheet -->
  <link rel="stylesheet" href="./styles.css">
</head>
<body></body>
</html>
"#;

const STYLES_CSS: &str = r#"/* Lab 3-1 */
p { color: #333; font-size: 1rem; }
span { color: #888; font-size: 14px; }
.username { color: #1877f2; font-weight: bold; }
.blue-text { color: #4267b2; }
.red-text { color: #e74c3c; }
.highlight { background-color: #f0f2f5; padding: 15px; }
#featured-user { color: #42b883; font-size: 18px; }
.winner { color: #ff6b6b; }
#specificity-test { color: #4ecdc4; }
p.winner { color: #95a5a6; }
.important-test { color: #e67e22 !important; }
.chat-container .message { color: #2c3e50; }
.chat-container .message-time { color: #7f8c8d; font-size: 0.75rem; }
.simple-form input { border: 1px solid #ccc; background: #ffffff; color: #333; }
.send-button:hover { background-color: #3b5998; color: #fff; }
.chat-link:hover { color: #1877f2; text-decoration: none; }
.simple-form button:hover { background-color: #145dbf; }
h4.trending-tag, h5.trending-tag, h6.trending-tag { color: #8b9dc3; font-family: Arial, sans-serif; }
"#;

fn cssgrade(home: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("cssgrade").unwrap();
    cmd.env("HOME", home)
        .env_remove("GITHUB_STEP_SUMMARY")
        .env_remove("CSSGRADE_DEADLINE")
        .env_remove("RUST_LOG");
    cmd
}

fn submission(html: Option<&str>, css: Option<&str>) -> TempDir {
    let dir = TempDir::new().unwrap();
    if let Some(html) = html {
        std::fs::write(dir.path().join("index.html"), html).unwrap();
    }
    if let Some(css) = css {
        std::fs::write(dir.path().join("styles.css"), css).unwrap();
    }
    dir
}

fn grade(dir: &TempDir) -> Command {
    let mut cmd = cssgrade(dir.path());
    cmd.current_dir(dir.path())
        .arg("grade")
        .arg("--root")
        .arg(dir.path());
    cmd
}

#[test]
fn grade_complete_submission_on_time() {
    let dir = submission(Some(INDEX_HTML), Some(STYLES_CSS));

    grade(&dir)
        .args(["--submitted-at", "2026-01-25T18:30:00+03:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "✔ Lab graded: 100/100 (Submission: 20/20, TODOs: 80/80).",
        ));

    let csv = std::fs::read_to_string(dir.path().join("artifacts/grade.csv")).unwrap();
    assert_eq!(csv, "student,score,max_score\nall_students,100,100\n");

    let feedback = std::fs::read_to_string(dir.path().join("artifacts/feedback/README.md")).unwrap();
    assert!(feedback.contains("(On time)"));
    assert!(!feedback.contains("❌"));
}

#[test]
fn grade_missing_css_late() {
    let dir = submission(Some(INDEX_HTML), None);

    grade(&dir)
        .args(["--submitted-at", "2026-01-27T09:00:00+03:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "✔ Lab graded: 16/100 (Submission: 10/20, TODOs: 6/80).",
        ));

    let feedback = std::fs::read_to_string(dir.path().join("artifacts/feedback/README.md")).unwrap();
    assert!(feedback.contains("- ❗ No styles.css file found."));
    assert!(feedback.contains("(Late submission)"));
}

#[test]
fn grade_windows_encoded_stylesheet() {
    let dir = submission(Some(INDEX_HTML), None);
    let mut bytes = "\u{FEFF}/* Auteur : Jos".as_bytes().to_vec();
    bytes.push(0xE9);
    bytes.extend_from_slice(b" */\r\n");
    bytes.extend_from_slice(STYLES_CSS.as_bytes());
    std::fs::write(dir.path().join("styles.css"), bytes).unwrap();

    grade(&dir)
        .args(["--submitted-at", "2026-01-25T18:30:00+03:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TODOs: 80/80"));
}

#[test]
fn grade_at_exact_deadline_is_on_time() {
    let dir = submission(Some(INDEX_HTML), None);

    grade(&dir)
        .args(["--submitted-at", "2026-01-26T20:59:00Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Submission: 20/20"));
}

#[test]
fn grade_without_git_history_is_late() {
    let dir = submission(Some(INDEX_HTML), Some(STYLES_CSS));

    grade(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("(Submission: 10/20, TODOs: 80/80)"));
}

#[test]
fn grade_deadline_flag_overrides_config() {
    let dir = submission(Some(INDEX_HTML), None);
    std::fs::write(
        dir.path().join("cssgrade.toml"),
        "deadline = \"2026-01-01T00:00:00Z\"\n",
    )
    .unwrap();

    grade(&dir)
        .args(["--submitted-at", "2026-02-10T12:00:00Z"])
        .args(["--deadline", "2026-03-01T00:00:00Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Submission: 20/20"));
}

#[test]
fn grade_reads_config_from_working_directory() {
    let dir = submission(Some(INDEX_HTML), None);
    std::fs::write(
        dir.path().join("cssgrade.toml"),
        "submission_max = 30\nsubmission_late = 15\n",
    )
    .unwrap();

    grade(&dir)
        .args(["--submitted-at", "2026-01-01T00:00:00Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✔ Lab graded: 36/110 (Submission: 30/30"));
}

#[test]
fn grade_finds_nested_files_and_skips_ignored_dirs() {
    let dir = TempDir::new().unwrap();
    let vendored = dir.path().join("node_modules/theme");
    let site = dir.path().join("site");
    std::fs::create_dir_all(&vendored).unwrap();
    std::fs::create_dir_all(&site).unwrap();
    std::fs::write(vendored.join("styles.css"), STYLES_CSS).unwrap();
    std::fs::write(site.join("page.html"), INDEX_HTML).unwrap();

    grade(&dir)
        .args(["--submitted-at", "2026-01-20T00:00:00Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TODOs: 6/80"));
}

#[test]
fn grade_writes_json_and_custom_output() {
    let dir = submission(Some(INDEX_HTML), Some(STYLES_CSS));
    let out = dir.path().join("out");

    grade(&dir)
        .args(["--submitted-at", "2026-01-20T00:00:00Z", "--json"])
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    assert!(out.join("grade.csv").exists());
    let json = std::fs::read_to_string(out.join("report.json")).unwrap();
    assert!(json.contains("\"steps_max\""));
    assert!(json.contains("\"on_time\""));
}

#[test]
fn grade_appends_step_summary() {
    let dir = submission(Some(INDEX_HTML), Some(STYLES_CSS));
    let summary = dir.path().join("summary.md");
    std::fs::write(&summary, "## Earlier step\n").unwrap();

    grade(&dir)
        .env("GITHUB_STEP_SUMMARY", &summary)
        .args(["--submitted-at", "2026-01-20T00:00:00Z"])
        .assert()
        .success();

    let content = std::fs::read_to_string(&summary).unwrap();
    assert!(content.starts_with("## Earlier step\n"));
    assert!(content.contains("Autograding Summary"));
    assert!(content.contains("**100 / 100**"));
}

#[test]
fn grade_rejects_bad_timestamp() {
    let dir = submission(Some(INDEX_HTML), None);

    grade(&dir)
        .args(["--submitted-at", "yesterday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --submitted-at"));
}

#[test]
fn grade_nonexistent_root() {
    let dir = TempDir::new().unwrap();

    cssgrade(dir.path())
        .current_dir(dir.path())
        .args(["grade", "--root", "no/such/dir"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn validate_builtin_rubric() {
    let dir = TempDir::new().unwrap();

    cssgrade(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("(9 items, 80 marks)"))
        .stdout(predicate::str::contains("Rubric valid."));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rubric.toml");
    std::fs::write(
        &path,
        r#"
[rubric]
id = "tiny"
name = "Tiny"

[[items]]
id = "a"
name = "A"
marks = 5
source = "css"

[[items.checks]]
label = "Has p"
exact = ["p"]
"#,
    )
    .unwrap();

    cssgrade(dir.path())
        .arg("validate")
        .arg("--rubric")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("item marks sum to 5, expected 80"))
        .stdout(predicate::str::contains("1 warning(s) found."));
}

#[test]
fn validate_rejects_invalid_pattern() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rubric.toml");
    std::fs::write(
        &path,
        r#"
[rubric]
id = "broken"
name = "Broken"

[[items]]
id = "a"
name = "A"
marks = 80
source = "css"

[[items.checks]]
label = "Unclosed group"
patterns = ['(\.chat']
"#,
    )
    .unwrap();

    cssgrade(dir.path())
        .arg("validate")
        .arg("--rubric")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn validate_nonexistent_file() {
    let dir = TempDir::new().unwrap();

    cssgrade(dir.path())
        .args(["validate", "--rubric", "nonexistent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn rules_lists_uncommented_rules() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("styles.css");
    std::fs::write(&path, "/* .ghost { color: red } */\np { color: #333 }\nh4, h5 { margin: 0 }").unwrap();

    cssgrade(dir.path())
        .arg("rules")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 rule(s)"))
        .stdout(predicate::str::contains("color: #333"))
        .stdout(predicate::str::contains(".ghost").not());
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    cssgrade(dir.path())
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created cssgrade.toml"))
        .stdout(predicate::str::contains("Created rubric.toml"));

    assert!(dir.path().join("cssgrade.toml").exists());
    assert!(dir.path().join("rubric.toml").exists());

    // The starter files must load cleanly.
    cssgrade(dir.path())
        .current_dir(dir.path())
        .args(["validate", "--rubric", "rubric.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rubric valid."));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    cssgrade(dir.path())
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    cssgrade(dir.path())
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();

    cssgrade(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rubric-based HTML/CSS lab autograder"));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();

    cssgrade(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cssgrade"));
}
