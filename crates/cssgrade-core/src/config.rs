//! Grader configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Deadline for lab 3-1: 26 Jan 2026, 11:59 PM Asia/Riyadh.
pub const DEFAULT_DEADLINE: &str = "2026-01-26T23:59:00+03:00";

/// Top-level cssgrade configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraderConfig {
    /// Lab name shown in reports.
    #[serde(default = "default_lab")]
    pub lab: String,
    /// Submissions at or before this instant are on time.
    #[serde(default = "default_deadline")]
    pub deadline: DateTime<FixedOffset>,
    /// Marks for an on-time submission.
    #[serde(default = "default_submission_max")]
    pub submission_max: f64,
    /// Marks for a late submission.
    #[serde(default = "default_submission_late")]
    pub submission_late: f64,
    /// Where grade.csv and feedback/ are written.
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: PathBuf,
    /// Preferred HTML file name; any `.html` file is the fallback.
    #[serde(default = "default_html_file")]
    pub html_file: String,
    /// Required stylesheet file name.
    #[serde(default = "default_css_file")]
    pub css_file: String,
    /// Directory names skipped during file discovery.
    #[serde(default = "default_ignore_dirs")]
    pub ignore_dirs: Vec<String>,
}

fn default_lab() -> String {
    "3-1-css-basics".to_string()
}
fn default_deadline() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(DEFAULT_DEADLINE).expect("DEFAULT_DEADLINE is valid RFC 3339")
}
fn default_submission_max() -> f64 {
    20.0
}
fn default_submission_late() -> f64 {
    10.0
}
fn default_artifacts_dir() -> PathBuf {
    PathBuf::from("artifacts")
}
fn default_html_file() -> String {
    "index.html".to_string()
}
fn default_css_file() -> String {
    "styles.css".to_string()
}
fn default_ignore_dirs() -> Vec<String> {
    vec![".git".to_string(), "node_modules".to_string()]
}

impl Default for GraderConfig {
    fn default() -> Self {
        Self {
            lab: default_lab(),
            deadline: default_deadline(),
            submission_max: default_submission_max(),
            submission_late: default_submission_late(),
            artifacts_dir: default_artifacts_dir(),
            html_file: default_html_file(),
            css_file: default_css_file(),
            ignore_dirs: default_ignore_dirs(),
        }
    }
}

impl GraderConfig {
    /// Directory names to skip while scanning, including the artifacts
    /// directory so previous outputs are never graded.
    pub fn scan_ignore_set(&self) -> Vec<String> {
        let mut dirs = self.ignore_dirs.clone();
        if let Some(name) = self.artifacts_dir.file_name().and_then(|n| n.to_str()) {
            if !dirs.iter().any(|d| d == name) {
                dirs.push(name.to_string());
            }
        }
        dirs
    }
}

/// Parse an RFC 3339 deadline string.
pub fn parse_deadline(s: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s.trim())
        .with_context(|| format!("invalid deadline (expected RFC 3339): {s}"))
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
/// Substituted values are not expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order when `path` is `None`:
/// 1. `cssgrade.toml` in the current directory
/// 2. `~/.config/cssgrade/config.toml`
///
/// Environment variable override: `CSSGRADE_DEADLINE`.
pub fn load_config_from(path: Option<&Path>) -> Result<GraderConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("cssgrade.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<GraderConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => GraderConfig::default(),
    };

    if let Ok(deadline) = std::env::var("CSSGRADE_DEADLINE") {
        config.deadline = parse_deadline(&deadline).context("in CSSGRADE_DEADLINE")?;
    }

    let artifacts = config.artifacts_dir.to_string_lossy().into_owned();
    if artifacts.contains("${") {
        config.artifacts_dir = PathBuf::from(resolve_env_vars(&artifacts));
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("cssgrade"))
}
