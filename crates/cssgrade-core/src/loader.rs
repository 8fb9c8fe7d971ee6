//! Submission discovery and loading.
//!
//! All reads happen up front; grading afterwards is a pure function of the
//! loaded text.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::config::GraderConfig;
use crate::model::SourceKind;

/// Outcome of locating and reading one student file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SourceFile {
    /// Located and read.
    Found { path: PathBuf, text: String },
    /// Located but could not be read (permissions, not a regular file, ...).
    Unreadable { path: PathBuf, error: String },
    /// Nothing matched. `expected` is the file name that was searched for.
    Missing { expected: String },
}

impl SourceFile {
    /// The raw text, if the file was read.
    pub fn text(&self) -> Option<&str> {
        match self {
            SourceFile::Found { text, .. } => Some(text),
            _ => None,
        }
    }

    /// The located path, even when it could not be read.
    pub fn path(&self) -> Option<&Path> {
        match self {
            SourceFile::Found { path, .. } | SourceFile::Unreadable { path, .. } => Some(path),
            SourceFile::Missing { .. } => None,
        }
    }

    /// Diagnostic for items governed by this file, or `None` if it was read.
    pub fn diagnostic(&self, kind: SourceKind) -> Option<String> {
        match (self, kind) {
            (SourceFile::Found { .. }, _) => None,
            (SourceFile::Unreadable { .. }, _) => Some(self.read_failure(kind)),
            (SourceFile::Missing { expected }, SourceKind::Html) => Some(format!(
                "No .html file found (expected {expected} or any .html file)."
            )),
            (SourceFile::Missing { expected }, SourceKind::Css) => {
                Some(format!("No {expected} file found."))
            }
        }
    }

    /// `Could not read ...` wording, also used for files that are empty
    /// once comments are stripped.
    pub fn read_failure(&self, kind: SourceKind) -> String {
        match self.path() {
            Some(path) => format!("Could not read {kind} file at: {}", path.display()),
            None => format!("Could not read {kind} file."),
        }
    }

    /// Read `path`, or record why it could not be read. Invalid UTF-8 is
    /// replaced rather than rejected.
    pub fn read(path: Option<PathBuf>, expected: &str) -> Self {
        let Some(path) = path else {
            return SourceFile::Missing {
                expected: expected.to_string(),
            };
        };
        match std::fs::read(&path) {
            Ok(bytes) => SourceFile::Found {
                text: String::from_utf8_lossy(&bytes).into_owned(),
                path,
            },
            Err(e) => {
                tracing::warn!("could not read {}: {e}", path.display());
                SourceFile::Unreadable {
                    path,
                    error: e.to_string(),
                }
            }
        }
    }
}

/// The student's HTML and CSS, as loaded from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub html: SourceFile,
    pub css: SourceFile,
}

impl Submission {
    /// Locate and read the HTML and CSS files under `root`.
    pub fn load(root: &Path, config: &GraderConfig) -> Self {
        let ignore = config.scan_ignore_set();

        let html_path = find_preferred_or(root, &config.html_file, &ignore, |name| {
            name.to_lowercase().ends_with(".html")
        });
        let css_target = config.css_file.to_lowercase();
        let css_path = find_preferred_or(root, &config.css_file, &ignore, |name| {
            name.to_lowercase() == css_target
        });

        match &html_path {
            Some(p) => tracing::info!("HTML file: {}", p.display()),
            None => tracing::warn!("no .html file found under {}", root.display()),
        }
        match &css_path {
            Some(p) => tracing::info!("CSS file: {}", p.display()),
            None => tracing::warn!("no {} found under {}", config.css_file, root.display()),
        }

        Self {
            html: SourceFile::read(html_path, &config.html_file),
            css: SourceFile::read(css_path, &config.css_file),
        }
    }

    /// Build a submission from in-memory text (`None` = file missing).
    pub fn from_text(html: Option<&str>, css: Option<&str>) -> Self {
        let source = |text: Option<&str>, name: &str| match text {
            Some(t) => SourceFile::Found {
                path: PathBuf::from(name),
                text: t.to_string(),
            },
            None => SourceFile::Missing {
                expected: name.to_string(),
            },
        };
        Self {
            html: source(html, "index.html"),
            css: source(css, "styles.css"),
        }
    }

    /// The file governing items of `kind`.
    pub fn source(&self, kind: SourceKind) -> &SourceFile {
        match kind {
            SourceKind::Html => &self.html,
            SourceKind::Css => &self.css,
        }
    }
}

/// `root/preferred` if it exists, otherwise the first file anywhere under
/// `root` whose name satisfies `predicate`.
fn find_preferred_or(
    root: &Path,
    preferred: &str,
    ignore_dirs: &[String],
    predicate: impl Fn(&str) -> bool,
) -> Option<PathBuf> {
    let direct = root.join(preferred);
    if direct.is_file() {
        return Some(direct);
    }
    find_file(root, ignore_dirs, predicate)
}

/// Walk `root` in file-name order, skipping directories named in
/// `ignore_dirs`, and return the first file whose name satisfies
/// `predicate`.
pub fn find_file(
    root: &Path,
    ignore_dirs: &[String],
    predicate: impl Fn(&str) -> bool,
) -> Option<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0
                || !e.file_type().is_dir()
                || !ignore_dirs
                    .iter()
                    .any(|d| e.file_name().to_str() == Some(d.as_str()))
        })
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .find(|e| e.file_name().to_str().is_some_and(&predicate))
        .map(|e| e.into_path())
}
