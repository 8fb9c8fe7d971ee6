//! The `cssgrade rules` command: show what the grader sees in a stylesheet.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use cssgrade_core::css::extract_rules;
use cssgrade_core::sanitize::strip_css_comments;

pub fn execute(file: PathBuf) -> Result<()> {
    let raw = std::fs::read_to_string(&file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let rules = extract_rules(&strip_css_comments(&raw));

    let mut table = Table::new();
    table.set_header(vec!["#", "Selectors", "Body"]);
    for (i, rule) in rules.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(rule.selectors.join("\n")),
            Cell::new(&rule.body),
        ]);
    }

    println!("{table}");
    println!("{} rule(s) in {}", rules.len(), file.display());
    Ok(())
}
