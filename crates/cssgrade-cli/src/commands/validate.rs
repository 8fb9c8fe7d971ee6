//! The `cssgrade validate` command.

use std::path::PathBuf;

use anyhow::Result;

use cssgrade_core::engine::GradingEngine;

pub fn execute(rubric_path: Option<PathBuf>) -> Result<()> {
    let rubric = cssgrade_core::parser::load_rubric(rubric_path.as_deref())?;
    println!(
        "Rubric: {} ({} items, {} marks)",
        rubric.name,
        rubric.items.len(),
        rubric.total_marks()
    );

    // Pattern errors are fatal.
    GradingEngine::new(&rubric)?;

    let warnings = cssgrade_core::parser::validate_rubric(&rubric);
    for w in &warnings {
        let prefix = w
            .item_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Rubric valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
