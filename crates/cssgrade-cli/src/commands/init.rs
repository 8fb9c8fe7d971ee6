//! The `cssgrade init` command.

use std::path::Path;

use anyhow::{Context, Result};

use cssgrade_core::parser::BUILTIN_RUBRIC_TOML;

pub fn execute() -> Result<()> {
    write_if_absent("cssgrade.toml", SAMPLE_CONFIG)?;
    write_if_absent("rubric.toml", BUILTIN_RUBRIC_TOML)?;

    println!("\nNext steps:");
    println!("  1. Set the deadline in cssgrade.toml");
    println!("  2. Run: cssgrade validate --rubric rubric.toml");
    println!("  3. Run: cssgrade grade --rubric rubric.toml");

    Ok(())
}

fn write_if_absent(name: &str, content: &str) -> Result<()> {
    if Path::new(name).exists() {
        println!("{name} already exists, skipping.");
    } else {
        std::fs::write(name, content).with_context(|| format!("failed to write {name}"))?;
        println!("Created {name}");
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# cssgrade configuration

lab = "3-1-css-basics"
deadline = "2026-01-26T23:59:00+03:00"
submission_max = 20
submission_late = 10

# Relative to the working directory; ${VAR} references are expanded.
artifacts_dir = "artifacts"

html_file = "index.html"
css_file = "styles.css"
ignore_dirs = [".git", "node_modules"]
"#;
