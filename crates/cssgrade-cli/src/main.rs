//! cssgrade CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cssgrade", version, about = "Rubric-based HTML/CSS lab autograder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade a submission
    Grade {
        /// Submission root directory
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Rubric TOML file (defaults to the built-in lab rubric)
        #[arg(long)]
        rubric: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Artifacts directory (overrides config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Deadline as RFC 3339 (overrides config)
        #[arg(long)]
        deadline: Option<String>,

        /// Submission time as RFC 3339 (skips the git lookup)
        #[arg(long)]
        submitted_at: Option<String>,

        /// Also write report.json
        #[arg(long)]
        json: bool,
    },

    /// Validate a rubric file
    Validate {
        /// Rubric TOML file (defaults to the built-in lab rubric)
        #[arg(long)]
        rubric: Option<PathBuf>,
    },

    /// Print the rules extracted from a CSS file
    Rules {
        /// Stylesheet to inspect
        file: PathBuf,
    },

    /// Create starter config and rubric files
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cssgrade=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Grade {
            root,
            rubric,
            config,
            output,
            deadline,
            submitted_at,
            json,
        } => commands::grade::execute(commands::grade::GradeArgs {
            root,
            rubric,
            config,
            output,
            deadline,
            submitted_at,
            json,
        }),
        Commands::Validate { rubric } => commands::validate::execute(rubric),
        Commands::Rules { file } => commands::rules::execute(file),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
