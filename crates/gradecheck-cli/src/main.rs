//! `gradecheck` — validate a grader configuration document.
//!
//! Exit status: 0 when the document is valid, 1 when validation found
//! structural violations, 2 when the run aborted before a verdict.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gradecheck_core::{document, GraderRegistry, ValidationOutcome};
use gradecheck_runtime::{run, HttpSchemaSource};

#[derive(Parser)]
#[command(
    name = "gradecheck",
    version,
    about = "Validate a grader configuration document against the registered graders' schemas"
)]
struct Cli {
    /// Grader configuration document to validate (YAML or JSON)
    document: PathBuf,

    /// Registry file mapping grader names to schema endpoints
    #[arg(short, long)]
    registry: PathBuf,

    /// Per-endpoint schema retrieval timeout, in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
}

async fn execute(cli: &Cli) -> anyhow::Result<ValidationOutcome> {
    let registry = GraderRegistry::from_yaml_file(&cli.registry)
        .with_context(|| format!("loading registry {}", cli.registry.display()))?;
    let document = document::from_yaml_file(&cli.document)
        .with_context(|| format!("loading document {}", cli.document.display()))?;

    let source = HttpSchemaSource::with_timeout(Duration::from_secs(cli.timeout_secs))?;

    tracing::info!(
        graders = registry.len(),
        document = %cli.document.display(),
        "validating grader configuration"
    );

    Ok(run(&source, &registry, &document).await?)
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match execute(&cli).await {
        Ok(outcome) => match outcome.report() {
            None => {
                println!("configuration is valid");
                ExitCode::SUCCESS
            }
            Some(report) => {
                eprintln!("{report}");
                ExitCode::from(1)
            }
        },
        Err(err) => {
            eprintln!("gradecheck: run aborted: {err:#}");
            ExitCode::from(2)
        }
    }
}
