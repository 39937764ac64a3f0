use std::process::ExitCode;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use doodles_engine::{SubmissionEngine, SubmissionReport, UrlSource};
use doodles_logging::doodles_debug;

use super::cli::Cli;
use super::logging;

/// Parses arguments, runs one submission and maps the outcome to an exit code.
pub async fn run_app() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            let _ = err.print();
            return ExitCode::FAILURE;
        }
    };

    logging::initialize(cli.verbose);

    match submit(&cli).await {
        Ok(report) => {
            doodles_debug!(
                "submitted {} URL(s) from {}; status {}",
                report.urls.len(),
                match report.source {
                    UrlSource::Cli => "arguments",
                    UrlSource::Sitemap => "sitemap",
                },
                report.response.status
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn submit(cli: &Cli) -> anyhow::Result<SubmissionReport> {
    let config = cli.config()?;
    let engine = SubmissionEngine::new(&config).context("failed to build HTTP client")?;
    let report = engine.run(&config, &cli.urls).await?;
    Ok(report)
}
