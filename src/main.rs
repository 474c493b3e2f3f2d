//! `pkg-merge` binary: reassembles split PKG packages from the command line.
//!
//! Parses CLI arguments, installs a log subscriber and runs the two-phase
//! merge, printing progress to standard output.

mod cli;
mod invocation;

use std::{io, process::ExitCode};

use clap::Parser;
use log::{error, info, warn};
use pkg_merge::{ConsoleProgress, DiscoveryError, Error, merge_directory};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cli = cli::Cli::parse();
    let request = match invocation::resolve(cli) {
        Ok(request) => request,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let stdout = io::stdout();
    let mut console = ConsoleProgress::new(stdout.lock());
    let summary = match merge_directory(
        &request.source,
        &request.destination,
        request.mode,
        &request.options,
        &mut console,
    ) {
        Ok(summary) => summary,
        Err(err) => {
            error!("{err}");
            if matches!(err, Error::Discovery(DiscoveryError::MultipleTerminals { .. })) {
                info!("use mode '-multiple' to process multiple PKG groups independently");
            }
            return ExitCode::FAILURE;
        }
    };
    drop(console);

    if !summary.skipped.is_empty() {
        info!("{} file(s) skipped during discovery", summary.skipped.len());
    }
    for failure in &summary.merge.failed {
        warn!("package {} was not merged: {}", failure.identifier, failure.error);
    }

    let failed = summary.merge.failed.len();
    if failed == 0 {
        println!("\n[success] completed");
    } else {
        println!("\n[warn] completed; {failed} package(s) failed to merge");
    }
    for path in &summary.merge.produced {
        println!("The file was created: {}", path.display());
    }

    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
