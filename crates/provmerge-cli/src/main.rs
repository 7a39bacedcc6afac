//! `provmerge`: merge PROV-JSON documents into a graph database.

mod cli;
mod import;

use clap::Parser;
use cli::Cli;
use provmerge_observability::init_tracing;
use provmerge_store::{ImportSummary, StoreError};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.log_format.into(), if cli.verbose { "info" } else { "warn" });

    match run(cli).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            let hint = err
                .chain()
                .find_map(|cause| cause.downcast_ref::<StoreError>())
                .and_then(StoreError::hint);
            if let Some(hint) = hint {
                eprintln!("Hint: {hint}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ImportSummary> {
    let config = cli.into_config()?;
    import::run(config).await
}
