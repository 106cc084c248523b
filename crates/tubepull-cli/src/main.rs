//! CLI entry point.
//!
//! Parses arguments, wires the adapters through `bootstrap`, and maps
//! handler errors to the process exit code.

use std::time::Duration;

use clap::{CommandFactory, Parser};

use tubepull_cli::logging::init_tracing;
use tubepull_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

async fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Download {
            url,
            out,
            concurrency,
            skip_existing,
            idle_timeout,
            api_key,
        } => {
            let config = CliConfig {
                output_dir: out,
                workers: concurrency,
                skip_existing,
                idle_timeout: Duration::from_secs(idle_timeout),
                api_key,
            };
            let ctx = bootstrap(&config)?;
            handlers::download::execute(&ctx, &url).await
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before parsing so env fallbacks see it
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    if let Err(e) = run(command).await {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
    Ok(())
}
