//! repoaudit - A CLI tool to audit repositories against compliance heuristics
//!
//! This is the main entry point for the CLI application.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use repoaudit::cli::{exit_codes, Cli, Commands};
use repoaudit::error::AuditError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let result: Result<i32, AuditError> = match cli.command {
        Commands::Audit(args) => repoaudit::cli::commands::audit::execute(args),
        Commands::Render(args) => repoaudit::cli::commands::render::execute(args),
        Commands::Metrics(args) => repoaudit::cli::commands::metrics::execute(args).await,
        Commands::Publish(args) => repoaudit::cli::commands::publish::execute(args).await,
    };

    match result {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}
