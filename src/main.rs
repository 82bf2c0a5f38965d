use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use autopush::cli::Cli;
use autopush::core::style;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let fallback = if cli.verbose { "autopush=debug" } else { "autopush=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.run() {
        Ok(()) => {
            println!();
            println!("{}", style::success("All done!"));
            println!();
            ExitCode::SUCCESS
        }
        // Guidance for these was already printed
        Err(e) if e.is_precondition() => ExitCode::FAILURE,
        Err(e) => {
            tracing::debug!(error = %e, "run failed");
            println!();
            println!("{}", style::error(&format!("{}", e)));
            println!(
                "{}",
                style::hint("Operation failed. Please check the errors above.")
            );
            println!();
            ExitCode::FAILURE
        }
    }
}
