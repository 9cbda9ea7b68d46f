use std::process::ExitCode;

use clap::Parser;
use spring83::cli::{run, Cli};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so board bodies on stdout stay exact.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("spring83=info,spring83_client=info,spring83_keygen=info")
        }))
        .init();

    // Usage errors exit with status 2.
    let cli = Cli::parse();

    let mut stdout = std::io::stdout().lock();
    match run(cli, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Runtime error: {e:#}");
            ExitCode::from(1)
        }
    }
}
