use std::io::{self, Write};

use askdata::config::{self, ConnectionConfig, OutputOptions};
use askdata::output::FAILURE_MARKER;
use askdata::session;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// askdata - ask a question grounded on an Azure Cognitive Search index
#[derive(Parser)]
#[command(name = "askdata")]
#[command(about = "Ask Azure OpenAI a question grounded on your own data")]
#[command(version)]
struct Cli {}

fn main() {
    let _cli = Cli::parse();

    // Logs go to stderr; stdout carries the answer.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    config::load_dotenv();
    let connection = ConnectionConfig::from_env();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = session::run(
        &connection,
        OutputOptions::default(),
        &mut stdin.lock(),
        &mut stdout.lock(),
    );

    // Failures are reported, not signalled through the exit code.
    if let Err(e) = result {
        tracing::error!(error = %e, "session aborted");
        let mut out = stdout.lock();
        // stdout may already be closed; the error is logged above either way.
        let _ = writeln!(out, "{FAILURE_MARKER}").and_then(|()| writeln!(out, "{e:#}"));
    }
}
