use clap::Parser;
use std::process::exit;

mod cli;

use cli::{run, Cli, ExitCode};

fn main() {
    init_tracing();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => exit(ExitCode::Ok as i32),
        Err(code) => exit(code as i32),
    }
}

fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lint_compose=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
