use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use movierec::{
    cli::{self, Cli},
    config::Config,
};

fn main() -> anyhow::Result<ExitCode> {
    let config = Config::from_env()?;

    // Logs go to stderr so stdout only carries command output
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let ok = cli::run(cli, &config, io::stdin().lock(), io::stdout().lock())?;

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
