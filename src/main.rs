mod app;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use rwa_pricing::application::Cli;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let app_cfg = app::AppCfg::from_cli(&cli)?;

    // RUST_LOG wins over the config file filter; logs go to stderr so stdout stays JSON
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&app_cfg.config.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if app::run(app_cfg, &cli.command)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
