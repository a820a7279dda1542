// src/app.rs
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::info;

use rwa_pricing::application::{Cli, CommandExecutor, CommandOutcome, Commands, PricingService};
use rwa_pricing::config::Config;
use rwa_pricing::domain::catalog::StaticCatalog;

#[derive(Debug, Clone)]
pub struct AppCfg {
    pub config: Config,
    pub catalog_path: Option<String>,
    pub now: DateTime<Utc>,
}

impl AppCfg {
    /// Priority: CLI args > config file > defaults
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = match &cli.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        let catalog_path = cli.catalog.clone().or_else(|| config.catalog.path.clone());

        Ok(Self {
            config,
            catalog_path,
            now: cli.now.unwrap_or_else(Utc::now),
        })
    }

    pub fn load_catalog(&self) -> Result<StaticCatalog> {
        match &self.catalog_path {
            Some(path) => {
                info!("Loading catalog from {}", path);
                let catalog = StaticCatalog::from_file(path).with_context(|| format!("load catalog {}", path))?;
                Ok(catalog)
            }
            None => Ok(StaticCatalog::default()),
        }
    }
}

/// Run one command and print its report. Returns whether the calculator accepted it.
pub fn run(app_cfg: AppCfg, command: &Commands) -> Result<bool> {
    let catalog = app_cfg.load_catalog()?;
    let service = PricingService::new(&app_cfg.config.pricing, catalog)?;
    let executor = CommandExecutor::new(service, app_cfg.now);

    let outcome = executor.execute(command)?;
    let json = outcome.report().to_json().context("serialize report")?;
    match outcome {
        CommandOutcome::Success(_) => {
            println!("{}", json);
            Ok(true)
        }
        CommandOutcome::Rejected(_) => {
            eprintln!("{}", json);
            Ok(false)
        }
    }
}
