//! CLI commands and handlers
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::application::services::PricingService;
use crate::domain::catalog::{AssetSource, BalanceSource, PoolSource, PriceSource};
use crate::report::{PoolList, PricingReport, TokenList};
use crate::shared::errors::AppError;

#[derive(Parser, Debug)]
#[command(name = "rwa-pricing")]
#[command(version, about = "Swap, stake and redemption pricing for RWA property tokens")]
pub struct Cli {
    /// Path to config file (optional)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Token/asset catalog file (overrides config)
    #[arg(long, global = true)]
    pub catalog: Option<String>,

    /// Evaluate dates as of this RFC 3339 instant instead of now
    #[arg(long, global = true)]
    pub now: Option<DateTime<Utc>>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List active tokens and their prices
    Tokens,

    /// Quote a swap between two tokens
    Quote {
        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,

        /// Amount of the input token
        #[arg(long)]
        amount: f64,

        /// Slippage tolerance in basis points (default from config)
        #[arg(long)]
        tolerance_bps: Option<u32>,
    },

    /// Check a swap against a minimum output and the holder's balance
    Swap {
        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,

        #[arg(long)]
        amount: f64,

        /// Minimum output the holder accepts
        #[arg(long)]
        min_received: f64,

        /// Balance of the input token (defaults to the catalog wallet)
        #[arg(long)]
        balance: Option<f64>,
    },

    /// Value a redemption of held tokens
    Redeem {
        #[arg(long)]
        asset: String,

        /// Number of tokens to redeem
        #[arg(long)]
        amount: f64,

        /// Redeem before the lock ends (penalty applies while locked)
        #[arg(long)]
        early: bool,
    },

    /// Value a USD stake into a property
    Stake {
        #[arg(long)]
        asset: String,

        /// USD amount
        #[arg(long)]
        amount: f64,

        /// Lock period in months
        #[arg(long, default_value_t = 12)]
        lock: u32,
    },

    /// Holder totals, open assets and wallet balances
    Portfolio,

    /// Liquidity pools with the price their reserves imply
    Pools,
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Tokens => "tokens",
            Commands::Quote { .. } => "quote",
            Commands::Swap { .. } => "swap",
            Commands::Redeem { .. } => "redeem",
            Commands::Stake { .. } => "stake",
            Commands::Portfolio => "portfolio",
            Commands::Pools => "pools",
        }
    }
}

/// Outcome of one command: a report, or a calculator rejection
pub enum CommandOutcome {
    Success(PricingReport),
    Rejected(PricingReport),
}

impl CommandOutcome {
    pub fn report(&self) -> &PricingReport {
        match self {
            CommandOutcome::Success(report) | CommandOutcome::Rejected(report) => report,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CommandOutcome::Success(_))
    }
}

pub struct CommandExecutor<C> {
    service: PricingService<C>,
    now: DateTime<Utc>,
}

impl<C> CommandExecutor<C>
where
    C: PriceSource + AssetSource + BalanceSource + PoolSource,
{
    pub fn new(service: PricingService<C>, now: DateTime<Utc>) -> Self {
        Self { service, now }
    }

    /// Calculator rejections become error reports; anything else is an `Err`
    pub fn execute(&self, command: &Commands) -> Result<CommandOutcome, AppError> {
        info!("Running {} command", command.name());
        match self.run(command) {
            Ok(report) => Ok(CommandOutcome::Success(report)),
            Err(AppError::Pricing(err)) => Ok(CommandOutcome::Rejected(PricingReport::error(&err, self.now)?)),
            Err(err) => Err(err),
        }
    }

    fn run(&self, command: &Commands) -> Result<PricingReport, AppError> {
        let kind = command.name();
        let report = match command {
            Commands::Tokens => {
                let list = TokenList {
                    tokens: self.service.tokens(),
                };
                PricingReport::new(kind, &list, self.now)
            }
            Commands::Quote {
                from,
                to,
                amount,
                tolerance_bps,
            } => {
                let quote = self.service.quote(from, to, *amount, *tolerance_bps)?;
                PricingReport::new(kind, &quote, self.now)
            }
            Commands::Swap {
                from,
                to,
                amount,
                min_received,
                balance,
            } => {
                let execution = self.service.check_swap(from, to, *amount, *min_received, *balance)?;
                PricingReport::new(kind, &execution, self.now)
            }
            Commands::Redeem { asset, amount, early } => {
                let calculation = self.service.redeem(asset, *amount, *early, self.now)?;
                PricingReport::new(kind, &calculation, self.now)
            }
            Commands::Stake { asset, amount, lock } => {
                let calculation = self.service.stake(asset, *amount, *lock, self.now)?;
                PricingReport::new(kind, &calculation, self.now)
            }
            Commands::Portfolio => PricingReport::new(kind, &self.service.portfolio(), self.now),
            Commands::Pools => {
                let list = PoolList {
                    pools: self.service.pools(),
                };
                PricingReport::new(kind, &list, self.now)
            }
        }?;
        Ok(report)
    }
}
