//! Application layer - use cases and CLI commands

pub mod commands;
pub mod services;

pub use commands::{Cli, CommandExecutor, CommandOutcome, Commands};
pub use services::PricingService;
