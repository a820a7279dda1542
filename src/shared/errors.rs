//! Error handling for the application

use thiserror::Error;

/// Rejected arguments: the request can never succeed as written
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidInput {
    #[error("Amount must be a positive finite number, got {0}")]
    NonPositiveAmount(f64),

    #[error("Token not found: {0}")]
    UnknownToken(String),

    #[error("Asset not found: {0}")]
    UnknownAsset(String),

    #[error("Asset {0} is not open for staking")]
    AssetNotStakeable(String),

    #[error("Minimum stake amount is ${minimum}, got ${amount}")]
    BelowMinimum { amount: f64, minimum: f64 },

    #[error("Lock period must be one of {allowed:?} months, got {months}")]
    InvalidLockPeriod { months: u32, allowed: Vec<u32> },

    #[error("Token {token} has a non-positive price: {price}")]
    NonPositivePrice { token: String, price: f64 },

    #[error("Slippage tolerance must be below 10000 bps, got {0}")]
    InvalidTolerance(u32),

    #[error("Minimum received cannot be negative, got {0}")]
    NegativeMinReceived(f64),

    #[error("Balance must be a non-negative finite number, got {0}")]
    InvalidBalance(f64),

    #[error("Asset {asset} penalty rate {rate} plus processing fee exceeds the redemption value")]
    InvalidPenaltyRate { asset: String, rate: f64 },

    #[error("Asset {asset} redemption ratio must be positive, got {ratio}")]
    InvalidRedemptionRatio { asset: String, ratio: f64 },

    #[error("Date {days} days ahead is out of range")]
    DateOutOfRange { days: i64 },
}

/// Requests that are well formed but exceed what the position allows
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LimitExceeded {
    #[error("Redeem amount {requested} exceeds max redeemable {max_redeemable}")]
    RedeemAmount { requested: f64, max_redeemable: f64 },

    #[error("Slippage tolerance exceeded: output {output} is below minimum {min_received}")]
    Slippage { output: f64, min_received: f64 },

    #[error("Insufficient balance: {balance} available, {requested} requested")]
    InsufficientBalance { requested: f64, balance: f64 },
}

/// Calculator failure returned to the caller
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    #[error("Limit exceeded: {0}")]
    LimitExceeded(#[from] LimitExceeded),
}

impl PricingError {
    /// Short machine-readable kind, used in reports
    pub fn kind(&self) -> &'static str {
        match self {
            PricingError::InvalidInput(_) => "invalid_input",
            PricingError::LimitExceeded(_) => "limit_exceeded",
        }
    }
}

/// General application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Catalog error: {0}")]
    CatalogError(String),

    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
