use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

use crate::shared::errors::AppError;

/// Longest lock period a bonus table may offer (100 years)
pub const MAX_LOCK_MONTHS: u32 = 1_200;
/// Longest settlement delay a redemption may take
pub const MAX_PROCESSING_DAYS: u32 = 3_650;

/// Extra multiplier on minted tokens for a given lock period
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LockBonus {
    pub months: u32,
    pub multiplier: f64,
}

impl LockBonus {
    pub fn new(months: u32, multiplier: f64) -> Self {
        Self { months, multiplier }
    }
}

/// Business constants shared by every calculator
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PricingCfg {
    pub swap_fee_bps: u32,
    pub slippage_tolerance_bps: u32,
    pub max_slippage_bps: u32,
    /// Liquidity depth is assumed to be this multiple of 24h volume
    pub liquidity_depth_multiplier: f64,
    pub slippage_factor: f64,
    pub processing_fee_bps: u32,
    pub min_stake_usd: f64,
    pub early_processing_days: u32,
    pub standard_processing_days: u32,
    pub days_per_lock_month: u32,
    pub lock_bonuses: Vec<LockBonus>,
}

impl Default for PricingCfg {
    fn default() -> Self {
        Self {
            swap_fee_bps: 30,
            slippage_tolerance_bps: 200,
            max_slippage_bps: 500,
            liquidity_depth_multiplier: 10.0,
            slippage_factor: 0.1,
            processing_fee_bps: 50,
            min_stake_usd: 1000.0,
            early_processing_days: 1,
            standard_processing_days: 3,
            days_per_lock_month: 30,
            lock_bonuses: vec![
                LockBonus::new(3, 1.0),
                LockBonus::new(6, 1.1),
                LockBonus::new(12, 1.25),
                LockBonus::new(24, 1.5),
            ],
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogCfg {
    /// TOML file replacing the built-in token and asset tables
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingCfg {
    pub filter: String,
}

impl Default for LoggingCfg {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pricing: PricingCfg,
    pub catalog: CatalogCfg,
    pub logging: LoggingCfg,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path.as_ref())
            .with_context(|| format!("read config {}", path.as_ref().display()))?;
        let cfg = Self::from_toml(&s)?;
        Ok(cfg)
    }

    pub fn from_toml(s: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(s).context("parse Config.toml")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let p = &self.pricing;
        for (name, bps) in [
            ("swap_fee_bps", p.swap_fee_bps),
            ("slippage_tolerance_bps", p.slippage_tolerance_bps),
            ("processing_fee_bps", p.processing_fee_bps),
        ] {
            if bps >= 10_000 {
                return Err(AppError::ConfigError(format!("{} must be below 10000, got {}", name, bps)));
            }
        }
        if p.max_slippage_bps > 10_000 {
            return Err(AppError::ConfigError(format!(
                "max_slippage_bps must be at most 10000, got {}",
                p.max_slippage_bps
            )));
        }
        if !p.liquidity_depth_multiplier.is_finite()
            || p.liquidity_depth_multiplier <= 0.0
            || !p.slippage_factor.is_finite()
            || p.slippage_factor < 0.0
        {
            return Err(AppError::ConfigError("slippage model parameters must be positive".to_string()));
        }
        if !p.min_stake_usd.is_finite() || p.min_stake_usd < 0.0 {
            return Err(AppError::ConfigError(format!("min_stake_usd cannot be negative, got {}", p.min_stake_usd)));
        }
        for (name, days) in [
            ("early_processing_days", p.early_processing_days),
            ("standard_processing_days", p.standard_processing_days),
        ] {
            if days > MAX_PROCESSING_DAYS {
                return Err(AppError::ConfigError(format!(
                    "{} must be at most {}, got {}",
                    name, MAX_PROCESSING_DAYS, days
                )));
            }
        }
        if !(1..=31).contains(&p.days_per_lock_month) {
            return Err(AppError::ConfigError(format!(
                "days_per_lock_month must be between 1 and 31, got {}",
                p.days_per_lock_month
            )));
        }
        if p.lock_bonuses.is_empty() {
            return Err(AppError::ConfigError("lock_bonuses cannot be empty".to_string()));
        }
        for bonus in &p.lock_bonuses {
            if bonus.months == 0
                || bonus.months > MAX_LOCK_MONTHS
                || !bonus.multiplier.is_finite()
                || bonus.multiplier <= 0.0
            {
                return Err(AppError::ConfigError(format!("invalid lock bonus {:?}", bonus)));
            }
        }
        Ok(())
    }
}
