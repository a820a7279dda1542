//! In-memory catalog seeded from built-in tables or a TOML file

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use super::{AssetSource, BalanceSource, PoolSource, PriceSource};
use crate::shared::errors::AppError;
use crate::shared::types::{AssetStatus, Balance, LiquidityPool, RedeemableAsset, StakeableAsset, Token};

/// Immutable token, asset, balance and pool tables
#[derive(Debug, Clone, Deserialize)]
pub struct StaticCatalog {
    #[serde(default)]
    tokens: Vec<Token>,
    #[serde(default)]
    stakeable_assets: Vec<StakeableAsset>,
    #[serde(default)]
    redeemable_assets: Vec<RedeemableAsset>,
    #[serde(default)]
    balances: Vec<Balance>,
    #[serde(default)]
    pools: Vec<LiquidityPool>,
}

impl StaticCatalog {
    pub fn new(
        tokens: Vec<Token>,
        stakeable_assets: Vec<StakeableAsset>,
        redeemable_assets: Vec<RedeemableAsset>,
        balances: Vec<Balance>,
    ) -> Result<Self, AppError> {
        let catalog = Self {
            tokens,
            stakeable_assets,
            redeemable_assets,
            balances,
            pools: Vec::new(),
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Replace the pool table. Pool tokens must already be in the token table.
    pub fn with_pools(mut self, pools: Vec<LiquidityPool>) -> Result<Self, AppError> {
        self.pools = pools;
        self.validate()?;
        Ok(self)
    }

    /// Load a catalog file. Sections that are missing stay empty.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            AppError::CatalogError(format!("Failed to read catalog file {}: {}", path.as_ref().display(), e))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, AppError> {
        let catalog: Self = toml::from_str(content)
            .map_err(|e| AppError::CatalogError(format!("Failed to parse catalog file: {}", e)))?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), AppError> {
        for token in &self.tokens {
            if !(token.price.is_finite() && token.price > 0.0) {
                return Err(AppError::CatalogError(format!(
                    "token {} has non-positive price {}",
                    token.id, token.price
                )));
            }
            if !token.change_24h.is_finite() {
                return Err(AppError::CatalogError(format!("token {} has non-finite change_24h", token.id)));
            }
            non_negative("token", &token.id, &[("volume_24h", token.volume_24h), ("market_cap", token.market_cap)])?;
        }
        for asset in &self.stakeable_assets {
            if !(asset.token_ratio.is_finite() && asset.token_ratio > 0.0) {
                return Err(AppError::CatalogError(format!(
                    "stakeable asset {} has non-positive token ratio {}",
                    asset.id, asset.token_ratio
                )));
            }
            non_negative(
                "stakeable asset",
                &asset.id,
                &[
                    ("yield_rate", asset.yield_rate),
                    ("estimated_value", asset.estimated_value),
                    ("monthly_rent", asset.monthly_rent),
                    ("total_supply", asset.total_supply),
                    ("circulating_supply", asset.circulating_supply),
                    ("available_for_staking", asset.available_for_staking),
                ],
            )?;
        }
        for asset in &self.redeemable_assets {
            if !(asset.redemption_ratio.is_finite() && asset.redemption_ratio > 0.0) {
                return Err(AppError::CatalogError(format!(
                    "redeemable asset {} has non-positive redemption ratio {}",
                    asset.id, asset.redemption_ratio
                )));
            }
            // NaN fails the range check too
            if !(0.0..=1.0).contains(&asset.penalty_rate) {
                return Err(AppError::CatalogError(format!(
                    "redeemable asset {} penalty rate {} outside [0, 1]",
                    asset.id, asset.penalty_rate
                )));
            }
            if !asset.change_24h.is_finite() {
                return Err(AppError::CatalogError(format!(
                    "redeemable asset {} has non-finite change_24h",
                    asset.id
                )));
            }
            non_negative(
                "redeemable asset",
                &asset.id,
                &[
                    ("balance", asset.balance),
                    ("locked_amount", asset.locked_amount),
                    ("available_amount", asset.available_amount),
                    ("current_price", asset.current_price),
                ],
            )?;
            if asset.available_amount > asset.balance {
                return Err(AppError::CatalogError(format!(
                    "redeemable asset {} available amount {} exceeds balance {}",
                    asset.id, asset.available_amount, asset.balance
                )));
            }
        }
        for balance in &self.balances {
            non_negative("balance", &balance.token_id, &[("amount", balance.amount)])?;
        }
        for pool in &self.pools {
            for token_id in [&pool.token0, &pool.token1] {
                if self.token(token_id).is_none() {
                    return Err(AppError::CatalogError(format!(
                        "pool {} references unknown token {}",
                        pool.id, token_id
                    )));
                }
            }
            non_negative(
                "pool",
                &pool.id,
                &[
                    ("liquidity", pool.liquidity),
                    ("volume_24h", pool.volume_24h),
                    ("fees_24h", pool.fees_24h),
                    ("apr", pool.apr),
                    ("total_supply", pool.total_supply),
                    ("reserve0", pool.reserve0),
                    ("reserve1", pool.reserve1),
                ],
            )?;
        }
        Ok(())
    }
}

/// Every listed field must be finite and non-negative
fn non_negative(kind: &str, id: &str, fields: &[(&str, f64)]) -> Result<(), AppError> {
    match fields.iter().find(|(_, v)| !(v.is_finite() && *v >= 0.0)) {
        Some((name, value)) => Err(AppError::CatalogError(format!(
            "{} {} has invalid {} {}",
            kind, id, name, value
        ))),
        None => Ok(()),
    }
}

impl PriceSource for StaticCatalog {
    fn token(&self, id: &str) -> Option<&Token> {
        self.tokens.iter().find(|t| t.id == id)
    }

    fn tokens(&self) -> Vec<&Token> {
        self.tokens.iter().filter(|t| t.is_active).collect()
    }
}

impl AssetSource for StaticCatalog {
    fn stakeable(&self, id: &str) -> Option<&StakeableAsset> {
        self.stakeable_assets.iter().find(|a| a.id == id)
    }

    fn stakeables(&self) -> Vec<&StakeableAsset> {
        self.stakeable_assets.iter().filter(|a| a.is_active()).collect()
    }

    fn redeemable(&self, id: &str) -> Option<&RedeemableAsset> {
        self.redeemable_assets.iter().find(|a| a.id == id)
    }

    fn redeemables(&self) -> Vec<&RedeemableAsset> {
        self.redeemable_assets.iter().collect()
    }
}

impl BalanceSource for StaticCatalog {
    fn balances(&self) -> &[Balance] {
        &self.balances
    }
}

impl PoolSource for StaticCatalog {
    fn pools(&self) -> &[LiquidityPool] {
        &self.pools
    }
}

#[allow(clippy::too_many_arguments)]
fn pool(
    id: &str,
    token0: &str,
    token1: &str,
    liquidity: f64,
    volume_24h: f64,
    fees_24h: f64,
    apr: f64,
    total_supply: f64,
    reserve0: f64,
    reserve1: f64,
) -> LiquidityPool {
    LiquidityPool {
        id: id.to_string(),
        token0: token0.to_string(),
        token1: token1.to_string(),
        liquidity,
        volume_24h,
        fees_24h,
        apr,
        total_supply,
        reserve0,
        reserve1,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn token(
    id: &str,
    symbol: &str,
    name: &str,
    price: f64,
    change_24h: f64,
    volume_24h: f64,
    market_cap: f64,
    decimals: u8,
) -> Token {
    Token {
        id: id.to_string(),
        symbol: symbol.to_string(),
        name: name.to_string(),
        price,
        change_24h,
        volume_24h,
        market_cap,
        decimals,
        is_active: true,
    }
}

impl Default for StaticCatalog {
    /// Demo tables: two blue-chip tokens and three property tokens
    fn default() -> Self {
        let tokens = vec![
            token("eth", "ETH", "Ethereum", 2340.50, 2.45, 1_250_000.0, 280_000_000_000.0, 18),
            token("usdc", "USDC", "USD Coin", 1.00, 0.01, 890_000.0, 32_000_000_000.0, 6),
            token("rwa-nyc", "NYC-RWA", "New York Property Token", 125.80, 5.67, 45_000.0, 85_000_000.0, 18),
            token("rwa-london", "LON-RWA", "London Property Token", 89.25, -1.23, 28_000.0, 62_000_000.0, 18),
            token("rwa-tokyo", "TKY-RWA", "Tokyo Property Token", 67.40, 3.89, 67_000.0, 94_000_000.0, 18),
        ];

        let stakeable_assets = vec![
            StakeableAsset {
                id: "1".to_string(),
                name: "Manhattan Luxury Apartments, Tower A".to_string(),
                location: "New York, USA".to_string(),
                estimated_value: 850_000.0,
                monthly_rent: 4_500.0,
                yield_rate: 6.35,
                token_ratio: 1000.0,
                total_supply: 850_000_000.0,
                circulating_supply: 680_000_000.0,
                available_for_staking: 170_000_000.0,
                status: AssetStatus::Active,
            },
            StakeableAsset {
                id: "2".to_string(),
                name: "Central London Office Building".to_string(),
                location: "London, UK".to_string(),
                estimated_value: 1_200_000.0,
                monthly_rent: 8_200.0,
                yield_rate: 8.2,
                token_ratio: 800.0,
                total_supply: 960_000_000.0,
                circulating_supply: 960_000_000.0,
                available_for_staking: 0.0,
                status: AssetStatus::SoldOut,
            },
            StakeableAsset {
                id: "3".to_string(),
                name: "Shibuya Commercial Complex".to_string(),
                location: "Tokyo, Japan".to_string(),
                estimated_value: 2_100_000.0,
                monthly_rent: 12_000.0,
                yield_rate: 6.85,
                token_ratio: 1200.0,
                total_supply: 2_520_000_000.0,
                circulating_supply: 1_680_000_000.0,
                available_for_staking: 840_000_000.0,
                status: AssetStatus::Active,
            },
        ];

        let redeemable_assets = vec![
            RedeemableAsset {
                id: "1".to_string(),
                token_symbol: "NYC-RWA".to_string(),
                token_name: "New York Property Token".to_string(),
                underlying_asset: "Manhattan Luxury Apartments, Tower A".to_string(),
                balance: 850.30,
                locked_amount: 500.00,
                available_amount: 350.30,
                redemption_ratio: 125.80,
                current_price: 125.80,
                change_24h: 2.45,
                lock_end_date: date(2024, 12, 31),
                penalty_rate: 0.15,
                is_locked: true,
            },
            RedeemableAsset {
                id: "2".to_string(),
                token_symbol: "LON-RWA".to_string(),
                token_name: "London Property Token".to_string(),
                underlying_asset: "Central London Office Building".to_string(),
                balance: 420.15,
                locked_amount: 0.0,
                available_amount: 420.15,
                redemption_ratio: 89.25,
                current_price: 89.25,
                change_24h: -1.23,
                lock_end_date: date(2024, 6, 15),
                penalty_rate: 0.0,
                is_locked: false,
            },
            RedeemableAsset {
                id: "3".to_string(),
                token_symbol: "TKY-RWA".to_string(),
                token_name: "Tokyo Property Token".to_string(),
                underlying_asset: "Shibuya Commercial Complex".to_string(),
                balance: 1250.75,
                locked_amount: 800.00,
                available_amount: 450.75,
                redemption_ratio: 67.40,
                current_price: 67.40,
                change_24h: 3.89,
                lock_end_date: date(2025, 3, 20),
                penalty_rate: 0.12,
                is_locked: true,
            },
        ];

        let balances = vec![
            Balance::new("eth", 5.2341),
            Balance::new("usdc", 12_450.00),
            Balance::new("rwa-nyc", 850.30),
            Balance::new("rwa-london", 420.15),
            Balance::new("rwa-tokyo", 1250.75),
        ];

        let pools = vec![
            pool("pool_eth_usdc", "eth", "usdc", 1_250_000.0, 89_000.0, 267.0, 15.6, 1_000_000.0, 534.2, 1_250_000.0),
            pool("pool_nyc_usdc", "rwa-nyc", "usdc", 850_000.0, 34_000.0, 102.0, 22.3, 750_000.0, 6758.9, 850_000.0),
            pool("pool_london_eth", "rwa-london", "eth", 420_000.0, 18_000.0, 54.0, 18.9, 500_000.0, 4707.8, 179.4),
        ];

        Self {
            tokens,
            stakeable_assets,
            redeemable_assets,
            balances,
            pools,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_lookups() {
        let catalog = StaticCatalog::default();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.tokens().len(), 5);
        assert_eq!(catalog.token("rwa-nyc").map(|t| t.price), Some(125.80));
        assert!(catalog.token("btc").is_none());

        // London office is sold out
        let open: Vec<&str> = catalog.stakeables().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(open, vec!["1", "3"]);
        assert!(catalog.stakeable("2").is_some());

        assert_eq!(catalog.redeemables().len(), 3);
        assert_eq!(catalog.balance_of("usdc"), 12_450.00);
        assert_eq!(catalog.balance_of("btc"), 0.0);

        assert_eq!(catalog.pools().len(), 3);
        assert_eq!(catalog.pool("pool_london_eth").map(|p| p.token1.as_str()), Some("eth"));
    }

    #[test]
    fn test_from_toml() {
        let catalog = StaticCatalog::from_toml(
            r#"
            [[tokens]]
            id = "dai"
            symbol = "DAI"
            name = "Dai"
            price = 1.0
            volume_24h = 500000.0

            [[tokens]]
            id = "old"
            symbol = "OLD"
            name = "Retired"
            price = 2.0
            is_active = false

            [[redeemable_assets]]
            id = "9"
            token_symbol = "PAR-RWA"
            balance = 10.0
            locked_amount = 4.0
            available_amount = 6.0
            redemption_ratio = 50.0
            lock_end_date = "2026-01-01"
            penalty_rate = 0.1
            is_locked = true
            "#,
        )
        .unwrap();

        assert_eq!(catalog.tokens().len(), 1);
        assert!(catalog.token("old").is_some());
        assert_eq!(catalog.redeemable("9").map(|a| a.lock_end_date), Some(date(2026, 1, 1)));
        assert!(catalog.stakeables().is_empty());
        assert!(catalog.balances().is_empty());
        assert!(catalog.pools().is_empty());
    }

    #[test]
    fn test_rejects_zero_price() {
        let err = StaticCatalog::from_toml(
            r#"
            [[tokens]]
            id = "void"
            symbol = "VOID"
            name = "Void"
            price = 0.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::CatalogError(_)));
    }

    #[test]
    fn test_rejects_available_above_balance() {
        let mut asset = StaticCatalog::default().redeemable_assets[0].clone();
        asset.available_amount = asset.balance + 1.0;
        assert!(StaticCatalog::new(vec![], vec![], vec![asset], vec![]).is_err());
    }

    #[test]
    fn test_rejects_nan_fields() {
        let err = StaticCatalog::from_toml(
            r#"
            [[tokens]]
            id = "dai"
            symbol = "DAI"
            name = "Dai"
            price = 1.0
            volume_24h = nan
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::CatalogError(ref msg) if msg.contains("volume_24h")));

        let err = StaticCatalog::from_toml(
            r#"
            [[redeemable_assets]]
            id = "9"
            token_symbol = "PAR-RWA"
            balance = 10.0
            locked_amount = 4.0
            available_amount = 6.0
            redemption_ratio = nan
            lock_end_date = "2026-01-01"
            penalty_rate = 0.1
            is_locked = true
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::CatalogError(ref msg) if msg.contains("redemption ratio")));

        let mut asset = StaticCatalog::default().redeemable_assets[0].clone();
        asset.penalty_rate = f64::NAN;
        assert!(StaticCatalog::new(vec![], vec![], vec![asset], vec![]).is_err());

        let balances = vec![Balance::new("eth", f64::NAN)];
        assert!(StaticCatalog::new(vec![], vec![], vec![], balances).is_err());
    }

    #[test]
    fn test_pool_validation() {
        let catalog = StaticCatalog::default();
        let tokens = catalog.tokens.clone();
        let mut bad = catalog.pools[0].clone();
        bad.token1 = "btc".to_string();
        assert!(StaticCatalog::new(tokens.clone(), vec![], vec![], vec![])
            .unwrap()
            .with_pools(vec![bad])
            .is_err());

        let mut bad = catalog.pools[0].clone();
        bad.reserve0 = f64::INFINITY;
        assert!(StaticCatalog::new(tokens, vec![], vec![], vec![])
            .unwrap()
            .with_pools(vec![bad])
            .is_err());
    }
}
