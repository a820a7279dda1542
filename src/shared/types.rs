//! Common types used across the application

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Token price snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub id: String,
    pub symbol: String,
    pub name: String,
    /// USD price
    pub price: f64,
    #[serde(default)]
    pub change_24h: f64,
    #[serde(default)]
    pub volume_24h: f64,
    #[serde(default)]
    pub market_cap: f64,
    #[serde(default)]
    pub decimals: u8,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Token {
    pub fn new(id: &str, symbol: &str, name: &str, price: f64, volume_24h: f64) -> Self {
        Self {
            id: id.to_string(),
            symbol: symbol.to_string(),
            name: name.to_string(),
            price,
            change_24h: 0.0,
            volume_24h,
            market_cap: 0.0,
            decimals: 18,
            is_active: true,
        }
    }
}

/// Listing state of a stakeable property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    Active,
    SoldOut,
}

/// Property that accepts USD stakes in exchange for minted tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakeableAsset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub estimated_value: f64,
    #[serde(default)]
    pub monthly_rent: f64,
    /// Annual yield in percent
    pub yield_rate: f64,
    /// Tokens minted per USD staked
    pub token_ratio: f64,
    #[serde(default)]
    pub total_supply: f64,
    #[serde(default)]
    pub circulating_supply: f64,
    #[serde(default)]
    pub available_for_staking: f64,
    pub status: AssetStatus,
}

impl StakeableAsset {
    pub fn is_active(&self) -> bool {
        self.status == AssetStatus::Active
    }
}

/// A token holding that can be redeemed back to USD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedeemableAsset {
    pub id: String,
    pub token_symbol: String,
    #[serde(default)]
    pub token_name: String,
    #[serde(default)]
    pub underlying_asset: String,
    pub balance: f64,
    pub locked_amount: f64,
    pub available_amount: f64,
    /// USD paid out per token
    pub redemption_ratio: f64,
    #[serde(default)]
    pub current_price: f64,
    #[serde(default)]
    pub change_24h: f64,
    pub lock_end_date: NaiveDate,
    /// Fraction of value withheld on early redemption of a locked position
    pub penalty_rate: f64,
    pub is_locked: bool,
}

impl RedeemableAsset {
    /// Upper bound on a single redemption
    pub fn max_redeemable(&self, is_early_redeem: bool) -> f64 {
        if is_early_redeem {
            self.balance
        } else {
            self.available_amount
        }
    }
}

/// Wallet holding of a single token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub token_id: String,
    pub amount: f64,
}

impl Balance {
    pub fn new(token_id: &str, amount: f64) -> Self {
        Self {
            token_id: token_id.to_string(),
            amount,
        }
    }
}

/// Two-token liquidity pool snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidityPool {
    pub id: String,
    pub token0: String,
    pub token1: String,
    /// Total value locked, USD
    pub liquidity: f64,
    #[serde(default)]
    pub volume_24h: f64,
    #[serde(default)]
    pub fees_24h: f64,
    /// Annualised fee return in percent
    #[serde(default)]
    pub apr: f64,
    #[serde(default)]
    pub total_supply: f64,
    pub reserve0: f64,
    pub reserve1: f64,
}

impl LiquidityPool {
    /// token1 per token0 implied by the reserves, `None` for an empty pool
    pub fn implied_price(&self) -> Option<f64> {
        (self.reserve0 > 0.0).then(|| self.reserve1 / self.reserve0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_redeemable() {
        let asset = RedeemableAsset {
            id: "1".to_string(),
            token_symbol: "NYC-RWA".to_string(),
            token_name: String::new(),
            underlying_asset: String::new(),
            balance: 850.30,
            locked_amount: 500.0,
            available_amount: 350.30,
            redemption_ratio: 125.80,
            current_price: 125.80,
            change_24h: 0.0,
            lock_end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            penalty_rate: 0.15,
            is_locked: true,
        };
        assert_eq!(asset.max_redeemable(false), 350.30);
        assert_eq!(asset.max_redeemable(true), 850.30);
    }

    #[test]
    fn test_asset_status_serde() {
        let json = serde_json::to_string(&AssetStatus::SoldOut).unwrap();
        assert_eq!(json, "\"sold_out\"");
    }

    #[test]
    fn test_pool_implied_price() {
        let mut pool = LiquidityPool {
            id: "pool_nyc_usdc".to_string(),
            token0: "rwa-nyc".to_string(),
            token1: "usdc".to_string(),
            liquidity: 850_000.0,
            volume_24h: 34_000.0,
            fees_24h: 102.0,
            apr: 22.3,
            total_supply: 750_000.0,
            reserve0: 6758.9,
            reserve1: 850_000.0,
        };
        let price = pool.implied_price().unwrap();
        assert!((price - 125.76).abs() < 0.01);

        pool.reserve0 = 0.0;
        assert_eq!(pool.implied_price(), None);
    }
}
