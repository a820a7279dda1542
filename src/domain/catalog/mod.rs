//! Catalog domain - token prices and asset tables the calculators read from

mod static_catalog;

pub use static_catalog::StaticCatalog;

use crate::shared::types::{Balance, LiquidityPool, RedeemableAsset, StakeableAsset, Token};

/// Token/price lookup
pub trait PriceSource {
    /// Any known token, active or not
    fn token(&self, id: &str) -> Option<&Token>;

    /// Active tokens only
    fn tokens(&self) -> Vec<&Token>;
}

/// Property and holding lookup
pub trait AssetSource {
    fn stakeable(&self, id: &str) -> Option<&StakeableAsset>;

    /// Assets currently open for staking
    fn stakeables(&self) -> Vec<&StakeableAsset>;

    fn redeemable(&self, id: &str) -> Option<&RedeemableAsset>;

    fn redeemables(&self) -> Vec<&RedeemableAsset>;
}

/// Wallet balances of the current holder
pub trait BalanceSource {
    fn balances(&self) -> &[Balance];

    fn balance_of(&self, token_id: &str) -> f64 {
        self.balances()
            .iter()
            .find(|b| b.token_id == token_id)
            .map(|b| b.amount)
            .unwrap_or(0.0)
    }
}

/// Liquidity pool lookup
pub trait PoolSource {
    fn pools(&self) -> &[LiquidityPool];

    fn pool(&self, id: &str) -> Option<&LiquidityPool> {
        self.pools().iter().find(|p| p.id == id)
    }
}
