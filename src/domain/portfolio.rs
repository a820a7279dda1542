//! Portfolio summaries over redeemable holdings and wallet balances

use serde::{Deserialize, Serialize};

use super::catalog::PriceSource;
use crate::shared::types::{Balance, RedeemableAsset};

/// USD totals over a holder's redeemable positions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RedemptionSummary {
    pub total_value: f64,
    pub available_value: f64,
    pub locked_value: f64,
    pub total_assets: usize,
}

impl RedemptionSummary {
    pub fn from_assets<'a, I>(assets: I) -> Self
    where
        I: IntoIterator<Item = &'a RedeemableAsset>,
    {
        assets.into_iter().fold(Self::default(), |mut acc, asset| {
            acc.total_value += asset.balance * asset.current_price;
            acc.available_value += asset.available_amount * asset.current_price;
            acc.locked_value += asset.locked_amount * asset.current_price;
            acc.total_assets += 1;
            acc
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceLine {
    pub token_id: String,
    pub symbol: Option<String>,
    pub amount: f64,
    pub price: f64,
    pub value: f64,
}

/// Wallet balances valued at catalog prices
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    pub total_value: f64,
    pub balances: Vec<BalanceLine>,
}

impl BalanceSheet {
    /// Balances of tokens the price source does not know are valued at zero
    pub fn value<P: PriceSource + ?Sized>(balances: &[Balance], prices: &P) -> Self {
        let lines: Vec<BalanceLine> = balances
            .iter()
            .map(|b| {
                let token = prices.token(&b.token_id);
                let price = token.map(|t| t.price).unwrap_or(0.0);
                BalanceLine {
                    token_id: b.token_id.clone(),
                    symbol: token.map(|t| t.symbol.clone()),
                    amount: b.amount,
                    price,
                    value: b.amount * price,
                }
            })
            .collect();
        let total_value = lines.iter().map(|l| l.value).sum();
        Self {
            total_value,
            balances: lines,
        }
    }
}
