//! Application services and use cases

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::config::PricingCfg;
use crate::domain::catalog::{AssetSource, BalanceSource, PoolSource, PriceSource};
use crate::domain::portfolio::{BalanceSheet, RedemptionSummary};
use crate::domain::redeem::{RedemptionCalculation, RedemptionCalculator};
use crate::domain::stake::{StakeCalculation, StakeCalculator};
use crate::domain::swap::{SwapCalculator, SwapExecution, SwapQuote};
use crate::report::{PoolSnapshot, PortfolioOverview};
use crate::shared::errors::{AppError, InvalidInput, PricingError};
use crate::shared::types::Token;
use crate::shared::utils::format_usd;

/// Resolves ids against a catalog and runs the calculators
pub struct PricingService<C> {
    catalog: C,
    swap: SwapCalculator,
    redemption: RedemptionCalculator,
    stake: StakeCalculator,
}

impl<C> PricingService<C>
where
    C: PriceSource + AssetSource + BalanceSource + PoolSource,
{
    /// Fails if a holding's penalty rate plus the configured processing fee
    /// would leave a negative payout.
    pub fn new(cfg: &PricingCfg, catalog: C) -> Result<Self, AppError> {
        let redemption = RedemptionCalculator::from_config(cfg);
        for asset in catalog.redeemables() {
            redemption
                .validate_asset(asset)
                .map_err(|e| AppError::CatalogError(e.to_string()))?;
        }

        Ok(Self {
            catalog,
            swap: SwapCalculator::from_config(cfg),
            redemption,
            stake: StakeCalculator::from_config(cfg),
        })
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn tokens(&self) -> Vec<Token> {
        self.catalog.tokens().into_iter().cloned().collect()
    }

    fn resolve_token(&self, id: &str) -> Result<&Token, PricingError> {
        match self.catalog.token(id) {
            Some(token) if token.is_active => Ok(token),
            _ => {
                warn!("Unknown or inactive token requested: {}", id);
                Err(InvalidInput::UnknownToken(id.to_string()).into())
            }
        }
    }

    /// Quote a swap; `tolerance_bps` falls back to the configured default
    pub fn quote(
        &self,
        from_id: &str,
        to_id: &str,
        amount: f64,
        tolerance_bps: Option<u32>,
    ) -> Result<SwapQuote, PricingError> {
        let from = self.resolve_token(from_id)?;
        let to = self.resolve_token(to_id)?;
        let tolerance = tolerance_bps.unwrap_or(self.swap.slippage_tolerance_bps);

        let quote = self.swap.quote_with_tolerance(from, to, amount, tolerance)?;
        info!(
            "Quote {} {} -> {:.6} {} (rate {:.6}, slippage {:.4}%)",
            amount, from.symbol, quote.output_amount, to.symbol, quote.rate, quote.price_impact
        );
        Ok(quote)
    }

    /// Re-quote and check the swap against the holder's balance and limit.
    ///
    /// Without an explicit `balance` the catalog wallet is used.
    pub fn check_swap(
        &self,
        from_id: &str,
        to_id: &str,
        amount: f64,
        min_received: f64,
        balance: Option<f64>,
    ) -> Result<SwapExecution, PricingError> {
        let quote = self.quote(from_id, to_id, amount, None)?;
        let balance = balance.unwrap_or_else(|| self.catalog.balance_of(from_id));
        debug!("Checking swap {} against balance {} and min received {}", quote.id, balance, min_received);

        let execution = self.swap.check_execution(&quote, min_received, balance)?;
        info!("Swap {} accepted: {} {} -> {:.6} {}", quote.id, amount, from_id, execution.to_amount, to_id);
        Ok(execution)
    }

    pub fn redeem(
        &self,
        asset_id: &str,
        token_amount: f64,
        is_early_redeem: bool,
        now: DateTime<Utc>,
    ) -> Result<RedemptionCalculation, PricingError> {
        self.redemption.validate_amount(token_amount)?;
        let asset = self
            .catalog
            .redeemable(asset_id)
            .ok_or_else(|| InvalidInput::UnknownAsset(asset_id.to_string()))?;

        let calculation = self.redemption.calculate(asset, token_amount, is_early_redeem, now)?;
        info!(
            "Redeem {} {}: base {}, penalty {}, final {}",
            token_amount,
            asset.token_symbol,
            format_usd(calculation.base_value),
            format_usd(calculation.penalty),
            format_usd(calculation.final_value)
        );
        Ok(calculation)
    }

    pub fn stake(
        &self,
        asset_id: &str,
        amount: f64,
        lock_period: u32,
        now: DateTime<Utc>,
    ) -> Result<StakeCalculation, PricingError> {
        self.stake.validate_request(amount, lock_period)?;
        let asset = self
            .catalog
            .stakeable(asset_id)
            .ok_or_else(|| InvalidInput::UnknownAsset(asset_id.to_string()))?;

        let calculation = self.stake.calculate(asset, amount, lock_period, now)?;
        info!(
            "Stake {} in {} for {} months: {} tokens, expected yield {}",
            format_usd(amount),
            asset.name,
            lock_period,
            calculation.final_tokens,
            format_usd(calculation.expected_yield)
        );
        Ok(calculation)
    }

    pub fn pools(&self) -> Vec<PoolSnapshot> {
        let pools: Vec<PoolSnapshot> = self
            .catalog
            .pools()
            .iter()
            .map(|pool| PoolSnapshot {
                implied_price: pool.implied_price(),
                pool: pool.clone(),
            })
            .collect();
        debug!("Listing {} pools", pools.len());
        pools
    }

    pub fn portfolio(&self) -> PortfolioOverview {
        let redeemables = self.catalog.redeemables();
        let summary = RedemptionSummary::from_assets(redeemables.iter().copied());
        let wallet = BalanceSheet::value(self.catalog.balances(), &self.catalog);
        info!(
            "Portfolio: {} redeemable assets worth {}, wallet {}",
            summary.total_assets,
            format_usd(summary.total_value),
            format_usd(wallet.total_value)
        );

        PortfolioOverview {
            summary,
            redeemable_assets: redeemables.into_iter().cloned().collect(),
            stakeable_assets: self.catalog.stakeables().into_iter().cloned().collect(),
            wallet,
        }
    }
}
