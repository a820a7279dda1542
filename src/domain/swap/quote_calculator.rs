//! Swap quote calculation

use super::{SwapExecution, SwapQuote};
use crate::config::PricingCfg;
use crate::math::{bps_to_fraction, calculate_min_out, estimate_slippage, is_valid_amount};
use crate::shared::errors::{InvalidInput, LimitExceeded, PricingError};
use crate::shared::types::Token;
use crate::shared::utils::generate_id;

/// Prices swaps from static token prices and 24h volume
#[derive(Debug, Clone)]
pub struct SwapCalculator {
    pub fee_bps: u32,
    pub slippage_tolerance_bps: u32,
    pub max_slippage_bps: u32,
    pub liquidity_depth_multiplier: f64,
    pub slippage_factor: f64,
}

impl Default for SwapCalculator {
    fn default() -> Self {
        Self::from_config(&PricingCfg::default())
    }
}

impl SwapCalculator {
    pub fn from_config(cfg: &PricingCfg) -> Self {
        Self {
            fee_bps: cfg.swap_fee_bps,
            slippage_tolerance_bps: cfg.slippage_tolerance_bps,
            max_slippage_bps: cfg.max_slippage_bps,
            liquidity_depth_multiplier: cfg.liquidity_depth_multiplier,
            slippage_factor: cfg.slippage_factor,
        }
    }

    /// Quote with the default slippage tolerance
    pub fn quote(&self, from: &Token, to: &Token, amount: f64) -> Result<SwapQuote, PricingError> {
        self.quote_with_tolerance(from, to, amount, self.slippage_tolerance_bps)
    }

    /// Quote `amount` of `from` into `to`.
    ///
    /// A zero amount yields a zero quote; negative or non-finite amounts and
    /// non-positive prices are rejected.
    pub fn quote_with_tolerance(
        &self,
        from: &Token,
        to: &Token,
        amount: f64,
        tolerance_bps: u32,
    ) -> Result<SwapQuote, PricingError> {
        if !is_valid_amount(amount) {
            return Err(InvalidInput::NonPositiveAmount(amount).into());
        }
        if tolerance_bps >= 10_000 {
            return Err(InvalidInput::InvalidTolerance(tolerance_bps).into());
        }
        for token in [from, to] {
            if !(token.price.is_finite() && token.price > 0.0) {
                return Err(InvalidInput::NonPositivePrice {
                    token: token.id.clone(),
                    price: token.price,
                }
                .into());
            }
        }

        let rate = from.price / to.price;
        let fee_rate = bps_to_fraction(self.fee_bps);
        let slippage_tolerance = bps_to_fraction(tolerance_bps);

        let mut quote = SwapQuote {
            id: generate_id(),
            from_token: from.id.clone(),
            to_token: to.id.clone(),
            input_amount: amount,
            output_amount: 0.0,
            rate,
            fee_rate,
            fee_amount: 0.0,
            slippage: 0.0,
            price_impact: 0.0,
            minimum_received: 0.0,
            slippage_tolerance,
            route: vec![from.id.clone(), to.id.clone()],
        };
        if amount == 0.0 {
            return Ok(quote);
        }

        let slippage = estimate_slippage(
            amount,
            from.volume_24h,
            self.liquidity_depth_multiplier,
            self.slippage_factor,
            self.max_slippage_bps,
        );
        let gross = amount * rate;
        let output_amount = gross * (1.0 - fee_rate) * (1.0 - slippage);

        quote.output_amount = output_amount;
        quote.fee_amount = gross * fee_rate;
        quote.slippage = slippage;
        quote.price_impact = slippage * 100.0;
        quote.minimum_received = calculate_min_out(output_amount, tolerance_bps);
        Ok(quote)
    }

    /// Check a fresh quote against the caller's limits before executing it
    pub fn check_execution(
        &self,
        quote: &SwapQuote,
        min_received: f64,
        balance: f64,
    ) -> Result<SwapExecution, PricingError> {
        if !is_valid_amount(min_received) {
            return Err(InvalidInput::NegativeMinReceived(min_received).into());
        }
        if quote.input_amount <= 0.0 {
            return Err(InvalidInput::NonPositiveAmount(quote.input_amount).into());
        }
        if !is_valid_amount(balance) {
            return Err(InvalidInput::InvalidBalance(balance).into());
        }
        if balance < quote.input_amount {
            return Err(LimitExceeded::InsufficientBalance {
                requested: quote.input_amount,
                balance,
            }
            .into());
        }
        if quote.output_amount < min_received {
            return Err(LimitExceeded::Slippage {
                output: quote.output_amount,
                min_received,
            }
            .into());
        }

        Ok(SwapExecution {
            quote_id: quote.id.clone(),
            from_token: quote.from_token.clone(),
            to_token: quote.to_token.clone(),
            from_amount: quote.input_amount,
            to_amount: quote.output_amount,
            min_received,
            fee: quote.fee_rate * 100.0,
            slippage: quote.slippage * 100.0,
        })
    }
}
