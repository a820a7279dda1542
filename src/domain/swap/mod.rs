//! Swap domain - quotes and pre-execution checks

mod quote_calculator;

pub use quote_calculator::SwapCalculator;

use serde::{Deserialize, Serialize};

/// Priced swap between two catalog tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapQuote {
    pub id: String,
    pub from_token: String,
    pub to_token: String,
    pub input_amount: f64,
    /// Expected output, in `to_token` units
    pub output_amount: f64,
    pub rate: f64,
    /// Fee as a fraction (0.003 = 0.3%)
    pub fee_rate: f64,
    /// Fee in `to_token` units
    pub fee_amount: f64,
    /// Estimated slippage as a fraction, never above the configured cap
    pub slippage: f64,
    /// Price impact in percent
    pub price_impact: f64,
    pub minimum_received: f64,
    pub slippage_tolerance: f64,
    pub route: Vec<String>,
}

impl SwapQuote {
    pub fn is_zero(&self) -> bool {
        self.input_amount == 0.0
    }
}

/// Swap accepted by the execution check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapExecution {
    pub quote_id: String,
    pub from_token: String,
    pub to_token: String,
    pub from_amount: f64,
    pub to_amount: f64,
    pub min_received: f64,
    /// Fee in percent
    pub fee: f64,
    /// Slippage in percent
    pub slippage: f64,
}
