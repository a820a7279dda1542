//! Redemption domain - converting held tokens back to USD

mod redemption_calculator;

pub use redemption_calculator::RedemptionCalculator;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Breakdown of a redemption request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedemptionCalculation {
    pub asset_id: String,
    pub token_amount: f64,
    pub base_value: f64,
    pub penalty: f64,
    pub processing_fee: f64,
    pub final_value: f64,
    pub redemption_ratio: f64,
    pub is_early_redeem: bool,
    pub processing_days: u32,
    pub estimated_completion_date: DateTime<Utc>,
}
