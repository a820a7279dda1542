//! Stake domain - USD stakes minted into property tokens

mod stake_calculator;

pub use stake_calculator::StakeCalculator;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StakeCalculation {
    pub asset_id: String,
    pub stake_amount: f64,
    pub lock_period: u32,
    /// amount * token_ratio, before the lock bonus
    pub base_tokens: f64,
    pub lock_multiplier: f64,
    /// Bonus in percent over base tokens
    pub lock_bonus: f64,
    pub final_tokens: u64,
    pub annual_yield_rate: f64,
    pub annual_yield: f64,
    pub expected_yield: f64,
    pub unlock_date: DateTime<Utc>,
}
