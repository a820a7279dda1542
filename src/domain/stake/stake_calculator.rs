use chrono::{DateTime, Utc};

use super::StakeCalculation;
use crate::config::{LockBonus, PricingCfg};
use crate::math::{floor_tokens, is_valid_amount, lock_fraction};
use crate::shared::errors::{InvalidInput, PricingError};
use crate::shared::types::StakeableAsset;
use crate::shared::utils::days_after;

#[derive(Debug, Clone)]
pub struct StakeCalculator {
    pub min_stake_usd: f64,
    pub days_per_lock_month: u32,
    pub lock_bonuses: Vec<LockBonus>,
}

impl Default for StakeCalculator {
    fn default() -> Self {
        Self::from_config(&PricingCfg::default())
    }
}

impl StakeCalculator {
    pub fn from_config(cfg: &PricingCfg) -> Self {
        Self {
            min_stake_usd: cfg.min_stake_usd,
            days_per_lock_month: cfg.days_per_lock_month,
            lock_bonuses: cfg.lock_bonuses.clone(),
        }
    }

    pub fn allowed_lock_periods(&self) -> Vec<u32> {
        self.lock_bonuses.iter().map(|b| b.months).collect()
    }

    pub fn lock_multiplier(&self, months: u32) -> Option<f64> {
        self.lock_bonuses
            .iter()
            .find(|b| b.months == months)
            .map(|b| b.multiplier)
    }

    /// Check the amount and lock period on their own; returns the lock multiplier
    pub fn validate_request(&self, amount: f64, lock_period: u32) -> Result<f64, PricingError> {
        if !is_valid_amount(amount) || amount == 0.0 {
            return Err(InvalidInput::NonPositiveAmount(amount).into());
        }
        if amount < self.min_stake_usd {
            return Err(InvalidInput::BelowMinimum {
                amount,
                minimum: self.min_stake_usd,
            }
            .into());
        }
        let multiplier = self.lock_multiplier(lock_period).ok_or_else(|| InvalidInput::InvalidLockPeriod {
            months: lock_period,
            allowed: self.allowed_lock_periods(),
        })?;
        Ok(multiplier)
    }

    pub fn calculate(
        &self,
        asset: &StakeableAsset,
        amount: f64,
        lock_period: u32,
        now: DateTime<Utc>,
    ) -> Result<StakeCalculation, PricingError> {
        let lock_multiplier = self.validate_request(amount, lock_period)?;
        if !asset.is_active() {
            return Err(InvalidInput::AssetNotStakeable(asset.id.clone()).into());
        }

        let base_tokens = amount * asset.token_ratio;
        let final_tokens = floor_tokens(base_tokens * lock_multiplier);
        let annual_yield = amount * asset.yield_rate / 100.0;
        let expected_yield = annual_yield * lock_fraction(lock_period);
        let lock_days = u64::from(lock_period) * u64::from(self.days_per_lock_month);
        let unlock_date = days_after(now, lock_days)?;

        Ok(StakeCalculation {
            asset_id: asset.id.clone(),
            stake_amount: amount,
            lock_period,
            base_tokens,
            lock_multiplier,
            lock_bonus: (lock_multiplier - 1.0) * 100.0,
            final_tokens,
            annual_yield_rate: asset.yield_rate,
            annual_yield,
            expected_yield,
            unlock_date,
        })
    }
}
