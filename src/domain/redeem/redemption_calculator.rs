use chrono::{DateTime, Utc};

use super::RedemptionCalculation;
use crate::config::PricingCfg;
use crate::math::{bps_to_fraction, calculate_fee, is_valid_amount};
use crate::shared::errors::{InvalidInput, LimitExceeded, PricingError};
use crate::shared::types::RedeemableAsset;
use crate::shared::utils::days_after;

#[derive(Debug, Clone)]
pub struct RedemptionCalculator {
    pub processing_fee_bps: u32,
    pub early_processing_days: u32,
    pub standard_processing_days: u32,
}

impl Default for RedemptionCalculator {
    fn default() -> Self {
        Self::from_config(&PricingCfg::default())
    }
}

impl RedemptionCalculator {
    pub fn from_config(cfg: &PricingCfg) -> Self {
        Self {
            processing_fee_bps: cfg.processing_fee_bps,
            early_processing_days: cfg.early_processing_days,
            standard_processing_days: cfg.standard_processing_days,
        }
    }

    /// Reject amounts that can never be redeemed, whatever the asset
    pub fn validate_amount(&self, token_amount: f64) -> Result<(), PricingError> {
        if !is_valid_amount(token_amount) || token_amount == 0.0 {
            return Err(InvalidInput::NonPositiveAmount(token_amount).into());
        }
        Ok(())
    }

    /// Check that `asset` can be valued: a positive ratio, and a penalty that
    /// together with the processing fee leaves a non-negative payout.
    pub fn validate_asset(&self, asset: &RedeemableAsset) -> Result<(), PricingError> {
        if !asset.redemption_ratio.is_finite() || asset.redemption_ratio <= 0.0 {
            return Err(InvalidInput::InvalidRedemptionRatio {
                asset: asset.id.clone(),
                ratio: asset.redemption_ratio,
            }
            .into());
        }
        let rate = asset.penalty_rate;
        if !rate.is_finite() || rate < 0.0 || rate + bps_to_fraction(self.processing_fee_bps) > 1.0 {
            return Err(InvalidInput::InvalidPenaltyRate {
                asset: asset.id.clone(),
                rate,
            }
            .into());
        }
        Ok(())
    }

    /// Value `token_amount` of `asset`.
    ///
    /// Normal redemption is bounded by the unlocked amount; early redemption
    /// may draw on the full balance but pays the asset's penalty while locked.
    pub fn calculate(
        &self,
        asset: &RedeemableAsset,
        token_amount: f64,
        is_early_redeem: bool,
        now: DateTime<Utc>,
    ) -> Result<RedemptionCalculation, PricingError> {
        self.validate_amount(token_amount)?;
        self.validate_asset(asset)?;

        let max_redeemable = asset.max_redeemable(is_early_redeem);
        if token_amount > max_redeemable {
            return Err(LimitExceeded::RedeemAmount {
                requested: token_amount,
                max_redeemable,
            }
            .into());
        }

        let base_value = token_amount * asset.redemption_ratio;
        let penalty = if is_early_redeem && asset.is_locked {
            base_value * asset.penalty_rate
        } else {
            0.0
        };
        let processing_fee = calculate_fee(base_value, self.processing_fee_bps);
        let final_value = base_value - penalty - processing_fee;

        let processing_days = if is_early_redeem {
            self.early_processing_days
        } else {
            self.standard_processing_days
        };
        let estimated_completion_date = days_after(now, u64::from(processing_days))?;

        Ok(RedemptionCalculation {
            asset_id: asset.id.clone(),
            token_amount,
            base_value,
            penalty,
            processing_fee,
            final_value,
            redemption_ratio: asset.redemption_ratio,
            is_early_redeem,
            processing_days,
            estimated_completion_date,
        })
    }
}
