// src/report.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::portfolio::{BalanceSheet, RedemptionSummary};
use crate::shared::errors::PricingError;
use crate::shared::types::{LiquidityPool, RedeemableAsset, StakeableAsset, Token};

/// JSON envelope printed by the CLI
#[derive(Debug, Serialize, Deserialize)]
pub struct PricingReport {
    pub kind: String,
    pub timestamp: DateTime<Utc>,
    pub data: serde_json::Value,
}

/// Everything the catalog offers, plus holder totals
#[derive(Debug, Serialize, Deserialize)]
pub struct PortfolioOverview {
    pub summary: RedemptionSummary,
    pub redeemable_assets: Vec<RedeemableAsset>,
    pub stakeable_assets: Vec<StakeableAsset>,
    pub wallet: BalanceSheet,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenList {
    pub tokens: Vec<Token>,
}

/// Pool row with the token1/token0 price its reserves imply
#[derive(Debug, Serialize, Deserialize)]
pub struct PoolSnapshot {
    #[serde(flatten)]
    pub pool: LiquidityPool,
    pub implied_price: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PoolList {
    pub pools: Vec<PoolSnapshot>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub error: String,
    pub message: String,
}

impl From<&PricingError> for ErrorDetails {
    fn from(err: &PricingError) -> Self {
        Self {
            error: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

impl PricingReport {
    pub fn new<T: Serialize>(kind: &str, data: &T, timestamp: DateTime<Utc>) -> Result<Self, serde_json::Error> {
        Ok(Self {
            kind: kind.to_string(),
            timestamp,
            data: serde_json::to_value(data)?,
        })
    }

    pub fn error(err: &PricingError, timestamp: DateTime<Utc>) -> Result<Self, serde_json::Error> {
        Self::new("error", &ErrorDetails::from(err), timestamp)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::errors::LimitExceeded;
    use chrono::TimeZone;

    #[test]
    fn test_report_envelope() {
        let ts = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let summary = RedemptionSummary {
            total_value: 10.0,
            available_value: 4.0,
            locked_value: 6.0,
            total_assets: 1,
        };
        let report = PricingReport::new("summary", &summary, ts).unwrap();
        let json = report.to_json().unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["kind"], "summary");
        assert_eq!(parsed["data"]["total_assets"], 1);
        assert_eq!(parsed["timestamp"], "2024-06-01T00:00:00Z");
    }

    #[test]
    fn test_error_report() {
        let ts = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let err: PricingError = LimitExceeded::Slippage {
            output: 1.0,
            min_received: 2.0,
        }
        .into();
        let report = PricingReport::error(&err, ts).unwrap();
        assert_eq!(report.kind, "error");
        assert_eq!(report.data["error"], "limit_exceeded");
    }
}
