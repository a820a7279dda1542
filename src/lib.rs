//! RWA pricing - swap quotes, stake minting and redemption values
//! for tokenized real-world property assets

pub mod application;
pub mod config;
pub mod domain;
pub mod math;
pub mod report;
pub mod shared;

// Re-export main types for convenience
pub use application::PricingService;
pub use domain::catalog::{AssetSource, BalanceSource, PoolSource, PriceSource, StaticCatalog};
pub use domain::redeem::RedemptionCalculator;
pub use domain::stake::StakeCalculator;
pub use domain::swap::SwapCalculator;
pub use shared::errors::PricingError;
