//! Domain layer - pricing calculators and the tables they read

pub mod catalog;
pub mod portfolio;
pub mod redeem;
pub mod stake;
pub mod swap;
