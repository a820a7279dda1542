// src/math.rs

pub const BPS_DENOMINATOR: f64 = 10_000.0;

/// Convert basis points to a fraction (30 bps -> 0.003)
pub fn bps_to_fraction(bps: u32) -> f64 {
    bps as f64 / BPS_DENOMINATOR
}

/// Calculate minimum output amount with slippage protection
pub fn calculate_min_out(amount_out: f64, slippage_bps: u32) -> f64 {
    amount_out * (1.0 - bps_to_fraction(slippage_bps))
}

/// Portion of `amount` taken by a fee of `fee_bps`
pub fn calculate_fee(amount: f64, fee_bps: u32) -> f64 {
    amount * bps_to_fraction(fee_bps)
}

/// Estimate slippage as a fraction of the trade.
///
/// Liquidity depth is modelled as `volume_24h * depth_multiplier`; slippage
/// grows linearly with the trade's share of that depth and is clamped to
/// `max_slippage_bps`. Zero or negative volume saturates at the cap.
pub fn estimate_slippage(
    amount: f64,
    volume_24h: f64,
    depth_multiplier: f64,
    slippage_factor: f64,
    max_slippage_bps: u32,
) -> f64 {
    let cap = bps_to_fraction(max_slippage_bps);
    let liquidity_depth = volume_24h * depth_multiplier;
    if liquidity_depth <= 0.0 {
        return cap;
    }
    let slippage = (amount / liquidity_depth) * slippage_factor;
    slippage.clamp(0.0, cap)
}

/// Fraction of a year covered by a lock of `months`
pub fn lock_fraction(months: u32) -> f64 {
    months as f64 / 12.0
}

/// Whole tokens; saturates at `u64::MAX`
pub fn floor_tokens(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.floor() as u64
    } else {
        0
    }
}

/// Non-negative, finite amount check
pub fn is_valid_amount(amount: f64) -> bool {
    amount.is_finite() && amount >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bps_to_fraction() {
        assert_eq!(bps_to_fraction(30), 0.003);
        assert_eq!(bps_to_fraction(10_000), 1.0);
    }

    #[test]
    fn test_calculate_min_out() {
        let min_out = calculate_min_out(100.0, 100); // 1% slippage
        assert!((min_out - 99.0).abs() < 1e-9);
    }

    #[test]
    fn test_calculate_fee() {
        assert!((calculate_fee(12580.0, 50) - 62.9).abs() < 1e-9);
    }

    #[test]
    fn test_estimate_slippage() {
        // 1 ETH against 1.25M volume: (1 / 12.5M) * 0.1
        let slippage = estimate_slippage(1.0, 1_250_000.0, 10.0, 0.1, 500);
        assert!((slippage - 8e-9).abs() < 1e-15);

        let capped = estimate_slippage(1e12, 45_000.0, 10.0, 0.1, 500);
        assert_eq!(capped, 0.05);

        assert_eq!(estimate_slippage(1.0, 0.0, 10.0, 0.1, 500), 0.05);
    }

    #[test]
    fn test_floor_tokens() {
        assert_eq!(floor_tokens(1_250_000.0), 1_250_000);
        assert_eq!(floor_tokens(1_099_999.99), 1_099_999);
        assert_eq!(floor_tokens(f64::NAN), 0);
        assert_eq!(floor_tokens(-3.0), 0);
    }

    #[test]
    fn test_lock_fraction() {
        assert_eq!(lock_fraction(6), 0.5);
        assert_eq!(lock_fraction(24), 2.0);
    }
}
