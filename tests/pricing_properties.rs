use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

use rwa_pricing::config::Config;
use rwa_pricing::shared::errors::{LimitExceeded, PricingError};
use rwa_pricing::shared::types::{RedeemableAsset, Token};
use rwa_pricing::{PricingService, RedemptionCalculator, StaticCatalog, SwapCalculator};

fn token(id: &str, price: f64, volume_24h: f64) -> Token {
    Token::new(id, &id.to_uppercase(), id, price, volume_24h)
}

fn holding(balance: f64, available: f64, ratio: f64, penalty_rate: f64, is_locked: bool) -> RedeemableAsset {
    RedeemableAsset {
        id: "p".to_string(),
        token_symbol: "PROP".to_string(),
        token_name: String::new(),
        underlying_asset: String::new(),
        balance,
        locked_amount: balance - available,
        available_amount: available,
        redemption_ratio: ratio,
        current_price: ratio,
        change_24h: 0.0,
        lock_end_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
        penalty_rate,
        is_locked,
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, failure_persistence: None, .. ProptestConfig::default() })]

    #[test]
    fn swap_output_is_reduced_by_fee_and_slippage(
        amount in 1e-6f64..1e9,
        from_price in 0.01f64..10_000.0,
        to_price in 0.01f64..10_000.0,
        volume in 0.0f64..1e8,
    ) {
        let calc = SwapCalculator::default();
        let quote = calc.quote(&token("a", from_price, volume), &token("b", to_price, 1.0), amount).unwrap();

        prop_assert!(quote.output_amount >= 0.0);
        prop_assert!(quote.output_amount < amount * quote.rate);
        prop_assert!(quote.slippage >= 0.0 && quote.slippage <= 0.05);
        prop_assert!(quote.minimum_received <= quote.output_amount);
    }

    #[test]
    fn same_token_swap_keeps_rate_one(amount in 1e-6f64..1e7) {
        let calc = SwapCalculator::default();
        let t = token("rwa-nyc", 125.80, 45_000.0);
        let quote = calc.quote(&t, &t, amount).unwrap();

        prop_assert_eq!(quote.rate, 1.0);
        let expected = amount * 0.997 * (1.0 - quote.slippage);
        prop_assert!((quote.output_amount - expected).abs() <= 1e-9 * expected.max(1.0));
    }

    #[test]
    fn redemption_value_identity(
        balance in 1.0f64..10_000.0,
        available_share in 0.0f64..=1.0,
        request_share in 0.01f64..=1.0,
        ratio in 0.01f64..1_000.0,
        penalty_rate in 0.0f64..=0.995,
        is_locked in any::<bool>(),
        early in any::<bool>(),
    ) {
        let available = balance * available_share;
        let asset = holding(balance, available, ratio, penalty_rate, is_locked);
        let max = asset.max_redeemable(early);
        let amount = max * request_share;
        prop_assume!(amount > 0.0);

        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let result = RedemptionCalculator::default().calculate(&asset, amount, early, now).unwrap();

        let expected = result.base_value - result.penalty - result.processing_fee;
        prop_assert!((result.final_value - expected).abs() <= 1e-9 * result.base_value.max(1.0));
        prop_assert!(result.final_value <= result.base_value);
        prop_assert!(result.final_value >= -1e-9 * result.base_value.max(1.0));
        if !(early && is_locked) {
            prop_assert_eq!(result.penalty, 0.0);
        }
    }

    #[test]
    fn normal_redemption_above_available_is_rejected(excess in 0.01f64..1_000.0) {
        let asset = holding(850.30, 350.30, 125.80, 0.15, true);
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let result = RedemptionCalculator::default().calculate(&asset, 350.30 + excess, false, now);
        let rejected = matches!(result, Err(PricingError::LimitExceeded(LimitExceeded::RedeemAmount { .. })));
        prop_assert!(rejected);
    }
}

#[test]
fn reference_scenarios_from_default_catalog() {
    let service = PricingService::new(&Config::default().pricing, StaticCatalog::default()).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

    let redemption = service.redeem("1", 100.0, true, now).unwrap();
    assert!((redemption.base_value - 12580.0).abs() < 1e-6);
    assert!((redemption.penalty - 1887.0).abs() < 1e-6);
    assert!((redemption.processing_fee - 62.9).abs() < 1e-6);
    assert!((redemption.final_value - 10630.1).abs() < 1e-6);

    let stake = service.stake("1", 1000.0, 12, now).unwrap();
    assert_eq!(stake.final_tokens, 1_250_000);

    assert!(matches!(
        service.redeem("1", 351.0, false, now),
        Err(PricingError::LimitExceeded(LimitExceeded::RedeemAmount { .. }))
    ));
}

#[test]
fn config_and_catalog_files_drive_the_service() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("Config.toml");
    let catalog_path = dir.path().join("catalog.toml");

    std::fs::write(&config_path, "[pricing]\nswap_fee_bps = 100\nmin_stake_usd = 50.0\n").unwrap();
    std::fs::write(
        &catalog_path,
        r#"
        [[tokens]]
        id = "gold"
        symbol = "GLD"
        name = "Gold Token"
        price = 2000.0
        volume_24h = 100000.0

        [[tokens]]
        id = "usd"
        symbol = "USD"
        name = "Dollar"
        price = 1.0
        volume_24h = 100000.0

        [[stakeable_assets]]
        id = "farm"
        name = "Farmland"
        yield_rate = 4.0
        token_ratio = 10.0
        status = "active"
        "#,
    )
    .unwrap();

    let config = Config::from_file(&config_path).unwrap();
    let catalog = StaticCatalog::from_file(&catalog_path).unwrap();
    let service = PricingService::new(&config.pricing, catalog).unwrap();

    let quote = service.quote("gold", "usd", 1.0, None).unwrap();
    assert_eq!(quote.fee_rate, 0.01);
    assert!(quote.output_amount < 2000.0 * 0.99);

    let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let stake = service.stake("farm", 100.0, 6, now).unwrap();
    assert_eq!(stake.final_tokens, 1100);
}
