use pricing::{price, BlackScholesMerton, NormalizedParameters, OptionPricer, PricingInputs};
use proptest::prelude::*;

fn market_inputs() -> impl Strategy<Value = PricingInputs> {
    (
        10.0..500.0_f64,
        10.0..500.0_f64,
        1.0..1095.0_f64,
        5.0..80.0_f64,
        -1.0..10.0_f64,
        0.0..8.0_f64,
    )
        .prop_map(|(spot, strike, expiry, vol, rate, dividend)| {
            PricingInputs::new(spot, strike, expiry, vol, rate, dividend)
        })
}

proptest! {
    #[test]
    fn put_call_parity(inputs in market_inputs()) {
        let quote = BlackScholesMerton::quote(&inputs).unwrap();
        let np = NormalizedParameters::from(&inputs);
        let forward_gap = inputs.spot * (-np.dividend * np.time).exp()
            - inputs.strike * (-np.rate * np.time).exp();
        let parity = quote.call.premium - quote.put.premium;
        // each premium carries up to half a cent of rounding
        prop_assert!((parity - forward_gap).abs() <= 0.01 + 1e-9);
    }

    #[test]
    fn delta_bounds(inputs in market_inputs()) {
        let quote = BlackScholesMerton::quote(&inputs).unwrap();
        prop_assert!((0.0..=1.0).contains(&quote.call.delta));
        prop_assert!((-1.0..=0.0).contains(&quote.put.delta));
    }

    #[test]
    fn gamma_and_vega_non_negative(inputs in market_inputs()) {
        let quote = BlackScholesMerton::quote(&inputs).unwrap();
        prop_assert!(quote.call.gamma >= 0.0);
        prop_assert!(quote.call.vega >= 0.0);
        prop_assert_eq!(quote.call.gamma, quote.put.gamma);
        prop_assert_eq!(quote.call.vega, quote.put.vega);
    }

    #[test]
    fn symmetric_at_the_money_without_carry(
        spot in 10.0..500.0_f64,
        expiry in 1.0..1095.0_f64,
        vol in 5.0..80.0_f64,
    ) {
        let quote = price(spot, spot, expiry, vol, 0.0, 0.0).unwrap();
        prop_assert!((quote.call.premium - quote.put.premium).abs() <= 0.01 + 1e-9);
    }

    #[test]
    fn deterministic(inputs in market_inputs()) {
        let first = BlackScholesMerton::quote(&inputs).unwrap();
        let second = BlackScholesMerton::quote(&inputs).unwrap();
        prop_assert_eq!(first.d1.to_bits(), second.d1.to_bits());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn premiums_non_negative(inputs in market_inputs()) {
        let quote = BlackScholesMerton::quote(&inputs).unwrap();
        prop_assert!(quote.call.premium >= 0.0);
        prop_assert!(quote.put.premium >= 0.0);
    }

    #[test]
    fn rejects_non_positive_volatility(inputs in market_inputs(), vol in -50.0..=0.0_f64) {
        let inputs = PricingInputs { volatility_pct: vol, ..inputs };
        prop_assert!(BlackScholesMerton::quote(&inputs).is_err());
    }
}
