//! Quotes on disk through curve construction and valuation into a store.

use std::io::Write;

use approx::assert_relative_eq;
use proptest::prelude::*;

use ratekit_analytics::prelude::*;
use ratekit_bonds::prelude::*;
use ratekit_core::daycounts::DayCountConvention;
use ratekit_core::types::{Compounding, Date, Frequency, InstrumentId};
use ratekit_curves::{Curve, FlatForwardCurve};
use ratekit_feeds::{CsvQuoteFeed, InMemoryResultStore, ResultStore};

const CURVE: &str = r#"
name = "USD.SWAP"
calendar = "WeekendsOnly"
business_day_convention = "ModifiedFollowing"

[[helpers]]
type = "deposit"
id = "USD.DEP3M"
tenor = "3M"

[[helpers]]
type = "deposit"
id = "USD.DEP6M"
tenor = "6M"

[[helpers]]
type = "swap"
id = "USD.SW2Y"
tenor = "2Y"

[[helpers]]
type = "swap"
id = "USD.SW5Y"
tenor = "5Y"

[[helpers]]
type = "swap"
id = "USD.SW10Y"
tenor = "10Y"
"#;

const ENGINE: &str = r#"
[solver]
tolerance = 1e-12

[options]
volatility = 0.008
lattice_steps = 120
"#;

fn d(y: i32, m: u32, day: u32) -> Date {
    Date::from_ymd(y, m, day).unwrap()
}

fn quote_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "instrument_id,date,value").unwrap();
    for (id, value) in [
        ("USD.DEP3M", "0.0430"),
        ("USD.DEP6M", "0.0425"),
        ("USD.SW2Y", "0.0400"),
        ("USD.SW5Y", "0.0385"),
        ("USD.SW10Y", "0.0395"),
    ] {
        writeln!(file, "{id},2025-03-14,{value}").unwrap();
    }
    // A stale quote on another date must not be picked up.
    writeln!(file, "USD.SW5Y,2025-03-13,0.0500").unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn csv_quotes_to_stored_results() {
    let today = d(2025, 3, 14);
    let file = quote_file();
    let feed = CsvQuoteFeed::from_path(file.path()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("engine.toml");
    std::fs::write(&config_path, ENGINE).unwrap();
    let config = AnalyticsConfig::from_file(&config_path).unwrap();
    assert_eq!(config.options.lattice_steps, 120);

    let definition = CurveDefinition::from_toml_str(CURVE).unwrap();
    let built = CurveBuilder::new(&feed, config)
        .build_with_report(&definition, today)
        .unwrap();
    assert!(built.report.all_within(1e-9));
    let curve = built.curve;

    let bullet = FixedRateBond::builder()
        .id("UST 3.85 2030")
        .coupon_rate(0.0385)
        .issue_date(d(2025, 3, 14))
        .maturity(d(2030, 3, 14))
        .build()
        .unwrap();
    let callable = CallableFixedRateBond::new(
        FixedRateBond::new(BondTerms::new("CORP 5 2032", d(2024, 3, 14), d(2032, 3, 14)), 0.05).unwrap(),
        CallSchedule::new(vec![
            CallEntry::new(d(2027, 3, 15), 101.0),
            CallEntry::new(d(2029, 3, 14), 100.0),
        ])
        .unwrap(),
    )
    .unwrap();

    let engine = ValuationEngine::new(config);
    let store: InMemoryResultStore<ValuationResult> = InMemoryResultStore::new();
    let requests = vec![
        ValuationRequest::new(bullet),
        ValuationRequest::new(callable).with_market_price(104.0),
    ];
    for request in &requests {
        engine
            .value_and_store(&request.instrument, &curve, today, request.market_dirty_price, &store)
            .unwrap();
    }
    assert_eq!(store.len(), 2);

    // A 5Y bond at the 5Y swap rate on the same conventions is close to par.
    let bullet = store.get(&InstrumentId::new("UST 3.85 2030"), today).unwrap().unwrap();
    assert!((bullet.dirty_price - 100.0).abs() < 0.05, "{}", bullet.dirty_price);
    assert_relative_eq!(bullet.yield_to_maturity, 0.0385, epsilon = 5e-4);

    let callable = store.get(&InstrumentId::new("CORP 5 2032"), today).unwrap().unwrap();
    assert!(callable.oas.is_some() && callable.z_spread.is_some());
    assert!(callable.oas.unwrap() < callable.z_spread.unwrap());
    assert_eq!(callable.accrued_interest, 0.0);
    assert!(callable.effective_duration.unwrap() > 0.0);
}

#[test]
fn batch_matches_single_valuations() {
    let today = d(2025, 3, 14);
    let curve = FlatForwardCurve::new(today, 0.035);
    let engine = ValuationEngine::default();

    let requests: Vec<ValuationRequest> = (1..=6)
        .map(|years| {
            let terms = BondTerms::new(format!("B{years}"), d(2025, 3, 14), d(2025 + years, 3, 14));
            ValuationRequest::new(FixedRateBond::new(terms, 0.04).unwrap())
        })
        .collect();

    let batch = engine.value_batch(&requests, &curve, today);
    for (request, result) in requests.iter().zip(&batch) {
        let single = engine.value(&request.instrument, &curve, today, None).unwrap();
        assert_eq!(result.as_ref().unwrap(), &single);
    }
}

#[test]
fn reference_date_discount_is_one() {
    let today = d(2025, 3, 14);
    let file = quote_file();
    let feed = CsvQuoteFeed::from_path(file.path()).unwrap();
    let definition = CurveDefinition::from_toml_str(CURVE).unwrap();

    for interpolation in [
        ratekit_curves::Interpolation::LogLinearDiscount,
        ratekit_curves::Interpolation::LinearZero,
    ] {
        let config = AnalyticsConfig::default().with_interpolation(interpolation);
        let curve = CurveBuilder::new(&feed, config).build(&definition, today).unwrap();
        assert_eq!(curve.discount_factor(today).unwrap(), 1.0);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn yield_recovers_flat_rate(rate in 0.001f64..0.12, years in 1i32..15) {
        let today = d(2025, 3, 14);
        let terms = BondTerms::new("P", today, d(2025 + years, 3, 14))
            .with_frequency(Frequency::Annual)
            .with_day_count(DayCountConvention::Act365Fixed)
            .with_calendar(ratekit_core::calendars::CalendarId::WeekendsOnly)
            .with_business_day_convention(ratekit_core::calendars::BusinessDayConvention::Unadjusted)
            .with_yield_compounding(Compounding::Continuous);
        let bond = FixedRateBond::new(terms, 0.05).unwrap();
        let curve = FlatForwardCurve::new(today, rate);

        let result = ValuationEngine::default().value(&bond.into(), &curve, today, None).unwrap();
        prop_assert!((result.yield_to_maturity - rate).abs() < 1e-8);
        prop_assert!(result.modified_duration > 0.0);
    }
}
