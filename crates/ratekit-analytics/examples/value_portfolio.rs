//! Curve construction and valuation from files.
//!
//! Reads engine settings, a curve definition and a day of quotes from
//! `examples/data`, bootstraps the curve, values a small set of bonds and
//! keeps the results in an in-memory store.
//!
//! Run with: RUST_LOG=info cargo run -p ratekit-analytics --example value_portfolio

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ratekit_analytics::prelude::*;
use ratekit_bonds::prelude::*;
use ratekit_core::types::{Date, Frequency};
use ratekit_curves::Curve;
use ratekit_feeds::{CsvQuoteFeed, InMemoryResultStore, ResultStore};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("examples").join("data")
}

fn portfolio(curve: Arc<dyn Curve>) -> Result<Vec<ValuationRequest>, BondError> {
    let d = |y, m, day| Date::from_ymd(y, m, day);

    let note = FixedRateBond::builder()
        .id("UST 3.5 2030")
        .coupon_rate(0.035)
        .issue_date(d(2025, 11, 30)?)
        .maturity(d(2030, 11, 30)?)
        .build()?;

    let long_bond = FixedRateBond::builder()
        .id("UST 4.625 2055")
        .coupon_rate(0.04625)
        .issue_date(d(2025, 8, 15)?)
        .maturity(d(2055, 8, 15)?)
        .build()?;

    let floater = FloatingRateNote::new(
        BondTerms::new("FRN SOFR+50 2028", d(2025, 12, 2)?, d(2028, 12, 2)?)
            .with_frequency(Frequency::Quarterly),
        0.005,
    )?
    .with_index_curve(curve);

    let callable = CallableFixedRateBond::new(
        FixedRateBond::new(BondTerms::new("CORP 5.25 2035", d(2025, 3, 1)?, d(2035, 3, 1)?), 0.0525)?,
        CallSchedule::new(vec![
            CallEntry::new(d(2028, 3, 1)?, 102.0),
            CallEntry::new(d(2030, 3, 1)?, 101.0),
            CallEntry::new(d(2032, 3, 1)?, 100.0),
        ])?,
    )?;

    Ok(vec![
        ValuationRequest::new(note).with_market_price(99.80),
        ValuationRequest::new(long_bond).with_market_price(100.15),
        ValuationRequest::new(floater),
        ValuationRequest::new(callable).with_market_price(104.20),
    ])
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let today = Date::from_ymd(2025, 11, 28)?;
    let dir = data_dir();

    let config = AnalyticsConfig::from_file(dir.join("engine.toml"))?;
    let definition = CurveDefinition::from_file(dir.join("usd_curve.toml"))?;
    let feed = CsvQuoteFeed::from_path(dir.join("quotes.csv"))?;
    info!(quotes = feed.len(), "market data loaded");

    let built = CurveBuilder::new(&feed, config).build_with_report(&definition, today)?;
    println!("Curve {} as of {today}", definition.name);
    println!("{:<12} {:>12} {:>12} {:>10}", "helper", "maturity", "quote", "error");
    for check in built.report.checks() {
        println!(
            "{:<12} {:>12} {:>11.4}% {:>10.2e}",
            check.helper,
            check.maturity.to_string(),
            check.observed * 100.0,
            check.error
        );
    }

    let curve: Arc<dyn Curve> = Arc::new(built.curve);
    let engine = ValuationEngine::new(config);
    let store: InMemoryResultStore<ValuationResult> = InMemoryResultStore::new();

    println!();
    println!(
        "{:<18} {:>9} {:>9} {:>8} {:>7} {:>8} {:>8} {:>8}",
        "instrument", "dirty", "clean", "ytm%", "dur", "z bp", "oas bp", "ytw%"
    );
    let requests = portfolio(Arc::clone(&curve))?;
    for (request, result) in requests.iter().zip(engine.value_batch(&requests, curve.as_ref(), today)) {
        let result = match result {
            Ok(result) => result,
            Err(e) => {
                println!("{:<18} failed: {e}", request.instrument.id().as_str());
                continue;
            }
        };
        store.store(&result.instrument_id, today, &result)?;

        let bp = |x: Option<f64>| x.map_or_else(|| "-".to_string(), |s| format!("{:.1}", s * 1e4));
        let pct = |x: Option<f64>| x.map_or_else(|| "-".to_string(), |s| format!("{:.3}", s * 100.0));
        println!(
            "{:<18} {:>9.3} {:>9.3} {:>8.3} {:>7.2} {:>8} {:>8} {:>8}",
            result.instrument_id.as_str(),
            result.dirty_price,
            result.clean_price,
            result.yield_to_maturity * 100.0,
            result.modified_duration,
            bp(result.z_spread),
            bp(result.oas),
            pct(result.yield_to_worst),
        );
    }

    info!(stored = store.len(), "results stored");
    Ok(())
}
