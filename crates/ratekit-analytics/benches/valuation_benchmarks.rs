//! Benchmarks for curve construction and bond valuation.
//!
//! Run with: cargo bench -p ratekit-analytics

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use ratekit_analytics::prelude::*;
use ratekit_bonds::prelude::*;
use ratekit_core::types::{Date, InstrumentId, Quote, Tenor};
use ratekit_curves::YieldCurve;
use ratekit_feeds::InMemoryQuoteFeed;

// =============================================================================
// TEST DATA
// =============================================================================

const TENORS: [(&str, f64); 10] = [
    ("3M", 0.0430),
    ("6M", 0.0425),
    ("1Y", 0.0410),
    ("2Y", 0.0400),
    ("3Y", 0.0392),
    ("5Y", 0.0385),
    ("7Y", 0.0388),
    ("10Y", 0.0395),
    ("20Y", 0.0410),
    ("30Y", 0.0405),
];

fn today() -> Date {
    Date::from_ymd(2025, 6, 16).unwrap()
}

fn definition() -> CurveDefinition {
    TENORS
        .iter()
        .fold(CurveDefinition::new("USD"), |def, (tenor, _)| {
            let id: InstrumentId = format!("USD.{tenor}").into();
            let tenor: Tenor = tenor.parse().unwrap();
            let template = if tenor.approx_years() < 1.0 {
                HelperTemplate::Deposit { id, tenor, day_count: None }
            } else {
                HelperTemplate::Swap { id, tenor, frequency: None, day_count: None }
            };
            def.with_helper(template)
        })
}

fn feed() -> InMemoryQuoteFeed {
    TENORS
        .iter()
        .map(|(tenor, rate)| Quote::from_f64(format!("USD.{tenor}"), today(), *rate))
        .collect()
}

fn curve() -> YieldCurve {
    CurveBuilder::new(&feed(), AnalyticsConfig::default())
        .build(&definition(), today())
        .unwrap()
}

fn bond(i: usize) -> FixedRateBond {
    let coupons = [0.02, 0.03, 0.035, 0.04, 0.045, 0.05];
    let years = 2 + (i % 25) as i32;
    let terms = BondTerms::new(
        format!("BOND_{i:05}"),
        Date::from_ymd(2024, 6, 15).unwrap(),
        Date::from_ymd(2024 + years, 6, 15).unwrap(),
    );
    FixedRateBond::new(terms, coupons[i % coupons.len()]).unwrap()
}

fn callable(i: usize) -> CallableFixedRateBond {
    let bullet = bond(i);
    let first_call = bullet.maturity().add_years(-1).unwrap();
    let calls = CallSchedule::new(vec![CallEntry::new(first_call, 100.0)]).unwrap();
    CallableFixedRateBond::new(bullet, calls).unwrap()
}

// =============================================================================
// CURVE BENCHMARKS
// =============================================================================

fn bench_bootstrap(c: &mut Criterion) {
    let feed = feed();
    let definition = definition();
    let builder = CurveBuilder::new(&feed, AnalyticsConfig::default());

    c.bench_function("bootstrap_10_helpers", |b| {
        b.iter(|| builder.build(black_box(&definition), today()))
    });
}

// =============================================================================
// VALUATION BENCHMARKS
// =============================================================================

fn bench_single_valuation(c: &mut Criterion) {
    let curve = curve();
    let engine = ValuationEngine::default();
    let bullet: Instrument = bond(8).into();

    c.bench_function("value_fixed_10y", |b| {
        b.iter(|| engine.value(black_box(&bullet), &curve, today(), Some(101.0)))
    });
}

fn bench_callable(c: &mut Criterion) {
    let curve = curve();
    let instrument: Instrument = callable(8).into();

    let mut group = c.benchmark_group("value_callable");
    for volatility in [0.0, 0.01] {
        let engine = ValuationEngine::new(AnalyticsConfig::default().with_volatility(volatility));
        group.bench_with_input(BenchmarkId::from_parameter(volatility), &instrument, |b, inst| {
            b.iter(|| engine.value(black_box(inst), &curve, today(), None))
        });
    }
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let curve = curve();
    let engine = ValuationEngine::default();

    let mut group = c.benchmark_group("value_batch");
    group.sample_size(50);
    for size in [10, 100, 500] {
        let requests: Vec<ValuationRequest> = (0..size).map(|i| ValuationRequest::new(bond(i))).collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &requests, |b, requests| {
            b.iter(|| engine.value_batch(black_box(requests), &curve, today()))
        });
    }
    group.finish();
}

criterion_group!(curves, bench_bootstrap);
criterion_group!(valuation, bench_single_valuation, bench_callable, bench_batch);
criterion_main!(curves, valuation);
