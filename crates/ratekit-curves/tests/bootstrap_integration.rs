//! Integration tests: bootstrap curves from helper sets and compose them.
//!
//! Market data is synthetic, on 2025-01-15 unless stated otherwise.

use std::sync::Arc;

use approx::assert_relative_eq;
use proptest::prelude::*;

use ratekit_core::prelude::*;
use ratekit_curves::prelude::*;

fn today() -> Date {
    Date::from_ymd(2025, 1, 15).unwrap()
}

/// 360-day deposit at 3% and 2Y annual swap at 3.5%, both ACT/360.
fn deposit_swap_helpers() -> (Deposit, SwapRate) {
    let t = today();
    let deposit = Deposit::new("DEP1Y", t, t.add_days(360), 0.03);
    let swap = SwapRate::new("SWAP2Y", t, Date::from_ymd(2027, 1, 15).unwrap(), 0.035)
        .with_fixed_leg(Frequency::Annual, DayCountConvention::Act360);
    (deposit, swap)
}

#[test]
fn test_first_pillar_fixed_before_second_is_solved() {
    let (deposit, swap) = deposit_swap_helpers();

    // Swap added first: sorting still solves the deposit pillar first.
    let curve = Bootstrapper::new(today())
        .add_helper(swap)
        .add_helper(deposit.clone())
        .bootstrap()
        .unwrap();

    let p = curve.pillars();
    assert_eq!(p.len(), 2);
    assert_relative_eq!(p[0].discount_factor, 1.0 / (1.0 + 0.03 * 360.0 / 360.0), epsilon = 1e-10);

    // The one-pillar curve agrees at the first pillar.
    let short = Bootstrapper::new(today()).add_helper(deposit).bootstrap().unwrap();
    assert_eq!(short.pillars()[0].discount_factor, p[0].discount_factor);

    assert!(p[1].discount_factor < p[0].discount_factor);

    let (deposit, swap) = deposit_swap_helpers();
    let report = Bootstrapper::new(today())
        .add_helper(swap)
        .add_helper(deposit)
        .bootstrap_with_report()
        .unwrap()
        .report;
    assert!(report.all_within(1e-10), "{report}");
}

#[test]
fn test_linear_zero_interpolation_reprices() {
    let t = today();
    let result = Bootstrapper::new(t)
        .with_interpolation(Interpolation::LinearZero)
        .add_helper(Deposit::new("DEP3M", t, Date::from_ymd(2025, 4, 15).unwrap(), 0.041))
        .add_helper(Ois::new("OIS1Y", t, Date::from_ymd(2026, 1, 15).unwrap(), 0.040))
        .add_helper(Ois::new("OIS5Y", t, Date::from_ymd(2030, 1, 15).unwrap(), 0.037))
        .add_helper(SwapRate::new("SWAP10Y", t, Date::from_ymd(2035, 1, 15).unwrap(), 0.039))
        .bootstrap_with_report()
        .unwrap();

    assert!(result.report.all_within(1e-9), "{}", result.report);
    assert_eq!(result.curve.discount_factor(t).unwrap(), 1.0);

    let mid = Date::from_ymd(2027, 6, 1).unwrap();
    let z = result.curve.zero_rate(mid, Compounding::Continuous).unwrap();
    assert!(z > 0.03 && z < 0.045);
}

#[test]
fn test_brazil_di_curve_and_currency_curve() {
    let t = Date::from_ymd(2025, 1, 2).unwrap();
    let brazil = CalendarId::Brazil;

    // DI1 contracts: single-period BUS/252 rates to the first business day
    // of the month.
    let di = [
        ("DI1J25", Date::from_ymd(2025, 4, 1).unwrap(), 0.1320),
        ("DI1N25", Date::from_ymd(2025, 7, 1).unwrap(), 0.1395),
        ("DI1F26", Date::from_ymd(2026, 1, 2).unwrap(), 0.1480),
        ("DI1F27", Date::from_ymd(2027, 1, 4).unwrap(), 0.1520),
    ];
    let mut builder = Bootstrapper::new(t);
    for (id, maturity, rate) in di {
        builder = builder.add_helper(
            Ois::new(id, t, maturity, rate)
                .with_fixed_leg(Frequency::Zero, DayCountConvention::Business252)
                .with_calendar(brazil),
        );
    }
    let brl = builder.bootstrap_with_report().unwrap();
    assert!(brl.report.all_within(1e-10));

    // Each DI pillar compounds at its rate over BUS/252.
    let bus = BrazilCalendar::global().business_days_between(t, di[2].1) as f64;
    assert_relative_eq!(
        brl.curve.discount_factor(di[2].1).unwrap(),
        1.1480f64.powf(-bus / 252.0),
        epsilon = 1e-9
    );

    // A USD curve and FX futures consistent with both imply the USD curve back.
    let usd: Arc<dyn Curve> = Arc::new(FlatForwardCurve::new(t, 0.045));
    let brl_curve: Arc<dyn Curve> = Arc::new(brl.curve.clone());
    let spot = 6.10;
    let nodes: Vec<FxForwardNode> = di
        .iter()
        .map(|(_, maturity, _)| {
            let forward = spot * usd.discount_factor(*maturity).unwrap()
                / brl_curve.discount_factor(*maturity).unwrap();
            FxForwardNode { date: *maturity, forward }
        })
        .collect();

    let implied_usd =
        CurrencyCurve::new(brl_curve.clone(), usd.clone(), spot, FxBasis::Forwards(nodes.clone()))
            .unwrap();
    for node in &nodes {
        assert_relative_eq!(
            implied_usd.discount_factor(node.date).unwrap(),
            usd.discount_factor(node.date).unwrap(),
            epsilon = 1e-12
        );
        assert_relative_eq!(implied_usd.implied_basis(node.date).unwrap(), 0.0, epsilon = 1e-10);
    }

    // FX futures bootstrap the BRL curve from the USD curve.
    let mut fx_builder = Bootstrapper::new(t);
    for (node, (id, _, _)) in nodes.iter().zip(di) {
        fx_builder = fx_builder.add_helper(
            CurrencyFuture::from_foreign_curve(id, node.date, node.forward, spot, usd.as_ref())
                .unwrap(),
        );
    }
    let from_fx = fx_builder.bootstrap().unwrap();
    for pillar in brl.curve.pillars() {
        assert_relative_eq!(
            from_fx.discount_factor(pillar.date).unwrap(),
            pillar.discount_factor,
            epsilon = 1e-9
        );
    }
}

#[test]
fn test_cupom_cambial_bootstrap() {
    let t = Date::from_ymd(2025, 1, 2).unwrap();
    let first = CupomCambial::next_brazil_maturity(t);
    let second = Date::from_ymd(2025, 7, 1).unwrap();

    let cc1 = CupomCambial::from_market("DDIG25", t, first, 6.10, 0.1250, 6.115).unwrap();
    let cc2 = CupomCambial::new("DDIN25", second, 0.055);

    let result = Bootstrapper::new(t)
        .add_helper(cc2)
        .add_helper(cc1.clone())
        .bootstrap_with_report()
        .unwrap();
    assert!(result.report.all_within(1e-10));

    let tau = DayCountConvention::Act360.year_fraction(t, first).unwrap();
    assert_relative_eq!(
        result.curve.discount_factor(first).unwrap(),
        1.0 / (1.0 + cc1.quote() * tau),
        epsilon = 1e-10
    );
}

#[test]
fn test_hybrid_over_bootstrapped_parents() {
    let t = today();
    let short = Bootstrapper::new(t)
        .add_helper(Deposit::new("DEP6M", t, Date::from_ymd(2025, 7, 15).unwrap(), 0.05))
        .add_helper(Deposit::new("DEP1Y", t, Date::from_ymd(2026, 1, 15).unwrap(), 0.05))
        .bootstrap()
        .unwrap();
    let long: Arc<dyn Curve> = Arc::new(FlatForwardCurve::new(t, 0.03));
    let short: Arc<dyn Curve> = Arc::new(short);

    let hybrid =
        HybridYieldCurve::new(vec![(short.clone(), 1.0), (long.clone(), 0.0)], Blend::None).unwrap();
    let six_m = Date::from_ymd(2025, 7, 15).unwrap();
    let five_y = Date::from_ymd(2030, 1, 15).unwrap();
    assert_eq!(hybrid.discount_factor(six_m).unwrap(), short.discount_factor(six_m).unwrap());
    assert_eq!(hybrid.discount_factor(five_y).unwrap(), long.discount_factor(five_y).unwrap());
    assert_eq!(hybrid.discount_factor(t).unwrap(), 1.0);
}

#[test]
fn test_extrapolation_disabled() {
    let t = today();
    let curve = Bootstrapper::new(t)
        .with_config(BootstrapConfig::default().with_extrapolation(false))
        .add_helper(Deposit::new("DEP1Y", t, t.add_days(365), 0.03))
        .bootstrap()
        .unwrap();
    assert!(matches!(
        curve.discount_factor(t.add_days(400)),
        Err(CurveError::DateOutOfRange { .. })
    ));
    assert!(matches!(
        curve.discount_factor(t.add_days(-1)),
        Err(CurveError::DateOutOfRange { .. })
    ));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn bootstrapped_curves_reprice_their_helpers(
        short_rate in 0.001f64..0.15,
        steps in proptest::collection::vec(0.0f64..0.01, 3),
        log_linear in any::<bool>(),
    ) {
        let t = today();
        let rates: Vec<f64> = steps
            .iter()
            .scan(short_rate, |r, step| { *r += step; Some(*r) })
            .collect();
        let interpolation = if log_linear {
            Interpolation::LogLinearDiscount
        } else {
            Interpolation::LinearZero
        };

        let result = Bootstrapper::new(t)
            .with_interpolation(interpolation)
            .add_helper(Deposit::new("DEP6M", t, Date::from_ymd(2025, 7, 15).unwrap(), short_rate))
            .add_helper(SwapRate::new("SWAP2Y", t, Date::from_ymd(2027, 1, 15).unwrap(), rates[0]))
            .add_helper(SwapRate::new("SWAP5Y", t, Date::from_ymd(2030, 1, 15).unwrap(), rates[1]))
            .add_helper(SwapRate::new("SWAP10Y", t, Date::from_ymd(2035, 1, 15).unwrap(), rates[2]))
            .bootstrap_with_report()
            .unwrap();

        prop_assert_eq!(result.curve.discount_factor(t).unwrap(), 1.0);
        prop_assert!(result.report.all_within(1e-9));
        let dfs: Vec<f64> = result.curve.pillars().iter().map(|p| p.discount_factor).collect();
        prop_assert!(dfs.windows(2).all(|w| w[1] <= w[0]));
    }
}
