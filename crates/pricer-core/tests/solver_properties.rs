use pricer_core::solver::{self, candidates};
use pricer_core::{
    AmountKind, CombinedDiscount, Discount, DiscountSource, FeeSchedule, PricingRequest,
    ProfitTarget, Regime, PREMIUM_CAP,
};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies: keep every coefficient on P comfortably positive so prices stay
// in a realistic range (fees up to 40%, targets up to 30%).
// ---------------------------------------------------------------------------

fn arb_fees() -> impl Strategy<Value = FeeSchedule> {
    (0.0..10.0f64, 0.0..10.0f64, 0.0..10.0f64, 0.0..10.0f64)
        .prop_map(|(msf, pay, prem, camp)| FeeSchedule::new(msf, pay, prem, camp))
}

fn arb_target() -> impl Strategy<Value = ProfitTarget> {
    prop_oneof![
        (0.0..30.0f64).prop_map(ProfitTarget::PercentOfPrice),
        (0.0..2_000.0f64).prop_map(ProfitTarget::Fixed),
    ]
}

fn arb_discounts() -> impl Strategy<Value = Vec<Discount>> {
    let one = prop_oneof![
        (0.0..20.0f64)
            .prop_map(|v| Discount::new(DiscountSource::Mandatory, AmountKind::Percent, v)),
        (0.0..200.0f64).prop_map(|v| Discount::new(DiscountSource::Seller, AmountKind::Fixed, v)),
    ];
    proptest::collection::vec(one, 0..3)
}

fn target_profit(target: ProfitTarget, price: f64) -> f64 {
    match target {
        ProfitTarget::PercentOfPrice(r) => r / 100.0 * price,
        ProfitTarget::Fixed(g) => g,
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn uncapped_solution_hits_the_target(
        cost in 1.0..10_000.0f64,
        fees in arb_fees(),
        discounts in arb_discounts(),
        target in arb_target(),
    ) {
        let request = PricingRequest::new("P", cost, fees, discounts, target);
        let result = solver::price(&request);
        let b = result.breakdown.expect("positive coefficients always solve");

        if b.regime == Regime::Uncapped {
            prop_assert!(b.effective_price > 0.0);
            prop_assert!(b.premium_fee < PREMIUM_CAP);
            prop_assert!((b.profit - target_profit(target, b.price)).abs() < 1e-6);
        }
    }

    #[test]
    fn capped_premium_when_uncapped_would_exceed_cap(
        cost in 1.0..100_000.0f64,
        fees in arb_fees(),
        discounts in arb_discounts(),
        target in arb_target(),
    ) {
        let request = PricingRequest::new("P", cost, fees, discounts, target);
        let c = candidates(cost, &fees, request.combined(), target);
        let uncapped = c.uncapped.expect("non-degenerate");
        let base = request.combined().discounted(uncapped);

        prop_assume!(base > 0.0);
        prop_assume!(fees.premium_fraction() * base >= PREMIUM_CAP + 1e-6);

        let b = solver::price(&request).breakdown.expect("capped candidate exists");
        prop_assert_eq!(b.regime, Regime::Capped);
        prop_assert_eq!(b.premium_fee, PREMIUM_CAP);
        prop_assert!((b.profit - target_profit(target, b.price)).abs() < 1e-6);
    }

    #[test]
    fn price_increases_with_cost(
        cost in 1.0..50_000.0f64,
        extra in 1.0..5_000.0f64,
        fees in arb_fees(),
        pct in 0.0..20.0f64,
        target in 0.0..30.0f64,
    ) {
        let combined = CombinedDiscount { pct: pct / 100.0, fixed: 0.0 };
        let target = ProfitTarget::PercentOfPrice(target);

        let low = solver::solve(cost, &fees, &combined, target).unwrap();
        let high = solver::solve(cost + extra, &fees, &combined, target).unwrap();

        prop_assert!(high.price > low.price);
    }

    #[test]
    fn percent_discount_matches_its_fixed_equivalent(
        cost in 1.0..5_000.0f64,
        fees in arb_fees(),
        pct in 0.0..20.0f64,
        target in arb_target(),
    ) {
        let by_pct = solver::solve(
            cost,
            &fees,
            &CombinedDiscount { pct: pct / 100.0, fixed: 0.0 },
            target,
        )
        .unwrap();
        prop_assume!(by_pct.regime == Regime::Uncapped);

        let by_fixed = solver::solve(
            cost,
            &fees,
            &CombinedDiscount { pct: 0.0, fixed: pct / 100.0 * by_pct.price },
            target,
        )
        .unwrap();

        prop_assert_eq!(by_fixed.regime, Regime::Uncapped);
        prop_assert!((by_pct.price - by_fixed.price).abs() < 1e-6);
    }

    #[test]
    fn repeated_solves_are_bit_identical(
        cost in 0.0..100_000.0f64,
        fees in arb_fees(),
        discounts in arb_discounts(),
        target in arb_target(),
    ) {
        let request = PricingRequest::new("P", cost, fees, discounts, target);
        prop_assert_eq!(solver::price(&request), solver::price(&request));
    }
}

#[test]
fn degenerate_premium_free_schedule_reports_infeasible() {
    let fees = FeeSchedule::new(10.0, 5.0, 0.0, 5.0);
    let request = PricingRequest::new(
        "EDGE",
        250.0,
        fees,
        Vec::new(),
        ProfitTarget::PercentOfPrice(80.0),
    );

    let result = solver::price(&request);
    assert!(!result.is_feasible());
    assert_eq!(result.sku, "EDGE");
}
