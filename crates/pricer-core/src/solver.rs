//! # Price Solver
//!
//! Finds the selling price `P` at which cost, fees and profit add up to the
//! price exactly.
//!
//! ## The Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  f     = (msf + payment + campaign) / 100     uncapped fee fraction    │
//! │  p     = premium / 100                        premium fraction         │
//! │  P_eff = max(0, (1 - dPct)·P - dBaht)         fee base after discounts │
//! │                                                                         │
//! │  cost + fees + profit = P                                               │
//! │                                                                         │
//! │  Uncapped:  fees = (f + p)·P_eff                                        │
//! │  Capped:    fees =  f·P_eff + CAP                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Substituting `P_eff` gives one linear equation `denom·P = numerator` per
//! (target kind × regime):
//!
//! | target  | regime   | denom                   | numerator              |
//! |---------|----------|-------------------------|------------------------|
//! | `r`·P   | uncapped | `1 - r - (f+p)(1-dPct)` | `C - (f+p)·dBaht`      |
//! | `r`·P   | capped   | `1 - r - f(1-dPct)`     | `C + CAP - f·dBaht`    |
//! | `g`     | uncapped | `1 - (f+p)(1-dPct)`     | `C + g - (f+p)·dBaht`  |
//! | `g`     | capped   | `1 - f(1-dPct)`         | `C + g + CAP - f·dBaht`|
//!
//! ## Regime Selection
//! ```text
//! candidates() ──► Candidates { uncapped: Option<P>, capped: Option<P> }
//!                         │
//!                         ▼
//!        uncapped_is_feasible(P_uncapped)?
//!          P_eff > 0  AND  p·P_eff < CAP - tolerance
//!              │                         │
//!             yes                        no
//!              ▼                         ▼
//!       Regime::Uncapped          Regime::Capped (may be None → infeasible)
//! ```
//!
//! The marketplace only switches to the cap once the percentage fee would
//! exceed it, so the solver keeps whichever branch agrees with itself.
//!
//! Known gap: when discounts push `P_eff` to zero or below, the capped
//! candidate is returned even if it is not self-consistent either.

use crate::discount;
use crate::types::{
    Breakdown, CombinedDiscount, FeeSchedule, PricingRequest, PricingResult, ProfitTarget, Regime,
};
use crate::{CAP_TOLERANCE, DENOMINATOR_EPSILON, PREMIUM_CAP};

// =============================================================================
// Candidates
// =============================================================================

/// Candidate prices from both fee regimes. A regime whose equation is
/// degenerate has no candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidates {
    pub uncapped: Option<f64>,
    pub capped: Option<f64>,
}

impl Candidates {
    /// Picks the self-consistent regime.
    ///
    /// The uncapped price wins when [`uncapped_is_feasible`] holds for it;
    /// otherwise the capped price is used, if there is one.
    pub fn select(&self, fees: &FeeSchedule, combined: &CombinedDiscount) -> Option<(Regime, f64)> {
        match self.uncapped {
            Some(price) if uncapped_is_feasible(price, fees, combined) => {
                Some((Regime::Uncapped, price))
            }
            _ => self.capped.map(|price| (Regime::Capped, price)),
        }
    }
}

/// Solves `denom·P = numerator`, or `None` when `denom` is numerically zero.
#[inline]
fn solve_linear(denom: f64, numerator: f64) -> Option<f64> {
    if denom.abs() > DENOMINATOR_EPSILON {
        Some(numerator / denom)
    } else {
        None
    }
}

/// Computes the candidate price of both regimes for the active target.
pub fn candidates(
    cost: f64,
    fees: &FeeSchedule,
    combined: &CombinedDiscount,
    target: ProfitTarget,
) -> Candidates {
    let f = fees.uncapped_fraction();
    let p = fees.premium_fraction();
    let kept = 1.0 - combined.pct;

    // A percentage target moves to the left side as a rate on P; a fixed
    // target joins the cost on the right side.
    let (rate, amount) = match target {
        ProfitTarget::PercentOfPrice(r) => (r / 100.0, 0.0),
        ProfitTarget::Fixed(g) => (0.0, g),
    };

    Candidates {
        uncapped: solve_linear(
            1.0 - rate - (f + p) * kept,
            cost + amount - (f + p) * combined.fixed,
        ),
        capped: solve_linear(
            1.0 - rate - f * kept,
            cost + amount + PREMIUM_CAP - f * combined.fixed,
        ),
    }
}

/// Returns true if `price` is a valid uncapped-regime solution: it leaves a
/// positive fee base and the premium fee on that base stays under the cap.
pub fn uncapped_is_feasible(price: f64, fees: &FeeSchedule, combined: &CombinedDiscount) -> bool {
    let base = combined.discounted(price);
    base > 0.0 && fees.premium_fraction() * base < PREMIUM_CAP - CAP_TOLERANCE
}

// =============================================================================
// Breakdown
// =============================================================================

/// Computes every fee from the effective price at `price`.
///
/// The premium fee is capped here regardless of `regime`, so the reported
/// figure is always what the marketplace would charge.
pub fn breakdown(
    regime: Regime,
    price: f64,
    cost: f64,
    fees: &FeeSchedule,
    combined: &CombinedDiscount,
) -> Breakdown {
    let effective_price = combined.effective_price(price);

    let msf_fee = effective_price * (fees.msf_pct / 100.0);
    let payment_fee = effective_price * (fees.payment_pct / 100.0);
    let campaign_fee = effective_price * (fees.campaign_pct / 100.0);
    let premium_fee = (effective_price * fees.premium_fraction()).min(PREMIUM_CAP);

    let total_fees = msf_fee + payment_fee + premium_fee + campaign_fee;
    let net = price - total_fees;

    Breakdown {
        regime,
        price,
        effective_price,
        msf_fee,
        payment_fee,
        premium_fee,
        campaign_fee,
        total_fees,
        net,
        profit: net - cost,
    }
}

// =============================================================================
// Entry Points
// =============================================================================

/// Solves for the selling price.
///
/// Returns `None` when neither regime yields a price. That is an item-level
/// outcome for the caller to report, not an error.
pub fn solve(
    cost: f64,
    fees: &FeeSchedule,
    combined: &CombinedDiscount,
    target: ProfitTarget,
) -> Option<Breakdown> {
    candidates(cost, fees, combined, target)
        .select(fees, combined)
        .map(|(regime, price)| breakdown(regime, price, cost, fees, combined))
}

/// Prices one request end to end.
///
/// ## Flow
/// ```text
/// PricingRequest ──► solve(cost, fees, combined, target)
///                          │
///                          ▼
///                  Option<Breakdown> ──► realize discounts at price
///                          │
///                          ▼
///                    PricingResult
/// ```
pub fn price(request: &PricingRequest) -> PricingResult {
    let breakdown = solve(
        request.cost,
        &request.fees,
        request.combined(),
        request.target,
    );

    PricingResult {
        sku: request.sku.clone(),
        cost: request.cost,
        target: request.target,
        discounts: discount::realize(request.discounts(), breakdown.map(|b| b.price)),
        breakdown,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
