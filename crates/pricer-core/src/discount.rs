//! # Discount Aggregation
//!
//! Folds any number of discounts into the two scalars the solver needs.
//!
//! ```text
//! Seller coupon 100 THB ──┐
//!                         ├──► aggregate ──► CombinedDiscount { pct: 0.05, fixed: 100 }
//! Campaign 5%  ───────────┘
//! ```
//!
//! Percentages are summed, not compounded: 5% + 10% is 15% of the price.
//! No upper bound is enforced here; a combined fraction of 1 or more simply
//! leaves the solver without a positive fee base.

use crate::types::{AmountKind, CombinedDiscount, Discount, RealizedDiscount};

/// Sums percentage discounts into a 0-1 fraction and fixed discounts into baht.
pub fn aggregate(discounts: &[Discount]) -> CombinedDiscount {
    discounts
        .iter()
        .fold(CombinedDiscount::default(), |mut acc, d| {
            match d.kind {
                AmountKind::Percent => acc.pct += d.value / 100.0,
                AmountKind::Fixed => acc.fixed += d.value,
            }
            acc
        })
}

/// Converts each discount to baht at the solved price.
///
/// Fixed discounts are known without a price. Percentage discounts are only
/// known once a price exists.
pub fn realize(discounts: &[Discount], price: Option<f64>) -> Vec<RealizedDiscount> {
    discounts
        .iter()
        .map(|d| RealizedDiscount {
            source: d.source,
            kind: d.kind,
            value: d.value,
            amount: match d.kind {
                AmountKind::Fixed => Some(d.value),
                AmountKind::Percent => price.map(|p| d.realized_at(p)),
            },
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
