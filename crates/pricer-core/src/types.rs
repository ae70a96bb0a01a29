//! # Domain Types
//!
//! Core domain types used throughout Marketplace Pricer.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  FeeSchedule    │   │    Discount     │   │  ProfitTarget   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  msf_pct        │   │  source         │   │  PercentOfPrice │       │
//! │  │  payment_pct    │   │  kind (%, THB)  │   │  Fixed          │       │
//! │  │  premium_pct    │   │  value          │   │                 │       │
//! │  │  campaign_pct   │   └────────┬────────┘   └────────┬────────┘       │
//! │  └────────┬────────┘            │ aggregate           │                │
//! │           │                     ▼                     │                │
//! │           │            ┌─────────────────┐            │                │
//! │           └──────────► │ PricingRequest  │ ◄──────────┘                │
//! │                        │ sku, cost,      │                             │
//! │                        │ CombinedDiscount│                             │
//! │                        └────────┬────────┘                             │
//! │                                 │ solver::price                        │
//! │                                 ▼                                      │
//! │                        ┌─────────────────┐                             │
//! │                        │ PricingResult   │                             │
//! │                        │ Option<Breakdown│                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All percentages on the public surface are on the 0-100 scale. Only
//! [`CombinedDiscount::pct`] is a 0-1 fraction, because it feeds the solver
//! equations directly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::discount;
use crate::error::{CoreError, CoreResult};

// =============================================================================
// Fee Schedule
// =============================================================================

/// Marketplace fee rates, VAT included, each on the 0-100 scale.
///
/// All four fees are charged on the effective price. The premium fee is
/// additionally capped at [`crate::PREMIUM_CAP`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct FeeSchedule {
    /// Marketplace service fee (commission).
    pub msf_pct: f64,
    /// Payment processing fee.
    pub payment_pct: f64,
    /// Premium program fee, capped.
    pub premium_pct: f64,
    /// Campaign voucher fee.
    pub campaign_pct: f64,
}

impl FeeSchedule {
    /// Creates a fee schedule from four percentages.
    pub const fn new(msf_pct: f64, payment_pct: f64, premium_pct: f64, campaign_pct: f64) -> Self {
        FeeSchedule {
            msf_pct,
            payment_pct,
            premium_pct,
            campaign_pct,
        }
    }

    /// Combined fraction of the uncapped fees (`f` in the solver equations).
    #[inline]
    pub fn uncapped_fraction(&self) -> f64 {
        (self.msf_pct + self.payment_pct + self.campaign_pct) / 100.0
    }

    /// Premium fee fraction before the cap (`p` in the solver equations).
    #[inline]
    pub fn premium_fraction(&self) -> f64 {
        self.premium_pct / 100.0
    }
}

/// The marketplace's published rates at the time of writing.
impl Default for FeeSchedule {
    fn default() -> Self {
        FeeSchedule::new(11.66, 3.38, 4.28, 5.35)
    }
}

// =============================================================================
// Amount Kind
// =============================================================================

/// Whether a value is a percentage of the selling price or a fixed amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AmountKind {
    /// Percentage of the selling price (0-100 scale).
    #[default]
    Percent,
    /// Fixed amount in baht.
    Fixed,
}

impl AmountKind {
    /// Short label used in spreadsheets: `%` or `THB`.
    pub fn label(&self) -> &'static str {
        match self {
            AmountKind::Percent => "%",
            AmountKind::Fixed => "THB",
        }
    }
}

impl fmt::Display for AmountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AmountKind {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "%" | "percent" | "pct" => Ok(AmountKind::Percent),
            "thb" | "baht" | "fixed" | "บาท" => Ok(AmountKind::Fixed),
            _ => Err(CoreError::UnknownAmountKind(trimmed.to_string())),
        }
    }
}

// =============================================================================
// Discount
// =============================================================================

/// Who grants a discount. Only affects reporting; the solver treats all
/// discounts alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountSource {
    /// Coupon funded by the seller.
    Seller,
    /// Seller discount required to join a marketplace campaign.
    Mandatory,
}

/// A single discount on the selling price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Discount {
    pub source: DiscountSource,
    pub kind: AmountKind,
    /// Percentage (0-100) or baht, depending on `kind`.
    pub value: f64,
}

impl Discount {
    /// Creates a discount.
    pub const fn new(source: DiscountSource, kind: AmountKind, value: f64) -> Self {
        Discount {
            source,
            kind,
            value,
        }
    }

    /// Baht value of this discount when the item sells at `price`.
    #[inline]
    pub fn realized_at(&self, price: f64) -> f64 {
        match self.kind {
            AmountKind::Percent => price * (self.value / 100.0),
            AmountKind::Fixed => self.value,
        }
    }
}

/// All discounts of one item folded into a price fraction and a fixed amount.
///
/// Percentage discounts cannot be turned into baht before the price is known,
/// so they stay a fraction of the (unknown) price until the solver runs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CombinedDiscount {
    /// Sum of percentage discounts as a 0-1 fraction (`dPct`).
    pub pct: f64,
    /// Sum of fixed discounts in baht (`dBaht`).
    pub fixed: f64,
}

impl CombinedDiscount {
    /// Fee base at `price` without clamping; negative when discounts exceed
    /// the price.
    #[inline]
    pub fn discounted(&self, price: f64) -> f64 {
        (1.0 - self.pct) * price - self.fixed
    }

    /// Fee base at `price`, never below zero.
    #[inline]
    pub fn effective_price(&self, price: f64) -> f64 {
        self.discounted(price).max(0.0)
    }
}

// =============================================================================
// Profit Target
// =============================================================================

/// The profit the seller wants to keep per unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ProfitTarget {
    /// Profit as a percentage (0-100) of the selling price.
    PercentOfPrice(f64),
    /// Profit as a fixed baht amount.
    Fixed(f64),
}

impl ProfitTarget {
    /// Builds a target from a value and its kind.
    pub fn new(kind: AmountKind, value: f64) -> Self {
        match kind {
            AmountKind::Percent => ProfitTarget::PercentOfPrice(value),
            AmountKind::Fixed => ProfitTarget::Fixed(value),
        }
    }

    /// The raw value, percentage or baht.
    pub fn value(&self) -> f64 {
        match *self {
            ProfitTarget::PercentOfPrice(v) | ProfitTarget::Fixed(v) => v,
        }
    }
}

/// Renders `20%` or `500 THB`.
impl fmt::Display for ProfitTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfitTarget::PercentOfPrice(v) => write!(f, "{}%", v),
            ProfitTarget::Fixed(v) => write!(f, "{} THB", v),
        }
    }
}

// =============================================================================
// Pricing Request
// =============================================================================

/// Everything needed to price one item.
///
/// `discounts` and their aggregate are only set together by
/// [`PricingRequest::new`], so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct PricingRequest {
    /// Stock Keeping Unit, opaque to the solver.
    pub sku: String,
    /// Total unit cost in baht (base cost plus extra cost).
    pub cost: f64,
    /// Fee rates shared by every item in the run.
    pub fees: FeeSchedule,
    discounts: Vec<Discount>,
    combined: CombinedDiscount,
    pub target: ProfitTarget,
}

impl PricingRequest {
    /// Builds a request and aggregates its discounts.
    pub fn new(
        sku: impl Into<String>,
        cost: f64,
        fees: FeeSchedule,
        discounts: Vec<Discount>,
        target: ProfitTarget,
    ) -> Self {
        let combined = discount::aggregate(&discounts);
        PricingRequest {
            sku: sku.into(),
            cost,
            fees,
            discounts,
            combined,
            target,
        }
    }

    /// Individual discounts, kept for per-source reporting.
    pub fn discounts(&self) -> &[Discount] {
        &self.discounts
    }

    /// The discounts folded by [`discount::aggregate`].
    pub fn combined(&self) -> &CombinedDiscount {
        &self.combined
    }
}

// =============================================================================
// Pricing Result
// =============================================================================

/// Which fee equation produced the price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Premium fee charged as a plain percentage of the effective price.
    Uncapped,
    /// Premium fee charged at [`crate::PREMIUM_CAP`].
    Capped,
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Regime::Uncapped => f.write_str("uncapped"),
            Regime::Capped => f.write_str("capped"),
        }
    }
}

/// Fee and profit figures at the solved price, all in baht.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Breakdown {
    pub regime: Regime,
    /// Selling price before discounts.
    pub price: f64,
    /// Fee base after discounts, clamped at zero.
    pub effective_price: f64,
    pub msf_fee: f64,
    pub payment_fee: f64,
    /// Always at most [`crate::PREMIUM_CAP`].
    pub premium_fee: f64,
    pub campaign_fee: f64,
    pub total_fees: f64,
    /// `price - total_fees`.
    pub net: f64,
    /// `net - cost`.
    pub profit: f64,
}

impl Breakdown {
    /// Profit as a percentage of the selling price, if the price is non-zero.
    pub fn profit_pct_of_price(&self) -> Option<f64> {
        if self.price == 0.0 {
            None
        } else {
            Some(self.profit / self.price * 100.0)
        }
    }
}

/// A discount converted to baht at the solved price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RealizedDiscount {
    pub source: DiscountSource,
    pub kind: AmountKind,
    pub value: f64,
    /// `None` for a percentage discount on an infeasible item.
    pub amount: Option<f64>,
}

/// Outcome of pricing one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingResult {
    pub sku: String,
    pub cost: f64,
    pub target: ProfitTarget,
    pub discounts: Vec<RealizedDiscount>,
    /// `None` when no fee regime yields a price.
    pub breakdown: Option<Breakdown>,
}

impl PricingResult {
    /// Returns true if a price was found.
    #[inline]
    pub fn is_feasible(&self) -> bool {
        self.breakdown.is_some()
    }

    /// The solved selling price, if any.
    #[inline]
    pub fn price(&self) -> Option<f64> {
        self.breakdown.map(|b| b.price)
    }

    /// Sum of realized amounts for one discount source. `None` if any of
    /// them is unknown.
    pub fn realized_from(&self, source: DiscountSource) -> Option<f64> {
        self.discounts
            .iter()
            .filter(|d| d.source == source)
            .try_fold(0.0, |acc, d| d.amount.map(|a| acc + a))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
