//! # pricer-core: Pure Pricing Logic for Marketplace Pricer
//!
//! This crate is the **heart** of Marketplace Pricer. It solves for the
//! selling price that hits a profit target after marketplace fees and seller
//! discounts, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Marketplace Pricer Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    pricer CLI (apps/cli)                        │   │
//! │  │        config ──► solve / batch / template commands             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 pricer-io (Import / Export)                     │   │
//! │  │       CSV/JSON rows ──► normalize ──► PricingRequest            │   │
//! │  │       PricingResult ──► ReportRow ──► CSV/JSON                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pricer-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ discount  │  │  solver   │  │   batch   │  │   │
//! │  │   │FeeSchedule│  │ aggregate │  │Candidates │  │ par map   │  │   │
//! │  │   │  Request  │  │  realize  │  │  Regime   │  │ Summary   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (FeeSchedule, Discount, PricingRequest, ...)
//! - [`discount`] - Discount aggregation into `dPct` / `dBaht`
//! - [`solver`] - The dual-regime price solver
//! - [`batch`] - Parallel evaluation of independent requests
//! - [`money`] - Two-decimal money type used for reporting
//! - [`error`] - Domain error types
//! - [`validation`] - Fee schedule checks and request warnings
//!
//! ## Example Usage
//!
//! ```rust
//! use pricer_core::{solver, Discount, FeeSchedule, PricingRequest, ProfitTarget};
//!
//! let request = PricingRequest::new(
//!     "LEGO-10283",
//!     100.0,
//!     FeeSchedule::default(),
//!     Vec::<Discount>::new(),
//!     ProfitTarget::PercentOfPrice(20.0),
//! );
//!
//! let result = solver::price(&request);
//! let breakdown = result.breakdown.expect("feasible");
//! assert!((breakdown.profit / breakdown.price - 0.20).abs() < 1e-9);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod batch;
pub mod discount;
pub mod error;
pub mod money;
pub mod solver;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Ceiling on the premium fee, in baht, VAT included.
///
/// The premium fee is a percentage of the effective price until it would
/// exceed this amount, after which it is charged as exactly this amount.
pub const PREMIUM_CAP: f64 = 319.93;

/// Coefficients on price smaller than this are treated as zero.
pub const DENOMINATOR_EPSILON: f64 = 1e-9;

/// Margin below [`PREMIUM_CAP`] that an uncapped premium fee must stay under.
pub const CAP_TOLERANCE: f64 = 1e-6;

/// Campaign-mandated seller discount applied when a row does not say otherwise.
pub const DEFAULT_MANDATORY_DISCOUNT_PCT: f64 = 5.0;

/// Longest SKU accepted without a warning.
pub const MAX_SKU_LENGTH: usize = 100;
