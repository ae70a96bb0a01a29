//! # Error Types
//!
//! Domain-specific error types for pricer-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pricer-core errors (this file)                                        │
//! │  ├── CoreError        - Amount type labels that cannot be parsed       │
//! │  └── ValidationError  - Out-of-range or suspicious input               │
//! │                                                                         │
//! │  pricer-io errors (separate crate)                                     │
//! │  └── IoError          - File, CSV and JSON failures                    │
//! │                                                                         │
//! │  CLI (apps/cli)                                                         │
//! │  └── ConfigError      - Bad fee schedule configuration                 │
//! │                                                                         │
//! │  The solver itself never errors: an unsolvable item is a              │
//! │  PricingResult without a breakdown.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A discount or target type label that is neither a percentage nor a
    /// fixed amount.
    #[error("Unknown amount type '{0}': expected %, percent, THB, baht or fixed")]
    UnknownAmountKind(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Fee schedule errors are fatal at the configuration boundary. Everything
/// else is reported as a warning next to the item and never stops a batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    /// Value must not be negative.
    #[error("{field} must not be negative, got {value}")]
    Negative { field: String, value: f64 },

    /// NaN or infinity.
    #[error("{field} is not a finite number")]
    NotFinite { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Percentage discounts leave nothing of the price to charge fees on.
    #[error("Percentage discounts add up to {total_pct}% of the price")]
    DiscountsExceedPrice { total_pct: f64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
