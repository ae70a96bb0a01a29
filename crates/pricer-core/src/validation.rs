//! # Validation Module
//!
//! Input checks for Marketplace Pricer.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Configuration (CLI)                                          │
//! │  └── validate_fee_schedule: a bad fee rate stops the run               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Row normalization (pricer-io)                                │
//! │  ├── Unparseable numbers coerced to 0                                  │
//! │  └── request_warnings: logged next to the SKU, item still priced       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Solver                                                       │
//! │  └── No checks: degenerate equations become an infeasible result       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pricer_core::validation::validate_fee_schedule;
//! use pricer_core::FeeSchedule;
//!
//! assert!(validate_fee_schedule(&FeeSchedule::default()).is_ok());
//! assert!(validate_fee_schedule(&FeeSchedule::new(120.0, 0.0, 0.0, 0.0)).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{AmountKind, FeeSchedule, PricingRequest};
use crate::MAX_SKU_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Fee Schedule
// =============================================================================

/// Validates one fee rate: finite and within 0..=100.
pub fn validate_fee_pct(field: &str, pct: f64) -> ValidationResult<()> {
    if !pct.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    if !(0.0..=100.0).contains(&pct) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0.0,
            max: 100.0,
            value: pct,
        });
    }

    Ok(())
}

/// Validates all four rates, reporting the first bad one.
pub fn validate_fee_schedule(fees: &FeeSchedule) -> ValidationResult<()> {
    validate_fee_pct("msf_pct", fees.msf_pct)?;
    validate_fee_pct("payment_pct", fees.payment_pct)?;
    validate_fee_pct("premium_pct", fees.premium_pct)?;
    validate_fee_pct("campaign_pct", fees.campaign_pct)?;
    Ok(())
}

// =============================================================================
// Request Warnings
// =============================================================================

fn check_amount(field: &str, value: f64, out: &mut Vec<ValidationError>) {
    if !value.is_finite() {
        out.push(ValidationError::NotFinite {
            field: field.to_string(),
        });
    } else if value < 0.0 {
        out.push(ValidationError::Negative {
            field: field.to_string(),
            value,
        });
    }
}

/// Collects everything suspicious about a request without rejecting it.
///
/// ## Checks
/// - SKU longer than [`MAX_SKU_LENGTH`]
/// - negative or non-finite cost, discount values or target
/// - percentage discounts totalling 100% or more
pub fn request_warnings(request: &PricingRequest) -> Vec<ValidationError> {
    let mut warnings = Vec::new();

    if request.sku.chars().count() > MAX_SKU_LENGTH {
        warnings.push(ValidationError::TooLong {
            field: "sku".to_string(),
            max: MAX_SKU_LENGTH,
        });
    }

    check_amount("cost", request.cost, &mut warnings);
    check_amount("target", request.target.value(), &mut warnings);

    for discount in request.discounts() {
        check_amount("discount", discount.value, &mut warnings);
    }

    let total_pct: f64 = request
        .discounts()
        .iter()
        .filter(|d| d.kind == AmountKind::Percent)
        .map(|d| d.value)
        .sum();
    if total_pct >= 100.0 {
        warnings.push(ValidationError::DiscountsExceedPrice { total_pct });
    }

    warnings
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Discount, DiscountSource, ProfitTarget};

    fn request(cost: f64, discounts: Vec<Discount>) -> PricingRequest {
        PricingRequest::new(
            "SKU-1",
            cost,
            FeeSchedule::default(),
            discounts,
            ProfitTarget::PercentOfPrice(20.0),
        )
    }

    #[test]
    fn test_validate_fee_pct() {
        assert!(validate_fee_pct("msf_pct", 0.0).is_ok());
        assert!(validate_fee_pct("msf_pct", 11.66).is_ok());
        assert!(validate_fee_pct("msf_pct", 100.0).is_ok());

        assert!(validate_fee_pct("msf_pct", -0.01).is_err());
        assert!(validate_fee_pct("msf_pct", 100.01).is_err());
        assert!(matches!(
            validate_fee_pct("msf_pct", f64::NAN),
            Err(ValidationError::NotFinite { .. })
        ));
    }

    #[test]
    fn test_validate_fee_schedule_names_the_field() {
        let fees = FeeSchedule::new(11.66, 3.38, -4.0, 5.35);
        match validate_fee_schedule(&fees) {
            Err(ValidationError::OutOfRange { field, .. }) => assert_eq!(field, "premium_pct"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_clean_request_has_no_warnings() {
        let discounts = vec![Discount::new(DiscountSource::Mandatory, AmountKind::Percent, 5.0)];
        assert!(request_warnings(&request(100.0, discounts)).is_empty());
    }

    #[test]
    fn test_request_warnings() {
        let discounts = vec![
            Discount::new(DiscountSource::Seller, AmountKind::Percent, 60.0),
            Discount::new(DiscountSource::Mandatory, AmountKind::Percent, 45.0),
            Discount::new(DiscountSource::Seller, AmountKind::Fixed, -10.0),
        ];
        let warnings = request_warnings(&request(-1.0, discounts));

        assert!(warnings.contains(&ValidationError::Negative {
            field: "cost".to_string(),
            value: -1.0,
        }));
        assert!(warnings.contains(&ValidationError::Negative {
            field: "discount".to_string(),
            value: -10.0,
        }));
        assert!(warnings.contains(&ValidationError::DiscountsExceedPrice { total_pct: 105.0 }));
    }

    #[test]
    fn test_long_sku_warning() {
        let req = PricingRequest::new(
            "X".repeat(MAX_SKU_LENGTH + 1),
            100.0,
            FeeSchedule::default(),
            Vec::new(),
            ProfitTarget::PercentOfPrice(20.0),
        );
        assert_eq!(
            request_warnings(&req),
            vec![ValidationError::TooLong {
                field: "sku".to_string(),
                max: MAX_SKU_LENGTH,
            }]
        );
    }
}
