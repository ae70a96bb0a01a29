//! # Batch Evaluation
//!
//! Prices a whole product list. Requests share nothing, so the map runs on
//! the rayon thread pool; the output order always matches the input order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::solver;
use crate::types::{PricingRequest, PricingResult, Regime};

/// Prices every request independently.
pub fn price_batch(requests: &[PricingRequest]) -> Vec<PricingResult> {
    requests.par_iter().map(solver::price).collect()
}

/// Counts over one batch of results, for logging and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BatchSummary {
    pub total: usize,
    pub solved: usize,
    pub infeasible: usize,
    /// Solved items whose premium fee hit the cap.
    pub capped: usize,
    /// Solved items whose fee base ended at zero (discounts consumed the price).
    pub zero_base: usize,
    /// Sum of the per-item profits, each rounded to satang first. Saturates
    /// instead of overflowing.
    pub total_profit: Money,
}

impl BatchSummary {
    pub fn from_results(results: &[PricingResult]) -> Self {
        results.iter().fold(
            BatchSummary {
                total: results.len(),
                ..Default::default()
            },
            |mut summary, result| {
                match result.breakdown {
                    Some(b) => {
                        summary.solved += 1;
                        if b.regime == Regime::Capped {
                            summary.capped += 1;
                        }
                        if b.effective_price == 0.0 {
                            summary.zero_base += 1;
                        }
                        summary.total_profit += Money::from_amount(b.profit);
                    }
                    None => summary.infeasible += 1,
                }
                summary
            },
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Discount, FeeSchedule, ProfitTarget};

    fn request(sku: &str, cost: f64, target: ProfitTarget) -> PricingRequest {
        PricingRequest::new(sku, cost, FeeSchedule::default(), Vec::<Discount>::new(), target)
    }

    #[test]
    fn test_batch_preserves_order() {
        let requests: Vec<PricingRequest> = (0..200)
            .map(|i| {
                request(
                    &format!("SKU-{:03}", i),
                    10.0 * (i + 1) as f64,
                    ProfitTarget::PercentOfPrice(20.0),
                )
            })
            .collect();

        let results = price_batch(&requests);

        assert_eq!(results.len(), requests.len());
        for (req, res) in requests.iter().zip(&results) {
            assert_eq!(req.sku, res.sku);
            assert_eq!(*res, solver::price(req));
        }
    }

    #[test]
    fn test_empty_batch() {
        assert!(price_batch(&[]).is_empty());
        assert_eq!(BatchSummary::from_results(&[]), BatchSummary::default());
    }

    #[test]
    fn test_summary_counts() {
        let no_premium = FeeSchedule::new(11.66, 3.38, 0.0, 5.35);
        let requests = vec![
            request("CHEAP", 100.0, ProfitTarget::PercentOfPrice(20.0)),
            request("PRICEY", 20_000.0, ProfitTarget::PercentOfPrice(20.0)),
            PricingRequest::new(
                "NOPE",
                100.0,
                no_premium,
                Vec::new(),
                ProfitTarget::PercentOfPrice(79.61),
            ),
        ];

        let summary = BatchSummary::from_results(&price_batch(&requests));

        assert_eq!(summary.total, 3);
        assert_eq!(summary.solved, 2);
        assert_eq!(summary.infeasible, 1);
        assert_eq!(summary.capped, 1);
        assert_eq!(summary.zero_base, 0);
        assert!(summary.total_profit.is_positive());
    }

    #[test]
    fn test_summary_total_profit_saturates() {
        let requests: Vec<PricingRequest> = (0..3)
            .map(|i| request(&format!("HUGE-{}", i), 1e17, ProfitTarget::PercentOfPrice(20.0)))
            .collect();

        let results = price_batch(&requests);
        assert!(results.iter().all(PricingResult::is_feasible));

        let summary = BatchSummary::from_results(&results);
        assert_eq!(summary.solved, 3);
        assert_eq!(summary.total_profit, Money::from_satang(i64::MAX));
    }
}
