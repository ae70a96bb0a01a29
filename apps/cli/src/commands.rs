//! # Commands
//!
//! One function per subcommand. Each takes an already validated
//! [`PricerConfig`] and returns what `main` reports.
//!
//! ```text
//! solve     SolveArgs ─► ProductRow ─► normalize ─► solver::price ─► ReportRow
//! batch     file ─► read_rows ─► normalize_all ─► price_batch ─► filter ─► file
//! template  header row ─► file / stdout
//! ```

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{info, warn};

use pricer_core::batch::{price_batch, BatchSummary};
use pricer_core::{solver, PricingResult};
use pricer_io::export::{self, ReportRow, STDOUT_PATH};
use pricer_io::import;

use crate::cli::{BatchArgs, SolveArgs};
use crate::config::PricerConfig;

// =============================================================================
// Outcome Logging
// =============================================================================

/// Warns about items that did not solve or whose fee base collapsed to zero.
fn log_outcome(result: &PricingResult) {
    match result.breakdown {
        None => warn!(sku = %result.sku, "No feasible price for this item"),
        Some(b) if b.effective_price == 0.0 => warn!(
            sku = %result.sku,
            price = b.price,
            "Discounts consume the whole price; fees were computed on zero"
        ),
        Some(_) => {}
    }
}

// =============================================================================
// solve
// =============================================================================

/// Prices one manually entered item.
pub fn solve(args: &SolveArgs, config: &PricerConfig) -> ReportRow {
    let request = import::normalize(&args.to_row(), &config.fees, &config.row_defaults());
    let result = solver::price(&request);

    log_outcome(&result);
    if let Some(b) = result.breakdown {
        info!(sku = %result.sku, price = b.price, regime = %b.regime, "Solved");
    }

    ReportRow::from(&result)
}

// =============================================================================
// batch
// =============================================================================

/// Prices a product list file and writes the report.
pub fn batch(args: &BatchArgs, config: &PricerConfig) -> Result<BatchSummary> {
    let started = Utc::now();

    let rows = import::read_rows(&args.input)
        .with_context(|| format!("Failed to import {}", args.input.display()))?;
    let requests = import::normalize_all(&rows, &config.fees, &config.row_defaults());

    let results = price_batch(&requests);
    results.iter().for_each(log_outcome);
    let summary = BatchSummary::from_results(&results);

    let report = export::report_rows(&results);
    let report = match args.filter.as_deref() {
        Some(term) => export::filter_by_sku(report, term),
        None => report,
    };

    export::write_rows(&args.output, &report)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!(
        total = summary.total,
        solved = summary.solved,
        infeasible = summary.infeasible,
        capped = summary.capped,
        zero_base = summary.zero_base,
        total_profit = %summary.total_profit,
        written = report.len(),
        elapsed_ms = (Utc::now() - started).num_milliseconds(),
        "Batch complete"
    );

    Ok(summary)
}

// =============================================================================
// template
// =============================================================================

/// Writes the empty import sheet.
pub fn template(output: &Path) -> Result<()> {
    if output.as_os_str() == STDOUT_PATH {
        return Ok(import::write_template(io::stdout().lock())?);
    }

    let file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    import::write_template(BufWriter::new(file))?;

    info!(path = %output.display(), "Wrote import template");
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::AmountKind;
    use pricer_io::export::{PLACEHOLDER, REPORT_COLUMNS};
    use std::path::PathBuf;
    use uuid::Uuid;

    fn scratch(ext: &str) -> PathBuf {
        std::env::temp_dir().join(format!("pricer-test-{}.{}", Uuid::new_v4(), ext))
    }

    fn solve_args(cost: f64, target: f64) -> SolveArgs {
        SolveArgs {
            sku: "MANUAL-1".to_string(),
            cost,
            extra_cost: 0.0,
            seller_disc: 0.0,
            seller_disc_type: AmountKind::Percent,
            mand_disc: Some(0.0),
            mand_disc_type: AmountKind::Percent,
            target,
            target_type: AmountKind::Percent,
        }
    }

    #[test]
    fn test_solve_uses_config_fees() {
        let row = solve(&solve_args(100.0, 20.0), &PricerConfig::default());
        assert_eq!(row.sku, "MANUAL-1");
        assert_eq!(row.price, "180.73");
        assert_eq!(row.regime, "uncapped");

        let mut config = PricerConfig::default();
        config.fees.premium_pct = 0.0;
        let row = solve(&solve_args(100.0, 20.0), &config);
        // 100 / (1 - 0.20 - 0.2039)
        assert_eq!(row.price, "167.76");
    }

    #[test]
    fn test_solve_applies_default_mandatory_discount() {
        let mut args = solve_args(100.0, 20.0);
        args.mand_disc = None;

        let row = solve(&args, &PricerConfig::default());
        assert_ne!(row.mandatory_discount, "0.00");
        assert_ne!(row.mandatory_discount, PLACEHOLDER);
    }

    #[test]
    fn test_batch_round_trip_through_files() {
        let input = scratch("csv");
        let output = scratch("json");
        std::fs::write(
            &input,
            "SKU,Cost,TargetProfit,TargetType\nCOKE-330,10,20,%\nPEPSI-330,10,20,%\ncoke-500,12,5,THB\n",
        )
        .unwrap();

        let args = BatchArgs {
            input: input.clone(),
            output: output.clone(),
            filter: Some("coke".to_string()),
        };
        let summary = batch(&args, &PricerConfig::default()).unwrap();

        assert_eq!(summary.total, 3);
        assert_eq!(summary.solved, 3);

        let written: Vec<ReportRow> =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        let skus: Vec<&str> = written.iter().map(|r| r.sku.as_str()).collect();
        assert_eq!(skus, vec!["COKE-330", "coke-500"]);
        assert_eq!(written[1].target, "5 THB");

        std::fs::remove_file(&input).ok();
        std::fs::remove_file(&output).ok();
    }

    #[test]
    fn test_batch_workbook_output() {
        let input = scratch("json");
        let output = scratch("xlsx");
        std::fs::write(
            &input,
            r#"[{"SKU": "A-1", "Cost": 100, "MandDisc": 0}, {"SKU": "B-2", "Cost": 50}]"#,
        )
        .unwrap();

        let args = BatchArgs {
            input: input.clone(),
            output: output.clone(),
            filter: None,
        };
        let summary = batch(&args, &PricerConfig::default()).unwrap();
        assert_eq!(summary.solved, 2);

        // The report workbook reads back through the importer's SKU column.
        let rows = import::read_rows(&output).unwrap();
        let skus: Vec<Option<&str>> = rows.iter().map(|r| r.sku.as_deref()).collect();
        assert_eq!(skus, vec![Some("A-1"), Some("B-2")]);
        assert_eq!(rows[0].cost.as_deref(), Some("100"));

        std::fs::remove_file(&input).ok();
        std::fs::remove_file(&output).ok();
    }

    #[test]
    fn test_batch_missing_input() {
        let args = BatchArgs {
            input: scratch("csv"),
            output: PathBuf::from(STDOUT_PATH),
            filter: None,
        };
        assert!(batch(&args, &PricerConfig::default()).is_err());
    }

    #[test]
    fn test_template_file() {
        let path = scratch("csv");
        template(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("SKU,Cost,ExtraCost"));
        assert!(!text.contains(REPORT_COLUMNS[2]));

        std::fs::remove_file(&path).ok();
    }
}
