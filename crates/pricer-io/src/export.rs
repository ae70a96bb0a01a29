//! # Report Export
//!
//! Formats pricing results as flat report rows and writes them out.
//!
//! ## Report Row
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PricingResult (f64, Option)        ReportRow (text, 2 decimals)       │
//! │  ───────────────────────────        ─────────────────────────────      │
//! │  breakdown: Some(b) ─────────────►  Price "180.73", Regime "uncapped"  │
//! │  breakdown: None    ─────────────►  Price "-",      Regime "-"         │
//! │  percent discount, no price ─────►  Seller_Discount "-"                │
//! │  fixed discount, no price   ─────►  Seller_Discount "100.00"           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rounding to satang happens here and nowhere else.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};
use serde::{Deserialize, Serialize};
use tracing::info;

use pricer_core::{Breakdown, DiscountSource, Money, PricingResult};

use crate::error::{IoError, IoResult};
use crate::format::DataFormat;

/// Rendered in place of any figure that needs a price when none was found.
pub const PLACEHOLDER: &str = "-";

/// Worksheet that holds the report in an `.xlsx` export.
pub const RESULTS_SHEET: &str = "Results";

/// Output path meaning "write CSV to stdout".
pub const STDOUT_PATH: &str = "-";

/// Report header row, in column order.
pub const REPORT_COLUMNS: [&str; 16] = [
    "SKU",
    "Cost",
    "Price",
    "Price_Effective_for_Fees",
    "Seller_Discount",
    "Mandatory_Discount",
    "MSF_Fee",
    "Payment_Fee",
    "Premium_Fee",
    "Campaign_Fee",
    "Total_Fees",
    "Net_After_Fees",
    "Profit",
    "ProfitPctOfPrice",
    "Target",
    "Regime",
];

// =============================================================================
// Report Row
// =============================================================================

/// One line of the pricing report, already formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(rename = "SKU")]
    pub sku: String,
    #[serde(rename = "Cost")]
    pub cost: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Price_Effective_for_Fees")]
    pub effective_price: String,
    #[serde(rename = "Seller_Discount")]
    pub seller_discount: String,
    #[serde(rename = "Mandatory_Discount")]
    pub mandatory_discount: String,
    #[serde(rename = "MSF_Fee")]
    pub msf_fee: String,
    #[serde(rename = "Payment_Fee")]
    pub payment_fee: String,
    #[serde(rename = "Premium_Fee")]
    pub premium_fee: String,
    #[serde(rename = "Campaign_Fee")]
    pub campaign_fee: String,
    #[serde(rename = "Total_Fees")]
    pub total_fees: String,
    #[serde(rename = "Net_After_Fees")]
    pub net: String,
    #[serde(rename = "Profit")]
    pub profit: String,
    #[serde(rename = "ProfitPctOfPrice")]
    pub profit_pct_of_price: String,
    #[serde(rename = "Target")]
    pub target: String,
    #[serde(rename = "Regime")]
    pub regime: String,
}

fn two_decimals(value: f64) -> String {
    Money::from_amount(value).to_string()
}

fn or_placeholder(value: Option<f64>) -> String {
    value.map(two_decimals).unwrap_or_else(|| PLACEHOLDER.to_string())
}

impl From<&PricingResult> for ReportRow {
    fn from(result: &PricingResult) -> Self {
        let b = result.breakdown;
        let field = |f: fn(&Breakdown) -> f64| or_placeholder(b.as_ref().map(f));

        ReportRow {
            sku: result.sku.clone(),
            cost: two_decimals(result.cost),
            price: field(|b| b.price),
            effective_price: field(|b| b.effective_price),
            seller_discount: or_placeholder(result.realized_from(DiscountSource::Seller)),
            mandatory_discount: or_placeholder(result.realized_from(DiscountSource::Mandatory)),
            msf_fee: field(|b| b.msf_fee),
            payment_fee: field(|b| b.payment_fee),
            premium_fee: field(|b| b.premium_fee),
            campaign_fee: field(|b| b.campaign_fee),
            total_fees: field(|b| b.total_fees),
            net: field(|b| b.net),
            profit: field(|b| b.profit),
            profit_pct_of_price: or_placeholder(b.and_then(|b| b.profit_pct_of_price())),
            target: result.target.to_string(),
            regime: b
                .map(|b| b.regime.to_string())
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
        }
    }
}

impl ReportRow {
    /// Cell values in [`REPORT_COLUMNS`] order.
    pub fn cells(&self) -> [&str; 16] {
        [
            &self.sku,
            &self.cost,
            &self.price,
            &self.effective_price,
            &self.seller_discount,
            &self.mandatory_discount,
            &self.msf_fee,
            &self.payment_fee,
            &self.premium_fee,
            &self.campaign_fee,
            &self.total_fees,
            &self.net,
            &self.profit,
            &self.profit_pct_of_price,
            &self.target,
            &self.regime,
        ]
    }
}

/// Formats every result, preserving order.
pub fn report_rows(results: &[PricingResult]) -> Vec<ReportRow> {
    results.iter().map(ReportRow::from).collect()
}

// =============================================================================
// Search Filter
// =============================================================================

/// Keeps rows whose SKU contains `term`, ignoring case. An empty or
/// whitespace-only term keeps everything.
pub fn filter_by_sku(rows: Vec<ReportRow>, term: &str) -> Vec<ReportRow> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return rows;
    }

    rows.into_iter()
        .filter(|row| row.sku.to_lowercase().contains(&needle))
        .collect()
}

// =============================================================================
// Writers
// =============================================================================

/// Writes a CSV report. The header row is written even for an empty report.
pub fn write_csv<W: Write>(writer: W, rows: &[ReportRow]) -> IoResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(REPORT_COLUMNS)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes a JSON report: a pretty-printed array of objects.
pub fn write_json<W: Write>(mut writer: W, rows: &[ReportRow]) -> IoResult<()> {
    serde_json::to_writer_pretty(&mut writer, rows)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Writes an Excel workbook with the report on a `Results` sheet.
///
/// Figures are stored as numbers so the sheet can be summed. The SKU column
/// and non-numeric cells (`-`, `20%`, regime) stay text.
pub fn write_xlsx<W: Write>(mut writer: W, rows: &[ReportRow]) -> IoResult<()> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(RESULTS_SHEET)?;
    sheet.set_freeze_panes(1, 0)?;

    for (col, name) in (0u16..).zip(REPORT_COLUMNS) {
        sheet.write_string_with_format(0, col, name, &header)?;
    }

    for (row, report) in (1u32..).zip(rows) {
        for (col, text) in (0u16..).zip(report.cells()) {
            match text.parse::<f64>() {
                Ok(value) if col > 0 => {
                    sheet.write_number(row, col, value)?;
                }
                _ => {
                    sheet.write_string(row, col, text)?;
                }
            }
        }
    }

    writer.write_all(&workbook.save_to_buffer()?)?;
    writer.flush()?;
    Ok(())
}

/// Writes the report to `path` in the format its extension names.
/// A path of `-` writes CSV to stdout.
pub fn write_rows(path: impl AsRef<Path>, rows: &[ReportRow]) -> IoResult<()> {
    let path = path.as_ref();

    if path.as_os_str() == STDOUT_PATH {
        let stdout = io::stdout();
        return write_csv(stdout.lock(), rows);
    }

    let format = DataFormat::from_path(path)?;
    if !format.is_writable() {
        return Err(IoError::ReadOnlyFormat {
            path: path.to_path_buf(),
        });
    }
    let file = File::create(path).map_err(|e| IoError::file(path, e))?;
    let writer = BufWriter::new(file);

    match format {
        DataFormat::Csv => write_csv(writer, rows)?,
        DataFormat::Json => write_json(writer, rows)?,
        DataFormat::Xlsx | DataFormat::Xls => write_xlsx(writer, rows)?,
    }

    info!(path = %path.display(), format = %format, rows = rows.len(), "Wrote pricing report");
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
