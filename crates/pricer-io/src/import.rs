//! # Product List Import
//!
//! Reads seller spreadsheets and turns each row into a [`PricingRequest`].
//!
//! ## Import Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      From File to Request                               │
//! │                                                                         │
//! │  products.csv / .json / .xlsx / .xls                                   │
//! │       │                                                                 │
//! │       ▼  read_csv / read_json / read_xlsx (cells kept as raw text)     │
//! │  ProductRow { sku: Some("A-1"), cost: Some("100"), mand_disc: None … } │
//! │       │                                                                 │
//! │       ▼  normalize                                                      │
//! │  ├── blank or non-numeric number   → 0                                 │
//! │  ├── type "THB" / "บาท"             → fixed, anything else → percent   │
//! │  ├── blank MandDisc                → default (5%)                      │
//! │  └── cost = Cost + ExtraCost                                           │
//! │       │                                                                 │
//! │       ▼  request_warnings logged, row never rejected                   │
//! │  PricingRequest                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pricer_core::FeeSchedule;
//! use pricer_io::import::{normalize, read_csv, RowDefaults};
//!
//! let data = "SKU,Cost,TargetProfit\nA-1,100,20\n";
//! let rows = read_csv(data.as_bytes()).unwrap();
//! let request = normalize(&rows[0], &FeeSchedule::default(), &RowDefaults::default());
//!
//! assert_eq!(request.sku, "A-1");
//! assert_eq!(request.cost, 100.0);
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Write};
use std::path::Path;

use calamine::{Data, Reader};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use pricer_core::validation::request_warnings;
use pricer_core::{
    AmountKind, Discount, DiscountSource, FeeSchedule, PricingRequest, ProfitTarget,
    DEFAULT_MANDATORY_DISCOUNT_PCT,
};

use crate::error::{IoError, IoResult};
use crate::format::DataFormat;

// =============================================================================
// Columns
// =============================================================================

/// Import header row, in template order.
pub const IMPORT_COLUMNS: [&str; 9] = [
    "SKU",
    "Cost",
    "ExtraCost",
    "SellerDisc",
    "SellerDiscType",
    "MandDisc",
    "MandDiscType",
    "TargetProfit",
    "TargetType",
];

/// One spreadsheet row exactly as read. Every cell is optional raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRow {
    #[serde(rename = "SKU", default)]
    pub sku: Option<String>,
    #[serde(rename = "Cost", default)]
    pub cost: Option<String>,
    #[serde(rename = "ExtraCost", default)]
    pub extra_cost: Option<String>,
    #[serde(rename = "SellerDisc", default)]
    pub seller_disc: Option<String>,
    #[serde(rename = "SellerDiscType", default)]
    pub seller_disc_type: Option<String>,
    #[serde(rename = "MandDisc", default)]
    pub mand_disc: Option<String>,
    #[serde(rename = "MandDiscType", default)]
    pub mand_disc_type: Option<String>,
    #[serde(rename = "TargetProfit", default)]
    pub target_profit: Option<String>,
    #[serde(rename = "TargetType", default)]
    pub target_type: Option<String>,
}

impl ProductRow {
    /// Builds a row by looking each column up by header name.
    fn from_cells(mut cell: impl FnMut(&str) -> Option<String>) -> Self {
        ProductRow {
            sku: cell("SKU"),
            cost: cell("Cost"),
            extra_cost: cell("ExtraCost"),
            seller_disc: cell("SellerDisc"),
            seller_disc_type: cell("SellerDiscType"),
            mand_disc: cell("MandDisc"),
            mand_disc_type: cell("MandDiscType"),
            target_profit: cell("TargetProfit"),
            target_type: cell("TargetType"),
        }
    }
}

// =============================================================================
// Readers
// =============================================================================

/// Reads a CSV product list with a header row.
///
/// Columns are matched by name, so order does not matter and unknown columns
/// are ignored. Short rows are padded with blank cells. Bytes that are not
/// valid UTF-8 (legacy Thai code pages) are replaced rather than failing the
/// import.
pub fn read_csv<R: Read>(reader: R) -> IoResult<Vec<ProductRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let index: HashMap<String, usize> = rdr
        .byte_headers()?
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let name = String::from_utf8_lossy(name);
            (name.trim_start_matches('\u{feff}').to_string(), i)
        })
        .collect();

    let mut rows = Vec::new();
    for record in rdr.byte_records() {
        let record = record?;
        if std::str::from_utf8(record.as_slice()).is_err() {
            warn!(
                line = record.position().map(|p| p.line()),
                "Product row is not valid UTF-8; unreadable characters replaced"
            );
        }

        rows.push(ProductRow::from_cells(|name| {
            index
                .get(name)
                .and_then(|&i| record.get(i))
                .map(|cell| String::from_utf8_lossy(cell).into_owned())
        }));
    }

    debug!(rows = rows.len(), "Read CSV product rows");
    Ok(rows)
}

/// Reads a JSON array of objects keyed by the import column names.
///
/// Cells may be strings or numbers; `null` and nested values count as blank.
pub fn read_json<R: Read>(reader: R) -> IoResult<Vec<ProductRow>> {
    let objects: Vec<Map<String, Value>> = serde_json::from_reader(reader)?;

    let rows: Vec<ProductRow> = objects
        .iter()
        .map(|obj| ProductRow::from_cells(|name| obj.get(name).and_then(json_cell)))
        .collect();

    debug!(rows = rows.len(), "Read JSON product rows");
    Ok(rows)
}

fn json_cell(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Reads the first sheet of an Excel workbook (`.xlsx` or `.xls`).
///
/// The first row of the sheet's used range is the header. Blank rows are
/// skipped. Numeric cells come back as their shortest decimal text, so a
/// cost typed as `100` reads as `"100"`.
pub fn read_xlsx<R: Read>(mut reader: R) -> IoResult<Vec<ProductRow>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let Some(range) = workbook.worksheet_range_at(0) else {
        debug!("Workbook has no sheets");
        return Ok(Vec::new());
    };
    let range = range?;

    let mut sheet_rows = range.rows();
    let index: HashMap<String, usize> = match sheet_rows.next() {
        Some(header) => header
            .iter()
            .enumerate()
            .filter_map(|(i, value)| sheet_cell(value).map(|name| (name, i)))
            .collect(),
        None => HashMap::new(),
    };

    let rows: Vec<ProductRow> = sheet_rows
        .filter(|cells| cells.iter().any(|value| sheet_cell(value).is_some()))
        .map(|cells| {
            ProductRow::from_cells(|name| {
                index
                    .get(name)
                    .and_then(|&i| cells.get(i))
                    .and_then(sheet_cell)
            })
        })
        .collect();

    debug!(rows = rows.len(), "Read workbook product rows");
    Ok(rows)
}

/// Trimmed cell text; empty and error cells count as blank.
fn sheet_cell(value: &Data) -> Option<String> {
    let text = match value {
        Data::Empty | Data::Error(_) => return None,
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    };
    Some(text).filter(|t| !t.is_empty())
}

/// Opens a product list and reads it in the format its extension names.
pub fn read_rows(path: impl AsRef<Path>) -> IoResult<Vec<ProductRow>> {
    let path = path.as_ref();
    let format = DataFormat::from_path(path)?;
    let file = File::open(path).map_err(|e| IoError::file(path, e))?;
    let reader = BufReader::new(file);

    let rows = match format {
        DataFormat::Csv => read_csv(reader)?,
        DataFormat::Json => read_json(reader)?,
        DataFormat::Xlsx | DataFormat::Xls => read_xlsx(reader)?,
    };

    info!(path = %path.display(), format = %format, rows = rows.len(), "Imported product list");
    Ok(rows)
}

// =============================================================================
// Normalization
// =============================================================================

/// Values substituted for blank cells that do not default to zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowDefaults {
    /// Used when `MandDisc` is missing or blank.
    pub mandatory_discount_pct: f64,
}

impl Default for RowDefaults {
    fn default() -> Self {
        RowDefaults {
            mandatory_discount_pct: DEFAULT_MANDATORY_DISCOUNT_PCT,
        }
    }
}

fn non_blank(cell: &Option<String>) -> Option<&str> {
    cell.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Lenient number: blank, unparseable or non-finite cells become 0.
fn number(cell: &Option<String>, column: &str, sku: &str) -> f64 {
    let Some(text) = non_blank(cell) else {
        return 0.0;
    };

    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            debug!(sku = %sku, column, value = %text, "Coerced unreadable number to 0");
            0.0
        }
    }
}

/// `THB` or `บาท` means a fixed amount; anything else is a percentage.
fn amount_kind(cell: &Option<String>) -> AmountKind {
    match non_blank(cell) {
        Some(text) if text.eq_ignore_ascii_case("thb") || text == "บาท" => AmountKind::Fixed,
        _ => AmountKind::Percent,
    }
}

/// Turns one raw row into a fully-populated request.
///
/// Never fails. Suspicious values are logged as warnings next to the SKU and
/// the item is still priced.
pub fn normalize(row: &ProductRow, fees: &FeeSchedule, defaults: &RowDefaults) -> PricingRequest {
    let sku = non_blank(&row.sku).unwrap_or_default().to_string();

    let cost = number(&row.cost, "Cost", &sku) + number(&row.extra_cost, "ExtraCost", &sku);

    let seller = Discount::new(
        DiscountSource::Seller,
        amount_kind(&row.seller_disc_type),
        number(&row.seller_disc, "SellerDisc", &sku),
    );

    let mandatory_value = match non_blank(&row.mand_disc) {
        Some(_) => number(&row.mand_disc, "MandDisc", &sku),
        None => defaults.mandatory_discount_pct,
    };
    let mandatory = Discount::new(
        DiscountSource::Mandatory,
        amount_kind(&row.mand_disc_type),
        mandatory_value,
    );

    let target = ProfitTarget::new(
        amount_kind(&row.target_type),
        number(&row.target_profit, "TargetProfit", &sku),
    );

    let request = PricingRequest::new(sku, cost, *fees, vec![seller, mandatory], target);

    for warning in request_warnings(&request) {
        warn!(sku = %request.sku, %warning, "Suspicious product row");
    }

    request
}

/// Normalizes a whole list, preserving order.
pub fn normalize_all(
    rows: &[ProductRow],
    fees: &FeeSchedule,
    defaults: &RowDefaults,
) -> Vec<PricingRequest> {
    rows.iter().map(|row| normalize(row, fees, defaults)).collect()
}

// =============================================================================
// Template
// =============================================================================

/// Writes an empty import sheet: the header row only.
pub fn write_template<W: Write>(writer: W) -> IoResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(IMPORT_COLUMNS)?;
    wtr.flush()?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
