//! # pricer-io: Spreadsheet Layer for Marketplace Pricer
//!
//! This crate reads seller product lists and writes pricing reports.
//! CSV, JSON and `.xlsx` workbooks are supported in both directions;
//! legacy `.xls` workbooks can be imported.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Marketplace Pricer Data Flow                        │
//! │                                                                         │
//! │  pricer batch products.csv -o report.json                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    pricer-io (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐                        ┌───────────────┐   │   │
//! │  │   │    import     │                        │    export     │   │   │
//! │  │   │               │                        │               │   │   │
//! │  │   │ read_rows     │                        │ ReportRow     │   │   │
//! │  │   │ normalize     │                        │ filter_by_sku │   │   │
//! │  │   │ write_template│                        │ write_rows    │   │   │
//! │  │   └───────┬───────┘                        └───────▲───────┘   │   │
//! │  │           │                                        │           │   │
//! │  └───────────┼────────────────────────────────────────┼───────────┘   │
//! │              ▼                                        │               │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   pricer-core: PricingRequest ──► price_batch ──► PricingResult │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`import`] - Row readers, normalization and the empty template
//! - [`export`] - Report rows, SKU filter and writers
//! - [`format`] - Format detection by file extension
//! - [`error`] - I/O error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pricer_core::{batch::price_batch, FeeSchedule};
//! use pricer_io::{export, import};
//!
//! let rows = import::read_rows("products.csv")?;
//! let requests = import::normalize_all(&rows, &FeeSchedule::default(), &Default::default());
//! let report = export::report_rows(&price_batch(&requests));
//! export::write_rows("report.json", &export::filter_by_sku(report, "coke"))?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod export;
pub mod format;
pub mod import;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{IoError, IoResult};
pub use export::{filter_by_sku, ReportRow};
pub use format::DataFormat;
pub use import::{normalize, ProductRow, RowDefaults};
