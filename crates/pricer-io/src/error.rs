//! # I/O Error Types
//!
//! Errors raised while reading product lists or writing reports.
//!
//! ## Error Mapping
//! ```text
//! std::io::Error      → IoError::Io
//! csv::Error          → IoError::Csv
//! serde_json::Error   → IoError::Json
//! calamine::Error     → IoError::Workbook        (reading .xlsx / .xls)
//! XlsxError           → IoError::WorkbookWrite   (writing .xlsx)
//! unknown extension   → IoError::UnsupportedFormat
//! report to .xls      → IoError::ReadOnlyFormat
//! ```
//!
//! Malformed cells are never an error here: they are coerced during
//! normalization. Only structurally unreadable input fails.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Import / export errors.
#[derive(Debug, Error)]
pub enum IoError {
    /// Could not open or create a file.
    #[error("Cannot access {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Read or write failed on an already open stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV structure could not be parsed or written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON structure could not be parsed or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Excel workbook could not be opened or a sheet could not be read.
    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    /// Excel workbook could not be built.
    #[error("Workbook write error: {0}")]
    WorkbookWrite(#[from] rust_xlsxwriter::XlsxError),

    /// The file extension is not a known tabular format.
    #[error("Unsupported file format: {path} (expected .csv, .json, .xlsx or .xls)")]
    UnsupportedFormat { path: PathBuf },

    /// The format can be imported but not written.
    #[error("Cannot write {path}: .xls is import only, use .xlsx")]
    ReadOnlyFormat { path: PathBuf },
}

impl IoError {
    /// Wraps an open/create failure with the offending path.
    pub fn file(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        IoError::File {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Result type for import / export operations.
pub type IoResult<T> = Result<T, IoError>;
