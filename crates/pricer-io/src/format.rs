//! File format detection by extension.

use std::fmt;
use std::path::Path;

use crate::error::{IoError, IoResult};

/// Tabular formats understood by the importer. All but [`DataFormat::Xls`]
/// can also be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Csv,
    Json,
    /// Excel workbook; the first sheet is read, reports go to `Results`.
    Xlsx,
    /// Legacy Excel workbook, import only.
    Xls,
}

impl DataFormat {
    /// Picks the format from the file extension, case-insensitively.
    ///
    /// ## Example
    /// ```rust
    /// use pricer_io::DataFormat;
    ///
    /// assert_eq!(DataFormat::from_path("out/Report.CSV").unwrap(), DataFormat::Csv);
    /// assert_eq!(DataFormat::from_path("products.xlsx").unwrap(), DataFormat::Xlsx);
    /// assert!(DataFormat::from_path("products.pdf").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> IoResult<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("csv") => Ok(DataFormat::Csv),
            Some("json") => Ok(DataFormat::Json),
            Some("xlsx") => Ok(DataFormat::Xlsx),
            Some("xls") => Ok(DataFormat::Xls),
            _ => Err(IoError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn is_writable(self) -> bool {
        !matches!(self, DataFormat::Xls)
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataFormat::Csv => write!(f, "csv"),
            DataFormat::Json => write!(f, "json"),
            DataFormat::Xlsx => write!(f, "xlsx"),
            DataFormat::Xls => write!(f, "xls"),
        }
    }
}
