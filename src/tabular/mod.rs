//! Tabular file boundary: rows of strings in and out of CSV and XLSX files.

pub mod exporter;
pub mod importer;

use std::path::Path;

use crate::error::{CopyError, CopyResult};

pub use exporter::{csv_bytes, write_xlsx, UTF8_BOM};
pub use importer::{rows_from_csv, rows_from_xlsx};

/// File format, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Csv,
    Xlsx,
}

impl SheetFormat {
    pub fn from_path(path: &Path) -> CopyResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "csv" | "txt" => Ok(SheetFormat::Csv),
            "xlsx" | "xlsm" => Ok(SheetFormat::Xlsx),
            _ => Err(CopyError::InvalidInput(format!(
                "unsupported sheet format '{}': expected .csv or .xlsx",
                path.display()
            ))),
        }
    }
}

/// Read every row of a CSV or XLSX file.
pub fn read_rows(path: &Path) -> CopyResult<Vec<Vec<String>>> {
    match SheetFormat::from_path(path)? {
        SheetFormat::Csv => rows_from_csv(&std::fs::read(path)?),
        SheetFormat::Xlsx => rows_from_xlsx(path),
    }
}

/// Write rows as CSV (with BOM) or XLSX, by extension.
pub fn write_rows(path: &Path, rows: &[Vec<String>]) -> CopyResult<()> {
    match SheetFormat::from_path(path)? {
        SheetFormat::Csv => {
            std::fs::write(path, csv_bytes(rows)?)?;
            Ok(())
        }
        SheetFormat::Xlsx => write_xlsx(path, rows),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(SheetFormat::from_path(Path::new("a.CSV")).unwrap(), SheetFormat::Csv);
        assert_eq!(SheetFormat::from_path(Path::new("a.xlsx")).unwrap(), SheetFormat::Xlsx);
        assert!(SheetFormat::from_path(Path::new("a.ods")).is_err());
        assert!(SheetFormat::from_path(Path::new("noext")).is_err());
    }
}
