//! Rows → CSV bytes and XLSX files.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};
use tracing::debug;

use crate::error::{CopyError, CopyResult};

/// UTF-8 byte-order mark; spreadsheet apps need it to detect UTF-8 CSV.
pub const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Encode rows as CSV with a leading BOM. Rows may differ in width.
pub fn csv_bytes(rows: &[Vec<String>]) -> CopyResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::CRLF)
        .from_writer(UTF8_BOM.to_vec());

    for row in rows {
        writer.write_record(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| CopyError::Unexpected(format!("failed to flush CSV: {}", e)))
}

/// Write rows to a single-worksheet XLSX file; the first row is bold.
pub fn write_xlsx(path: &Path, rows: &[Vec<String>]) -> CopyResult<()> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("AI Output")
        .map_err(|e| CopyError::Sheet(format!("failed to name worksheet: {}", e)))?;

    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            let result = if r == 0 {
                worksheet.write_string_with_format(r as u32, c as u16, value, &header)
            } else {
                worksheet.write_string(r as u32, c as u16, value)
            };
            result.map_err(|e| {
                CopyError::Sheet(format!("failed to write cell ({}, {}): {}", r, c, e))
            })?;
        }
    }

    workbook
        .save(path)
        .map_err(|e| CopyError::Sheet(format!("failed to save {}: {}", path.display(), e)))?;

    debug!(path = %path.display(), rows = rows.len(), "xlsx written");
    Ok(())
}
