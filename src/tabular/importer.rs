//! CSV and XLSX → rows.

use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use tracing::debug;

use super::exporter::UTF8_BOM;
use crate::error::{CopyError, CopyResult};

/// Decode CSV bytes. No header row, ragged rows kept, leading BOM dropped.
/// Blank lines between records come back as single empty-cell rows.
pub fn rows_from_csv(bytes: &[u8]) -> CopyResult<Vec<Vec<String>>> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    let mut record = csv::StringRecord::new();
    loop {
        let mut start = (reader.position().byte() as usize).min(bytes.len());
        // the previous record may have stopped between \r and \n
        if start > 0 && bytes[start - 1] == b'\r' && bytes.get(start) == Some(&b'\n') {
            start += 1;
        }
        if !reader.read_record(&mut record)? {
            break;
        }
        // the csv reader skips empty lines before a record
        for _ in 0..blank_lines(&bytes[start..]) {
            rows.push(vec![String::new()]);
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    debug!(rows = rows.len(), "csv decoded");
    Ok(rows)
}

/// Number of empty lines at the start of `bytes`.
fn blank_lines(bytes: &[u8]) -> usize {
    let mut count = 0;
    let mut rest = bytes;
    loop {
        rest = match rest {
            [b'\r', b'\n', tail @ ..] | [b'\n', tail @ ..] | [b'\r', tail @ ..] => tail,
            _ => return count,
        };
        count += 1;
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}

/// Read the first worksheet. Leading empty rows and columns are kept so
/// column positions match the sheet.
pub fn rows_from_xlsx(path: &Path) -> CopyResult<Vec<Vec<String>>> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e| CopyError::Sheet(format!("failed to open {}: {}", path.display(), e)))?;

    let first = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| CopyError::Sheet(format!("{} has no worksheets", path.display())))?;

    let range = workbook
        .worksheet_range(&first)
        .map_err(|e| CopyError::Sheet(format!("failed to read sheet '{}': {}", first, e)))?;

    let (row_offset, col_offset) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows = vec![Vec::new(); row_offset];
    for row in range.rows() {
        let mut cells = vec![String::new(); col_offset];
        cells.extend(row.iter().map(cell_text));
        rows.push(cells);
    }

    debug!(sheet = %first, rows = rows.len(), "xlsx decoded");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_strips_bom_and_keeps_ragged_rows() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice("Hero\n,A,,,\"Hello, world\"\n".as_bytes());

        let rows = rows_from_csv(&bytes).unwrap();
        assert_eq!(rows, vec![vec!["Hero"], vec!["", "A", "", "", "Hello, world"]]);
    }

    #[test]
    fn test_csv_multiline_cell() {
        let rows = rows_from_csv("About Us\n,C,,,\"line one\nline two\"\n".as_bytes()).unwrap();
        assert_eq!(rows[1][4], "line one\nline two");
    }

    #[test]
    fn test_csv_keeps_blank_separator_lines() {
        let rows = rows_from_csv("Hero\n,A,,,Hi\n\nAbout Us\n,B,,,Story\n".as_bytes()).unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[2], vec![""]);
        assert_eq!(rows[3], vec!["About Us"]);

        let rows = rows_from_csv("Hero\r\n\r\n\r\n,A,,,\"x\n\ny\"\r\n".as_bytes()).unwrap();
        assert_eq!(rows, vec![vec!["Hero"], vec![""], vec![""], vec!["", "A", "", "", "x\n\ny"]]);
    }

    #[test]
    fn test_blank_lines_count() {
        assert_eq!(blank_lines(b"\n\r\n\rx"), 3);
        assert_eq!(blank_lines(b"x\n"), 0);
        assert_eq!(blank_lines(b""), 0);
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Float(3.0)), "3");
        assert_eq!(cell_text(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::String("x".into())), "x");
    }
}
