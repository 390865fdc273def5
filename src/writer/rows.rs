//! Row builder shared by both writers.

use crate::layout::FieldSlot;
use crate::types::CopyBlock;

/// Accumulates output rows with a fixed value column and an optional
/// translation column right after it.
#[derive(Debug)]
pub(crate) struct RowSink {
    rows: Vec<Vec<String>>,
    /// Width of blank and heading rows.
    width: usize,
    value_column: usize,
    bilingual: bool,
}

impl RowSink {
    pub fn new(width: usize, value_column: usize, bilingual: bool) -> Self {
        Self::with_rows(Vec::new(), width, value_column, bilingual)
    }

    /// Continue after rows that already exist.
    pub fn with_rows(
        rows: Vec<Vec<String>>,
        width: usize,
        value_column: usize,
        bilingual: bool,
    ) -> Self {
        Self {
            rows,
            width,
            value_column,
            bilingual,
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn blank(&mut self) {
        self.rows.push(vec![String::new(); self.width]);
    }

    /// Single-label row introducing a block.
    pub fn heading(&mut self, label: &str) {
        self.note(label, 0, "");
    }

    /// Row with a section label and one text cell at `column`.
    pub fn note(&mut self, section: &str, column: usize, text: &str) {
        let mut row = vec![String::new(); self.width.max(column + 1)];
        row[0] = section.to_string();
        if column > 0 {
            row[column] = text.to_string();
        }
        self.rows.push(row);
    }

    /// Data row without a translation cell.
    pub fn plain(&mut self, section: &str, code: &str, label: &str, value: &str) {
        let mut row = vec![String::new(); self.value_column + 1];
        row[0] = section.to_string();
        row[1] = code.to_string();
        row[2] = label.to_string();
        row[self.value_column] = value.to_string();
        self.rows.push(row);
    }

    /// Data row whose translation cell is only written for bilingual output.
    pub fn translated(
        &mut self,
        section: &str,
        code: &str,
        label: &str,
        value: &str,
        translation: &str,
    ) {
        self.plain(section, code, label, value);
        if self.bilingual {
            if let Some(row) = self.rows.last_mut() {
                row.push(translation.to_string());
            }
        }
    }

    /// One data row per slot, read from `block`. Absent blocks render empty.
    pub fn block(&mut self, section: &str, slots: &[FieldSlot], block: Option<&dyn CopyBlock>) {
        for slot in slots {
            let value = block.and_then(|b| b.get(slot.field)).unwrap_or("");
            if slot.field.translatable() {
                let translation = block.and_then(|b| b.translation(slot.field)).unwrap_or("");
                self.translated(section, slot.code, slot.label, value, translation);
            } else {
                self.plain(section, slot.code, slot.label, value);
            }
        }
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }
}

/// Optional text leaf as a cell.
pub(crate) fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

/// Numeric leaf as a cell; whole numbers print without a decimal point and
/// absent values print as `0`.
pub(crate) fn number(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 && v.abs() < 1e10 => format!("{}", v as i64),
        Some(v) => v.to_string(),
        None => "0".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::SectionKind;
    use crate::types::HeroSection;

    #[test]
    fn test_translated_row_respects_bilingual_flag() {
        let mut sink = RowSink::new(4, 3, false);
        sink.translated("Hero", "A", "主標題", "Hi", "嗨");
        let mut bilingual = RowSink::new(4, 3, true);
        bilingual.translated("Hero", "A", "主標題", "Hi", "嗨");

        assert_eq!(sink.into_rows(), vec![vec!["Hero", "A", "主標題", "Hi"]]);
        assert_eq!(
            bilingual.into_rows(),
            vec![vec!["Hero", "A", "主標題", "Hi", "嗨"]]
        );
    }

    #[test]
    fn test_block_skips_translation_for_links() {
        let hero = HeroSection {
            cta_button_link: Some("/contact".into()),
            ..Default::default()
        };
        let mut sink = RowSink::new(4, 3, true);
        sink.block("Hero", SectionKind::Hero.slots(), Some(&hero as &dyn CopyBlock));
        let rows = sink.into_rows();

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], vec!["Hero", "A", "主標題", "", ""]);
        assert_eq!(rows[3], vec!["Hero", "D", "CTA 連結", "/contact"]);
    }

    #[test]
    fn test_note_places_text() {
        let mut sink = RowSink::new(6, 4, false);
        sink.note("Solution", 2, "方案 1");
        sink.heading("Solution");
        let rows = sink.into_rows();
        assert_eq!(rows[0], vec!["Solution", "", "方案 1", "", "", ""]);
        assert_eq!(rows[1], vec!["Solution", "", "", "", "", ""]);
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(number(Some(55.0)), "55");
        assert_eq!(number(Some(2.5)), "2.5");
        assert_eq!(number(None), "0");
    }
}
