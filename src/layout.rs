//! Sheet vocabulary shared by the reader and both writers.
//!
//! A template sheet is addressed by two positional marker columns: column 0
//! names the section (`Hero`, `About Us`, `carousel`, `Contact Us`) and
//! column 1 carries a single-letter item code. The tables below map
//! `(section, item code)` to exactly one copy field. The reader, the overlay
//! writer and the fresh writer all dispatch through [`SectionKind::slot`] and
//! walk rows with the same [`Cursor`], so they cannot drift apart.
//!
//! These strings are a file-format contract with the spreadsheet template.

use crate::types::{ContentTree, CopyBlock, Field};

/// Column 0: section label.
pub const SECTION_COLUMN: usize = 0;
/// Column 1: item code.
pub const CODE_COLUMN: usize = 1;
/// Column 2: human-readable field description (generated sheets).
pub const LABEL_COLUMN: usize = 2;

/// Overlay output: AI-generated copy.
pub const GENERATED_COLUMN: usize = 5;
/// Overlay output: Chinese translation of the generated copy.
pub const TRANSLATION_COLUMN: usize = 6;

/// Substring that identifies the template's header cell in column 4.
pub const TEMPLATE_HEADER_MARKER: &str = "客戶填寫";
/// Column 0 header of a sheet produced by the fresh writer.
pub const GENERATED_HEADER_LABEL: &str = "區塊名稱";
/// Prefix of the generated-copy header cell.
pub const GENERATED_HEADER_PREFIX: &str = "AI 生成文案";

/// Sections the reader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Hero,
    About,
    Carousel,
    Contact,
}

/// One addressable row inside a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSlot {
    pub code: &'static str,
    pub field: Field,
    /// Description written to column 2 by the fresh writer.
    pub label: &'static str,
}

const HERO_SLOTS: &[FieldSlot] = &[
    FieldSlot { code: "A", field: Field::Title, label: "主標題" },
    FieldSlot { code: "B", field: Field::Description, label: "副標題描述" },
    FieldSlot { code: "C", field: Field::CtaButtonText, label: "CTA 按鈕文字" },
    FieldSlot { code: "D", field: Field::CtaButtonLink, label: "CTA 連結" },
];

const ABOUT_SLOTS: &[FieldSlot] = &[
    FieldSlot { code: "A", field: Field::Badge, label: "標籤" },
    FieldSlot { code: "B", field: Field::Title, label: "標題" },
    FieldSlot { code: "C", field: Field::Description, label: "描述內容" },
    FieldSlot { code: "D", field: Field::Image, label: "圖片 (URL)" },
];

const CAROUSEL_SLOTS: &[FieldSlot] = &[
    FieldSlot { code: "A", field: Field::Title, label: "產品標題" },
    FieldSlot { code: "B", field: Field::ShortDescription, label: "簡短描述" },
    FieldSlot { code: "C", field: Field::CompleteDescription, label: "完整描述" },
];

const CONTACT_SLOTS: &[FieldSlot] = &[
    FieldSlot { code: "A", field: Field::Badge, label: "標籤" },
    FieldSlot { code: "B", field: Field::Title, label: "標題" },
    FieldSlot { code: "C", field: Field::Description, label: "描述" },
];

/// Solutions are write-only: the template has no Solution section, both
/// writers append it.
pub const SOLUTION_MARKER: &str = "Solution";
pub const SOLUTION_SLOTS: &[FieldSlot] = &[
    FieldSlot { code: "A", field: Field::Badge, label: "標籤" },
    FieldSlot { code: "B", field: Field::Title, label: "標題" },
    FieldSlot { code: "C", field: Field::Description, label: "敘述" },
];

/// Column-0 labels of the blocks the writers append after the content
/// sections. They carry no readable slots; seeing one leaves the current
/// section.
pub const OUTPUT_LABELS: &[&str] = &[
    SOLUTION_MARKER,
    "SEO Meta Tags",
    "SEO 內容結構",
    "關鍵字策略",
    "關鍵字密度分析",
    "競爭分析",
    "USP差異化分析",
    "內容優化建議",
    "組織資訊",
    "網站資訊",
    "產品結構化資料",
];

/// Prefix of the writers' divider headings (`=== SEO 優化分析 ===`).
pub const DIVIDER_PREFIX: &str = "===";

/// Label of the n-th product schema block (`產品 1`, `產品 2`, ...).
pub fn product_schema_label(index: usize) -> String {
    format!("產品 {}", index + 1)
}

/// Whether a trimmed column-0 label names a block written by the writers.
pub fn is_output_label(label: &str) -> bool {
    let label = label.trim();
    if label.starts_with(DIVIDER_PREFIX) || OUTPUT_LABELS.iter().any(|l| label.starts_with(l)) {
        return true;
    }
    label
        .strip_prefix("產品 ")
        .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

impl SectionKind {
    pub const ALL: [SectionKind; 4] = [
        SectionKind::Hero,
        SectionKind::About,
        SectionKind::Carousel,
        SectionKind::Contact,
    ];

    /// Keyword matched with `starts_with` against trimmed column 0.
    pub fn marker(self) -> &'static str {
        match self {
            SectionKind::Hero => "Hero",
            SectionKind::About => "About Us",
            SectionKind::Carousel => "carousel",
            SectionKind::Contact => "Contact Us",
        }
    }

    pub fn slots(self) -> &'static [FieldSlot] {
        match self {
            SectionKind::Hero => HERO_SLOTS,
            SectionKind::About => ABOUT_SLOTS,
            SectionKind::Carousel => CAROUSEL_SLOTS,
            SectionKind::Contact => CONTACT_SLOTS,
        }
    }

    /// Field addressed by `code` in this section, if any.
    pub fn slot(self, code: &str) -> Option<&'static FieldSlot> {
        self.slots().iter().find(|slot| slot.code == code)
    }

    /// Section whose keyword prefixes the (trimmed) label.
    pub fn detect(label: &str) -> Option<SectionKind> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|kind| label.starts_with(kind.marker()))
    }
}

/// Cell accessor for ragged rows: missing cells read as empty.
pub fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

/// Write a cell, widening the row with empty cells as needed.
pub fn set_cell(row: &mut Vec<String>, index: usize, value: &str) {
    if row.len() <= index {
        row.resize(index + 1, String::new());
    }
    row[index] = value.to_string();
}

/// Sequential item code for data-driven rows: 0 → A, 25 → Z, 26 → AA.
pub fn item_code(index: usize) -> String {
    let mut result = String::new();
    let mut idx = index;

    loop {
        let remainder = idx % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }

    result
}

//==============================================================================
// Section addressing on the tree
//==============================================================================

impl ContentTree {
    /// Block addressed by a section and, for carousel sections, a product index.
    pub fn block(&self, section: SectionKind, index: Option<usize>) -> Option<&dyn CopyBlock> {
        match section {
            SectionKind::Hero => self.hero.as_ref().map(|b| b as &dyn CopyBlock),
            SectionKind::About => self.about.as_ref().map(|b| b as &dyn CopyBlock),
            SectionKind::Contact => self.contact.as_ref().map(|b| b as &dyn CopyBlock),
            SectionKind::Carousel => index
                .and_then(|i| self.products.get(i))
                .map(|b| b as &dyn CopyBlock),
        }
    }

    pub fn block_mut(
        &mut self,
        section: SectionKind,
        index: Option<usize>,
    ) -> Option<&mut dyn CopyBlock> {
        match section {
            SectionKind::Hero => self.hero.as_mut().map(|b| b as &mut dyn CopyBlock),
            SectionKind::About => self.about.as_mut().map(|b| b as &mut dyn CopyBlock),
            SectionKind::Contact => self.contact.as_mut().map(|b| b as &mut dyn CopyBlock),
            SectionKind::Carousel => index
                .and_then(|i| self.products.get_mut(i))
                .map(|b| b as &mut dyn CopyBlock),
        }
    }
}

//==============================================================================
// Sheet layout
//==============================================================================

/// Where a sheet keeps the values the reader consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    pub value_column: usize,
}

impl SheetLayout {
    /// Customer template: values in column 4.
    pub const TEMPLATE: SheetLayout = SheetLayout { value_column: 4 };
    /// Sheet produced by the fresh writer: values in column 3.
    pub const GENERATED: SheetLayout = SheetLayout { value_column: 3 };

    /// Pick the layout from the header row that precedes the first section.
    pub fn detect(rows: &[Vec<String>]) -> SheetLayout {
        for row in rows {
            if SectionKind::detect(cell(row, SECTION_COLUMN)).is_some() {
                break;
            }
            if cell(row, SECTION_COLUMN).trim() == GENERATED_HEADER_LABEL
                && cell(row, 3).trim().starts_with(GENERATED_HEADER_PREFIX)
            {
                return SheetLayout::GENERATED;
            }
        }
        SheetLayout::TEMPLATE
    }
}

impl Default for SheetLayout {
    fn default() -> Self {
        SheetLayout::TEMPLATE
    }
}

//==============================================================================
// Row cursor
//==============================================================================

/// Scan position: the current section and, inside carousel sections, the
/// index of the current product block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub section: Option<SectionKind>,
    /// Index of the current carousel block; `None` until the first one opens.
    pub block: Option<usize>,
    /// Number of carousel blocks opened so far.
    pub blocks_opened: usize,
}

/// What a single row means to a scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowStep {
    /// Set when this row opened a new carousel block.
    pub opened_block: Option<usize>,
    /// Field this row addresses, if any.
    pub target: Option<FieldTarget>,
}

/// A field address produced by the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldTarget {
    pub section: SectionKind,
    /// Carousel block index; `None` for scalar sections.
    pub block: Option<usize>,
    pub slot: &'static FieldSlot,
}

impl Cursor {
    /// Advance over one row.
    ///
    /// - A label in column 0 that starts with a section keyword switches to
    ///   that section. With an empty item code the row is a pure marker; a
    ///   carousel marker opens a new product block.
    /// - A keyword row that also carries an item code is a marker and a data
    ///   row at once. It only opens a block when the cursor is not already
    ///   inside a carousel block.
    /// - A label the writers emit for appended blocks (solutions, SEO,
    ///   structured data, dividers) leaves the current section.
    /// - Any other row, whatever column 0 holds, dispatches on the item code
    ///   within the current section.
    pub fn advance(self, row: &[String]) -> (Cursor, RowStep) {
        let label = cell(row, SECTION_COLUMN).trim();
        let code = cell(row, CODE_COLUMN).trim();
        let mut next = self;
        let mut opened_block = None;

        match SectionKind::detect(label) {
            Some(kind) => {
                let already_inside = self.section == Some(kind)
                    && (kind != SectionKind::Carousel || self.block.is_some());
                if code.is_empty() || !already_inside {
                    next.section = Some(kind);
                    if kind == SectionKind::Carousel {
                        next.block = Some(self.blocks_opened);
                        next.blocks_opened = self.blocks_opened + 1;
                        opened_block = next.block;
                    }
                }
                if code.is_empty() {
                    return (next, RowStep { opened_block, target: None });
                }
            }
            None if is_output_label(label) => {
                next.section = None;
                next.block = None;
                return (next, RowStep { opened_block: None, target: None });
            }
            None => {}
        }

        let target = next.section.and_then(|section| {
            section.slot(code).map(|slot| FieldTarget {
                section,
                block: if section == SectionKind::Carousel { next.block } else { None },
                slot,
            })
        });

        (next, RowStep { opened_block, target })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_detect_uses_prefix_match() {
        assert_eq!(SectionKind::detect("  Hero Banner "), Some(SectionKind::Hero));
        assert_eq!(SectionKind::detect("About Us (關於我們)"), Some(SectionKind::About));
        assert_eq!(SectionKind::detect("carousel-2"), Some(SectionKind::Carousel));
        assert_eq!(SectionKind::detect("Carousel"), None);
        assert_eq!(SectionKind::detect("Our Hero"), None);
    }

    #[test]
    fn test_slot_tables() {
        assert_eq!(SectionKind::Hero.slot("D").unwrap().field, Field::CtaButtonLink);
        assert_eq!(SectionKind::About.slot("D").unwrap().field, Field::Image);
        assert!(SectionKind::Carousel.slot("D").is_none());
        assert!(SectionKind::Contact.slot("E").is_none());
    }

    #[test]
    fn test_cursor_marker_then_field() {
        let (cursor, step) = Cursor::default().advance(&row(&["Hero"]));
        assert_eq!(cursor.section, Some(SectionKind::Hero));
        assert!(step.target.is_none());

        let (_, step) = cursor.advance(&row(&["", "B", "", "", "Desc"]));
        let target = step.target.unwrap();
        assert_eq!(target.section, SectionKind::Hero);
        assert_eq!(target.slot.field, Field::Description);
    }

    #[test]
    fn test_cursor_rows_before_marker_are_ignored() {
        let (cursor, step) = Cursor::default().advance(&row(&["", "A", "", "", "x"]));
        assert_eq!(cursor, Cursor::default());
        assert!(step.target.is_none());
    }

    #[test]
    fn test_cursor_carousel_blocks_are_counted() {
        let (cursor, step) = Cursor::default().advance(&row(&["carousel 1"]));
        assert_eq!(step.opened_block, Some(0));
        let (cursor, step) = cursor.advance(&row(&["carousel", "A", "產品標題", "T"]));
        assert_eq!(step.opened_block, None);
        assert_eq!(step.target.unwrap().block, Some(0));
        let (cursor, step) = cursor.advance(&row(&["carousel 2"]));
        assert_eq!(step.opened_block, Some(1));
        assert_eq!(cursor.block, Some(1));
    }

    #[test]
    fn test_cursor_keyword_row_with_code_opens_block_once() {
        let (cursor, step) = Cursor::default().advance(&row(&["carousel", "A"]));
        assert_eq!(step.opened_block, Some(0));
        assert_eq!(step.target.unwrap().block, Some(0));
        let (_, step) = cursor.advance(&row(&["carousel", "B"]));
        assert_eq!(step.opened_block, None);
        assert_eq!(step.target.unwrap().block, Some(0));
    }

    #[test]
    fn test_cursor_output_label_closes_section() {
        let (cursor, _) = Cursor::default().advance(&row(&["Contact Us"]));
        let (cursor, _) = cursor.advance(&row(&["SEO Meta Tags"]));
        assert_eq!(cursor.section, None);
        let (_, step) = cursor.advance(&row(&["SEO Meta Tags", "A", "", "x"]));
        assert!(step.target.is_none());
    }

    #[test]
    fn test_cursor_reads_rows_with_field_labels() {
        let (cursor, _) = Cursor::default().advance(&row(&["Hero"]));
        let (cursor, step) = cursor.advance(&row(&["主標題", "A", "", "", "Welcome"]));
        assert_eq!(cursor.section, Some(SectionKind::Hero));
        assert_eq!(step.target.unwrap().slot.field, Field::Title);

        let (cursor, _) = Cursor::default().advance(&row(&["carousel 1"]));
        let (_, step) = cursor.advance(&row(&["產品標題", "A", "", "", "Oolong"]));
        assert_eq!(step.target.unwrap().block, Some(0));
    }

    #[test]
    fn test_output_labels() {
        assert!(is_output_label("Solution"));
        assert!(is_output_label("=== SEO 優化分析 ==="));
        assert!(is_output_label("組織資訊 (Organization)"));
        assert!(is_output_label(&product_schema_label(1)));
        assert!(!is_output_label("產品標題"));
        assert!(!is_output_label("主標題"));
        assert!(!is_output_label("產品 "));
    }

    #[test]
    fn test_layout_detection() {
        let generated = vec![row(&["區塊名稱", "項目代碼", "項目說明", "AI 生成文案 (English (通用))"])];
        assert_eq!(SheetLayout::detect(&generated), SheetLayout::GENERATED);

        let template = vec![row(&["區塊", "代碼", "說明", "範例", "客戶填寫"])];
        assert_eq!(SheetLayout::detect(&template), SheetLayout::TEMPLATE);
    }

    #[test]
    fn test_item_code_sequence() {
        assert_eq!(item_code(0), "A");
        assert_eq!(item_code(3), "D");
        assert_eq!(item_code(25), "Z");
        assert_eq!(item_code(26), "AA");
        assert_eq!(item_code(701), "ZZ");
    }

    #[test]
    fn test_set_cell_widens_row() {
        let mut r = row(&["Hero", "A"]);
        set_cell(&mut r, 5, "x");
        assert_eq!(r.len(), 6);
        assert_eq!(r[5], "x");
        assert_eq!(cell(&r, 9), "");
    }
}
