//! Overlay writer: fills generated copy into the customer's own sheet.

use tracing::debug;

use super::rows::{text, RowSink};
use crate::layout::{
    cell, set_cell, Cursor, SectionKind, GENERATED_COLUMN, SOLUTION_MARKER, SOLUTION_SLOTS,
    TEMPLATE_HEADER_MARKER, TRANSLATION_COLUMN,
};
use crate::types::{ContentTree, CopyBlock, Language, SeoAnalysis, StructuredData};

/// Row width of appended blank and heading rows.
const APPENDED_WIDTH: usize = 6;
/// Value column of appended data rows.
const APPENDED_VALUE_COLUMN: usize = 4;

const ORIGINAL_HEADER: &str = "客戶原文 (Original)";
const TRANSLATION_HEADER: &str = "中文翻譯 (Chinese Translation)";

/// Project `tree` onto a copy of `original`.
///
/// Rows addressed by a section marker and item code get the generated value
/// in column 5 and, for non-Chinese targets, the Chinese translation in
/// column 6. Every other row passes through unchanged. Solutions, SEO
/// analysis and structured data are appended after the last original row.
pub fn write_overlay(
    original: &[Vec<String>],
    tree: &ContentTree,
    language: &Language,
) -> Vec<Vec<String>> {
    let bilingual = !language.is_chinese();
    let mut rows = original.to_vec();

    rewrite_header(&mut rows, language);

    let mut cursor = Cursor::default();
    let mut filled = 0usize;
    for row in rows.iter_mut() {
        let (next, step) = cursor.advance(row);
        cursor = next;

        let Some(target) = step.target else { continue };
        let block = tree.block(target.section, target.block);
        if block.is_none() && target.section == SectionKind::Carousel {
            continue;
        }

        let field = target.slot.field;
        set_cell(row, GENERATED_COLUMN, block.and_then(|b| b.get(field)).unwrap_or(""));
        if bilingual && field.translatable() {
            set_cell(
                row,
                TRANSLATION_COLUMN,
                block.and_then(|b| b.translation(field)).unwrap_or(""),
            );
        }
        filled += 1;
    }

    let mut sink = RowSink::with_rows(rows, APPENDED_WIDTH, APPENDED_VALUE_COLUMN, bilingual);
    append_solutions(&mut sink, tree);
    if tree.seo.is_some() || tree.structured_data.is_some() {
        sink.blank();
        sink.blank();
        if let Some(seo) = &tree.seo {
            append_seo(&mut sink, seo);
        }
        if let Some(data) = &tree.structured_data {
            append_structured_data(&mut sink, data);
        }
    }

    let rows = sink.into_rows();
    debug!(filled, total = rows.len(), "overlay written");
    rows
}

/// Relabel the first template header row found in column 4.
fn rewrite_header(rows: &mut [Vec<String>], language: &Language) {
    let Some(header) = rows
        .iter_mut()
        .find(|row| cell(row, APPENDED_VALUE_COLUMN).contains(TEMPLATE_HEADER_MARKER))
    else {
        return;
    };

    set_cell(header, 4, ORIGINAL_HEADER);
    set_cell(
        header,
        GENERATED_COLUMN,
        &format!("AI 生成文案 ({})", language.display_name()),
    );
    if !language.is_chinese() {
        set_cell(header, TRANSLATION_COLUMN, TRANSLATION_HEADER);
    }
}

fn append_solutions(sink: &mut RowSink, tree: &ContentTree) {
    if tree.solutions.is_empty() {
        return;
    }
    sink.blank();
    sink.heading(SOLUTION_MARKER);
    for (i, solution) in tree.solutions.iter().enumerate() {
        sink.note(SOLUTION_MARKER, 2, &format!("方案 {}", i + 1));
        sink.block(SOLUTION_MARKER, SOLUTION_SLOTS, Some(solution as &dyn CopyBlock));
        sink.blank();
    }
}

fn append_seo(sink: &mut RowSink, seo: &SeoAnalysis) {
    sink.heading("=== SEO 優化分析 ===");
    sink.blank();

    let meta = "SEO Meta Tags";
    sink.heading(meta);
    sink.translated(meta, "A", "網站描述 (Meta Description)", text(&seo.meta_description), text(&seo.meta_description_zh));
    sink.translated(meta, "B", "關鍵字 (Meta Keywords)", text(&seo.meta_keywords), text(&seo.meta_keywords_zh));
    sink.translated(meta, "C", "社群分享標題 (OG Title)", text(&seo.og_title), text(&seo.og_title_zh));
    sink.blank();

    let keywords = "關鍵字策略";
    sink.heading(keywords);
    sink.translated(keywords, "A", "主要關鍵字", &seo.primary_keywords.join(", "), &seo.primary_keywords_zh.join(", "));
    sink.translated(keywords, "B", "長尾關鍵字", &seo.long_tail_keywords.join(", "), &seo.long_tail_keywords_zh.join(", "));
    sink.blank();

    if let Some(competitors) = &seo.competitor_analysis {
        let label = "競爭分析";
        sink.heading(label);
        sink.translated(label, "A", "行業分類", text(&competitors.industry), text(&competitors.industry_zh));
        sink.translated(label, "B", "市場機會分析", text(&competitors.gap_analysis), text(&competitors.gap_analysis_zh));
        sink.translated(label, "C", "競爭策略建議", text(&competitors.recommendations), text(&competitors.recommendations_zh));
        sink.blank();
    }

    if let Some(usp) = &seo.usp_analysis {
        let label = "USP差異化分析";
        sink.heading(label);
        sink.translated(label, "A", "獨特賣點", &usp.unique_selling_points.join(" | "), &usp.unique_selling_points_zh.join(" | "));
        sink.translated(label, "B", "差異化策略", text(&usp.differentiation_strategy), text(&usp.differentiation_strategy_zh));
        sink.blank();
    }

    if let Some(optimization) = &seo.content_optimization {
        let label = "內容優化建議";
        let title = optimization.title_length.as_ref();
        let description = optimization.description_length.as_ref();
        let readability = optimization.readability_score.as_ref();

        sink.heading(label);
        sink.translated(
            label,
            "A",
            "標題長度建議",
            title.map_or("", |t| text(&t.recommended)),
            title.map_or("", |t| text(&t.recommendation_zh)),
        );
        sink.translated(
            label,
            "B",
            "描述長度建議",
            description.map_or("", |d| text(&d.recommended)),
            description.map_or("", |d| text(&d.recommendation_zh)),
        );
        sink.translated(
            label,
            "C",
            "可讀性建議",
            readability.map_or("", |r| text(&r.suggestions)),
            readability.map_or("", |r| text(&r.suggestions_zh)),
        );
        sink.blank();
    }
}

/// Organization and website descriptors. Product schemas are not emitted
/// here; only the fresh layout carries them.
fn append_structured_data(sink: &mut RowSink, data: &StructuredData) {
    sink.heading("=== 結構化資料 (Schema.org) ===");
    sink.blank();

    let org = data.organization.as_ref();
    let label = "組織資訊";
    sink.heading(label);
    sink.plain(label, "A", "類型", org.map_or("", |o| text(&o.kind)));
    sink.plain(label, "B", "名稱", org.map_or("", |o| text(&o.name)));
    sink.plain(label, "C", "描述", org.map_or("", |o| text(&o.description)));
    sink.plain(label, "D", "網址", org.map_or("", |o| text(&o.url)));
    sink.blank();

    let site = data.website.as_ref();
    let label = "網站資訊";
    sink.heading(label);
    sink.plain(label, "A", "類型", site.map_or("", |s| text(&s.kind)));
    sink.plain(label, "B", "網址", site.map_or("", |s| text(&s.url)));
    sink.plain(label, "C", "名稱", site.map_or("", |s| text(&s.name)));
    sink.plain(label, "D", "描述", site.map_or("", |s| text(&s.description)));
    sink.blank();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::is_output_label;
    use crate::recover::recover_tree;
    use crate::types::{HeroSection, ProductBlock};

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_header_is_rewritten_once() {
        let original = rows(&[
            &["區塊", "代碼", "說明", "", "客戶填寫內容"],
            &["備註", "", "", "", "客戶填寫說明"],
        ]);
        let out = write_overlay(&original, &ContentTree::default(), &Language::new("en"));

        assert_eq!(
            out[0],
            vec![
                "區塊",
                "代碼",
                "說明",
                "",
                "客戶原文 (Original)",
                "AI 生成文案 (English (通用))",
                "中文翻譯 (Chinese Translation)"
            ]
        );
        assert_eq!(out[1], original[1]);
    }

    #[test]
    fn test_scalar_sections_write_empty_when_absent() {
        let original = rows(&[&["Hero"], &["", "A", "", "", "old"]]);
        let out = write_overlay(&original, &ContentTree::default(), &Language::new("zh-TW"));
        assert_eq!(out[1], vec!["", "A", "", "", "old", ""]);
    }

    #[test]
    fn test_missing_product_rows_pass_through() {
        let original = rows(&[
            &["carousel 1"],
            &["", "A", "", "", "p1"],
            &["carousel 2"],
            &["", "A", "", "", "p2"],
        ]);
        let tree = ContentTree {
            products: vec![ProductBlock {
                title: Some("First".into()),
                ..Default::default()
            }],
            ..Default::default()
        };
        let out = write_overlay(&original, &tree, &Language::new("zh-TW"));

        assert_eq!(out[1], vec!["", "A", "", "", "p1", "First"]);
        assert_eq!(out[3], original[3]);
    }

    #[test]
    fn test_links_get_no_translation_cell() {
        let original = rows(&[&["Hero"], &["", "D", "", "", ""]]);
        let tree = ContentTree {
            hero: Some(HeroSection {
                cta_button_link: Some("https://example.com".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let out = write_overlay(&original, &tree, &Language::new("ja"));
        assert_eq!(out[1], vec!["", "D", "", "", "", "https://example.com"]);
    }

    #[test]
    fn test_original_rows_are_not_mutated() {
        let original = rows(&[&["Hero"], &["", "A", "", "", "old"]]);
        let before = original.clone();
        let _ = write_overlay(&original, &ContentTree::default(), &Language::new("en"));
        assert_eq!(original, before);
    }

    #[test]
    fn test_appended_labels_leave_the_contact_section() {
        let tree = recover_tree(include_str!("../../tests/fixtures/model_response.txt")).unwrap();
        let original = rows(&[&["Contact Us"], &["", "A", "", "", "Hi"]]);
        let out = write_overlay(&original, &tree, &Language::new("en"));

        for row in &out[original.len()..] {
            let label = row[0].trim();
            assert!(
                label.is_empty() || is_output_label(label),
                "unclassified label {label:?}"
            );
        }
    }
}
