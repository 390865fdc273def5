//! Fresh writer: a complete canonical sheet built from the tree alone.

use tracing::debug;

use super::rows::{number, text, RowSink};
use crate::layout::{
    item_code, product_schema_label, SectionKind, SheetLayout, GENERATED_HEADER_LABEL,
    GENERATED_HEADER_PREFIX, SOLUTION_MARKER, SOLUTION_SLOTS,
};
use crate::types::{ContentTree, CopyBlock, Language, SeoAnalysis, StructuredData};

const WIDTH: usize = 4;

/// Build a sheet for `tree` with values in column 3.
///
/// The header row has four columns for Chinese targets and a fifth
/// translation column otherwise. Sections follow in a fixed order: hero,
/// about, products, solutions, contact, SEO analysis, structured data.
/// Feeding the result back to the reader recovers hero, about, products and
/// contact.
pub fn write_fresh(tree: &ContentTree, language: &Language) -> Vec<Vec<String>> {
    let bilingual = !language.is_chinese();
    let mut sink = RowSink::new(WIDTH, SheetLayout::GENERATED.value_column, bilingual);

    let mut header = vec![
        GENERATED_HEADER_LABEL.to_string(),
        "項目代碼".to_string(),
        "項目說明".to_string(),
        format!("{} ({})", GENERATED_HEADER_PREFIX, language.display_name()),
    ];
    if bilingual {
        header.push("中文翻譯".to_string());
    }
    sink.push(header);
    sink.blank();

    sink.heading("=== 網站內容區塊 ===");
    sink.blank();

    for kind in [SectionKind::Hero, SectionKind::About] {
        sink.heading(kind.marker());
        sink.block(kind.marker(), kind.slots(), tree.block(kind, None));
        sink.blank();
    }

    let carousel = SectionKind::Carousel;
    for (i, product) in tree.products.iter().enumerate() {
        sink.note(carousel.marker(), 3, &format!("產品 {}", i + 1));
        sink.block(carousel.marker(), carousel.slots(), Some(product as &dyn CopyBlock));
        sink.blank();
    }

    if !tree.solutions.is_empty() {
        sink.heading(SOLUTION_MARKER);
        for (i, solution) in tree.solutions.iter().enumerate() {
            sink.note(SOLUTION_MARKER, 3, &format!("方案 {}", i + 1));
            sink.block(SOLUTION_MARKER, SOLUTION_SLOTS, Some(solution as &dyn CopyBlock));
            sink.blank();
        }
    }

    let contact = SectionKind::Contact;
    sink.heading(contact.marker());
    sink.block(contact.marker(), contact.slots(), tree.block(contact, None));
    sink.blank();
    sink.blank();

    if let Some(seo) = &tree.seo {
        write_seo(&mut sink, seo);
    }
    if let Some(data) = &tree.structured_data {
        write_structured_data(&mut sink, data);
    }

    let rows = sink.into_rows();
    debug!(rows = rows.len(), language = %language, "fresh sheet written");
    rows
}

fn write_seo(sink: &mut RowSink, seo: &SeoAnalysis) {
    sink.heading("=== SEO 優化分析 ===");
    sink.blank();

    let meta = "SEO Meta Tags";
    sink.heading(meta);
    sink.translated(meta, "A", "網站描述 (Meta Description)", text(&seo.meta_description), text(&seo.meta_description_zh));
    sink.translated(meta, "B", "關鍵字 (Meta Keywords)", text(&seo.meta_keywords), text(&seo.meta_keywords_zh));
    sink.translated(meta, "C", "社群分享標題 (OG Title)", text(&seo.og_title), text(&seo.og_title_zh));
    sink.translated(meta, "D", "社群分享描述 (OG Description)", text(&seo.og_description), text(&seo.og_description_zh));
    sink.blank();

    let structure = "SEO 內容結構";
    sink.heading(structure);
    sink.translated(structure, "A", "建議H2標題", &seo.h2_suggestions.join(" | "), &seo.h2_suggestions_zh.join(" | "));
    sink.translated(structure, "B", "建議H3標題", &seo.h3_suggestions.join(" | "), &seo.h3_suggestions_zh.join(" | "));
    sink.blank();

    let keywords = "關鍵字策略";
    sink.heading(keywords);
    sink.translated(keywords, "A", "主要關鍵字", &seo.primary_keywords.join(", "), &seo.primary_keywords_zh.join(", "));
    sink.translated(keywords, "B", "長尾關鍵字", &seo.long_tail_keywords.join(", "), &seo.long_tail_keywords_zh.join(", "));
    sink.blank();

    if !seo.keyword_density.is_empty() {
        let label = "關鍵字密度分析";
        sink.heading(label);
        for (i, entry) in seo.keyword_density.iter().enumerate() {
            let keyword = match entry.density {
                Some(density) => format!("{} ({}%)", text(&entry.keyword), number(Some(density))),
                None => text(&entry.keyword).to_string(),
            };
            // No translated recommendation exists; the translation cell repeats it.
            let recommendation = text(&entry.recommendation);
            sink.translated(label, &item_code(i), &keyword, recommendation, recommendation);
        }
        sink.blank();
    }

    if let Some(competitors) = &seo.competitor_analysis {
        let label = "競爭分析";
        sink.heading(label);
        sink.translated(label, "A", "行業分類", text(&competitors.industry), text(&competitors.industry_zh));
        sink.translated(
            label,
            "B",
            "競爭對手關鍵字",
            &competitors.competitor_keywords.join(", "),
            &competitors.competitor_keywords_zh.join(", "),
        );
        sink.translated(label, "C", "市場機會分析", text(&competitors.gap_analysis), text(&competitors.gap_analysis_zh));
        sink.translated(label, "D", "競爭策略建議", text(&competitors.recommendations), text(&competitors.recommendations_zh));
        sink.blank();
    }

    if let Some(usp) = &seo.usp_analysis {
        let label = "USP差異化分析";
        sink.heading(label);
        sink.translated(label, "A", "獨特賣點", &usp.unique_selling_points.join(" | "), &usp.unique_selling_points_zh.join(" | "));
        sink.translated(label, "B", "差異化策略", text(&usp.differentiation_strategy), text(&usp.differentiation_strategy_zh));
        sink.translated(label, "C", "品牌定位陳述", text(&usp.positioning_statement), text(&usp.positioning_statement_zh));
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
            &format!("標題長度 (目前: {})", number(title.and_then(|t| t.current))),
            title.map_or("", |t| text(&t.recommended)),
            title.map_or("", |t| text(&t.recommendation_zh)),
        );
        sink.translated(
            label,
            "B",
            &format!("描述長度 (目前: {})", number(description.and_then(|d| d.current))),
            description.map_or("", |d| text(&d.recommended)),
            description.map_or("", |d| text(&d.recommendation_zh)),
        );
        sink.translated(
            label,
            "C",
            &format!("可讀性評分 ({})", number(readability.and_then(|r| r.score))),
            readability.map_or("", |r| text(&r.suggestions)),
            readability.map_or("", |r| text(&r.suggestions_zh)),
        );
        sink.blank();
    }
}

fn write_structured_data(sink: &mut RowSink, data: &StructuredData) {
    sink.heading("=== 結構化資料 (Schema.org) ===");
    sink.blank();

    let org = data.organization.as_ref();
    let contact = org.and_then(|o| o.contact_point.as_ref());
    let label = "組織資訊";
    sink.heading("組織資訊 (Organization)");
    sink.plain(label, "A", "類型", org.map_or("", |o| text(&o.kind)));
    sink.plain(label, "B", "名稱", org.map_or("", |o| text(&o.name)));
    sink.plain(label, "C", "描述", org.map_or("", |o| text(&o.description)));
    sink.plain(label, "D", "網址", org.map_or("", |o| text(&o.url)));
    sink.plain(label, "E", "聯絡電話", contact.map_or("", |c| text(&c.telephone)));
    sink.plain(label, "F", "聯絡類型", contact.map_or("", |c| text(&c.contact_type)));
    sink.blank();

    let site = data.website.as_ref();
    let label = "網站資訊";
    sink.heading("網站資訊 (WebSite)");
    sink.plain(label, "A", "類型", site.map_or("", |s| text(&s.kind)));
    sink.plain(label, "B", "網址", site.map_or("", |s| text(&s.url)));
    sink.plain(label, "C", "名稱", site.map_or("", |s| text(&s.name)));
    sink.plain(label, "D", "描述", site.map_or("", |s| text(&s.description)));
    sink.blank();

    if !data.products.is_empty() {
        sink.heading("產品結構化資料");
        for (i, product) in data.products.iter().enumerate() {
            let label = product_schema_label(i);
            sink.plain(&label, "A", "類型", text(&product.kind));
            sink.plain(&label, "B", "名稱", text(&product.name));
            sink.plain(&label, "C", "描述", text(&product.description));
            sink.plain(&label, "D", "品牌", text(&product.brand));
            sink.plain(&label, "E", "類別", text(&product.category));
            sink.blank();
        }
    }
}
