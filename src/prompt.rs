//! Prompt Composer: instruction text for the model.
//!
//! Two modes share one system prompt body. Sheet mode embeds the tree the
//! reader produced; text mode embeds the customer's free-form description.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{CopyError, CopyResult};
use crate::types::{ContentTree, Language};

//==============================================================================
// Generation parameters
//==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum Audience {
    #[serde(rename = "B2B", alias = "b2b")]
    #[value(name = "B2B", alias = "b2b")]
    B2b,
    #[default]
    #[serde(rename = "B2C", alias = "b2c")]
    #[value(name = "B2C", alias = "b2c")]
    B2c,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Focus {
    #[default]
    Brand,
    Product,
    Usp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SeoMode {
    #[default]
    Basic,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ContentLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Audience::B2b => "B2B",
            Audience::B2c => "B2C",
        })
    }
}

impl fmt::Display for Focus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Focus::Brand => "brand",
            Focus::Product => "product",
            Focus::Usp => "usp",
        })
    }
}

impl fmt::Display for SeoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SeoMode::Basic => "basic",
            SeoMode::Advanced => "advanced",
        })
    }
}

impl fmt::Display for ContentLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContentLength::Short => "short",
            ContentLength::Medium => "medium",
            ContentLength::Long => "long",
        })
    }
}

/// Marketing and SEO options for one generation.
///
/// Free-text options left blank fall back to neutral wording when rendered
/// (see [`GenerationParams::keywords_or_default`] and friends).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct GenerationParams {
    pub audience: Audience,
    pub language: Language,
    pub focus: Focus,
    /// Slogans or phrases that must appear in the copy.
    pub keywords: String,
    pub industry_category: String,
    pub target_location: String,
    pub business_type: String,
    pub competitor_urls: Vec<String>,
    pub seo_mode: SeoMode,
    pub content_length: ContentLength,
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback
    } else {
        trimmed
    }
}

impl GenerationParams {
    pub fn keywords_or_default(&self) -> &str {
        or_default(&self.keywords, "無")
    }

    pub fn industry_or_default(&self) -> &str {
        or_default(&self.industry_category, "未指定")
    }

    pub fn location_or_default(&self) -> &str {
        or_default(&self.target_location, "全球")
    }

    pub fn business_type_or_default(&self) -> &str {
        or_default(&self.business_type, "一般企業")
    }

    /// Bullet list appended to every user prompt.
    fn render(&self) -> String {
        let mut lines = vec![
            format!("* 目標人群 (Audience): {}", self.audience),
            format!("* 目標市場 (Language): {}", self.language),
            format!("* 行銷重點 (Focus): {}", self.focus),
            format!("* 必提內容 (Keywords): {}", self.keywords_or_default()),
            format!("* 行業分類 (Industry): {}", self.industry_or_default()),
            format!("* 目標地區 (Location): {}", self.location_or_default()),
            format!("* 企業類型 (Business Type): {}", self.business_type_or_default()),
        ];

        let competitors: Vec<&str> = self
            .competitor_urls
            .iter()
            .map(|url| url.trim())
            .filter(|url| !url.is_empty())
            .collect();
        if !competitors.is_empty() {
            lines.push(format!("* 競爭對手網站 (Competitors): {}", competitors.join(", ")));
        }

        lines.push(format!("* SEO 強度 (SEO Mode): {}", self.seo_mode));
        lines.push(format!("* 內容長度 (Content Length): {}", self.content_length));

        let bilingual = if self.language.is_chinese() {
            "* 輸出語言：僅輸出中文內容，不需要 _zh 欄位".to_string()
        } else {
            format!(
                "* 輸出語言：以 {} 撰寫，並在每個 _zh 欄位提供繁體中文翻譯",
                self.language.display_name()
            )
        };
        lines.push(bilingual);

        lines.join("\n")
    }
}

//==============================================================================
// Prompt
//==============================================================================

/// A system/user prompt pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

const SHEET_INTRO: &str = "\
您是一位資深的國際 SEO 專家與數位行銷顧問。
客戶提供了從網站文案範本讀出的原始內容（JSON）與一組行銷參數。
請在保留品牌核心價值的前提下優化每一段文案，並產出完整的 SEO 分析與結構化資料。";

const TEXT_INTRO: &str = "\
您是一位資深的國際 SEO 專家與數位行銷顧問。
客戶以自由文字描述了公司、產品或服務，並提供了一組行銷參數。
請從描述中擷取公司名稱、產品、服務類別與地區等關鍵資訊，撰寫完整的網站文案，並產出 SEO 分析與結構化資料。";

const RULES: &str = "\
規則：
1. 受眾導向：B2B 著重專業術語、投資報酬與解決方案；B2C 著重情感連結、生活情境與價值感。
2. 在地化：文案與關鍵字須符合目標市場的搜尋習慣。非中文市場需同時提供 _zh 中文翻譯欄位；中文市場不需要 _zh 欄位。
3. SEO：Meta Description 120-160 字元；Meta Keywords 5-10 個；主要關鍵字 3-5 個；長尾關鍵字 10-15 個；關鍵字密度建議 2-4%；提供 H2/H3 標題建議與可讀性評分。
4. 競爭分析：判斷行業分類、找出市場缺口並提出差異化與 USP 策略。
5. 結構化資料：依 Schema.org 產出 Organization、Product 與 WebSite。
6. 只回傳一個 JSON 物件，不要加上任何說明文字。";

const OUTPUT_SHAPE: &str = r#"輸出格式：
{
  "hero": { "title": "", "description": "", "ctaButtonText": "", "ctaButtonLink": "", "title_zh": "", "description_zh": "", "ctaButtonText_zh": "" },
  "about": { "badge": "", "title": "", "description": "", "image": "", "badge_zh": "", "title_zh": "", "description_zh": "" },
  "solutions": [ { "badge": "", "title": "", "description": "", "badge_zh": "", "title_zh": "", "description_zh": "" } ],
  "products": [ { "title": "", "shortDescription": "", "completeDescription": "", "title_zh": "", "shortDescription_zh": "", "completeDescription_zh": "" } ],
  "contact": { "badge": "", "title": "", "description": "", "badge_zh": "", "title_zh": "", "description_zh": "" },
  "seo": {
    "metaDescription": "", "metaKeywords": "", "ogTitle": "", "ogDescription": "", "ogType": "website",
    "h2Suggestions": [], "h3Suggestions": [],
    "primaryKeywords": [], "longTailKeywords": [],
    "keywordDensity": [ { "keyword": "", "density": 3.2, "recommendation": "" } ],
    "competitorAnalysis": { "industry": "", "competitorKeywords": [], "gapAnalysis": "", "recommendations": "" },
    "uspAnalysis": { "uniqueSellingPoints": [], "differentiationStrategy": "", "positioningStatement": "" },
    "contentOptimization": {
      "titleLength": { "current": 45, "recommended": "" },
      "descriptionLength": { "current": 120, "recommended": "" },
      "readabilityScore": { "score": 85, "suggestions": "" }
    }
  },
  "structuredData": {
    "organization": { "type": "Organization", "name": "", "description": "", "url": "", "contactPoint": { "telephone": "", "contactType": "customer service" } },
    "products": [ { "type": "Product", "name": "", "description": "", "brand": "", "category": "" } ],
    "website": { "type": "WebSite", "url": "", "name": "", "description": "" }
  }
}
每個 _zh 欄位（包含 seo 內的 metaDescription_zh、primaryKeywords_zh 等）只在非中文市場輸出。"#;

fn system_prompt(intro: &str) -> String {
    format!("{}\n\n{}\n\n{}", intro, RULES, OUTPUT_SHAPE)
}

/// Prompt for a parsed template: the tree travels as pretty JSON.
pub fn compose_for_sheet(tree: &ContentTree, params: &GenerationParams) -> CopyResult<Prompt> {
    let raw = serde_json::to_string_pretty(tree)?;
    let user = format!(
        "請根據以下資料和參數生成文案。\n\n\
         **原始資料 (JSON):**\n```json\n{}\n```\n\n\
         **參數設定:**\n{}\n\n\
         請嚴格依照系統指令中的輸出格式，只回傳 JSON 物件。",
        raw,
        params.render()
    );

    Ok(Prompt {
        system: system_prompt(SHEET_INTRO),
        user,
    })
}

/// Prompt for free-form input, optionally tagged with the site's URL.
///
/// # Errors
/// [`CopyError::InvalidInput`] when both `body` and `website_url` are blank.
pub fn compose_for_text(
    body: &str,
    website_url: Option<&str>,
    params: &GenerationParams,
) -> CopyResult<Prompt> {
    let body = body.trim();
    let url = website_url.map(str::trim).filter(|u| !u.is_empty());

    if body.is_empty() && url.is_none() {
        return Err(CopyError::InvalidInput(
            "請輸入公司/產品描述或網站連結".to_string(),
        ));
    }

    let content = match url {
        Some(url) => format!("網站連結：{}\n\n{}", url, body),
        None => body.to_string(),
    };

    let user = format!(
        "請根據以下客戶提供的資訊，建立完整的專業網站文案。\n\n\
         **客戶提供的資訊:**\n{}\n\n\
         **行銷參數:**\n{}\n\n\
         請擷取關鍵內容，產出符合目標市場與受眾、具吸引力且符合 SEO 最佳實踐的文案。",
        content,
        params.render()
    );

    Ok(Prompt {
        system: system_prompt(TEXT_INTRO),
        user,
    })
}
