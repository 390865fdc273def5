use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CopyError, CopyResult};
use crate::lenient;

//==============================================================================
// Content Tree
//==============================================================================

/// Nested representation of all generated copy and SEO artifacts for one
/// request. Every branch is optional; array sections are empty rather than
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTree {
    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub hero: Option<HeroSection>,
    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub about: Option<AboutSection>,
    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub solutions: Vec<SolutionBlock>,
    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<ProductBlock>,
    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactSection>,
    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub seo: Option<SeoAnalysis>,
    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub structured_data: Option<StructuredData>,
}

impl ContentTree {
    /// Convert a recovered JSON value into a typed tree.
    ///
    /// Leaves are read fail-soft; only a non-object top level is rejected.
    pub fn from_value(value: Value) -> CopyResult<Self> {
        if !value.is_object() {
            return Err(CopyError::MalformedModelOutput(format!(
                "expected a JSON object at the top level, found {}",
                json_kind(&value)
            )));
        }
        serde_json::from_value(value).map_err(|e| CopyError::MalformedModelOutput(e.to_string()))
    }

    /// True when no top-level section carries anything.
    pub fn is_empty(&self) -> bool {
        self.hero.is_none()
            && self.about.is_none()
            && self.solutions.is_empty()
            && self.products.is_empty()
            && self.contact.is_none()
            && self.seo.is_none()
            && self.structured_data.is_none()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

//==============================================================================
// Copy blocks (sections addressed by item code)
//==============================================================================

/// A scalar copy field that a section row can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Description,
    CtaButtonText,
    CtaButtonLink,
    Badge,
    Image,
    ShortDescription,
    CompleteDescription,
}

impl Field {
    /// Links and image references have no translation counterpart.
    pub fn translatable(self) -> bool {
        !matches!(self, Field::CtaButtonLink | Field::Image)
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

/// Field-level access shared by every section type, so the reader and both
/// writers can route through the same item-code tables.
pub trait CopyBlock {
    /// Primary (target-language) value, if the block has this field.
    fn get(&self, field: Field) -> Option<&str>;

    /// Translation counterpart (`*_zh`), if the block has one for this field.
    fn translation(&self, field: Field) -> Option<&str>;

    /// Store a primary value. Fields the block does not carry are ignored.
    fn set(&mut self, field: Field, value: String);

    /// True when no field holds a value.
    fn is_empty(&self) -> bool;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSection {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub cta_button_text: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub cta_button_link: Option<String>,
    #[serde(rename = "title_zh", default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub title_zh: Option<String>,
    #[serde(rename = "description_zh", default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub description_zh: Option<String>,
    #[serde(rename = "ctaButtonText_zh", default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub cta_button_text_zh: Option<String>,
}

impl CopyBlock for HeroSection {
    fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Title => self.title.as_deref(),
            Field::Description => self.description.as_deref(),
            Field::CtaButtonText => self.cta_button_text.as_deref(),
            Field::CtaButtonLink => self.cta_button_link.as_deref(),
            _ => None,
        }
    }

    fn translation(&self, field: Field) -> Option<&str> {
        match field {
            Field::Title => self.title_zh.as_deref(),
            Field::Description => self.description_zh.as_deref(),
            Field::CtaButtonText => self.cta_button_text_zh.as_deref(),
            _ => None,
        }
    }

    fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Title => self.title = Some(value),
            Field::Description => self.description = Some(value),
            Field::CtaButtonText => self.cta_button_text = Some(value),
            Field::CtaButtonLink => self.cta_button_link = Some(value),
            _ => {}
        }
    }

    fn is_empty(&self) -> bool {
        [
            &self.title,
            &self.description,
            &self.cta_button_text,
            &self.cta_button_link,
            &self.title_zh,
            &self.description_zh,
            &self.cta_button_text_zh,
        ]
        .into_iter()
        .all(is_blank)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutSection {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "badge_zh", default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub badge_zh: Option<String>,
    #[serde(rename = "title_zh", default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub title_zh: Option<String>,
    #[serde(rename = "description_zh", default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub description_zh: Option<String>,
}

impl CopyBlock for AboutSection {
    fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Badge => self.badge.as_deref(),
            Field::Title => self.title.as_deref(),
            Field::Description => self.description.as_deref(),
            Field::Image => self.image.as_deref(),
            _ => None,
        }
    }

    fn translation(&self, field: Field) -> Option<&str> {
        match field {
            Field::Badge => self.badge_zh.as_deref(),
            Field::Title => self.title_zh.as_deref(),
            Field::Description => self.description_zh.as_deref(),
            _ => None,
        }
    }

    fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Badge => self.badge = Some(value),
            Field::Title => self.title = Some(value),
            Field::Description => self.description = Some(value),
            Field::Image => self.image = Some(value),
            _ => {}
        }
    }

    fn is_empty(&self) -> bool {
        [
            &self.badge,
            &self.title,
            &self.description,
            &self.image,
            &self.badge_zh,
            &self.title_zh,
            &self.description_zh,
        ]
        .into_iter()
        .all(is_blank)
    }
}

/// Badge/title/description block. Used by both `solutions[]` and `contact`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeBlock {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "badge_zh", default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub badge_zh: Option<String>,
    #[serde(rename = "title_zh", default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub title_zh: Option<String>,
    #[serde(rename = "description_zh", default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub description_zh: Option<String>,
}

pub type SolutionBlock = BadgeBlock;
pub type ContactSection = BadgeBlock;

impl CopyBlock for BadgeBlock {
    fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Badge => self.badge.as_deref(),
            Field::Title => self.title.as_deref(),
            Field::Description => self.description.as_deref(),
            _ => None,
        }
    }

    fn translation(&self, field: Field) -> Option<&str> {
        match field {
            Field::Badge => self.badge_zh.as_deref(),
            Field::Title => self.title_zh.as_deref(),
            Field::Description => self.description_zh.as_deref(),
            _ => None,
        }
    }

    fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Badge => self.badge = Some(value),
            Field::Title => self.title = Some(value),
            Field::Description => self.description = Some(value),
            _ => {}
        }
    }

    fn is_empty(&self) -> bool {
        [
            &self.badge,
            &self.title,
            &self.description,
            &self.badge_zh,
            &self.title_zh,
            &self.description_zh,
        ]
        .into_iter()
        .all(is_blank)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductBlock {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub complete_description: Option<String>,
    #[serde(rename = "title_zh", default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub title_zh: Option<String>,
    #[serde(rename = "shortDescription_zh", default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub short_description_zh: Option<String>,
    #[serde(rename = "completeDescription_zh", default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub complete_description_zh: Option<String>,
}

impl CopyBlock for ProductBlock {
    fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Title => self.title.as_deref(),
            Field::ShortDescription => self.short_description.as_deref(),
            Field::CompleteDescription => self.complete_description.as_deref(),
            _ => None,
        }
    }

    fn translation(&self, field: Field) -> Option<&str> {
        match field {
            Field::Title => self.title_zh.as_deref(),
            Field::ShortDescription => self.short_description_zh.as_deref(),
            Field::CompleteDescription => self.complete_description_zh.as_deref(),
            _ => None,
        }
    }

    fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Title => self.title = Some(value),
            Field::ShortDescription => self.short_description = Some(value),
            Field::CompleteDescription => self.complete_description = Some(value),
            _ => {}
        }
    }

    fn is_empty(&self) -> bool {
        [
            &self.title,
            &self.short_description,
            &self.complete_description,
            &self.title_zh,
            &self.short_description_zh,
            &self.complete_description_zh,
        ]
        .into_iter()
        .all(is_blank)
    }
}

//==============================================================================
// SEO analysis
//==============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoAnalysis {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(rename = "metaDescription_zh", default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub meta_description_zh: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub meta_keywords: Option<String>,
    #[serde(rename = "metaKeywords_zh", default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub meta_keywords_zh: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub og_title: Option<String>,
    #[serde(rename = "ogTitle_zh", default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub og_title_zh: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub og_description: Option<String>,
    #[serde(rename = "ogDescription_zh", default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub og_description_zh: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub og_type: Option<String>,

    #[serde(default, deserialize_with = "lenient::text_list", skip_serializing_if = "Vec::is_empty")]
    pub h2_suggestions: Vec<String>,
    #[serde(rename = "h2Suggestions_zh", default, deserialize_with = "lenient::text_list", skip_serializing_if = "Vec::is_empty")]
    pub h2_suggestions_zh: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text_list", skip_serializing_if = "Vec::is_empty")]
    pub h3_suggestions: Vec<String>,
    #[serde(rename = "h3Suggestions_zh", default, deserialize_with = "lenient::text_list", skip_serializing_if = "Vec::is_empty")]
    pub h3_suggestions_zh: Vec<String>,

    #[serde(default, deserialize_with = "lenient::text_list", skip_serializing_if = "Vec::is_empty")]
    pub primary_keywords: Vec<String>,
    #[serde(rename = "primaryKeywords_zh", default, deserialize_with = "lenient::text_list", skip_serializing_if = "Vec::is_empty")]
    pub primary_keywords_zh: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text_list", skip_serializing_if = "Vec::is_empty")]
    pub long_tail_keywords: Vec<String>,
    #[serde(rename = "longTailKeywords_zh", default, deserialize_with = "lenient::text_list", skip_serializing_if = "Vec::is_empty")]
    pub long_tail_keywords_zh: Vec<String>,
    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub keyword_density: Vec<KeywordDensity>,

    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub competitor_analysis: Option<CompetitorAnalysis>,
    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub usp_analysis: Option<UspAnalysis>,
    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub content_optimization: Option<ContentOptimization>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordDensity {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorAnalysis {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(rename = "industry_zh", default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub industry_zh: Option<String>,
    #[serde(default, deserialize_with = "lenient::text_list", skip_serializing_if = "Vec::is_empty")]
    pub competitor_keywords: Vec<String>,
    #[serde(rename = "competitorKeywords_zh", default, deserialize_with = "lenient::text_list", skip_serializing_if = "Vec::is_empty")]
    pub competitor_keywords_zh: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub gap_analysis: Option<String>,
    #[serde(rename = "gapAnalysis_zh", default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub gap_analysis_zh: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<String>,
    #[serde(rename = "recommendations_zh", default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub recommendations_zh: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UspAnalysis {
    #[serde(default, deserialize_with = "lenient::text_list", skip_serializing_if = "Vec::is_empty")]
    pub unique_selling_points: Vec<String>,
    #[serde(rename = "uniqueSellingPoints_zh", default, deserialize_with = "lenient::text_list", skip_serializing_if = "Vec::is_empty")]
    pub unique_selling_points_zh: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub differentiation_strategy: Option<String>,
    #[serde(rename = "differentiationStrategy_zh", default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub differentiation_strategy_zh: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub positioning_statement: Option<String>,
    #[serde(rename = "positioningStatement_zh", default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub positioning_statement_zh: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentOptimization {
    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub title_length: Option<LengthAssessment>,
    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub description_length: Option<LengthAssessment>,
    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub readability_score: Option<ReadabilityScore>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LengthAssessment {
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub current: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub recommended: Option<String>,
    #[serde(rename = "recommendation_zh", default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub recommendation_zh: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadabilityScore {
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<String>,
    #[serde(rename = "suggestions_zh", default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub suggestions_zh: Option<String>,
}

//==============================================================================
// Structured data (Schema.org descriptors)
//==============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredData {
    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<ProductSchema>,
    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub website: Option<WebsiteSchema>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[serde(rename = "type", default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub contact_point: Option<ContactPoint>,
    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub address: Option<PostalAddress>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPoint {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub contact_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub address_locality: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub address_region: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub address_country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductSchema {
    #[serde(rename = "type", default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub offers: Option<Offer>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub price_currency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteSchema {
    #[serde(rename = "type", default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub potential_action: Option<SearchAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchAction {
    #[serde(rename = "type", default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

//==============================================================================
// Target language
//==============================================================================

/// Languages offered by the generator, with the display names used in
/// export headers.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("zh-TW", "繁體中文 (台灣)"),
    ("zh-CN", "简体中文 (中國)"),
    ("en-US", "English (美國)"),
    ("en", "English (通用)"),
    ("ja", "日本語 (日本)"),
    ("ko", "한국어 (韓國)"),
    ("de", "Deutsch (德國)"),
    ("fr", "Français (法國)"),
    ("it", "Italiano (義大利)"),
    ("th", "ภาษาไทย (泰國)"),
    ("vi", "Tiếng Việt (越南)"),
];

/// Target language of a generation, identified by its code (e.g. `zh-TW`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Language {
    code: String,
}

impl Language {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into().trim().to_string(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Display name from the language table; unknown codes display as-is.
    pub fn display_name(&self) -> &str {
        LANGUAGES
            .iter()
            .find(|(code, _)| *code == self.code)
            .map(|(_, name)| *name)
            .unwrap_or(&self.code)
    }

    /// Chinese targets get no translation column.
    pub fn is_chinese(&self) -> bool {
        self.code == "zh-TW" || self.code == "zh-CN"
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::new("zh-TW")
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.code)
    }
}
