//! JSON recovery tests on realistic model replies.

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use sitecopy::error::CopyError;
use sitecopy::recover::{recover_json, recover_tree};

const MODEL_RESPONSE: &str = include_str!("fixtures/model_response.txt");

// ═══════════════════════════════════════════════════════════════════════════
// REPAIR PASSES
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_prose_prefix_and_trailing_comma() {
    let value = recover_json("Here you go:\n{\"hero\":{\"title\":\"X\",}}").unwrap();
    assert_eq!(value, json!({"hero": {"title": "X"}}));
}

#[test]
fn test_fenced_reply_with_prose_and_trailing_commas() {
    let tree = recover_tree(MODEL_RESPONSE).unwrap();

    let hero = tree.hero.as_ref().unwrap();
    assert_eq!(hero.title.as_deref(), Some("Misty Peak Tea"));
    assert_eq!(hero.cta_button_text_zh.as_deref(), Some("立即選購"));
    assert_eq!(tree.products.len(), 2);
    assert_eq!(tree.solutions.len(), 1);

    let seo = tree.seo.as_ref().unwrap();
    assert_eq!(seo.keyword_density.len(), 2);
    assert_eq!(seo.keyword_density[0].density, Some(3.2));
    assert_eq!(seo.keyword_density[1].density, Some(1.5));
    assert_eq!(seo.primary_keywords_zh, vec!["烏龍茶", "台灣茶"]);

    let data = tree.structured_data.as_ref().unwrap();
    assert_eq!(data.products.len(), 1);
    assert_eq!(
        data.organization
            .as_ref()
            .and_then(|o| o.contact_point.as_ref())
            .and_then(|c| c.telephone.as_deref()),
        Some("+886-2-1234-5678")
    );
}

#[test]
fn test_fence_without_language_tag() {
    let value = recover_json("```\n{\"about\": {\"title\": \"Story\"}}\n```").unwrap();
    assert_eq!(value, json!({"about": {"title": "Story"}}));
}

#[test]
fn test_bare_keys_are_quoted() {
    let value = recover_json("{contact: {badge: \"Hi\", title: \"Talk\",},}").unwrap();
    assert_eq!(value, json!({"contact": {"badge": "Hi", "title": "Talk"}}));
}

// ═══════════════════════════════════════════════════════════════════════════
// PROPERTIES
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_recovery_is_identity_on_strict_json() {
    let samples = [
        json!({"hero": {"title": "A, B }", "description": "x: y"}}),
        json!({"products": [{"title": "p"}], "seo": {"keywordDensity": []}}),
        json!({}),
    ];

    for sample in samples {
        let text = serde_json::to_string(&sample).unwrap();
        assert_eq!(recover_json(&text).unwrap(), sample);
    }
}

#[test]
fn test_recovered_value_reserializes_identically() {
    let first = recover_json(MODEL_RESPONSE).unwrap();
    let again: Value = recover_json(&serde_json::to_string(&first).unwrap()).unwrap();
    assert_eq!(first, again);
}

// ═══════════════════════════════════════════════════════════════════════════
// FAILURES
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_text_without_json_fails() {
    let err = recover_json("I'm sorry, I cannot help with that.").unwrap_err();
    assert!(matches!(err, CopyError::MalformedModelOutput(_)));
}

#[test]
fn test_truncated_json_fails() {
    let err = recover_json("{\"hero\": {\"title\": \"cut off").unwrap_err();
    assert!(matches!(err, CopyError::MalformedModelOutput(_)));
}

#[test]
fn test_top_level_array_is_not_a_tree() {
    assert!(recover_json("[1, 2]").is_ok());
    let err = recover_tree("[1, 2]").unwrap_err();
    assert!(matches!(err, CopyError::MalformedModelOutput(_)));
}

#[test]
fn test_wrong_leaf_types_degrade_to_absent() {
    let tree = recover_tree(
        r#"{"hero": {"title": 42, "description": null},
            "about": "not an object",
            "products": [{"title": "ok"}, "junk"],
            "seo": {"keywordDensity": [{"keyword": "tea", "density": "n/a"}]}}"#,
    )
    .unwrap();

    let hero = tree.hero.unwrap();
    assert_eq!(hero.title.as_deref(), Some("42"));
    assert!(hero.description.is_none());
    assert!(tree.about.is_none());
    assert_eq!(tree.products.len(), 1);
    assert_eq!(tree.seo.unwrap().keyword_density[0].density, None);
}
