//! Best-effort recovery of a JSON object from free-form model output.
//!
//! The model is told to answer with bare JSON, but answers arrive wrapped in
//! code fences, prefixed with prose, or with small syntax slips. Recovery runs
//! a fixed sequence of text passes, from the most benign (unwrapping) to the
//! most aggressive (quoting bare keys), and returns the first strict parse
//! that succeeds. Each pass is a pure `&str -> String` function.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{CopyError, CopyResult};
use crate::types::ContentTree;

const FENCE: &str = "```";

fn fence_open() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^```[A-Za-z]*\n?").expect("valid fence pattern"))
}

fn fence_close() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n?```$").expect("valid fence pattern"))
}

fn trailing_comma() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r",\s*([}\]])").expect("valid trailing comma pattern"))
}

fn bare_key() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"([,{\s])([A-Za-z_][A-Za-z0-9_\-]*)\s*:").expect("valid bare key pattern")
    })
}

/// Remove a surrounding code fence (with optional language tag).
pub fn strip_code_fence(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.starts_with(FENCE) && trimmed.ends_with(FENCE) {
        let opened = fence_open().replace(trimmed, "");
        fence_close().replace(&opened, "").into_owned()
    } else {
        trimmed.to_string()
    }
}

/// Keep the span from the first `{` to the last `}` inclusive.
pub fn slice_to_braces(text: &str) -> String {
    match (text.find('{'), text.rfind('}')) {
        (Some(first), Some(last)) if last > first => text[first..=last].to_string(),
        _ => text.to_string(),
    }
}

/// Drop commas that directly precede a closing `}` or `]`.
pub fn strip_trailing_commas(text: &str) -> String {
    trailing_comma().replace_all(text, "$1").into_owned()
}

/// Quote object keys written without quotes.
///
/// Heuristic: can misfire on string values that contain `word:` sequences,
/// which is why it runs last.
pub fn quote_bare_keys(text: &str) -> String {
    bare_key().replace_all(text, "${1}\"${2}\":").into_owned()
}

/// Recover a JSON value from model output.
///
/// # Errors
/// [`CopyError::MalformedModelOutput`] when no pass yields valid JSON.
pub fn recover_json(text: &str) -> CopyResult<Value> {
    let unfenced = strip_code_fence(text);

    // Strict JSON passes through untouched, whatever its top-level shape.
    if let Ok(value) = serde_json::from_str(&unfenced) {
        return Ok(value);
    }

    let cleaned = slice_to_braces(&unfenced);
    if let Ok(value) = serde_json::from_str(&cleaned) {
        debug!("model output recovered after unwrapping");
        return Ok(value);
    }

    if let Ok(value) = serde_json::from_str(&strip_trailing_commas(&cleaned)) {
        warn!("model output recovered after removing trailing commas");
        return Ok(value);
    }

    let repaired = strip_trailing_commas(&quote_bare_keys(&cleaned));
    match serde_json::from_str(&repaired) {
        Ok(value) => {
            warn!("model output recovered after quoting bare keys");
            Ok(value)
        }
        Err(e) => Err(CopyError::MalformedModelOutput(format!(
            "model output is not valid JSON and automatic repair failed ({})",
            e
        ))),
    }
}

/// Recover model output straight into a typed [`ContentTree`].
pub fn recover_tree(text: &str) -> CopyResult<ContentTree> {
    ContentTree::from_value(recover_json(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_code_fence_with_language_tag() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  ```\n{}\n```  "), "{}");
        assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn test_fence_only_on_one_side_is_kept() {
        assert_eq!(strip_code_fence("```json\n{}"), "```json\n{}");
    }

    #[test]
    fn test_slice_to_braces() {
        assert_eq!(slice_to_braces("Sure! {\"a\":1} Hope it helps"), "{\"a\":1}");
        assert_eq!(slice_to_braces("no braces"), "no braces");
        assert_eq!(slice_to_braces("} backwards {"), "} backwards {");
    }

    #[test]
    fn test_strip_trailing_commas() {
        assert_eq!(strip_trailing_commas("{\"a\":[1,2,],}"), "{\"a\":[1,2]}");
        assert_eq!(strip_trailing_commas("{\"a\":1 ,\n }"), "{\"a\":1 }");
    }

    #[test]
    fn test_quote_bare_keys() {
        assert_eq!(
            quote_bare_keys("{title: \"x\", meta_1 : 2}"),
            "{\"title\": \"x\", \"meta_1\": 2}"
        );
    }

    #[test]
    fn test_recover_needs_slicing_and_comma_removal() {
        let value = recover_json("prefix {\"a\":1,} suffix").unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn test_recover_bare_keys() {
        let value = recover_json("{hero: {title: \"Hi\",},}").unwrap();
        assert_eq!(value, json!({"hero": {"title": "Hi"}}));
    }

    #[test]
    fn test_recover_strict_json_is_unchanged() {
        let text = "[{\"a\":1},{\"b\":2}]";
        let direct: Value = serde_json::from_str(text).unwrap();
        assert_eq!(recover_json(text).unwrap(), direct);
    }

    #[test]
    fn test_recover_failure() {
        let err = recover_json("not json at all").unwrap_err();
        assert!(matches!(err, CopyError::MalformedModelOutput(_)));
    }
}
