use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Raised when no valid JSON array can be obtained from a model payload
///
/// Every variant means the same thing to callers: the generation could not be
/// used and should be retried. The variants only exist for logging.
#[derive(Debug, Error, PartialEq)]
pub enum UnrecoverableParseError {
    #[error("payload is empty")]
    EmptyInput,

    #[error("payload contains no JSON array")]
    NoArray,

    #[error("payload is valid JSON but a {found}, not an array")]
    NotAnArray { found: &'static str },

    #[error("truncated array has no complete element to recover")]
    NoCompleteElement,

    #[error("repaired array still failed to parse: {0}")]
    RepairFailed(String),

    #[error("element {index} has an unexpected shape: {message}")]
    InvalidElement { index: usize, message: String },
}

/// Array obtained from a payload, with how it was obtained
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedArray {
    pub items: Vec<Value>,
    /// True when trailing content had to be cut off
    pub recovered: bool,
    /// Bytes of the array body dropped during recovery
    pub discarded_bytes: usize,
}

impl ExtractedArray {
    fn complete(items: Vec<Value>) -> Self {
        Self { items, recovered: false, discarded_bytes: 0 }
    }
}

/// Scanner state for the truncation search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    InString,
    Escaped,
}

/// Remove a Markdown code fence (with optional language tag) around the payload
///
/// Returns the input unchanged when there is no fence, when the first fence
/// sits after the first `[` (i.e. inside the JSON itself), or when the fenced
/// block holds no array but the text outside it does.
pub fn strip_code_fences(raw: &str) -> &str {
    let Some(open) = raw.find("```") else {
        return raw;
    };
    if raw.find('[').is_some_and(|bracket| bracket < open) {
        return raw;
    }

    let after_open = &raw[open + 3..];
    let tag_len = after_open
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'-' || *b == b'_')
        .count();
    let body = &after_open[tag_len..];

    let fenced = match body.find("```") {
        Some(close) => &body[..close],
        // Truncated before the closing fence
        None => body,
    };

    if fenced.contains('[') || !raw.contains('[') {
        fenced
    } else {
        raw
    }
}

/// Byte index of the last `}` or `]` that closes a top-level array element
///
/// `body` must start at the array's opening `[`. Braces inside string literals,
/// including after escaped quotes, are ignored.
///
/// Only object and array elements produce safe points: a truncated array of
/// scalars such as `[1,2,3` has none and is reported as unrecoverable.
pub fn last_safe_truncation_point(body: &str) -> Option<usize> {
    let mut state = ScanState::Normal;
    let mut depth: usize = 0;
    let mut last_safe = None;

    for (index, byte) in body.bytes().enumerate() {
        match state {
            ScanState::Escaped => state = ScanState::InString,
            ScanState::InString => match byte {
                b'\\' => state = ScanState::Escaped,
                b'"' => state = ScanState::Normal,
                _ => {}
            },
            ScanState::Normal => match byte {
                b'"' => state = ScanState::InString,
                b'{' | b'[' => depth += 1,
                b'}' | b']' => {
                    depth = depth.saturating_sub(1);
                    if depth == 1 {
                        last_safe = Some(index);
                    } else if depth == 0 {
                        // The top-level array closed; anything after it is not ours
                        break;
                    }
                }
                _ => {}
            },
        }
    }

    last_safe
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Extract the largest valid JSON array from a model payload, reporting whether
/// it had to be repaired
///
/// # Stages
/// 1. Strip code fences and parse the whole payload
/// 2. Parse from the first `[` to the last `]` (array wrapped in prose)
/// 3. Cut back to the last complete top-level element and close the array
pub fn extract_array_with_report(raw: &str) -> Result<ExtractedArray, UnrecoverableParseError> {
    let text = strip_code_fences(raw).trim();
    if text.is_empty() {
        return Err(UnrecoverableParseError::EmptyInput);
    }

    // Stage 1: the payload is exactly one JSON value
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return match value {
            Value::Array(items) => Ok(ExtractedArray::complete(items)),
            other => Err(UnrecoverableParseError::NotAnArray { found: json_kind(&other) }),
        };
    }

    let start = text.find('[').ok_or(UnrecoverableParseError::NoArray)?;

    // Stage 2: an intact array surrounded by prose
    if let Some(end) = text.rfind(']').filter(|end| *end > start) {
        if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(&text[start..=end]) {
            return Ok(ExtractedArray::complete(items));
        }
    }

    // Stage 3: truncated mid-element
    let body = &text[start..];
    let safe = last_safe_truncation_point(body).ok_or_else(|| {
        tracing::warn!("No complete element in truncated payload ({} bytes)", body.len());
        UnrecoverableParseError::NoCompleteElement
    })?;

    let repaired = format!("{}]", &body[..=safe]);
    match serde_json::from_str::<Value>(&repaired) {
        Ok(Value::Array(items)) => {
            let discarded_bytes = body.len() - (safe + 1);
            tracing::info!(
                "Recovered {} elements from truncated array ({} bytes discarded)",
                items.len(),
                discarded_bytes
            );
            Ok(ExtractedArray { items, recovered: true, discarded_bytes })
        }
        Ok(other) => Err(UnrecoverableParseError::NotAnArray { found: json_kind(&other) }),
        Err(e) => {
            tracing::warn!("Repaired array failed to parse: {}", e);
            Err(UnrecoverableParseError::RepairFailed(e.to_string()))
        }
    }
}

/// Extract the largest valid JSON array from a model payload
pub fn extract_array(raw: &str) -> Result<Vec<Value>, UnrecoverableParseError> {
    extract_array_with_report(raw).map(|extracted| extracted.items)
}

/// Extract an array and deserialize every element into `T`
pub fn extract_items<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>, UnrecoverableParseError> {
    extract_array(raw)?
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value(value).map_err(|e| UnrecoverableParseError::InvalidElement {
                index,
                message: e.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn test_happy_path() {
        let items = extract_array(r#"[{"a":1},{"a":2}]"#).unwrap();
        assert_eq!(items, vec![json!({"a": 1}), json!({"a": 2})]);
    }

    #[test]
    fn test_fenced_input() {
        let items = extract_array("```json\n[{\"a\":1}]\n```").unwrap();
        assert_eq!(items, vec![json!({"a": 1})]);
    }

    #[test]
    fn test_fence_without_language_tag_and_prose() {
        let raw = "Here are your posts:\n```\n[{\"a\":1}]\n```\nEnjoy!";
        assert_eq!(extract_array(raw).unwrap(), vec![json!({"a": 1})]);
    }

    #[test]
    fn test_array_after_fenced_prose() {
        let raw = "```\nnote\n```\n[{\"a\":1}]";
        assert_eq!(extract_array(raw).unwrap(), vec![json!({"a": 1})]);
        assert_eq!(strip_code_fences("```\nnote\n```\n[1]"), "```\nnote\n```\n[1]");
        assert_eq!(strip_code_fences("```text\nno array here\n```"), "\nno array here\n");
    }

    #[test]
    fn test_truncated_scalar_array_has_no_safe_point() {
        assert_eq!(last_safe_truncation_point("[1,2,3"), None);
        assert_eq!(extract_array("[1,2,3"), Err(UnrecoverableParseError::NoCompleteElement));
    }

    #[test]
    fn test_truncation_recovery() {
        let report = extract_array_with_report(r#"[{"a":1},{"a":2},{"a":3""#).unwrap();
        assert_eq!(report.items, vec![json!({"a": 1}), json!({"a": 2})]);
        assert!(report.recovered);
        assert_eq!(report.discarded_bytes, r#",{"a":3""#.len());
    }

    #[test]
    fn test_string_embedded_braces() {
        let items = extract_array(r#"[{"text":"contains a } and a [ char"}]"#).unwrap();
        assert_eq!(items, vec![json!({"text": "contains a } and a [ char"})]);
    }

    #[test]
    fn test_truncated_with_braces_and_escaped_quotes_in_strings() {
        let raw = r#"[{"text":"say \"}\" twice"},{"text":"open { brace"},{"text":"cut"#;
        let items = extract_array(raw).unwrap();
        assert_eq!(
            items,
            vec![json!({"text": "say \"}\" twice"}), json!({"text": "open { brace"})]
        );
    }

    #[test]
    fn test_nested_structures_only_close_at_top_level() {
        let raw = r#"[{"tags":["a","b"],"meta":{"x":{"y":1}}},{"tags":["c"],"meta":{"x":"#;
        let items = extract_array(raw).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["meta"]["x"]["y"], json!(1));
    }

    #[test]
    fn test_unrecoverable_input() {
        assert_eq!(
            extract_array("<html>error</html>"),
            Err(UnrecoverableParseError::NoArray)
        );
        assert_eq!(extract_array("   "), Err(UnrecoverableParseError::EmptyInput));
        assert_eq!(
            extract_array(r#"[{"a":1"#),
            Err(UnrecoverableParseError::NoCompleteElement)
        );
    }

    #[test]
    fn test_non_array_json_fails_clearly() {
        assert_eq!(
            extract_array(r#"{"a":1}"#),
            Err(UnrecoverableParseError::NotAnArray { found: "object" })
        );
    }

    #[test]
    fn test_safe_point_scanner() {
        assert_eq!(last_safe_truncation_point(r#"[{"a":1},{"b""#), Some(7));
        assert_eq!(last_safe_truncation_point(r#"[{"a":"}"#), None);
        assert_eq!(last_safe_truncation_point("[[1,2],[3"), Some(5));
    }

    #[test]
    fn test_typed_extraction() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Post {
            caption: String,
        }

        let posts: Vec<Post> =
            extract_items(r#"[{"caption":"one"},{"caption":"two"},{"capt"#).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1].caption, "two");

        let err = extract_items::<Post>(r#"[{"caption":"one"},{"title":"x"}]"#).unwrap_err();
        assert!(matches!(err, UnrecoverableParseError::InvalidElement { index: 1, .. }));
    }
}
