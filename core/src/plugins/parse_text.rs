//! Inline JSON / YAML text detection and parsing.

use super::SourceError;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Whether `value` is inline JSON object or array text.
pub fn is_json_text(value: &str) -> bool {
    let trimmed = value.trim_start();
    if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
        return false;
    }
    matches!(
        serde_json::from_str::<Value>(value),
        Ok(Value::Object(_) | Value::Array(_))
    )
}

/// Whether `value` looks like inline YAML mapping text.
///
/// URLs and plain paths never qualify: a key must be followed by `:` and
/// whitespace or a line end.
pub fn is_yaml_text(value: &str) -> bool {
    static YAML_KEY_RE: OnceLock<Regex> = OnceLock::new();
    let key_re = YAML_KEY_RE.get_or_init(|| {
        Regex::new(r#"(?m)^\s*(?:-\s+)?["']?[^\s:#{\[\-"'][^:\n]*["']?:(?:\s|$)"#)
            .expect("Invalid regex")
    });

    if value.contains("://") && !value.contains('\n') {
        return false;
    }
    key_re.is_match(value)
}

/// Parses JSON text. `input` labels the content in errors.
pub fn parse_json(text: &str, input: &str) -> Result<Value, SourceError> {
    serde_json::from_str(text).map_err(|e| SourceError::Parse {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

/// Parses YAML text into a JSON value. `input` labels the content in errors.
pub fn parse_yaml(text: &str, input: &str) -> Result<Value, SourceError> {
    serde_yaml::from_str(text).map_err(|e| SourceError::Parse {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

/// Parses text of unknown syntax: JSON first, YAML as fallback.
pub fn normalize(text: &str, input: &str) -> Result<Value, SourceError> {
    parse_json(text, input).or_else(|_| parse_yaml(text, input))
}

/// Chooses the parser from a `Content-Type` value, sniffing when it names neither syntax.
pub fn parse_by_content_type(
    content_type: Option<&str>,
    text: &str,
    input: &str,
) -> Result<Value, SourceError> {
    let mime = content_type.unwrap_or_default().to_ascii_lowercase();
    if mime.contains("json") {
        parse_json(text, input)
    } else if mime.contains("yaml") || mime.contains("yml") {
        parse_yaml(text, input)
    } else {
        normalize(text, input)
    }
}
