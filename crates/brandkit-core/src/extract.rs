//! Tolerant extraction of structured fields from model prose.
//!
//! Completion replies are free text that may embed a JSON object, wrapped in
//! prose or markdown fencing. Extraction never fails: it degrades from a full
//! parse, to a balanced-brace scan, to a best-effort single-key regex, and
//! finally to "no structured value".

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

/// Placeholder shown when a field cannot be recovered from a reply.
pub const UNABLE_TO_EXTRACT: &str = "Enter valid data, I am unable to extract";

/// `"key": "value"` pairs. The value stops at the first following quote.
static STRING_PAIR: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#""([^"\\]+)"\s*:\s*"(.+?)""#).ok());

/// Result of reading a finalize signal out of a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizeSignal {
    /// What to show the user. Never empty.
    pub display: String,
    /// The structured value, when the reply carried one.
    pub value: Option<String>,
}

/// Remove a leading/trailing markdown code fence (with optional language tag).
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop a language tag such as `json` when it sits alone on the fence line.
    let body = match rest.split_once('\n') {
        Some((tag, remaining)) if tag.trim().chars().all(|c| c.is_ascii_alphanumeric()) => {
            remaining
        }
        _ => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };

    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

/// Parse the first JSON object or array found in `text`.
///
/// Tries, in order: the fence-stripped text as a whole, then every
/// balanced `{..}` span, then every balanced `[..]` span.
pub fn parse_json_reply(text: &str) -> Option<Value> {
    let body = strip_code_fence(text);
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if value.is_object() || value.is_array() {
            return Some(value);
        }
    }

    balanced_spans(body, '{', '}')
        .into_iter()
        .chain(balanced_spans(body, '[', ']'))
        .find_map(|span| serde_json::from_str::<Value>(span).ok())
}

/// Parse the first JSON object found in `text`.
pub fn parse_json_object(text: &str) -> Option<Map<String, Value>> {
    let body = strip_code_fence(text);
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        return Some(map);
    }
    balanced_spans(body, '{', '}').into_iter().find_map(|span| match serde_json::from_str::<Value>(span) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    })
}

/// Pull a single non-blank string field out of a reply.
///
/// Falls back to a `"key": "value"` regex when no parseable JSON is present
/// (e.g. a truncated object). The regex stops at the first following quote, so
/// values containing escaped quotes come back cut short.
pub fn extract_string_field(text: &str, key: &str) -> Option<String> {
    if let Some(map) = parse_json_object(text) {
        if let Some(value) = non_blank(map.get(key)) {
            return Some(value);
        }
    }

    STRING_PAIR
        .as_ref()?
        .captures_iter(text)
        .filter(|caps| &caps[1] == key)
        .map(|caps| caps[2].trim().to_string())
        .find(|s| !s.is_empty())
}

/// Read a finalize signal (`{"<key>": "..."}`) from a completion reply.
pub fn read_finalize_signal(text: &str, key: &str) -> FinalizeSignal {
    let value = extract_string_field(text, key);
    let display = text.trim();
    FinalizeSignal {
        display: if display.is_empty() {
            UNABLE_TO_EXTRACT.to_string()
        } else {
            display.to_string()
        },
        value,
    }
}

/// Look up a field by name, ignoring case and non-alphanumerics, and accepting
/// keys that extend the name (so `"Coverage Section"` matches `coverage`).
pub fn field<'a>(map: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    if let Some(value) = map.get(name) {
        return Some(value);
    }
    let wanted = normalize_key(name);
    map.iter()
        .find(|(key, _)| normalize_key(key).starts_with(&wanted))
        .map(|(_, value)| value)
}

/// A trimmed, non-empty string value, or `None`.
pub fn non_blank(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// A trimmed string value, or the [`UNABLE_TO_EXTRACT`] placeholder.
pub fn string_or_sentinel(value: Option<&Value>) -> String {
    non_blank(value).unwrap_or_else(|| UNABLE_TO_EXTRACT.to_string())
}

/// Keywords may come back as a comma list or a JSON array of strings.
pub fn keywords_or_sentinel(value: Option<&Value>) -> String {
    match value {
        Some(Value::Array(items)) => {
            let joined = items
                .iter()
                .filter_map(|item| item.as_str())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", ");
            if joined.is_empty() {
                UNABLE_TO_EXTRACT.to_string()
            } else {
                joined
            }
        }
        other => string_or_sentinel(other),
    }
}

/// Collect string items from the first array in `value`: either the value
/// itself or the first array-valued field of an object.
pub fn string_list(value: &Value) -> Option<Vec<String>> {
    let array = match value {
        Value::Array(items) => items,
        Value::Object(map) => map.values().find_map(Value::as_array)?,
        _ => return None,
    };
    let items: Vec<String> = array
        .iter()
        .filter_map(Value::as_str)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    (!items.is_empty()).then_some(items)
}

fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Every balanced `open..close` span, in order of its opening position.
///
/// A single pass with a stack of open positions, so the scan is linear in the
/// text; callers parse spans one by one and stop at the first that parses.
/// Quotes only start a string inside an open span, so stray quotes in the
/// surrounding prose are ignored.
fn balanced_spans(text: &str, open: char, close: char) -> Vec<&str> {
    let mut starts = Vec::new();
    let mut spans = Vec::new();
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' if !starts.is_empty() => in_string = true,
            c if c == open => starts.push(i),
            c if c == close => {
                if let Some(start) = starts.pop() {
                    spans.push((start, i + c.len_utf8()));
                }
            }
            _ => {}
        }
    }
    spans.sort_unstable_by_key(|&(start, _)| start);
    spans.into_iter().map(|(start, end)| &text[start..end]).collect()
}

/// Collapse internal whitespace runs to single spaces.
pub fn squash_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
