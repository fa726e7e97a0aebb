//! Tolerant `deserialize_with` helpers for model output.
//!
//! The structuring step is a language model, so field types drift: numbers where
//! strings were asked for, a bare string instead of a one-element list, `null`
//! everywhere. These helpers coerce the harmless drifts and reject the rest, so
//! a wrong-shaped item fails on its own without taking its siblings with it.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

/// Converts a scalar JSON value to text. Objects and arrays are not text.
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// A text field: string, number, bool or null.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    value_to_text(&value).ok_or_else(|| D::Error::custom("expected a text value"))
}

/// A list of strings. A lone scalar becomes a one-entry list; non-text entries are dropped.
pub fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(entries) => Ok(entries
            .iter()
            .filter(|v| !v.is_null())
            .filter_map(value_to_text)
            .collect()),
        Value::Object(_) => Err(D::Error::custom("expected a list of text values")),
        scalar => Ok(value_to_text(&scalar).into_iter().collect()),
    }
}

/// A flag: bool, or the strings "true"/"yes" (case-insensitive). Null is false.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Bool(b) => Ok(b),
        Value::Null => Ok(false),
        Value::String(s) => Ok(matches!(s.trim().to_lowercase().as_str(), "true" | "yes")),
        Value::Number(n) => Ok(n.as_i64().is_some_and(|n| n != 0)),
        _ => Err(D::Error::custom("expected a boolean")),
    }
}

/// Like [`flag`], but a missing or null value means `true`.
pub fn flag_or_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(true);
    }
    flag(value).map_err(D::Error::custom)
}

/// A nested value that falls back to its default instead of failing the parent.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_else(|e| {
        debug!("Falling back to defaults for malformed value: {e}");
        T::default()
    }))
}

/// An optional positive limit. Numbers and numeric strings count; `0`, negative
/// values and prose ("No limit for now") mean "no limit".
pub fn limit<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    Ok(parsed
        .filter(|&n| n > 0)
        .and_then(|n| usize::try_from(n).ok()))
}

/// A list of structured items. Each entry is decoded on its own; entries that
/// do not fit `T` are dropped. A non-array value fails the whole field.
pub fn items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let entries = match Value::deserialize(deserializer)? {
        Value::Null => return Ok(Vec::new()),
        Value::Array(entries) => entries,
        _ => return Err(D::Error::custom("expected a list of items")),
    };

    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<T>(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                debug!("Dropping malformed item #{index}: {e}");
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "text")]
        name: String,
        #[serde(default, deserialize_with = "text_list")]
        tags: Vec<String>,
        #[serde(default, deserialize_with = "flag")]
        on: bool,
        #[serde(default, deserialize_with = "limit")]
        cap: Option<usize>,
    }

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "items")]
        items: Vec<Probe>,
    }

    #[test]
    fn test_text_coerces_scalars() {
        let p: Probe = serde_json::from_value(json!({"name": 3.5})).unwrap();
        assert_eq!(p.name, "3.5");
        let p: Probe = serde_json::from_value(json!({"name": null})).unwrap();
        assert_eq!(p.name, "");
    }

    #[test]
    fn test_text_rejects_objects() {
        let result: Result<Probe, _> = serde_json::from_value(json!({"name": {"first": "A"}}));
        assert!(result.is_err());
    }

    #[test]
    fn test_text_list_accepts_single_string_and_drops_objects() {
        let p: Probe = serde_json::from_value(json!({"tags": "Rust"})).unwrap();
        assert_eq!(p.tags, vec!["Rust"]);
        let p: Probe =
            serde_json::from_value(json!({"tags": ["a", null, {"x": 1}, 2]})).unwrap();
        assert_eq!(p.tags, vec!["a", "2"]);
    }

    #[test]
    fn test_flag_accepts_strings() {
        let p: Probe = serde_json::from_value(json!({"on": "Yes"})).unwrap();
        assert!(p.on);
        let p: Probe = serde_json::from_value(json!({"on": "no"})).unwrap();
        assert!(!p.on);
    }

    #[test]
    fn test_limit_treats_prose_and_zero_as_unlimited() {
        let p: Probe = serde_json::from_value(json!({"cap": "No limit for now"})).unwrap();
        assert_eq!(p.cap, None);
        let p: Probe = serde_json::from_value(json!({"cap": 0})).unwrap();
        assert_eq!(p.cap, None);
        let p: Probe = serde_json::from_value(json!({"cap": "4"})).unwrap();
        assert_eq!(p.cap, Some(4));
    }

    #[test]
    fn test_items_drops_only_the_malformed_entry() {
        let h: Holder = serde_json::from_value(json!({
            "items": [{"name": "ok"}, "just a string", {"name": ["bad"]}, {"name": "also ok"}]
        }))
        .unwrap();
        let names: Vec<_> = h.items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["ok", "also ok"]);
    }

    #[test]
    fn test_items_rejects_non_array() {
        let result: Result<Holder, _> = serde_json::from_value(json!({"items": {"name": "x"}}));
        assert!(result.is_err());
    }
}
