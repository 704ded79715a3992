use serde::de::DeserializeOwned;
use serde_json::{Map, Value as JsonValue};

/// Rewrites every object key to lower camelCase so that `QuestionId`,
/// `questionId` and `question_id` all land on the same field.
pub fn camelize_keys(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(map) => JsonValue::Object(
            map.into_iter()
                .map(|(k, v)| (camelize(&k), camelize_keys(v)))
                .collect::<Map<_, _>>(),
        ),
        JsonValue::Array(items) => JsonValue::Array(items.into_iter().map(camelize_keys).collect()),
        other => other,
    }
}

fn camelize(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;
    for c in key.chars() {
        if c == '_' || c == '-' {
            upper_next = !out.is_empty();
            continue;
        }
        if out.is_empty() {
            out.extend(c.to_lowercase());
        } else if upper_next {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        upper_next = false;
    }
    out
}

/// Decodes a list body leniently: blank or `null` yields an empty list.
pub fn list_from_str<T: DeserializeOwned>(body: &str) -> serde_json::Result<Vec<T>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let value: JsonValue = serde_json::from_str(body)?;
    let list: Option<Vec<T>> = serde_json::from_value(camelize_keys(value))?;
    Ok(list.unwrap_or_default())
}

/// Like [`list_from_str`] but for any payload type.
pub fn from_str_relaxed<T: DeserializeOwned>(body: &str) -> serde_json::Result<Option<T>> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    let value: JsonValue = serde_json::from_str(body)?;
    serde_json::from_value(camelize_keys(value))
}
