//! Canonical JSON rendering.

use serde_json::{Map, Value};

use crate::error_handling::OutputError;
use crate::subscription::Subscription;

/// Renders a subscription as canonical JSON text.
///
/// Object keys are sorted at every level, output is indented by two spaces
/// and non-ASCII characters are written as is. The same subscription always
/// renders to the same text.
///
/// # Errors
///
/// Returns `OutputError::Serialize` if the subscription cannot be converted
/// to JSON.
pub fn canonical_json(subscription: &Subscription) -> Result<String, OutputError> {
    let value = sort_keys(serde_json::to_value(subscription)?);
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Rebuilds every object in `value` with its keys in sorted order.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, sort_keys(v)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sort_keys_recursively() {
        let sorted = sort_keys(json!({"b": {"z": 1, "a": [{"y": 0, "x": 0}]}, "a": 2}));
        assert_eq!(
            serde_json::to_string(&sorted).unwrap(),
            r#"{"a":2,"b":{"a":[{"x":0,"y":0}],"z":1}}"#
        );
    }

    #[test]
    fn test_canonical_json_format() {
        let sub: Subscription = serde_json::from_value(json!({
            "cache_time": "7200",
            "api_site": {"api_1": {"name": "豆瓣", "api": "http://a", "ttl": 50}}
        }))
        .unwrap();

        let text = canonical_json(&sub).unwrap();
        let expected = r#"{
  "api_site": {
    "api_1": {
      "api": "http://a",
      "name": "豆瓣",
      "ttl": 50
    }
  },
  "cache_time": "7200"
}"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn test_canonical_json_is_deterministic() {
        let a: Subscription =
            serde_json::from_value(json!({"z": 1, "a": 2, "api_site": []})).unwrap();
        let b: Subscription =
            serde_json::from_value(json!({"api_site": [], "a": 2, "z": 1})).unwrap();
        assert_eq!(canonical_json(&a).unwrap(), canonical_json(&b).unwrap());
    }
}
