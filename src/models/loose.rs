//! Lenient decoding of values the browser sends in more than one shape.
//!
//! Ids read back from DOM attributes arrive as strings, and checkbox state may
//! arrive as anything truthy.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Interpret a JSON value as an entity id: an integer, or a string holding one.
pub fn value_to_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Truthiness as the browser understands it.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Deserialize an optional id. Zero counts as absent.
pub fn id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_id).filter(|id| *id != 0))
}

/// Deserialize any JSON value into a boolean by truthiness.
pub fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(is_truthy(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_to_id() {
        assert_eq!(value_to_id(&json!(5)), Some(5));
        assert_eq!(value_to_id(&json!("17")), Some(17));
        assert_eq!(value_to_id(&json!(" 9 ")), Some(9));
        assert_eq!(value_to_id(&json!("abc")), None);
        assert_eq!(value_to_id(&json!(1.5)), None);
        assert_eq!(value_to_id(&json!(null)), None);
        assert_eq!(value_to_id(&json!({ "id": 1 })), None);
    }

    #[test]
    fn test_is_truthy() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("yes")));
        assert!(is_truthy(&json!([])));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(null)));
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Probe {
        #[serde(default, deserialize_with = "id")]
        person_id: Option<i64>,
        #[serde(default, deserialize_with = "truthy")]
        purchased: bool,
    }

    #[test]
    fn test_field_deserializers() {
        let probe: Probe = serde_json::from_value(json!({})).unwrap();
        assert_eq!(probe.person_id, None);
        assert!(!probe.purchased);

        let probe: Probe =
            serde_json::from_value(json!({ "personId": 0, "purchased": null })).unwrap();
        assert_eq!(probe.person_id, None);
        assert!(!probe.purchased);

        let probe: Probe =
            serde_json::from_value(json!({ "personId": "3", "purchased": 1 })).unwrap();
        assert_eq!(probe.person_id, Some(3));
        assert!(probe.purchased);
    }
}
