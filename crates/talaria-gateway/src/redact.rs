//! Serialize-time field redaction.
//!
//! Blacklisted keys are removed while the response body is serialized, at
//! any nesting depth. The content value itself is never mutated, so a
//! handler can keep using what it returned.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Value;

/// A serialization adapter that omits blacklisted keys.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use talaria_gateway::Redacted;
///
/// let content = json!({"email": "a@b.example", "password": "secret"});
/// let blacklist = vec!["password".to_string()];
/// let body = serde_json::to_string(&Redacted::new(&content, &blacklist)).unwrap();
/// assert_eq!(body, r#"{"email":"a@b.example"}"#);
/// ```
pub struct Redacted<'a> {
    value: &'a Value,
    blacklist: &'a [String],
}

impl<'a> Redacted<'a> {
    /// Wraps `value` so that `blacklist` keys are skipped when serializing.
    #[must_use]
    pub const fn new(value: &'a Value, blacklist: &'a [String]) -> Self {
        Self { value, blacklist }
    }
}

impl Serialize for Redacted<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value {
            Value::Object(entries) => {
                let retained: Vec<_> = entries
                    .iter()
                    .filter(|(key, _)| !self.blacklist.iter().any(|blocked| blocked == *key))
                    .collect();

                let mut map = serializer.serialize_map(Some(retained.len()))?;
                for (key, value) in retained {
                    map.serialize_entry(key, &Redacted::new(value, self.blacklist))?;
                }
                map.end()
            }
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&Redacted::new(item, self.blacklist))?;
                }
                seq.end()
            }
            scalar => scalar.serialize(serializer),
        }
    }
}

/// Serializes `value` to a JSON string with blacklisted keys removed.
///
/// # Errors
///
/// Returns the underlying serialization error; for JSON values this does
/// not happen in practice.
pub fn to_redacted_string(value: &Value, blacklist: &[String]) -> serde_json::Result<String> {
    serde_json::to_string(&Redacted::new(value, blacklist))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn redact_value(value: &Value, blacklist: &[String]) -> Value {
        serde_json::from_str(&to_redacted_string(value, blacklist).unwrap()).unwrap()
    }

    #[test]
    fn test_removes_top_level_key() {
        let content = json!({"password": "secret", "email": "a@b.com"});
        let body = to_redacted_string(&content, &["password".to_string()]).unwrap();
        assert_eq!(body, r#"{"email":"a@b.com"}"#);
    }

    #[test]
    fn test_removes_nested_keys_at_any_depth() {
        let content = json!({
            "user": {"password": "secret", "name": "ada"},
            "audit": [{"password": "old"}, {"kept": true}],
        });
        let redacted = redact_value(&content, &["password".to_string()]);

        assert_eq!(
            redacted,
            json!({
                "user": {"name": "ada"},
                "audit": [{}, {"kept": true}],
            })
        );
    }

    #[test]
    fn test_does_not_mutate_content() {
        let content = json!({"password": "secret"});
        let _ = to_redacted_string(&content, &["password".to_string()]).unwrap();
        assert_eq!(content, json!({"password": "secret"}));
    }

    #[test]
    fn test_empty_blacklist_is_plain_serialization() {
        let content = json!({"password": "secret"});
        let body = to_redacted_string(&content, &[]).unwrap();
        assert_eq!(body, content.to_string());
    }

    #[test]
    fn test_scalars_untouched() {
        let body = to_redacted_string(&json!("Bad Request"), &["password".to_string()]).unwrap();
        assert_eq!(body, r#""Bad Request""#);
    }

    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            "[a-z]{0,8}".prop_map(Value::from),
        ];
        leaf.prop_recursive(4, 32, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                    .prop_map(|entries| Value::Object(entries.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_redaction_is_idempotent(value in arb_json(), key in "[a-z]{1,6}") {
            let blacklist = vec![key];
            let once = redact_value(&value, &blacklist);
            let twice = redact_value(&once, &blacklist);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_redacted_key_never_survives(value in arb_json(), key in "[a-z]{1,6}") {
            fn contains_key(value: &Value, key: &str) -> bool {
                match value {
                    Value::Object(entries) => entries
                        .iter()
                        .any(|(k, v)| k == key || contains_key(v, key)),
                    Value::Array(items) => items.iter().any(|v| contains_key(v, key)),
                    _ => false,
                }
            }

            let blacklist = vec![key.clone()];
            let redacted = redact_value(&value, &blacklist);
            prop_assert!(!contains_key(&redacted, &key));
        }
    }
}
