//! Shared proptest generators.

use proptest::prelude::*;
use serde::Serialize;
use serde_json::{Map, Value, ser::PrettyFormatter};

/// Generate JSON scalars: null, booleans, integers, floats, strings.
pub fn json_scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        // Quarter steps are exact in binary and in decimal.
        (-4_000_000i32..4_000_000).prop_map(|n| Value::from(f64::from(n) / 4.0)),
        "[ -~]{0,16}".prop_map(Value::String),
    ]
}

/// Generate arbitrary JSON values up to a few levels deep.
pub fn json_value_strategy() -> impl Strategy<Value = Value> {
    json_scalar_strategy().prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z_]{1,8}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Generate JSON objects, the only shape accepted as `data_json`.
pub fn json_object_strategy() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map("[a-z_]{1,8}", json_value_strategy(), 0..6)
        .prop_map(|m| m.into_iter().collect())
}

/// Generate indentation strings for pretty-printing.
pub fn indent_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("\t".to_string()),
        " {1,8}",
    ]
}

/// Serialize `value` pretty-printed with the given indentation.
#[must_use]
pub fn to_indented_json(value: &Value, indent: &str) -> String {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    if value.serialize(&mut serializer).is_err() {
        return value.to_string();
    }
    String::from_utf8(out).unwrap_or_else(|_| value.to_string())
}

/// Generate two texts of the same JSON object that differ only in formatting.
pub fn reformatted_object_pair_strategy() -> impl Strategy<Value = (String, String)> {
    (json_object_strategy(), indent_strategy(), indent_strategy(), any::<bool>()).prop_map(
        |(object, indent_a, indent_b, pad)| {
            let value = Value::Object(object);
            let mut first = to_indented_json(&value, &indent_a);
            if pad {
                first = format!("  {first}\n");
            }
            (first, to_indented_json(&value, &indent_b))
        },
    )
}

/// Generate text that is not valid JSON.
pub fn invalid_json_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("{invalid".to_string()),
        Just("{\"a\": }".to_string()),
        Just("{'a': 1}".to_string()),
        Just("[1, 2".to_string()),
        Just("{\"a\": 1,}".to_string()),
        "[a-z]{1,12}"
            .prop_filter("JSON literal", |s| !matches!(s.as_str(), "true" | "false" | "null")),
        // Valid object text with its closing brace cut off.
        json_object_strategy().prop_map(|object| {
            let mut text = Value::Object(object).to_string();
            text.pop();
            text
        }),
    ]
}

/// Generate Vault logical paths.
pub fn vault_path_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("secret/foo".to_string()),
        Just("sys/config/cors".to_string()),
        Just("auth/token/roles/ci".to_string()),
        (
            prop_oneof![Just("secret"), Just("sys"), Just("auth"), Just("kv")],
            prop::collection::vec("[a-z][a-z0-9_-]{1,10}", 1..4),
        )
            .prop_map(|(mount, segments)| format!("{mount}/{}", segments.join("/"))),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn invalid_json_never_parses(text in invalid_json_strategy()) {
            prop_assert!(serde_json::from_str::<Value>(&text).is_err());
        }

        #[test]
        fn reformatted_pair_parses_equal((a, b) in reformatted_object_pair_strategy()) {
            let left: Value = serde_json::from_str(&a).unwrap();
            let right: Value = serde_json::from_str(&b).unwrap();
            prop_assert_eq!(left, right);
        }

        #[test]
        fn vault_paths_have_no_empty_segments(path in vault_path_strategy()) {
            prop_assert!(!path.contains("//"));
            prop_assert!(!path.starts_with('/'));
        }
    }
}
