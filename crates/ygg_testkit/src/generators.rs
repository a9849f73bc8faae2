//! Property-based test generators using proptest.

use proptest::prelude::*;
use serde_json::{Map, Number, Value};

/// Strategy for valid profile names.
pub fn profile_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z0-9_]{3,16}").expect("Invalid regex")
}

/// Strategy for password strings.
pub fn password_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[ -~]{1,32}").expect("Invalid regex")
}

fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(Number::from(n))),
        ".{0,12}".prop_map(Value::String),
    ]
}

fn nested_strategy() -> impl Strategy<Value = Value> {
    leaf_strategy().prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-zA-Z_]{1,8}", inner, 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

/// Strategy for structured property values.
///
/// Never yields a top-level string. Numbers are integers only so the value
/// survives a JSON round trip unchanged.
pub fn json_value_strategy() -> impl Strategy<Value = Value> {
    nested_strategy().prop_filter("top-level strings are already encoded", |v| !v.is_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn generated_values_are_structured(value in json_value_strategy()) {
            prop_assert!(!value.is_string());
            let text = value.to_string();
            let parsed: Value = serde_json::from_str(&text).unwrap();
            prop_assert_eq!(parsed, value);
        }

        #[test]
        fn generated_names_are_valid(name in profile_name_strategy()) {
            prop_assert!((3..=16).contains(&name.len()));
            prop_assert!(name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
        }
    }
}
