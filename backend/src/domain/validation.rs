//! Input predicates guarding the resource service.
//!
//! Every predicate is total: it never panics, returns a plain `bool` and has
//! no side effects. Services run them before any repository call, so a
//! rejected input never reaches storage.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::{IdCandidate, Resource};

/// True when `candidate` is a positive integral identifier.
///
/// # Examples
/// ```
/// use banking_backend::domain::validation::is_valid_id;
///
/// assert!(is_valid_id(3_i64));
/// assert!(!is_valid_id(0_i64));
/// assert!(!is_valid_id(1.5));
/// assert!(!is_valid_id("abc"));
/// ```
pub fn is_valid_id(candidate: impl Into<IdCandidate>) -> bool {
    candidate.into().validate().is_some()
}

/// True when `value` is non-empty once trimmed.
pub fn is_valid_string(value: &str) -> bool {
    !value.trim().is_empty()
}

/// True when every value is non-empty once trimmed.
pub fn is_valid_strings(values: &[&str]) -> bool {
    values.iter().all(|value| is_valid_string(value))
}

/// JavaScript-style truthiness of a JSON value.
///
/// Empty strings, zero, `false` and `null` are falsy; arrays and objects are
/// always truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// True when `object` is present, serialises to a JSON object and every
/// property not listed in `excluded` is truthy.
///
/// # Examples
/// ```
/// use banking_backend::domain::{Account, validation::is_valid_object};
///
/// let account = Account::new(100.0, "Savings", 1);
/// assert!(is_valid_object(Some(&account), &["id"]));
/// assert!(!is_valid_object(Some(&Account::new(0.0, "Savings", 1)), &["id"]));
/// assert!(!is_valid_object::<Account>(None, &[]));
/// ```
pub fn is_valid_object<T: Serialize + ?Sized>(object: Option<&T>, excluded: &[&str]) -> bool {
    let Some(object) = object else {
        return false;
    };
    let Ok(Value::Object(properties)) = serde_json::to_value(object) else {
        return false;
    };
    properties
        .iter()
        .filter(|(key, _)| !excluded.contains(&key.as_str()))
        .all(|(_, value)| is_truthy(value))
}

/// True when `resource` passes [`is_valid_object`] and also carries every
/// field of its wire shape that is not `excluded`.
///
/// Optional properties are omitted from the serialised form when absent, so
/// this catches payloads that leave a required field out entirely.
pub fn is_complete_resource<R: Resource>(resource: Option<&R>, excluded: &[&str]) -> bool {
    let Some(resource) = resource else {
        return false;
    };
    let Ok(Value::Object(properties)) = serde_json::to_value(resource) else {
        return false;
    };
    let all_present = R::FIELDS
        .iter()
        .filter(|field| !excluded.contains(*field))
        .all(|field| properties.contains_key(*field));
    all_present && is_valid_object(Some(resource), excluded)
}

/// True when `key` names a wire property of `R`.
///
/// # Examples
/// ```
/// use banking_backend::domain::{User, validation::is_property_of};
///
/// assert!(is_property_of::<User>("username"));
/// assert!(!is_property_of::<User>("password; drop table app_users"));
/// ```
pub fn is_property_of<R: Resource>(key: &str) -> bool {
    R::FIELDS.contains(&key)
}

/// True when `value` has no own keys. Non-objects count as empty.
pub fn is_empty_object(value: &Value) -> bool {
    value.as_object().is_none_or(serde_json::Map::is_empty)
}

/// True when `map` has no entries.
pub fn is_empty_map<K, V>(map: &BTreeMap<K, V>) -> bool {
    map.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Account, Role, Transaction, User};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(null), false)]
    #[case(json!(false), false)]
    #[case(json!(true), true)]
    #[case(json!(0), false)]
    #[case(json!(0.0), false)]
    #[case(json!(-2.5), true)]
    #[case(json!(""), false)]
    #[case(json!(" "), true)]
    #[case(json!([]), true)]
    #[case(json!({}), true)]
    fn truthiness_follows_loose_semantics(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(is_truthy(&value), expected);
    }

    #[rstest]
    #[case(&["a", "b"], true)]
    #[case(&["a", "  "], false)]
    #[case(&[""], false)]
    #[case(&[], true)]
    fn strings_must_all_be_non_blank(#[case] values: &[&str], #[case] expected: bool) {
        assert_eq!(is_valid_strings(values), expected);
    }

    #[rstest]
    fn objects_with_falsy_fields_are_rejected() {
        let tx = Transaction::new(12.0, "", 1);
        assert!(!is_valid_object(Some(&tx), &["id"]));
    }

    #[rstest]
    fn excluded_fields_are_ignored() {
        let payload = json!({"id": 0, "amount": 5});
        assert!(is_valid_object(Some(&payload), &["id"]));
        assert!(!is_valid_object(Some(&payload), &[]));
    }

    #[rstest]
    fn non_objects_are_rejected() {
        assert!(!is_valid_object(Some(&json!([1, 2])), &[]));
        assert!(!is_valid_object(Some(&json!("text")), &[]));
    }

    #[rstest]
    fn complete_resource_requires_every_field() {
        let mut user = User::new("u", "p", "f", "l", "e@x.io", Role::Client);
        assert!(is_complete_resource(Some(&user), &["id"]));
        assert!(!is_complete_resource(Some(&user), &[]));
        user.password = None;
        assert!(!is_complete_resource(Some(&user), &["id"]));
    }

    #[rstest]
    fn complete_resource_rejects_missing_payload() {
        assert!(!is_complete_resource::<Account>(None, &["id"]));
    }

    #[rstest]
    #[case("id", true)]
    #[case("type", true)]
    #[case("ownerId", true)]
    #[case("owner_id", false)]
    #[case("account_type", false)]
    fn property_checks_use_wire_names(#[case] key: &str, #[case] expected: bool) {
        assert_eq!(is_property_of::<Account>(key), expected);
    }

    #[rstest]
    #[case(json!({}), true)]
    #[case(json!({"id": 1}), false)]
    #[case(json!(null), true)]
    fn empty_object_detection(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(is_empty_object(&value), expected);
    }

    #[rstest]
    fn empty_map_detection() {
        let mut map = BTreeMap::new();
        assert!(is_empty_map(&map));
        map.insert("username".to_owned(), "aanderson".to_owned());
        assert!(!is_empty_map(&map));
    }
}
