use serde_json::Value;

/// The seven primitive type names a draft-07 `type` keyword may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    Null,
    Boolean,
    Object,
    Array,
    Number,
    String,
    Integer,
}

impl JsonType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "null" => Some(JsonType::Null),
            "boolean" => Some(JsonType::Boolean),
            "object" => Some(JsonType::Object),
            "array" => Some(JsonType::Array),
            "number" => Some(JsonType::Number),
            "string" => Some(JsonType::String),
            "integer" => Some(JsonType::Integer),
            _ => None,
        }
    }

    pub fn matches(&self, instance: &Value) -> bool {
        match self {
            JsonType::Null => instance.is_null(),
            JsonType::Boolean => instance.is_boolean(),
            JsonType::Object => instance.is_object(),
            JsonType::Array => instance.is_array(),
            JsonType::Number => instance.is_number(),
            JsonType::String => instance.is_string(),
            JsonType::Integer => is_integer(instance),
        }
    }
}

/// The numeric value of `instance`, or `None` when it is not a JSON number.
pub fn as_number(instance: &Value) -> Option<f64> {
    match instance {
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

/// An integer per draft-07: any number whose mathematical value is integral,
/// so `1.0` qualifies while `1.5` and non-finite values do not.
pub fn is_integer(instance: &Value) -> bool {
    match instance {
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                true
            } else {
                n.as_f64()
                    .map(|f| f.is_finite() && f.fract() == 0.0)
                    .unwrap_or(false)
            }
        }
        _ => false,
    }
}

/// JSON equality as used by `enum`, `const` and `uniqueItems`.
///
/// Numbers compare by mathematical value regardless of how serde_json stored
/// them, so `1 == 1.0`. Two integers compare exactly, without the f64
/// round-trip that would conflate neighbors above 2^53. Values of different
/// JSON types are never equal.
pub fn json_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(a), Some(b)) = (x.as_i64(), y.as_i64()) {
                a == b
            } else if let (Some(a), Some(b)) = (x.as_u64(), y.as_u64()) {
                a == b
            } else {
                match (x.as_f64(), y.as_f64()) {
                    (Some(a), Some(b)) => a == b,
                    _ => x == y,
                }
            }
        }
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(a, b)| json_eq(a, b))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(k, v)| y.get(k).map(|w| json_eq(v, w)).unwrap_or(false))
        }
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_integer() {
        assert!(is_integer(&json!(0)));
        assert!(is_integer(&json!(0.0)));
        assert!(is_integer(&json!(1)));
        assert!(is_integer(&json!(-1)));
        assert!(is_integer(&json!(1.0)));
        assert!(is_integer(&json!(-1.0)));

        assert!(!is_integer(&json!(1.5)));
        assert!(!is_integer(&json!(true)));
        assert!(!is_integer(&json!(false)));
        assert!(!is_integer(&json!("1")));
    }

    #[test]
    fn test_boolean_is_not_a_number() {
        assert_eq!(as_number(&json!(true)), None);
        assert_eq!(as_number(&json!(false)), None);
        assert_eq!(as_number(&json!(1)), Some(1.0));
        assert_eq!(as_number(&json!(-1.1)), Some(-1.1));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(JsonType::from_name("integer"), Some(JsonType::Integer));
        assert_eq!(JsonType::from_name("any"), None);
        assert_eq!(JsonType::from_name("Null"), None);
    }

    #[test]
    fn test_type_matches() {
        assert!(JsonType::Number.matches(&json!(1)));
        assert!(JsonType::Integer.matches(&json!(1.0)));
        assert!(!JsonType::Integer.matches(&json!(1.2)));
        assert!(!JsonType::Boolean.matches(&json!(1)));
        assert!(!JsonType::Number.matches(&json!(true)));
        assert!(JsonType::Null.matches(&json!(null)));
        assert!(!JsonType::Null.matches(&json!("")));
    }

    #[test]
    fn test_json_eq_numbers() {
        assert!(json_eq(&json!(1), &json!(1.0)));
        assert!(json_eq(&json!([1, 2]), &json!([1.0, 2.0])));
        assert!(json_eq(&json!({"a": 1}), &json!({"a": 1.0})));

        assert!(!json_eq(&json!(1), &json!(true)));
        assert!(!json_eq(&json!(0), &json!(false)));
        assert!(!json_eq(&json!(1), &json!("1")));
    }

    #[test]
    fn test_json_eq_large_integers() {
        assert!(json_eq(&json!(u64::MAX), &json!(u64::MAX)));
        assert!(!json_eq(&json!(u64::MAX), &json!(u64::MAX - 1)));
        assert!(!json_eq(&json!(i64::MIN), &json!(i64::MIN + 1)));
        assert!(!json_eq(&json!(u64::MAX), &json!(-1)));
    }

    #[test]
    fn test_json_eq_structures() {
        assert!(json_eq(&json!({"a": [1], "b": null}), &json!({"b": null, "a": [1]})));
        assert!(!json_eq(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
        assert!(!json_eq(&json!([1, 2]), &json!([2, 1])));
    }
}
