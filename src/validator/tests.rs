use super::*;
use serde_json::{json, Number, Value};

#[test]
fn test_string_pattern_matches_whole_value() {
    let validate = string("[a-z]*").unwrap();
    assert_eq!(validate.validate(&json!("abc")).unwrap(), "abc");
    assert_eq!(validate.validate(&json!("")).unwrap(), "");
    assert_eq!(
        validate.validate(&json!("aB1c")),
        Err(ValidationError::InvalidString)
    );
}

#[test]
fn test_string_alternation_is_anchored_as_a_group() {
    let validate = string("a|ab").unwrap();
    assert!(validate.validate(&json!("ab")).is_ok());
    assert!(validate.validate(&json!("abc")).is_err());
}

#[test]
fn test_string_invalid_pattern() {
    assert!(string("[a-").is_err());
}

#[test]
fn test_number_rejects_nan_like_strings() {
    let validate = number(f64::NEG_INFINITY, f64::INFINITY).coerce();
    for s in ["NaN", "inf", "-infinity", "", " 1", "1 ", "3abc", "0x10"] {
        assert_eq!(
            validate.validate(&Value::String(s.to_string())),
            Err(ValidationError::InvalidNumber),
            "{s:?} should be rejected"
        );
    }
    assert_eq!(validate.validate(&json!("1e3")).unwrap().as_f64(), Some(1000.0));
    assert_eq!(validate.validate(&json!("-0.5")).unwrap().as_f64(), Some(-0.5));
}

#[test]
fn test_integer_outside_i64() {
    let validate = integer(f64::NEG_INFINITY, f64::INFINITY);
    assert_eq!(
        validate.validate(&json!(1e300)),
        Err(ValidationError::InvalidInteger)
    );
    assert_eq!(validate.validate(&json!(-42)).unwrap(), -42);
}

#[test]
fn test_integer_above_f64_precision_is_exact() {
    let validate = integer(0.0, 1e19);
    assert_eq!(
        validate.validate(&json!(9007199254740993_i64)).unwrap(),
        9007199254740993
    );
    assert_eq!(
        validate.validate(&json!(i64::MAX)).unwrap(),
        i64::MAX
    );
    // In range, but no i64 can hold it
    assert_eq!(
        validate.validate(&json!(10_000_000_000_000_000_000_u64)),
        Err(ValidationError::InvalidInteger)
    );

    let coerced = integer(0.0, 1e19).coerce();
    assert_eq!(
        coerced.validate(&json!("9007199254740993")).unwrap(),
        9007199254740993
    );
}

#[test]
fn test_integer_bounds_compare_exactly() {
    let validate = integer(0.0, 9007199254740992.0);
    assert!(validate.validate(&json!(9007199254740992_i64)).is_ok());
    assert_eq!(
        validate.validate(&json!(9007199254740993_i64)),
        Err(ValidationError::InvalidNumber)
    );

    let fractional = integer(0.5, 2.5);
    assert_eq!(fractional.validate(&json!(0)), Err(ValidationError::InvalidNumber));
    assert_eq!(fractional.validate(&json!(1)).unwrap(), 1);
    assert_eq!(fractional.validate(&json!(2)).unwrap(), 2);
    assert_eq!(fractional.validate(&json!(3)), Err(ValidationError::InvalidNumber));
}

#[test]
fn test_number_returns_input_unchanged() {
    let validate = number(0.0, 2e19);
    for expected in [
        Number::from(9007199254740993_i64),
        Number::from_f64(2.0).unwrap(),
        Number::from(2),
        Number::from(u64::MAX),
    ] {
        let input = Value::Number(expected.clone());
        assert_eq!(validate.validate(&input).unwrap(), expected, "{input}");
    }
}

#[test]
fn test_integer_delegates_range_to_number() {
    let validate = integer(1.0, 3.0);
    assert_eq!(validate.validate(&json!(4)), Err(ValidationError::InvalidNumber));
    assert_eq!(
        validate.validate(&json!(1.5)),
        Err(ValidationError::InvalidInteger)
    );
}

#[test]
fn test_optional_skips_inner_on_null() {
    let validate = optional(string("x").unwrap());
    assert_eq!(validate.validate(&Value::Null).unwrap(), None);
    assert_eq!(validate.validate(&json!("x")).unwrap(), Some("x".to_string()));
    assert_eq!(
        validate.validate(&json!(1)),
        Err(ValidationError::InvalidString)
    );
}

#[test]
fn test_present_passes_value_through() {
    let validate = present();
    assert_eq!(validate.validate(&json!([1, 2])).unwrap(), Some(json!([1, 2])));
    assert_eq!(validate.validate(&Value::Null).unwrap(), None);
}

#[test]
fn test_shape_duplicate_field_replaces_in_place() {
    let validate = shape()
        .field("a", integer(0.0, 1.0))
        .field("b", boolean())
        .field("a", string("x").unwrap());

    assert_eq!(validate.field_names().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(validate.len(), 2);
    let record = validate.validate(&json!({"a": "x", "b": false})).unwrap();
    assert_eq!(record["a"], json!("x"));
}

#[test]
fn test_shape_declared_fields_fail_before_extraneous() {
    let validate = shape().field("i", integer(1.0, 3.0));
    assert_eq!(
        validate.validate(&json!({"i": 9, "zzz": 1})),
        Err(ValidationError::InvalidNumber)
    );
}

#[test]
fn test_shape_stops_at_first_failing_field() {
    let validate = shape()
        .field("first", string("[a-z]+").unwrap())
        .field("second", boolean());
    assert_eq!(
        validate.validate(&json!({"first": 1, "second": "nope"})),
        Err(ValidationError::InvalidString)
    );
}

#[test]
fn test_error_display_and_kind() {
    let err = ValidationError::ExtraneousField {
        field: "extra".into(),
    };
    assert_eq!(err.to_string(), "Extraneous field 'extra'");
    assert_eq!(err.kind(), "extraneous_field");
    assert_eq!(ValidationError::InvalidType.to_string(), "Not an object");
}

#[test]
fn test_shared_validator_across_threads() {
    use std::sync::Arc;

    let validate = Arc::new(shape().field("n", integer(0.0, 1000.0).coerce()));
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let validate = Arc::clone(&validate);
            std::thread::spawn(move || {
                for n in 0..100 {
                    let input = json!({ "n": (t * 100 + n).to_string() });
                    let record = validate.validate(&input).unwrap();
                    assert_eq!(record["n"], json!(t * 100 + n));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}
