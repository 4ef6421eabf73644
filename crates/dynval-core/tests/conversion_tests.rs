/// Conversion contract tests: typed unwraps out of a `Value`.
///
/// Conversions never parse text and never narrow floats. The only coercions
/// are scalar-to-text rendering and Int→Float widening.
use dynval_core::{Kind, Value, ValueError};

fn assert_invalid_cast(err: ValueError, from: Kind, to: Kind) {
    match err {
        ValueError::InvalidCast { from: f, to: t } => {
            assert_eq!(f, from);
            assert_eq!(t, to);
        }
        other => panic!("expected InvalidCast, got {:?}", other),
    }
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn factories_set_the_matching_tag() {
    assert_eq!(Value::string("a").kind(), Kind::String);
    assert_eq!(Value::int(1).kind(), Kind::Int);
    assert_eq!(Value::float(1.0).kind(), Kind::Float);
    assert_eq!(Value::double(1.0).kind(), Kind::Double);
    assert_eq!(Value::boolean(true).kind(), Kind::Bool);
    assert_eq!(Value::new_list().kind(), Kind::List);
    assert_eq!(Value::new_map().kind(), Kind::Map);
}

#[test]
fn double_keeps_its_provenance_tag() {
    let v = Value::from(2.5f64);
    assert_eq!(v.kind(), Kind::Double);
    assert!(v.is_float());
}

#[test]
fn from_impls_pick_the_expected_variant() {
    assert_eq!(Value::from(3i32).kind(), Kind::Int);
    assert_eq!(Value::from(3i64).kind(), Kind::Int);
    assert_eq!(Value::from(3.0f32).kind(), Kind::Float);
    assert_eq!(Value::from("s").kind(), Kind::String);
    assert_eq!(Value::from(String::from("s")).kind(), Kind::String);
    assert_eq!(Value::from(false).kind(), Kind::Bool);
    assert_eq!(Value::from(vec![Value::int(1)]).kind(), Kind::List);

    let collected: Value = (1..=3).map(Value::int).collect();
    assert_eq!(collected.count().unwrap(), 3);
}

// ============================================================================
// to_text
// ============================================================================

#[test]
fn to_text_renders_scalars() {
    assert_eq!(Value::string("hi").to_text().unwrap(), "hi");
    assert_eq!(Value::int(-42).to_text().unwrap(), "-42");
    assert_eq!(Value::float(2.5).to_text().unwrap(), "2.5");
    assert_eq!(Value::float(1.0).to_text().unwrap(), "1");
    assert_eq!(Value::double(0.1).to_text().unwrap(), "0.1");
    assert_eq!(Value::boolean(true).to_text().unwrap(), "true");
    assert_eq!(Value::boolean(false).to_text().unwrap(), "false");
}

#[test]
fn to_text_rejects_containers() {
    assert_invalid_cast(Value::new_list().to_text().unwrap_err(), Kind::List, Kind::String);
    assert_invalid_cast(Value::new_map().to_text().unwrap_err(), Kind::Map, Kind::String);
}

#[test]
fn string_try_from_delegates_to_to_text() {
    let s = String::try_from(&Value::int(7)).unwrap();
    assert_eq!(s, "7");
    assert!(String::try_from(&Value::new_list()).is_err());
}

// ============================================================================
// Numeric conversions
// ============================================================================

#[test]
fn to_float_accepts_float_family_and_widens_int() {
    assert_eq!(Value::float(1.5).to_float().unwrap(), 1.5);
    assert_eq!(Value::double(1.5).to_float().unwrap(), 1.5);
    assert_eq!(Value::int(3).to_float().unwrap(), 3.0);
}

#[test]
fn to_float_rejects_non_numeric() {
    assert_invalid_cast(Value::string("1.5").to_float().unwrap_err(), Kind::String, Kind::Float);
    assert_invalid_cast(Value::boolean(true).to_float().unwrap_err(), Kind::Bool, Kind::Float);
}

#[test]
fn to_double_is_lossless_for_double() {
    assert_eq!(Value::double(0.1).to_double().unwrap(), 0.1);
    assert_eq!(Value::float(0.5).to_double().unwrap(), 0.5);
    assert_eq!(Value::int(-2).to_double().unwrap(), -2.0);
    assert!(Value::new_map().to_double().is_err());
}

#[test]
fn to_int_only_accepts_int() {
    assert_eq!(Value::int(i64::MAX).to_int().unwrap(), i64::MAX);
    assert_invalid_cast(Value::float(1.0).to_int().unwrap_err(), Kind::Float, Kind::Int);
    assert_invalid_cast(Value::double(1.0).to_int().unwrap_err(), Kind::Double, Kind::Int);
}

#[test]
fn to_int_never_parses_strings() {
    assert_invalid_cast(Value::string("12").to_int().unwrap_err(), Kind::String, Kind::Int);
}

#[test]
fn numeric_try_from_impls() {
    assert_eq!(i64::try_from(&Value::int(9)).unwrap(), 9);
    assert_eq!(f32::try_from(&Value::int(9)).unwrap(), 9.0);
    assert_eq!(f64::try_from(&Value::double(9.25)).unwrap(), 9.25);
    assert!(i64::try_from(&Value::float(9.0)).is_err());
}

// ============================================================================
// to_bool
// ============================================================================

#[test]
fn to_bool_only_accepts_bool() {
    assert!(Value::boolean(true).to_bool().unwrap());
    assert!(!bool::try_from(&Value::boolean(false)).unwrap());
    assert_invalid_cast(Value::int(1).to_bool().unwrap_err(), Kind::Int, Kind::Bool);
    assert_invalid_cast(Value::string("true").to_bool().unwrap_err(), Kind::String, Kind::Bool);
}

// ============================================================================
// to_list / to_map: live containers
// ============================================================================

#[test]
fn to_list_returns_the_live_container() {
    let v = Value::new_list();
    let raw = v.to_list().unwrap();
    raw.borrow_mut().push(Value::int(1));

    assert_eq!(v.count().unwrap(), 1);
    assert_eq!(v.get(0).unwrap(), Value::int(1));
}

#[test]
fn mutation_through_value_is_visible_in_converted_list() {
    let v = Value::new_list();
    let raw = v.to_list().unwrap();
    v.push(Value::string("x")).unwrap();

    assert_eq!(raw.borrow().len(), 1);
}

#[test]
fn to_map_returns_the_live_container() {
    let v = Value::new_map();
    let raw = v.to_map().unwrap();
    raw.borrow_mut().insert("k".to_string(), Value::boolean(true));

    assert!(v.contains_key("k").unwrap());
    assert_eq!(v.get("k").unwrap(), Value::boolean(true));
}

#[test]
fn container_conversions_reject_other_tags() {
    assert_invalid_cast(Value::new_map().to_list().unwrap_err(), Kind::Map, Kind::List);
    assert_invalid_cast(Value::new_list().to_map().unwrap_err(), Kind::List, Kind::Map);
    assert_invalid_cast(Value::int(1).to_list().unwrap_err(), Kind::Int, Kind::List);
}

#[test]
fn as_str_borrows_only_strings() {
    assert_eq!(Value::string("abc").as_str(), Some("abc"));
    assert_eq!(Value::int(1).as_str(), None);
}

// ============================================================================
// Display
// ============================================================================

#[test]
fn display_matches_to_text_for_scalars() {
    for v in [
        Value::string("s"),
        Value::int(12),
        Value::float(0.25),
        Value::double(1e-3),
        Value::boolean(false),
    ] {
        assert_eq!(v.to_string(), v.to_text().unwrap());
    }
}

#[test]
fn display_renders_containers_without_failing() {
    let list: Value = vec![Value::int(1), Value::string("a")].into();
    assert_eq!(list.to_string(), r#"[1, "a"]"#);

    let map = Value::new_map();
    map.set("b", Value::boolean(true)).unwrap();
    map.set("a", list).unwrap();
    assert_eq!(map.to_string(), r#"{"a": [1, "a"], "b": true}"#);
}
