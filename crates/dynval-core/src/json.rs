//! JSON bridge: build `Value` trees from JSON and write them back out.
//!
//! Mapping:
//!
//! | JSON                        | Value    |
//! |-----------------------------|----------|
//! | string                      | `String` |
//! | integer within `i64`        | `Int`    |
//! | any other number            | `Double` |
//! | `true` / `false`            | `Bool`   |
//! | array                       | `List`   |
//! | object                      | `Map`    |
//! | `null`                      | rejected |
//!
//! Writing goes the other way. `Float` is written with its shortest
//! single-precision text (`0.1`, not `0.10000000149011612`). NaN and the
//! infinities have no JSON form and are rejected.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{self, Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Number;

use crate::error::{Result, ValueError};
use crate::value::{List, Map, Value};

impl Value {
    /// Build a `Value` tree from a parsed JSON value.
    pub fn from_json(json: &serde_json::Value) -> Result<Value> {
        match json {
            serde_json::Value::Null => Err(ValueError::UnsupportedJson("null".to_string())),
            serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
            serde_json::Value::Number(n) => Ok(number_to_value(n)),
            serde_json::Value::String(s) => Ok(Value::String(s.clone())),
            serde_json::Value::Array(items) => items
                .iter()
                .map(Value::from_json)
                .collect::<Result<List>>()
                .map(Value::list),
            serde_json::Value::Object(entries) => entries
                .iter()
                .map(|(k, v)| Value::from_json(v).map(|v| (k.clone(), v)))
                .collect::<Result<Map>>()
                .map(Value::map),
        }
    }

    /// Convert this tree into a `serde_json::Value`. Map keys come out sorted
    /// so the output is stable.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        match self {
            Value::String(s) => Ok(serde_json::Value::String(s.clone())),
            Value::Int(i) => Ok(serde_json::Value::Number(Number::from(*i))),
            Value::Float(f) => float_to_json(*f),
            Value::Double(d) => Number::from_f64(*d)
                .map(serde_json::Value::Number)
                .ok_or(ValueError::NonFiniteNumber),
            Value::Bool(b) => Ok(serde_json::Value::Bool(*b)),
            Value::List(items) => items
                .try_borrow()
                .map_err(|_| ValueError::ContainerBorrowed { op: "to_json" })?
                .iter()
                .map(Value::to_json)
                .collect::<Result<Vec<_>>>()
                .map(serde_json::Value::Array),
            Value::Map(entries) => {
                let entries = entries
                    .try_borrow()
                    .map_err(|_| ValueError::ContainerBorrowed { op: "to_json" })?;
                let mut out = serde_json::Map::new();
                for (key, value) in sorted_entries(&entries) {
                    out.insert(key.clone(), value.to_json()?);
                }
                Ok(serde_json::Value::Object(out))
            }
        }
    }
}

/// Parse JSON text into a `Value` tree.
///
/// ```
/// use dynval_core::json::from_json_str;
///
/// let v = from_json_str(r#"{"n": 1, "x": 1.5}"#).unwrap();
/// assert!(v.get("n").unwrap().is_int());
/// assert!(v.get("x").unwrap().is_float());
/// ```
pub fn from_json_str(json: &str) -> Result<Value> {
    let parsed: serde_json::Value = serde_json::from_str(json)?;
    Value::from_json(&parsed)
}

/// Write a `Value` tree as compact JSON text.
pub fn to_json_string(value: &Value) -> Result<String> {
    Ok(serde_json::to_string(&value.to_json()?)?)
}

/// Write a `Value` tree as indented JSON text.
pub fn to_json_string_pretty(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(&value.to_json()?)?)
}

/// Map entries ordered by key, so every writer emits the same text.
fn sorted_entries(entries: &Map) -> Vec<(&String, &Value)> {
    let mut sorted: Vec<_> = entries.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    sorted
}

fn number_to_value(n: &Number) -> Value {
    match n.as_i64() {
        Some(i) => Value::Int(i),
        // u64 beyond i64::MAX and every non-integer land here.
        None => Value::Double(n.as_f64().unwrap_or(f64::NAN)),
    }
}

fn float_to_json(f: f32) -> Result<serde_json::Value> {
    if !f.is_finite() {
        return Err(ValueError::NonFiniteNumber);
    }
    // Round-trip through the f32 text to avoid widening noise.
    let widened: f64 = f.to_string().parse().unwrap_or(f64::from(f));
    Number::from_f64(widened)
        .map(serde_json::Value::Number)
        .ok_or(ValueError::NonFiniteNumber)
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f32(*f),
            Value::Double(d) => serializer.serialize_f64(*d),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::List(items) => {
                let items = items.try_borrow().map_err(<S::Error as ser::Error>::custom)?;
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(entries) => {
                let entries = entries.try_borrow().map_err(<S::Error as ser::Error>::custom)?;
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in sorted_entries(&entries) {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number, boolean, array or string-keyed map")
    }

    fn visit_bool<E>(self, b: bool) -> std::result::Result<Value, E> {
        Ok(Value::Bool(b))
    }

    fn visit_i64<E>(self, i: i64) -> std::result::Result<Value, E> {
        Ok(Value::Int(i))
    }

    fn visit_u64<E>(self, u: u64) -> std::result::Result<Value, E> {
        Ok(match i64::try_from(u) {
            Ok(i) => Value::Int(i),
            Err(_) => Value::Double(u as f64),
        })
    }

    fn visit_f32<E>(self, f: f32) -> std::result::Result<Value, E> {
        Ok(Value::Float(f))
    }

    fn visit_f64<E>(self, d: f64) -> std::result::Result<Value, E> {
        Ok(Value::Double(d))
    }

    fn visit_str<E>(self, s: &str) -> std::result::Result<Value, E> {
        Ok(Value::String(s.to_string()))
    }

    fn visit_string<E>(self, s: String) -> std::result::Result<Value, E> {
        Ok(Value::String(s))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Value, E> {
        Err(E::custom("null has no Value representation"))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Value, A::Error> {
        let mut items = List::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::list(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Value, A::Error> {
        let mut entries = Map::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((k, v)) = access.next_entry::<String, Value>()? {
            entries.insert(k, v);
        }
        Ok(Value::map(entries))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Value, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}
