//! The `Value` tagged union.
//!
//! A `Value` holds exactly one of seven variants. Scalar payloads are
//! immutable once constructed; operators always return a new `Value`. The
//! `List` and `Map` variants own their container through a shared handle
//! (`Rc<RefCell<..>>`), so cloning a container `Value` or converting it out with
//! [`Value::to_list`]/[`Value::to_map`] yields another owner of the *same*
//! container. Mutations made through any owner are visible through all of
//! them, and `==` on containers compares that identity, not contents.
//!
//! Values are single-threaded (`!Send`, `!Sync`). Callers that share a value
//! tree across threads must convert it (e.g. through JSON) and provide their
//! own synchronization.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::{Result, ValueError};

/// Ordered list payload.
pub type List = Vec<Value>;

/// Map payload. Iteration order is unspecified.
pub type Map = HashMap<String, Value>;

/// Shared, mutable handle to a list payload.
pub type ListRef = Rc<RefCell<List>>;

/// Shared, mutable handle to a map payload.
pub type MapRef = Rc<RefCell<Map>>;

/// A dynamically-typed value.
///
/// `Double` records that a value came from a double-precision source. In every
/// operator it behaves exactly like `Float`: float-family arithmetic produces
/// `Float`, and `Float`/`Double` compare by numeric value.
#[derive(Debug, Clone)]
pub enum Value {
    String(String),
    Int(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    List(ListRef),
    Map(MapRef),
}

/// The active variant of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Int,
    Float,
    Double,
    Bool,
    List,
    Map,
}

impl Kind {
    /// `Int`, `Float` or `Double`.
    pub fn is_numeric(self) -> bool {
        matches!(self, Kind::Int | Kind::Float | Kind::Double)
    }

    /// `List` or `Map`.
    pub fn is_container(self) -> bool {
        matches!(self, Kind::List | Kind::Map)
    }

    pub fn name(self) -> &'static str {
        match self {
            Kind::String => "String",
            Kind::Int => "Int",
            Kind::Float => "Float",
            Kind::Double => "Double",
            Kind::Bool => "Bool",
            Kind::List => "List",
            Kind::Map => "Map",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    pub fn int(i: i64) -> Self {
        Value::Int(i)
    }

    pub fn float(f: f32) -> Self {
        Value::Float(f)
    }

    /// Stored as `Double`; not collapsed to `Float` at construction.
    pub fn double(d: f64) -> Self {
        Value::Double(d)
    }

    pub fn boolean(b: bool) -> Self {
        Value::Bool(b)
    }

    /// Wrap `items` in a new list container owned by the returned value.
    pub fn list(items: List) -> Self {
        Value::List(Rc::new(RefCell::new(items)))
    }

    /// Wrap `entries` in a new map container owned by the returned value.
    pub fn map(entries: Map) -> Self {
        Value::Map(Rc::new(RefCell::new(entries)))
    }

    pub fn new_list() -> Self {
        Value::list(List::new())
    }

    pub fn new_map() -> Self {
        Value::map(Map::new())
    }

    /// The active variant tag.
    pub fn kind(&self) -> Kind {
        match self {
            Value::String(_) => Kind::String,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Double(_) => Kind::Double,
            Value::Bool(_) => Kind::Bool,
            Value::List(_) => Kind::List,
            Value::Map(_) => Kind::Map,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    /// True for both `Float` and `Double`.
    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_) | Value::Double(_))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Copy this value with fresh containers all the way down.
    ///
    /// `clone()` shares list and map payloads with the original; `deep_clone()`
    /// is the way to opt out of that aliasing. Fails with
    /// [`ValueError::ContainerBorrowed`] when a nested container is mutably
    /// borrowed through a live handle.
    pub fn deep_clone(&self) -> Result<Value> {
        match self {
            Value::List(items) => items
                .try_borrow()
                .map_err(|_| ValueError::ContainerBorrowed { op: "deep_clone" })?
                .iter()
                .map(Value::deep_clone)
                .collect::<Result<List>>()
                .map(Value::list),
            Value::Map(entries) => entries
                .try_borrow()
                .map_err(|_| ValueError::ContainerBorrowed { op: "deep_clone" })?
                .iter()
                .map(|(k, v)| v.deep_clone().map(|v| (k.clone(), v)))
                .collect::<Result<Map>>()
                .map(Value::map),
            scalar => Ok(scalar.clone()),
        }
    }
}

/// Scalars render their `to_text()` form. Containers render bracketed, with
/// string elements quoted, so `Display` never fails. A container that is
/// mutably borrowed through a live handle renders as `<borrowed>`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Double(x) => write!(f, "{}", x),
            Value::Bool(b) => write!(f, "{}", b),
            Value::List(items) => {
                let Ok(items) = items.try_borrow() else {
                    return f.write_str(BORROWED);
                };
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    fmt_nested(item, f)?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                let Ok(entries) = entries.try_borrow() else {
                    return f.write_str(BORROWED);
                };
                let mut keys: Vec<&String> = entries.keys().collect();
                keys.sort();
                f.write_str("{")?;
                for (i, key) in keys.into_iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{:?}: ", key)?;
                    fmt_nested(&entries[key], f)?;
                }
                f.write_str("}")
            }
        }
    }
}

const BORROWED: &str = "<borrowed>";

fn fmt_nested(value: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value {
        Value::String(s) => write!(f, "{:?}", s),
        other => write!(f, "{}", other),
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<List> for Value {
    fn from(items: List) -> Self {
        Value::list(items)
    }
}

impl From<Map> for Value {
    fn from(entries: Map) -> Self {
        Value::map(entries)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::list(iter.into_iter().collect())
    }
}
