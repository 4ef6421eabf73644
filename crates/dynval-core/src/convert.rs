//! Typed conversion out of a [`Value`].
//!
//! Conversions are strict unwraps. The only coercions are rendering scalars to
//! text and widening `Int` to a float. No string is ever parsed into a number,
//! and no float is ever narrowed to an integer.

use crate::error::{Result, ValueError};
use crate::value::{Kind, ListRef, MapRef, Value};

impl Value {
    fn cast_error(&self, to: Kind) -> ValueError {
        ValueError::InvalidCast {
            from: self.kind(),
            to,
        }
    }

    /// Textual form of a scalar: the string itself, or the default formatting
    /// of the number or boolean (`42`, `2.5`, `true`). Fails for containers.
    pub fn to_text(&self) -> Result<String> {
        match self {
            Value::String(s) => Ok(s.clone()),
            Value::Int(i) => Ok(i.to_string()),
            Value::Float(f) => Ok(f.to_string()),
            Value::Double(d) => Ok(d.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::List(_) | Value::Map(_) => Err(self.cast_error(Kind::String)),
        }
    }

    /// Single-precision view of a numeric value. `Int` is widened with `as`;
    /// `Double` is rounded to the nearest `f32`.
    pub fn to_float(&self) -> Result<f32> {
        match self {
            Value::Float(f) => Ok(*f),
            Value::Double(d) => Ok(*d as f32),
            Value::Int(i) => Ok(*i as f32),
            _ => Err(self.cast_error(Kind::Float)),
        }
    }

    /// Double-precision view of a numeric value. Lossless for `Double` and
    /// `Float`; `Int` is widened with `as`.
    pub fn to_double(&self) -> Result<f64> {
        match self {
            Value::Double(d) => Ok(*d),
            Value::Float(f) => Ok(f64::from(*f)),
            Value::Int(i) => Ok(*i as f64),
            _ => Err(self.cast_error(Kind::Double)),
        }
    }

    pub fn to_int(&self) -> Result<i64> {
        match self {
            Value::Int(i) => Ok(*i),
            _ => Err(self.cast_error(Kind::Int)),
        }
    }

    pub fn to_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            _ => Err(self.cast_error(Kind::Bool)),
        }
    }

    /// The live list container, not a copy.
    ///
    /// The returned handle shares ownership with `self`: pushing through it is
    /// visible through this value and every other clone of it.
    ///
    /// Holding `borrow_mut()` on the handle while calling container
    /// operations on the value makes those operations fail with
    /// [`ValueError::ContainerBorrowed`]. Read what you need from the value
    /// first, then borrow the handle.
    pub fn to_list(&self) -> Result<ListRef> {
        match self {
            Value::List(items) => Ok(ListRef::clone(items)),
            _ => Err(self.cast_error(Kind::List)),
        }
    }

    /// The live map container, not a copy. Shares ownership like [`Value::to_list`].
    pub fn to_map(&self) -> Result<MapRef> {
        match self {
            Value::Map(entries) => Ok(MapRef::clone(entries)),
            _ => Err(self.cast_error(Kind::Map)),
        }
    }

    /// Borrow the string payload without copying.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl TryFrom<&Value> for String {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self> {
        value.to_text()
    }
}

impl TryFrom<&Value> for i64 {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self> {
        value.to_int()
    }
}

impl TryFrom<&Value> for f32 {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self> {
        value.to_float()
    }
}

impl TryFrom<&Value> for f64 {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self> {
        value.to_double()
    }
}

impl TryFrom<&Value> for bool {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self> {
        value.to_bool()
    }
}
