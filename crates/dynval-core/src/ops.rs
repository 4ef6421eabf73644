//! Arithmetic and equality on [`Value`].
//!
//! `+ - * /` dispatch on the operand tags in a fixed order:
//!
//! 1. `Int` with `Int` → `Int` (wrapping; `/` truncates toward zero)
//! 2. `Float`/`Double` with `Float`/`Double` → `Float`
//! 3. `Int` with `Float`/`Double`, either order → `Float` (the `Int` is widened)
//! 4. `+` only: either side `String` → `String`, the two texts concatenated
//! 5. anything else → [`ValueError::IncompatibleTypes`]
//!
//! `%` is narrower: only `Int % Int` is defined.
//!
//! Integer `/` and `%` by zero fail with [`ValueError::DivideByZero`]. Float
//! division by zero is not an error and yields an infinity or NaN.
//!
//! Equality compares tags first. `Int(1) != Float(1.0)`. `Float` and `Double`
//! are one numeric family: a `Float` compared with a `Double` rounds the
//! `Double` to single precision, while two `Double`s compare at full double
//! precision (`1e300 != 1e301`). Comparison is exact IEEE-754, so NaN is
//! unequal to everything. Containers are equal only when they are the same
//! container.

use std::fmt;
use std::ops::{Add, Div, Mul, Rem, Sub};
use std::rc::Rc;

use crate::error::{Result, ValueError};
use crate::value::Value;

/// A binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl ArithOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
            ArithOp::Rem => "%",
        }
    }

    /// Apply this operator to `lhs` and `rhs`.
    pub fn apply(self, lhs: &Value, rhs: &Value) -> Result<Value> {
        let incompatible = || ValueError::incompatible(self.symbol(), lhs.kind(), Some(rhs.kind()));

        if let (Value::Int(a), Value::Int(b)) = (lhs, rhs) {
            return int_arith(self, *a, *b).map(Value::Int);
        }
        // Int/Int was handled above, so this covers float/float and the mixed case.
        if let (Some(a), Some(b)) = (float_operand(lhs), float_operand(rhs)) {
            return float_arith(self, a, b).map(Value::Float).ok_or_else(incompatible);
        }
        if self == ArithOp::Add && (lhs.is_string() || rhs.is_string()) {
            let left = lhs.to_text().map_err(|_| incompatible())?;
            let right = rhs.to_text().map_err(|_| incompatible())?;
            return Ok(Value::String(left + &right));
        }
        Err(incompatible())
    }
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Numeric operand for the float path: `Float`, `Double`, or a widened `Int`.
fn float_operand(value: &Value) -> Option<f32> {
    match value {
        Value::Float(f) => Some(*f),
        Value::Double(d) => Some(*d as f32),
        Value::Int(i) => Some(*i as f32),
        _ => None,
    }
}

fn int_arith(op: ArithOp, a: i64, b: i64) -> Result<i64> {
    match op {
        ArithOp::Add => Ok(a.wrapping_add(b)),
        ArithOp::Sub => Ok(a.wrapping_sub(b)),
        ArithOp::Mul => Ok(a.wrapping_mul(b)),
        ArithOp::Div if b == 0 => Err(ValueError::DivideByZero),
        ArithOp::Div => Ok(a.wrapping_div(b)),
        ArithOp::Rem if b == 0 => Err(ValueError::DivideByZero),
        ArithOp::Rem => Ok(a.wrapping_rem(b)),
    }
}

/// `None` for `%`: there is no float remainder.
fn float_arith(op: ArithOp, a: f32, b: f32) -> Option<f32> {
    match op {
        ArithOp::Add => Some(a + b),
        ArithOp::Sub => Some(a - b),
        ArithOp::Mul => Some(a * b),
        ArithOp::Div => Some(a / b),
        ArithOp::Rem => None,
    }
}

impl Value {
    pub fn try_add(&self, rhs: &Value) -> Result<Value> {
        ArithOp::Add.apply(self, rhs)
    }

    pub fn try_sub(&self, rhs: &Value) -> Result<Value> {
        ArithOp::Sub.apply(self, rhs)
    }

    pub fn try_mul(&self, rhs: &Value) -> Result<Value> {
        ArithOp::Mul.apply(self, rhs)
    }

    pub fn try_div(&self, rhs: &Value) -> Result<Value> {
        ArithOp::Div.apply(self, rhs)
    }

    pub fn try_rem(&self, rhs: &Value) -> Result<Value> {
        ArithOp::Rem.apply(self, rhs)
    }

    /// Structural equality.
    ///
    /// Follows the same tag rules as `==`, but lists and maps compare by
    /// contents, recursively. Fails with [`ValueError::ContainerBorrowed`]
    /// when a container is mutably borrowed through a live handle. A
    /// container that contains itself makes this recurse without bound.
    pub fn deep_eq(&self, other: &Value) -> Result<bool> {
        let borrowed = |_| ValueError::ContainerBorrowed { op: "deep_eq" };
        match (self, other) {
            (Value::List(a), Value::List(b)) => {
                if Rc::ptr_eq(a, b) {
                    return Ok(true);
                }
                let a = a.try_borrow().map_err(borrowed)?;
                let b = b.try_borrow().map_err(borrowed)?;
                if a.len() != b.len() {
                    return Ok(false);
                }
                for (x, y) in a.iter().zip(b.iter()) {
                    if !x.deep_eq(y)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            (Value::Map(a), Value::Map(b)) => {
                if Rc::ptr_eq(a, b) {
                    return Ok(true);
                }
                let a = a.try_borrow().map_err(borrowed)?;
                let b = b.try_borrow().map_err(borrowed)?;
                if a.len() != b.len() {
                    return Ok(false);
                }
                for (k, x) in a.iter() {
                    match b.get(k) {
                        Some(y) if x.deep_eq(y)? => {}
                        _ => return Ok(false),
                    }
                }
                Ok(true)
            }
            _ => Ok(self == other),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Rc::ptr_eq(a, b),
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Float(_) | Value::Double(_), Value::Float(_) | Value::Double(_)) => {
                float_operand(self) == float_operand(other)
            }
            _ => false,
        }
    }
}

macro_rules! impl_arith_operator {
    ($trait:ident, $method:ident, $op:expr) => {
        impl $trait<&Value> for &Value {
            type Output = Result<Value>;

            fn $method(self, rhs: &Value) -> Result<Value> {
                $op.apply(self, rhs)
            }
        }

        impl $trait<Value> for Value {
            type Output = Result<Value>;

            fn $method(self, rhs: Value) -> Result<Value> {
                $op.apply(&self, &rhs)
            }
        }
    };
}

impl_arith_operator!(Add, add, ArithOp::Add);
impl_arith_operator!(Sub, sub, ArithOp::Sub);
impl_arith_operator!(Mul, mul, ArithOp::Mul);
impl_arith_operator!(Div, div, ArithOp::Div);
impl_arith_operator!(Rem, rem, ArithOp::Rem);
