//! Error types for value conversion, operators and container access.

use crate::value::Kind;
use thiserror::Error;

/// Errors raised by `Value` operations. All of them are reported at the point
/// of violation and leave every operand unchanged.
#[derive(Error, Debug)]
pub enum ValueError {
    /// A `to_*` conversion asked for a type the active variant cannot produce.
    #[error("Invalid cast from {from} to {to}")]
    InvalidCast { from: Kind, to: Kind },

    /// An operator or container operation does not support these variants.
    #[error("Incompatible types for `{op}`: {}", describe_operands(.lhs, .rhs))]
    IncompatibleTypes {
        op: &'static str,
        lhs: Kind,
        rhs: Option<Kind>,
    },

    /// List index outside `[0, len)`.
    #[error("Index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Map read of a key that is not present.
    #[error("Key not found: {0:?}")]
    KeyNotFound(String),

    /// Strict map insert of a key that is already present.
    #[error("Key already exists: {0:?}")]
    KeyAlreadyExists(String),

    /// The container is currently borrowed through a handle from
    /// `to_list`/`to_map` in a way that conflicts with this operation.
    #[error("Container is already borrowed; `{op}` cannot access it")]
    ContainerBorrowed { op: &'static str },

    /// Integer division or remainder with a zero divisor.
    #[error("Integer division by zero")]
    DivideByZero,

    /// The input string was not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A JSON value with no `Value` counterpart (e.g. `null`).
    #[error("Unsupported JSON value: {0}")]
    UnsupportedJson(String),

    /// NaN or an infinity cannot be written as a JSON number.
    #[error("Non-finite number cannot be represented in JSON")]
    NonFiniteNumber,
}

impl ValueError {
    pub(crate) fn incompatible(op: &'static str, lhs: Kind, rhs: Option<Kind>) -> Self {
        ValueError::IncompatibleTypes { op, lhs, rhs }
    }
}

fn describe_operands(lhs: &Kind, rhs: &Option<Kind>) -> String {
    match rhs {
        Some(rhs) => format!("{} and {}", lhs, rhs),
        None => lhs.to_string(),
    }
}

/// Convenience alias used throughout dynval-core.
pub type Result<T> = std::result::Result<T, ValueError>;
