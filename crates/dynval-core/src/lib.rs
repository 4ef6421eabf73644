//! # dynval-core
//!
//! A dynamically-typed value container: one [`Value`] type that holds a string,
//! an integer, a float, a boolean, a list or a string-keyed map, with operators
//! that branch on the runtime tag.
//!
//! Every coercion is explicit. Values are built with the `Value::*` factories
//! (or `From`), read back with the fallible `to_*` conversions, and combined
//! with arithmetic and equality operators whose cross-type promotion rules are
//! fixed: `Int + Int` stays `Int`, anything mixing `Int` with a float becomes
//! `Float`, and `+` falls back to string concatenation when either side is a
//! `String`.
//!
//! ## Quick start
//!
//! ```rust
//! use dynval_core::Value;
//!
//! let sum = (&Value::int(1) + &Value::float(2.5)).unwrap();
//! assert_eq!(sum.to_float().unwrap(), 3.5);
//!
//! let label = (&Value::int(1) + &Value::string("x")).unwrap();
//! assert_eq!(label.to_text().unwrap(), "1x");
//!
//! let list = Value::new_list();
//! list.push(Value::boolean(true)).unwrap();
//! assert_eq!(list.count().unwrap(), 1);
//! ```
//!
//! ## Modules
//!
//! - [`value`]: the `Value` tagged union, its factories and `Kind`
//! - [`convert`]: typed conversion out of a `Value` (`to_int`, `to_list`, ...)
//! - [`ops`]: arithmetic (`+ - * / %`), equality and deep equality
//! - [`container`]: list and map passthrough operations
//! - [`json`]: `serde_json` bridge and serde impls
//! - [`error`]: error taxonomy

pub mod container;
pub mod convert;
pub mod error;
pub mod json;
pub mod ops;
pub mod value;

pub use container::Index;
pub use error::ValueError;
pub use ops::ArithOp;
pub use value::{Kind, List, ListRef, Map, MapRef, Value};
