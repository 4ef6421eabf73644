//! List and map passthrough operations.
//!
//! Every operation checks the receiver's tag and fails with
//! [`ValueError::IncompatibleTypes`] when it does not match. Mutating
//! operations take `&self`: the container lives behind a shared handle, so a
//! mutation through one owner is visible through every clone of the value.
//!
//! A handle obtained from [`Value::to_list`]/[`Value::to_map`] may hold a
//! `RefCell` borrow of the same container. While it does, operations that
//! conflict with that borrow fail with [`ValueError::ContainerBorrowed`]
//! instead of panicking.
//!
//! Elements are returned by value. For scalars that is a copy; for a nested
//! list or map it is another owner of the same container, so identity
//! (and therefore `==`) is preserved across `get`.

use std::cell::{Ref, RefMut};

use crate::error::{Result, ValueError};
use crate::value::{List, Map, Value};

mod private {
    pub trait Sealed {}
    impl Sealed for usize {}
    impl Sealed for str {}
    impl Sealed for String {}
    impl<T> Sealed for &T where T: ?Sized + Sealed {}
}

/// A position in a list (`usize`) or a key in a map (`str`/`String`).
///
/// Lets [`Value::get`], [`Value::set`] and [`Value::remove`] accept either.
/// This trait is sealed.
pub trait Index: private::Sealed {
    #[doc(hidden)]
    fn index_get(&self, v: &Value) -> Result<Value>;

    #[doc(hidden)]
    fn index_set(&self, v: &Value, value: Value) -> Result<()>;

    #[doc(hidden)]
    fn index_remove(&self, v: &Value) -> Result<Value>;
}

impl Index for usize {
    fn index_get(&self, v: &Value) -> Result<Value> {
        let items = v.list_ref("get")?;
        items.get(*self).cloned().ok_or(ValueError::IndexOutOfRange {
            index: *self,
            len: items.len(),
        })
    }

    fn index_set(&self, v: &Value, value: Value) -> Result<()> {
        let mut items = v.list_mut("set")?;
        let len = items.len();
        match items.get_mut(*self) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(ValueError::IndexOutOfRange { index: *self, len }),
        }
    }

    fn index_remove(&self, v: &Value) -> Result<Value> {
        let mut items = v.list_mut("remove")?;
        if *self < items.len() {
            Ok(items.remove(*self))
        } else {
            Err(ValueError::IndexOutOfRange {
                index: *self,
                len: items.len(),
            })
        }
    }
}

impl Index for str {
    fn index_get(&self, v: &Value) -> Result<Value> {
        v.map_ref("get")?
            .get(self)
            .cloned()
            .ok_or_else(|| ValueError::KeyNotFound(self.to_string()))
    }

    /// Upsert: inserts a missing key, overwrites an existing one.
    fn index_set(&self, v: &Value, value: Value) -> Result<()> {
        v.map_mut("set")?.insert(self.to_string(), value);
        Ok(())
    }

    fn index_remove(&self, v: &Value) -> Result<Value> {
        v.map_mut("remove")?
            .remove(self)
            .ok_or_else(|| ValueError::KeyNotFound(self.to_string()))
    }
}

impl Index for String {
    fn index_get(&self, v: &Value) -> Result<Value> {
        self.as_str().index_get(v)
    }

    fn index_set(&self, v: &Value, value: Value) -> Result<()> {
        self.as_str().index_set(v, value)
    }

    fn index_remove(&self, v: &Value) -> Result<Value> {
        self.as_str().index_remove(v)
    }
}

impl<T> Index for &T
where
    T: ?Sized + Index,
{
    fn index_get(&self, v: &Value) -> Result<Value> {
        (**self).index_get(v)
    }

    fn index_set(&self, v: &Value, value: Value) -> Result<()> {
        (**self).index_set(v, value)
    }

    fn index_remove(&self, v: &Value) -> Result<Value> {
        (**self).index_remove(v)
    }
}

impl Value {
    fn list_ref(&self, op: &'static str) -> Result<Ref<'_, List>> {
        match self {
            Value::List(items) => items.try_borrow().map_err(|_| ValueError::ContainerBorrowed { op }),
            _ => Err(ValueError::incompatible(op, self.kind(), None)),
        }
    }

    fn list_mut(&self, op: &'static str) -> Result<RefMut<'_, List>> {
        match self {
            Value::List(items) => items.try_borrow_mut().map_err(|_| ValueError::ContainerBorrowed { op }),
            _ => Err(ValueError::incompatible(op, self.kind(), None)),
        }
    }

    fn map_ref(&self, op: &'static str) -> Result<Ref<'_, Map>> {
        match self {
            Value::Map(entries) => entries.try_borrow().map_err(|_| ValueError::ContainerBorrowed { op }),
            _ => Err(ValueError::incompatible(op, self.kind(), None)),
        }
    }

    fn map_mut(&self, op: &'static str) -> Result<RefMut<'_, Map>> {
        match self {
            Value::Map(entries) => entries.try_borrow_mut().map_err(|_| ValueError::ContainerBorrowed { op }),
            _ => Err(ValueError::incompatible(op, self.kind(), None)),
        }
    }

    /// Number of elements of a list or entries of a map.
    pub fn count(&self) -> Result<usize> {
        match self {
            Value::List(_) => self.list_ref("count").map(|items| items.len()),
            Value::Map(_) => self.map_ref("count").map(|entries| entries.len()),
            _ => Err(ValueError::incompatible("count", self.kind(), None)),
        }
    }

    pub fn is_empty(&self) -> Result<bool> {
        self.count().map(|n| n == 0)
    }

    /// Read an element by list position or map key.
    ///
    /// ```
    /// use dynval_core::Value;
    ///
    /// let list: Value = vec![Value::int(7)].into();
    /// assert_eq!(list.get(0).unwrap(), Value::int(7));
    ///
    /// let map = Value::new_map();
    /// map.set("k", Value::boolean(true)).unwrap();
    /// assert_eq!(map.get("k").unwrap(), Value::boolean(true));
    /// ```
    pub fn get<I: Index>(&self, index: I) -> Result<Value> {
        index.index_get(self)
    }

    /// Write an element. On a list the position must already exist; on a map
    /// this is an upsert.
    pub fn set<I: Index>(&self, index: I, value: Value) -> Result<()> {
        index.index_set(self, value)
    }

    /// Remove and return an element by list position or map key.
    pub fn remove<I: Index>(&self, index: I) -> Result<Value> {
        index.index_remove(self)
    }

    /// Append to a list.
    pub fn push(&self, value: Value) -> Result<()> {
        self.list_mut("push")?.push(value);
        Ok(())
    }

    /// True when the list holds an element `==` to `value`. Nested containers
    /// match only by identity.
    pub fn contains(&self, value: &Value) -> Result<bool> {
        Ok(self.list_ref("contains")?.iter().any(|item| item == value))
    }

    /// Keys of a map, in storage order.
    pub fn keys(&self) -> Result<Vec<String>> {
        Ok(self.map_ref("keys")?.keys().cloned().collect())
    }

    /// Strict insert into a map: fails with [`ValueError::KeyAlreadyExists`]
    /// instead of overwriting. Use [`Value::set`] to upsert.
    pub fn try_insert(&self, key: impl Into<String>, value: Value) -> Result<()> {
        let key = key.into();
        let mut entries = self.map_mut("try_insert")?;
        if entries.contains_key(&key) {
            return Err(ValueError::KeyAlreadyExists(key));
        }
        entries.insert(key, value);
        Ok(())
    }

    pub fn contains_key(&self, key: &str) -> Result<bool> {
        Ok(self.map_ref("contains_key")?.contains_key(key))
    }

    /// True when some map entry is `==` to `value`. Nested containers match
    /// only by identity.
    pub fn contains_value(&self, value: &Value) -> Result<bool> {
        Ok(self.map_ref("contains_value")?.values().any(|v| v == value))
    }
}
