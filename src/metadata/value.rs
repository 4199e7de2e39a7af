//! Dynamic values stored in fields and passed to and from methods.
//!
//! [`Value`] covers the primitive types of the object model, strings, object references and
//! arrays. Every field, parameter and property declares a [`ValueKind`]; writes and
//! invocations check assignability against it before touching any storage.
//!
//! # Kind Mapping
//!
//! | Declared kind | Accepted values |
//! |---------------|-----------------|
//! | [`ValueKind::Object`] | any value except [`Value::Void`] |
//! | [`ValueKind::String`], [`ValueKind::Array`] | values of that kind, or [`Value::Null`] |
//! | any other kind | values of exactly that kind |
//!
//! # Examples
//!
//! ```rust
//! use dotreflect::metadata::value::{Value, ValueKind};
//!
//! let value = Value::from(42);
//! assert_eq!(value.kind(), ValueKind::I4);
//! assert!(value.is_assignable_to(ValueKind::I4));
//! assert!(value.is_assignable_to(ValueKind::Object));
//! assert!(!value.is_assignable_to(ValueKind::I8));
//! assert!(Value::Null.is_assignable_to(ValueKind::String));
//! ```

use std::{fmt, sync::Arc};

use strum::{Display, EnumIter, EnumString};

use crate::metadata::object::ObjectRc;

/// The declared kind of a field, parameter, property or return value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum ValueKind {
    /// No value, only valid as a method return kind
    Void,
    /// The null reference
    Null,
    /// `System.Boolean`
    Bool,
    /// `System.Char`
    Char,
    /// `System.Int32`
    I4,
    /// `System.Int64`
    I8,
    /// `System.UInt32`
    U4,
    /// `System.UInt64`
    U8,
    /// `System.Single`
    R4,
    /// `System.Double`
    R8,
    /// `System.String`
    String,
    /// `System.Object`, or any class type
    Object,
    /// Single-dimensional array
    Array,
}

/// A runtime value
#[derive(Clone, Debug)]
pub enum Value {
    /// No value, returned by methods without a result
    Void,
    /// The null reference
    Null,
    /// Boolean value
    Bool(bool),
    /// Character value
    Char(char),
    /// Signed 32-bit integer
    I4(i32),
    /// Signed 64-bit integer
    I8(i64),
    /// Unsigned 32-bit integer
    U4(u32),
    /// Unsigned 64-bit integer
    U8(u64),
    /// 32-bit floating point
    R4(f32),
    /// 64-bit floating point
    R8(f64),
    /// Immutable string
    String(Arc<str>),
    /// Reference to an object instance
    Object(ObjectRc),
    /// Single-dimensional array of values
    Array(Vec<Value>),
}

impl Value {
    /// The kind of this value
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Void => ValueKind::Void,
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Char(_) => ValueKind::Char,
            Value::I4(_) => ValueKind::I4,
            Value::I8(_) => ValueKind::I8,
            Value::U4(_) => ValueKind::U4,
            Value::U8(_) => ValueKind::U8,
            Value::R4(_) => ValueKind::R4,
            Value::R8(_) => ValueKind::R8,
            Value::String(_) => ValueKind::String,
            Value::Object(_) => ValueKind::Object,
            Value::Array(_) => ValueKind::Array,
        }
    }

    /// Returns `true` if this value can be stored in a slot of kind `kind`
    #[must_use]
    pub fn is_assignable_to(&self, kind: ValueKind) -> bool {
        match (self, kind) {
            (Value::Void, _) => false,
            (_, ValueKind::Object) => true,
            (Value::Null, ValueKind::String | ValueKind::Array | ValueKind::Null) => true,
            (value, kind) => value.kind() == kind,
        }
    }

    /// The zero value a fresh slot of kind `kind` holds
    #[must_use]
    pub fn default_for(kind: ValueKind) -> Value {
        match kind {
            ValueKind::Void => Value::Void,
            ValueKind::Bool => Value::Bool(false),
            ValueKind::Char => Value::Char('\0'),
            ValueKind::I4 => Value::I4(0),
            ValueKind::I8 => Value::I8(0),
            ValueKind::U4 => Value::U4(0),
            ValueKind::U8 => Value::U8(0),
            ValueKind::R4 => Value::R4(0.0),
            ValueKind::R8 => Value::R8(0.0),
            ValueKind::Null | ValueKind::String | ValueKind::Object | ValueKind::Array => {
                Value::Null
            }
        }
    }

    /// Returns `true` for [`Value::Null`]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The contained `bool`, if this is a [`Value::Bool`]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// The contained `i32`, if this is a [`Value::I4`]
    #[must_use]
    pub fn as_i4(&self) -> Option<i32> {
        match self {
            Value::I4(value) => Some(*value),
            _ => None,
        }
    }

    /// The contained `i64`, if this is a [`Value::I8`]
    #[must_use]
    pub fn as_i8(&self) -> Option<i64> {
        match self {
            Value::I8(value) => Some(*value),
            _ => None,
        }
    }

    /// The contained `f64`, if this is a [`Value::R8`]
    #[must_use]
    pub fn as_r8(&self) -> Option<f64> {
        match self {
            Value::R8(value) => Some(*value),
            _ => None,
        }
    }

    /// The contained string, if this is a [`Value::String`]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(&**value),
            _ => None,
        }
    }

    /// The contained object reference, if this is a [`Value::Object`]
    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectRc> {
        match self {
            Value::Object(value) => Some(value),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Void, Value::Void) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::I4(a), Value::I4(b)) => a == b,
            (Value::I8(a), Value::I8(b)) => a == b,
            (Value::U4(a), Value::U4(b)) => a == b,
            (Value::U8(a), Value::U8(b)) => a == b,
            (Value::R4(a), Value::R4(b)) => a == b,
            (Value::R8(a), Value::R8(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            // Reference equality, as for CLI object references
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            (Value::Array(a), Value::Array(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Void => f.write_str("void"),
            Value::Null => f.write_str("null"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Char(value) => write!(f, "'{value}'"),
            Value::I4(value) => write!(f, "{value}"),
            Value::I8(value) => write!(f, "{value}L"),
            Value::U4(value) => write!(f, "{value}U"),
            Value::U8(value) => write!(f, "{value}UL"),
            Value::R4(value) => write!(f, "{value}f"),
            Value::R8(value) => write!(f, "{value}"),
            Value::String(value) => write!(f, "\"{value}\""),
            Value::Object(object) => match object.runtime_type() {
                Some(ty) => write!(f, "{}", ty.full_name()),
                None => f.write_str("<object>"),
            },
            Value::Array(values) => write!(f, "[{} element(s)]", values.len()),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Char(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::I4(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::I8(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::U4(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::U8(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::R4(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::R8(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(Arc::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(Arc::from(value))
    }
}

impl From<ObjectRc> for Value {
    fn from(value: ObjectRc) -> Self {
        Value::Object(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Array(values)
    }
}
