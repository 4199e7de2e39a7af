//! Name-based member access on objects and types.
//!
//! Every operation takes the member name and optional [`BindingFlags`](crate::BindingFlags).
//! Without flags, the defaults of the operation's [`BindingMode`](crate::BindingMode) apply;
//! explicit flags are used verbatim (property operations always add the property capability
//! flag they need).
//!
//! # Operations
//!
//! | Operation | Available on | Default mode |
//! |-----------|--------------|--------------|
//! | `get_field_value`, `set_field_value` | [`Object`] | `NonStatic` |
//! | `get_property_value`, `set_property_value` | [`Object`] | `NonStatic` |
//! | `invoke_method` | [`Object`] | `NonStatic` |
//! | [`FieldAccess`]: static field access | [`Object`], [`TypeRc`] | `Static` |
//! | [`MethodAccess`]: `invoke_static_method` | [`Object`], [`TypeRc`] | `Static` |
//! | field and property attribute queries | [`Object`], [`TypeRc`] | `NonStatic` |
//! | method attribute queries | [`Object`], [`TypeRc`] | `Generic` |
//! | [`PropertyAccess::properties_with_custom_attribute`] | [`Object`], [`TypeRc`] | `Generic` |
//! | [`AttributeAccess::member_custom_attributes`] | [`Object`], [`TypeRc`] | `Generic` |
//! | `field_info`, `property_info`, `method_info` | [`Object`], [`TypeRc`] | explicit flags only |
//!
//! The traits are implemented for everything that is [`Reflected`]: lookups through an
//! object start at the object's runtime type, lookups through a type start at that type.
//!
//! # Examples
//!
//! ```rust
//! use dotreflect::prelude::*;
//!
//! let registry = TypeRegistry::new();
//! let settings = registry
//!     .builder("Sample", "Settings")
//!     .field(FieldBuilder::new("instances", ValueKind::I4).static_())
//!     .field(FieldBuilder::new("theme", ValueKind::String))
//!     .build()?;
//!
//! let object = Object::new(&settings);
//! object.set_field_value("Theme", Value::from("dark"), None)?;
//! assert_eq!(object.get_field_value("theme", None)?, Value::from("dark"));
//!
//! settings.set_static_field_value("instances", Value::I4(1), None)?;
//! assert_eq!(object.get_static_field_value("INSTANCES", None)?, Value::I4(1));
//! # Ok::<(), dotreflect::Error>(())
//! ```

mod attributes;
mod field;
mod method;
mod property;

pub use attributes::AttributeAccess;
pub use field::FieldAccess;
pub use method::MethodAccess;
pub use property::PropertyAccess;

use crate::metadata::{object::Object, typesystem::TypeRc};

/// Anything member lookups can start from
pub trait Reflected {
    /// The type lookups start at; `None` fails every lookup with
    /// [`Error::NoType`](crate::Error::NoType)
    fn reflected_type(&self) -> Option<TypeRc>;
}

impl Reflected for Object {
    fn reflected_type(&self) -> Option<TypeRc> {
        self.runtime_type()
    }
}

impl Reflected for TypeRc {
    fn reflected_type(&self) -> Option<TypeRc> {
        Some(self.clone())
    }
}
