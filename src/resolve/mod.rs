//! Member resolution over a type hierarchy.
//!
//! Each resolver starts at the requested type and walks towards the root, asking every level
//! for a declared member through [`Introspect`](crate::metadata::introspect::Introspect).
//! The first level with a match wins, so members declared on subclasses shadow those of
//! their ancestors.
//!
//! - Every level is searched with the same flags. `DECLARED_ONLY` and `FLATTEN_HIERARCHY`
//!   are passed to each level unchanged; a level only reports the members it declares, so
//!   neither flag narrows or widens the walk.
//! - A lookup without a type fails with [`Error::NoType`](crate::Error::NoType); a lookup
//!   without a match fails with the missing-member error of its kind, naming the requested
//!   type and the flags in effect.
//!
//! Resolvers return handles. A handle pairs the member with its declaring type and offers
//! the read, write or invoke operation of the member as well as the attribute query of
//! [`MemberHandle`].
//!
//! # Examples
//!
//! ```rust
//! use dotreflect::prelude::*;
//! use dotreflect::resolve::{resolve_field, MemberHandle};
//!
//! let registry = TypeRegistry::new();
//! let base = registry
//!     .builder("Sample", "Base")
//!     .field(FieldBuilder::new("id", ValueKind::I4))
//!     .build()?;
//! let derived = registry.builder("Sample", "Derived").extends(&base).build()?;
//!
//! let flags = resolve_flags(None, BindingMode::NonStatic);
//! let handle = resolve_field(Some(&derived), "ID", flags)?;
//! assert_eq!(handle.name(), "id");
//! assert_eq!(handle.declaring_type().full_name(), "Sample.Base");
//! # Ok::<(), dotreflect::Error>(())
//! ```

mod field;
mod method;
mod property;
mod walker;

pub use field::{resolve_field, FieldHandle};
pub use method::{resolve_method, MethodHandle};
pub use property::{resolve_properties, resolve_property, PropertyAccessor, PropertyHandle};
pub use walker::find_member;

use crate::metadata::{
    customattributes::{read_attributes, CustomAttributeRc},
    introspect::Member,
    typesystem::TypeRc,
};

/// Common surface of resolved members
pub trait MemberHandle {
    /// The resolved member
    fn member(&self) -> Member;

    /// The type declaring the resolved member
    fn declaring_type(&self) -> &TypeRc;

    /// The custom attributes of the resolved member whose type is `category` or derives from
    /// it, or all of them for `None`. With `inherit`, attributes of the same member on
    /// ancestors are included as described in
    /// [`read_attributes`](crate::metadata::customattributes::read_attributes).
    fn custom_attributes(&self, category: Option<&TypeRc>, inherit: bool) -> Vec<CustomAttributeRc> {
        read_attributes(self.declaring_type(), &self.member(), category, inherit)
    }
}
