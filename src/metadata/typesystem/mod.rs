//! Runtime types, the registry that owns them, and the builders that declare them.
//!
//! # Key Components
//!
//! - [`RuntimeType`]: A type with its declared fields, properties, methods and attributes
//! - [`TypeRef`]: Weak reference to a type, used for base, enclosing and attribute links
//! - [`TypeRegistry`]: Owns every registered type and issues tokens
//! - [`TypeBuilder`]: Fluent declaration of a type and its members
//!
//! # Ownership
//!
//! The registry holds the only strong references to its types. Base types, enclosing types,
//! attribute types and [`Object`](crate::metadata::object::Object) instances refer to types
//! weakly, so a hierarchy never keeps itself alive.
//!
//! # Examples
//!
//! ```rust
//! use dotreflect::prelude::*;
//!
//! let registry = TypeRegistry::new();
//! let shape = registry.builder("Geometry", "Shape").build()?;
//! let circle = registry.builder("Geometry", "Circle").extends(&shape).build()?;
//! let center = registry
//!     .builder("", "Center")
//!     .nested_in(&circle)
//!     .build()?;
//!
//! assert_eq!(center.full_name(), "Geometry.Circle+Center");
//! assert!(circle.is_subclass_of(&shape));
//! assert!(registry.get_by_fullname("Geometry.Circle").is_some());
//! # Ok::<(), dotreflect::Error>(())
//! ```

mod base;
mod builder;
mod registry;

use std::{
    fmt,
    sync::{Arc, OnceLock},
};

pub use base::TypeRef;
pub use builder::{AttributeBuilder, FieldBuilder, MethodBuilder, PropertyBuilder, TypeBuilder};
pub use registry::TypeRegistry;

use crate::{
    binding::BindingFlags,
    metadata::{
        customattributes::{AttributeUsage, CustomAttributeList},
        field::{FieldList, FieldRc},
        introspect::Introspect,
        method::{MethodList, MethodRc},
        property::{PropertyList, PropertyRc},
        token::Token,
    },
};

/// A reference to a `RuntimeType`
pub type TypeRc = Arc<RuntimeType>;

/// A registered type
pub struct RuntimeType {
    /// Token
    pub token: Token,
    /// Namespace, empty for the global namespace and for nested types
    pub namespace: String,
    /// Simple name
    pub name: String,
    /// Fields declared on this type
    pub fields: FieldList,
    /// Properties declared on this type
    pub properties: PropertyList,
    /// Methods declared on this type, property accessors included
    pub methods: MethodList,
    /// Custom attributes applied to this type
    pub custom_attributes: CustomAttributeList,
    base: OnceLock<TypeRef>,
    enclosing: OnceLock<TypeRef>,
    attribute_usage: OnceLock<AttributeUsage>,
}

impl RuntimeType {
    /// Create a new type without members, base or enclosing type
    #[must_use]
    pub fn new(token: Token, namespace: String, name: String) -> Self {
        RuntimeType {
            token,
            namespace,
            name,
            fields: Arc::new(boxcar::Vec::new()),
            properties: Arc::new(boxcar::Vec::new()),
            methods: Arc::new(boxcar::Vec::new()),
            custom_attributes: Arc::new(boxcar::Vec::new()),
            base: OnceLock::new(),
            enclosing: OnceLock::new(),
            attribute_usage: OnceLock::new(),
        }
    }

    /// Access the base type of this type, if it exists and is still alive
    #[must_use]
    pub fn base(&self) -> Option<TypeRc> {
        self.base.get().and_then(TypeRef::upgrade)
    }

    /// Set the base type. Returns `false` if a base was already set.
    pub fn set_base(&self, base: &TypeRc) -> bool {
        self.base.set(TypeRef::new(base)).is_ok()
    }

    /// The type this type is nested in, if any
    #[must_use]
    pub fn enclosing_type(&self) -> Option<TypeRc> {
        self.enclosing.get().and_then(TypeRef::upgrade)
    }

    /// Set the enclosing type. Returns `false` if one was already set.
    pub fn set_enclosing_type(&self, enclosing: &TypeRc) -> bool {
        self.enclosing.set(TypeRef::new(enclosing)).is_ok()
    }

    /// `Namespace.Name`, or `Namespace.Outer+Inner` for nested types
    #[must_use]
    pub fn full_name(&self) -> String {
        if let Some(enclosing) = self.enclosing_type() {
            return format!("{}+{}", enclosing.full_name(), self.name);
        }

        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Returns `true` if `other` is a proper ancestor of this type
    #[must_use]
    pub fn is_subclass_of(&self, other: &TypeRc) -> bool {
        let mut current = self.base();
        while let Some(level) = current {
            if Arc::ptr_eq(&level, other) {
                return true;
            }
            current = level.base();
        }
        false
    }

    /// Returns `true` if this type is `other` or one of its subclasses
    #[must_use]
    pub fn is_assignable_to(&self, other: &TypeRc) -> bool {
        std::ptr::eq(self, Arc::as_ptr(other)) || self.is_subclass_of(other)
    }

    /// The usage of this type when applied as an attribute, inherited from the nearest
    /// ancestor that declares one
    #[must_use]
    pub fn attribute_usage(&self) -> Option<AttributeUsage> {
        if let Some(usage) = self.attribute_usage.get() {
            return Some(*usage);
        }

        let mut current = self.base();
        while let Some(level) = current {
            if let Some(usage) = level.attribute_usage.get() {
                return Some(*usage);
            }
            current = level.base();
        }
        None
    }

    /// Set the attribute usage. Returns `false` if one was already set.
    pub fn set_attribute_usage(&self, usage: AttributeUsage) -> bool {
        self.attribute_usage.set(usage).is_ok()
    }
}

impl Introspect for RuntimeType {
    fn full_name(&self) -> String {
        RuntimeType::full_name(self)
    }

    fn base(&self) -> Option<TypeRc> {
        RuntimeType::base(self)
    }

    fn declared_field(&self, name: &str, flags: BindingFlags) -> Option<FieldRc> {
        self.fields
            .iter()
            .map(|(_, field)| field)
            .find(|field| {
                flags.name_matches(&field.name, name)
                    && flags.admits(field.is_static(), field.is_public())
            })
            .cloned()
    }

    fn declared_property(&self, name: &str, flags: BindingFlags) -> Option<PropertyRc> {
        if !flags.intersects(BindingFlags::GET_PROPERTY | BindingFlags::SET_PROPERTY) {
            return None;
        }

        self.properties
            .iter()
            .map(|(_, property)| property)
            .find(|property| {
                flags.name_matches(&property.name, name)
                    && flags.admits(property.is_static(), property.is_public())
            })
            .cloned()
    }

    fn declared_method(&self, name: &str, flags: BindingFlags) -> Option<MethodRc> {
        self.methods
            .iter()
            .map(|(_, method)| method)
            .find(|method| {
                flags.name_matches(&method.name, name)
                    && flags.admits(method.is_static(), method.is_public())
            })
            .cloned()
    }

    fn declared_properties(&self, flags: BindingFlags) -> Vec<PropertyRc> {
        if !flags.intersects(BindingFlags::GET_PROPERTY | BindingFlags::SET_PROPERTY) {
            return Vec::new();
        }

        self.properties
            .iter()
            .map(|(_, property)| property)
            .filter(|property| flags.admits(property.is_static(), property.is_public()))
            .cloned()
            .collect()
    }
}

impl fmt::Debug for RuntimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeType")
            .field("token", &self.token)
            .field("full_name", &self.full_name())
            .field("base", &self.base().map(|base| base.full_name()))
            .field("fields", &self.fields.count())
            .field("properties", &self.properties.count())
            .field("methods", &self.methods.count())
            .finish_non_exhaustive()
    }
}
