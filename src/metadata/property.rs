//! Property definitions.
//!
//! A property is a named pair of accessor methods. Scope and visibility of a property are
//! derived from its accessors: it is public if either accessor is public, and static if either
//! accessor is static.

use std::{
    fmt,
    sync::{Arc, OnceLock},
};

use bitflags::bitflags;
use strum::{Display, EnumIter};

use crate::metadata::{
    customattributes::CustomAttributeList, method::MethodRc, token::Token, value::ValueKind,
};

/// A vector that holds a list of `Property`
pub type PropertyList = Arc<boxcar::Vec<PropertyRc>>;
/// A reference to a `Property`
pub type PropertyRc = Arc<Property>;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// All possible flags for `PropertyAttributes`
    pub struct PropertyAttributes: u32 {
        /// Property is special
        const SPECIAL_NAME = 0x0200;
        /// Runtime(metadata internal APIs) should check name encoding
        const RT_SPECIAL_NAME = 0x0400;
        /// Property has default
        const HAS_DEFAULT = 0x1000;
    }
}

/// The two accessors of a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum PropertyAccessor {
    /// The `get_` method
    Getter,
    /// The `set_` method
    Setter,
}

/// A property declared on a type
pub struct Property {
    /// Token
    pub token: Token,
    /// The name of the property
    pub name: String,
    /// Property attributes
    pub flags: PropertyAttributes,
    /// Declared kind of the property value
    pub kind: ValueKind,
    /// The getter method, if any
    pub fn_getter: OnceLock<MethodRc>,
    /// The setter method, if any
    pub fn_setter: OnceLock<MethodRc>,
    /// Custom attributes applied to this property
    pub custom_attributes: CustomAttributeList,
}

impl Property {
    /// Create a property without accessors
    #[must_use]
    pub fn new(token: Token, name: String, flags: PropertyAttributes, kind: ValueKind) -> Self {
        Property {
            token,
            name,
            flags,
            kind,
            fn_getter: OnceLock::new(),
            fn_setter: OnceLock::new(),
            custom_attributes: Arc::new(boxcar::Vec::new()),
        }
    }

    /// The requested accessor, if declared
    #[must_use]
    pub fn accessor(&self, which: PropertyAccessor) -> Option<&MethodRc> {
        match which {
            PropertyAccessor::Getter => self.fn_getter.get(),
            PropertyAccessor::Setter => self.fn_setter.get(),
        }
    }

    /// The getter method, if declared
    #[must_use]
    pub fn getter(&self) -> Option<&MethodRc> {
        self.fn_getter.get()
    }

    /// The setter method, if declared
    #[must_use]
    pub fn setter(&self) -> Option<&MethodRc> {
        self.fn_setter.get()
    }

    /// Returns `true` if any accessor is public
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.accessors().any(|method| method.is_public())
    }

    /// Returns `true` if any accessor is static
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.accessors().any(|method| method.is_static())
    }

    fn accessors(&self) -> impl Iterator<Item = &MethodRc> {
        self.fn_getter.get().into_iter().chain(self.fn_setter.get())
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("token", &self.token)
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("getter", &self.getter().map(|m| m.name.as_str()))
            .field("setter", &self.setter().map(|m| m.name.as_str()))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{
        method::{Method, MethodAccessFlags, MethodModifiers},
        token::TableId,
    };

    fn accessor(name: &str, access: MethodAccessFlags, modifiers: MethodModifiers) -> MethodRc {
        Arc::new(Method::new(
            Token::from_parts(TableId::MethodDef, 1),
            name.to_string(),
            access,
            modifiers,
        ))
    }

    fn property() -> Property {
        Property::new(
            Token::from_parts(TableId::Property, 1),
            "Count".to_string(),
            PropertyAttributes::empty(),
            ValueKind::I4,
        )
    }

    #[test]
    fn test_visibility_is_most_visible_accessor() {
        let property = property();
        assert!(!property.is_public());
        assert!(!property.is_static());

        property
            .fn_getter
            .set(accessor(
                "get_Count",
                MethodAccessFlags::PUBLIC,
                MethodModifiers::empty(),
            ))
            .unwrap();
        property
            .fn_setter
            .set(accessor(
                "set_Count",
                MethodAccessFlags::PRIVATE,
                MethodModifiers::empty(),
            ))
            .unwrap();

        assert!(property.is_public());
        assert!(!property.is_static());
        assert_eq!(
            property
                .accessor(PropertyAccessor::Setter)
                .map(|m| m.name.as_str()),
            Some("set_Count")
        );
    }

    #[test]
    fn test_static_if_any_accessor_is_static() {
        let property = property();
        property
            .fn_setter
            .set(accessor(
                "set_Count",
                MethodAccessFlags::PRIVATE,
                MethodModifiers::STATIC,
            ))
            .unwrap();

        assert!(property.is_static());
        assert!(property.getter().is_none());
        assert!(property.accessor(PropertyAccessor::Getter).is_none());
    }
}
