//! The introspection primitives resolution is built on.
//!
//! [`Introspect`] answers questions about a single type level only: its name, its direct
//! base, and which of its *own* members match a name under a set of [`BindingFlags`].
//! Walking the hierarchy is left to [`crate::resolve`].
//!
//! # Matching Rules
//!
//! A declared member matches when
//! - its name equals the requested one (case-insensitively under `IGNORE_CASE`)
//! - its scope is admitted (`STATIC` for static members, `INSTANCE` otherwise)
//! - its visibility is admitted (`PUBLIC` for public members, `NON_PUBLIC` otherwise)
//!
//! Properties additionally require `GET_PROPERTY` or `SET_PROPERTY`. If several members of
//! one kind match on the same level, the first declared wins.

use strum::{Display, EnumIter};

use crate::{
    binding::BindingFlags,
    metadata::{
        customattributes::CustomAttributeList,
        field::FieldRc,
        method::MethodRc,
        property::PropertyRc,
        token::Token,
        typesystem::TypeRc,
    },
};

/// The kinds of members resolution distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum MemberKind {
    /// A field
    Field,
    /// A property
    Property,
    /// A method
    Method,
}

/// A declared member of any kind
#[derive(Debug, Clone)]
pub enum Member {
    /// A field
    Field(FieldRc),
    /// A property
    Property(PropertyRc),
    /// A method
    Method(MethodRc),
}

impl Member {
    /// The kind of this member
    #[must_use]
    pub fn kind(&self) -> MemberKind {
        match self {
            Member::Field(_) => MemberKind::Field,
            Member::Property(_) => MemberKind::Property,
            Member::Method(_) => MemberKind::Method,
        }
    }

    /// The declared name
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Member::Field(field) => &field.name,
            Member::Property(property) => &property.name,
            Member::Method(method) => &method.name,
        }
    }

    /// The token
    #[must_use]
    pub fn token(&self) -> Token {
        match self {
            Member::Field(field) => field.token,
            Member::Property(property) => property.token,
            Member::Method(method) => method.token,
        }
    }

    /// Returns `true` for static members
    #[must_use]
    pub fn is_static(&self) -> bool {
        match self {
            Member::Field(field) => field.is_static(),
            Member::Property(property) => property.is_static(),
            Member::Method(method) => method.is_static(),
        }
    }

    /// Returns `true` for public members
    #[must_use]
    pub fn is_public(&self) -> bool {
        match self {
            Member::Field(field) => field.is_public(),
            Member::Property(property) => property.is_public(),
            Member::Method(method) => method.is_public(),
        }
    }

    /// The custom attributes applied to this member
    #[must_use]
    pub fn custom_attributes(&self) -> &CustomAttributeList {
        match self {
            Member::Field(field) => &field.custom_attributes,
            Member::Property(property) => &property.custom_attributes,
            Member::Method(method) => &method.custom_attributes,
        }
    }
}

/// Per-level introspection of a type
pub trait Introspect {
    /// `Namespace.Name`, or `Namespace.Outer+Inner` for nested types
    fn full_name(&self) -> String;

    /// The direct base type, if any
    fn base(&self) -> Option<TypeRc>;

    /// The first field declared on this level that matches `name` under `flags`
    fn declared_field(&self, name: &str, flags: BindingFlags) -> Option<FieldRc>;

    /// The first property declared on this level that matches `name` under `flags`
    fn declared_property(&self, name: &str, flags: BindingFlags) -> Option<PropertyRc>;

    /// The first method declared on this level that matches `name` under `flags`
    fn declared_method(&self, name: &str, flags: BindingFlags) -> Option<MethodRc>;

    /// Every property declared on this level that is eligible under `flags`, in declaration
    /// order
    fn declared_properties(&self, flags: BindingFlags) -> Vec<PropertyRc>;

    /// The first member of `kind` declared on this level that matches `name` under `flags`
    fn declared_member(&self, kind: MemberKind, name: &str, flags: BindingFlags) -> Option<Member> {
        match kind {
            MemberKind::Field => self.declared_field(name, flags).map(Member::Field),
            MemberKind::Property => self.declared_property(name, flags).map(Member::Property),
            MemberKind::Method => self.declared_method(name, flags).map(Member::Method),
        }
    }
}
