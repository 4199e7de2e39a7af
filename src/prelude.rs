//! # dotreflect Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the dotreflect library. Import this module to declare types, create objects and
//! access their members by name.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all dotreflect operations
pub use crate::Error;

/// The result type used throughout dotreflect
pub use crate::Result;

// ================================================================================================
// Binding
// ================================================================================================

/// Flags, modes and the default policy every lookup runs with
pub use crate::binding::{resolve_flags, BindingFlags, BindingMode, BindingPolicy};

// ================================================================================================
// Type System
// ================================================================================================

/// Runtime types and their registry
pub use crate::metadata::typesystem::{RuntimeType, TypeRc, TypeRegistry};

/// Builders for declaring types and members
pub use crate::metadata::typesystem::{
    AttributeBuilder, FieldBuilder, MethodBuilder, PropertyBuilder, TypeBuilder,
};

/// Per-level lookups
pub use crate::metadata::introspect::{Introspect, Member, MemberKind};

/// Method access flags, used when declaring property accessors
pub use crate::metadata::method::MethodAccessFlags;

// ================================================================================================
// Objects and Values
// ================================================================================================

/// Instances and their runtime values
pub use crate::metadata::{
    object::{Object, ObjectRc},
    value::{Value, ValueKind},
};

/// Custom attributes
pub use crate::metadata::customattributes::{
    AttributeUsage, CustomAttributeArgument, CustomAttributeRc,
};

// ================================================================================================
// Resolution and Access
// ================================================================================================

/// Resolved member handles
pub use crate::resolve::{
    FieldHandle, MemberHandle, MethodHandle, PropertyAccessor, PropertyHandle,
};

/// Name-based access traits, implemented for objects and types
pub use crate::access::{AttributeAccess, FieldAccess, MethodAccess, PropertyAccess, Reflected};
