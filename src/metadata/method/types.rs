//! Method attribute flags and parameter descriptions.
//!
//! # Key Types
//! - [`MethodAccessFlags`], [`MethodModifiers`]: Attribute flags
//! - [`Param`]: A declared parameter
//! - [`MethodBody`]: The callable implementation of a method

use std::sync::Arc;

use bitflags::bitflags;

use crate::{
    metadata::{
        object::Object,
        value::{Value, ValueKind},
    },
    Result,
};

/// Bitmask for `ACCESS` state extraction
pub const METHOD_ACCESS_MASK: u32 = 0x0007;

/// The implementation of a method.
///
/// Receives the receiver (`None` for static methods) and the already validated arguments.
pub type MethodBody = Arc<dyn Fn(Option<&Object>, &[Value]) -> Result<Value> + Send + Sync>;

// Method attributes split into logical groups
bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Method access flags
    pub struct MethodAccessFlags: u32 {
        /// Accessible only by the parent type
        const PRIVATE = 0x0001;
        /// Accessible by sub-types only in this Assembly
        const FAM_AND_ASSEM = 0x0002;
        /// Accessibly by anyone in the Assembly
        const ASSEM = 0x0003;
        /// Accessible only by type and sub-types
        const FAMILY = 0x0004;
        /// Accessibly by sub-types anywhere, plus anyone in assembly
        const FAM_OR_ASSEM = 0x0005;
        /// Accessibly by anyone who has visibility to this scope
        const PUBLIC = 0x0006;
    }
}

impl MethodAccessFlags {
    /// Extract access flags from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        let access = flags & METHOD_ACCESS_MASK;
        Self::from_bits_truncate(access)
    }

    /// Returns `true` if the access bits are exactly `PUBLIC`
    #[must_use]
    pub fn is_public(self) -> bool {
        self.bits() & METHOD_ACCESS_MASK == MethodAccessFlags::PUBLIC.bits()
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Method modifiers and properties
    pub struct MethodModifiers: u32 {
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Method cannot be overridden
        const FINAL = 0x0020;
        /// Method is virtual
        const VIRTUAL = 0x0040;
        /// Method hides by name+sig, else just by name
        const HIDE_BY_SIG = 0x0080;
        /// Method always gets a new slot in the vtable
        const NEW_SLOT = 0x0100;
        /// Method does not provide an implementation
        const ABSTRACT = 0x0400;
        /// Method is special
        const SPECIAL_NAME = 0x0800;
    }
}

impl MethodModifiers {
    /// Extract method modifiers from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & !METHOD_ACCESS_MASK)
    }
}

/// A declared method parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Name of the parameter
    pub name: String,
    /// Declared kind; arguments must be assignable to it
    pub kind: ValueKind,
}

impl Param {
    /// Create a new parameter
    #[must_use]
    pub fn new(name: &str, kind: ValueKind) -> Self {
        Param {
            name: name.to_string(),
            kind,
        }
    }
}
