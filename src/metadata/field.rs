//! Field definitions and field slot access.
//!
//! A [`Field`] is declared on exactly one type. Instance fields store their values in the
//! slots of each [`Object`]; static fields carry a single slot of their own. Literal fields
//! always read as their declared value and reject writes.

use std::{
    fmt,
    sync::{Arc, RwLock},
};

use bitflags::bitflags;

use crate::{
    metadata::{
        customattributes::CustomAttributeList,
        object::Object,
        token::Token,
        value::{Value, ValueKind},
    },
    Error, Result,
};

/// A vector that holds a list of `Field`
pub type FieldList = Arc<boxcar::Vec<FieldRc>>;
/// A reference to a field
pub type FieldRc = Arc<Field>;

/// Bitmask for `FIELD_ACCESS` extraction
pub const FIELD_ACCESS_MASK: u32 = 0x0007;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// All possible flags for `FieldAttributes`
    pub struct FieldAttributes: u32 {
        /// Accessible only by the parent type
        const PRIVATE = 0x0001;
        /// Accessible by sub-types only in this Assembly
        const FAM_AND_ASSEM = 0x0002;
        /// Accessibly by anyone in the Assembly
        const ASSEMBLY = 0x0003;
        /// Accessible only by type and sub-types
        const FAMILY = 0x0004;
        /// Accessibly by sub-types anywhere, plus anyone in assembly
        const FAM_OR_ASSEM = 0x0005;
        /// Accessibly by anyone who has visibility to this scope
        const PUBLIC = 0x0006;
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Field can only be initialized, not written to after init
        const INIT_ONLY = 0x0020;
        /// Value is compile time constant
        const LITERAL = 0x0040;
        /// Reserved (to indicate this field should not be serialized when type is remoted)
        const NOT_SERIALIZED = 0x0080;
        /// Field is special
        const SPECIAL_NAME = 0x0200;
        /// CLI provides 'special' behavior, depending upon the name of the field
        const RTSPECIAL_NAME = 0x0400;
    }
}

impl FieldAttributes {
    /// The access bits of these attributes
    #[must_use]
    pub fn access(self) -> FieldAttributes {
        FieldAttributes::from_bits_truncate(self.bits() & FIELD_ACCESS_MASK)
    }

    /// Replaces the access bits with `access`
    #[must_use]
    pub fn with_access(self, access: FieldAttributes) -> FieldAttributes {
        FieldAttributes::from_bits_retain(
            (self.bits() & !FIELD_ACCESS_MASK) | (access.bits() & FIELD_ACCESS_MASK),
        )
    }

    /// Returns `true` if the access bits are exactly `PUBLIC`
    #[must_use]
    pub fn is_public(self) -> bool {
        self.access() == FieldAttributes::PUBLIC
    }
}

/// A field declared on a type
pub struct Field {
    /// Token
    pub token: Token,
    /// The name of this field
    pub name: String,
    /// Access and modifier flags
    pub flags: FieldAttributes,
    /// Declared kind of the values this field holds
    pub kind: ValueKind,
    /// Initial value of every slot of this field, and the value of literal fields
    pub default: Value,
    /// Custom attributes applied to this field
    pub custom_attributes: CustomAttributeList,
    /// Storage of static and literal fields
    static_slot: Option<RwLock<Value>>,
}

impl Field {
    /// Create a new field. Static and literal fields get their slot here, instance fields get
    /// one per [`Object`].
    #[must_use]
    pub fn new(
        token: Token,
        name: String,
        flags: FieldAttributes,
        kind: ValueKind,
        default: Value,
    ) -> Self {
        let static_slot = flags
            .intersects(FieldAttributes::STATIC | FieldAttributes::LITERAL)
            .then(|| RwLock::new(default.clone()));

        Field {
            token,
            name,
            flags,
            kind,
            default,
            custom_attributes: Arc::new(boxcar::Vec::new()),
            static_slot,
        }
    }

    /// Returns `true` for fields stored on the type instead of per instance
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.static_slot.is_some()
    }

    /// Returns `true` for public fields
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.flags.is_public()
    }

    /// Returns `true` for compile-time constants
    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.flags.contains(FieldAttributes::LITERAL)
    }

    /// Reads the value of this field.
    ///
    /// Static fields ignore `receiver`. Instance fields need a receiver whose type hierarchy
    /// declares this field.
    ///
    /// # Errors
    /// Returns [`Error::TargetMismatch`] if an instance field is read without a suitable
    /// receiver, or [`Error::LockError`] if the slot is poisoned.
    pub fn read(&self, receiver: Option<&Object>) -> Result<Value> {
        let slot = self.slot(receiver)?;
        let value = slot.read().map_err(|_| Error::LockError)?;
        Ok(value.clone())
    }

    /// Writes `value` into this field.
    ///
    /// # Errors
    /// Returns [`Error::ReadOnlyField`] for literal fields, [`Error::TypeMismatch`] if
    /// `value` is not assignable to the field's kind, and [`Error::TargetMismatch`] if an
    /// instance field is written without a suitable receiver. Nothing is written on error.
    pub fn write(&self, receiver: Option<&Object>, value: Value) -> Result<()> {
        if self.is_literal() {
            return Err(Error::ReadOnlyField(self.name.clone()));
        }

        if !value.is_assignable_to(self.kind) {
            return Err(Error::TypeMismatch {
                member: self.name.clone(),
                expected: self.kind,
                found: value.kind(),
            });
        }

        let slot = self.slot(receiver)?;
        *slot.write().map_err(|_| Error::LockError)? = value;
        Ok(())
    }

    fn slot<'a>(&'a self, receiver: Option<&'a Object>) -> Result<&'a RwLock<Value>> {
        if let Some(slot) = &self.static_slot {
            return Ok(slot);
        }

        receiver
            .and_then(|object| object.slot(self.token))
            .ok_or_else(|| Error::TargetMismatch(self.name.clone()))
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("token", &self.token)
            .field("name", &self.name)
            .field("flags", &self.flags)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::token::TableId;

    fn field(flags: FieldAttributes, kind: ValueKind, default: Value) -> Field {
        Field::new(
            Token::from_parts(TableId::Field, 1),
            "value".to_string(),
            flags,
            kind,
            default,
        )
    }

    #[test]
    fn test_access_bits() {
        let flags = FieldAttributes::PRIVATE | FieldAttributes::STATIC;
        assert_eq!(flags.access(), FieldAttributes::PRIVATE);
        assert!(!flags.is_public());

        let public = flags.with_access(FieldAttributes::PUBLIC);
        assert!(public.is_public());
        assert!(public.contains(FieldAttributes::STATIC));

        // FAMILY shares a bit with PUBLIC but is not public
        assert!(!FieldAttributes::FAMILY.is_public());
    }

    #[test]
    fn test_static_field_roundtrip() {
        let field = field(
            FieldAttributes::PUBLIC | FieldAttributes::STATIC,
            ValueKind::I4,
            Value::I4(1),
        );
        assert!(field.is_static());
        assert_eq!(field.read(None).unwrap(), Value::I4(1));

        field.write(None, Value::I4(5)).unwrap();
        assert_eq!(field.read(None).unwrap(), Value::I4(5));
    }

    #[test]
    fn test_literal_rejects_writes() {
        let field = field(
            FieldAttributes::PUBLIC | FieldAttributes::LITERAL,
            ValueKind::String,
            Value::from("const"),
        );
        assert!(matches!(
            field.write(None, Value::from("changed")),
            Err(Error::ReadOnlyField(name)) if name == "value"
        ));
        assert_eq!(field.read(None).unwrap(), Value::from("const"));
    }

    #[test]
    fn test_type_mismatch_leaves_slot_untouched() {
        let field = field(
            FieldAttributes::PRIVATE | FieldAttributes::STATIC,
            ValueKind::I4,
            Value::I4(3),
        );
        assert!(matches!(
            field.write(None, Value::from("three")),
            Err(Error::TypeMismatch {
                expected: ValueKind::I4,
                found: ValueKind::String,
                ..
            })
        ));
        assert_eq!(field.read(None).unwrap(), Value::I4(3));
    }

    #[test]
    fn test_instance_field_needs_receiver() {
        let field = field(FieldAttributes::PUBLIC, ValueKind::I4, Value::I4(0));
        assert!(!field.is_static());
        assert!(matches!(field.read(None), Err(Error::TargetMismatch(_))));
        assert!(matches!(
            field.write(None, Value::I4(1)),
            Err(Error::TargetMismatch(_))
        ));
    }
}
