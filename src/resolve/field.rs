use crate::{
    binding::BindingFlags,
    metadata::{
        field::FieldRc,
        introspect::{Introspect, Member, MemberKind},
        object::Object,
        typesystem::TypeRc,
        value::Value,
    },
    resolve::{walker::walk, MemberHandle},
    Result,
};

/// A resolved field together with the type that declares it
#[derive(Debug, Clone)]
pub struct FieldHandle {
    field: FieldRc,
    declaring: TypeRc,
}

impl FieldHandle {
    /// The resolved field
    #[must_use]
    pub fn field(&self) -> &FieldRc {
        &self.field
    }

    /// The declared name of the field
    #[must_use]
    pub fn name(&self) -> &str {
        &self.field.name
    }

    /// Reads the field; `receiver` is ignored for static fields.
    ///
    /// # Errors
    /// See [`crate::metadata::field::Field::read`].
    pub fn read(&self, receiver: Option<&Object>) -> Result<Value> {
        self.field.read(receiver)
    }

    /// Writes the field; `receiver` is ignored for static fields.
    ///
    /// # Errors
    /// See [`crate::metadata::field::Field::write`].
    pub fn write(&self, receiver: Option<&Object>, value: Value) -> Result<()> {
        self.field.write(receiver, value)
    }
}

impl MemberHandle for FieldHandle {
    fn member(&self) -> Member {
        Member::Field(self.field.clone())
    }

    fn declaring_type(&self) -> &TypeRc {
        &self.declaring
    }
}

/// Resolves the nearest field named `name` on `ty` or its ancestors.
///
/// # Errors
/// Returns [`crate::Error::NoType`] if `ty` is `None`, or [`crate::Error::MissingField`] if
/// no field matches.
pub fn resolve_field(
    ty: Option<&TypeRc>,
    name: &str,
    flags: BindingFlags,
) -> Result<FieldHandle> {
    let (declaring, field) = walk(ty, name, flags, MemberKind::Field, |level, name, flags| {
        level.declared_field(name, flags)
    })?;

    Ok(FieldHandle { field, declaring })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        binding::{resolve_flags, BindingMode},
        test::create_hierarchy,
        Error,
    };

    #[test]
    fn test_resolve_shadowed_field() {
        let hierarchy = create_hierarchy();
        let flags = resolve_flags(None, BindingMode::NonStatic);

        let handle = resolve_field(Some(&hierarchy.leaf), "LEVEL", flags).unwrap();
        assert_eq!(handle.name(), "level");
        assert!(Arc::ptr_eq(handle.declaring_type(), &hierarchy.middle));
        assert_eq!(handle.field().default, Value::I4(2));
    }

    #[test]
    fn test_case_sensitive_without_ignore_case() {
        let hierarchy = create_hierarchy();
        let flags = resolve_flags(None, BindingMode::NonStatic) - BindingFlags::IGNORE_CASE;

        assert!(resolve_field(Some(&hierarchy.leaf), "level", flags).is_ok());
        assert!(matches!(
            resolve_field(Some(&hierarchy.leaf), "Level", flags),
            Err(Error::MissingField { .. })
        ));
    }

    #[test]
    fn test_visibility_filter() {
        let hierarchy = create_hierarchy();
        let public_only = BindingFlags::INSTANCE | BindingFlags::PUBLIC;

        assert!(resolve_field(Some(&hierarchy.leaf), "title", public_only).is_ok());
        assert!(matches!(
            resolve_field(Some(&hierarchy.leaf), "name", public_only),
            Err(Error::MissingField { .. })
        ));
    }

    #[test]
    fn test_static_read_without_receiver() {
        let hierarchy = create_hierarchy();
        let flags = resolve_flags(None, BindingMode::Static);

        let handle = resolve_field(Some(&hierarchy.leaf), "shared", flags).unwrap();
        assert_eq!(handle.read(None).unwrap(), Value::I4(10));
    }

    #[test]
    fn test_field_attributes() {
        let hierarchy = create_hierarchy();
        let flags = resolve_flags(None, BindingMode::NonStatic);
        let handle = resolve_field(Some(&hierarchy.leaf), "title", flags).unwrap();

        assert_eq!(handle.custom_attributes(None, false).len(), 1);
        assert_eq!(handle.custom_attributes(None, true).len(), 2);
    }
}
