use std::collections::HashSet;

use tracing::debug;

pub use crate::metadata::property::PropertyAccessor;

use crate::{
    binding::BindingFlags,
    metadata::{
        introspect::{Introspect, Member, MemberKind},
        method::MethodRc,
        object::Object,
        property::PropertyRc,
        typesystem::TypeRc,
        value::Value,
    },
    resolve::{
        walker::walk,
        MemberHandle,
    },
    Error, Result,
};

/// A resolved property together with the type that declares it.
///
/// Keeps the requested type name, the requested name and the lookup flags, so a missing
/// accessor is reported the same way a missing property is.
#[derive(Debug, Clone)]
pub struct PropertyHandle {
    property: PropertyRc,
    declaring: TypeRc,
    requested_type: String,
    requested_name: String,
    flags: BindingFlags,
}

impl PropertyHandle {
    /// The resolved property
    #[must_use]
    pub fn property(&self) -> &PropertyRc {
        &self.property
    }

    /// The declared name of the property
    #[must_use]
    pub fn name(&self) -> &str {
        &self.property.name
    }

    /// The flags the property was resolved with
    #[must_use]
    pub fn flags(&self) -> BindingFlags {
        self.flags
    }

    /// The accessor `which`, if it exists and is visible under the lookup flags.
    ///
    /// Non-public accessors are only usable when the flags contain `NON_PUBLIC`.
    ///
    /// # Errors
    /// Returns [`Error::MissingProperty`] naming the accessor otherwise.
    pub fn accessor(&self, which: PropertyAccessor) -> Result<&MethodRc> {
        let non_public = self.flags.contains(BindingFlags::NON_PUBLIC);

        match self.property.accessor(which) {
            Some(method) if non_public || method.is_public() => Ok(method),
            _ => {
                debug!(
                    property = %self.property.name,
                    type_name = %self.requested_type,
                    accessor = %which,
                    "accessor not usable"
                );
                Err(Error::MissingProperty {
                    type_name: self.requested_type.clone(),
                    name: self.requested_name.clone(),
                    flags: self.flags,
                    accessor: Some(which),
                })
            }
        }
    }

    /// Invokes the getter.
    ///
    /// # Errors
    /// Returns [`Error::MissingProperty`] if there is no usable getter, otherwise whatever
    /// the getter invocation returns.
    pub fn get_value(&self, receiver: Option<&Object>) -> Result<Value> {
        self.accessor(PropertyAccessor::Getter)?
            .invoke(receiver, &[])
    }

    /// Invokes the setter with `value`.
    ///
    /// # Errors
    /// Returns [`Error::MissingProperty`] if there is no usable setter, in which case nothing
    /// is written, otherwise whatever the setter invocation returns.
    pub fn set_value(&self, receiver: Option<&Object>, value: Value) -> Result<()> {
        self.accessor(PropertyAccessor::Setter)?
            .invoke(receiver, &[value])?;
        Ok(())
    }
}

impl MemberHandle for PropertyHandle {
    fn member(&self) -> Member {
        Member::Property(self.property.clone())
    }

    fn declaring_type(&self) -> &TypeRc {
        &self.declaring
    }
}

/// Resolves the nearest property named `name` on `ty` or its ancestors.
///
/// Properties are only considered when `flags` contains `GET_PROPERTY` or `SET_PROPERTY`.
///
/// # Errors
/// Returns [`Error::NoType`] if `ty` is `None`, or [`Error::MissingProperty`] without an
/// accessor if no property matches.
pub fn resolve_property(
    ty: Option<&TypeRc>,
    name: &str,
    flags: BindingFlags,
) -> Result<PropertyHandle> {
    let (declaring, property) = walk(ty, name, flags, MemberKind::Property, |level, name, flags| {
        level.declared_property(name, flags)
    })?;

    Ok(PropertyHandle {
        property,
        declaring,
        requested_type: ty.map(|ty| ty.full_name()).unwrap_or_default(),
        requested_name: name.to_string(),
        flags,
    })
}

/// Every property visible on `ty` under `flags`, nearest declaration first.
///
/// A property hidden by a property of the same name on a nearer level is skipped. Ancestors
/// are visited under the same rules as [`resolve_property`].
///
/// # Errors
/// Returns [`Error::NoType`] if `ty` is `None`.
pub fn resolve_properties(ty: Option<&TypeRc>, flags: BindingFlags) -> Result<Vec<PropertyHandle>> {
    let Some(ty) = ty else {
        return Err(Error::NoType);
    };
    let requested_type = ty.full_name();

    let mut seen = HashSet::new();
    let mut handles = Vec::new();
    let mut current = Some(ty.clone());
    while let Some(level) = current {
        for property in level.declared_properties(flags) {
            let key = if flags.contains(BindingFlags::IGNORE_CASE) {
                property.name.to_lowercase()
            } else {
                property.name.clone()
            };
            if !seen.insert(key) {
                continue;
            }

            handles.push(PropertyHandle {
                requested_name: property.name.clone(),
                property,
                declaring: level.clone(),
                requested_type: requested_type.clone(),
                flags,
            });
        }

        current = level.base();
    }

    Ok(handles)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        binding::{resolve_flags, BindingMode},
        metadata::object::Object,
        test::create_hierarchy,
    };

    fn flags() -> BindingFlags {
        resolve_flags(None, BindingMode::NonStatic)
            | BindingFlags::GET_PROPERTY
            | BindingFlags::SET_PROPERTY
    }

    #[test]
    fn test_properties_hidden_without_capability() {
        let hierarchy = create_hierarchy();
        let plain = resolve_flags(None, BindingMode::NonStatic);

        assert!(matches!(
            resolve_property(Some(&hierarchy.leaf), "Caption", plain),
            Err(Error::MissingProperty { accessor: None, .. })
        ));
        assert!(resolve_property(Some(&hierarchy.leaf), "caption", flags()).is_ok());
    }

    #[test]
    fn test_get_and_set_through_handle() {
        let hierarchy = create_hierarchy();
        let object = Object::new(&hierarchy.leaf);
        let handle = resolve_property(Some(&hierarchy.leaf), "Caption", flags()).unwrap();

        assert!(Arc::ptr_eq(handle.declaring_type(), &hierarchy.root));
        handle
            .set_value(Some(&object), Value::from("hello"))
            .unwrap();
        assert_eq!(handle.get_value(Some(&object)).unwrap(), Value::from("hello"));
    }

    #[test]
    fn test_missing_setter() {
        let hierarchy = create_hierarchy();
        let object = Object::new(&hierarchy.leaf);
        let handle = resolve_property(Some(&hierarchy.leaf), "id", flags()).unwrap();

        assert_eq!(handle.get_value(Some(&object)).unwrap(), Value::I4(7));
        match handle.set_value(Some(&object), Value::I4(1)) {
            Err(Error::MissingProperty {
                type_name,
                name,
                accessor,
                ..
            }) => {
                assert_eq!(type_name, "Sample.Leaf");
                assert_eq!(name, "id");
                assert_eq!(accessor, Some(PropertyAccessor::Setter));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_private_accessor_needs_non_public() {
        let hierarchy = create_hierarchy();
        let object = Object::new(&hierarchy.leaf);
        let public_only = BindingFlags::INSTANCE
            | BindingFlags::PUBLIC
            | BindingFlags::GET_PROPERTY
            | BindingFlags::SET_PROPERTY;

        let handle = resolve_property(Some(&hierarchy.leaf), "Secret", public_only).unwrap();
        assert!(handle.get_value(Some(&object)).is_ok());
        assert!(matches!(
            handle.set_value(Some(&object), Value::from("x")),
            Err(Error::MissingProperty {
                accessor: Some(PropertyAccessor::Setter),
                ..
            })
        ));

        let handle = resolve_property(Some(&hierarchy.leaf), "Secret", flags()).unwrap();
        handle.set_value(Some(&object), Value::from("x")).unwrap();
        assert_eq!(handle.get_value(Some(&object)).unwrap(), Value::from("x"));
    }

    #[test]
    fn test_resolve_properties_nearest_first() {
        let hierarchy = create_hierarchy();
        let handles = resolve_properties(Some(&hierarchy.leaf), flags()).unwrap();
        let names: Vec<&str> = handles.iter().map(PropertyHandle::name).collect();

        assert_eq!(names, ["Label", "Caption", "Id", "Secret", "Sink"]);
        assert!(Arc::ptr_eq(handles[0].declaring_type(), &hierarchy.leaf));

        let declared = resolve_properties(
            Some(&hierarchy.leaf),
            flags() | BindingFlags::DECLARED_ONLY,
        )
        .unwrap();
        let declared: Vec<&str> = declared.iter().map(PropertyHandle::name).collect();
        assert_eq!(declared, names);

        assert!(matches!(resolve_properties(None, flags()), Err(Error::NoType)));
    }
}
