//! Object instances.
//!
//! An [`Object`] holds one storage slot per instance field declared anywhere in its type's
//! hierarchy, keyed by the field's token. Slots start out at the field's default value.
//! Objects reference their type weakly; once the owning
//! [`TypeRegistry`](crate::metadata::typesystem::TypeRegistry) is dropped,
//! [`Object::runtime_type`] returns `None`.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, RwLock},
};

use crate::metadata::{
    token::Token,
    typesystem::{TypeRc, TypeRef},
    value::Value,
};

/// A reference to an `Object`
pub type ObjectRc = Arc<Object>;

/// An instance of a registered type
pub struct Object {
    ty: TypeRef,
    slots: HashMap<Token, RwLock<Value>>,
}

impl Object {
    /// Create a new instance of `ty` with every instance field at its default value
    #[must_use]
    pub fn new(ty: &TypeRc) -> ObjectRc {
        let mut slots = HashMap::new();

        let mut current = Some(ty.clone());
        while let Some(level) = current {
            for (_, field) in level.fields.iter() {
                if !field.is_static() {
                    slots.insert(field.token, RwLock::new(field.default.clone()));
                }
            }
            current = level.base();
        }

        Arc::new(Object {
            ty: TypeRef::new(ty),
            slots,
        })
    }

    /// The type of this object, if it is still alive
    #[must_use]
    pub fn runtime_type(&self) -> Option<TypeRc> {
        self.ty.upgrade()
    }

    /// Returns `true` if this object is an instance of `ty` or one of its subclasses
    #[must_use]
    pub fn is_instance_of(&self, ty: &TypeRc) -> bool {
        self.runtime_type()
            .is_some_and(|own| own.is_assignable_to(ty))
    }

    /// The storage slot of the instance field `token`
    pub(crate) fn slot(&self, token: Token) -> Option<&RwLock<Value>> {
        self.slots.get(&token)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("type", &self.runtime_type().map(|ty| ty.full_name()))
            .field("slots", &self.slots.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::create_hierarchy;

    #[test]
    fn test_slots_cover_hierarchy() {
        let hierarchy = create_hierarchy();
        let object = Object::new(&hierarchy.leaf);

        for ty in [&hierarchy.root, &hierarchy.middle, &hierarchy.leaf] {
            for (_, field) in ty.fields.iter() {
                assert_eq!(
                    object.slot(field.token).is_some(),
                    !field.is_static(),
                    "slot presence of {}.{}",
                    ty.full_name(),
                    field.name
                );
            }
        }

        assert!(object.is_instance_of(&hierarchy.root));
        assert!(!object.is_instance_of(&hierarchy.marker));
    }

    #[test]
    fn test_slots_start_at_default() {
        let hierarchy = create_hierarchy();
        let object = Object::new(&hierarchy.root);
        let field = hierarchy
            .root
            .fields
            .iter()
            .map(|(_, field)| field.clone())
            .find(|field| field.name == "level")
            .unwrap();

        assert_eq!(field.read(Some(&object)).unwrap(), Value::I4(1));
    }

    #[test]
    fn test_type_outlives_registry() {
        let object = {
            let hierarchy = create_hierarchy();
            Object::new(&hierarchy.leaf)
        };
        assert!(object.runtime_type().is_none());
    }
}
