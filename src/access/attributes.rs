use strum::IntoEnumIterator;
use tracing::debug;

use crate::{
    access::Reflected,
    binding::{resolve_flags, BindingFlags, BindingMode},
    metadata::{
        customattributes::{read_attributes, CustomAttributeRc},
        introspect::MemberKind,
        typesystem::TypeRc,
    },
    resolve::find_member,
    Error, Result,
};

/// Attribute queries on members of any kind
pub trait AttributeAccess: Reflected {
    /// The attributes applied to the member `name`, whichever kind it is.
    ///
    /// Fields are tried first, then properties, then methods. The first kind with a match
    /// answers the query. With `category`, only attributes of that type or a type derived from
    /// it are returned.
    ///
    /// # Errors
    /// Returns [`Error::NoType`] if there is no type to search, or [`Error::MissingMember`]
    /// if no member of any kind matches.
    fn member_custom_attributes(
        &self,
        name: &str,
        category: Option<&TypeRc>,
        inherit: bool,
        flags: Option<BindingFlags>,
    ) -> Result<Vec<CustomAttributeRc>> {
        let flags = resolve_flags(flags, BindingMode::Generic)
            | BindingFlags::GET_PROPERTY
            | BindingFlags::SET_PROPERTY;
        let ty = self.reflected_type().ok_or(Error::NoType)?;

        for kind in MemberKind::iter() {
            match find_member(Some(&ty), name, flags, kind) {
                Ok((declaring, member)) => {
                    return Ok(read_attributes(&declaring, &member, category, inherit));
                }
                Err(
                    Error::MissingField { .. }
                    | Error::MissingProperty { .. }
                    | Error::MissingMethod { .. },
                ) => {}
                Err(error) => return Err(error),
            }
        }

        debug!(type_name = %ty.full_name(), name, %flags, "no member matched");
        Err(Error::MissingMember {
            type_name: ty.full_name(),
            name: name.to_string(),
            flags,
        })
    }
}

impl<T: Reflected + ?Sized> AttributeAccess for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::object::Object,
        test::{attribute_names, create_hierarchy},
    };

    #[test]
    fn test_every_member_kind() {
        let hierarchy = create_hierarchy();
        let object = Object::new(&hierarchy.leaf);

        let field = object
            .member_custom_attributes("title", None, false, None)
            .unwrap();
        assert_eq!(attribute_names(&field), ["Sample.DerivedMarkerAttribute"]);

        let property = object
            .member_custom_attributes("caption", None, true, None)
            .unwrap();
        assert_eq!(attribute_names(&property), ["Sample.MarkerAttribute"]);

        let method = hierarchy
            .leaf
            .member_custom_attributes("Describe", Some(&hierarchy.tag), true, None)
            .unwrap();
        assert_eq!(method.len(), 3);
    }

    #[test]
    fn test_static_members_are_searched() {
        let hierarchy = create_hierarchy();

        let markers = hierarchy
            .leaf
            .member_custom_attributes("Instances", Some(&hierarchy.marker), false, None)
            .unwrap();
        assert_eq!(markers.len(), 1);
    }

    #[test]
    fn test_missing_member() {
        let hierarchy = create_hierarchy();

        match hierarchy.leaf.member_custom_attributes("zzz", None, true, None) {
            Err(Error::MissingMember {
                type_name, name, ..
            }) => {
                assert_eq!(type_name, "Sample.Leaf");
                assert_eq!(name, "zzz");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_no_type() {
        let object = {
            let hierarchy = create_hierarchy();
            Object::new(&hierarchy.leaf)
        };

        assert!(matches!(
            object.member_custom_attributes("title", None, true, None),
            Err(Error::NoType)
        ));
    }
}
