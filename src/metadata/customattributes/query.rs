use crate::{
    binding::BindingFlags,
    metadata::{
        customattributes::CustomAttributeRc,
        introspect::{Introspect, Member},
        typesystem::TypeRc,
    },
};

/// Reads the custom attributes of `member`, declared on `declaring`.
///
/// Only attributes whose type is `category` or derives from it are returned; `None` returns
/// every attribute. With `inherit`, members of the same name, kind and scope declared on
/// ancestors of `declaring` are visited nearest first, and their attributes are added if the
/// attribute usage is inherited. An attribute type that does not allow multiple instances is
/// only reported once, for the nearest member that carries it.
#[must_use]
pub fn read_attributes(
    declaring: &TypeRc,
    member: &Member,
    category: Option<&TypeRc>,
    inherit: bool,
) -> Vec<CustomAttributeRc> {
    let matches = |attribute: &CustomAttributeRc| match category {
        Some(category) => attribute.is_instance_of(category),
        None => true,
    };

    let mut result: Vec<CustomAttributeRc> = member
        .custom_attributes()
        .iter()
        .map(|(_, attribute)| attribute.clone())
        .filter(|attribute| matches(attribute))
        .collect();

    if !inherit {
        return result;
    }

    let flags = BindingFlags::all() - BindingFlags::IGNORE_CASE - BindingFlags::DECLARED_ONLY;
    let mut current = declaring.base();
    while let Some(level) = current {
        let ancestor = level
            .declared_member(member.kind(), member.name(), flags)
            .filter(|ancestor| ancestor.is_static() == member.is_static());

        if let Some(ancestor) = ancestor {
            for (_, attribute) in ancestor.custom_attributes().iter() {
                if !matches(attribute) {
                    continue;
                }

                let usage = attribute.usage();
                if !usage.inherited {
                    continue;
                }

                if !usage.allow_multiple
                    && result
                        .iter()
                        .any(|existing| existing.same_type_as(attribute))
                {
                    continue;
                }

                result.push(attribute.clone());
            }
        }

        current = level.base();
    }

    result
}
