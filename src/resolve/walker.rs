//! The hierarchy walk shared by all resolvers.

use tracing::{debug, trace};

use crate::{
    binding::BindingFlags,
    metadata::{
        introspect::{Introspect, Member, MemberKind},
        typesystem::TypeRc,
    },
    Error, Result,
};

/// Walks from `ty` towards its root, returning the first level on which `lookup` finds a
/// member together with that member.
///
/// The requested type is searched first, then each base in turn, so the nearest declaration
/// wins. Every level is searched with the same `flags`.
pub(crate) fn walk<M>(
    ty: Option<&TypeRc>,
    name: &str,
    flags: BindingFlags,
    kind: MemberKind,
    lookup: impl Fn(&TypeRc, &str, BindingFlags) -> Option<M>,
) -> Result<(TypeRc, M)> {
    let Some(ty) = ty else {
        debug!(%kind, name, "member lookup without a type");
        return Err(Error::NoType);
    };

    let mut current = Some(ty.clone());
    let mut depth = 0;
    while let Some(level) = current {
        trace!(%kind, name, level = %level.full_name(), depth, "searching level");

        if let Some(member) = lookup(&level, name, flags) {
            return Ok((level, member));
        }

        current = level.base();
        depth += 1;
    }

    let type_name = ty.full_name();
    debug!(%kind, name, %type_name, %flags, "member not found");

    Err(missing(kind, type_name, name, flags))
}

/// The resolution error of `kind`
pub(crate) fn missing(
    kind: MemberKind,
    type_name: String,
    name: &str,
    flags: BindingFlags,
) -> Error {
    let name = name.to_string();
    match kind {
        MemberKind::Field => Error::MissingField {
            type_name,
            name,
            flags,
        },
        MemberKind::Property => Error::MissingProperty {
            type_name,
            name,
            flags,
            accessor: None,
        },
        MemberKind::Method => Error::MissingMethod {
            type_name,
            name,
            flags,
        },
    }
}

/// Finds the nearest member of `kind` named `name` on `ty` or its ancestors.
///
/// Returns the declaring type together with the member.
///
/// # Errors
/// Returns [`Error::NoType`] if `ty` is `None`, and the missing-member error of `kind`
/// ([`Error::MissingField`], [`Error::MissingProperty`] or [`Error::MissingMethod`]) naming
/// the requested type if no level declares a matching member.
pub fn find_member(
    ty: Option<&TypeRc>,
    name: &str,
    flags: BindingFlags,
    kind: MemberKind,
) -> Result<(TypeRc, Member)> {
    walk(ty, name, flags, kind, |level, name, flags| {
        level.declared_member(kind, name, flags)
    })
}
