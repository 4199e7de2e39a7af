use crate::{
    binding::BindingFlags,
    metadata::{
        introspect::{Introspect, Member, MemberKind},
        method::MethodRc,
        object::Object,
        typesystem::TypeRc,
        value::Value,
    },
    resolve::{walker::walk, MemberHandle},
    Result,
};

/// A resolved method together with the type that declares it
#[derive(Debug, Clone)]
pub struct MethodHandle {
    method: MethodRc,
    declaring: TypeRc,
}

impl MethodHandle {
    /// The resolved method
    #[must_use]
    pub fn method(&self) -> &MethodRc {
        &self.method
    }

    /// The declared name of the method
    #[must_use]
    pub fn name(&self) -> &str {
        &self.method.name
    }

    /// Invokes the method with `args`; `receiver` is ignored for static methods.
    ///
    /// # Errors
    /// See [`crate::metadata::method::Method::invoke`].
    pub fn invoke(&self, receiver: Option<&Object>, args: &[Value]) -> Result<Value> {
        self.method.invoke(receiver, args)
    }
}

impl MemberHandle for MethodHandle {
    fn member(&self) -> Member {
        Member::Method(self.method.clone())
    }

    fn declaring_type(&self) -> &TypeRc {
        &self.declaring
    }
}

/// Resolves the nearest method named `name` on `ty` or its ancestors.
///
/// Overloads are not distinguished: on the nearest level declaring a match, the first
/// declared method wins.
///
/// # Errors
/// Returns [`crate::Error::NoType`] if `ty` is `None`, or [`crate::Error::MissingMethod`]
/// if no method matches.
pub fn resolve_method(
    ty: Option<&TypeRc>,
    name: &str,
    flags: BindingFlags,
) -> Result<MethodHandle> {
    let (declaring, method) = walk(ty, name, flags, MemberKind::Method, |level, name, flags| {
        level.declared_method(name, flags)
    })?;

    Ok(MethodHandle { method, declaring })
}
