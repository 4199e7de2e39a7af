use tracing::trace;

use crate::{
    access::Reflected,
    binding::{resolve_flags, BindingFlags, BindingMode},
    metadata::{
        customattributes::CustomAttributeRc, object::Object, typesystem::TypeRc, value::Value,
    },
    resolve::{resolve_method, MemberHandle, MethodHandle},
    Result,
};

impl Object {
    /// Invokes the method `name` on this object.
    ///
    /// Returns [`Value::Void`] for methods without a result.
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingMethod`] if no method matches. Errors of the invocation
    /// itself, including those raised by the method body, are returned unchanged.
    pub fn invoke_method(
        &self,
        name: &str,
        flags: Option<BindingFlags>,
        args: &[Value],
    ) -> Result<Value> {
        let flags = resolve_flags(flags, BindingMode::NonStatic);
        let handle = resolve_method(self.runtime_type().as_ref(), name, flags)?;
        trace!(method = handle.name(), args = args.len(), "invoking method");
        handle.invoke(Some(self), args)
    }
}

/// Static method invocation and method attribute queries
pub trait MethodAccess: Reflected {
    /// Invokes the static method `name`.
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingMethod`] if no method matches. Errors of the invocation
    /// itself are returned unchanged.
    fn invoke_static_method(
        &self,
        name: &str,
        flags: Option<BindingFlags>,
        args: &[Value],
    ) -> Result<Value> {
        let flags = resolve_flags(flags, BindingMode::Static);
        let handle = resolve_method(self.reflected_type().as_ref(), name, flags)?;
        trace!(method = handle.name(), args = args.len(), "invoking static method");
        handle.invoke(None, args)
    }

    /// The attributes of category `category` applied to the method `name`.
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingMethod`] if no method matches.
    fn method_custom_attribute(
        &self,
        name: &str,
        category: &TypeRc,
        inherit: bool,
        flags: Option<BindingFlags>,
    ) -> Result<Vec<CustomAttributeRc>> {
        let flags = resolve_flags(flags, BindingMode::Generic);
        let handle = resolve_method(self.reflected_type().as_ref(), name, flags)?;
        Ok(handle.custom_attributes(Some(category), inherit))
    }

    /// All attributes applied to the method `name`.
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingMethod`] if no method matches.
    fn method_custom_attributes(
        &self,
        name: &str,
        inherit: bool,
        flags: Option<BindingFlags>,
    ) -> Result<Vec<CustomAttributeRc>> {
        let flags = resolve_flags(flags, BindingMode::Generic);
        let handle = resolve_method(self.reflected_type().as_ref(), name, flags)?;
        Ok(handle.custom_attributes(None, inherit))
    }

    /// Resolves the method `name` with exactly `flags`.
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingMethod`] if no method matches.
    fn method_info(&self, name: &str, flags: BindingFlags) -> Result<MethodHandle> {
        resolve_method(self.reflected_type().as_ref(), name, flags)
    }
}

impl<T: Reflected + ?Sized> MethodAccess for T {}
