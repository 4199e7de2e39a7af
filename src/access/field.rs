use tracing::trace;

use crate::{
    access::Reflected,
    binding::{resolve_flags, BindingFlags, BindingMode},
    metadata::{
        customattributes::CustomAttributeRc, object::Object, typesystem::TypeRc, value::Value,
    },
    resolve::{resolve_field, FieldHandle, MemberHandle},
    Result,
};

impl Object {
    /// Reads the field `name` of this object.
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingField`] if no field matches, or the error of the read.
    pub fn get_field_value(&self, name: &str, flags: Option<BindingFlags>) -> Result<Value> {
        let flags = resolve_flags(flags, BindingMode::NonStatic);
        resolve_field(self.runtime_type().as_ref(), name, flags)?.read(Some(self))
    }

    /// Writes `value` into the field `name` of this object.
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingField`] if no field matches, or the error of the write.
    /// Nothing is written on error.
    pub fn set_field_value(
        &self,
        name: &str,
        value: Value,
        flags: Option<BindingFlags>,
    ) -> Result<()> {
        let flags = resolve_flags(flags, BindingMode::NonStatic);
        let handle = resolve_field(self.runtime_type().as_ref(), name, flags)?;
        trace!(field = handle.name(), "writing field");
        handle.write(Some(self), value)
    }
}

/// Static field access and field attribute queries
pub trait FieldAccess: Reflected {
    /// Reads the static field `name`.
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingField`] if no field matches, or the error of the read.
    fn get_static_field_value(&self, name: &str, flags: Option<BindingFlags>) -> Result<Value> {
        let flags = resolve_flags(flags, BindingMode::Static);
        resolve_field(self.reflected_type().as_ref(), name, flags)?.read(None)
    }

    /// Writes `value` into the static field `name`.
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingField`] if no field matches, or the error of the write.
    fn set_static_field_value(
        &self,
        name: &str,
        value: Value,
        flags: Option<BindingFlags>,
    ) -> Result<()> {
        let flags = resolve_flags(flags, BindingMode::Static);
        let handle = resolve_field(self.reflected_type().as_ref(), name, flags)?;
        trace!(field = handle.name(), "writing static field");
        handle.write(None, value)
    }

    /// The attributes of category `category` applied to the field `name`.
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingField`] if no field matches.
    fn field_custom_attribute(
        &self,
        name: &str,
        category: &TypeRc,
        inherit: bool,
        flags: Option<BindingFlags>,
    ) -> Result<Vec<CustomAttributeRc>> {
        let flags = resolve_flags(flags, BindingMode::NonStatic);
        let handle = resolve_field(self.reflected_type().as_ref(), name, flags)?;
        Ok(handle.custom_attributes(Some(category), inherit))
    }

    /// All attributes applied to the field `name`.
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingField`] if no field matches.
    fn field_custom_attributes(
        &self,
        name: &str,
        inherit: bool,
        flags: Option<BindingFlags>,
    ) -> Result<Vec<CustomAttributeRc>> {
        let flags = resolve_flags(flags, BindingMode::NonStatic);
        let handle = resolve_field(self.reflected_type().as_ref(), name, flags)?;
        Ok(handle.custom_attributes(None, inherit))
    }

    /// Resolves the field `name` with exactly `flags`.
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingField`] if no field matches.
    fn field_info(&self, name: &str, flags: BindingFlags) -> Result<FieldHandle> {
        resolve_field(self.reflected_type().as_ref(), name, flags)
    }
}

impl<T: Reflected + ?Sized> FieldAccess for T {}
