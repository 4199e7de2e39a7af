use tracing::trace;

use crate::{
    access::Reflected,
    binding::{resolve_flags, BindingFlags, BindingMode},
    metadata::{
        customattributes::CustomAttributeRc, object::Object, typesystem::TypeRc, value::Value,
    },
    resolve::{resolve_properties, resolve_property, MemberHandle, PropertyHandle},
    Result,
};

const PROPERTY_CAPABILITIES: BindingFlags =
    BindingFlags::GET_PROPERTY.union(BindingFlags::SET_PROPERTY);

impl Object {
    /// Reads the property `name` of this object through its getter.
    ///
    /// `GET_PROPERTY` is always added to the flags.
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingProperty`] if no property matches or its getter is not
    /// usable, or the error of the getter invocation.
    pub fn get_property_value(&self, name: &str, flags: Option<BindingFlags>) -> Result<Value> {
        let flags = resolve_flags(flags, BindingMode::NonStatic) | BindingFlags::GET_PROPERTY;
        resolve_property(self.runtime_type().as_ref(), name, flags)?.get_value(Some(self))
    }

    /// Writes `value` through the setter of the property `name` of this object.
    ///
    /// `SET_PROPERTY` is always added to the flags.
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingProperty`] if no property matches or its setter is not
    /// usable, or the error of the setter invocation.
    pub fn set_property_value(
        &self,
        name: &str,
        value: Value,
        flags: Option<BindingFlags>,
    ) -> Result<()> {
        let flags = resolve_flags(flags, BindingMode::NonStatic) | BindingFlags::SET_PROPERTY;
        let handle = resolve_property(self.runtime_type().as_ref(), name, flags)?;
        trace!(property = handle.name(), "writing property");
        handle.set_value(Some(self), value)
    }
}

/// Property attribute queries and property enumeration
pub trait PropertyAccess: Reflected {
    /// The attributes of category `category` applied to the property `name`.
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingProperty`] if no property matches.
    fn property_custom_attribute(
        &self,
        name: &str,
        category: &TypeRc,
        inherit: bool,
        flags: Option<BindingFlags>,
    ) -> Result<Vec<CustomAttributeRc>> {
        let flags = resolve_flags(flags, BindingMode::NonStatic) | PROPERTY_CAPABILITIES;
        let handle = resolve_property(self.reflected_type().as_ref(), name, flags)?;
        Ok(handle.custom_attributes(Some(category), inherit))
    }

    /// All attributes applied to the property `name`.
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingProperty`] if no property matches.
    fn property_custom_attributes(
        &self,
        name: &str,
        inherit: bool,
        flags: Option<BindingFlags>,
    ) -> Result<Vec<CustomAttributeRc>> {
        let flags = resolve_flags(flags, BindingMode::NonStatic) | PROPERTY_CAPABILITIES;
        let handle = resolve_property(self.reflected_type().as_ref(), name, flags)?;
        Ok(handle.custom_attributes(None, inherit))
    }

    /// Every visible property carrying at least one attribute of category `category`,
    /// nearest declaration first.
    ///
    /// # Errors
    /// Returns [`crate::Error::NoType`] if there is no type to enumerate.
    fn properties_with_custom_attribute(
        &self,
        category: &TypeRc,
        inherit: bool,
        flags: Option<BindingFlags>,
    ) -> Result<Vec<PropertyHandle>> {
        let flags = resolve_flags(flags, BindingMode::Generic) | PROPERTY_CAPABILITIES;
        let handles = resolve_properties(self.reflected_type().as_ref(), flags)?;

        Ok(handles
            .into_iter()
            .filter(|handle| !handle.custom_attributes(Some(category), inherit).is_empty())
            .collect())
    }

    /// Resolves the property `name` with exactly `flags`.
    ///
    /// Properties are only found if `flags` contains `GET_PROPERTY` or `SET_PROPERTY`.
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingProperty`] if no property matches.
    fn property_info(&self, name: &str, flags: BindingFlags) -> Result<PropertyHandle> {
        resolve_property(self.reflected_type().as_ref(), name, flags)
    }
}

impl<T: Reflected + ?Sized> PropertyAccess for T {}
