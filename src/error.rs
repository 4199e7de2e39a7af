use thiserror::Error;

use crate::{
    binding::BindingFlags,
    metadata::{
        token::{TableId, Token},
        value::ValueKind,
    },
    resolve::PropertyAccessor,
};

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// # Error Categories
///
/// ## Resolution Errors
/// - [`Error::NoType`] - The lookup had no type to start from
/// - [`Error::MissingField`] - No field matched anywhere in the hierarchy
/// - [`Error::MissingProperty`] - No property matched, or the matched property lacks a usable
///   getter/setter
/// - [`Error::MissingMethod`] - No method matched anywhere in the hierarchy
/// - [`Error::MissingMember`] - No field, property or method matched
///
/// Resolution errors are raised before any member is read, written or invoked.
///
/// ## Member Access Errors
/// - [`Error::TypeMismatch`] - A value is not assignable to the target slot or parameter
/// - [`Error::ParameterCount`] - An invocation passed the wrong number of arguments
/// - [`Error::ReadOnlyField`] - A literal field was written
/// - [`Error::TargetMismatch`] - An instance member was accessed without a suitable receiver
/// - [`Error::Target`] - A method body or accessor failed
///
/// Member access errors are raised by the object model after resolution succeeded, and are
/// returned to the caller unchanged.
///
/// ## Registry Errors
/// - [`Error::TypeInsert`] - A type could not be registered
/// - [`Error::TokenOverflow`] - A metadata table ran out of rows
/// - [`Error::InvalidFlags`] - Binding flags could not be parsed from text
/// - [`Error::LockError`] - A storage lock was poisoned
///
/// # Examples
///
/// ```rust
/// use dotreflect::prelude::*;
///
/// let registry = TypeRegistry::new();
/// let ty = registry.builder("Sample", "Widget").build()?;
///
/// match ty.invoke_static_method("Create", None, &[]) {
///     Err(Error::MissingMethod { type_name, name, flags }) => {
///         assert_eq!(type_name, "Sample.Widget");
///         assert_eq!(name, "Create");
///         assert!(flags.contains(BindingFlags::STATIC));
///     }
///     other => panic!("unexpected: {other:?}"),
/// }
/// # Ok::<(), dotreflect::Error>(())
/// ```
#[derive(Error, Debug)]
pub enum Error {
    // Resolution errors
    /// The type to search was absent.
    ///
    /// Raised when a lookup is started without a type, for example through an object whose
    /// type has been dropped together with its registry. No hierarchy walk is attempted.
    #[error("No type was provided for the member lookup")]
    NoType,

    /// No field matched the name and flags on the requested type or any of its ancestors.
    #[error(
        "Field {type_name}.{name} could not be found with the following BindingFlags: {flags}"
    )]
    MissingField {
        /// Full name of the type the lookup was started on
        type_name: String,
        /// The requested field name
        name: String,
        /// The flags in effect for the lookup
        flags: BindingFlags,
    },

    /// No property matched, or the matched property has no getter/setter usable under the
    /// requested flags.
    ///
    /// `accessor` is `None` when the property itself was not found, and names the missing
    /// accessor otherwise.
    #[error("{} {type_name}.{name} could not be found with the following BindingFlags: {flags}", describe_property(.accessor))]
    MissingProperty {
        /// Full name of the type the lookup was started on
        type_name: String,
        /// The requested property name
        name: String,
        /// The flags in effect for the lookup
        flags: BindingFlags,
        /// The accessor that was missing, if the property itself was found
        accessor: Option<PropertyAccessor>,
    },

    /// No method matched the name and flags on the requested type or any of its ancestors.
    #[error(
        "Method {type_name}.{name} could not be found with the following BindingFlags: {flags}"
    )]
    MissingMethod {
        /// Full name of the type the lookup was started on
        type_name: String,
        /// The requested method name
        name: String,
        /// The flags in effect for the lookup
        flags: BindingFlags,
    },

    /// No field, property or method matched the name and flags.
    #[error(
        "Member {type_name}.{name} could not be found with the following BindingFlags: {flags}"
    )]
    MissingMember {
        /// Full name of the type the lookup was started on
        type_name: String,
        /// The requested member name
        name: String,
        /// The flags in effect for the lookup
        flags: BindingFlags,
    },

    // Member access errors
    /// A value of kind `found` can not be stored into a slot or parameter of kind `expected`.
    #[error("Value of kind {found} is not assignable to {member} of kind {expected}")]
    TypeMismatch {
        /// The member (field, or parameter of a method) that rejected the value
        member: String,
        /// The declared kind of the slot
        expected: ValueKind,
        /// The kind of the rejected value
        found: ValueKind,
    },

    /// A method was invoked with the wrong number of arguments.
    #[error("Method {method} expects {expected} argument(s), {actual} were supplied")]
    ParameterCount {
        /// Name of the invoked method
        method: String,
        /// Number of declared parameters
        expected: usize,
        /// Number of supplied arguments
        actual: usize,
    },

    /// A literal (compile-time constant) field was written.
    #[error("Field {0} is a literal and can not be written")]
    ReadOnlyField(String),

    /// An instance member was accessed without a receiver, or through a receiver that does not
    /// carry the member.
    #[error("Member {0} requires an instance of its declaring type")]
    TargetMismatch(String),

    /// A method body or property accessor reported a failure.
    #[error("{0}")]
    Target(String),

    // Registry errors
    /// Failed to insert new type into the `TypeRegistry`.
    ///
    /// Raised when a type with the same full name is already registered. The associated
    /// [`Token`] identifies the rejected type.
    #[error("Failed to insert new type into TypeRegistry - {0}")]
    TypeInsert(Token),

    /// Every row of a metadata table has been issued.
    ///
    /// Rows are 24 bits wide; the declaration that needed one more token is not built.
    #[error("Token space of table {0} is exhausted")]
    TokenOverflow(TableId),

    /// The text could not be parsed as [`BindingFlags`].
    #[error("Invalid binding flags - {0}")]
    InvalidFlags(String),

    /// Failed to lock target.
    ///
    /// This error occurs when a field slot lock has been poisoned by a panicking writer.
    #[error("Failed to lock target")]
    LockError,
}

fn describe_property(accessor: &Option<PropertyAccessor>) -> &'static str {
    match accessor {
        None => "Property",
        Some(PropertyAccessor::Getter) => "Getter for Property",
        Some(PropertyAccessor::Setter) => "Setter for Property",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let err = Error::MissingField {
            type_name: "Sample.Leaf".to_string(),
            name: "zzz".to_string(),
            flags: BindingFlags::INSTANCE | BindingFlags::PUBLIC,
        };

        assert_eq!(
            err.to_string(),
            "Field Sample.Leaf.zzz could not be found with the following BindingFlags: Instance, Public"
        );
    }

    #[test]
    fn test_missing_property_messages() {
        let missing = Error::MissingProperty {
            type_name: "Sample.Leaf".to_string(),
            name: "Id".to_string(),
            flags: BindingFlags::INSTANCE,
            accessor: None,
        };
        assert!(missing.to_string().starts_with("Property Sample.Leaf.Id"));

        let setter = Error::MissingProperty {
            type_name: "Sample.Leaf".to_string(),
            name: "Id".to_string(),
            flags: BindingFlags::INSTANCE | BindingFlags::SET_PROPERTY,
            accessor: Some(PropertyAccessor::Setter),
        };
        assert!(setter
            .to_string()
            .starts_with("Setter for Property Sample.Leaf.Id"));
        assert!(setter.to_string().ends_with("Instance, SetProperty"));
    }
}
