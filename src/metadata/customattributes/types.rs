//! Custom attribute instances and their argument values.

use std::{fmt, sync::Arc};

use crate::metadata::{
    token::Token,
    typesystem::{TypeRc, TypeRef},
};

/// A reference-counted pointer to a `CustomAttribute`
pub type CustomAttributeRc = Arc<CustomAttribute>;
/// A vector that holds a list of `CustomAttribute` instances for storage on parent objects
pub type CustomAttributeList = Arc<boxcar::Vec<CustomAttributeRc>>;

/// Represents a single custom attribute argument value
#[derive(Debug, Clone, PartialEq)]
pub enum CustomAttributeArgument {
    /// Boolean value
    Bool(bool),
    /// Character value
    Char(char),
    /// Signed 32-bit integer
    I4(i32),
    /// Unsigned 32-bit integer
    U4(u32),
    /// Signed 64-bit integer
    I8(i64),
    /// Unsigned 64-bit integer
    U8(u64),
    /// 32-bit floating point
    R4(f32),
    /// 64-bit floating point
    R8(f64),
    /// UTF-8 string
    String(String),
    /// Type reference (as full name)
    Type(String),
    /// Array of arguments
    Array(Vec<CustomAttributeArgument>),
    /// Enum value (enum type name + underlying value)
    Enum(String, Box<CustomAttributeArgument>),
}

impl CustomAttributeArgument {
    /// The CLI name of the type of this argument
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            CustomAttributeArgument::Bool(_) => "System.Boolean".to_string(),
            CustomAttributeArgument::Char(_) => "System.Char".to_string(),
            CustomAttributeArgument::I4(_) => "System.Int32".to_string(),
            CustomAttributeArgument::U4(_) => "System.UInt32".to_string(),
            CustomAttributeArgument::I8(_) => "System.Int64".to_string(),
            CustomAttributeArgument::U8(_) => "System.UInt64".to_string(),
            CustomAttributeArgument::R4(_) => "System.Single".to_string(),
            CustomAttributeArgument::R8(_) => "System.Double".to_string(),
            CustomAttributeArgument::String(_) => "System.String".to_string(),
            CustomAttributeArgument::Type(_) => "System.Type".to_string(),
            CustomAttributeArgument::Array(values) => match values.first() {
                Some(first) => format!("{}[]", first.type_name()),
                None => "System.Object[]".to_string(),
            },
            CustomAttributeArgument::Enum(name, _) => name.clone(),
        }
    }
}

/// Represents a named argument (field or property) in a custom attribute
#[derive(Debug, Clone, PartialEq)]
pub struct CustomAttributeNamedArgument {
    /// Whether this is a field (true) or property (false)
    pub is_field: bool,
    /// Name of the field or property
    pub name: String,
    /// Type of the argument
    pub arg_type: String,
    /// Value of the argument
    pub value: CustomAttributeArgument,
}

/// How instances of an attribute type are inherited and combined.
///
/// Types without an explicit usage inherit the usage of their nearest ancestor that has one,
/// and fall back to [`AttributeUsage::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeUsage {
    /// Attributes applied to a member are visible through overriding members of subclasses
    pub inherited: bool,
    /// Multiple instances may be applied to the same member
    pub allow_multiple: bool,
}

impl Default for AttributeUsage {
    fn default() -> Self {
        AttributeUsage {
            inherited: true,
            allow_multiple: false,
        }
    }
}

/// A custom attribute applied to a type or member
pub struct CustomAttribute {
    /// Token
    pub token: Token,
    /// The attribute type this is an instance of
    pub attribute_type: TypeRef,
    /// Fixed arguments from the constructor call
    pub fixed_args: Vec<CustomAttributeArgument>,
    /// Named arguments (fields and properties)
    pub named_args: Vec<CustomAttributeNamedArgument>,
}

impl CustomAttribute {
    /// The attribute type, if it is still alive
    #[must_use]
    pub fn attribute_type(&self) -> Option<TypeRc> {
        self.attribute_type.upgrade()
    }

    /// Returns `true` if the attribute type is `category` or derives from it
    #[must_use]
    pub fn is_instance_of(&self, category: &TypeRc) -> bool {
        self.attribute_type()
            .is_some_and(|ty| ty.is_assignable_to(category))
    }

    /// Returns `true` if both attributes are instances of the same attribute type
    #[must_use]
    pub fn same_type_as(&self, other: &CustomAttribute) -> bool {
        match (self.attribute_type(), other.attribute_type()) {
            (Some(own), Some(other)) => Arc::ptr_eq(&own, &other),
            _ => false,
        }
    }

    /// The usage of the attribute type
    #[must_use]
    pub fn usage(&self) -> AttributeUsage {
        self.attribute_type()
            .and_then(|ty| ty.attribute_usage())
            .unwrap_or_default()
    }

    /// The value of the named argument `name`, if present
    #[must_use]
    pub fn named(&self, name: &str) -> Option<&CustomAttributeArgument> {
        self.named_args
            .iter()
            .find(|arg| arg.name == name)
            .map(|arg| &arg.value)
    }
}

impl fmt::Debug for CustomAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomAttribute")
            .field("token", &self.token)
            .field(
                "attribute_type",
                &self.attribute_type().map(|ty| ty.full_name()),
            )
            .field("fixed_args", &self.fixed_args)
            .field("named_args", &self.named_args)
            .finish()
    }
}
