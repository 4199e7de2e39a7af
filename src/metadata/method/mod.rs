//! Method definitions and invocation.
//!
//! A [`Method`] carries its access flags, modifiers, parameter list and an optional
//! [`MethodBody`]. [`Method::invoke`] validates receiver and arguments against the declaration
//! before the body runs; whatever the body returns, value or error, is passed through.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use dotreflect::metadata::{
//!     method::{Method, MethodAccessFlags, MethodModifiers, Param},
//!     object::Object,
//!     token::{TableId, Token},
//!     value::{Value, ValueKind},
//! };
//!
//! let mut method = Method::new(
//!     Token::from_parts(TableId::MethodDef, 1),
//!     "Twice".to_string(),
//!     MethodAccessFlags::PUBLIC,
//!     MethodModifiers::STATIC,
//! );
//! method.params.push(Param::new("value", ValueKind::I4));
//! method.return_kind = ValueKind::I4;
//! method.body = Some(Arc::new(|_: Option<&Object>, args: &[Value]| {
//!     Ok(Value::I4(args[0].as_i4().unwrap_or_default() * 2))
//! }));
//!
//! assert_eq!(method.invoke(None, &[Value::I4(21)])?, Value::I4(42));
//! # Ok::<(), dotreflect::Error>(())
//! ```

mod types;

pub use types::*;

use std::{fmt, sync::Arc};

use crate::{
    metadata::{
        customattributes::CustomAttributeList,
        object::Object,
        token::Token,
        value::{Value, ValueKind},
    },
    Error, Result,
};

/// A vector that holds a list of `Method`
pub type MethodList = Arc<boxcar::Vec<MethodRc>>;
/// A reference to a `Method`
pub type MethodRc = Arc<Method>;

/// A method declared on a type
pub struct Method {
    /// Token
    pub token: Token,
    /// The name of the method
    pub name: String,
    /// Access flags
    pub flags_access: MethodAccessFlags,
    /// Modifiers
    pub flags_modifiers: MethodModifiers,
    /// Declared parameters, in order
    pub params: Vec<Param>,
    /// Declared kind of the return value
    pub return_kind: ValueKind,
    /// The implementation; `None` for abstract methods
    pub body: Option<MethodBody>,
    /// Custom attributes applied to this method
    pub custom_attributes: CustomAttributeList,
}

impl Method {
    /// Create a method without parameters, returning `Void`, without a body
    #[must_use]
    pub fn new(
        token: Token,
        name: String,
        flags_access: MethodAccessFlags,
        flags_modifiers: MethodModifiers,
    ) -> Self {
        Method {
            token,
            name,
            flags_access,
            flags_modifiers,
            params: Vec::new(),
            return_kind: ValueKind::Void,
            body: None,
            custom_attributes: Arc::new(boxcar::Vec::new()),
        }
    }

    /// Returns `true` for static methods
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.flags_modifiers.contains(MethodModifiers::STATIC)
    }

    /// Returns `true` for public methods
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.flags_access.is_public()
    }

    /// Returns `true` for methods without an implementation
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.flags_modifiers.contains(MethodModifiers::ABSTRACT) || self.body.is_none()
    }

    /// Invokes this method.
    ///
    /// Static methods ignore `receiver`; instance methods require one.
    ///
    /// # Errors
    /// - [`Error::TargetMismatch`] if an instance method is invoked without a receiver
    /// - [`Error::ParameterCount`] if `args` does not match the declared parameters
    /// - [`Error::TypeMismatch`] if an argument is not assignable to its parameter
    /// - [`Error::Target`] if the method has no body, or whatever error the body returns
    pub fn invoke(&self, receiver: Option<&Object>, args: &[Value]) -> Result<Value> {
        let receiver = if self.is_static() {
            None
        } else {
            Some(receiver.ok_or_else(|| Error::TargetMismatch(self.name.clone()))?)
        };

        if args.len() != self.params.len() {
            return Err(Error::ParameterCount {
                method: self.name.clone(),
                expected: self.params.len(),
                actual: args.len(),
            });
        }

        for (param, arg) in self.params.iter().zip(args) {
            if !arg.is_assignable_to(param.kind) {
                return Err(Error::TypeMismatch {
                    member: format!("{}({})", self.name, param.name),
                    expected: param.kind,
                    found: arg.kind(),
                });
            }
        }

        let Some(body) = &self.body else {
            return Err(Error::Target(format!(
                "Method {} has no implementation",
                self.name
            )));
        };

        body(receiver, args)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("token", &self.token)
            .field("name", &self.name)
            .field("flags_access", &self.flags_access)
            .field("flags_modifiers", &self.flags_modifiers)
            .field("params", &self.params)
            .field("return_kind", &self.return_kind)
            .finish_non_exhaustive()
    }
}
