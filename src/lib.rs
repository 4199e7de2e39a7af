// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # dotreflect
//!
//! Name-based runtime member access over a .NET-style managed object model.
//!
//! Given only an object (or a type) and a member name, `dotreflect` reads and writes fields,
//! reads and writes properties through their accessor methods, invokes methods and retrieves
//! custom attributes, with [`BindingFlags`] controlling scope, visibility, case sensitivity and
//! hierarchy traversal.
//!
//! ## Quick Start
//!
//! ```rust
//! use dotreflect::prelude::*;
//!
//! let registry = TypeRegistry::new();
//! let root = registry
//!     .builder("Sample", "Root")
//!     .field(FieldBuilder::new("name", ValueKind::String).private())
//!     .build()?;
//! let leaf = registry.builder("Sample", "Leaf").extends(&root).build()?;
//!
//! let obj = Object::new(&leaf);
//! obj.set_field_value("Name", "dotreflect".into(), None)?;
//! assert_eq!(obj.get_field_value("name", None)?, Value::from("dotreflect"));
//! # Ok::<(), dotreflect::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`binding`] - [`BindingFlags`] and the default binding policy per lookup mode
//! - [`metadata`] - The managed object model: types, members, objects, values and custom
//!   attributes, plus the [`metadata::introspect::Introspect`] primitives the resolvers consume
//! - [`resolve`] - The hierarchy walker and the field, property and method resolvers that turn
//!   a name into a member handle
//! - [`access`] - The public access surface: field and property reads and writes, method
//!   invocation and custom attribute queries
//!
//! ### Resolution
//!
//! Every operation resolves its flags first (explicit flags are used verbatim, `None` selects
//! the defaults for the operation's [`BindingMode`]), then walks the requested type and its
//! ancestors until one level declares a matching member. The nearest declaration wins. A
//! failed walk is reported once, naming the type the caller asked about.
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result). Resolution failures
//! ([`Error::MissingField`], [`Error::MissingProperty`], [`Error::MissingMethod`]) are raised
//! before anything is read, written or invoked. Failures raised while reading, writing or
//! invoking a resolved member are returned unchanged.
//!
//! ```rust
//! use dotreflect::prelude::*;
//!
//! let registry = TypeRegistry::new();
//! let leaf = registry.builder("Sample", "Leaf").build()?;
//! let obj = Object::new(&leaf);
//!
//! match obj.get_field_value("zzz", None) {
//!     Err(Error::MissingField { type_name, name, .. }) => {
//!         assert_eq!(type_name, "Sample.Leaf");
//!         assert_eq!(name, "zzz");
//!     }
//!     other => panic!("unexpected: {other:?}"),
//! }
//! # Ok::<(), dotreflect::Error>(())
//! ```

pub(crate) mod error;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// ```rust
/// use dotreflect::prelude::*;
///
/// let registry = TypeRegistry::new();
/// let ty = registry.builder("Sample", "Empty").build()?;
/// assert_eq!(ty.full_name(), "Sample.Empty");
/// # Ok::<(), dotreflect::Error>(())
/// ```
pub mod prelude;

/// Binding flags and the default binding policy.
///
/// [`BindingFlags`] describe which members are eligible for a lookup: instance or static
/// scope, public or non-public visibility, case-insensitive names, and how the type hierarchy
/// is searched. [`BindingPolicy`] supplies the defaults used when a caller passes `None`.
pub mod binding;

/// The managed object model consumed by the resolvers.
///
/// Types are declared through a [`metadata::typesystem::TypeBuilder`] and owned by a
/// [`metadata::typesystem::TypeRegistry`]. Instances are [`metadata::object::Object`]s holding
/// one slot per instance field of their type hierarchy. Member bodies (property accessors,
/// methods) are closures registered alongside the declaration.
pub mod metadata;

/// Member resolution across a type hierarchy.
///
/// - [`resolve::find_member`] - The hierarchy walker
/// - [`resolve::resolve_field`], [`resolve::resolve_property`], [`resolve::resolve_method`] -
///   Kind-specific resolvers returning member handles
pub mod resolve;

/// Public access surface.
///
/// Instance operations are inherent methods of [`metadata::object::Object`]. Static and
/// attribute operations are provided by the [`access::FieldAccess`], [`access::PropertyAccess`],
/// [`access::MethodAccess`] and [`access::AttributeAccess`] traits, implemented for every
/// [`access::Reflected`] target (objects and types).
pub mod access;

/// `dotreflect` Result type
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always
/// [`Error`]. This is used consistently throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// `dotreflect` Error type
///
/// The main error type for all operations in this crate. See [`Error`] for the full list
/// of variants.
pub use error::Error;

pub use binding::{resolve_flags, BindingFlags, BindingMode, BindingPolicy};
