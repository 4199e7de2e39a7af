//! Custom attributes applied to types and members.
//!
//! Each type, field, property and method carries a [`CustomAttributeList`]. Attributes are
//! instances of attribute types registered like any other type, so an attribute query for a
//! category type also matches attributes whose type derives from it.
//!
//! # Inheritance
//!
//! [`read_attributes`] optionally visits the same member on ancestor types. Whether an
//! ancestor's attribute is visible is governed by the [`AttributeUsage`] of its attribute
//! type:
//!
//! - `inherited: false` attributes are only visible on the member they are applied to
//! - `allow_multiple: false` attributes are reported once, nearest member first
//!
//! # Examples
//!
//! ```rust
//! use dotreflect::prelude::*;
//!
//! let registry = TypeRegistry::new();
//! let obsolete = registry.builder("System", "ObsoleteAttribute").build()?;
//! let widget = registry
//!     .builder("Sample", "Widget")
//!     .method(MethodBuilder::new("Draw").public().attribute(
//!         AttributeBuilder::new(&obsolete)
//!             .arg(CustomAttributeArgument::String("use Render".into())),
//!     ))
//!     .build()?;
//!
//! let attributes = widget.method_custom_attribute("Draw", &obsolete, false, None)?;
//! assert_eq!(attributes.len(), 1);
//! assert_eq!(
//!     attributes[0].fixed_args,
//!     [CustomAttributeArgument::String("use Render".into())]
//! );
//! # Ok::<(), dotreflect::Error>(())
//! ```

mod query;
mod types;

pub use query::read_attributes;
pub use types::*;
