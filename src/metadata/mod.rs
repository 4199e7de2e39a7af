//! The object model members are resolved against.
//!
//! Types are declared through a [`typesystem::TypeRegistry`] and carry fields, properties,
//! methods and custom attributes. [`object::Object`] instances hold the per-instance field
//! storage. [`introspect::Introspect`] exposes the per-level lookups the resolvers in
//! [`crate::resolve`] walk the hierarchy with.
//!
//! # Key Components
//!
//! - [`typesystem`] - Runtime types, registry and builders
//! - [`field`], [`property`], [`method`] - Member definitions and their read, write and
//!   invoke primitives
//! - [`customattributes`] - Attribute instances, usage and the attribute query
//! - [`object`] - Instances and their field slots
//! - [`value`] - Dynamic values and their kinds
//! - [`token`] - Tokens identifying types and members

pub mod customattributes;
pub mod field;
pub mod introspect;
pub mod method;
pub mod object;
pub mod property;
pub mod token;
pub mod typesystem;
pub mod value;
