//! A small sample hierarchy shared by the unit tests.
//!
//! ```text
//! Sample.Root                  fields: level, name, title, counter (static), shared (static),
//!   |                                  Version (literal)
//!   |                          properties: Caption, Id, Secret, Sink, Instances (static)
//!   |                          methods: Describe, Add (static), Fail, Reset (static)
//!   +- Sample.Middle           fields: level, note
//!        |                     methods: Describe, Create (static)
//!        +- Sample.Leaf        fields: title
//!             |                properties: Label
//!             |                methods: Describe
//!             +- Sample.Leaf+Inner (nested)
//! ```
//!
//! Attribute types: `MarkerAttribute` (no usage), `DerivedMarkerAttribute : MarkerAttribute`,
//! `SealedNoteAttribute` (not inherited) and `TagAttribute` (inherited, multiple).

use crate::{
    metadata::{
        customattributes::{AttributeUsage, CustomAttributeArgument, CustomAttributeRc},
        method::MethodAccessFlags,
        typesystem::{
            AttributeBuilder, FieldBuilder, MethodBuilder, PropertyBuilder, TypeRc, TypeRegistry,
        },
        value::{Value, ValueKind},
    },
    Error,
};

/// The sample hierarchy. Owns its registry, dropping it drops every type.
pub struct Hierarchy {
    pub registry: TypeRegistry,
    pub root: TypeRc,
    pub middle: TypeRc,
    pub leaf: TypeRc,
    pub nested: TypeRc,
    pub marker: TypeRc,
    pub derived_marker: TypeRc,
    pub sealed: TypeRc,
    pub tag: TypeRc,
}

pub fn create_hierarchy() -> Hierarchy {
    let registry = TypeRegistry::new();

    let marker = registry
        .builder("Sample", "MarkerAttribute")
        .build()
        .unwrap();
    let derived_marker = registry
        .builder("Sample", "DerivedMarkerAttribute")
        .extends(&marker)
        .build()
        .unwrap();
    let sealed = registry
        .builder("Sample", "SealedNoteAttribute")
        .attribute_usage(AttributeUsage {
            inherited: false,
            allow_multiple: false,
        })
        .build()
        .unwrap();
    let tag = registry
        .builder("Sample", "TagAttribute")
        .attribute_usage(AttributeUsage {
            inherited: true,
            allow_multiple: true,
        })
        .build()
        .unwrap();

    let root = registry
        .builder("Sample", "Root")
        .field(
            FieldBuilder::new("level", ValueKind::I4)
                .default(Value::I4(1))
                .attribute(AttributeBuilder::new(&marker)),
        )
        .field(FieldBuilder::new("name", ValueKind::String))
        .field(
            FieldBuilder::new("title", ValueKind::String)
                .public()
                .attribute(AttributeBuilder::new(&marker)),
        )
        .field(FieldBuilder::new("counter", ValueKind::I4).static_())
        .field(
            FieldBuilder::new("shared", ValueKind::I4)
                .public()
                .static_()
                .default(Value::I4(10)),
        )
        .field(
            FieldBuilder::new("Version", ValueKind::String)
                .public()
                .literal(Value::from("1.0")),
        )
        .property(
            PropertyBuilder::auto("Caption", ValueKind::String)
                .attribute(AttributeBuilder::new(&marker)),
        )
        .property(
            PropertyBuilder::new("Id", ValueKind::I4)
                .get(MethodAccessFlags::PUBLIC, |_, _| Ok(Value::I4(7))),
        )
        .property(PropertyBuilder::auto("Secret", ValueKind::String).private_setter())
        .property(PropertyBuilder::auto("Sink", ValueKind::String).write_only())
        .property(
            PropertyBuilder::auto("Instances", ValueKind::I4)
                .static_()
                .attribute(AttributeBuilder::new(&marker)),
        )
        .method(
            MethodBuilder::new("Describe")
                .public()
                .virtual_()
                .returns(ValueKind::String)
                .body(|_, _| Ok(Value::from("root")))
                .attribute(AttributeBuilder::new(&marker))
                .attribute(
                    AttributeBuilder::new(&sealed)
                        .arg(CustomAttributeArgument::String("root only".to_string())),
                )
                .attribute(AttributeBuilder::new(&tag).property_arg(
                    "Name",
                    CustomAttributeArgument::String("root".to_string()),
                )),
        )
        .method(
            MethodBuilder::new("Add")
                .public()
                .static_()
                .param("a", ValueKind::I4)
                .param("b", ValueKind::I4)
                .returns(ValueKind::I4)
                .body(|_, args| match args {
                    [Value::I4(a), Value::I4(b)] => Ok(Value::I4(a + b)),
                    _ => Err(Error::Target("Add expects two integers".to_string())),
                })
                .attribute(AttributeBuilder::new(&tag)),
        )
        .method(
            MethodBuilder::new("Fail")
                .public()
                .body(|_, _| Err(Error::Target("boom".to_string()))),
        )
        .method(
            MethodBuilder::new("Reset")
                .static_()
                .body(|_, _| Ok(Value::Void)),
        )
        .build()
        .unwrap();

    let middle = registry
        .builder("Sample", "Middle")
        .extends(&root)
        .field(
            FieldBuilder::new("level", ValueKind::I4)
                .default(Value::I4(2))
                .attribute(AttributeBuilder::new(&marker)),
        )
        .field(FieldBuilder::new("note", ValueKind::String).family())
        .method(
            MethodBuilder::new("Describe")
                .public()
                .virtual_()
                .returns(ValueKind::String)
                .body(|_, _| Ok(Value::from("middle")))
                .attribute(AttributeBuilder::new(&tag)),
        )
        .method(
            MethodBuilder::new("Create")
                .public()
                .static_()
                .returns(ValueKind::String)
                .body(|_, _| Ok(Value::from("created"))),
        )
        .build()
        .unwrap();

    let leaf = registry
        .builder("Sample", "Leaf")
        .extends(&middle)
        .field(
            FieldBuilder::new("title", ValueKind::String)
                .public()
                .attribute(AttributeBuilder::new(&derived_marker)),
        )
        .property(
            PropertyBuilder::auto("Label", ValueKind::String)
                .attribute(AttributeBuilder::new(&marker)),
        )
        .method(
            MethodBuilder::new("Describe")
                .public()
                .virtual_()
                .returns(ValueKind::String)
                .body(|_, _| Ok(Value::from("leaf")))
                .attribute(AttributeBuilder::new(&tag)),
        )
        .build()
        .unwrap();

    let nested = registry
        .builder("Sample", "Inner")
        .nested_in(&leaf)
        .build()
        .unwrap();

    Hierarchy {
        registry,
        root,
        middle,
        leaf,
        nested,
        marker,
        derived_marker,
        sealed,
        tag,
    }
}

/// Full names of the attribute types, in order
pub fn attribute_names(attributes: &[CustomAttributeRc]) -> Vec<String> {
    attributes
        .iter()
        .map(|attribute| {
            attribute
                .attribute_type()
                .map(|ty| ty.full_name())
                .unwrap_or_default()
        })
        .collect()
}
