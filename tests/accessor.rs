//! Integration tests for name-based member access.
//!
//! Builds a small three-level hierarchy the way a consumer of the crate would and drives
//! every access operation through the public API only.

use dotreflect::{prelude::*, Result};

struct Shapes {
    _registry: TypeRegistry,
    shape: TypeRc,
    polygon: TypeRc,
    square: TypeRc,
    obsolete: TypeRc,
}

/// `Shape <- Polygon <- Square`, with one attribute type `ObsoleteAttribute`.
fn create_shapes() -> Result<Shapes> {
    let registry = TypeRegistry::new();

    let obsolete = registry
        .builder("System", "ObsoleteAttribute")
        .attribute_usage(AttributeUsage {
            inherited: true,
            allow_multiple: false,
        })
        .build()?;

    let shape = registry
        .builder("Geometry", "Shape")
        .field(FieldBuilder::new("id", ValueKind::I4).default(Value::I4(-1)))
        .field(FieldBuilder::new("color", ValueKind::String).public())
        .field(FieldBuilder::new("created", ValueKind::I4).static_())
        .property(PropertyBuilder::auto("Name", ValueKind::String))
        .property(
            PropertyBuilder::new("Kind", ValueKind::String)
                .get(MethodAccessFlags::PUBLIC, |_, _| Ok(Value::from("shape"))),
        )
        .method(
            MethodBuilder::new("Area")
                .public()
                .virtual_()
                .returns(ValueKind::R8)
                .body(|_, _| Ok(Value::R8(0.0)))
                .attribute(
                    AttributeBuilder::new(&obsolete)
                        .arg(CustomAttributeArgument::String("Use Measure".to_string())),
                ),
        )
        .method(
            MethodBuilder::new("Count")
                .public()
                .static_()
                .returns(ValueKind::I4)
                .body(|_, _| Ok(Value::I4(3))),
        )
        .build()?;

    let polygon = registry
        .builder("Geometry", "Polygon")
        .extends(&shape)
        .field(FieldBuilder::new("sides", ValueKind::I4).family())
        .build()?;

    let square = registry
        .builder("Geometry", "Square")
        .extends(&polygon)
        .field(FieldBuilder::new("side", ValueKind::R8).default(Value::R8(1.0)))
        .method(
            MethodBuilder::new("Area")
                .public()
                .virtual_()
                .returns(ValueKind::R8)
                .body(|this, _| {
                    let this = this.ok_or_else(|| Error::TargetMismatch("Area".to_string()))?;
                    let side = this.get_field_value("side", None)?.as_r8().unwrap_or_default();
                    Ok(Value::R8(side * side))
                }),
        )
        .build()?;

    Ok(Shapes {
        _registry: registry,
        shape,
        polygon,
        square,
        obsolete,
    })
}

#[test]
fn test_failure_names_requested_type() -> Result<()> {
    let shapes = create_shapes()?;
    let square = Object::new(&shapes.square);

    let error = square.get_field_value("radius", None).unwrap_err();
    assert!(matches!(
        &error,
        Error::MissingField { type_name, name, .. }
            if type_name == "Geometry.Square" && name == "radius"
    ));
    assert_eq!(
        error.to_string(),
        "Field Geometry.Square.radius could not be found with the following BindingFlags: \
         IgnoreCase, Instance, Public, NonPublic, FlattenHierarchy"
    );

    Ok(())
}

#[test]
fn test_fields_across_levels() -> Result<()> {
    let shapes = create_shapes()?;
    let square = Object::new(&shapes.square);

    assert_eq!(square.get_field_value("ID", None)?, Value::I4(-1));
    square.set_field_value("sides", Value::I4(4), None)?;
    square.set_field_value("Side", Value::R8(3.0), None)?;

    assert_eq!(square.get_field_value("sides", None)?, Value::I4(4));
    assert_eq!(square.invoke_method("area", None, &[])?, Value::R8(9.0));

    Ok(())
}

#[test]
fn test_case_sensitivity_toggle() -> Result<()> {
    let shapes = create_shapes()?;
    let square = Object::new(&shapes.square);
    let exact = resolve_flags(None, BindingMode::NonStatic) - BindingFlags::IGNORE_CASE;

    assert!(square.get_field_value("color", Some(exact)).is_ok());
    assert!(matches!(
        square.get_field_value("Color", Some(exact)),
        Err(Error::MissingField { .. })
    ));
    assert!(square.get_field_value("Color", None).is_ok());

    Ok(())
}

#[test]
fn test_default_scoping_per_operation() -> Result<()> {
    let shapes = create_shapes()?;
    let square = Object::new(&shapes.square);

    assert!(matches!(
        square.get_field_value("created", None),
        Err(Error::MissingField { .. })
    ));
    square.set_static_field_value("created", Value::I4(5), None)?;
    assert_eq!(
        shapes.shape.get_static_field_value("created", None)?,
        Value::I4(5)
    );

    assert!(matches!(
        square.invoke_method("Count", None, &[]),
        Err(Error::MissingMethod { .. })
    ));
    assert_eq!(
        shapes.square.invoke_static_method("count", None, &[])?,
        Value::I4(3)
    );

    Ok(())
}

#[test]
fn test_explicit_flags_are_not_widened() -> Result<()> {
    let shapes = create_shapes()?;
    let square = Object::new(&shapes.square);
    let public = BindingFlags::INSTANCE | BindingFlags::PUBLIC;

    assert!(square.get_field_value("color", Some(public)).is_ok());
    assert!(matches!(
        square.get_field_value("id", Some(public)),
        Err(Error::MissingField { .. })
    ));

    let declared = public | BindingFlags::NON_PUBLIC | BindingFlags::DECLARED_ONLY;
    assert!(square.get_field_value("side", Some(declared)).is_ok());
    assert!(square.get_field_value("sides", Some(declared)).is_ok());
    assert!(matches!(
        square.get_field_value("Sides", Some(declared)),
        Err(Error::MissingField { .. })
    ));

    Ok(())
}

#[test]
fn test_missing_accessor_differs_from_missing_property() -> Result<()> {
    let shapes = create_shapes()?;
    let square = Object::new(&shapes.square);

    assert_eq!(square.get_property_value("kind", None)?, Value::from("shape"));

    let no_setter = square
        .set_property_value("Kind", Value::from("circle"), None)
        .unwrap_err();
    assert!(no_setter.to_string().starts_with("Setter for Property Geometry.Square.Kind"));

    let no_property = square.get_property_value("Radius", None).unwrap_err();
    assert!(no_property.to_string().starts_with("Property Geometry.Square.Radius"));

    Ok(())
}

#[test]
fn test_property_round_trip_and_enumeration() -> Result<()> {
    let shapes = create_shapes()?;
    let square = Object::new(&shapes.square);

    square.set_property_value("name", Value::from("unit"), None)?;
    assert_eq!(square.get_property_value("Name", None)?, Value::from("unit"));

    let flags = resolve_flags(None, BindingMode::NonStatic) | BindingFlags::GET_PROPERTY;
    let handle = shapes.polygon.property_info("Name", flags)?;
    assert_eq!(handle.declaring_type().full_name(), "Geometry.Shape");

    Ok(())
}

#[test]
fn test_attributes_through_overrides() -> Result<()> {
    let shapes = create_shapes()?;
    let square = Object::new(&shapes.square);

    assert!(square.method_custom_attributes("Area", false, None)?.is_empty());

    let inherited = square.method_custom_attribute("Area", &shapes.obsolete, true, None)?;
    assert_eq!(inherited.len(), 1);
    assert!(matches!(
        &inherited[0].fixed_args[..],
        [CustomAttributeArgument::String(message)] if message == "Use Measure"
    ));

    let any_kind = shapes
        .square
        .member_custom_attributes("area", Some(&shapes.obsolete), true, None)?;
    assert_eq!(any_kind.len(), 1);

    Ok(())
}

#[test]
fn test_errors_inside_members_pass_through() -> Result<()> {
    let shapes = create_shapes()?;
    let square = Object::new(&shapes.square);

    assert!(matches!(
        square.set_field_value("side", Value::from("wide"), None),
        Err(Error::TypeMismatch {
            expected: ValueKind::R8,
            found: ValueKind::String,
            ..
        })
    ));
    assert!(matches!(
        square.invoke_method("Area", None, &[Value::I4(1)]),
        Err(Error::ParameterCount { .. })
    ));

    Ok(())
}

#[test]
fn test_dropped_registry_means_no_type() -> Result<()> {
    let square = {
        let shapes = create_shapes()?;
        Object::new(&shapes.square)
    };

    assert!(matches!(square.get_field_value("id", None), Err(Error::NoType)));
    assert!(matches!(
        square.invoke_method("Area", None, &[]),
        Err(Error::NoType)
    ));
    assert!(matches!(
        square.get_property_value("Name", None),
        Err(Error::NoType)
    ));

    Ok(())
}
