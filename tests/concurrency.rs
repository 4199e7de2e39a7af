//! Concurrent access to shared types and objects.
//!
//! Types, objects and static fields are shared across threads; every slot is guarded by its
//! own lock, so concurrent readers and writers never observe a torn value.

use dotreflect::{prelude::*, Result};
use rayon::prelude::*;

fn create_counter(registry: &TypeRegistry) -> Result<TypeRc> {
    registry
        .builder("Sample", "Counter")
        .field(FieldBuilder::new("value", ValueKind::I4))
        .field(FieldBuilder::new("label", ValueKind::String).public())
        .field(FieldBuilder::new("hits", ValueKind::I8).static_())
        .property(PropertyBuilder::auto("Owner", ValueKind::String))
        .build()
}

#[test]
fn test_objects_are_independent_across_threads() -> Result<()> {
    let registry = TypeRegistry::new();
    let counter = create_counter(&registry)?;

    let results: Vec<Result<Value>> = (0..256)
        .into_par_iter()
        .map(|i| {
            let object = Object::new(&counter);
            object.set_field_value("value", Value::I4(i), None)?;
            object.set_property_value("owner", Value::from(format!("thread {i}")), None)?;
            object.get_field_value("VALUE", None)
        })
        .collect();

    for (i, result) in results.into_iter().enumerate() {
        assert_eq!(result?, Value::I4(i32::try_from(i).unwrap()));
    }

    Ok(())
}

#[test]
fn test_shared_object_sees_whole_values() -> Result<()> {
    let registry = TypeRegistry::new();
    let counter = create_counter(&registry)?;
    let object: ObjectRc = Object::new(&counter);
    let names: Vec<String> = (0..64).map(|i| format!("label {i}")).collect();

    names.par_iter().try_for_each(|name| {
        object.set_field_value("label", Value::from(name.as_str()), None)?;
        let current = object.get_field_value("label", None)?;
        assert!(names.iter().any(|name| current == Value::from(name.as_str())));
        Ok::<(), Error>(())
    })?;

    Ok(())
}

#[test]
fn test_static_fields_are_shared() -> Result<()> {
    let registry = TypeRegistry::new();
    let counter = create_counter(&registry)?;

    (0..128_i64).into_par_iter().try_for_each(|i| {
        let object = Object::new(&counter);
        object.set_static_field_value("hits", Value::I8(i), None)
    })?;

    let hits = counter.get_static_field_value("hits", None)?;
    assert!(matches!(hits, Value::I8(0..=127)));

    Ok(())
}

#[test]
fn test_concurrent_lookups_on_one_type() -> Result<()> {
    let registry = TypeRegistry::new();
    let counter = create_counter(&registry)?;
    let object = Object::new(&counter);

    let found = (0..512)
        .into_par_iter()
        .filter(|i| {
            let name = if i % 2 == 0 { "value" } else { "missing" };
            object.get_field_value(name, None).is_ok()
        })
        .count();
    assert_eq!(found, 256);

    Ok(())
}
