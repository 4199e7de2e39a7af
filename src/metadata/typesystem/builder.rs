//! Builders for declaring types and their members.
//!
//! [`TypeBuilder`] collects member declarations and registers the finished type with its
//! [`TypeRegistry`] in [`TypeBuilder::build`]. Members are declared with [`FieldBuilder`],
//! [`PropertyBuilder`] and [`MethodBuilder`]; attributes with [`AttributeBuilder`].
//!
//! Auto-implemented properties get a private backing field named `<Name>k__BackingField`
//! and accessor methods `get_Name` / `set_Name` that read and write it.
//!
//! # Example
//!
//! ```rust
//! use dotreflect::prelude::*;
//!
//! let registry = TypeRegistry::new();
//! let counter = registry
//!     .builder("Sample", "Counter")
//!     .field(FieldBuilder::new("count", ValueKind::I4))
//!     .property(PropertyBuilder::auto("Label", ValueKind::String).private_setter())
//!     .method(
//!         MethodBuilder::new("Increment")
//!             .public()
//!             .returns(ValueKind::I4)
//!             .body(|this, _| {
//!                 let this = this.ok_or_else(|| Error::TargetMismatch("Increment".into()))?;
//!                 let next = this.get_field_value("count", None)?.as_i4().unwrap_or_default() + 1;
//!                 this.set_field_value("count", Value::I4(next), None)?;
//!                 Ok(Value::I4(next))
//!             }),
//!     )
//!     .build()?;
//!
//! let object = Object::new(&counter);
//! object.invoke_method("Increment", None, &[])?;
//! assert_eq!(object.invoke_method("Increment", None, &[])?, Value::I4(2));
//! # Ok::<(), dotreflect::Error>(())
//! ```

use std::sync::Arc;

use crate::{
    metadata::{
        customattributes::{
            AttributeUsage, CustomAttribute, CustomAttributeArgument, CustomAttributeList,
            CustomAttributeNamedArgument,
        },
        field::{Field, FieldAttributes, FieldRc},
        method::{Method, MethodAccessFlags, MethodBody, MethodModifiers, MethodRc, Param},
        object::Object,
        property::{Property, PropertyAttributes},
        token::TableId,
        typesystem::{RuntimeType, TypeRc, TypeRef, TypeRegistry},
        value::{Value, ValueKind},
    },
    Error, Result,
};

/// Declares a custom attribute instance
pub struct AttributeBuilder {
    attribute_type: TypeRc,
    fixed_args: Vec<CustomAttributeArgument>,
    named_args: Vec<CustomAttributeNamedArgument>,
}

impl AttributeBuilder {
    /// Start an instance of `attribute_type`
    #[must_use]
    pub fn new(attribute_type: &TypeRc) -> Self {
        AttributeBuilder {
            attribute_type: attribute_type.clone(),
            fixed_args: Vec::new(),
            named_args: Vec::new(),
        }
    }

    /// Append a constructor argument
    #[must_use]
    pub fn arg(mut self, value: CustomAttributeArgument) -> Self {
        self.fixed_args.push(value);
        self
    }

    /// Set a field of the attribute
    #[must_use]
    pub fn field_arg(self, name: &str, value: CustomAttributeArgument) -> Self {
        self.named(true, name, value)
    }

    /// Set a property of the attribute
    #[must_use]
    pub fn property_arg(self, name: &str, value: CustomAttributeArgument) -> Self {
        self.named(false, name, value)
    }

    fn named(mut self, is_field: bool, name: &str, value: CustomAttributeArgument) -> Self {
        self.named_args.push(CustomAttributeNamedArgument {
            is_field,
            name: name.to_string(),
            arg_type: value.type_name(),
            value,
        });
        self
    }

    fn apply(self, registry: &TypeRegistry, target: &CustomAttributeList) -> Result<()> {
        target.push(Arc::new(CustomAttribute {
            token: registry.next_token(TableId::CustomAttribute)?,
            attribute_type: TypeRef::new(&self.attribute_type),
            fixed_args: self.fixed_args,
            named_args: self.named_args,
        }));
        Ok(())
    }
}

fn apply_all(
    attributes: Vec<AttributeBuilder>,
    registry: &TypeRegistry,
    target: &CustomAttributeList,
) -> Result<()> {
    for attribute in attributes {
        attribute.apply(registry, target)?;
    }
    Ok(())
}

/// Declares a field. Fields are private instance fields unless configured otherwise.
pub struct FieldBuilder {
    name: String,
    kind: ValueKind,
    flags: FieldAttributes,
    default: Option<Value>,
    attributes: Vec<AttributeBuilder>,
}

impl FieldBuilder {
    /// Start a private instance field
    #[must_use]
    pub fn new(name: &str, kind: ValueKind) -> Self {
        FieldBuilder {
            name: name.to_string(),
            kind,
            flags: FieldAttributes::PRIVATE,
            default: None,
            attributes: Vec::new(),
        }
    }

    /// Make the field public
    #[must_use]
    pub fn public(self) -> Self {
        self.access(FieldAttributes::PUBLIC)
    }

    /// Make the field private
    #[must_use]
    pub fn private(self) -> Self {
        self.access(FieldAttributes::PRIVATE)
    }

    /// Make the field accessible to subclasses only
    #[must_use]
    pub fn family(self) -> Self {
        self.access(FieldAttributes::FAMILY)
    }

    /// Make the field accessible within the assembly
    #[must_use]
    pub fn assembly(self) -> Self {
        self.access(FieldAttributes::ASSEMBLY)
    }

    fn access(mut self, access: FieldAttributes) -> Self {
        self.flags = self.flags.with_access(access);
        self
    }

    /// Store the field on the type instead of per instance
    #[must_use]
    pub fn static_(mut self) -> Self {
        self.flags |= FieldAttributes::STATIC;
        self
    }

    /// Mark the field `readonly`
    #[must_use]
    pub fn init_only(mut self) -> Self {
        self.flags |= FieldAttributes::INIT_ONLY;
        self
    }

    /// Make the field a compile-time constant of `value`
    #[must_use]
    pub fn literal(mut self, value: Value) -> Self {
        self.flags |= FieldAttributes::LITERAL | FieldAttributes::STATIC;
        self.default = Some(value);
        self
    }

    /// Initial value of the field, instead of the zero value of its kind
    #[must_use]
    pub fn default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Apply a custom attribute
    #[must_use]
    pub fn attribute(mut self, attribute: AttributeBuilder) -> Self {
        self.attributes.push(attribute);
        self
    }

    fn build(self, registry: &TypeRegistry) -> Result<FieldRc> {
        let default = self
            .default
            .unwrap_or_else(|| Value::default_for(self.kind));
        if !default.is_assignable_to(self.kind) {
            return Err(Error::TypeMismatch {
                member: self.name,
                expected: self.kind,
                found: default.kind(),
            });
        }

        let field = Arc::new(Field::new(
            registry.next_token(TableId::Field)?,
            self.name,
            self.flags,
            self.kind,
            default,
        ));
        apply_all(self.attributes, registry, &field.custom_attributes)?;
        Ok(field)
    }
}

/// Declares a method. Methods are private instance methods unless configured otherwise.
pub struct MethodBuilder {
    name: String,
    access: MethodAccessFlags,
    modifiers: MethodModifiers,
    params: Vec<Param>,
    return_kind: ValueKind,
    body: Option<MethodBody>,
    attributes: Vec<AttributeBuilder>,
}

impl MethodBuilder {
    /// Start a private instance method without parameters, returning `Void`
    #[must_use]
    pub fn new(name: &str) -> Self {
        MethodBuilder {
            name: name.to_string(),
            access: MethodAccessFlags::PRIVATE,
            modifiers: MethodModifiers::HIDE_BY_SIG,
            params: Vec::new(),
            return_kind: ValueKind::Void,
            body: None,
            attributes: Vec::new(),
        }
    }

    /// Make the method public
    #[must_use]
    pub fn public(mut self) -> Self {
        self.access = MethodAccessFlags::PUBLIC;
        self
    }

    /// Make the method private
    #[must_use]
    pub fn private(mut self) -> Self {
        self.access = MethodAccessFlags::PRIVATE;
        self
    }

    /// Make the method accessible to subclasses only
    #[must_use]
    pub fn family(mut self) -> Self {
        self.access = MethodAccessFlags::FAMILY;
        self
    }

    /// Make the method static
    #[must_use]
    pub fn static_(mut self) -> Self {
        self.modifiers |= MethodModifiers::STATIC;
        self
    }

    /// Make the method virtual
    #[must_use]
    pub fn virtual_(mut self) -> Self {
        self.modifiers |= MethodModifiers::VIRTUAL;
        self
    }

    /// Make the method abstract; abstract methods have no body
    #[must_use]
    pub fn abstract_(mut self) -> Self {
        self.modifiers |= MethodModifiers::ABSTRACT | MethodModifiers::VIRTUAL;
        self.body = None;
        self
    }

    /// Append a parameter
    #[must_use]
    pub fn param(mut self, name: &str, kind: ValueKind) -> Self {
        self.params.push(Param::new(name, kind));
        self
    }

    /// Declared kind of the return value
    #[must_use]
    pub fn returns(mut self, kind: ValueKind) -> Self {
        self.return_kind = kind;
        self
    }

    /// The implementation of the method
    #[must_use]
    pub fn body<F>(mut self, body: F) -> Self
    where
        F: Fn(Option<&Object>, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.body = Some(Arc::new(body));
        self
    }

    /// Apply a custom attribute
    #[must_use]
    pub fn attribute(mut self, attribute: AttributeBuilder) -> Self {
        self.attributes.push(attribute);
        self
    }

    fn build(self, registry: &TypeRegistry) -> Result<MethodRc> {
        let mut method = Method::new(
            registry.next_token(TableId::MethodDef)?,
            self.name,
            self.access,
            self.modifiers,
        );
        method.params = self.params;
        method.return_kind = self.return_kind;
        method.body = self.body;

        apply_all(self.attributes, registry, &method.custom_attributes)?;
        Ok(Arc::new(method))
    }
}

struct AccessorSpec {
    access: MethodAccessFlags,
    /// `None` reads or writes the backing field
    body: Option<MethodBody>,
}

/// Declares a property and its accessors
pub struct PropertyBuilder {
    name: String,
    kind: ValueKind,
    is_static: bool,
    getter: Option<AccessorSpec>,
    setter: Option<AccessorSpec>,
    attributes: Vec<AttributeBuilder>,
}

impl PropertyBuilder {
    /// Start a property without accessors
    #[must_use]
    pub fn new(name: &str, kind: ValueKind) -> Self {
        PropertyBuilder {
            name: name.to_string(),
            kind,
            is_static: false,
            getter: None,
            setter: None,
            attributes: Vec::new(),
        }
    }

    /// Start an auto-implemented property with a public getter and setter
    #[must_use]
    pub fn auto(name: &str, kind: ValueKind) -> Self {
        let mut builder = Self::new(name, kind);
        builder.getter = Some(AccessorSpec {
            access: MethodAccessFlags::PUBLIC,
            body: None,
        });
        builder.setter = Some(AccessorSpec {
            access: MethodAccessFlags::PUBLIC,
            body: None,
        });
        builder
    }

    /// Make the property static
    #[must_use]
    pub fn static_(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Declare a getter with the given access and implementation
    #[must_use]
    pub fn get<F>(mut self, access: MethodAccessFlags, body: F) -> Self
    where
        F: Fn(Option<&Object>, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.getter = Some(AccessorSpec {
            access,
            body: Some(Arc::new(body)),
        });
        self
    }

    /// Declare a setter with the given access and implementation. The new value is the only
    /// argument.
    #[must_use]
    pub fn set<F>(mut self, access: MethodAccessFlags, body: F) -> Self
    where
        F: Fn(Option<&Object>, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.setter = Some(AccessorSpec {
            access,
            body: Some(Arc::new(body)),
        });
        self
    }

    /// Remove the setter
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.setter = None;
        self
    }

    /// Remove the getter
    #[must_use]
    pub fn write_only(mut self) -> Self {
        self.getter = None;
        self
    }

    /// Make the getter private
    #[must_use]
    pub fn private_getter(mut self) -> Self {
        if let Some(getter) = &mut self.getter {
            getter.access = MethodAccessFlags::PRIVATE;
        }
        self
    }

    /// Make the setter private
    #[must_use]
    pub fn private_setter(mut self) -> Self {
        if let Some(setter) = &mut self.setter {
            setter.access = MethodAccessFlags::PRIVATE;
        }
        self
    }

    /// Apply a custom attribute
    #[must_use]
    pub fn attribute(mut self, attribute: AttributeBuilder) -> Self {
        self.attributes.push(attribute);
        self
    }

    fn modifiers(&self) -> MethodModifiers {
        let mut modifiers = MethodModifiers::SPECIAL_NAME | MethodModifiers::HIDE_BY_SIG;
        if self.is_static {
            modifiers |= MethodModifiers::STATIC;
        }
        modifiers
    }

    fn build(self, registry: &TypeRegistry, ty: &RuntimeType) -> Result<()> {
        let auto = [&self.getter, &self.setter]
            .into_iter()
            .flatten()
            .any(|accessor| accessor.body.is_none());

        let backing = if auto {
            let mut field = FieldBuilder::new(&format!("<{}>k__BackingField", self.name), self.kind);
            if self.is_static {
                field = field.static_();
            }
            let field = field.build(registry)?;
            ty.fields.push(field.clone());
            Some(field)
        } else {
            None
        };

        let property = Arc::new(Property::new(
            registry.next_token(TableId::Property)?,
            self.name.clone(),
            PropertyAttributes::empty(),
            self.kind,
        ));
        let modifiers = self.modifiers();

        if let Some(getter) = self.getter {
            let mut method = Method::new(
                registry.next_token(TableId::MethodDef)?,
                format!("get_{}", self.name),
                getter.access,
                modifiers,
            );
            method.return_kind = self.kind;
            method.body = getter.body.or_else(|| backing.clone().map(read_backing));

            let method = Arc::new(method);
            ty.methods.push(method.clone());
            let _ = property.fn_getter.set(method);
        }

        if let Some(setter) = self.setter {
            let mut method = Method::new(
                registry.next_token(TableId::MethodDef)?,
                format!("set_{}", self.name),
                setter.access,
                modifiers,
            );
            method.params = vec![Param::new("value", self.kind)];
            method.body = setter.body.or_else(|| backing.clone().map(write_backing));

            let method = Arc::new(method);
            ty.methods.push(method.clone());
            let _ = property.fn_setter.set(method);
        }

        apply_all(self.attributes, registry, &property.custom_attributes)?;
        ty.properties.push(property);
        Ok(())
    }
}

fn read_backing(field: FieldRc) -> MethodBody {
    Arc::new(move |this: Option<&Object>, _: &[Value]| field.read(this))
}

fn write_backing(field: FieldRc) -> MethodBody {
    Arc::new(move |this: Option<&Object>, args: &[Value]| {
        let value = args.first().cloned().unwrap_or(Value::Null);
        field.write(this, value)?;
        Ok(Value::Void)
    })
}

/// Declares a type and registers it on [`TypeBuilder::build`]
pub struct TypeBuilder<'r> {
    registry: &'r TypeRegistry,
    namespace: String,
    name: String,
    base: Option<TypeRc>,
    enclosing: Option<TypeRc>,
    usage: Option<AttributeUsage>,
    fields: Vec<FieldBuilder>,
    properties: Vec<PropertyBuilder>,
    methods: Vec<MethodBuilder>,
    attributes: Vec<AttributeBuilder>,
}

impl<'r> TypeBuilder<'r> {
    /// Create a new builder for `namespace.name`, registering into `registry`
    #[must_use]
    pub fn new(registry: &'r TypeRegistry, namespace: &str, name: &str) -> Self {
        TypeBuilder {
            registry,
            namespace: namespace.to_string(),
            name: name.to_string(),
            base: None,
            enclosing: None,
            usage: None,
            fields: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Set the base type
    #[must_use]
    pub fn extends(mut self, base: &TypeRc) -> Self {
        self.base = Some(base.clone());
        self
    }

    /// Nest this type inside `enclosing`
    #[must_use]
    pub fn nested_in(mut self, enclosing: &TypeRc) -> Self {
        self.enclosing = Some(enclosing.clone());
        self
    }

    /// Set how instances of this type behave when applied as attributes
    #[must_use]
    pub fn attribute_usage(mut self, usage: AttributeUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    /// Declare a field
    #[must_use]
    pub fn field(mut self, field: FieldBuilder) -> Self {
        self.fields.push(field);
        self
    }

    /// Declare a property
    #[must_use]
    pub fn property(mut self, property: PropertyBuilder) -> Self {
        self.properties.push(property);
        self
    }

    /// Declare a method
    #[must_use]
    pub fn method(mut self, method: MethodBuilder) -> Self {
        self.methods.push(method);
        self
    }

    /// Apply a custom attribute to the type
    #[must_use]
    pub fn attribute(mut self, attribute: AttributeBuilder) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Create the type with all declared members and register it.
    ///
    /// Members keep their declaration order; backing fields and accessors of properties are
    /// appended as their property is declared.
    ///
    /// # Errors
    /// Returns [`Error::TypeInsert`] if the full name is already registered,
    /// [`Error::TypeMismatch`] if a field default does not match the field's kind, or
    /// [`Error::TokenOverflow`] if a metadata table has no rows left.
    pub fn build(self) -> Result<TypeRc> {
        let registry = self.registry;
        let ty = Arc::new(RuntimeType::new(
            registry.next_token(TableId::TypeDef)?,
            self.namespace,
            self.name,
        ));

        if let Some(base) = &self.base {
            ty.set_base(base);
        }
        if let Some(enclosing) = &self.enclosing {
            ty.set_enclosing_type(enclosing);
        }
        if let Some(usage) = self.usage {
            ty.set_attribute_usage(usage);
        }

        for field in self.fields {
            ty.fields.push(field.build(registry)?);
        }
        for property in self.properties {
            property.build(registry, &ty)?;
        }
        for method in self.methods {
            ty.methods.push(method.build(registry)?);
        }
        apply_all(self.attributes, registry, &ty.custom_attributes)?;

        registry.insert(&ty)?;
        Ok(ty)
    }
}
