//! Fluent construction of class descriptors.
//!
//! Builders are the registration surface of the crate: where a reflective runtime
//! would scan a class, embedders of this crate declare the same facts through
//! [`ClassBuilder`] and its member builders. The result is an immutable
//! [`ClassDescriptor`] ready for the class model.
//!
//! # Examples
//!
//! ```rust
//! use testscope::metadata::descriptor::ClassBuilder;
//! use testscope::metadata::tags::{builtin, Tag};
//!
//! #[derive(Default)]
//! struct Fixture {
//!     counter: i32,
//! }
//!
//! let class = ClassBuilder::new("Fixture")
//!     .namespace("demo")
//!     .public()
//!     .constructor(|ctor| ctor.public().creates(Fixture::default))
//!     .method(|method| {
//!         method
//!             .name("count")
//!             .public()
//!             .tag(Tag::marker(builtin::TEST))
//!             .invoke_on(|fixture: &Fixture| Ok(fixture.counter))
//!     })
//!     .field(|field| {
//!         field
//!             .name("counter")
//!             .public()
//!             .ty::<i32>()
//!             .get(|fixture: &Fixture| fixture.counter)
//!     })
//!     .build()?;
//!
//! assert_eq!(class.fullname(), "demo.Fixture");
//! assert_eq!(class.methods().len(), 1);
//! # Ok::<(), testscope::Error>(())
//! ```

use std::any::Any;
use std::sync::Arc;

use crate::error::BoxedError;
use crate::metadata::descriptor::{
    ClassDescriptor, ClassDescriptorRc, ClassId, ClassModifiers, ConstructorBody,
    ConstructorDescriptor, FieldDescriptor, FieldGetter, FieldSetter, MemberModifiers,
    MethodBody, MethodDescriptor, TypeDesc,
};
use crate::metadata::tags::Tag;
use crate::Result;

/// Builder for one declared method.
///
/// Obtained through [`ClassBuilder::method`]; every method needs at least a name.
/// Methods without a body can be declared (they still take part in shadow
/// resolution) but fail when invoked.
pub struct MethodBuilder {
    name: String,
    modifiers: MemberModifiers,
    params: Vec<TypeDesc>,
    returns: Option<TypeDesc>,
    tags: Vec<Tag>,
    body: Option<MethodBody>,
}

impl Default for MethodBuilder {
    fn default() -> Self {
        Self {
            name: String::new(),
            modifiers: MemberModifiers::empty(),
            params: Vec::new(),
            returns: None,
            tags: Vec::new(),
            body: None,
        }
    }
}

impl MethodBuilder {
    /// Sets the method's name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replaces the modifier flags wholesale.
    #[must_use]
    pub fn modifiers(mut self, modifiers: MemberModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Marks the method public.
    #[must_use]
    pub fn public(mut self) -> Self {
        self.modifiers |= MemberModifiers::PUBLIC;
        self
    }

    /// Marks the method private.
    #[must_use]
    pub fn private(mut self) -> Self {
        self.modifiers |= MemberModifiers::PRIVATE;
        self
    }

    /// Marks the method protected.
    #[must_use]
    pub fn protected(mut self) -> Self {
        self.modifiers |= MemberModifiers::PROTECTED;
        self
    }

    /// Marks the method static.
    #[must_use]
    pub fn static_member(mut self) -> Self {
        self.modifiers |= MemberModifiers::STATIC;
        self
    }

    /// Appends a parameter of type `T` to the signature.
    #[must_use]
    pub fn parameter<T: 'static>(mut self) -> Self {
        self.params.push(TypeDesc::of::<T>());
        self
    }

    /// Sets the return type to `T`. Defaults to void when never called.
    #[must_use]
    pub fn returns<T: 'static>(mut self) -> Self {
        self.returns = Some(TypeDesc::of::<T>());
        self
    }

    /// Attaches a tag to this declaration site.
    #[must_use]
    pub fn tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Sets the raw executable body.
    #[must_use]
    pub fn body<F>(mut self, body: F) -> Self
    where
        F: Fn(Option<&dyn Any>) -> std::result::Result<Box<dyn Any>, BoxedError>
            + Send
            + Sync
            + 'static,
    {
        self.body = Some(Box::new(body));
        self
    }

    /// Typed convenience for instance methods: downcasts the receiver to `S`,
    /// runs `body`, and records `R` as the return type.
    #[must_use]
    pub fn invoke_on<S, R, F>(mut self, body: F) -> Self
    where
        S: 'static,
        R: 'static,
        F: Fn(&S) -> std::result::Result<R, BoxedError> + Send + Sync + 'static,
    {
        self.returns = Some(TypeDesc::of::<R>());
        self.body = Some(Box::new(move |target: Option<&dyn Any>| {
            let receiver = target
                .and_then(|any| any.downcast_ref::<S>())
                .ok_or_else(|| BoxedError::from("receiver is not of the declaring type"))?;
            body(receiver).map(|value| Box::new(value) as Box<dyn Any>)
        }));
        self
    }

    fn build(self) -> Result<MethodDescriptor> {
        if self.name.is_empty() {
            return Err(invalid_member_error!("a declared method must have a name"));
        }
        Ok(MethodDescriptor {
            name: self.name,
            modifiers: self.modifiers,
            params: self.params,
            returns: self.returns.unwrap_or_else(TypeDesc::void),
            tags: self.tags,
            body: self.body,
        })
    }
}

/// Builder for one declared field.
///
/// Obtained through [`ClassBuilder::field`]. Tagged fields that the model should
/// read need a getter; fields receiving injected parameters need a setter too.
pub struct FieldBuilder {
    name: String,
    modifiers: MemberModifiers,
    ty: Option<TypeDesc>,
    tags: Vec<Tag>,
    getter: Option<FieldGetter>,
    setter: Option<FieldSetter>,
}

impl Default for FieldBuilder {
    fn default() -> Self {
        Self {
            name: String::new(),
            modifiers: MemberModifiers::empty(),
            ty: None,
            tags: Vec::new(),
            getter: None,
            setter: None,
        }
    }
}

impl FieldBuilder {
    /// Sets the field's name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replaces the modifier flags wholesale.
    #[must_use]
    pub fn modifiers(mut self, modifiers: MemberModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Marks the field public.
    #[must_use]
    pub fn public(mut self) -> Self {
        self.modifiers |= MemberModifiers::PUBLIC;
        self
    }

    /// Marks the field private.
    #[must_use]
    pub fn private(mut self) -> Self {
        self.modifiers |= MemberModifiers::PRIVATE;
        self
    }

    /// Marks the field static.
    #[must_use]
    pub fn static_member(mut self) -> Self {
        self.modifiers |= MemberModifiers::STATIC;
        self
    }

    /// Sets the field's type to `T`.
    #[must_use]
    pub fn ty<T: 'static>(mut self) -> Self {
        self.ty = Some(TypeDesc::of::<T>());
        self
    }

    /// Attaches a tag to this declaration site.
    #[must_use]
    pub fn tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Sets the raw getter.
    #[must_use]
    pub fn getter<F>(mut self, getter: F) -> Self
    where
        F: Fn(&dyn Any) -> Option<Box<dyn Any>> + Send + Sync + 'static,
    {
        self.getter = Some(Box::new(getter));
        self
    }

    /// Sets the raw setter.
    #[must_use]
    pub fn setter<F>(mut self, setter: F) -> Self
    where
        F: Fn(&mut dyn Any, &dyn Any) -> bool + Send + Sync + 'static,
    {
        self.setter = Some(Box::new(setter));
        self
    }

    /// Typed convenience getter: downcasts the receiver to `S` and clones the
    /// value `read` produces. Records `T` as the field type.
    #[must_use]
    pub fn get<S, T, F>(mut self, read: F) -> Self
    where
        S: 'static,
        T: 'static,
        F: Fn(&S) -> T + Send + Sync + 'static,
    {
        self.ty = Some(TypeDesc::of::<T>());
        self.getter = Some(Box::new(move |target: &dyn Any| {
            target
                .downcast_ref::<S>()
                .map(|receiver| Box::new(read(receiver)) as Box<dyn Any>)
        }));
        self
    }

    /// Typed convenience setter: downcasts receiver and value, then runs `write`.
    #[must_use]
    pub fn set<S, T, F>(mut self, write: F) -> Self
    where
        S: 'static,
        T: Clone + 'static,
        F: Fn(&mut S, T) + Send + Sync + 'static,
    {
        self.setter = Some(Box::new(move |target: &mut dyn Any, value: &dyn Any| {
            let Some(receiver) = target.downcast_mut::<S>() else {
                return false;
            };
            let Some(value) = value.downcast_ref::<T>() else {
                return false;
            };
            write(receiver, value.clone());
            true
        }));
        self
    }

    fn build(self) -> Result<FieldDescriptor> {
        if self.name.is_empty() {
            return Err(invalid_member_error!("a declared field must have a name"));
        }
        Ok(FieldDescriptor {
            name: self.name,
            modifiers: self.modifiers,
            ty: self.ty.unwrap_or_else(TypeDesc::void),
            tags: self.tags,
            getter: self.getter,
            setter: self.setter,
        })
    }
}

/// Builder for one declared constructor.
///
/// Obtained through [`ClassBuilder::constructor`].
pub struct ConstructorBuilder {
    modifiers: MemberModifiers,
    params: Vec<TypeDesc>,
    body: Option<ConstructorBody>,
}

impl Default for ConstructorBuilder {
    fn default() -> Self {
        Self {
            modifiers: MemberModifiers::empty(),
            params: Vec::new(),
            body: None,
        }
    }
}

impl ConstructorBuilder {
    /// Replaces the modifier flags wholesale.
    #[must_use]
    pub fn modifiers(mut self, modifiers: MemberModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Marks the constructor public.
    #[must_use]
    pub fn public(mut self) -> Self {
        self.modifiers |= MemberModifiers::PUBLIC;
        self
    }

    /// Marks the constructor private.
    #[must_use]
    pub fn private(mut self) -> Self {
        self.modifiers |= MemberModifiers::PRIVATE;
        self
    }

    /// Appends a parameter of type `T` to the signature.
    #[must_use]
    pub fn parameter<T: 'static>(mut self) -> Self {
        self.params.push(TypeDesc::of::<T>());
        self
    }

    /// Sets the raw executable body.
    #[must_use]
    pub fn body<F>(mut self, body: F) -> Self
    where
        F: Fn(&[crate::metadata::descriptor::ArgumentValue])
                -> std::result::Result<Box<dyn Any>, BoxedError>
            + Send
            + Sync
            + 'static,
    {
        self.body = Some(Box::new(body));
        self
    }

    /// Typed convenience for zero-argument constructors.
    #[must_use]
    pub fn creates<T, F>(mut self, create: F) -> Self
    where
        T: 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.body = Some(Box::new(move |_args| Ok(Box::new(create()) as Box<dyn Any>)));
        self
    }
}

/// Builder for a complete class descriptor.
///
/// Collects class shape, superclass link, class-level tags, and member
/// declarations, then seals everything into an immutable, reference-counted
/// [`ClassDescriptor`].
#[must_use]
pub struct ClassBuilder {
    namespace: String,
    name: String,
    modifiers: ClassModifiers,
    superclass: Option<ClassDescriptorRc>,
    tags: Vec<Tag>,
    constructors: Vec<ConstructorBuilder>,
    methods: Vec<MethodBuilder>,
    fields: Vec<FieldBuilder>,
}

impl ClassBuilder {
    /// Starts a builder for a class with the given simple name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            namespace: String::new(),
            name: name.into(),
            modifiers: ClassModifiers::empty(),
            superclass: None,
            tags: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Sets the namespace the class lives in.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Replaces the class modifier flags wholesale.
    pub fn modifiers(mut self, modifiers: ClassModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Marks the class public.
    pub fn public(mut self) -> Self {
        self.modifiers |= ClassModifiers::PUBLIC;
        self
    }

    /// Marks the class as declared inside another class.
    pub fn member_class(mut self) -> Self {
        self.modifiers |= ClassModifiers::MEMBER;
        self
    }

    /// Marks the class static.
    pub fn static_class(mut self) -> Self {
        self.modifiers |= ClassModifiers::STATIC;
        self
    }

    /// Sets the superclass.
    pub fn extends(mut self, superclass: &ClassDescriptorRc) -> Self {
        self.superclass = Some(superclass.clone());
        self
    }

    /// Attaches a class-level tag.
    pub fn tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Declares a constructor.
    pub fn constructor(
        mut self,
        configure: impl FnOnce(ConstructorBuilder) -> ConstructorBuilder,
    ) -> Self {
        self.constructors.push(configure(ConstructorBuilder::default()));
        self
    }

    /// Declares a method.
    pub fn method(mut self, configure: impl FnOnce(MethodBuilder) -> MethodBuilder) -> Self {
        self.methods.push(configure(MethodBuilder::default()));
        self
    }

    /// Declares a field.
    pub fn field(mut self, configure: impl FnOnce(FieldBuilder) -> FieldBuilder) -> Self {
        self.fields.push(configure(FieldBuilder::default()));
        self
    }

    /// Seals the builder into an immutable descriptor.
    ///
    /// # Errors
    /// Fails when the class name is empty or a declared member is missing its name.
    pub fn build(self) -> Result<ClassDescriptorRc> {
        if self.name.is_empty() {
            return Err(invalid_member_error!("a class must have a name"));
        }

        let mut constructors = Vec::with_capacity(self.constructors.len());
        for ctor in self.constructors {
            constructors.push(ConstructorDescriptor {
                modifiers: ctor.modifiers,
                params: ctor.params,
                body: ctor.body,
            });
        }

        let mut methods = Vec::with_capacity(self.methods.len());
        for method in self.methods {
            methods.push(Arc::new(method.build()?));
        }

        let mut fields = Vec::with_capacity(self.fields.len());
        for field in self.fields {
            fields.push(Arc::new(field.build()?));
        }

        Ok(Arc::new(ClassDescriptor {
            id: ClassId::fresh(),
            namespace: self.namespace,
            name: self.name,
            modifiers: self.modifiers,
            superclass: self.superclass,
            tags: self.tags,
            constructors,
            methods,
            fields,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::tags::builtin;

    #[derive(Default)]
    struct Sample {
        answer: i32,
    }

    #[test]
    fn builds_a_complete_descriptor() {
        let class = ClassBuilder::new("Sample")
            .namespace("fixtures")
            .public()
            .constructor(|ctor| ctor.public().creates(Sample::default))
            .method(|method| {
                method
                    .name("answer")
                    .public()
                    .tag(Tag::marker(builtin::TEST))
                    .invoke_on(|sample: &Sample| Ok(sample.answer))
            })
            .field(|field| {
                field
                    .name("answer")
                    .public()
                    .get(|sample: &Sample| sample.answer)
            })
            .build()
            .unwrap();

        assert_eq!(class.fullname(), "fixtures.Sample");
        assert_eq!(class.constructors().len(), 1);
        assert_eq!(class.methods().len(), 1);
        assert_eq!(class.fields().len(), 1);
        assert_eq!(class.methods()[0].returns(), TypeDesc::of::<i32>());
    }

    #[test]
    fn rejects_unnamed_members() {
        let result = ClassBuilder::new("Broken")
            .method(|method| method.public())
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn typed_getter_reads_through_any() {
        let class = ClassBuilder::new("Sample")
            .field(|field| field.name("answer").public().get(|sample: &Sample| sample.answer))
            .build()
            .unwrap();

        let instance = Sample { answer: 42 };
        let value = class.fields()[0].read(&instance).unwrap();
        assert_eq!(*value.downcast::<i32>().unwrap(), 42);
    }

    #[test]
    fn typed_setter_rejects_wrong_value_type() {
        let class = ClassBuilder::new("Sample")
            .field(|field| {
                field
                    .name("answer")
                    .public()
                    .ty::<i32>()
                    .set(|sample: &mut Sample, value: i32| sample.answer = value)
            })
            .build()
            .unwrap();

        let mut instance = Sample::default();
        assert!(class.fields()[0].write(&mut instance, &7i32));
        assert_eq!(instance.answer, 7);
        assert!(!class.fields()[0].write(&mut instance, &"seven"));
    }
}
