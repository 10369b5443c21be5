//! Declared method, field, and constructor descriptors.
//!
//! Descriptors are the crate's stand-in for runtime reflection: each one records the
//! static shape of a declared member (name, modifiers, parameter and result types,
//! direct tags) together with the closures that execute it against a `dyn Any`
//! receiver. The class model never inspects concrete Rust types; everything it needs
//! flows through these descriptors.
//!
//! # Key Types
//!
//! - [`TypeDesc`] - Identity of a parameter, return, or field type
//! - [`MemberModifiers`] - Visibility and staticness flags
//! - [`MethodDescriptor`], [`FieldDescriptor`], [`ConstructorDescriptor`] - One
//!   declared member each, immutable once built
//!
//! Descriptors are created through the [`ClassBuilder`](crate::metadata::descriptor::ClassBuilder)
//! and are immutable afterwards.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use bitflags::bitflags;

use crate::error::BoxedError;
use crate::metadata::tags::Tag;

/// A constructor or method argument transported as an opaque value.
pub type ArgumentValue = Box<dyn Any + Send + Sync>;

/// Executable body of a method: receives the instance (or `None` for static
/// methods) and produces the method's result as an opaque value.
pub type MethodBody =
    Box<dyn Fn(Option<&dyn Any>) -> std::result::Result<Box<dyn Any>, BoxedError> + Send + Sync>;

/// Executable body of a constructor: receives the argument list and produces the
/// new instance as an opaque value.
pub type ConstructorBody =
    Box<dyn Fn(&[ArgumentValue]) -> std::result::Result<Box<dyn Any>, BoxedError> + Send + Sync>;

/// Reads a field from an instance. Returns `None` when the receiver is not of the
/// declaring type; the model layer treats that as an internal-consistency fault.
pub type FieldGetter = Box<dyn Fn(&dyn Any) -> Option<Box<dyn Any>> + Send + Sync>;

/// Writes a field on an instance. Returns `false` when the receiver or the value is
/// not of the expected type.
pub type FieldSetter = Box<dyn Fn(&mut dyn Any, &dyn Any) -> bool + Send + Sync>;

/// Identity of a parameter, return, or field type.
///
/// Keyed off the Rust [`TypeId`], with the type name carried along for diagnostics.
/// Two descriptors compare equal exactly when they describe the same Rust type; the
/// name plays no part in equality.
#[derive(Debug, Clone, Copy)]
pub struct TypeDesc {
    id: TypeId,
    name: &'static str,
}

impl TypeDesc {
    /// The descriptor of type `T`.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// The descriptor of the unit type, used as the "void" return type.
    #[must_use]
    pub fn void() -> Self {
        Self::of::<()>()
    }

    /// Whether this descriptor describes the unit type.
    #[must_use]
    pub fn is_void(&self) -> bool {
        self.id == TypeId::of::<()>()
    }

    /// The underlying [`TypeId`].
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The Rust type name, for diagnostics only.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeDesc {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeDesc {}

impl Hash for TypeDesc {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Visibility and staticness flags of a declared member
    pub struct MemberModifiers: u32 {
        /// Member is visible outside its declaring class
        const PUBLIC = 0x0001;
        /// Member is visible only inside its declaring class
        const PRIVATE = 0x0002;
        /// Member is visible to the declaring class and its subclasses
        const PROTECTED = 0x0004;
        /// Member belongs to the class rather than to instances
        const STATIC = 0x0010;
        /// Member cannot be shadowed further down the hierarchy
        const FINAL = 0x0020;
        /// Member has no executable body of its own
        const ABSTRACT = 0x0040;
    }
}

impl MemberModifiers {
    /// Whether the `PUBLIC` flag is set.
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.contains(MemberModifiers::PUBLIC)
    }

    /// Whether the `PRIVATE` flag is set.
    #[must_use]
    pub fn is_private(&self) -> bool {
        self.contains(MemberModifiers::PRIVATE)
    }

    /// Whether the `STATIC` flag is set.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.contains(MemberModifiers::STATIC)
    }
}

/// One declared method of a class.
///
/// Immutable once built. The `tags` here are the tags written at this declaration
/// site only; resolution across the hierarchy (masking, accumulation) happens when
/// the class model wraps the descriptor into a
/// [`TestMethod`](crate::metadata::class::TestMethod).
pub struct MethodDescriptor {
    pub(crate) name: String,
    pub(crate) modifiers: MemberModifiers,
    pub(crate) params: Vec<TypeDesc>,
    pub(crate) returns: TypeDesc,
    pub(crate) tags: Vec<Tag>,
    pub(crate) body: Option<MethodBody>,
}

impl MethodDescriptor {
    /// The method's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The method's modifier flags.
    #[must_use]
    pub fn modifiers(&self) -> MemberModifiers {
        self.modifiers
    }

    /// The parameter types, in declaration order.
    #[must_use]
    pub fn params(&self) -> &[TypeDesc] {
        &self.params
    }

    /// The return type.
    #[must_use]
    pub fn returns(&self) -> TypeDesc {
        self.returns
    }

    /// The tags written directly on this declaration site.
    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Whether `other` has the same name and parameter signature.
    #[must_use]
    pub fn same_signature(&self, other: &MethodDescriptor) -> bool {
        self.name == other.name && self.params == other.params
    }

    /// Invokes the method body against `target` (`None` for static methods).
    ///
    /// Failures from the body are returned as-is; wrapping with the member name is
    /// the caller's concern.
    pub fn invoke(
        &self,
        target: Option<&dyn Any>,
    ) -> std::result::Result<Box<dyn Any>, BoxedError> {
        match &self.body {
            Some(body) => body(target),
            None => Err(format!("method `{}` has no executable body", self.name).into()),
        }
    }
}

impl fmt::Debug for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("name", &self.name)
            .field("modifiers", &self.modifiers)
            .field("params", &self.params)
            .field("returns", &self.returns)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}

/// One declared field of a class.
///
/// Immutable once built. Field tags are resolved at the declaration site only; a
/// shadowing redeclaration either carries a tag or it does not.
pub struct FieldDescriptor {
    pub(crate) name: String,
    pub(crate) modifiers: MemberModifiers,
    pub(crate) ty: TypeDesc,
    pub(crate) tags: Vec<Tag>,
    pub(crate) getter: Option<FieldGetter>,
    pub(crate) setter: Option<FieldSetter>,
}

impl FieldDescriptor {
    /// The field's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The field's modifier flags.
    #[must_use]
    pub fn modifiers(&self) -> MemberModifiers {
        self.modifiers
    }

    /// The field's type.
    #[must_use]
    pub fn ty(&self) -> TypeDesc {
        self.ty
    }

    /// The tags written on this declaration site.
    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Reads the field from `target`.
    ///
    /// `None` means the field has no getter or `target` is not of the declaring
    /// type; the model layer treats both as internal-consistency faults.
    #[must_use]
    pub fn read(&self, target: &dyn Any) -> Option<Box<dyn Any>> {
        self.getter.as_ref().and_then(|getter| getter(target))
    }

    /// Writes `value` into the field on `target`.
    ///
    /// Returns `false` when the field has no setter, or when the receiver or the
    /// value is not of the expected type.
    #[must_use]
    pub fn write(&self, target: &mut dyn Any, value: &dyn Any) -> bool {
        match &self.setter {
            Some(setter) => setter(target, value),
            None => false,
        }
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("modifiers", &self.modifiers)
            .field("ty", &self.ty)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}

/// One declared constructor of a class.
pub struct ConstructorDescriptor {
    pub(crate) modifiers: MemberModifiers,
    pub(crate) params: Vec<TypeDesc>,
    pub(crate) body: Option<ConstructorBody>,
}

impl ConstructorDescriptor {
    /// The constructor's modifier flags.
    #[must_use]
    pub fn modifiers(&self) -> MemberModifiers {
        self.modifiers
    }

    /// The parameter types, in declaration order.
    #[must_use]
    pub fn params(&self) -> &[TypeDesc] {
        &self.params
    }

    /// Whether this constructor takes no arguments.
    #[must_use]
    pub fn is_zero_arg(&self) -> bool {
        self.params.is_empty()
    }

    /// Runs the constructor with `args`, producing the new instance.
    pub fn construct(
        &self,
        args: &[ArgumentValue],
    ) -> std::result::Result<Box<dyn Any>, BoxedError> {
        match &self.body {
            Some(body) => body(args),
            None => Err("constructor has no executable body".into()),
        }
    }

    /// Whether this constructor has an executable body.
    #[must_use]
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }
}

impl fmt::Debug for ConstructorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorDescriptor")
            .field("modifiers", &self.modifiers)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
