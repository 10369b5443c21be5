//! Class descriptors and the superclass chain.
//!
//! A [`ClassDescriptor`] is the static description of one class in a hierarchy: its
//! identity, modifiers, class-level tags, declared constructors, methods, and fields,
//! and the link to its superclass. Descriptors form an upward-linked chain that the
//! class model walks leaf-to-root during discovery.
//!
//! Descriptors are reference-counted and immutable; a hierarchy is therefore cheap to
//! share between models, registries, and tests.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use bitflags::bitflags;

use crate::metadata::descriptor::{
    ConstructorDescriptor, FieldDescriptor, MethodDescriptor, TypeDesc,
};
use crate::metadata::tags::Tag;

/// A reference-counted pointer to a [`ClassDescriptor`].
pub type ClassDescriptorRc = Arc<ClassDescriptor>;

static NEXT_CLASS_ID: AtomicU32 = AtomicU32::new(1);

/// Identity of a described class.
///
/// Ids are unique per process and serve as registry keys and equality witnesses; two
/// descriptors built independently never share an id, even if their names collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassId(u32);

impl ClassId {
    pub(crate) fn fresh() -> Self {
        Self(NEXT_CLASS_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw id value.
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Shape flags of a described class
    pub struct ClassModifiers: u32 {
        /// Class is visible outside its module
        const PUBLIC = 0x0001;
        /// Class cannot be instantiated directly
        const ABSTRACT = 0x0002;
        /// Class is a static (non-instance-bound) nested class
        const STATIC = 0x0010;
        /// Class is declared inside another class
        const MEMBER = 0x0020;
    }
}

/// The static description of one class in a hierarchy.
///
/// Holds everything the class model needs to discover members: declared
/// constructors, methods, and fields (each with their direct tags), class-level
/// tags, and the superclass link. Built through
/// [`ClassBuilder`](crate::metadata::descriptor::ClassBuilder) and immutable
/// afterwards.
#[derive(Debug)]
pub struct ClassDescriptor {
    pub(crate) id: ClassId,
    pub(crate) namespace: String,
    pub(crate) name: String,
    pub(crate) modifiers: ClassModifiers,
    pub(crate) superclass: Option<ClassDescriptorRc>,
    pub(crate) tags: Vec<Tag>,
    pub(crate) constructors: Vec<ConstructorDescriptor>,
    pub(crate) methods: Vec<Arc<MethodDescriptor>>,
    pub(crate) fields: Vec<Arc<FieldDescriptor>>,
}

impl ClassDescriptor {
    /// The identity of this class.
    #[must_use]
    pub fn id(&self) -> ClassId {
        self.id
    }

    /// The namespace this class lives in (may be empty).
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The simple name of this class.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fully-qualified name (`namespace.Name`, or the bare name when the
    /// namespace is empty). This is the identifier filter specifications use.
    #[must_use]
    pub fn fullname(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// The class's modifier flags.
    #[must_use]
    pub fn modifiers(&self) -> ClassModifiers {
        self.modifiers
    }

    /// The superclass, if this class extends one.
    #[must_use]
    pub fn superclass(&self) -> Option<&ClassDescriptorRc> {
        self.superclass.as_ref()
    }

    /// The tags written on the class itself.
    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// All declared constructors, in declaration order.
    #[must_use]
    pub fn constructors(&self) -> &[ConstructorDescriptor] {
        &self.constructors
    }

    /// The public constructors, in declaration order.
    pub fn public_constructors(&self) -> impl Iterator<Item = &ConstructorDescriptor> {
        self.constructors
            .iter()
            .filter(|ctor| ctor.modifiers().is_public())
    }

    /// All declared methods, in declaration order.
    #[must_use]
    pub fn methods(&self) -> &[Arc<MethodDescriptor>] {
        &self.methods
    }

    /// All declared fields, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[Arc<FieldDescriptor>] {
        &self.fields
    }

    /// The declared method with the given name and parameter signature, if any.
    #[must_use]
    pub fn declared_method(&self, name: &str, params: &[TypeDesc]) -> Option<&Arc<MethodDescriptor>> {
        self.methods
            .iter()
            .find(|method| method.name() == name && method.params() == params)
    }

    /// Iterates the superclass chain starting at `class` itself, leaf to root.
    #[must_use]
    pub fn hierarchy(class: &ClassDescriptorRc) -> SuperclassChain {
        SuperclassChain {
            current: Some(class.clone()),
        }
    }
}

impl fmt::Display for ClassDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fullname())
    }
}

/// Iterator over a class and its ancestors, leaf to root.
pub struct SuperclassChain {
    current: Option<ClassDescriptorRc>,
}

impl Iterator for SuperclassChain {
    type Item = ClassDescriptorRc;

    fn next(&mut self) -> Option<Self::Item> {
        let class = self.current.take()?;
        self.current = class.superclass().cloned();
        Some(class)
    }
}
