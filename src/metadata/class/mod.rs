//! The class model: hierarchy walk, tag resolution, and ordered member queries.
//!
//! [`TestClass`] wraps one described class and everything a runner needs to know
//! about it: which methods and fields carry tags, in what order they have to be
//! touched, and which single public constructor builds instances. Building a model
//! walks the full superclass chain once; the result is immutable and safe to share,
//! so callers holding many test classes are expected to cache models per class
//! identity (see [`ClassRegistry`](crate::metadata::registry::ClassRegistry)).
//!
//! # Discovery Algorithm
//!
//! Discovery runs in two passes. The first pass walks the chain leaf-to-root and
//! produces one candidate per declared member, resolving each method's tag set
//! against its ancestors on the way (direct tags win over same-kind ancestor tags,
//! distinct kinds accumulate, private ancestors contribute nothing, an untagged
//! declaration resolves to the empty set). The second pass folds the candidate
//! sequence into ordered registries, resolving shadowing and applying the
//! reverse-order policy for setup-style tag kinds.
//!
//! # Examples
//!
//! ```rust
//! use testscope::metadata::descriptor::ClassBuilder;
//! use testscope::metadata::tags::{builtin, Tag};
//! use testscope::TestClass;
//!
//! struct Fixture;
//!
//! let class = ClassBuilder::new("Fixture")
//!     .public()
//!     .method(|method| {
//!         method
//!             .name("check")
//!             .public()
//!             .tag(Tag::marker(builtin::TEST))
//!             .invoke_on(|_: &Fixture| Ok(()))
//!     })
//!     .build()?;
//!
//! let model = TestClass::new(class)?;
//! let tests = model.tagged_methods_with(builtin::TEST);
//! assert_eq!(tests.len(), 1);
//! assert_eq!(tests[0].name(), "check");
//! # Ok::<(), testscope::Error>(())
//! ```
//!
//! # Thread Safety
//!
//! A built model is immutable and can be read from any number of threads. Building
//! models concurrently for the *same* class is safe but wasteful; share a
//! [`ClassRegistry`](crate::metadata::registry::ClassRegistry) instead.

mod field;
mod members;
mod method;

pub use field::TestField;
pub use method::TestMethod;

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::metadata::class::members::MemberRegistry;
use crate::metadata::descriptor::{
    ClassDescriptor, ClassDescriptorRc, ClassModifiers, ConstructorDescriptor, MethodDescriptor,
};
use crate::metadata::tags::{OrderingPolicy, Tag, TagKind};
use crate::{Error, Result};

/// A reference-counted pointer to a [`TestClass`].
pub type TestClassRc = Arc<TestClass>;

/// Wraps a class to be run, providing member discovery and tag-indexed queries.
///
/// Building a model scans the full hierarchy, which is expensive enough that
/// instances should be shared where possible. A model may also describe "no class"
/// (see [`TestClass::without_class`]); callers use that defensively and all queries
/// stay total.
pub struct TestClass {
    class: Option<ClassDescriptorRc>,
    methods: MemberRegistry<TestMethod>,
    fields: MemberRegistry<TestField>,
}

impl TestClass {
    /// Builds the model for `class` with the default ordering policy.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] when the class declares more than one
    /// public constructor.
    pub fn new(class: ClassDescriptorRc) -> Result<Self> {
        Self::with_ordering(class, OrderingPolicy::default())
    }

    /// Builds the model for `class` with an explicit ordering policy.
    ///
    /// The policy is the closed configuration set of tag kinds whose member lists
    /// resolve root-to-leaf; it is fixed for the lifetime of the model.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] when the class declares more than one
    /// public constructor.
    pub fn with_ordering(class: ClassDescriptorRc, policy: OrderingPolicy) -> Result<Self> {
        let public_constructors = class.public_constructors().count();
        if public_constructors > 1 {
            return Err(Error::Configuration {
                class: class.fullname(),
                count: public_constructors,
            });
        }

        let mut method_candidates = Vec::new();
        let mut field_candidates = Vec::new();
        for each_class in ClassDescriptor::hierarchy(&class) {
            for descriptor in each_class.methods() {
                let tags = resolved_method_tags(&each_class, descriptor);
                method_candidates.push(TestMethod::new(
                    each_class.clone(),
                    descriptor.clone(),
                    tags,
                ));
            }

            // name-sorted so fields land in the registries in a deterministic order
            let mut declared_fields = each_class.fields().to_vec();
            declared_fields.sort_by(|a, b| a.name().cmp(b.name()));
            for descriptor in declared_fields {
                field_candidates.push(TestField::new(each_class.clone(), descriptor));
            }
        }

        Ok(Self {
            class: Some(class),
            methods: MemberRegistry::build(method_candidates, &policy),
            fields: MemberRegistry::build(field_candidates, &policy),
        })
    }

    /// The model of "no class": no members, no tags, no constructor.
    #[must_use]
    pub fn without_class() -> Self {
        Self {
            class: None,
            methods: MemberRegistry::empty(),
            fields: MemberRegistry::empty(),
        }
    }

    /// The underlying class, when present.
    #[must_use]
    pub fn class(&self) -> Option<&ClassDescriptorRc> {
        self.class.as_ref()
    }

    /// The simple name of the underlying class, when present.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.class.as_deref().map(ClassDescriptor::name)
    }

    /// The tags written on the class itself. Empty for the absent-class model.
    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        self.class.as_deref().map_or(&[], ClassDescriptor::tags)
    }

    /// Whether the underlying class is a member class bound to an enclosing
    /// instance.
    #[must_use]
    pub fn is_non_static_member_class(&self) -> bool {
        self.class.as_deref().is_some_and(|class| {
            class.modifiers().contains(ClassModifiers::MEMBER)
                && !class.modifiers().contains(ClassModifiers::STATIC)
        })
    }

    /// All methods that carry a tag in this class or its superclasses,
    /// shadow-resolved, in resolution order.
    #[must_use]
    pub fn tagged_methods(&self) -> &[TestMethod] {
        self.methods.all()
    }

    /// The non-shadowed methods carrying `kind`, in the kind's accumulation order.
    /// Empty (never an error) when no method carries it.
    #[must_use]
    pub fn tagged_methods_with(&self, kind: TagKind) -> &[TestMethod] {
        self.methods.with_kind(kind)
    }

    /// All fields that carry a tag in this class or its superclasses,
    /// shadow-resolved, name-sorted within each declaring class.
    #[must_use]
    pub fn tagged_fields(&self) -> &[TestField] {
        self.fields.all()
    }

    /// The non-shadowed fields carrying `kind`. Empty (never an error) when no
    /// field carries it.
    #[must_use]
    pub fn tagged_fields_with(&self, kind: TagKind) -> &[TestField] {
        self.fields.with_kind(kind)
    }

    /// The only public constructor of the underlying class.
    ///
    /// # Panics
    /// Panics when the public constructor count is not exactly one. Model
    /// construction already rules out more than one, so in practice this signals a
    /// class with none, which is a programming error in the runner, not a recoverable
    /// condition.
    #[must_use]
    pub fn only_constructor(&self) -> &ConstructorDescriptor {
        let class = self
            .class
            .as_deref()
            .expect("no class to take a constructor from");
        let constructors: Vec<&ConstructorDescriptor> = class.public_constructors().collect();
        assert_eq!(
            1,
            constructors.len(),
            "class `{}` should have exactly one public constructor",
            class.fullname()
        );
        constructors[0]
    }

    /// Invokes every method carrying `kind` on `target` and collects the results
    /// that are of type `T`, in the kind's accumulation order.
    ///
    /// Results of other types are filtered out silently, mirroring the discovery
    /// contract: a runner asks for the values it can use.
    ///
    /// # Errors
    /// Returns [`Error::MemberInvocation`] naming the failing member when any
    /// invocation fails; remaining members are not invoked.
    pub fn tagged_method_values<T: 'static>(
        &self,
        target: Option<&dyn Any>,
        kind: TagKind,
    ) -> Result<Vec<T>> {
        let mut values = Vec::new();
        for method in self.tagged_methods_with(kind) {
            let result = method
                .invoke(target)
                .map_err(|source| Error::MemberInvocation {
                    member: method.name().to_string(),
                    source,
                })?;
            if let Ok(value) = result.downcast::<T>() {
                values.push(*value);
            }
        }
        Ok(values)
    }

    /// Reads every field carrying `kind` from `target` and collects the values
    /// that are of type `T`, in the kind's accumulation order.
    ///
    /// # Panics
    /// Panics when a field cannot be read; the registry only returns fields it
    /// vouches for, so this is an internal-consistency fault (see
    /// [`TestField::read`]).
    #[must_use]
    pub fn tagged_field_values<T: 'static>(&self, target: &dyn Any, kind: TagKind) -> Vec<T> {
        let mut values = Vec::new();
        for field in self.tagged_fields_with(kind) {
            if let Ok(value) = field.read(target).downcast::<T>() {
                values.push(*value);
            }
        }
        values
    }
}

impl fmt::Display for TestClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.class {
            Some(class) => f.write_str(&class.fullname()),
            None => f.write_str("<no class>"),
        }
    }
}

impl fmt::Debug for TestClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestClass")
            .field("class", &self.class.as_deref().map(ClassDescriptor::fullname))
            .field("tagged_methods", &self.methods.all().len())
            .field("tagged_fields", &self.fields.all().len())
            .finish()
    }
}

/// Resolves the tag set of one method declaration against its ancestors.
///
/// A declaration without direct tags resolves to the empty set: it wins its shadow
/// slot but contributes nothing. Otherwise the direct tags are enriched with tags
/// from same-signature non-private ancestor declarations, nearest ancestor first,
/// skipping any kind a more-derived declaration already contributed.
fn resolved_method_tags(declaring: &ClassDescriptorRc, method: &MethodDescriptor) -> Vec<Tag> {
    if method.tags().is_empty() {
        return Vec::new();
    }

    let mut tags: Vec<Tag> = method.tags().to_vec();
    let mut current = declaring.superclass().cloned();
    while let Some(ancestor) = current {
        if let Some(parent) = ancestor.declared_method(method.name(), method.params()) {
            if !parent.modifiers().is_private() {
                for tag in parent.tags() {
                    if !tags.iter().any(|existing| existing.kind() == tag.kind()) {
                        tags.push(tag.clone());
                    }
                }
            }
        }
        current = ancestor.superclass().cloned();
    }
    tags
}
