//! Central class registry and model cache.
//!
//! This module provides the [`ClassRegistry`], the hub a runner shares across its
//! whole run: class descriptors registered by identity and fully-qualified name, and
//! a cache of built [`TestClass`] models. Building a model walks the full superclass
//! chain, so the registry exists precisely to make "model this class" cheap the
//! second time.
//!
//! # Registry Architecture
//!
//! The registry uses a multi-index approach:
//!
//! - **Id-based lookup**: Primary storage keyed by [`ClassId`]
//! - **Name-based lookup**: Secondary index by fully-qualified name, which is also
//!   the identifier filter specifications resolve through
//! - **Model cache**: Built class models keyed by class id
//!
//! # Thread Safety
//!
//! All operations are safe for concurrent use: primary storage is a lock-free
//! `SkipMap`, the indices are concurrent hash maps, and registration is idempotent.
//! Two threads asking for the same model at the same time may both build it; the
//! results are equivalent and one of them wins the cache slot.
//!
//! # Examples
//!
//! ```rust
//! use testscope::metadata::descriptor::ClassBuilder;
//! use testscope::metadata::registry::ClassRegistry;
//!
//! let registry = ClassRegistry::new();
//! let class = ClassBuilder::new("Fixture").namespace("demo").public().build()?;
//! registry.register(&class);
//!
//! assert!(registry.get_by_fullname("demo.Fixture").is_some());
//! let model = registry.model(&class)?;
//! assert_eq!(model.to_string(), "demo.Fixture");
//! # Ok::<(), testscope::Error>(())
//! ```

use crossbeam_skiplist::SkipMap;
use dashmap::DashMap;

use crate::metadata::class::{TestClass, TestClassRc};
use crate::metadata::descriptor::{ClassDescriptor, ClassDescriptorRc, ClassId};
use crate::metadata::tags::OrderingPolicy;
use crate::Result;

/// Registry of class descriptors with a cache of built models.
///
/// The ordering policy is fixed at registry construction time and applies to every
/// model the registry builds, so all cached models of one registry agree on which
/// tag kinds resolve root-to-leaf.
pub struct ClassRegistry {
    classes: SkipMap<ClassId, ClassDescriptorRc>,
    by_fullname: DashMap<String, ClassId>,
    models: DashMap<ClassId, TestClassRc>,
    ordering: OrderingPolicy,
}

impl ClassRegistry {
    /// Creates a registry with the default ordering policy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_ordering(OrderingPolicy::default())
    }

    /// Creates a registry with an explicit ordering policy.
    #[must_use]
    pub fn with_ordering(ordering: OrderingPolicy) -> Self {
        Self {
            classes: SkipMap::new(),
            by_fullname: DashMap::new(),
            models: DashMap::new(),
            ordering,
        }
    }

    /// Registers `class` and its whole superclass chain.
    ///
    /// Registration is idempotent; re-registering a class is a no-op. Superclasses
    /// are registered too so that name-based lookups see every class a hierarchy
    /// touches.
    pub fn register(&self, class: &ClassDescriptorRc) {
        for each_class in ClassDescriptor::hierarchy(class) {
            if self.classes.contains_key(&each_class.id()) {
                continue;
            }
            self.by_fullname
                .insert(each_class.fullname(), each_class.id());
            self.classes.insert(each_class.id(), each_class);
        }
    }

    /// Looks a class up by identity.
    #[must_use]
    pub fn get(&self, id: ClassId) -> Option<ClassDescriptorRc> {
        self.classes.get(&id).map(|entry| entry.value().clone())
    }

    /// Looks a class up by fully-qualified name.
    #[must_use]
    pub fn get_by_fullname(&self, fullname: &str) -> Option<ClassDescriptorRc> {
        let id = *self.by_fullname.get(fullname)?;
        self.get(id)
    }

    /// The model for `class`, built on first request and cached afterwards.
    ///
    /// Also registers `class` if it was not registered yet.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`](crate::Error::Configuration) when the class
    /// declares more than one public constructor; failed builds are not cached.
    pub fn model(&self, class: &ClassDescriptorRc) -> Result<TestClassRc> {
        self.register(class);
        if let Some(model) = self.models.get(&class.id()) {
            return Ok(model.clone());
        }

        let built = TestClassRc::new(TestClass::with_ordering(
            class.clone(),
            self.ordering.clone(),
        )?);
        self.models.insert(class.id(), built.clone());
        Ok(built)
    }

    /// Number of registered classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the registry holds no classes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}
