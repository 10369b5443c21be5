//! Resolution of filter factories from their textual identifiers.
//!
//! A filter specification names a factory class by its fully-qualified name. The
//! resolver looks the class up in a [`ClassRegistry`], constructs it through the
//! [`InstanceFactory`] (the only sanctioned construction path), and invokes the
//! factory with the specification's argument string. Every failure along that path
//! (unknown identifier, failing constructor, a class that is not a factory, a factory
//! rejecting its arguments) surfaces as
//! [`Error::FilterNotCreated`](crate::Error::FilterNotCreated) carrying the cause;
//! no raw lookup failure ever escapes unwrapped.
//!
//! # Factory Payload Convention
//!
//! Without runtime reflection there is no downcast to "any type implementing
//! [`FilterFactory`]", so factory classes construct a `Box<dyn FilterFactory>` as
//! their instance payload. [`filter_factory_class`] packages that convention for
//! factory types implementing [`Default`].
//!
//! # Examples
//!
//! ```rust
//! use testscope::filter::{create_filter_from_spec, filter_factory_class, Description,
//!     Filter, FilterFactory};
//! use testscope::metadata::registry::ClassRegistry;
//! use testscope::BoxedError;
//!
//! struct PrefixFilter(String);
//!
//! impl Filter for PrefixFilter {
//!     fn should_run(&self, description: &Description) -> bool {
//!         description.display_name().starts_with(&self.0)
//!     }
//!     fn describe(&self) -> String {
//!         format!("name starts with `{}`", self.0)
//!     }
//! }
//!
//! #[derive(Default)]
//! struct PrefixFilterFactory;
//!
//! impl FilterFactory for PrefixFilterFactory {
//!     fn create(&self, args: &str) -> Result<Box<dyn Filter>, BoxedError> {
//!         Ok(Box::new(PrefixFilter(args.to_string())))
//!     }
//! }
//!
//! let registry = ClassRegistry::new();
//! registry.register(&filter_factory_class::<PrefixFilterFactory>(
//!     "com.example",
//!     "PrefixFilterFactory",
//! )?);
//!
//! let filter = create_filter_from_spec(&registry, "com.example.PrefixFilterFactory=net_")?;
//! assert!(filter.should_run(&Description::new("net_roundtrip")));
//! assert!(!filter.should_run(&Description::new("fs_roundtrip")));
//! # Ok::<(), testscope::Error>(())
//! ```

use std::any::Any;

use crate::error::BoxedError;
use crate::filter::{Filter, FilterSpec};
use crate::instantiate::InstanceFactory;
use crate::metadata::descriptor::{ClassBuilder, ClassDescriptorRc};
use crate::metadata::registry::ClassRegistry;
use crate::{Error, Result};

/// Turns a textual argument into a runtime test-selection predicate.
///
/// Factories are constructible: they are resolved by name, built through the
/// [`InstanceFactory`], and invoked exactly once per specification.
pub trait FilterFactory {
    /// Creates the filter for `args`.
    ///
    /// # Errors
    /// Factories reject argument strings they cannot interpret; the resolver wraps
    /// the rejection as [`Error::FilterNotCreated`](crate::Error::FilterNotCreated).
    fn create(&self, args: &str) -> std::result::Result<Box<dyn Filter>, BoxedError>;
}

/// Builds the descriptor of a filter-factory class whose zero-argument constructor
/// produces `F` boxed behind the factory payload convention.
///
/// # Errors
/// Fails only when `name` is empty (see
/// [`ClassBuilder::build`](crate::metadata::descriptor::ClassBuilder::build)).
pub fn filter_factory_class<F>(namespace: &str, name: &str) -> Result<ClassDescriptorRc>
where
    F: FilterFactory + Default + 'static,
{
    ClassBuilder::new(name)
        .namespace(namespace)
        .public()
        .constructor(|ctor| {
            ctor.public()
                .creates(|| Box::new(F::default()) as Box<dyn FilterFactory>)
        })
        .build()
}

/// Creates a filter from a full specification string.
///
/// Parses `spec` with [`FilterSpec::parse`] and resolves it with [`create_filter`].
///
/// # Errors
/// Returns [`Error::FilterNotCreated`] for every resolution failure; parsing itself
/// never fails.
pub fn create_filter_from_spec(registry: &ClassRegistry, spec: &str) -> Result<Box<dyn Filter>> {
    let spec = FilterSpec::parse(spec);
    create_filter(registry, spec.factory(), spec.args())
}

/// Creates a filter from a factory identifier and an argument string.
///
/// Resolution: look `identifier` up in `registry`, construct the class through the
/// [`InstanceFactory`], unwrap the factory payload, and invoke it with `args`.
///
/// # Errors
/// Returns [`Error::FilterNotCreated`] when the identifier names no registered
/// class, instantiation fails, the instance is not a filter factory, or the factory
/// rejects `args`. The originating cause is always attached.
pub fn create_filter(
    registry: &ClassRegistry,
    identifier: &str,
    args: &str,
) -> Result<Box<dyn Filter>> {
    let not_created = |source: BoxedError| Error::FilterNotCreated {
        identifier: identifier.to_string(),
        source,
    };

    let Some(class) = registry.get_by_fullname(identifier) else {
        return Err(not_created(
            format!("no registered class named `{identifier}`").into(),
        ));
    };

    let instance = InstanceFactory::new()
        .create(&class)
        .map_err(|error| not_created(Box::new(error)))?;

    let factory = downcast_factory(instance)
        .map_err(|_| not_created(format!("`{identifier}` is not a filter factory").into()))?;

    factory.create(args).map_err(not_created)
}

fn downcast_factory(
    instance: Box<dyn Any>,
) -> std::result::Result<Box<dyn FilterFactory>, Box<dyn Any>> {
    instance
        .downcast::<Box<dyn FilterFactory>>()
        .map(|boxed| *boxed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Description;

    struct NameContains(String);

    impl Filter for NameContains {
        fn should_run(&self, description: &Description) -> bool {
            description.display_name().contains(&self.0)
        }

        fn describe(&self) -> String {
            format!("name contains `{}`", self.0)
        }
    }

    #[derive(Default)]
    struct NameContainsFactory;

    impl FilterFactory for NameContainsFactory {
        fn create(&self, args: &str) -> std::result::Result<Box<dyn Filter>, BoxedError> {
            if args.is_empty() {
                return Err("argument string must not be empty".into());
            }
            Ok(Box::new(NameContains(args.to_string())))
        }
    }

    fn registry_with_factory() -> ClassRegistry {
        let registry = ClassRegistry::new();
        registry.register(
            &filter_factory_class::<NameContainsFactory>("filters", "NameContainsFactory")
                .unwrap(),
        );
        registry
    }

    #[test]
    fn resolves_and_invokes_the_factory() {
        let registry = registry_with_factory();
        let filter =
            create_filter(&registry, "filters.NameContainsFactory", "slow").unwrap();
        assert!(filter.should_run(&Description::new("slow_io_test")));
        assert!(!filter.should_run(&Description::new("fast_test")));
        assert_eq!(filter.describe(), "name contains `slow`");
    }

    #[test]
    fn unknown_identifier_is_wrapped() {
        let registry = ClassRegistry::new();
        let error = create_filter(&registry, "filters.Missing", "x").unwrap_err();
        assert!(matches!(error, Error::FilterNotCreated { .. }));
    }

    #[test]
    fn factory_rejection_is_wrapped() {
        use std::error::Error as _;

        let registry = registry_with_factory();
        let error = create_filter(&registry, "filters.NameContainsFactory", "").unwrap_err();
        let Error::FilterNotCreated { source, .. } = &error else {
            panic!("expected FilterNotCreated, got {error}");
        };
        assert_eq!(source.to_string(), "argument string must not be empty");
        assert!(error.source().is_some());
    }

    #[test]
    fn non_factory_class_is_wrapped() {
        let registry = ClassRegistry::new();
        let plain = ClassBuilder::new("Plain")
            .namespace("filters")
            .public()
            .constructor(|ctor| ctor.public().creates(|| 7i32))
            .build()
            .unwrap();
        registry.register(&plain);

        let error = create_filter(&registry, "filters.Plain", "x").unwrap_err();
        assert!(matches!(error, Error::FilterNotCreated { .. }));
    }
}
