//! Zero-argument instantiation of described classes.
//!
//! [`InstanceFactory`] is the single sanctioned "construct T with no arguments" path
//! in the framework: filter-factory resolution and field-injected parameterized
//! tests both go through it, so construction failures surface uniformly as
//! [`Error::Instantiation`].

use std::any::Any;

use crate::metadata::descriptor::ClassDescriptor;
use crate::{Error, Result};

/// Creates instances of described classes via their public zero-argument
/// constructor.
///
/// Stateless; construction has no side effects beyond running the constructor body.
#[derive(Debug, Default, Clone, Copy)]
pub struct InstanceFactory;

impl InstanceFactory {
    /// Creates a factory.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Constructs a new instance of `class`.
    ///
    /// # Errors
    /// Returns [`Error::Instantiation`] when the class has no public zero-argument
    /// constructor with an executable body, or when that constructor itself fails.
    pub fn create(&self, class: &ClassDescriptor) -> Result<Box<dyn Any>> {
        let Some(constructor) = class
            .public_constructors()
            .find(|ctor| ctor.is_zero_arg() && ctor.has_body())
        else {
            return Err(Error::Instantiation {
                class: class.fullname(),
                reason: "no public zero-argument constructor".to_string(),
                source: None,
            });
        };

        constructor.construct(&[]).map_err(|source| Error::Instantiation {
            class: class.fullname(),
            reason: "constructor failed".to_string(),
            source: Some(source),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::descriptor::ClassBuilder;

    #[derive(Default)]
    struct ZeroArg {
        ready: bool,
    }

    #[test]
    fn creates_object_with_public_zero_arg_constructor() {
        let class = ClassBuilder::new("ZeroArg")
            .public()
            .constructor(|ctor| ctor.public().creates(|| ZeroArg { ready: true }))
            .build()
            .unwrap();

        let instance = InstanceFactory::new().create(&class).unwrap();
        let instance = instance.downcast::<ZeroArg>().unwrap();
        assert!(instance.ready);
    }

    #[test]
    fn private_constructor_is_not_accessible() {
        let class = ClassBuilder::new("Hidden")
            .public()
            .constructor(|ctor| ctor.private().creates(ZeroArg::default))
            .build()
            .unwrap();

        let result = InstanceFactory::new().create(&class);
        assert!(matches!(result, Err(Error::Instantiation { .. })));
    }

    #[test]
    fn constructor_failure_is_wrapped_with_its_cause() {
        use std::error::Error as _;

        let class = ClassBuilder::new("Explosive")
            .public()
            .constructor(|ctor| ctor.public().body(|_| Err("boom".into())))
            .build()
            .unwrap();

        let error = InstanceFactory::new().create(&class).unwrap_err();
        let Error::Instantiation { source, .. } = &error else {
            panic!("expected an instantiation error, got {error}");
        };
        assert_eq!(source.as_ref().unwrap().to_string(), "boom");
        assert!(error.source().is_some());
    }
}
