//! Parameterized-test instance creation.
//!
//! A parameterized run pairs one test class with one parameter set. Instances are
//! created either through the class's only constructor (constructor injection) or,
//! when the class declares parameter-tagged fields, through the public zero-argument
//! constructor followed by field injection. Which path applies is decided by the
//! class itself: declaring at least one parameter-tagged field opts into field
//! injection.
//!
//! # Examples
//!
//! ```rust
//! use testscope::metadata::descriptor::ClassBuilder;
//! use testscope::metadata::tags::{builtin, Tag, TagValue};
//! use testscope::parameterized::TestWithParameters;
//! use testscope::TestClass;
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct Addition {
//!     input: i32,
//!     expected: i32,
//! }
//!
//! let class = ClassBuilder::new("Addition")
//!     .public()
//!     .constructor(|ctor| ctor.public().creates(Addition::default))
//!     .field(|field| {
//!         field
//!             .name("input")
//!             .public()
//!             .ty::<i32>()
//!             .tag(Tag::with_value(builtin::PARAMETER, TagValue::Int(0)))
//!             .set(|fixture: &mut Addition, value: i32| fixture.input = value)
//!     })
//!     .field(|field| {
//!         field
//!             .name("expected")
//!             .public()
//!             .ty::<i32>()
//!             .tag(Tag::with_value(builtin::PARAMETER, TagValue::Int(1)))
//!             .set(|fixture: &mut Addition, value: i32| fixture.expected = value)
//!     })
//!     .build()?;
//!
//! let model = Arc::new(TestClass::new(class)?);
//! let test = TestWithParameters::new("[0]", model, vec![Box::new(2i32), Box::new(4i32)]);
//! let instance = test.create_test()?;
//! let fixture = instance.downcast::<Addition>().unwrap();
//! assert_eq!((fixture.input, fixture.expected), (2, 4));
//! # Ok::<(), testscope::Error>(())
//! ```

use std::any::Any;

use crate::instantiate::InstanceFactory;
use crate::metadata::class::TestClassRc;
use crate::metadata::descriptor::ArgumentValue;
use crate::metadata::tags::builtin;
use crate::{Error, Result};

/// One test class paired with one parameter set.
///
/// The name distinguishes runs of the same class with different parameters (the
/// runner typically uses the parameter index, `"[0]"`, `"[1]"`, ...).
pub struct TestWithParameters {
    name: String,
    test_class: TestClassRc,
    parameters: Vec<ArgumentValue>,
}

impl TestWithParameters {
    /// Creates the pairing.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        test_class: TestClassRc,
        parameters: Vec<ArgumentValue>,
    ) -> Self {
        Self {
            name: name.into(),
            test_class,
            parameters,
        }
    }

    /// The run's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The class model this run executes against.
    #[must_use]
    pub fn test_class(&self) -> &TestClassRc {
        &self.test_class
    }

    /// The parameter values of this run.
    #[must_use]
    pub fn parameters(&self) -> &[ArgumentValue] {
        &self.parameters
    }

    /// Whether the class opted into field injection by declaring parameter-tagged
    /// fields.
    #[must_use]
    pub fn fields_are_tagged(&self) -> bool {
        !self
            .test_class
            .tagged_fields_with(builtin::PARAMETER)
            .is_empty()
    }

    /// Creates one test instance with the parameters injected.
    ///
    /// # Errors
    /// Returns [`Error::Instantiation`] when construction fails, a parameter index
    /// is out of range, or a parameter value is not assignable to its target field.
    pub fn create_test(&self) -> Result<Box<dyn Any>> {
        if self.fields_are_tagged() {
            self.create_test_using_field_injection()
        } else {
            self.create_test_using_constructor_injection()
        }
    }

    fn create_test_using_constructor_injection(&self) -> Result<Box<dyn Any>> {
        let class = self
            .test_class
            .class()
            .expect("a parameterized test needs an underlying class");
        self.test_class
            .only_constructor()
            .construct(&self.parameters)
            .map_err(|source| Error::Instantiation {
                class: class.fullname(),
                reason: "constructor failed".to_string(),
                source: Some(source),
            })
    }

    fn create_test_using_field_injection(&self) -> Result<Box<dyn Any>> {
        let class = self
            .test_class
            .class()
            .expect("a parameterized test needs an underlying class");
        let mut instance = InstanceFactory::new().create(class)?;

        for field in self.test_class.tagged_fields_with(builtin::PARAMETER) {
            let index = field
                .tag(builtin::PARAMETER)
                .and_then(|tag| tag.value())
                .and_then(|value| value.as_int())
                .ok_or_else(|| Error::Instantiation {
                    class: class.fullname(),
                    reason: format!("field `{}` has no parameter index", field.name()),
                    source: None,
                })?;

            let value =
                usize::try_from(index)
                    .ok()
                    .and_then(|index| self.parameters.get(index))
                    .ok_or_else(|| Error::Instantiation {
                        class: class.fullname(),
                        reason: format!(
                            "field `{}` expects parameter {} but only {} were supplied",
                            field.name(),
                            index,
                            self.parameters.len()
                        ),
                        source: None,
                    })?;

            if !field.write(instance.as_mut(), value.as_ref()) {
                return Err(Error::Instantiation {
                    class: class.fullname(),
                    reason: format!(
                        "trying to set field `{}` with a value that is not of type {}",
                        field.name(),
                        field.ty()
                    ),
                    source: None,
                });
            }
        }
        Ok(instance)
    }
}
