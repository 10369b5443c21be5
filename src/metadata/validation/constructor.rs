//! Constructor-count validation.

use crate::metadata::class::TestClass;
use crate::metadata::validation::TestClassValidator;
use crate::Error;

/// Validates that a class has one and only one public constructor.
///
/// Model construction already rejects classes with more than one, so the only
/// violation this can report on a built model is a class with none.
#[derive(Debug, Default, Clone, Copy)]
pub struct SinglePublicConstructorValidator;

impl SinglePublicConstructorValidator {
    /// Creates the validator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TestClassValidator for SinglePublicConstructorValidator {
    fn validate(&self, test_class: &TestClass) -> Vec<Error> {
        let Some(class) = test_class.class() else {
            return Vec::new();
        };
        if class.public_constructors().count() == 1 {
            Vec::new()
        } else {
            vec![invalid_member_error!(
                "Test class should have exactly one public constructor"
            )]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::descriptor::ClassBuilder;

    #[test]
    fn accepts_a_single_public_constructor() {
        let class = ClassBuilder::new("WellFormed")
            .public()
            .constructor(|ctor| ctor.public().creates(|| ()))
            .build()
            .unwrap();
        let model = TestClass::new(class).unwrap();
        assert!(SinglePublicConstructorValidator::new()
            .validate(&model)
            .is_empty());
    }

    #[test]
    fn complains_about_a_class_without_one() {
        let class = ClassBuilder::new("NoCtor").public().build().unwrap();
        let model = TestClass::new(class).unwrap();
        let errors = SinglePublicConstructorValidator::new().validate(&model);
        assert_eq!(errors.len(), 1);
        assert!(errors[0]
            .to_string()
            .contains("exactly one public constructor"));
    }
}
