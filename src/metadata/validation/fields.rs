//! Parameter-field validation for field-injected parameterized tests.

use crate::metadata::class::TestClass;
use crate::metadata::tags::builtin;
use crate::metadata::validation::TestClassValidator;
use crate::Error;

/// Validates the parameter-tagged fields of a class against a parameter count.
///
/// A class opting into field injection must declare exactly as many
/// parameter-tagged fields as there are parameters, every index must be in range,
/// and every index must be used exactly once. Classes without parameter-tagged
/// fields pass trivially (they use constructor injection).
#[derive(Debug, Clone, Copy)]
pub struct InjectedFieldsValidator {
    parameter_count: usize,
}

impl InjectedFieldsValidator {
    /// Creates a validator for a run with `parameter_count` parameters.
    #[must_use]
    pub fn new(parameter_count: usize) -> Self {
        Self { parameter_count }
    }
}

impl TestClassValidator for InjectedFieldsValidator {
    fn validate(&self, test_class: &TestClass) -> Vec<Error> {
        let fields = test_class.tagged_fields_with(builtin::PARAMETER);
        if fields.is_empty() {
            return Vec::new();
        }

        let mut errors = Vec::new();
        if fields.len() != self.parameter_count {
            errors.push(invalid_member_error!(
                "Wrong number of parameters and parameter fields. \
                 Parameter fields counted: {}, available parameters: {}.",
                fields.len(),
                self.parameter_count
            ));
            return errors;
        }

        let mut used = vec![0usize; fields.len()];
        for field in fields {
            let index = field
                .tag(builtin::PARAMETER)
                .and_then(|tag| tag.value())
                .and_then(|value| value.as_int());
            match index.and_then(|index| usize::try_from(index).ok()) {
                Some(index) if index < fields.len() => used[index] += 1,
                _ => errors.push(invalid_member_error!(
                    "Invalid parameter value on field `{}`. Parameter fields counted: {}. \
                     Please use an index between 0 and {}.",
                    field.name(),
                    fields.len(),
                    fields.len() - 1
                )),
            }
        }

        for (index, count) in used.iter().enumerate() {
            if *count == 0 {
                errors.push(invalid_member_error!("Parameter({}) is never used.", index));
            } else if *count > 1 {
                errors.push(invalid_member_error!(
                    "Parameter({}) is used more than once ({}).",
                    index,
                    count
                ));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::descriptor::ClassBuilder;
    use crate::metadata::tags::{Tag, TagValue};

    #[derive(Default)]
    struct Fixture {
        a: i32,
        b: i32,
    }

    fn class_with_indices(indices: &[i32]) -> TestClass {
        let mut builder = ClassBuilder::new("Fixture")
            .public()
            .constructor(|ctor| ctor.public().creates(Fixture::default));
        for (position, index) in indices.iter().enumerate() {
            let index = *index;
            builder = builder.field(move |field| {
                field
                    .name(format!("field_{position}"))
                    .public()
                    .ty::<i32>()
                    .tag(Tag::with_value(builtin::PARAMETER, TagValue::Int(index)))
                    .set(move |fixture: &mut Fixture, value: i32| {
                        if position == 0 {
                            fixture.a = value;
                        } else {
                            fixture.b = value;
                        }
                    })
            });
        }
        TestClass::new(builder.build().unwrap()).unwrap()
    }

    #[test]
    fn passes_without_parameter_fields() {
        let class = ClassBuilder::new("Plain").public().build().unwrap();
        let model = TestClass::new(class).unwrap();
        assert!(InjectedFieldsValidator::new(2).validate(&model).is_empty());
    }

    #[test]
    fn passes_with_matching_distinct_indices() {
        let model = class_with_indices(&[0, 1]);
        assert!(InjectedFieldsValidator::new(2).validate(&model).is_empty());
    }

    #[test]
    fn complains_about_count_mismatch() {
        let model = class_with_indices(&[0, 1]);
        let errors = InjectedFieldsValidator::new(3).validate(&model);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("Wrong number of parameters"));
    }

    #[test]
    fn complains_about_duplicate_and_unused_indices() {
        let model = class_with_indices(&[0, 0]);
        let errors = InjectedFieldsValidator::new(2).validate(&model);
        let rendered: Vec<String> = errors.iter().map(ToString::to_string).collect();
        assert!(rendered.iter().any(|message| message.contains("never used")));
        assert!(rendered
            .iter()
            .any(|message| message.contains("more than once")));
    }

    #[test]
    fn complains_about_out_of_range_index() {
        let model = class_with_indices(&[0, 5]);
        let errors = InjectedFieldsValidator::new(2).validate(&model);
        assert!(errors
            .iter()
            .any(|error| error.to_string().contains("Invalid parameter value")));
    }
}
