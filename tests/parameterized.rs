//! Integration tests for parameterized-test instance creation and the validators
//! guarding it.

use std::sync::Arc;

use testscope::prelude::*;

#[derive(Default)]
struct Addition {
    input: i32,
    expected: i32,
}

fn field_injected_class() -> ClassDescriptorRc {
    ClassBuilder::new("Addition")
        .namespace("fixtures")
        .public()
        .constructor(|ctor| ctor.public().creates(Addition::default))
        .field(|field| {
            field
                .name("input")
                .public()
                .ty::<i32>()
                .tag(Tag::with_value(builtin::PARAMETER, TagValue::Int(0)))
                .set(|fx: &mut Addition, value: i32| fx.input = value)
        })
        .field(|field| {
            field
                .name("expected")
                .public()
                .ty::<i32>()
                .tag(Tag::with_value(builtin::PARAMETER, TagValue::Int(1)))
                .set(|fx: &mut Addition, value: i32| fx.expected = value)
        })
        .build()
        .unwrap()
}

#[test]
fn field_injection_end_to_end() {
    let model = Arc::new(TestClass::new(field_injected_class()).unwrap());
    let test = TestWithParameters::new("[0]", model, vec![Box::new(20i32), Box::new(22i32)]);
    assert_eq!(test.name(), "[0]");
    assert!(test.fields_are_tagged());

    let fixture = test.create_test().unwrap().downcast::<Addition>().unwrap();
    assert_eq!(fixture.input + fixture.expected, 42);
}

#[test]
fn constructor_injection_end_to_end() {
    struct Scaled {
        value: i32,
    }

    let class = ClassBuilder::new("Scaled")
        .public()
        .constructor(|ctor| {
            ctor.public().parameter::<i32>().body(|args| {
                let value = args[0]
                    .downcast_ref::<i32>()
                    .copied()
                    .ok_or("argument 0 must be an i32")?;
                Ok(Box::new(Scaled { value: value * 2 }))
            })
        })
        .build()
        .unwrap();

    let model = Arc::new(TestClass::new(class).unwrap());
    let test = TestWithParameters::new("[1]", model, vec![Box::new(21i32)]);
    assert!(!test.fields_are_tagged());

    let fixture = test.create_test().unwrap().downcast::<Scaled>().unwrap();
    assert_eq!(fixture.value, 42);
}

#[test]
fn mistyped_parameter_reports_field_and_type() {
    let model = Arc::new(TestClass::new(field_injected_class()).unwrap());
    let test = TestWithParameters::new(
        "[0]",
        model,
        vec![Box::new("twenty".to_string()), Box::new(22i32)],
    );

    let error = test.create_test().unwrap_err();
    let Error::Instantiation { reason, .. } = &error else {
        panic!("expected Instantiation, got {error:?}");
    };
    assert!(reason.contains("input"));
    assert!(reason.contains("i32"));
}

#[test]
fn injected_fields_validator_guards_the_run() {
    let model = TestClass::new(field_injected_class()).unwrap();

    assert!(InjectedFieldsValidator::new(2).validate(&model).is_empty());
    assert_eq!(InjectedFieldsValidator::new(3).validate(&model).len(), 1);
}

#[test]
fn single_public_constructor_validator_accepts_the_fixture() {
    let model = TestClass::new(field_injected_class()).unwrap();
    assert!(SinglePublicConstructorValidator::new()
        .validate(&model)
        .is_empty());
}

#[test]
fn validators_compose_over_one_model() {
    let model = TestClass::new(field_injected_class()).unwrap();
    let validators: Vec<Box<dyn TestClassValidator>> = vec![
        Box::new(SinglePublicConstructorValidator::new()),
        Box::new(InjectedFieldsValidator::new(2)),
    ];

    let errors: Vec<Error> = validators
        .iter()
        .flat_map(|validator| validator.validate(&model))
        .collect();
    assert!(errors.is_empty());
}

#[test]
fn instance_factory_rejects_private_zero_arg_constructor() {
    let class = ClassBuilder::new("Hidden")
        .public()
        .constructor(|ctor| ctor.private().creates(Addition::default))
        .build()
        .unwrap();

    let error = InstanceFactory::new().create(&class).unwrap_err();
    let Error::Instantiation { class, reason, .. } = &error else {
        panic!("expected Instantiation, got {error:?}");
    };
    assert_eq!(class, "Hidden");
    assert!(reason.contains("no public zero-argument constructor"));
}
