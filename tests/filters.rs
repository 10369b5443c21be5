//! Integration tests for filter specifications and filter-factory resolution.

use std::error::Error as _;

use testscope::prelude::*;

struct CategoryFilter {
    categories: Vec<String>,
}

impl Filter for CategoryFilter {
    fn should_run(&self, description: &Description) -> bool {
        self.categories
            .iter()
            .any(|category| description.display_name().contains(category.as_str()))
    }

    fn describe(&self) -> String {
        format!("categories {:?}", self.categories)
    }
}

#[derive(Default)]
struct CategoryFilterFactory;

impl FilterFactory for CategoryFilterFactory {
    fn create(&self, args: &str) -> std::result::Result<Box<dyn Filter>, BoxedError> {
        if args.is_empty() {
            return Err("expected a comma-separated category list".into());
        }
        Ok(Box::new(CategoryFilter {
            categories: args.split(',').map(str::to_string).collect(),
        }))
    }
}

fn registry_with_factory() -> ClassRegistry {
    let registry = ClassRegistry::new();
    let factory = filter_factory_class::<CategoryFilterFactory>("com.example", "MyFactory")
        .expect("factory class builds");
    registry.register(&factory);
    registry
}

#[test]
fn spec_round_trip_with_argument() {
    let spec = FilterSpec::parse("com.example.MyFactory=foo,bar");
    assert_eq!(spec.factory(), "com.example.MyFactory");
    assert_eq!(spec.args(), "foo,bar");
}

#[test]
fn spec_round_trip_without_argument() {
    let spec = FilterSpec::parse("com.example.MyFactory");
    assert_eq!(spec.factory(), "com.example.MyFactory");
    assert_eq!(spec.args(), "");
}

#[test]
fn creates_filter_from_full_spec() {
    let registry = registry_with_factory();
    let filter = create_filter_from_spec(&registry, "com.example.MyFactory=foo,bar").unwrap();

    assert!(filter.should_run(&Description::new("foo_roundtrip")));
    assert!(filter.should_run(&Description::new("bar_roundtrip")));
    assert!(!filter.should_run(&Description::new("baz_roundtrip")));
}

#[test]
fn unresolvable_identifier_is_wrapped_not_thrown() {
    let registry = ClassRegistry::new();
    let error = create_filter_from_spec(&registry, "com.example.Missing=x").unwrap_err();

    match &error {
        Error::FilterNotCreated { identifier, source } => {
            assert_eq!(identifier, "com.example.Missing");
            assert!(source.to_string().contains("com.example.Missing"));
        }
        other => panic!("expected FilterNotCreated, got {other:?}"),
    }
    assert!(error.source().is_some());
}

#[test]
fn failing_factory_constructor_is_wrapped() {
    let registry = ClassRegistry::new();
    let broken = ClassBuilder::new("Broken")
        .namespace("com.example")
        .public()
        .constructor(|ctor| ctor.public().body(|_| Err("constructor refused".into())))
        .build()
        .unwrap();
    registry.register(&broken);

    let error = create_filter(&registry, "com.example.Broken", "x").unwrap_err();
    assert!(matches!(error, Error::FilterNotCreated { .. }));
}

#[test]
fn factory_argument_rejection_is_wrapped() {
    let registry = registry_with_factory();
    let error = create_filter_from_spec(&registry, "com.example.MyFactory").unwrap_err();

    let Error::FilterNotCreated { source, .. } = &error else {
        panic!("expected FilterNotCreated, got {error:?}");
    };
    assert_eq!(source.to_string(), "expected a comma-separated category list");
}

#[test]
fn class_without_factory_payload_is_wrapped() {
    let registry = ClassRegistry::new();
    let plain = ClassBuilder::new("NotAFactory")
        .namespace("com.example")
        .public()
        .constructor(|ctor| ctor.public().creates(|| 42i32))
        .build()
        .unwrap();
    registry.register(&plain);

    let error = create_filter(&registry, "com.example.NotAFactory", "x").unwrap_err();
    let Error::FilterNotCreated { source, .. } = &error else {
        panic!("expected FilterNotCreated, got {error:?}");
    };
    assert!(source.to_string().contains("not a filter factory"));
}

#[test]
fn argument_string_may_itself_contain_equals() {
    let registry = registry_with_factory();
    let filter = create_filter_from_spec(&registry, "com.example.MyFactory=key=value").unwrap();
    assert!(filter.should_run(&Description::new("test_key=value_case")));
}
