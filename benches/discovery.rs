//! Benchmarks for class-model discovery.
//!
//! Tests discovery performance for representative hierarchy shapes:
//! - Flat classes with many tagged methods
//! - Deep superclass chains with lifecycle methods at every level
//! - Tag-indexed queries against a built model

extern crate testscope;

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use testscope::prelude::*;

struct Fixture;

/// A flat class with `methods` tagged test methods.
fn flat_class(methods: usize) -> ClassDescriptorRc {
    let mut builder = ClassBuilder::new("Flat").public();
    for index in 0..methods {
        builder = builder.method(move |m| {
            m.name(format!("test_{index}"))
                .public()
                .tag(Tag::marker(builtin::TEST))
                .invoke_on(|_: &Fixture| Ok(()))
        });
    }
    builder.build().unwrap()
}

/// A chain of `depth` classes, each declaring one setup, one teardown, and one test.
fn deep_chain(depth: usize) -> ClassDescriptorRc {
    let mut current: Option<ClassDescriptorRc> = None;
    for level in 0..depth {
        let mut builder = ClassBuilder::new(format!("Level{level}"))
            .public()
            .method(move |m| {
                m.name(format!("setup_{level}"))
                    .public()
                    .tag(Tag::marker(builtin::BEFORE_EACH))
                    .invoke_on(|_: &Fixture| Ok(()))
            })
            .method(move |m| {
                m.name(format!("teardown_{level}"))
                    .public()
                    .tag(Tag::marker(builtin::AFTER_EACH))
                    .invoke_on(|_: &Fixture| Ok(()))
            })
            .method(move |m| {
                m.name(format!("test_{level}"))
                    .public()
                    .tag(Tag::marker(builtin::TEST))
                    .invoke_on(|_: &Fixture| Ok(()))
            });
        if let Some(superclass) = &current {
            builder = builder.extends(superclass);
        }
        current = Some(builder.build().unwrap());
    }
    current.unwrap()
}

fn bench_flat_discovery(c: &mut Criterion) {
    let class = flat_class(64);

    c.bench_function("discovery_flat_64_methods", |b| {
        b.iter(|| {
            let model = TestClass::new(black_box(class.clone())).unwrap();
            black_box(model)
        });
    });
}

fn bench_deep_discovery(c: &mut Criterion) {
    let class = deep_chain(16);

    c.bench_function("discovery_chain_depth_16", |b| {
        b.iter(|| {
            let model = TestClass::new(black_box(class.clone())).unwrap();
            black_box(model)
        });
    });
}

fn bench_tag_queries(c: &mut Criterion) {
    let model = TestClass::new(deep_chain(16)).unwrap();

    c.bench_function("query_before_each_chain_depth_16", |b| {
        b.iter(|| {
            let methods = model.tagged_methods_with(black_box(builtin::BEFORE_EACH));
            black_box(methods.len())
        });
    });
}

fn bench_cached_model(c: &mut Criterion) {
    let registry = ClassRegistry::new();
    let class = deep_chain(16);

    c.bench_function("registry_cached_model_chain_depth_16", |b| {
        b.iter(|| {
            let model = registry.model(black_box(&class)).unwrap();
            black_box(model)
        });
    });
}

criterion_group!(
    benches,
    bench_flat_discovery,
    bench_deep_discovery,
    bench_tag_queries,
    bench_cached_model
);
criterion_main!(benches);
