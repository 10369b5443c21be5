// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]
#![deny(unsafe_code)]

//! # testscope
//!
//! [![Crates.io](https://img.shields.io/crates/v/testscope.svg)](https://crates.io/crates/testscope)
//! [![Documentation](https://docs.rs/testscope/badge.svg)](https://docs.rs/testscope)
//! [![License](https://img.shields.io/badge/license-Apache--2.0-blue.svg)](https://github.com/BinFlip/testscope/blob/main/LICENSE-APACHE)
//!
//! A lightweight, deterministic test-member discovery and ordering core for building
//! unit-test runners. `testscope` models class hierarchies with annotation-style tags,
//! resolves overriding/shadowing across inheritance levels, and produces
//! deterministically ordered member lists a runner can invoke in the correct sequence.
//!
//! ## Features
//!
//! - **🔍 Hierarchy-aware discovery** - Walks the full superclass chain, resolving
//!   shadowed methods and fields exactly once
//! - **🏷️ Tag resolution** - Direct tags win over same-kind ancestor tags, distinct
//!   kinds accumulate, private ancestors contribute nothing
//! - **📋 Deterministic ordering** - Leaf-to-root by default, root-to-leaf for
//!   configured setup-style tag kinds, name-sorted fields within a class
//! - **🧩 No reflection required** - Classes are described once through a fluent
//!   builder; invocation flows through `dyn Any` closures
//! - **🗂️ Shared registry** - Lock-free registration and model caching for whole-run
//!   reuse
//! - **🎯 Filter resolution** - Textual `Factory=args` specifications resolved to
//!   runtime test-selection predicates
//!
//! ## Quick Start
//!
//! Add `testscope` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! testscope = "0.2"
//! ```
//!
//! ### Using the Prelude
//!
//! For convenient access to the most commonly used types, import the prelude:
//!
//! ```rust
//! use testscope::prelude::*;
//!
//! struct Fixture;
//!
//! let class = ClassBuilder::new("Fixture")
//!     .public()
//!     .method(|m| {
//!         m.name("check")
//!             .public()
//!             .tag(Tag::marker(builtin::TEST))
//!             .invoke_on(|_: &Fixture| Ok(()))
//!     })
//!     .build()?;
//!
//! let model = TestClass::new(class)?;
//! assert_eq!(model.tagged_methods_with(builtin::TEST).len(), 1);
//! # Ok::<(), testscope::Error>(())
//! ```
//!
//! ### Lifecycle Ordering
//!
//! Setup declared in a base class runs before setup declared in a subclass, while
//! teardown keeps subclass-first order:
//!
//! ```rust
//! use testscope::prelude::*;
//!
//! struct Base;
//! struct Derived;
//!
//! let base = ClassBuilder::new("Base")
//!     .public()
//!     .method(|m| {
//!         m.name("base_setup")
//!             .public()
//!             .tag(Tag::marker(builtin::BEFORE_EACH))
//!             .body(|_| Ok(Box::new(())))
//!     })
//!     .build()?;
//! let derived = ClassBuilder::new("Derived")
//!     .public()
//!     .extends(&base)
//!     .method(|m| {
//!         m.name("derived_setup")
//!             .public()
//!             .tag(Tag::marker(builtin::BEFORE_EACH))
//!             .body(|_| Ok(Box::new(())))
//!     })
//!     .build()?;
//!
//! let model = TestClass::new(derived)?;
//! let order: Vec<&str> = model
//!     .tagged_methods_with(builtin::BEFORE_EACH)
//!     .iter()
//!     .map(TestMethod::name)
//!     .collect();
//! assert_eq!(order, ["base_setup", "derived_setup"]);
//! # Ok::<(), testscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! `testscope` is organized into several key modules:
//!
//! - [`prelude`] - Convenient re-exports of commonly used types and traits
//! - [`metadata`] - Descriptors, tags, the class model, the registry, and validators
//! - [`filter`] - Test-selection filters and filter-factory resolution
//! - [`instantiate`] - The single zero-argument construction path
//! - [`parameterized`] - Constructor- and field-injected parameterized tests
//! - [`Error`] and [`Result`] - Comprehensive error handling
//!
//! ### Discovery Model
//!
//! The [`metadata::class::TestClass`] is the main entry point. Building one walks the
//! described superclass chain leaf-to-root, resolves each method's tag set against
//! its ancestors, folds every declared member through shadow resolution, and seals
//! the resulting ordered lists. The model is immutable afterwards; share it through
//! a [`metadata::registry::ClassRegistry`] rather than rebuilding it per query.
//!
//! ### Error Handling
//!
//! All fallible operations return [`Result`]. User-triggerable failures (bad
//! configuration, failing constructors, rejected filter arguments, throwing test
//! members) are [`Error`] variants carrying their causes; internal-consistency
//! faults panic, because they are programming errors rather than runtime
//! conditions. This layer never logs and never retries.

#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and traits.
///
/// This module provides a curated selection of the most frequently used types
/// from across the testscope library, allowing for convenient glob imports.
///
/// # Example
///
/// ```rust
/// use testscope::prelude::*;
///
/// let registry = ClassRegistry::new();
/// let class = ClassBuilder::new("Smoke").public().build()?;
/// let model = registry.model(&class)?;
/// assert!(model.tagged_methods().is_empty());
/// # Ok::<(), testscope::Error>(())
/// ```
pub mod prelude;

/// Class metadata, member discovery, and tag resolution.
///
/// This module implements the metadata model of the framework: static class and
/// member descriptors, the tag vocabulary with its ordering policy, the class model
/// with its hierarchy walk and shadow resolution, the shared registry, and the
/// shape validators.
///
/// # Key Types
///
/// - [`metadata::class::TestClass`] - The class model and its tag-indexed queries
/// - [`metadata::descriptor::ClassBuilder`] - Fluent registration of class shapes
/// - [`metadata::tags::OrderingPolicy`] - Reverse-order tag-kind configuration
/// - [`metadata::registry::ClassRegistry`] - Whole-run descriptor and model cache
pub mod metadata;

/// Test-selection filters and filter-factory resolution.
///
/// Parses `"<factory-identifier>[=<args>]"` specifications and resolves them to
/// runtime [`filter::Filter`] predicates through registered factory classes.
pub mod filter;

/// Zero-argument instantiation of described classes.
///
/// [`instantiate::InstanceFactory`] is the only sanctioned construction path for
/// filter factories and field-injected parameterized test instances.
pub mod instantiate;

/// Parameterized-test instance creation.
///
/// [`parameterized::TestWithParameters`] pairs a class model with one parameter set
/// and creates instances via constructor or field injection.
pub mod parameterized;

/// `testscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
/// This is used consistently throughout the crate for all fallible operations.
///
/// # Examples
///
/// ```rust
/// use testscope::{ClassBuilder, Result, TestClass};
///
/// fn model_of(name: &str) -> Result<TestClass> {
///     TestClass::new(ClassBuilder::new(name).public().build()?)
/// }
/// # let _ = model_of("Fixture");
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `testscope` Error type
///
/// The main error type for all operations in this crate. Provides detailed error
/// information for model construction, filter resolution, instantiation, and
/// tagged-member invocation.
///
/// # Examples
///
/// ```rust
/// use testscope::{ClassBuilder, Error, TestClass};
///
/// let class = ClassBuilder::new("Fixture").public().build()?;
/// match TestClass::new(class) {
///     Ok(model) => println!("{model}"),
///     Err(Error::Configuration { class, count }) => {
///         eprintln!("`{class}` declares {count} public constructors");
///     }
///     Err(e) => eprintln!("Error: {e}"),
/// }
/// # Ok::<(), testscope::Error>(())
/// ```
pub use error::Error;

/// Boxed error type carrying user-code failures through the model layer.
///
/// Method bodies, constructors, and filter factories are authored by the framework
/// user; their failures travel through the model as this opaque boxed cause.
pub use error::BoxedError;

/// The class model: member discovery and tag-indexed queries.
///
/// See [`metadata::class::TestClass`] for the discovery algorithm and query surface.
pub use metadata::class::{TestClass, TestClassRc};

/// Fluent registration of class shapes.
///
/// See [`metadata::descriptor::ClassBuilder`].
pub use metadata::descriptor::ClassBuilder;

/// Whole-run descriptor registration and model caching.
///
/// See [`metadata::registry::ClassRegistry`].
pub use metadata::registry::ClassRegistry;
