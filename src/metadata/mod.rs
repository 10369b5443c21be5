//! Class metadata, member discovery, and tag resolution.
//!
//! This module implements the complete metadata model the rest of the framework is
//! built on: static descriptors registered by embedders, the tag vocabulary and its
//! ordering configuration, the class model with its hierarchy walk and shadow
//! resolution, the shared registry/cache, and the shape validators.
//!
//! # Key Components
//!
//! - [`descriptor`] - Static class and member descriptors plus the fluent builder
//! - [`tags`] - Tag kinds, tag values, and the reverse-order policy
//! - [`class`] - [`TestClass`](class::TestClass) and its discovered members
//! - [`registry`] - [`ClassRegistry`](registry::ClassRegistry), the shared model cache
//! - [`validation`] - Test-class validators layered on top of the model
//!
//! # Examples
//!
//! ```rust
//! use testscope::metadata::descriptor::ClassBuilder;
//! use testscope::metadata::registry::ClassRegistry;
//!
//! let registry = ClassRegistry::new();
//! let class = ClassBuilder::new("Smoke").public().build()?;
//! let model = registry.model(&class)?;
//! assert!(model.tagged_methods().is_empty());
//! # Ok::<(), testscope::Error>(())
//! ```

pub mod class;
pub mod descriptor;
pub mod registry;
pub mod tags;
pub mod validation;
