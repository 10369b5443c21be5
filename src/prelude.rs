//! # testscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the testscope library. Import this module to get quick access to the essential
//! types for test-member discovery and runner construction.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all testscope operations
pub use crate::Error;

/// The result type used throughout testscope
pub use crate::Result;

/// Boxed error type carrying user-code failures through the model layer
pub use crate::error::BoxedError;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// The class model: member discovery and tag-indexed queries
pub use crate::metadata::class::{TestClass, TestClassRc, TestField, TestMethod};

/// Registry of class descriptors with a cache of built models
pub use crate::metadata::registry::ClassRegistry;

// ================================================================================================
// Descriptors
// ================================================================================================

/// Static class and member descriptors plus the fluent builder
pub use crate::metadata::descriptor::{
    ClassBuilder, ClassDescriptor, ClassDescriptorRc, ClassId, ClassModifiers,
    ConstructorDescriptor, FieldDescriptor, MemberModifiers, MethodDescriptor, TypeDesc,
};

// ================================================================================================
// Tags and Ordering
// ================================================================================================

/// Tag kinds, tag instances, tag values, and the reverse-order policy
pub use crate::metadata::tags::{builtin, OrderingPolicy, Tag, TagKind, TagValue};

// ================================================================================================
// Filters and Instantiation
// ================================================================================================

/// Test-selection filters and their textual specification
pub use crate::filter::{
    create_filter, create_filter_from_spec, filter_factory_class, Description, Filter,
    FilterFactory, FilterSpec,
};

/// Zero-argument instantiation of described classes
pub use crate::instantiate::InstanceFactory;

/// Parameterized-test instance creation
pub use crate::parameterized::TestWithParameters;

// ================================================================================================
// Validation
// ================================================================================================

/// Test-class validators
pub use crate::metadata::validation::{
    InjectedFieldsValidator, SinglePublicConstructorValidator, TestClassValidator,
};
