//! Static class and member descriptors.
//!
//! This module is the crate's "declared member provider": a registration-based
//! replacement for the runtime reflection a managed platform would offer. Embedders
//! describe each class once (shape, superclass, constructors, methods, fields, tags)
//! and the class model consumes those descriptions without ever looking at the
//! concrete Rust types behind them.
//!
//! # Key Components
//!
//! - [`ClassDescriptor`] / [`ClassId`] / [`ClassModifiers`] - One class and its identity
//! - [`MethodDescriptor`] / [`FieldDescriptor`] / [`ConstructorDescriptor`] - Declared members
//! - [`TypeDesc`] - Type identity for signatures, keyed off [`std::any::TypeId`]
//! - [`ClassBuilder`] - Fluent construction of the above
//!
//! # Examples
//!
//! ```rust
//! use testscope::metadata::descriptor::ClassBuilder;
//!
//! let base = ClassBuilder::new("Base").public().build()?;
//! let derived = ClassBuilder::new("Derived").public().extends(&base).build()?;
//! assert_eq!(derived.superclass().unwrap().name(), "Base");
//! # Ok::<(), testscope::Error>(())
//! ```

mod builder;
mod class;
mod member;

pub use builder::{ClassBuilder, ConstructorBuilder, FieldBuilder, MethodBuilder};
pub use class::{ClassDescriptor, ClassDescriptorRc, ClassId, ClassModifiers, SuperclassChain};
pub use member::{
    ArgumentValue, ConstructorBody, ConstructorDescriptor, FieldDescriptor, FieldGetter,
    FieldSetter, MemberModifiers, MethodBody, MethodDescriptor, TypeDesc,
};
