//! Tag-specific types and data structures.
//!
//! This module contains the types used for representing tags attached to declaration
//! sites: the interned [`TagKind`] identity, the [`Tag`] instance with its optional
//! argument payload, and the [`builtin`] vocabulary the surrounding framework ships
//! with. These types are self-contained; resolution across a hierarchy happens in the
//! class model.

use std::fmt;

/// Identity of a tag category.
///
/// A `TagKind` is a cheap, copyable identifier comparing by name. Two tags of the same
/// kind on the same member mask each other during hierarchy resolution (the more
/// derived declaration wins), while distinct kinds accumulate.
///
/// Kinds are ordinary values, so the vocabulary is open: the [`builtin`] module
/// provides the framework's defaults, and embedders can mint their own with
/// [`TagKind::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagKind(&'static str);

impl TagKind {
    /// Creates a tag kind with the given name.
    ///
    /// Names are compared literally, so two kinds created with the same name are the
    /// same kind.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// The name of this tag kind.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Argument payload carried by a tag.
///
/// Most tags are pure markers; the ones that configure behavior (the index of an
/// injected parameter, a named grouping) carry a value.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    /// Boolean value
    Bool(bool),
    /// Signed 32-bit integer (parameter indices, expected counts)
    Int(i32),
    /// UTF-8 string (names, categories)
    Str(String),
}

impl TagValue {
    /// Returns the integer payload, if this value is an integer.
    #[must_use]
    pub fn as_int(&self) -> Option<i32> {
        match self {
            TagValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the string payload, if this value is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TagValue::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the boolean payload, if this value is a boolean.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TagValue::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

/// One tag attached to a declaration site.
///
/// A tag pairs a [`TagKind`] with an optional [`TagValue`] argument. Tags are attached
/// to method, field, and class declarations through the descriptor builder and are
/// resolved across the hierarchy by the class model.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    kind: TagKind,
    value: Option<TagValue>,
}

impl Tag {
    /// Creates a marker tag with no argument.
    #[must_use]
    pub const fn marker(kind: TagKind) -> Self {
        Self { kind, value: None }
    }

    /// Creates a tag carrying an argument value.
    #[must_use]
    pub const fn with_value(kind: TagKind, value: TagValue) -> Self {
        Self {
            kind,
            value: Some(value),
        }
    }

    /// The kind of this tag.
    #[must_use]
    pub const fn kind(&self) -> TagKind {
        self.kind
    }

    /// The argument value of this tag, if any.
    #[must_use]
    pub fn value(&self) -> Option<&TagValue> {
        self.value.as_ref()
    }
}

/// The framework's default tag vocabulary.
///
/// These constants are a convenience for runners built on this crate; the model layer
/// itself treats every [`TagKind`] uniformly and learns about reverse-order kinds only
/// through the [`OrderingPolicy`](crate::metadata::tags::OrderingPolicy) it is handed.
pub mod builtin {
    use super::TagKind;

    /// Marks a method as a test entry point.
    pub const TEST: TagKind = TagKind::new("test");
    /// Runs before every test on a fresh instance. Reverse-order by default.
    pub const BEFORE_EACH: TagKind = TagKind::new("before_each");
    /// Runs once before all tests of a class. Reverse-order by default.
    pub const BEFORE_ALL: TagKind = TagKind::new("before_all");
    /// Runs after every test.
    pub const AFTER_EACH: TagKind = TagKind::new("after_each");
    /// Runs once after all tests of a class.
    pub const AFTER_ALL: TagKind = TagKind::new("after_all");
    /// Marks a member that supplies a rule wrapping test execution.
    pub const RULE: TagKind = TagKind::new("rule");
    /// Marks a field receiving an injected parameter; carries the parameter index.
    pub const PARAMETER: TagKind = TagKind::new("parameter");
    /// Marks a member supplying a data point for theory-style tests.
    pub const DATA_POINT: TagKind = TagKind::new("data_point");
}
