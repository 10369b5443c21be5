//! Test-selection filters and the textual filter specification.
//!
//! A [`Filter`] is an opaque predicate over test [`Description`]s: the runner asks it
//! whether each discovered test should run. Filters are produced by filter factories
//! resolved from a textual specification of the form
//! `"<fully-qualified-factory-identifier>[=<argument-string>]"`; see
//! [`factories`] for the resolution machinery.
//!
//! # Examples
//!
//! ```rust
//! use testscope::filter::FilterSpec;
//!
//! let spec = FilterSpec::parse("com.example.MyFactory=foo,bar");
//! assert_eq!(spec.factory(), "com.example.MyFactory");
//! assert_eq!(spec.args(), "foo,bar");
//!
//! let bare = FilterSpec::parse("com.example.MyFactory");
//! assert_eq!(bare.factory(), "com.example.MyFactory");
//! assert_eq!(bare.args(), "");
//! ```

pub mod factories;

pub use factories::{create_filter, create_filter_from_spec, filter_factory_class, FilterFactory};

use std::fmt;

/// Description of one runnable test, as seen by filters.
///
/// Carries the display name the runner derives for the test; filters match against
/// it and nothing else. Keeping the surface this small is deliberate: the matching
/// logic belongs to filter factories, not to the resolver or the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    display_name: String,
}

impl Description {
    /// Creates a description with the given display name.
    #[must_use]
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
        }
    }

    /// The display name of the test.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}

/// A predicate over test descriptions.
///
/// Implementations decide which tests run; the framework only ever calls
/// [`should_run`](Filter::should_run) and [`describe`](Filter::describe).
pub trait Filter {
    /// Whether the described test should run.
    fn should_run(&self, description: &Description) -> bool;

    /// A human-readable description of this filter, for reporting.
    fn describe(&self) -> String;
}

/// A parsed filter specification: factory identifier plus argument string.
///
/// Parsing splits on the *first* `=`; everything after it is the argument string,
/// verbatim. A specification without `=` has an empty argument string; the factory
/// is still named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    factory: String,
    args: String,
}

impl FilterSpec {
    /// Parses a specification string. Never fails.
    #[must_use]
    pub fn parse(spec: &str) -> Self {
        match spec.split_once('=') {
            Some((factory, args)) => Self {
                factory: factory.to_string(),
                args: args.to_string(),
            },
            None => Self {
                factory: spec.to_string(),
                args: String::new(),
            },
        }
    }

    /// The fully-qualified factory identifier.
    #[must_use]
    pub fn factory(&self) -> &str {
        &self.factory
    }

    /// The argument string handed to the factory (may be empty).
    #[must_use]
    pub fn args(&self) -> &str {
        &self.args
    }
}
