use thiserror::Error;

macro_rules! invalid_member_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::InvalidMember {
            message: $msg.to_string(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::InvalidMember {
            message: format!($fmt, $($arg)*),
        }
    };
}

/// Boxed error type used to carry failures that originate outside this crate.
///
/// Method bodies, constructors, and filter factories are authored by the framework
/// user; whatever error type they produce is transported through the model layer
/// as an opaque boxed cause and surfaced via the `source()` chain of [`Error`].
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// This enum covers all possible error conditions that can occur during test-class model
/// construction, filter resolution, instantiation, and tagged-member invocation. Each
/// variant provides specific context about the failure mode to enable appropriate error
/// handling.
///
/// # Error Categories
///
/// ## Model Construction Errors
/// - [`Error::Configuration`] - Class violates the single-public-constructor invariant
///
/// ## Filter Resolution Errors
/// - [`Error::FilterNotCreated`] - Filter factory lookup, instantiation, or creation failed
///
/// ## Instantiation Errors
/// - [`Error::Instantiation`] - Zero-argument construction failed
///
/// ## Invocation Errors
/// - [`Error::MemberInvocation`] - A tagged method failed while collecting values
///
/// ## Validation Errors
/// - [`Error::InvalidMember`] - A member violates a shape constraint
///
/// Internal-consistency faults (a field the registry vouched for turning out to be
/// unreadable, a constructor count the model already verified) are programming errors
/// and panic instead of appearing here; see the `# Panics` sections of the operations
/// that document them.
///
/// # Examples
///
/// ```rust
/// use testscope::{Error, TestClass};
/// use testscope::metadata::descriptor::ClassBuilder;
///
/// let class = ClassBuilder::new("TwoConstructors")
///     .public()
///     .constructor(|c| c.public().body(|_| Ok(Box::new(()))))
///     .constructor(|c| c.public().parameter::<i32>().body(|_| Ok(Box::new(()))))
///     .build()?;
///
/// match TestClass::new(class) {
///     Ok(_) => println!("Model built"),
///     Err(Error::Configuration { class, count }) => {
///         eprintln!("`{}` has {} public constructors", class, count);
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// # Ok::<(), testscope::Error>(())
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The class has more than one public constructor.
    ///
    /// Raised at model build time; a class model is never produced for such a class.
    /// Exactly one public constructor (or none, for classes that are only queried)
    /// is required so that the runner's construction path is unambiguous.
    #[error("class `{class}` can only have one public constructor, found {count}")]
    Configuration {
        /// Fully-qualified name of the offending class
        class: String,
        /// Number of public constructors that were declared
        count: usize,
    },

    /// A filter could not be created from its factory identifier.
    ///
    /// Raised when the identifier does not name a registered factory class, when the
    /// factory class cannot be instantiated, when the constructed instance is not a
    /// filter factory, or when the factory rejects its argument string. The original
    /// cause is always preserved.
    #[error("could not create filter with factory `{identifier}`")]
    FilterNotCreated {
        /// The fully-qualified factory identifier from the filter specification
        identifier: String,
        /// The originating failure
        #[source]
        source: BoxedError,
    },

    /// Zero-argument construction of a class failed.
    ///
    /// Raised when the class has no public zero-argument constructor with an
    /// executable body, or when that constructor itself reports a failure.
    #[error("could not instantiate `{class}`: {reason}")]
    Instantiation {
        /// Fully-qualified name of the class that could not be constructed
        class: String,
        /// Why construction was impossible or failed
        reason: String,
        /// The constructor's own failure, when construction was attempted
        #[source]
        source: Option<BoxedError>,
    },

    /// A tagged method failed while its results were being collected.
    ///
    /// Wraps the method's own failure together with the failing member's name, so
    /// that a runner aggregating failures can attribute them without re-resolving
    /// the member list.
    #[error("exception in `{member}`")]
    MemberInvocation {
        /// Name of the member whose invocation failed
        member: String,
        /// The failure the member body reported
        #[source]
        source: BoxedError,
    },

    /// A member violates a shape constraint.
    ///
    /// Produced by the shape-validation helpers (visibility, arity, void-ness,
    /// static-ness) and by the test-class validators. These are collected into
    /// caller-owned lists rather than aborting discovery.
    #[error("{message}")]
    InvalidMember {
        /// Description of the violated constraint, naming the member
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_names_class_and_count() {
        let error = Error::Configuration {
            class: "fixtures.TwoConstructors".to_string(),
            count: 2,
        };
        let rendered = error.to_string();
        assert!(rendered.contains("fixtures.TwoConstructors"));
        assert!(rendered.contains('2'));
    }

    #[test]
    fn member_invocation_preserves_cause() {
        use std::error::Error as _;

        let cause: BoxedError = "setup exploded".into();
        let error = Error::MemberInvocation {
            member: "setup".to_string(),
            source: cause,
        };
        assert_eq!(error.to_string(), "exception in `setup`");
        assert_eq!(error.source().unwrap().to_string(), "setup exploded");
    }

    #[test]
    fn invalid_member_macro_formats_arguments() {
        let error = invalid_member_error!("Method {}() should be public", "run");
        assert_eq!(error.to_string(), "Method run() should be public");
    }
}
